use std::io::Read;

use log::info;

use crate::constants::{FONT_SET, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::error::{Error, Result};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// ```text
/// 0x000..0x050  font set (hex digits 0..F)
/// 0x050..0x200  unused, zeroed
/// 0x200..0x1000 program, then free memory
/// ```
#[derive(Clone)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut cells = [0; MEMORY_SIZE];
        cells[..FONT_SET.len()].copy_from_slice(&FONT_SET);
        Memory { cells }
    }

    /// Copies a program into memory starting at `PROGRAM_START`.
    ///
    /// Fails without touching memory if the program would run past the end of memory.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::OutOfBounds {
                address: PROGRAM_START as usize + program.len(),
            });
        }
        self.write_range(PROGRAM_START, program)?;
        info!("loaded {} byte program at {:#05X}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a source that contains a ROM; it is read to its end
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        reader.read_to_end(&mut program)?;
        self.load_program(&program)
    }

    pub fn read_byte(&self, address: u16) -> Result<u8> {
        self.cells
            .get(address as usize)
            .copied()
            .ok_or(Error::OutOfBounds {
                address: address as usize,
            })
    }

    pub fn write_byte(&mut self, address: u16, value: u8) -> Result<()> {
        let cell = self
            .cells
            .get_mut(address as usize)
            .ok_or(Error::OutOfBounds {
                address: address as usize,
            })?;
        *cell = value;
        Ok(())
    }

    /// Gets the opcode at `pc`.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes,
    /// most significant first.
    pub fn fetch_opcode(&self, pc: u16) -> Result<u16> {
        let bytes = self.read_range(pc, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    /// Borrows `len` bytes starting at `address`
    pub fn read_range(&self, address: u16, len: usize) -> Result<&[u8]> {
        let start = address as usize;
        let end = start + len;
        self.cells.get(start..end).ok_or(Error::OutOfBounds {
            address: end.saturating_sub(1).max(start),
        })
    }

    /// Copies `bytes` into memory starting at `address`; nothing is written if any byte
    /// would land out of bounds.
    pub fn write_range(&mut self, address: u16, bytes: &[u8]) -> Result<()> {
        let start = address as usize;
        let end = start + bytes.len();
        self.cells
            .get_mut(start..end)
            .ok_or(Error::OutOfBounds {
                address: end.saturating_sub(1).max(start),
            })?
            .copy_from_slice(bytes);
        Ok(())
    }

    /// The whole address space, for inspection
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
