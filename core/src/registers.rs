use crate::constants::{FLAG_REGISTER, REGISTER_COUNT};
use crate::error::{Error, Result};

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag and is clobbered by
///       arithmetic and drawing instructions
/// - (i) a 16-bit memory address register
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registers {
    v: [u8; REGISTER_COUNT],
    i: u16,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, register: usize) -> Result<u8> {
        self.v
            .get(register)
            .copied()
            .ok_or(Error::InvalidRegister(register))
    }

    pub fn set(&mut self, register: usize, value: u8) -> Result<()> {
        let slot = self
            .v
            .get_mut(register)
            .ok_or(Error::InvalidRegister(register))?;
        *slot = value;
        Ok(())
    }

    /// Replaces a register's value with `f(current)` in a single step
    pub fn transform<F>(&mut self, register: usize, f: F) -> Result<()>
    where
        F: FnOnce(u8) -> u8,
    {
        let slot = self
            .v
            .get_mut(register)
            .ok_or(Error::InvalidRegister(register))?;
        *slot = f(*slot);
        Ok(())
    }

    /// VF
    pub fn flag(&self) -> u8 {
        self.v[FLAG_REGISTER]
    }

    pub fn set_flag(&mut self, value: u8) {
        self.v[FLAG_REGISTER] = value;
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn set_index(&mut self, value: u16) {
        self.i = value;
    }

    /// V0..=Vx
    pub fn range(&self, last: usize) -> Result<&[u8]> {
        self.v.get(..=last).ok_or(Error::InvalidRegister(last))
    }

    /// Fills V0.. with `values`
    pub fn set_range(&mut self, values: &[u8]) -> Result<()> {
        self.v
            .get_mut(..values.len())
            .ok_or(Error::InvalidRegister(values.len().saturating_sub(1)))?
            .copy_from_slice(values);
        Ok(())
    }
}
