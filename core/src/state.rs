use crate::constants::PROGRAM_START;
use crate::display::{Display, SpriteMode};
use crate::memory::Memory;
use crate::registers::Registers;
use crate::stack::CallStack;
use crate::timers::Timers;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// - (pc) a 16-bit program counter, always even in well formed programs
/// - 16 8-bit registers and the 16-bit index register, see `Registers`
/// - a call stack of return addresses
///
/// ## Timers
/// - 2 8-bit timers (delay & sound), counted down by the host at 60Hz
///
/// ## Memory
/// - 4096 bytes of addressable memory
/// - a 64x32 frame buffer and its redraw flag
///
/// The keypad belongs to the input device and is not part of a snapshot.
#[derive(Clone)]
pub struct State {
    pub pc: u16,
    pub registers: Registers,
    pub stack: CallStack,
    pub timers: Timers,
    pub memory: Memory,
    pub display: Display,
}

impl State {
    pub fn new(sprite_mode: SpriteMode) -> Self {
        State {
            // 0x200 is where ROMs are loaded into memory
            pc: PROGRAM_START,
            registers: Registers::new(),
            stack: CallStack::new(),
            timers: Timers::new(),
            memory: Memory::new(),
            display: Display::new(sprite_mode),
        }
    }
}
