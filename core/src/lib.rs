//! # emu8-core
//! A Chip-8 interpreter with no opinion on windows, input devices or clocks.
//!
//! ```
//! use emu8_core::Interpreter;
//!
//! let mut chip8 = Interpreter::new();
//! // V0 = 1; V0 += 1
//! chip8.load_program(&[0x60, 0x01, 0x70, 0x01]).unwrap();
//! chip8.step().unwrap();
//! chip8.step().unwrap();
//! assert_eq!(chip8.registers().get(0x0).unwrap(), 2);
//! ```
pub use config::Config;
pub use display::{Display, FrameBuffer, SpriteMode};
pub use error::{Error, Result};
pub use instruction::{AluOp, Instruction};
pub use interpreter::Interpreter;
pub use keypad::Keypad;
pub use memory::Memory;
pub use registers::Registers;
pub use stack::CallStack;
pub use timers::Timers;

pub mod constants;
mod config;
mod display;
mod error;
mod instruction;
mod interpreter;
mod keypad;
mod memory;
mod opcode;
pub mod operations;
mod registers;
mod stack;
mod state;
mod timers;
