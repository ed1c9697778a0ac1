use std::io;

/// Errors raised by the interpreter and its components
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An address, opcode fetch or program load fell outside of memory
    #[error("memory access out of bounds at address {address:#06X}")]
    OutOfBounds { address: usize },

    /// A register index outside of V0..VF; decoding masks indices to 4 bits so this
    /// indicates a broken internal invariant
    #[error("invalid register V{0:X}")]
    InvalidRegister(usize),

    /// A return was executed with no subroutine on the call stack
    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    /// Reading a ROM from its source failed
    #[error("failed to read ROM: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
