use crate::error::{Error, Result};

/// # Call stack
/// Return addresses pushed by `CALL` and popped by `RET`.
///
/// Original hardware held 12 to 16 levels; depth is left unbounded here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallStack {
    frames: Vec<u16>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, address: u16) {
        self.frames.push(address);
    }

    pub fn pop(&mut self) -> Result<u16> {
        self.frames.pop().ok_or(Error::StackUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
