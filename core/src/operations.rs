//! Pure arithmetic used by the interpreter. Nothing in here touches machine state; each
//! function maps operand values to result values and leaves writing them back to the caller.

use crate::constants::FONT_GLYPH_SIZE;
use crate::instruction::AluOp;

/// The outcome of an arithmetic instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluResult {
    /// The new value of Vx
    pub value: u8,
    /// The new value of VF, if the operation produces a flag
    pub flag: Option<u8>,
}

impl AluResult {
    fn unflagged(value: u8) -> Self {
        AluResult { value, flag: None }
    }

    fn flagged(value: u8, flag: bool) -> Self {
        AluResult {
            value,
            flag: Some(flag as u8),
        }
    }
}

/// Computes an 0x8 family instruction from the current values of Vx and Vy
pub fn alu(op: AluOp, vx: u8, vy: u8) -> AluResult {
    match op {
        AluOp::Assign => AluResult::unflagged(vy),
        AluOp::Or => AluResult::unflagged(vx | vy),
        AluOp::And => AluResult::unflagged(vx & vy),
        AluOp::Xor => AluResult::unflagged(vx ^ vy),
        // VF = carry
        AluOp::Add => {
            let (sum, carry) = vx.overflowing_add(vy);
            AluResult::flagged(sum, carry)
        }
        // VF = !borrow
        AluOp::Sub => {
            let (difference, borrow) = vx.overflowing_sub(vy);
            AluResult::flagged(difference, !borrow)
        }
        AluOp::SubReversed => {
            let (difference, borrow) = vy.overflowing_sub(vx);
            AluResult::flagged(difference, !borrow)
        }
        // VF = the bit shifted out
        AluOp::ShiftRight => AluResult::flagged(vx >> 1, vx & 0x1 == 0x1),
        AluOp::ShiftLeft => AluResult::flagged(vx << 1, vx & 0x80 == 0x80),
    }
}

/// Vx + nn, dropping any overflow
pub fn add_immediate(vx: u8, nn: u8) -> u8 {
    vx.wrapping_add(nn)
}

/// Hundreds, tens and units of `value`
pub fn bcd(value: u8) -> [u8; 3] {
    [value / 100 % 10, value / 10 % 10, value % 10]
}

/// Address of the font glyph for `digit`
pub fn font_address(digit: u8) -> u16 {
    u16::from(digit) * FONT_GLYPH_SIZE
}
