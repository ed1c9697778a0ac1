use std::fmt;

use crate::opcode::Opcode;

/// The register to register operations of the 0x8 family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Vx = Vy
    Assign,
    /// Vx |= Vy
    Or,
    /// Vx &= Vy
    And,
    /// Vx ^= Vy
    Xor,
    /// Vx += Vy; VF = carry
    Add,
    /// Vx -= Vy; VF = !borrow
    Sub,
    /// Vx >>= 1; VF = shifted out bit
    ShiftRight,
    /// Vx = Vy - Vx; VF = !borrow
    SubReversed,
    /// Vx <<= 1; VF = shifted out bit
    ShiftLeft,
}

/// A decoded Chip-8 instruction.
///
/// `x` and `y` are register indices, always in 0..16 since they are decoded from a nibble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xnn
    SkipIfEqual { x: usize, nn: u8 },
    /// 4xnn
    SkipIfNotEqual { x: usize, nn: u8 },
    /// 5xy0
    SkipIfRegistersEqual { x: usize, y: usize },
    /// 6xnn
    Load { x: usize, nn: u8 },
    /// 7xnn
    AddImmediate { x: usize, nn: u8 },
    /// 8xy0..8xyE
    Alu { op: AluOp, x: usize, y: usize },
    /// 9xy0
    SkipIfRegistersNotEqual { x: usize, y: usize },
    /// Annn
    LoadIndex(u16),
    /// Bnnn
    JumpOffset(u16),
    /// Cxnn
    Random { x: usize, nn: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E
    SkipIfPressed { x: usize },
    /// ExA1
    SkipIfNotPressed { x: usize },
    /// Fx07
    LoadDelay { x: usize },
    /// Fx0A
    WaitForKey { x: usize },
    /// Fx15
    SetDelay { x: usize },
    /// Fx18
    SetSound { x: usize },
    /// Fx1E
    AddIndex { x: usize },
    /// Fx29
    LoadFont { x: usize },
    /// Fx33
    StoreBcd { x: usize },
    /// Fx55
    StoreRegisters { x: usize },
    /// Fx65
    LoadRegisters { x: usize },
    /// Anything else; executed as a no-op
    Unknown(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn decode(op: u16) -> Instruction {
        use Instruction::*;

        let (x, y) = (op.x(), op.y());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump(op.nnn()),
            (0x2, ..) => Call(op.nnn()),
            (0x3, ..) => SkipIfEqual { x, nn: op.nn() },
            (0x4, ..) => SkipIfNotEqual { x, nn: op.nn() },
            (0x5, .., 0x0) => SkipIfRegistersEqual { x, y },
            (0x6, ..) => Load { x, nn: op.nn() },
            (0x7, ..) => AddImmediate { x, nn: op.nn() },
            (0x8, .., n) => match alu_op(n) {
                Some(alu) => Alu { op: alu, x, y },
                None => Unknown(op),
            },
            (0x9, .., 0x0) => SkipIfRegistersNotEqual { x, y },
            (0xA, ..) => LoadIndex(op.nnn()),
            (0xB, ..) => JumpOffset(op.nnn()),
            (0xC, ..) => Random { x, nn: op.nn() },
            (0xD, ..) => Draw { x, y, n: op.n() },
            (0xE, _, 0x9, 0xE) => SkipIfPressed { x },
            (0xE, _, 0xA, 0x1) => SkipIfNotPressed { x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitForKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadFont { x },
            (0xF, _, 0x3, 0x3) => StoreBcd { x },
            (0xF, _, 0x5, 0x5) => StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => LoadRegisters { x },
            _ => Unknown(op),
        }
    }
}

fn alu_op(n: u8) -> Option<AluOp> {
    match n {
        0x0 => Some(AluOp::Assign),
        0x1 => Some(AluOp::Or),
        0x2 => Some(AluOp::And),
        0x3 => Some(AluOp::Xor),
        0x4 => Some(AluOp::Add),
        0x5 => Some(AluOp::Sub),
        0x6 => Some(AluOp::ShiftRight),
        0x7 => Some(AluOp::SubReversed),
        0xE => Some(AluOp::ShiftLeft),
        _ => None,
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match self {
            AluOp::Assign => "LD",
            AluOp::Or => "OR",
            AluOp::And => "AND",
            AluOp::Xor => "XOR",
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::ShiftRight => "SHR",
            AluOp::SubReversed => "SUBN",
            AluOp::ShiftLeft => "SHL",
        };
        f.write_str(mnemonic)
    }
}

/// Conventional Chip-8 assembly mnemonics
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(nnn) => write!(f, "JP {:#05X}", nnn),
            Call(nnn) => write!(f, "CALL {:#05X}", nnn),
            SkipIfEqual { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            SkipIfNotEqual { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            SkipIfRegistersEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Load { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            AddImmediate { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Alu { op, x, y } => write!(f, "{} V{:X}, V{:X}", op, x, y),
            SkipIfRegistersNotEqual { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(nnn) => write!(f, "LD I, {:#05X}", nnn),
            JumpOffset(nnn) => write!(f, "JP V0, {:#05X}", nnn),
            Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfPressed { x } => write!(f, "SKP V{:X}", x),
            SkipIfNotPressed { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitForKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadFont { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "DW {:#06X}", op),
        }
    }
}
