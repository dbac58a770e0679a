use num_derive::FromPrimitive;
use strum_macros::EnumString;

/// The 13 machine opcodes and their numeric encodings.
#[derive(FromPrimitive, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    ADD = 1,
    SUB = 2,
    MULT = 3,
    DIV = 4,
    LOAD = 5,
    STORE = 6,
    READ = 7,
    WRITE = 8,
    B = 9,
    BM = 10,
    BZ = 11,
    BP = 12,
    HALT = 13,
}

impl OpCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// HALT is the only machine instruction written without an operand.
    pub fn takes_operand(self) -> bool {
        !matches!(self, OpCode::HALT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Op {
    pub opcode: OpCode,
    pub operand: usize,
}

impl Op {
    /// Decode a raw memory word. Words outside the encodable range
    /// (negative after a STORE, or an opcode half outside 1-13) are
    /// not instructions.
    pub fn from_word(word: i32) -> Option<Self> {
        if word < 0 {
            return None;
        }
        num::FromPrimitive::from_i32(word / 10_000).map(|opcode| Self {
            opcode,
            operand: (word % 10_000) as usize,
        })
    }
}
