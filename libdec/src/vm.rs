use thiserror::Error;

use crate::device::{InputDevice, OutputDevice, StdinInput, StdoutOutput};
use crate::memory::MemoryImage;
use crate::op::{Op, OpCode};
use crate::word::{reduce, MEMORY_SIZE, PROGRAM_START};

/// Why execution stopped without an error.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StopReason {
    Halted,
    CycleLimit,
}

/// Abnormal termination. The machine never retries: a bad READ token or
/// a zero divisor ends the run on the spot.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExecError {
    #[error("input was not a signed integer (location {loc})")]
    InvalidInput { loc: usize },
    #[error("division by zero (location {loc})")]
    DividedByZero { loc: usize },
    #[error("reached the end of memory without a HALT")]
    EndOfMemory,
}

pub struct Vm {
    pub image: MemoryImage,
    pub accum: i32,
    pub loc: usize,
    input: Box<dyn InputDevice>,
    output: Box<dyn OutputDevice>,
}

impl Vm {
    /// Fresh machine over a finished translation, wired to the console.
    pub fn new(image: MemoryImage) -> Self {
        Self::with_devices(image, Box::new(StdinInput), Box::new(StdoutOutput))
    }

    pub fn with_devices(
        image: MemoryImage,
        input: Box<dyn InputDevice>,
        output: Box<dyn OutputDevice>,
    ) -> Self {
        Self {
            image,
            accum: 0,
            loc: PROGRAM_START,
            input,
            output,
        }
    }

    /// Execute one word. `Ok(true)` means the program reached HALT.
    pub fn step(&mut self) -> Result<bool, ExecError> {
        if self.loc >= MEMORY_SIZE {
            return Err(ExecError::EndOfMemory);
        }

        let Some(op) = Op::from_word(self.image.word(self.loc)) else {
            // Unrecognized opcode halves execute as a no-op.
            self.loc += 1;
            return Ok(false);
        };

        match op.opcode {
            OpCode::ADD => {
                self.accum = reduce(self.accum as i64 + self.image.word(op.operand) as i64);
                self.loc += 1;
            }
            OpCode::SUB => {
                self.accum = reduce(self.accum as i64 - self.image.word(op.operand) as i64);
                self.loc += 1;
            }
            OpCode::MULT => {
                self.accum = reduce(self.accum as i64 * self.image.word(op.operand) as i64);
                self.loc += 1;
            }
            OpCode::DIV => {
                let divisor = self.image.word(op.operand);
                if divisor == 0 {
                    return Err(ExecError::DividedByZero { loc: self.loc });
                }
                self.accum = reduce(self.accum as i64 / divisor as i64);
                self.loc += 1;
            }

            OpCode::LOAD => {
                self.accum = self.image.word(op.operand);
                self.loc += 1;
            }
            OpCode::STORE => {
                self.image.set_word(op.operand, self.accum);
                self.loc += 1;
            }

            OpCode::READ => {
                let value = self
                    .input
                    .read_token()
                    .and_then(|token| parse_input(&token))
                    .ok_or(ExecError::InvalidInput { loc: self.loc })?;
                self.image.set_word(op.operand, value);
                self.loc += 1;
            }
            OpCode::WRITE => {
                self.output.write_value(self.image.word(op.operand));
                self.loc += 1;
            }

            OpCode::B => {
                self.loc = op.operand;
            }
            OpCode::BM => {
                if self.accum < 0 {
                    self.loc = op.operand;
                } else {
                    self.loc += 1;
                }
            }
            OpCode::BZ => {
                if self.accum == 0 {
                    self.loc = op.operand;
                } else {
                    self.loc += 1;
                }
            }
            OpCode::BP => {
                if self.accum > 0 {
                    self.loc = op.operand;
                } else {
                    self.loc += 1;
                }
            }

            OpCode::HALT => return Ok(true),
        }

        Ok(false)
    }

    pub fn run_until(&mut self, max_cycles: u64) -> Result<StopReason, ExecError> {
        let mut cycles = 0;
        loop {
            if self.step()? {
                break Ok(StopReason::Halted);
            }
            cycles += 1;
            if cycles >= max_cycles {
                break Ok(StopReason::CycleLimit);
            }
        }
    }
}

/// A READ token is an optionally minus-signed run of digits; only the
/// first six digits are kept.
fn parse_input(token: &str) -> Option<i32> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let keep = if token.starts_with('-') { 7 } else { 6 };
    token[..token.len().min(keep)].parse().ok()
}
