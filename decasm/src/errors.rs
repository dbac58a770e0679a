use std::fmt;

use thiserror::Error;

/// Everything pass two can object to. Pass one reports nothing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("Invalid opcode")]
    InvalidOpcode,
    #[error("Undefined label operand")]
    UndefinedLabel,
    #[error("Duplicate label")]
    DuplicateLabel,
    #[error("Invalid label")]
    InvalidLabel,
    #[error("Syntax error")]
    SyntaxError,
    #[error("Extra elements on line")]
    ExtraElements,
    #[error("Missing operand")]
    MissingOperand,
    #[error("Missing END statement")]
    MissingEnd,
    #[error("END statement not last")]
    EndNotLast,
    #[error("Operand overflow")]
    OperandOverflow,
    #[error("Invalid operand")]
    InvalidOperand,
    #[error("Memory overflow")]
    MemoryOverflow,
    #[error("Machine code after HALT")]
    MachineCodeAfterHalt,
    #[error("Assembly code before HALT")]
    AssemblyCodeBeforeHalt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorEvent {
    pub kind: ErrorKind,
    pub loc: usize,
}

/// Ordered, append-only record of translation errors. A non-empty log
/// keeps the generated program from ever reaching the machine.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    events: Vec<ErrorEvent>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn record(&mut self, kind: ErrorKind, loc: usize) {
        self.events.push(ErrorEvent { kind, loc });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[ErrorEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorEvent> {
        self.events.iter()
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "Location {}: {}", event.loc, event.kind)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut log = ErrorLog::new();
        assert!(log.is_empty());

        log.record(ErrorKind::InvalidOpcode, 100);
        log.record(ErrorKind::ExtraElements, 104);

        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].kind, ErrorKind::InvalidOpcode);
        assert_eq!(log.events()[1].loc, 104);
    }

    #[test]
    fn display_lists_messages() {
        let mut log = ErrorLog::new();
        log.record(ErrorKind::MissingEnd, 103);

        assert_eq!(log.to_string(), "Location 103: Missing END statement\n");
    }
}
