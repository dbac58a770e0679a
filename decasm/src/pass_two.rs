use libdec::memory::MemoryImage;
use libdec::op::OpCode;
use libdec::{MAX_WORD, MEMORY_SIZE, PROGRAM_START};

use crate::errors::{ErrorKind, ErrorLog};
use crate::line::{decode, is_numeric, Directive, Kind, SourceLine, MAX_LABEL_LEN};
use crate::listing::Listing;
use crate::source::SourceText;
use crate::symbols::{Definition, SymbolTable};

/// Pass two: re-read the source from the top, validate every line
/// against the symbol table, and generate the memory image and the
/// translation listing. Errors accumulate; the pass always reaches END
/// or the end of input so a program's problems all surface at once.
pub fn pass_two(source: &mut SourceText, symbols: &SymbolTable) -> (MemoryImage, ErrorLog, Listing) {
    let mut pass = PassTwo {
        symbols,
        image: MemoryImage::new(),
        errors: ErrorLog::new(),
        listing: Listing::default(),
        loc: PROGRAM_START,
        halt_seen: false,
    };
    pass.run(source);
    (pass.image, pass.errors, pass.listing)
}

struct PassTwo<'a> {
    symbols: &'a SymbolTable,
    image: MemoryImage,
    errors: ErrorLog,
    listing: Listing,
    loc: usize,
    halt_seen: bool,
}

impl PassTwo<'_> {
    fn run(&mut self, source: &mut SourceText) {
        while let Some(raw) = source.next_line() {
            let raw = raw.to_owned();
            let line = decode(&raw);

            match line.kind {
                Kind::CommentOrBlank => self.listing.push(None, "", &raw),
                Kind::End => {
                    if line.operand.is_some() {
                        self.errors.record(ErrorKind::ExtraElements, self.loc);
                    }
                    self.listing.push(None, "", &raw);
                    self.drain_after_end(source);
                    return;
                }
                _ => self.translate(&line, &raw),
            }
        }

        self.errors.record(ErrorKind::MissingEnd, self.loc);
    }

    /// END must be the last statement; anything after it is listed but
    /// never translated.
    fn drain_after_end(&mut self, source: &mut SourceText) {
        let mut flagged = false;
        while let Some(raw) = source.next_line() {
            let raw = raw.to_owned();
            if decode(&raw).kind != Kind::CommentOrBlank && !flagged {
                self.errors.record(ErrorKind::EndNotLast, self.loc);
                flagged = true;
            }
            self.listing.push(None, "", &raw);
        }
    }

    fn translate(&mut self, line: &SourceLine, raw: &str) {
        if line.kind == Kind::Unknown {
            self.errors.record(ErrorKind::InvalidOpcode, self.loc);
        }

        if let Some(label) = line.label.as_deref() {
            if !self.symbols.lookup(label) {
                self.errors.record(ErrorKind::DuplicateLabel, self.loc);
            }
            if label.len() > MAX_LABEL_LEN {
                self.errors.record(ErrorKind::InvalidLabel, self.loc);
            }
        }
        if line.extra {
            self.errors.record(ErrorKind::ExtraElements, self.loc);
        }

        match line.kind {
            Kind::Machine(op) => self.machine(op, line, raw),
            Kind::Directive(directive) => self.directive(directive, line, raw),
            Kind::Unknown => self.emit(None, None, raw),
            Kind::CommentOrBlank | Kind::End => unreachable!("handled by the caller"),
        }
    }

    fn machine(&mut self, op: OpCode, line: &SourceLine, raw: &str) {
        if self.halt_seen {
            self.errors.record(ErrorKind::MachineCodeAfterHalt, self.loc);
        }

        let operand = if op.takes_operand() {
            self.resolve_operand(line.operand.as_deref())
        } else {
            if line.operand.is_some() {
                self.errors.record(ErrorKind::ExtraElements, self.loc);
            }
            self.halt_seen = true;
            Some(0)
        };

        self.emit(Some(op.code()), operand, raw);
    }

    /// Machine operands are label references. Checks run in order and
    /// stop at the first failure, leaving the operand half invalid.
    fn resolve_operand(&mut self, operand: Option<&str>) -> Option<i32> {
        let Some(operand) = operand else {
            self.errors.record(ErrorKind::MissingOperand, self.loc);
            return None;
        };
        if !operand.starts_with(|c: char| c.is_ascii_alphabetic()) {
            self.errors.record(ErrorKind::SyntaxError, self.loc);
            return None;
        }
        if operand.len() > MAX_LABEL_LEN {
            self.errors.record(ErrorKind::InvalidLabel, self.loc);
            return None;
        }

        match self.symbols.location_of(operand) {
            None => {
                self.errors.record(ErrorKind::UndefinedLabel, self.loc);
                None
            }
            Some(Definition::MultiplyDefined) => {
                self.errors.record(ErrorKind::InvalidOperand, self.loc);
                None
            }
            Some(Definition::At(target)) => Some(target as i32),
        }
    }

    fn directive(&mut self, directive: Directive, line: &SourceLine, raw: &str) {
        // Data definitions belong after the program's HALT.
        if !self.halt_seen && directive != Directive::ORG {
            self.errors.record(ErrorKind::AssemblyCodeBeforeHalt, self.loc);
        }

        let value = self.literal_operand(line.operand.as_deref());

        match directive {
            Directive::DC => match value {
                Some(value) => self.emit(Some(value / 10_000), Some(value % 10_000), raw),
                None => self.emit(None, None, raw),
            },
            Directive::ORG | Directive::DS => {
                self.listing.push(Some(self.loc), "", raw);
                let target = value.map(|value| match directive {
                    Directive::ORG => value as usize,
                    _ => self.loc + value as usize,
                });
                match target {
                    Some(target) if target < MEMORY_SIZE => self.loc = target,
                    Some(_) => {
                        self.errors.record(ErrorKind::MemoryOverflow, self.loc);
                        self.loc += 1;
                    }
                    // Malformed operand: same one-word advance pass one took.
                    None => self.loc += 1,
                }
            }
        }
    }

    /// Directive operands are unsigned literals no wider than a word.
    fn literal_operand(&mut self, operand: Option<&str>) -> Option<i32> {
        let Some(operand) = operand else {
            self.errors.record(ErrorKind::MissingOperand, self.loc);
            return None;
        };
        if !is_numeric(operand) {
            self.errors.record(ErrorKind::SyntaxError, self.loc);
            return None;
        }

        match operand.parse::<i64>() {
            Ok(value) if value <= MAX_WORD as i64 => Some(value as i32),
            _ => {
                self.errors.record(ErrorKind::OperandOverflow, self.loc);
                None
            }
        }
    }

    fn emit(&mut self, opcode: Option<i32>, operand: Option<i32>, raw: &str) {
        if self.image.insert(self.loc, opcode, operand) {
            self.listing.push(Some(self.loc), self.image.content(self.loc), raw);
        } else {
            self.errors.record(ErrorKind::MemoryOverflow, self.loc);
            self.listing.push(Some(self.loc), "", raw);
        }
        self.loc += 1;
    }
}
