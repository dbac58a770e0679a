use std::str::FromStr;

use libdec::op::OpCode;
use strum::EnumString;

use crate::constants::line_regex;

/// Longest label that passes validation.
pub const MAX_LABEL_LEN: usize = 10;

/// The four assembly-time pseudo-instructions. END is classified on its
/// own because it terminates a pass rather than generating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Directive {
    DC,
    DS,
    ORG,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Directive(Directive),
    Machine(OpCode),
    CommentOrBlank,
    End,
    Unknown,
}

/// One decoded source line. A label is present only when the line's
/// first character (after comment stripping) is non-whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub label: Option<String>,
    pub opcode: String,
    pub operand: Option<String>,
    pub extra: bool,
    pub kind: Kind,
}

impl SourceLine {
    fn blank() -> Self {
        Self {
            label: None,
            opcode: String::new(),
            operand: None,
            extra: false,
            kind: Kind::CommentOrBlank,
        }
    }
}

/// Decode one raw source line. Pure and idempotent; classification
/// depends only on the opcode token.
pub fn decode(raw: &str) -> SourceLine {
    let stripped = raw.split(';').next().unwrap_or("");
    if stripped.trim().is_empty() {
        return SourceLine::blank();
    }

    let cap = line_regex()
        .captures(stripped)
        .expect("a non-blank line always tokenizes");

    let label = cap.name("label").map(|m| m.as_str().to_owned());
    let opcode = cap
        .name("opcode")
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_default();
    let operand = cap.name("operand").map(|m| m.as_str().to_owned());
    let extra = cap.name("extra").is_some();

    if opcode.is_empty() {
        // A lone label with no opcode reads as a blank line.
        return SourceLine::blank();
    }

    let kind = classify(&opcode);

    SourceLine {
        label,
        opcode,
        operand,
        extra,
        kind,
    }
}

fn classify(opcode: &str) -> Kind {
    if opcode == "END" {
        return Kind::End;
    }
    if let Ok(directive) = Directive::from_str(opcode) {
        return Kind::Directive(directive);
    }
    if let Ok(op) = OpCode::from_str(opcode) {
        return Kind::Machine(op);
    }
    Kind::Unknown
}

/// Directive operands must be unsigned decimal literals.
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn label_in_column_one() {
        let line = decode("A LOAD B");
        assert_eq!(line.label.as_deref(), Some("A"));
        assert_eq!(line.opcode, "LOAD");
        assert_eq!(line.operand.as_deref(), Some("B"));
        assert!(!line.extra);
        assert_eq!(line.kind, Kind::Machine(OpCode::LOAD));
    }

    #[test]
    fn no_label_when_indented() {
        let line = decode("  LOAD B");
        assert_eq!(line.label, None);
        assert_eq!(line.opcode, "LOAD");
        assert_eq!(line.operand.as_deref(), Some("B"));

        let line = decode("\tSTORE X");
        assert_eq!(line.label, None);
        assert_eq!(line.kind, Kind::Machine(OpCode::STORE));
    }

    #[test]
    fn opcode_is_case_folded() {
        assert_eq!(decode("  load b").kind, Kind::Machine(OpCode::LOAD));
        assert_eq!(decode("  dc 5").kind, Kind::Directive(Directive::DC));
        assert_eq!(decode("  End").kind, Kind::End);
        // Operands keep their spelling.
        assert_eq!(decode("  load b").operand.as_deref(), Some("b"));
    }

    #[test]
    fn classification() {
        assert_eq!(decode("  ORG 100").kind, Kind::Directive(Directive::ORG));
        assert_eq!(decode("  DS 10").kind, Kind::Directive(Directive::DS));
        assert_eq!(decode("  END").kind, Kind::End);
        assert_eq!(decode("  HALT").kind, Kind::Machine(OpCode::HALT));
        assert_eq!(decode("  BOGUS 1").kind, Kind::Unknown);
    }

    #[test]
    fn comments_and_blanks() {
        assert_eq!(decode("").kind, Kind::CommentOrBlank);
        assert_eq!(decode("   \t ").kind, Kind::CommentOrBlank);
        assert_eq!(decode("; a comment line").kind, Kind::CommentOrBlank);
        assert_eq!(decode("   ; indented comment").kind, Kind::CommentOrBlank);
    }

    #[test]
    fn comment_stripped_mid_line() {
        let line = decode("A LOAD B ; copy B");
        assert_eq!(line.label.as_deref(), Some("A"));
        assert_eq!(line.operand.as_deref(), Some("B"));
        assert!(!line.extra);
    }

    #[test]
    fn lone_label_reads_as_blank() {
        assert_eq!(decode("FOO").kind, Kind::CommentOrBlank);
        assert_eq!(decode("FOO ; nothing else").kind, Kind::CommentOrBlank);
    }

    #[test]
    fn trailing_token_detected() {
        assert!(decode("A LOAD B C").extra);
        assert!(decode("  LOAD B C D E").extra);
        assert!(!decode("A LOAD B").extra);
        assert!(!decode("  HALT").extra);
    }

    #[test]
    fn decoding_is_idempotent() {
        let raw = "LOOP ADD TOTAL ; accumulate";
        assert_eq!(decode(raw), decode(raw));
    }

    #[test]
    fn numeric_predicate() {
        assert!(is_numeric("0"));
        assert!(is_numeric("000123"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("-1"));
        assert!(!is_numeric("12a"));
        assert!(!is_numeric("1 2"));
    }
}
