use libdec::{MEMORY_SIZE, PROGRAM_START};

use crate::line::{decode, is_numeric, Directive, Kind, SourceLine};
use crate::source::SourceText;
use crate::symbols::SymbolTable;

/// Pass one: walk the source once and record the location of every
/// label. Nothing is validated here; a malformed line contributes the
/// default one-word advance and is diagnosed again by pass two.
pub fn pass_one(source: &mut SourceText) -> SymbolTable {
    let mut symbols = SymbolTable::new();
    let mut loc = PROGRAM_START;

    while let Some(raw) = source.next_line() {
        let line = decode(raw);

        match line.kind {
            Kind::CommentOrBlank => continue,
            // Labels and operands on the END line are not processed.
            Kind::End => break,
            _ => {}
        }

        // The label gets the location this line assembles at, before
        // the line's own size is applied.
        if let Some(label) = line.label.as_deref() {
            symbols.define(label, loc);
        }

        loc = advance(&line, loc);
    }

    symbols
}

fn advance(line: &SourceLine, loc: usize) -> usize {
    let next = match line.kind {
        Kind::Directive(Directive::ORG) => literal(line.operand.as_deref()).unwrap_or(loc + 1),
        Kind::Directive(Directive::DS) => literal(line.operand.as_deref())
            .map(|n| loc + n)
            .unwrap_or(loc + 1),
        _ => loc + 1,
    };
    next % MEMORY_SIZE
}

fn literal(operand: Option<&str>) -> Option<usize> {
    let operand = operand?;
    if !is_numeric(operand) {
        return None;
    }
    operand.parse().ok()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::symbols::Definition;

    fn locations(text: &str) -> SymbolTable {
        pass_one(&mut SourceText::from_text(text))
    }

    #[test]
    fn labels_get_current_location() {
        let symbols = locations("A LOAD B\n  HALT\nB DC 5\n  END\n");

        assert_eq!(symbols.location_of("A"), Some(Definition::At(100)));
        assert_eq!(symbols.location_of("B"), Some(Definition::At(102)));
    }

    #[test]
    fn org_jumps_and_ds_reserves() {
        let symbols = locations("  HALT\n  ORG 500\nA DS 10\nB DC 1\n  END\n");

        assert_eq!(symbols.location_of("A"), Some(Definition::At(500)));
        assert_eq!(symbols.location_of("B"), Some(Definition::At(510)));
    }

    #[test]
    fn org_label_precedes_the_jump() {
        let symbols = locations("A ORG 500\nB DC 1\n  HALT\n  END\n");

        assert_eq!(symbols.location_of("A"), Some(Definition::At(100)));
        assert_eq!(symbols.location_of("B"), Some(Definition::At(500)));
    }

    #[test]
    fn malformed_directive_operand_advances_by_one() {
        let symbols = locations("  ORG X\nA DC 1\n  DS\nB DC 2\n  END\n");

        assert_eq!(symbols.location_of("A"), Some(Definition::At(101)));
        assert_eq!(symbols.location_of("B"), Some(Definition::At(103)));
    }

    #[test]
    fn location_arithmetic_wraps() {
        let symbols = locations("  ORG 9999\n  DS 3\nA DC 1\n  END\n");

        assert_eq!(symbols.location_of("A"), Some(Definition::At(2)));
    }

    #[test]
    fn stops_at_end() {
        let symbols = locations("A HALT\n  END\nB DC 1\n");

        assert_eq!(symbols.location_of("B"), None);
    }

    #[test]
    fn comments_do_not_advance() {
        let symbols = locations("; header\n  HALT\n\nA DC 1\n  END\n");

        assert_eq!(symbols.location_of("A"), Some(Definition::At(101)));
    }
}
