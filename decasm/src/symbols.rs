use std::fmt;

use indexmap::IndexMap;

/// Location value shown for a symbol defined more than once.
pub const MULTIPLY_DEFINED: i32 = -999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition {
    At(usize),
    MultiplyDefined,
}

/// Label locations gathered by pass one. Once a name is marked
/// multiply defined it stays that way for the rest of the run.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Definition>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: IndexMap::new(),
        }
    }

    pub fn define(&mut self, name: &str, loc: usize) {
        match self.symbols.get_mut(name) {
            Some(definition) => *definition = Definition::MultiplyDefined,
            None => {
                self.symbols.insert(name.to_owned(), Definition::At(loc));
            }
        }
    }

    /// True only for a name defined exactly once.
    pub fn lookup(&self, name: &str) -> bool {
        matches!(self.symbols.get(name), Some(Definition::At(_)))
    }

    /// Callers must treat `MultiplyDefined` as "present but unusable",
    /// distinct from a miss.
    pub fn location_of(&self, name: &str) -> Option<Definition> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Definition)> {
        self.symbols.iter().map(|(name, def)| (name.as_str(), *def))
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol Table:")?;
        writeln!(f, "Symbol #    Symbol    Location")?;
        for (i, (name, definition)) in self.symbols.iter().enumerate() {
            let loc = match definition {
                Definition::At(loc) => *loc as i32,
                Definition::MultiplyDefined => MULTIPLY_DEFINED,
            };
            writeln!(f, " {:<11}{:<10}{:<10}", i, name, loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn define_and_lookup() {
        let mut symbols = SymbolTable::new();
        symbols.define("A", 100);

        assert!(symbols.lookup("A"));
        assert_eq!(symbols.location_of("A"), Some(Definition::At(100)));
        assert!(!symbols.lookup("B"));
        assert_eq!(symbols.location_of("B"), None);
    }

    #[test]
    fn redefinition_poisons_the_symbol() {
        let mut symbols = SymbolTable::new();
        symbols.define("X", 100);
        symbols.define("X", 250);

        assert!(!symbols.lookup("X"));
        assert_eq!(symbols.location_of("X"), Some(Definition::MultiplyDefined));

        // It never reverts, no matter how often it is redefined.
        symbols.define("X", 300);
        assert_eq!(symbols.location_of("X"), Some(Definition::MultiplyDefined));
    }

    #[test]
    fn display_renders_the_sentinel() {
        let mut symbols = SymbolTable::new();
        symbols.define("GOOD", 100);
        symbols.define("BAD", 101);
        symbols.define("BAD", 102);

        let table = symbols.to_string();
        assert!(table.contains("GOOD"));
        assert!(table.contains("100"));
        assert!(table.contains("-999"));
    }
}
