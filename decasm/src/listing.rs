use std::fmt;

/// One source line as it appears in the translation: the location it
/// assembled at (when it assembled at all), the generated cell
/// rendering, and the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub loc: Option<usize>,
    pub contents: String,
    pub source: String,
}

#[derive(Debug, Clone, Default)]
pub struct Listing {
    entries: Vec<ListingEntry>,
}

impl Listing {
    pub(crate) fn push(&mut self, loc: Option<usize>, contents: &str, source: &str) {
        self.entries.push(ListingEntry {
            loc,
            contents: contents.to_owned(),
            source: source.to_owned(),
        });
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Translation of Program:")?;
        writeln!(f, "Location  Contents  Original Statement")?;
        for entry in &self.entries {
            let loc = match entry.loc {
                Some(loc) => loc.to_string(),
                None => String::new(),
            };
            writeln!(f, "{:<10}{:<10}{}", loc, entry.contents, entry.source)?;
        }
        Ok(())
    }
}
