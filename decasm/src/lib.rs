use std::path::Path;

use anyhow::Result;
use libdec::memory::MemoryImage;

pub use errors::{ErrorEvent, ErrorKind, ErrorLog};
pub use line::{decode, is_numeric, Directive, Kind, SourceLine, MAX_LABEL_LEN};
pub use listing::{Listing, ListingEntry};
pub use source::SourceText;
pub use symbols::{Definition, SymbolTable, MULTIPLY_DEFINED};

mod constants;
pub mod errors;
pub mod line;
pub mod listing;
pub mod pass_one;
pub mod pass_two;
pub mod source;
pub mod symbols;

/// Everything a run of the assembler produces. The memory image stays
/// inside until the caller asks for it through [`Assembly::into_image`],
/// which is where a dirty error log stops execution.
#[derive(Debug)]
pub struct Assembly {
    pub symbols: SymbolTable,
    pub errors: ErrorLog,
    pub listing: Listing,
    image: MemoryImage,
}

impl Assembly {
    /// Release the generated program for execution, or the errors that
    /// keep it from running.
    pub fn into_image(self) -> std::result::Result<MemoryImage, ErrorLog> {
        if self.errors.is_empty() {
            Ok(self.image)
        } else {
            Err(self.errors)
        }
    }

    /// The image as generated, errors or not, for inspection.
    pub fn image(&self) -> &MemoryImage {
        &self.image
    }
}

/// Assemble a program: pass one assigns label locations, pass two
/// re-reads the source and generates the translation.
pub fn assemble(source: &mut SourceText) -> Assembly {
    source.rewind();
    let symbols = pass_one::pass_one(source);

    source.rewind();
    let (image, errors, listing) = pass_two::pass_two(source, &symbols);

    Assembly {
        symbols,
        errors,
        listing,
        image,
    }
}

pub fn assemble_text(text: &str) -> Assembly {
    assemble(&mut SourceText::from_text(text))
}

/// # Errors
///
/// If the source file cannot be read.
pub fn assemble_file(path: impl AsRef<Path>) -> Result<Assembly> {
    let mut source = SourceText::from_file(path)?;
    Ok(assemble(&mut source))
}
