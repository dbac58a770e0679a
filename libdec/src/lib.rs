pub use word::{MAX_WORD, MEMORY_SIZE, PROGRAM_START, WORD_MODULUS};

pub mod device;
pub mod memory;
pub mod op;
pub mod vm;
pub mod word;
