use std::env;
use std::process;

use anyhow::Result;
use decasm::assemble_file;
use libdec::vm::{StopReason, Vm};

fn main() -> Result<()> {
    let filename: String = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::Error::msg("Usage: decsim <source-file>"))?;

    let assembly = assemble_file(&filename)?;

    println!("{}", assembly.symbols);
    println!("{}", assembly.listing);

    let image = match assembly.into_image() {
        Ok(image) => image,
        Err(errors) => {
            eprint!("{}", errors);
            process::exit(1);
        }
    };

    println!("Results from running the program:");
    let mut vm = Vm::new(image);
    match vm.run_until(u64::MAX)? {
        StopReason::Halted => {
            println!("Program terminated normally.");
            Ok(())
        }
        StopReason::CycleLimit => Err(anyhow::Error::msg("cycle limit reached")),
    }
}
