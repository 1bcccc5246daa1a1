//! The assembler front-end: runs Pass 1 + Pass 2 over an assembly
//! source file and writes the object file the `sim` binary loads
//! (§6, SPEC_FULL §2a).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rv32mc::error::PipelineError;
use rv32mc::{assembler, object};

/// Assemble a RISC-V RV32I(+M) subset source file into the object
/// format the simulator loads.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the assembly source file
    #[arg(default_value = "input.asm")]
    input: PathBuf,

    /// Path to write the assembled object file
    #[arg(default_value = "output.txt")]
    output: PathBuf,

    /// Annotate each emitted word with its disassembly as a trailing comment
    #[arg(short, long)]
    annotate: bool,
}

fn run(args: Args) -> Result<(), PipelineError> {
    let source = std::fs::read_to_string(&args.input)?;
    let program = assembler::assemble(&source)?;

    let max_word_index = program
        .words
        .iter()
        .map(|&(addr, _)| (addr / 4) as usize)
        .max()
        .map(|i| i + 1)
        .unwrap_or(0);
    if max_word_index > program.memory.capacity_words() {
        return Err(PipelineError::ProgramTooLarge {
            size: max_word_index,
            capacity: program.memory.capacity_words(),
        });
    }

    let words: Vec<u32> = program.words.iter().map(|&(_, word)| word).collect();
    object::write_object_file(&args.output, &words, args.annotate)?;

    println!(
        "assembled {} word(s) and {} symbol(s) into {}",
        words.len(),
        program.symbols.len(),
        args.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("asm: {e}");
            ExitCode::FAILURE
        }
    }
}
