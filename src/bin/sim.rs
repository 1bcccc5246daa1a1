//! The simulator front-end: loads an object file and drives the
//! multi-cycle execution engine, printing a trace every cycle and
//! pacing or single-stepping through the interactive clock-mode
//! prompt (§6, §5, SPEC_FULL §2a).

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use clap_num::maybe_hex;
use rustyline::DefaultEditor;

use rv32mc::error::PipelineError;
use rv32mc::memory::PROGRAM_START;
use rv32mc::object;
use rv32mc::sim::cpu::{Halt, Simulator};
use rv32mc::trace::Tracer;

/// Run the multi-cycle RV32I(+M) datapath simulator over an
/// assembled object file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the assembled object file
    #[arg(default_value = "output.txt")]
    input: PathBuf,

    /// Skip the interactive clock-type prompt and run in automatic mode
    #[arg(short, long)]
    auto: bool,

    /// Target clock frequency in Hz when running in automatic mode (0 = max speed)
    #[arg(long, value_parser = maybe_hex::<u64>)]
    hz: Option<u64>,

    /// Print an 8-word memory window starting at this address after every cycle
    #[arg(short, long, value_parser = maybe_hex::<u32>)]
    memory: Option<u32>,
}

fn print_memory_window(sim: &Simulator, base: u32) {
    println!("  memory @0x{base:08x}:");
    for n in 0..8u32 {
        let addr = base + 4 * n;
        println!("    0x{addr:08x}: 0x{:08x}", sim.memory.read_word(addr));
    }
}

/// `A`/`M` clock-type prompt from §6; falls back to manual mode on
/// any input error (closed stdin, non-interactive pipe, ...).
fn choose_clock(args: &Args) -> (bool, u64) {
    if args.auto {
        return (true, args.hz.unwrap_or(0));
    }

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(_) => return (false, 0),
    };

    let Ok(choice) = editor.readline("Choose clk type: A/M ") else {
        return (false, 0);
    };
    if !choice.trim().eq_ignore_ascii_case("a") {
        return (false, 0);
    }

    let Ok(speed) = editor.readline("Choose the speed (Hz) (0 for max) ") else {
        return (true, 0);
    };
    (true, speed.trim().parse().unwrap_or(0))
}

fn run(args: Args) -> Result<bool, PipelineError> {
    let words = object::read_object_file(&args.input)?;

    let mut sim = Simulator::new();
    sim.load_words(&words, PROGRAM_START);

    let (auto, hz) = choose_clock(&args);
    let tracer = Tracer::auto();
    let mut manual_editor = if auto { None } else { DefaultEditor::new().ok() };

    loop {
        let halt = sim.execute_one_instruction(|s| {
            tracer.print_cycle(s);
            if let Some(base) = args.memory {
                print_memory_window(s, base);
            }
            if auto {
                if hz > 0 {
                    std::thread::sleep(Duration::from_nanos(1_000_000_000 / hz));
                }
            } else if let Some(editor) = manual_editor.as_mut() {
                let _ = editor.readline("press enter to advance one cycle ");
            }
        })?;

        match halt {
            Some(Halt::Clean) => {
                println!(
                    "clean halt (ebreak) after {} retired instruction(s), {} cycle(s) in the final instruction",
                    sim.retired, sim.clk
                );
                println!("{}", sim.registers);
                return Ok(true);
            }
            Some(Halt::Fatal(message)) => {
                eprintln!("fatal halt: {message}");
                return Ok(false);
            }
            None => continue,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("sim: {e}");
            ExitCode::FAILURE
        }
    }
}
