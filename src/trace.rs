//! Per-cycle state dump (§6 "Trace output"), ANSI-colour aware via
//! `colored` the way the closest neighbouring assembler/VM in this
//! corpus colours its own diagnostics. Colour is cosmetic: an
//! implementation MAY omit it, and this one gates it on whether
//! stdout is actually a terminal.

use colored::Colorize;
use std::io::IsTerminal;

use crate::isa;
use crate::registers::NUM_REGISTERS;
use crate::sim::cpu::Simulator;

pub struct Tracer {
    color: bool,
}

impl Tracer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Enable colour only when stdout is a terminal.
    pub fn auto() -> Self {
        Self::new(std::io::stdout().is_terminal())
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn latch(&self, name: &str, value: u32) -> String {
        let rendered = format!("{name}=0x{value:08x}");
        if self.color {
            rendered.yellow().to_string()
        } else {
            rendered
        }
    }

    /// Print one cycle's worth of state: the clock counter, all 32
    /// registers in rows of 4, then the seven pipeline latches.
    pub fn print_cycle(&self, sim: &Simulator) {
        println!("{} {}", self.heading("clk"), sim.clk);
        if sim.ir != 0 {
            println!("  {} {}", self.heading("ir"), isa::disassemble(sim.ir));
        }
        for row_start in (0..NUM_REGISTERS).step_by(4) {
            let row: Vec<String> = (row_start..row_start + 4)
                .map(|i| format!("x{i:<2}=0x{:08x}", sim.registers.read(i as u8).unwrap_or(0)))
                .collect();
            println!("  {}", row.join("  "));
        }
        println!(
            "  {} {} {} {}",
            self.latch("pc", sim.pc),
            self.latch("mar", sim.mar),
            self.latch("mdr", sim.mdr),
            self.latch("ir", sim.ir),
        );
        println!(
            "  {} {} {}",
            self.latch("a", sim.a),
            self.latch("b", sim.b),
            self.latch("alu_out", sim.alu_out),
        );
        println!();
    }
}
