//! The `Simulator`: the seven pipeline latches, the register file and
//! memory they operate on, and the per-format micro-sequences that
//! drive them one cycle at a time (§4.4, §9 "global mutable state is
//! not global" -- everything lives on this one owned value).

use thiserror::Error;

use super::micro;
use crate::isa::{self, Decoded};
use crate::memory::{Memory, MemoryError, PROGRAM_START};
use crate::registers::{RegisterError, Registers};

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Register(#[from] RegisterError),
}

/// Why [`Simulator::execute_one_instruction`] stopped running
/// instructions: clean on `ebreak`, fatal on anything else (§4.4,
/// §7's `ExecutionHalt`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    Clean,
    Fatal(String),
}

/// Owns the architectural state: memory, the 32-entry register file,
/// the seven named pipeline latches (modelled here as plain `u32`
/// fields -- each one really is just "a 32-bit value with read,
/// write, reset", so a field assignment already *is* the latch
/// operation §3 describes), the clock counter, and a retired-
/// instruction counter used only for diagnostics (SPEC_FULL §3).
#[derive(Debug, Clone)]
pub struct Simulator {
    pub memory: Memory,
    pub registers: Registers,
    pub pc: u32,
    pub mar: u32,
    pub mdr: u32,
    pub ir: u32,
    pub a: u32,
    pub b: u32,
    pub alu_out: u32,
    pub clk: u32,
    pub retired: u64,
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            memory: Memory::new(),
            registers: Registers::new(),
            pc: PROGRAM_START,
            mar: 0,
            mdr: 0,
            ir: 0,
            a: 0,
            b: 0,
            alu_out: 0,
            clk: 0,
            retired: 0,
        }
    }

    /// Build a simulator over an already-assembled memory image (used
    /// by tests and by anything driving assembler and simulator back
    /// to back in one process).
    pub fn from_memory(memory: Memory) -> Self {
        Self {
            memory,
            ..Self::new()
        }
    }

    /// Write `words` into memory starting at `base`, consecutive
    /// 4-byte slots, as the simulator binary does after loading an
    /// object file (§6).
    pub fn load_words(&mut self, words: &[u32], base: u32) {
        for (i, &word) in words.iter().enumerate() {
            self.memory.write_word(base + 4 * i as u32, word);
        }
    }

    /// Run every cycle of the next instruction, invoking `on_cycle`
    /// after each one so a caller can trace/pace execution (§5: the
    /// clock-speed option is display-only and must never affect this
    /// method's return value). Returns `Some(Halt)` once the
    /// instruction just executed should stop the pipeline.
    pub fn execute_one_instruction(&mut self, mut on_cycle: impl FnMut(&Simulator)) -> Result<Option<Halt>, SimError> {
        self.clk = 0;

        // Common fetch, cycles 1-3.
        self.clk += 1;
        self.mar = self.pc;
        on_cycle(self);

        self.clk += 1;
        self.mdr = self.memory.read_word(self.mar);
        self.pc = self.pc.wrapping_add(4);
        on_cycle(self);

        self.clk += 1;
        self.ir = self.mdr;
        on_cycle(self);

        if self.ir == isa::EBREAK_WORD {
            self.retired += 1;
            return Ok(Some(Halt::Clean));
        }

        // `fetch_pc` is PC after the fetch increment (points past this
        // instruction); `this_instr_addr` is the instruction's own
        // address, needed by jal/auipc/branch so their targets land on
        // the architectural `addr(this) + imm`, not `addr(this) + 4 +
        // imm` (§9's resolved `jal`/`auipc` open question).
        let fetch_pc = self.pc;
        let this_instr_addr = fetch_pc.wrapping_sub(4);

        let halt = match isa::decode(self.ir) {
            Decoded::R { mnemonic, rd, rs1, rs2 } => {
                self.clk += 1;
                self.a = self.registers.read(rs1)?;
                self.b = self.registers.read(rs2)?;
                on_cycle(self);

                self.clk += 1;
                self.alu_out = micro::alu_binary(micro::alu_op_for(mnemonic), self.a, self.b);
                on_cycle(self);

                self.clk += 1;
                self.registers.write(rd, self.alu_out)?;
                on_cycle(self);
                None
            }
            Decoded::IArith { mnemonic, rd, rs1, imm } => {
                self.clk += 1;
                self.a = self.registers.read(rs1)?;
                self.b = imm as u32;
                on_cycle(self);

                self.clk += 1;
                self.alu_out = micro::alu_binary(micro::alu_op_for(mnemonic), self.a, self.b);
                on_cycle(self);

                self.clk += 1;
                self.registers.write(rd, self.alu_out)?;
                on_cycle(self);
                None
            }
            Decoded::IShift { mnemonic, rd, rs1, shamt } => {
                self.clk += 1;
                self.a = self.registers.read(rs1)?;
                self.b = shamt;
                on_cycle(self);

                self.clk += 1;
                self.alu_out = micro::alu_binary(micro::alu_op_for(mnemonic), self.a, self.b);
                on_cycle(self);

                self.clk += 1;
                self.registers.write(rd, self.alu_out)?;
                on_cycle(self);
                None
            }
            Decoded::ILoad { mnemonic, rd, rs1, imm } => {
                self.clk += 1;
                self.a = self.registers.read(rs1)?;
                self.b = imm as u32;
                on_cycle(self);

                self.clk += 1;
                self.alu_out = self.a.wrapping_add(self.b);
                on_cycle(self);

                self.clk += 1;
                self.mar = self.alu_out;
                on_cycle(self);

                self.clk += 1;
                self.mdr = micro::load_extend(mnemonic, &self.memory, self.mar);
                on_cycle(self);

                self.clk += 1;
                self.registers.write(rd, self.mdr)?;
                on_cycle(self);
                None
            }
            Decoded::Jalr { rd, rs1, imm } => {
                self.clk += 1;
                self.a = self.registers.read(rs1)?;
                self.b = imm as u32;
                on_cycle(self);

                self.clk += 1;
                self.alu_out = self.a.wrapping_add(self.b);
                on_cycle(self);

                self.clk += 1;
                self.registers.write(rd, fetch_pc)?;
                self.pc = self.alu_out & !1u32;
                on_cycle(self);
                None
            }
            Decoded::S { mnemonic, rs1, rs2, imm } => {
                self.clk += 1;
                self.a = self.registers.read(rs1)?;
                self.b = imm as u32;
                on_cycle(self);

                self.clk += 1;
                self.alu_out = self.a.wrapping_add(self.b);
                on_cycle(self);

                self.clk += 1;
                self.mar = self.alu_out;
                on_cycle(self);

                self.clk += 1;
                self.mdr = self.registers.read(rs2)?;
                on_cycle(self);

                self.clk += 1;
                micro::store_write(mnemonic, &mut self.memory, self.mar, self.mdr)?;
                on_cycle(self);
                None
            }
            Decoded::B { mnemonic, rs1, rs2, imm } => {
                self.clk += 1;
                self.a = self.registers.read(rs1)?;
                self.b = self.registers.read(rs2)?;
                on_cycle(self);

                self.clk += 1;
                if micro::branch_taken(mnemonic, self.a, self.b) {
                    self.pc = this_instr_addr.wrapping_add(imm as u32);
                }
                on_cycle(self);
                None
            }
            Decoded::U { mnemonic: isa::Mnemonic::Lui, rd, imm } => {
                self.clk += 1;
                self.b = imm;
                on_cycle(self);

                self.clk += 1;
                self.alu_out = self.b;
                on_cycle(self);

                self.clk += 1;
                self.registers.write(rd, self.alu_out)?;
                on_cycle(self);
                None
            }
            Decoded::U { mnemonic: isa::Mnemonic::Auipc, rd, imm } => {
                self.clk += 1;
                self.a = this_instr_addr;
                self.b = imm;
                on_cycle(self);

                self.clk += 1;
                self.alu_out = self.a.wrapping_add(self.b);
                on_cycle(self);

                self.clk += 1;
                self.registers.write(rd, self.alu_out)?;
                on_cycle(self);
                None
            }
            Decoded::U { .. } => Some(Halt::Fatal(format!(
                "unrecognised U-type word 0x{:08x}",
                self.ir
            ))),
            Decoded::J { rd, imm } => {
                self.clk += 1;
                self.a = fetch_pc;
                on_cycle(self);

                self.clk += 1;
                self.pc = this_instr_addr.wrapping_add(imm as u32);
                on_cycle(self);

                self.clk += 1;
                self.registers.write(rd, self.a)?;
                on_cycle(self);
                None
            }
            Decoded::Ecall => Some(Halt::Fatal("ecall is encoded but not executed".to_string())),
            Decoded::Ebreak => unreachable!("ebreak is handled by the early exit above"),
            Decoded::Unknown(word) => Some(Halt::Fatal(format!("unrecognised opcode in word 0x{word:08x}"))),
        };

        self.retired += 1;
        Ok(halt)
    }

    /// Run to completion, discarding per-cycle trace data. Convenience
    /// for tests and for any caller that only cares about the final
    /// architectural state.
    pub fn run_to_halt(&mut self) -> Result<Halt, SimError> {
        loop {
            if let Some(halt) = self.execute_one_instruction(|_| {})? {
                return Ok(halt);
            }
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;

    fn run(source: &str) -> Simulator {
        let program = assemble(source).unwrap();
        let mut sim = Simulator::from_memory(program.memory);
        sim.pc = PROGRAM_START;
        let halt = sim.run_to_halt().unwrap();
        assert_eq!(halt, Halt::Clean);
        sim
    }

    #[test]
    fn addi_chain_scenario() {
        let sim = run("addi x1, x0, 5\naddi x2, x1, 7\nebreak\n");
        assert_eq!(sim.registers.read(1).unwrap(), 5);
        assert_eq!(sim.registers.read(2).unwrap(), 12);
    }

    #[test]
    fn li_expands_and_reconstructs_the_immediate() {
        let sim = run("li x3, 0x12345678\nebreak\n");
        assert_eq!(sim.registers.read(3).unwrap(), 0x1234_5678);
    }

    #[test]
    fn branch_loop_counts_down_to_zero() {
        let sim = run(".org 0x1000\nli x1,4\nloop: addi x1,x1,-1\nbne x1,x0,loop\nebreak\n");
        assert_eq!(sim.registers.read(1).unwrap(), 0);
    }

    #[test]
    fn word_directive_then_load_round_trips() {
        let sim = run(
            ".org 0x2000\n.word 0xDEADBEEF\n.org 0x1000\nlui x5, 0x2\naddi x5,x5,0\nlw x6,0(x5)\nebreak\n",
        );
        assert_eq!(sim.registers.read(6).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn byte_directives_then_load_are_little_endian() {
        let sim = run(
            ".org 0x1100\n.byte 0x41\n.byte 0x42\n.byte 0x43\n.byte 0x44\n.org 0x1000\nlui x5,0x1\nlw x7,0x100(x5)\nebreak\n",
        );
        assert_eq!(sim.registers.read(7).unwrap(), 0x4443_4241);
    }

    #[test]
    fn jal_return_address_points_at_the_following_ebreak() {
        let sim = run("jal x1, target\nebreak\ntarget: addi x2,x0,9\nebreak\n");
        assert_eq!(sim.registers.read(2).unwrap(), 9);
        assert_eq!(sim.registers.read(1).unwrap(), PROGRAM_START + 4);
    }

    #[test]
    fn unknown_opcode_is_a_fatal_halt() {
        let mut memory = Memory::new();
        memory.write_word(PROGRAM_START, 0x0000_007F);
        let mut sim = Simulator::from_memory(memory);
        let halt = sim.run_to_halt().unwrap();
        assert!(matches!(halt, Halt::Fatal(_)));
    }

    #[test]
    fn writing_to_x0_is_a_no_op_through_the_pipeline() {
        let sim = run("addi x0, x0, 5\nebreak\n");
        assert_eq!(sim.registers.read(0).unwrap(), 0);
    }

    #[test]
    fn pc_is_word_aligned_after_each_instruction() {
        let sim = run("addi x1, x0, 1\naddi x2, x0, 2\nebreak\n");
        assert_eq!(sim.pc % 4, 0);
    }
}
