//! Instruction formats, opcode tables, and the bit-exact encode/decode
//! pair that the assembler and simulator both depend on (§4.2, §9).
//!
//! A tagged sum type (`Decoded`) replaces the chained `if`/`match` on
//! raw opcode bits that a hand-rolled decoder tends to grow into: one
//! variant per RISC-V instruction format, populated once by [`decode`]
//! and matched exhaustively by the simulator's micro-sequences.

use std::fmt;

use thiserror::Error;

use crate::fields;

pub const OP_RTYPE: u32 = 0b0110011;
pub const OP_IMM: u32 = 0b0010011;
pub const OP_LOAD: u32 = 0b0000011;
pub const OP_STORE: u32 = 0b0100011;
pub const OP_BRANCH: u32 = 0b1100011;
pub const OP_JALR: u32 = 0b1100111;
pub const OP_JAL: u32 = 0b1101111;
pub const OP_LUI: u32 = 0b0110111;
pub const OP_AUIPC: u32 = 0b0010111;
pub const OP_SYSTEM: u32 = 0b1110011;

pub const ECALL_WORD: u32 = 0x0000_0073;
pub const EBREAK_WORD: u32 = 0x0010_0073;

#[derive(Debug, Error)]
pub enum IsaError {
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),
}

/// Every mnemonic this subset supports (§4.2's table, base integer
/// instructions plus the partial M-extension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Add,
    Sub,
    Xor,
    Or,
    And,
    Sll,
    Srl,
    Sra,
    Slt,
    Sltu,
    Mul,
    Mulh,
    Mulhsu,
    Mulhu,
    Div,
    Divu,
    Rem,
    Remu,
    Addi,
    Xori,
    Ori,
    Andi,
    Slti,
    Sltiu,
    Slli,
    Srli,
    Srai,
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    Jalr,
    Sb,
    Sh,
    Sw,
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Lui,
    Auipc,
    Jal,
    Ecall,
    Ebreak,
}

impl Mnemonic {
    /// All mnemonics recognised by the encoder's dispatch table.
    pub const ALL: &'static [Mnemonic] = &[
        Mnemonic::Add,
        Mnemonic::Sub,
        Mnemonic::Xor,
        Mnemonic::Or,
        Mnemonic::And,
        Mnemonic::Sll,
        Mnemonic::Srl,
        Mnemonic::Sra,
        Mnemonic::Slt,
        Mnemonic::Sltu,
        Mnemonic::Mul,
        Mnemonic::Mulh,
        Mnemonic::Mulhsu,
        Mnemonic::Mulhu,
        Mnemonic::Div,
        Mnemonic::Divu,
        Mnemonic::Rem,
        Mnemonic::Remu,
        Mnemonic::Addi,
        Mnemonic::Xori,
        Mnemonic::Ori,
        Mnemonic::Andi,
        Mnemonic::Slti,
        Mnemonic::Sltiu,
        Mnemonic::Slli,
        Mnemonic::Srli,
        Mnemonic::Srai,
        Mnemonic::Lb,
        Mnemonic::Lh,
        Mnemonic::Lw,
        Mnemonic::Lbu,
        Mnemonic::Lhu,
        Mnemonic::Jalr,
        Mnemonic::Sb,
        Mnemonic::Sh,
        Mnemonic::Sw,
        Mnemonic::Beq,
        Mnemonic::Bne,
        Mnemonic::Blt,
        Mnemonic::Bge,
        Mnemonic::Bltu,
        Mnemonic::Bgeu,
        Mnemonic::Lui,
        Mnemonic::Auipc,
        Mnemonic::Jal,
        Mnemonic::Ecall,
        Mnemonic::Ebreak,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mnemonic::Add => "add",
            Mnemonic::Sub => "sub",
            Mnemonic::Xor => "xor",
            Mnemonic::Or => "or",
            Mnemonic::And => "and",
            Mnemonic::Sll => "sll",
            Mnemonic::Srl => "srl",
            Mnemonic::Sra => "sra",
            Mnemonic::Slt => "slt",
            Mnemonic::Sltu => "sltu",
            Mnemonic::Mul => "mul",
            Mnemonic::Mulh => "mulh",
            Mnemonic::Mulhsu => "mulhsu",
            Mnemonic::Mulhu => "mulhu",
            Mnemonic::Div => "div",
            Mnemonic::Divu => "divu",
            Mnemonic::Rem => "rem",
            Mnemonic::Remu => "remu",
            Mnemonic::Addi => "addi",
            Mnemonic::Xori => "xori",
            Mnemonic::Ori => "ori",
            Mnemonic::Andi => "andi",
            Mnemonic::Slti => "slti",
            Mnemonic::Sltiu => "sltiu",
            Mnemonic::Slli => "slli",
            Mnemonic::Srli => "srli",
            Mnemonic::Srai => "srai",
            Mnemonic::Lb => "lb",
            Mnemonic::Lh => "lh",
            Mnemonic::Lw => "lw",
            Mnemonic::Lbu => "lbu",
            Mnemonic::Lhu => "lhu",
            Mnemonic::Jalr => "jalr",
            Mnemonic::Sb => "sb",
            Mnemonic::Sh => "sh",
            Mnemonic::Sw => "sw",
            Mnemonic::Beq => "beq",
            Mnemonic::Bne => "bne",
            Mnemonic::Blt => "blt",
            Mnemonic::Bge => "bge",
            Mnemonic::Bltu => "bltu",
            Mnemonic::Bgeu => "bgeu",
            Mnemonic::Lui => "lui",
            Mnemonic::Auipc => "auipc",
            Mnemonic::Jal => "jal",
            Mnemonic::Ecall => "ecall",
            Mnemonic::Ebreak => "ebreak",
        }
    }

    pub fn from_name(name: &str) -> Option<Mnemonic> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Mnemonic {
    type Err = IsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mnemonic::from_name(s).ok_or_else(|| IsaError::UnknownMnemonic(s.to_string()))
    }
}

/// (opcode, funct3, funct7) triple identifying an R-type operation.
fn rtype_fields(m: Mnemonic) -> Option<(u32, u8, u8)> {
    use Mnemonic::*;
    Some(match m {
        Add => (OP_RTYPE, 0b000, 0x00),
        Sub => (OP_RTYPE, 0b000, 0x20),
        Sll => (OP_RTYPE, 0b001, 0x00),
        Slt => (OP_RTYPE, 0b010, 0x00),
        Sltu => (OP_RTYPE, 0b011, 0x00),
        Xor => (OP_RTYPE, 0b100, 0x00),
        Srl => (OP_RTYPE, 0b101, 0x00),
        Sra => (OP_RTYPE, 0b101, 0x20),
        Or => (OP_RTYPE, 0b110, 0x00),
        And => (OP_RTYPE, 0b111, 0x00),
        Mul => (OP_RTYPE, 0b000, 0x01),
        Mulh => (OP_RTYPE, 0b001, 0x01),
        Mulhsu => (OP_RTYPE, 0b010, 0x01),
        Mulhu => (OP_RTYPE, 0b011, 0x01),
        Div => (OP_RTYPE, 0b100, 0x01),
        Divu => (OP_RTYPE, 0b101, 0x01),
        Rem => (OP_RTYPE, 0b110, 0x01),
        Remu => (OP_RTYPE, 0b111, 0x01),
        _ => return None,
    })
}

fn itype_arith_funct3(m: Mnemonic) -> Option<u8> {
    use Mnemonic::*;
    Some(match m {
        Addi => 0b000,
        Slti => 0b010,
        Sltiu => 0b011,
        Xori => 0b100,
        Ori => 0b110,
        Andi => 0b111,
        _ => return None,
    })
}

fn ishift_fields(m: Mnemonic) -> Option<(u8, u8)> {
    use Mnemonic::*;
    Some(match m {
        Slli => (0b001, 0x00),
        Srli => (0b101, 0x00),
        Srai => (0b101, 0x20),
        _ => return None,
    })
}

fn iload_funct3(m: Mnemonic) -> Option<u8> {
    use Mnemonic::*;
    Some(match m {
        Lb => 0b000,
        Lh => 0b001,
        Lw => 0b010,
        Lbu => 0b100,
        Lhu => 0b101,
        _ => return None,
    })
}

fn stype_funct3(m: Mnemonic) -> Option<u8> {
    use Mnemonic::*;
    Some(match m {
        Sb => 0b000,
        Sh => 0b001,
        Sw => 0b010,
        _ => return None,
    })
}

fn btype_funct3(m: Mnemonic) -> Option<u8> {
    use Mnemonic::*;
    Some(match m {
        Beq => 0b000,
        Bne => 0b001,
        Blt => 0b100,
        Bge => 0b101,
        Bltu => 0b110,
        Bgeu => 0b111,
        _ => return None,
    })
}

fn encode_r(opcode: u32, rd: u8, funct3: u8, rs1: u8, rs2: u8, funct7: u8) -> u32 {
    (u32::from(funct7) << 25)
        | (u32::from(rs2) << 20)
        | (u32::from(rs1) << 15)
        | (u32::from(funct3) << 12)
        | (u32::from(rd) << 7)
        | opcode
}

fn encode_i(opcode: u32, rd: u8, funct3: u8, rs1: u8, imm: i32) -> u32 {
    let imm12 = (imm as u32) & fields::mask(12);
    (imm12 << 20) | (u32::from(rs1) << 15) | (u32::from(funct3) << 12) | (u32::from(rd) << 7) | opcode
}

fn encode_s(opcode: u32, funct3: u8, rs1: u8, rs2: u8, imm: i32) -> u32 {
    let imm = imm as u32;
    let imm11_5 = (imm >> 5) & fields::mask(7);
    let imm4_0 = imm & fields::mask(5);
    (imm11_5 << 25)
        | (u32::from(rs2) << 20)
        | (u32::from(rs1) << 15)
        | (u32::from(funct3) << 12)
        | (imm4_0 << 7)
        | opcode
}

fn encode_b(opcode: u32, funct3: u8, rs1: u8, rs2: u8, imm: i32) -> u32 {
    let imm = imm as u32;
    let imm12 = (imm >> 12) & 1;
    let imm11 = (imm >> 11) & 1;
    let imm10_5 = (imm >> 5) & fields::mask(6);
    let imm4_1 = (imm >> 1) & fields::mask(4);
    (imm12 << 31)
        | (imm10_5 << 25)
        | (u32::from(rs2) << 20)
        | (u32::from(rs1) << 15)
        | (u32::from(funct3) << 12)
        | (imm4_1 << 8)
        | (imm11 << 7)
        | opcode
}

/// `imm` here is the same full 32-bit-with-zero-low-12 pattern that
/// [`fields::imm_utype`] produces on decode, not the bare upper-20-bit
/// assembly operand -- callers that have the latter must shift left by
/// 12 first. Keeping `encode`/`decode` agree on one representation
/// makes the pair an honest round trip.
fn encode_u(opcode: u32, rd: u8, imm: u32) -> u32 {
    (imm & 0xFFFF_F000) | (u32::from(rd) << 7) | opcode
}

fn encode_j(opcode: u32, rd: u8, imm: i32) -> u32 {
    let imm = imm as u32;
    let imm20 = (imm >> 20) & 1;
    let imm19_12 = (imm >> 12) & fields::mask(8);
    let imm11 = (imm >> 11) & 1;
    let imm10_1 = (imm >> 1) & fields::mask(10);
    (imm20 << 31) | (imm10_1 << 21) | (imm11 << 20) | (imm19_12 << 12) | (u32::from(rd) << 7) | opcode
}

/// Encode one instruction, given its mnemonic and already-resolved
/// operand fields. `imm` carries whatever immediate the format needs;
/// unused operand slots are ignored (e.g. `rs2` for I-type).
///
/// Returns `None` for `Jalr`/`Ecall`/`Ebreak`, which the assembler
/// encodes directly (`Jalr` is the only I-type mnemonic not covered by
/// [`itype_arith_funct3`]; `Ecall`/`Ebreak` are fixed words).
pub fn encode(m: Mnemonic, rd: u8, rs1: u8, rs2: u8, imm: i32) -> Option<u32> {
    if let Some((opcode, funct3, funct7)) = rtype_fields(m) {
        return Some(encode_r(opcode, rd, funct3, rs1, rs2, funct7));
    }
    if let Some(funct3) = itype_arith_funct3(m) {
        return Some(encode_i(OP_IMM, rd, funct3, rs1, imm));
    }
    if let Some((funct3, funct7)) = ishift_fields(m) {
        let shamt = (imm as u32) & fields::mask(5);
        let packed = (u32::from(funct7) << 5) | shamt;
        return Some(encode_i(OP_IMM, rd, funct3, rs1, packed as i32));
    }
    if let Some(funct3) = iload_funct3(m) {
        return Some(encode_i(OP_LOAD, rd, funct3, rs1, imm));
    }
    if let Some(funct3) = stype_funct3(m) {
        return Some(encode_s(OP_STORE, funct3, rs1, rs2, imm));
    }
    if let Some(funct3) = btype_funct3(m) {
        return Some(encode_b(OP_BRANCH, funct3, rs1, rs2, imm));
    }
    match m {
        Mnemonic::Jalr => Some(encode_i(OP_JALR, rd, 0b000, rs1, imm)),
        Mnemonic::Lui => Some(encode_u(OP_LUI, rd, imm as u32)),
        Mnemonic::Auipc => Some(encode_u(OP_AUIPC, rd, imm as u32)),
        Mnemonic::Jal => Some(encode_j(OP_JAL, rd, imm)),
        Mnemonic::Ecall => Some(ECALL_WORD),
        Mnemonic::Ebreak => Some(EBREAK_WORD),
        _ => None,
    }
}

/// A fully decoded instruction, tagged by RISC-V format (§9's
/// "tagged dispatch over opcode class").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    R {
        mnemonic: Mnemonic,
        rd: u8,
        rs1: u8,
        rs2: u8,
    },
    IArith {
        mnemonic: Mnemonic,
        rd: u8,
        rs1: u8,
        imm: i32,
    },
    IShift {
        mnemonic: Mnemonic,
        rd: u8,
        rs1: u8,
        shamt: u32,
    },
    ILoad {
        mnemonic: Mnemonic,
        rd: u8,
        rs1: u8,
        imm: i32,
    },
    Jalr {
        rd: u8,
        rs1: u8,
        imm: i32,
    },
    S {
        mnemonic: Mnemonic,
        rs1: u8,
        rs2: u8,
        imm: i32,
    },
    B {
        mnemonic: Mnemonic,
        rs1: u8,
        rs2: u8,
        imm: i32,
    },
    U {
        mnemonic: Mnemonic,
        rd: u8,
        imm: u32,
    },
    J {
        rd: u8,
        imm: i32,
    },
    Ecall,
    Ebreak,
    Unknown(u32),
}

fn decode_rtype(instr: u32) -> Decoded {
    let (rd, rs1, rs2) = (fields::rd(instr), fields::rs1(instr), fields::rs2(instr));
    let funct3 = fields::funct3(instr);
    let funct7 = fields::funct7(instr);
    let mnemonic = Mnemonic::ALL
        .iter()
        .copied()
        .find(|&m| rtype_fields(m) == Some((OP_RTYPE, funct3, funct7)));
    match mnemonic {
        Some(mnemonic) => Decoded::R {
            mnemonic,
            rd,
            rs1,
            rs2,
        },
        None => Decoded::Unknown(instr),
    }
}

fn decode_itype_imm(instr: u32) -> Decoded {
    let funct3 = fields::funct3(instr);
    let (rd, rs1) = (fields::rd(instr), fields::rs1(instr));
    if funct3 == 0b001 || funct3 == 0b101 {
        let funct7 = fields::funct7(instr);
        let mnemonic = Mnemonic::ALL
            .iter()
            .copied()
            .find(|&m| ishift_fields(m) == Some((funct3, funct7)));
        return match mnemonic {
            Some(mnemonic) => Decoded::IShift {
                mnemonic,
                rd,
                rs1,
                shamt: fields::extract_field(instr, 24, 20),
            },
            None => Decoded::Unknown(instr),
        };
    }
    let mnemonic = Mnemonic::ALL
        .iter()
        .copied()
        .find(|&m| itype_arith_funct3(m) == Some(funct3));
    match mnemonic {
        Some(mnemonic) => Decoded::IArith {
            mnemonic,
            rd,
            rs1,
            imm: fields::imm_itype(instr),
        },
        None => Decoded::Unknown(instr),
    }
}

fn decode_iload(instr: u32) -> Decoded {
    let funct3 = fields::funct3(instr);
    let mnemonic = Mnemonic::ALL
        .iter()
        .copied()
        .find(|&m| iload_funct3(m) == Some(funct3));
    match mnemonic {
        Some(mnemonic) => Decoded::ILoad {
            mnemonic,
            rd: fields::rd(instr),
            rs1: fields::rs1(instr),
            imm: fields::imm_itype(instr),
        },
        None => Decoded::Unknown(instr),
    }
}

fn decode_stype(instr: u32) -> Decoded {
    let funct3 = fields::funct3(instr);
    let mnemonic = Mnemonic::ALL
        .iter()
        .copied()
        .find(|&m| stype_funct3(m) == Some(funct3));
    match mnemonic {
        Some(mnemonic) => Decoded::S {
            mnemonic,
            rs1: fields::rs1(instr),
            rs2: fields::rs2(instr),
            imm: fields::imm_stype(instr),
        },
        None => Decoded::Unknown(instr),
    }
}

fn decode_btype(instr: u32) -> Decoded {
    let funct3 = fields::funct3(instr);
    let mnemonic = Mnemonic::ALL
        .iter()
        .copied()
        .find(|&m| btype_funct3(m) == Some(funct3));
    match mnemonic {
        Some(mnemonic) => Decoded::B {
            mnemonic,
            rs1: fields::rs1(instr),
            rs2: fields::rs2(instr),
            imm: fields::imm_btype(instr),
        },
        None => Decoded::Unknown(instr),
    }
}

/// Decode a 32-bit word into a tagged [`Decoded`] instruction.
pub fn decode(instr: u32) -> Decoded {
    if instr == EBREAK_WORD {
        return Decoded::Ebreak;
    }
    match fields::opcode(instr) {
        OP_RTYPE => decode_rtype(instr),
        OP_IMM => decode_itype_imm(instr),
        OP_LOAD => decode_iload(instr),
        OP_STORE => decode_stype(instr),
        OP_BRANCH => decode_btype(instr),
        OP_JALR => Decoded::Jalr {
            rd: fields::rd(instr),
            rs1: fields::rs1(instr),
            imm: fields::imm_itype(instr),
        },
        OP_LUI => Decoded::U {
            mnemonic: Mnemonic::Lui,
            rd: fields::rd(instr),
            imm: fields::imm_utype(instr),
        },
        OP_AUIPC => Decoded::U {
            mnemonic: Mnemonic::Auipc,
            rd: fields::rd(instr),
            imm: fields::imm_utype(instr),
        },
        OP_JAL => Decoded::J {
            rd: fields::rd(instr),
            imm: fields::imm_jtype(instr),
        },
        OP_SYSTEM => {
            if instr == ECALL_WORD {
                Decoded::Ecall
            } else {
                Decoded::Unknown(instr)
            }
        }
        _ => Decoded::Unknown(instr),
    }
}

/// Render a decoded word back to mnemonic-and-operand text, used by
/// the object-file writer's comment column and the simulator's trace
/// (SPEC_FULL §2b).
pub fn disassemble(instr: u32) -> String {
    use crate::registers::ABI_NAMES;
    let reg = |n: u8| ABI_NAMES[n as usize];
    match decode(instr) {
        Decoded::R {
            mnemonic,
            rd,
            rs1,
            rs2,
        } => format!("{mnemonic} x{rd}, x{rs1}, x{rs2} ({}, {}, {})", reg(rd), reg(rs1), reg(rs2)),
        Decoded::IArith {
            mnemonic,
            rd,
            rs1,
            imm,
        } => format!("{mnemonic} x{rd}, x{rs1}, {imm}"),
        Decoded::IShift {
            mnemonic,
            rd,
            rs1,
            shamt,
        } => format!("{mnemonic} x{rd}, x{rs1}, {shamt}"),
        Decoded::ILoad {
            mnemonic,
            rd,
            rs1,
            imm,
        } => format!("{mnemonic} x{rd}, {imm}(x{rs1})"),
        Decoded::Jalr { rd, rs1, imm } => format!("jalr x{rd}, {imm}(x{rs1})"),
        Decoded::S {
            mnemonic,
            rs1,
            rs2,
            imm,
        } => format!("{mnemonic} x{rs2}, {imm}(x{rs1})"),
        Decoded::B {
            mnemonic,
            rs1,
            rs2,
            imm,
        } => format!("{mnemonic} x{rs1}, x{rs2}, {imm:+}"),
        Decoded::U { mnemonic, rd, imm } => format!("{mnemonic} x{rd}, 0x{:x}", imm >> 12),
        Decoded::J { rd, imm } => format!("jal x{rd}, {imm:+}"),
        Decoded::Ecall => "ecall".to_string(),
        Decoded::Ebreak => "ebreak".to_string(),
        Decoded::Unknown(word) => format!("unknown 0x{word:08x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonic_name_round_trips() {
        for &m in Mnemonic::ALL {
            assert_eq!(Mnemonic::from_name(m.name()), Some(m));
        }
    }

    #[test]
    fn encode_decode_rtype_round_trips() {
        let word = encode(Mnemonic::Add, 1, 2, 3, 0).unwrap();
        assert_eq!(
            decode(word),
            Decoded::R {
                mnemonic: Mnemonic::Add,
                rd: 1,
                rs1: 2,
                rs2: 3
            }
        );

        let word = encode(Mnemonic::Sub, 4, 5, 6, 0).unwrap();
        assert_eq!(
            decode(word),
            Decoded::R {
                mnemonic: Mnemonic::Sub,
                rd: 4,
                rs1: 5,
                rs2: 6
            }
        );
    }

    #[test]
    fn encode_decode_itype_round_trips() {
        let word = encode(Mnemonic::Addi, 1, 0, 0, -5).unwrap();
        assert_eq!(
            decode(word),
            Decoded::IArith {
                mnemonic: Mnemonic::Addi,
                rd: 1,
                rs1: 0,
                imm: -5
            }
        );
    }

    #[test]
    fn encode_decode_shift_round_trips() {
        let word = encode(Mnemonic::Srai, 1, 2, 0, 7).unwrap();
        assert_eq!(
            decode(word),
            Decoded::IShift {
                mnemonic: Mnemonic::Srai,
                rd: 1,
                rs1: 2,
                shamt: 7
            }
        );
    }

    #[test]
    fn encode_decode_store_round_trips() {
        let word = encode(Mnemonic::Sw, 0, 1, 2, -8).unwrap();
        assert_eq!(
            decode(word),
            Decoded::S {
                mnemonic: Mnemonic::Sw,
                rs1: 1,
                rs2: 2,
                imm: -8
            }
        );
    }

    #[test]
    fn encode_decode_branch_round_trips() {
        let word = encode(Mnemonic::Bne, 0, 1, 2, -4).unwrap();
        assert_eq!(
            decode(word),
            Decoded::B {
                mnemonic: Mnemonic::Bne,
                rs1: 1,
                rs2: 2,
                imm: -4
            }
        );
    }

    #[test]
    fn encode_decode_lui_round_trips() {
        let word = encode(Mnemonic::Lui, 5, 0, 0, 0x12345000).unwrap();
        assert_eq!(
            decode(word),
            Decoded::U {
                mnemonic: Mnemonic::Lui,
                rd: 5,
                imm: 0x12345000
            }
        );
    }

    #[test]
    fn encode_decode_jal_round_trips() {
        let word = encode(Mnemonic::Jal, 1, 0, 0, 16).unwrap();
        assert_eq!(decode(word), Decoded::J { rd: 1, imm: 16 });
    }

    #[test]
    fn system_words_are_fixed() {
        assert_eq!(encode(Mnemonic::Ecall, 0, 0, 0, 0), Some(ECALL_WORD));
        assert_eq!(encode(Mnemonic::Ebreak, 0, 0, 0, 0), Some(EBREAK_WORD));
        assert_eq!(decode(ECALL_WORD), Decoded::Ecall);
        assert_eq!(decode(EBREAK_WORD), Decoded::Ebreak);
    }

    #[test]
    fn unknown_opcode_decodes_to_unknown() {
        assert_eq!(decode(0x0000_007F), Decoded::Unknown(0x0000_007F));
    }
}
