//! The instruction encoder, Pass 2 (§4.2 of the spec).
//!
//! Dispatches on [`Mnemonic`](crate::isa::Mnemonic), pulls the right
//! number of operands out of the instruction record's token list, and
//! hands the resolved fields to [`crate::isa::encode`]. The one
//! surface-form normalisation left after Pass 1's `li` expansion is
//! the `imm(reg)` memory operand, split here into the two tokens the
//! encoder actually wants.

use thiserror::Error;

use super::lexer::InstructionRecord;
use super::symtab::SymbolTable;
use super::{parse_integer, IntegerParseError};
use crate::isa::{self, Mnemonic};

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),

    #[error("'{mnemonic}' expects {expected} operand(s), found {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid register operand '{0}' (only x0..x31 are accepted)")]
    BadRegister(String),

    #[error("invalid immediate '{0}'")]
    BadImmediate(String),

    #[error("invalid memory operand '{0}' (expected 'imm(reg)')")]
    BadMemoryOperand(String),

    #[error("internal encode failure for '{0}'")]
    EncodeFailed(String),
}

impl From<IntegerParseError> for EncodeError {
    fn from(e: IntegerParseError) -> Self {
        EncodeError::BadImmediate(e.0)
    }
}

fn expect_operands(tokens: &[String], expected: usize, mnemonic: Mnemonic) -> Result<(), EncodeError> {
    let found = tokens.len() - 1;
    if found != expected {
        return Err(EncodeError::OperandCount {
            mnemonic: mnemonic.name().to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

/// Only `x0..x31` are accepted (§9): ABI names are display-only.
fn parse_register(token: &str) -> Result<u8, EncodeError> {
    let digits = token
        .strip_prefix('x')
        .ok_or_else(|| EncodeError::BadRegister(token.to_string()))?;
    let n: u32 = digits.parse().map_err(|_| EncodeError::BadRegister(token.to_string()))?;
    if n > 31 {
        return Err(EncodeError::BadRegister(token.to_string()));
    }
    Ok(n as u8)
}

fn parse_imm(token: &str) -> Result<i64, EncodeError> {
    Ok(parse_integer(token)?)
}

/// Split `imm(reg)` into its two parts; `imm` may be omitted (`(x5)`).
fn split_memory_operand(token: &str) -> Result<(i64, u8), EncodeError> {
    let open = token
        .find('(')
        .ok_or_else(|| EncodeError::BadMemoryOperand(token.to_string()))?;
    let close = token
        .rfind(')')
        .filter(|&c| c > open)
        .ok_or_else(|| EncodeError::BadMemoryOperand(token.to_string()))?;
    let imm_part = token[..open].trim();
    let reg_part = &token[open + 1..close];
    let imm = if imm_part.is_empty() { 0 } else { parse_imm(imm_part)? };
    let reg = parse_register(reg_part)?;
    Ok((imm, reg))
}

/// Resolve a branch/jump target operand to a PC-relative displacement.
/// Unknown labels encode as a displacement from address 0 and print a
/// diagnostic warning rather than aborting assembly (§7, §9).
fn resolve_branch_target(token: &str, symbols: &SymbolTable, here: u32) -> i32 {
    if let Some(target) = symbols.resolve(token) {
        return (target as i64 - here as i64) as i32;
    }
    if let Ok(n) = parse_integer(token) {
        return n as i32;
    }
    eprintln!("warning: unresolved label '{token}', encoding displacement from address 0");
    (0i64 - here as i64) as i32
}

/// Encode one instruction record into its 32-bit word.
pub fn encode_instruction(record: &InstructionRecord, symbols: &SymbolTable) -> Result<u32, EncodeError> {
    let tokens = &record.tokens;
    let mnemonic_str = tokens
        .first()
        .ok_or_else(|| EncodeError::UnknownMnemonic(String::new()))?;
    let mnemonic =
        Mnemonic::from_name(mnemonic_str).ok_or_else(|| EncodeError::UnknownMnemonic(mnemonic_str.clone()))?;

    use Mnemonic::*;
    let word = match mnemonic {
        Add | Sub | Xor | Or | And | Sll | Srl | Sra | Slt | Sltu | Mul | Mulh | Mulhsu | Mulhu | Div | Divu
        | Rem | Remu => {
            expect_operands(tokens, 3, mnemonic)?;
            let rd = parse_register(&tokens[1])?;
            let rs1 = parse_register(&tokens[2])?;
            let rs2 = parse_register(&tokens[3])?;
            isa::encode(mnemonic, rd, rs1, rs2, 0)
        }
        Addi | Xori | Ori | Andi | Slti | Sltiu => {
            expect_operands(tokens, 3, mnemonic)?;
            let rd = parse_register(&tokens[1])?;
            let rs1 = parse_register(&tokens[2])?;
            let imm = parse_imm(&tokens[3])?;
            isa::encode(mnemonic, rd, rs1, 0, imm as i32)
        }
        Slli | Srli | Srai => {
            expect_operands(tokens, 3, mnemonic)?;
            let rd = parse_register(&tokens[1])?;
            let rs1 = parse_register(&tokens[2])?;
            let shamt = parse_imm(&tokens[3])?;
            isa::encode(mnemonic, rd, rs1, 0, shamt as i32)
        }
        Lb | Lh | Lw | Lbu | Lhu => {
            expect_operands(tokens, 2, mnemonic)?;
            let rd = parse_register(&tokens[1])?;
            let (imm, rs1) = split_memory_operand(&tokens[2])?;
            isa::encode(mnemonic, rd, rs1, 0, imm as i32)
        }
        Jalr => {
            expect_operands(tokens, 2, mnemonic)?;
            let rd = parse_register(&tokens[1])?;
            let (imm, rs1) = split_memory_operand(&tokens[2])?;
            isa::encode(mnemonic, rd, rs1, 0, imm as i32)
        }
        Sb | Sh | Sw => {
            expect_operands(tokens, 2, mnemonic)?;
            let rs2 = parse_register(&tokens[1])?;
            let (imm, rs1) = split_memory_operand(&tokens[2])?;
            isa::encode(mnemonic, 0, rs1, rs2, imm as i32)
        }
        Beq | Bne | Blt | Bge | Bltu | Bgeu => {
            expect_operands(tokens, 3, mnemonic)?;
            let rs1 = parse_register(&tokens[1])?;
            let rs2 = parse_register(&tokens[2])?;
            let imm = resolve_branch_target(&tokens[3], symbols, record.address);
            isa::encode(mnemonic, 0, rs1, rs2, imm)
        }
        Lui | Auipc => {
            expect_operands(tokens, 2, mnemonic)?;
            let rd = parse_register(&tokens[1])?;
            let value = parse_imm(&tokens[2])?;
            let imm = ((value as i64 as u32) & 0xFFFFF) << 12;
            isa::encode(mnemonic, rd, 0, 0, imm as i32)
        }
        Jal => {
            expect_operands(tokens, 2, mnemonic)?;
            let rd = parse_register(&tokens[1])?;
            let imm = resolve_branch_target(&tokens[2], symbols, record.address);
            isa::encode(mnemonic, rd, 0, 0, imm)
        }
        Ecall | Ebreak => {
            expect_operands(tokens, 0, mnemonic)?;
            isa::encode(mnemonic, 0, 0, 0, 0)
        }
    };

    word.ok_or_else(|| EncodeError::EncodeFailed(mnemonic_str.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: &str, address: u32) -> InstructionRecord {
        InstructionRecord {
            tokens: line.split_whitespace().map(str::to_string).collect(),
            address,
        }
    }

    #[test]
    fn encodes_rtype() {
        let word = encode_instruction(&record("add x1 x2 x3", 0), &SymbolTable::new()).unwrap();
        assert_eq!(word, 0x0031_00b3);
    }

    #[test]
    fn encodes_itype_arith() {
        let word = encode_instruction(&record("addi x1 x0 5", 0), &SymbolTable::new()).unwrap();
        assert_eq!(word, 0x0050_0093);
    }

    #[test]
    fn encodes_memory_operand_load() {
        let word = encode_instruction(&record("lw x6 0x100(x5)", 0), &SymbolTable::new()).unwrap();
        assert_eq!(isa::decode(word), isa::Decoded::ILoad {
            mnemonic: Mnemonic::Lw,
            rd: 6,
            rs1: 5,
            imm: 0x100,
        });
    }

    #[test]
    fn resolves_branch_label_to_relative_displacement() {
        let mut symbols = SymbolTable::new();
        symbols.define("loop", 0x1000).unwrap();
        let word = encode_instruction(&record("bne x1 x0 loop", 0x1004), &symbols).unwrap();
        assert_eq!(
            isa::decode(word),
            isa::Decoded::B {
                mnemonic: Mnemonic::Bne,
                rs1: 1,
                rs2: 0,
                imm: -4
            }
        );
    }

    #[test]
    fn unknown_mnemonic_is_an_error() {
        let err = encode_instruction(&record("frobnicate x1 x2", 0), &SymbolTable::new()).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownMnemonic(_)));
    }

    #[test]
    fn bad_register_name_is_rejected() {
        let err = encode_instruction(&record("addi x1 ra 5", 0), &SymbolTable::new()).unwrap_err();
        assert!(matches!(err, EncodeError::BadRegister(_)));
    }

    #[test]
    fn wrong_operand_count_is_rejected() {
        let err = encode_instruction(&record("add x1 x2", 0), &SymbolTable::new()).unwrap_err();
        assert!(matches!(err, EncodeError::OperandCount { .. }));
    }
}
