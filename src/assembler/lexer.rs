//! The lexical pre-pass, Pass 1 (§4.1 of the spec).
//!
//! Walks the source line by line, peeling off comments and labels,
//! executing the address-affecting directives, and expanding `li`
//! (the one pseudo-instruction this subset carries) before any
//! address is handed out, so later labels never desynchronise (§9).

use thiserror::Error;

use super::symtab::{SymbolError, SymbolTable};
use super::{parse_integer, IntegerParseError};
use crate::memory::{Memory, MemoryError, PROGRAM_START};

#[derive(Debug, Error)]
pub enum LexError {
    #[error("empty label on line '{0}'")]
    EmptyLabel(String),

    #[error("unknown directive '.{0}'")]
    UnknownDirective(String),

    #[error("directive '.{0}' requires an operand")]
    MissingOperand(String),

    #[error("'li' requires exactly two operands (rd, imm), found {0}")]
    BadLi(usize),

    #[error(transparent)]
    Symbol(#[from] SymbolError),

    #[error(transparent)]
    Integer(#[from] IntegerParseError),

    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// One instruction's source tokens (commas and the label prefix
/// already stripped) tagged with the address it will occupy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord {
    pub tokens: Vec<String>,
    pub address: u32,
}

/// Everything Pass 1 produces for Pass 2 to consume.
#[derive(Debug, Clone)]
pub struct PrePass {
    pub memory: Memory,
    pub symbols: SymbolTable,
    pub instructions: Vec<InstructionRecord>,
}

/// Drop everything from the first unquoted `#` to end of line (§6).
fn strip_comment(line: &str) -> &str {
    let end = line.find('#').unwrap_or(line.len());
    &line[..end]
}

/// Split on commas and whitespace, discarding empty tokens.
fn tokenize(line: &str) -> Vec<String> {
    line.replace(',', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Expand `li rd, imm` into one or two real instruction records,
/// following the same upper-20/lower-12 carry rule a `lui`+`addi`
/// pair needs to reconstruct the exact value (§4.1, §4.2).
fn expand_li(tokens: &[String], address: u32, out: &mut Vec<InstructionRecord>) -> Result<u32, LexError> {
    if tokens.len() != 3 {
        return Err(LexError::BadLi(tokens.len() - 1));
    }
    let rd = tokens[1].clone();
    let imm = parse_integer(&tokens[2])?;

    if (-0x800..=0x7FF).contains(&imm) {
        out.push(InstructionRecord {
            tokens: vec!["addi".to_string(), rd, "x0".to_string(), imm.to_string()],
            address,
        });
        return Ok(address + 4);
    }

    let imm32 = imm as i64 as u32;
    let lo12 = imm32 & 0xFFF;
    let hi20 = if lo12 & 0x800 != 0 {
        ((imm32 >> 12).wrapping_add(1)) & 0xFFFFF
    } else {
        (imm32 >> 12) & 0xFFFFF
    };
    let lo_signed = if lo12 & 0x800 != 0 {
        (lo12 as i32) - 0x1000
    } else {
        lo12 as i32
    };

    out.push(InstructionRecord {
        tokens: vec!["lui".to_string(), rd.clone(), format!("0x{hi20:x}")],
        address,
    });
    out.push(InstructionRecord {
        tokens: vec!["addi".to_string(), rd.clone(), rd, lo_signed.to_string()],
        address: address + 4,
    });
    Ok(address + 8)
}

fn directive_operand<'a>(tokens: &'a [String], name: &str) -> Result<&'a str, LexError> {
    tokens
        .first()
        .map(String::as_str)
        .ok_or_else(|| LexError::MissingOperand(name.to_string()))
}

/// Run Pass 1 over `source`.
pub fn lex(source: &str) -> Result<PrePass, LexError> {
    let mut memory = Memory::new();
    let mut symbols = SymbolTable::new();
    let mut instructions = Vec::new();
    let mut address: u32 = PROGRAM_START;

    for raw_line in source.lines() {
        let trimmed = strip_comment(raw_line).trim();
        if trimmed.is_empty() {
            continue;
        }

        let working = if let Some(colon_idx) = trimmed.find(':') {
            let label = trimmed[..colon_idx].trim();
            if label.is_empty() {
                return Err(LexError::EmptyLabel(raw_line.to_string()));
            }
            symbols.define(label, address)?;
            trimmed[colon_idx + 1..].trim().to_string()
        } else {
            trimmed.to_string()
        };

        if working.is_empty() {
            continue;
        }

        if let Some(rest) = working.strip_prefix('.') {
            let mut tokens = tokenize(rest);
            if tokens.is_empty() {
                return Err(LexError::UnknownDirective(String::new()));
            }
            let directive = tokens.remove(0);
            match directive.as_str() {
                "org" => {
                    address = parse_integer(directive_operand(&tokens, "org")?)? as u32;
                }
                "word" => {
                    let value = parse_integer(directive_operand(&tokens, "word")?)? as u32;
                    memory.write_word(address, value);
                    address += 4;
                }
                "half" => {
                    let value = parse_integer(directive_operand(&tokens, "half")?)? as u32;
                    memory.write_half(address, value as u16)?;
                    address += 2;
                }
                "byte" => {
                    let value = parse_integer(directive_operand(&tokens, "byte")?)? as u32;
                    memory.write_byte(address, value as u8);
                    address += 1;
                }
                "align" => {
                    let n = parse_integer(directive_operand(&tokens, "align")?)? as u32;
                    let boundary = 1u32 << n;
                    address = (address + boundary - 1) & !(boundary - 1);
                }
                other => return Err(LexError::UnknownDirective(other.to_string())),
            }
            continue;
        }

        let tokens = tokenize(&working);
        if tokens.is_empty() {
            continue;
        }
        if tokens[0] == "li" {
            address = expand_li(&tokens, address, &mut instructions)?;
        } else {
            instructions.push(InstructionRecord { tokens, address });
            address += 4;
        }
    }

    Ok(PrePass {
        memory,
        symbols,
        instructions,
    })
}
