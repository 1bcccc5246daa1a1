//! The two-pass assembler (§4.1, §4.2): lexical pre-pass then encoder.

pub mod encoder;
pub mod lexer;
pub mod symtab;

use thiserror::Error;

use crate::error::PipelineError;
use crate::memory::Memory;
use symtab::SymbolTable;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid integer literal '{0}'")]
pub struct IntegerParseError(pub String);

/// Accepts decimal, `0x`/`0X`-prefixed hex, and leading-zero octal,
/// each optionally preceded by `-` (§6).
pub fn parse_integer(text: &str) -> Result<i64, IntegerParseError> {
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let err = || IntegerParseError(text.to_string());
    let magnitude = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).map_err(|_| err())?
    } else if text.len() > 1 && text.starts_with('0') && text.bytes().all(|b| b.is_ascii_digit()) {
        i64::from_str_radix(&text[1..], 8).map_err(|_| err())?
    } else {
        text.parse::<i64>().map_err(|_| err())?
    };
    Ok(if negative { -magnitude } else { magnitude })
}

/// The output of a complete assembly run: a memory image with both
/// directive data and encoded instructions, the finished symbol table,
/// and the instruction stream in source order for the object writer.
#[derive(Debug, Clone)]
pub struct AssembledProgram {
    pub memory: Memory,
    pub symbols: SymbolTable,
    pub words: Vec<(u32, u32)>,
}

/// Run both passes over `source` and return the assembled program.
pub fn assemble(source: &str) -> Result<AssembledProgram, PipelineError> {
    let pre = lexer::lex(source)?;
    let mut memory = pre.memory;
    let mut words = Vec::with_capacity(pre.instructions.len());

    for record in &pre.instructions {
        let word = encoder::encode_instruction(record, &pre.symbols)?;
        memory.write_word(record.address, word);
        words.push((record.address, word));
    }

    Ok(AssembledProgram {
        memory,
        symbols: pre.symbols,
        words,
    })
}
