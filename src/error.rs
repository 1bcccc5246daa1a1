//! Top-level error composition.
//!
//! Each subsystem (§7 of the spec) defines its own `thiserror` enum;
//! this module ties them together into the one error type the CLI
//! binaries propagate up to `main()`.

use thiserror::Error;

use crate::assembler::encoder::EncodeError;
use crate::assembler::lexer::LexError;
use crate::memory::MemoryError;
use crate::object::ObjectError;
use crate::sim::cpu::SimError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Object(#[from] ObjectError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("program of {size} words exceeds memory of {capacity} words")]
    ProgramTooLarge { size: usize, capacity: usize },
}
