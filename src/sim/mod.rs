//! The multi-cycle execution engine, Pass 3 (§4.4 of the spec).

pub mod cpu;
pub mod micro;
