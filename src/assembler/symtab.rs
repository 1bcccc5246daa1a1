//! Label table built during the lexical pre-pass (§3, §4.1).

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("label '{0}' redefined")]
    Redefined(String),
}

/// Mapping from label name to the 32-bit address it was defined at.
/// Built once during Pass 1 and treated as read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    labels: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` at `addr`. Per §7, redefinition is a hard error
    /// rather than the "last definition wins" the source leaves undefined.
    pub fn define(&mut self, name: &str, addr: u32) -> Result<(), SymbolError> {
        if self.labels.contains_key(name) {
            return Err(SymbolError::Redefined(name.to_string()));
        }
        self.labels.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
