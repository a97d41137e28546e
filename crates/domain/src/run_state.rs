//! Shared run state.
//!
//! Values captured by one test case and consumed by later ones within the
//! same run. Cases execute sequentially, so the state is owned by the runner
//! and handed out by reference; there is never more than one writer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Variables captured during a single suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    variables: BTreeMap<String, String>,
}

impl RunState {
    /// Creates an empty run state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            variables: BTreeMap::new(),
        }
    }

    /// Stores a captured value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty; an empty identifier must never
    /// be handed to a dependent case.
    pub fn capture(&mut self, name: impl Into<String>, value: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier(format!(
                "captured value for '{name}' is empty"
            )));
        }
        self.variables.insert(name, value);
        Ok(())
    }

    /// Returns a captured value, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Returns a captured value or fails loudly when it was never captured.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UndefinedVariable`] if nothing was captured
    /// under `name`.
    pub fn require(&self, name: &str) -> DomainResult<&str> {
        self.get(name)
            .ok_or_else(|| DomainError::UndefinedVariable(name.to_string()))
    }
}
