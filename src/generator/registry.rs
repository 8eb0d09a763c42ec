//! Country → generated class accumulator.
//!
//! The registry is threaded through the pipeline explicitly and consumed once
//! to build the factory. Keys are unique; what happens on a repeated key is
//! decided by [`DuplicatePolicy`].

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Resolution for a country code registered more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Last write wins
    #[default]
    Overwrite,
    /// Fail on the second registration
    Reject,
}

/// A repeated country code under [`DuplicatePolicy::Reject`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCountry {
    pub code: String,
    pub existing: String,
    pub incoming: String,
}

impl fmt::Display for DuplicateCountry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "country '{}' is already registered as {} (incoming: {})",
            self.code, self.existing, self.incoming
        )
    }
}

impl std::error::Error for DuplicateCountry {}

/// Class identifier generated for a country
pub fn class_name_for(code: &str) -> String {
    format!("{code}PostalCode")
}

/// Generated validators keyed by country code, iterated in code order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `class` for `code`.
    ///
    /// Returns the replaced class name when an existing entry was overwritten.
    pub fn register(
        &mut self,
        code: impl Into<String>,
        class: impl Into<String>,
        policy: DuplicatePolicy,
    ) -> Result<Option<String>, DuplicateCountry> {
        let code = code.into();
        let class = class.into();
        if let Some(existing) = self.entries.get(&code) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(DuplicateCountry {
                        code,
                        existing: existing.clone(),
                        incoming: class,
                    })
                }
                DuplicatePolicy::Overwrite => {
                    tracing::debug!(code = %code, existing = %existing, incoming = %class, "Overwriting registry entry");
                }
            }
        }
        Ok(self.entries.insert(code, class))
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(code, class)` pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
