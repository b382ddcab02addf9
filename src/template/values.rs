// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Ordered parameter values supplied by the caller

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Error raised when a `key=value` assignment cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseValueError {
    #[error("invalid assignment '{0}' (use key=value)")]
    MissingEquals(String),
    #[error("assignment '{0}' has an empty parameter name")]
    EmptyName(String),
}

/// Parameter name to literal text value, in insertion order.
///
/// The order is the order arguments are emitted into the rewritten call.
/// Inserting a name that is already present replaces its value but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterValues {
    entries: Vec<(String, String)>,
}

impl ParameterValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value for `name`, if one was supplied
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether `name` has a value
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no values were supplied
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Render the argument list: `name=value` pairs joined by `, `
    pub fn render_arguments(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parse a single `key=value` assignment. Splits on the first `=` and
    /// trims both sides.
    pub fn parse_assignment(raw: &str) -> Result<(String, String), ParseValueError> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| ParseValueError::MissingEquals(raw.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseValueError::EmptyName(raw.to_string()));
        }
        Ok((key.to_string(), value.trim().to_string()))
    }

    /// Build values from command-line style assignments, in the given order
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, ParseValueError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Self::new();
        for raw in assignments {
            let (key, value) = Self::parse_assignment(raw.as_ref())?;
            values.insert(key, value);
        }
        Ok(values)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

impl Serialize for ParameterValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
