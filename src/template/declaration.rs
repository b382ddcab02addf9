// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parameter declaration extraction
//!
//! A template declares its parameters on a single comment line:
//!
//! ```text
//! // param: width=20, height=20, thickness=10
//! ```
//!
//! Only the names are kept. Values after `=` are examples for the author
//! and are not modeled.

use std::fs;
use std::path::Path;

use super::DECLARATION_MARKERS;

/// Ordered parameter names declared by a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterDeclaration {
    names: Vec<String>,
}

impl ParameterDeclaration {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Declared names, in declaration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over the declared names as `&str`
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// True when the template declares no parameters
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Extract the parameter names from template text.
///
/// Only the first declaration line is honored. Returns an empty
/// declaration when none is present.
pub fn extract_parameters(source: &str) -> ParameterDeclaration {
    source
        .lines()
        .find_map(parse_declaration_line)
        .unwrap_or_default()
}

/// Read a template from disk and extract its declaration.
///
/// An unreadable or missing file declares no parameters.
pub fn read_declaration(path: impl AsRef<Path>) -> ParameterDeclaration {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(source) => extract_parameters(&source),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read template declaration");
            ParameterDeclaration::default()
        }
    }
}

fn parse_declaration_line(line: &str) -> Option<ParameterDeclaration> {
    let trimmed = line.trim();
    let folded = trimmed.to_lowercase();
    if !DECLARATION_MARKERS.iter().any(|marker| folded.starts_with(marker)) {
        return None;
    }

    let (_, list) = trimmed.split_once(':')?;
    let names = list
        .split(',')
        .filter_map(|entry| {
            let name = entry.split('=').next().unwrap_or_default().trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect();

    Some(ParameterDeclaration::new(names))
}
