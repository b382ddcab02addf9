// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Template discovery in the dataset directory

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// File extension of templates (matched case-insensitively)
pub const TEMPLATE_EXTENSION: &str = "scad";

/// Templates available in a dataset directory
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    dataset_dir: PathBuf,
}

impl TemplateCatalog {
    pub fn new(dataset_dir: impl Into<PathBuf>) -> Self {
        Self {
            dataset_dir: dataset_dir.into(),
        }
    }

    pub fn dataset_dir(&self) -> &Path {
        &self.dataset_dir
    }

    pub fn exists(&self) -> bool {
        self.dataset_dir.is_dir()
    }

    /// Sorted template file names directly inside the dataset directory.
    ///
    /// A missing dataset directory has no templates.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dataset_dir).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| {
                format!("Failed to scan dataset directory: {}", self.dataset_dir.display())
            })?;
            if !entry.path().is_file() || !is_template(entry.path()) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    /// Whether a template with this name is listed
    pub fn contains(&self, name: &str) -> bool {
        self.path_of(name).is_some_and(|path| path.is_file() && is_template(&path))
    }

    /// Path of a template, or `None` when the name is not a plain file name
    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file)), None) => Some(self.dataset_dir.join(file)),
            _ => None,
        }
    }
}

fn is_template(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION))
}
