// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Generator configuration: where templates live and where output goes

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "scadgen.toml";

/// Dataset directory candidates, relative to the base directory, in priority order
const DATASET_CANDIDATES: [&[&str]; 2] = [&["scad_dataset"], &["CMTrain", "scad_dataset"]];

const OUTPUT_DIR_NAME: &str = "generated_scad";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory holding the `.scad` templates
    pub dataset_dir: PathBuf,
    /// Directory receiving generated files
    pub output_dir: PathBuf,
}

impl GeneratorConfig {
    pub fn new(dataset_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            dataset_dir: dataset_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Resolve directories relative to `base`.
    ///
    /// The dataset is the first existing candidate, falling back to
    /// `CMTrain/scad_dataset`. Output goes next to the dataset when it
    /// exists, otherwise under `base`.
    pub fn resolve(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let candidate = |parts: &[&str]| parts.iter().fold(base.to_path_buf(), |p, s| p.join(s));

        let dataset_dir = DATASET_CANDIDATES
            .iter()
            .map(|parts| candidate(*parts))
            .find(|path| path.is_dir())
            .unwrap_or_else(|| candidate(DATASET_CANDIDATES[1]));

        let output_base = if dataset_dir.is_dir() {
            dataset_dir.parent().unwrap_or(base).to_path_buf()
        } else {
            base.to_path_buf()
        };

        Self {
            output_dir: output_base.join(OUTPUT_DIR_NAME),
            dataset_dir,
        }
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: GeneratorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration for `base` with environment variable overrides
    pub fn load(base: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref();
        let file = base.join(CONFIG_FILE);
        let mut config = if file.exists() {
            Self::from_file(&file)?
        } else {
            Self::resolve(base)
        };

        if let Ok(dataset) = std::env::var("SCADGEN_DATASET_DIR") {
            config.dataset_dir = PathBuf::from(dataset);
        }

        if let Ok(output) = std::env::var("SCADGEN_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(output);
        }

        tracing::debug!(
            base = %base.display(),
            dataset_dir = %config.dataset_dir.display(),
            dataset_exists = config.dataset_dir.is_dir(),
            output_dir = %config.output_dir.display(),
            "resolved generator configuration"
        );

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
