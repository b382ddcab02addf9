// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Artifact generation: template + parameter values -> new `.scad` file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::TemplateCatalog;
use crate::config::GeneratorConfig;
use crate::template::{read_declaration, rewrite_template, CallSite, ParameterDeclaration, ParameterValues};

/// Prefix prepended to the template file name for generated output
pub const OUTPUT_PREFIX: &str = "generated_";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("template not found: {}", path.display())]
    TemplateNotFound { name: String, path: PathBuf },

    #[error("failed to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Generated output and where it belongs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub template: String,
    pub path: PathBuf,
    pub text: String,
    pub call_site: CallSite,
}

/// Generates artifacts from the templates of one dataset
#[derive(Debug, Clone)]
pub struct Generator {
    catalog: TemplateCatalog,
    output_dir: PathBuf,
}

impl Generator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            catalog: TemplateCatalog::new(&config.dataset_dir),
            output_dir: config.output_dir.clone(),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Destination path for a template's generated file
    pub fn output_path(&self, template: &str) -> PathBuf {
        let file_name = Path::new(template)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| template.to_string());
        self.output_dir.join(format!("{}{}", OUTPUT_PREFIX, file_name))
    }

    /// Parameters declared by a template, read fresh from disk
    pub fn declaration(&self, template: &str) -> ParameterDeclaration {
        match self.catalog.path_of(template) {
            Some(path) => read_declaration(path),
            None => ParameterDeclaration::default(),
        }
    }

    /// Build the artifact in memory without touching the output directory
    pub fn render(&self, template: &str, values: &ParameterValues) -> Result<GeneratedArtifact, GenerateError> {
        let path = self.template_path(template)?;
        let source = fs::read_to_string(&path).map_err(|source| GenerateError::Read {
            path: path.clone(),
            source,
        })?;

        let rewrite = rewrite_template(&source, values);
        match rewrite.call_site {
            CallSite::Line(index) => {
                tracing::debug!(template, line = index + 1, "rewrote call line")
            }
            CallSite::Synthesized => {
                tracing::debug!(template, "no call line found, appended default call")
            }
        }

        Ok(GeneratedArtifact {
            template: template.to_string(),
            path: self.output_path(template),
            text: rewrite.text,
            call_site: rewrite.call_site,
        })
    }

    /// Generate and write the artifact, overwriting any previous output
    pub fn generate(&self, template: &str, values: &ParameterValues) -> Result<GeneratedArtifact, GenerateError> {
        let artifact = self.render(template, values)?;

        fs::create_dir_all(&self.output_dir).map_err(|source| GenerateError::Write {
            path: self.output_dir.clone(),
            source,
        })?;
        fs::write(&artifact.path, &artifact.text).map_err(|source| GenerateError::Write {
            path: artifact.path.clone(),
            source,
        })?;

        tracing::debug!(path = %artifact.path.display(), "wrote generated file");
        Ok(artifact)
    }

    fn template_path(&self, template: &str) -> Result<PathBuf, GenerateError> {
        let not_found = || GenerateError::TemplateNotFound {
            name: template.to_string(),
            path: self.catalog.dataset_dir().join(template),
        };
        let path = self.catalog.path_of(template).ok_or_else(not_found)?;
        if !path.is_file() {
            return Err(not_found());
        }
        Ok(path)
    }
}
