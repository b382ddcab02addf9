// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! scadgen
//!
//! Fill parametric OpenSCAD templates with values and generate new `.scad`
//! files. A template declares its parameters on a comment line
//! (`// param: width=20, height=10`); the first call in the template
//! (or the line marked `// CALL`) receives the values as its arguments.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod form;
pub mod generator;
pub mod template;

pub use catalog::TemplateCatalog;
pub use config::GeneratorConfig;
pub use form::{describe_form, missing_parameters, FormDescription, FormError, FormField};
pub use generator::{GenerateError, GeneratedArtifact, Generator};
pub use template::{
    extract_parameters, read_declaration, rewrite_call, rewrite_template, CallSite,
    ParameterDeclaration, ParameterValues,
};

/// Generate a file from a template in the configured dataset
pub fn generate(
    config: &GeneratorConfig,
    template: &str,
    values: &ParameterValues,
) -> Result<GeneratedArtifact, GenerateError> {
    Generator::new(config).generate(template, values)
}
