// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Form description for filling in template parameters
//!
//! The form is plain data derived from a template's declaration. Whatever
//! front-end renders it (terminal prompt, widget toolkit, web page) feeds
//! the entered text back through [`FormDescription::collect`].

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::template::{ParameterDeclaration, ParameterValues};

/// Shown when a template declares no parameters
pub const NO_PARAMETERS_NOTICE: &str =
    "No parameters found. Add a line like:  // param: width=20, height=10";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("please enter a value for '{0}'")]
    Missing(String),
}

/// A single text-entry field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
}

/// Ordered fields for one template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDescription {
    pub template: String,
    pub fields: Vec<FormField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Describe the form for a template, one field per declared parameter
pub fn describe_form(template: &str, declaration: &ParameterDeclaration) -> FormDescription {
    let fields: Vec<FormField> = declaration
        .iter()
        .map(|name| FormField {
            name: name.to_string(),
            label: format!("{}:", name),
        })
        .collect();

    let notice = fields.is_empty().then(|| NO_PARAMETERS_NOTICE.to_string());

    FormDescription {
        template: template.to_string(),
        fields,
        notice,
    }
}

impl FormDescription {
    /// Collect entered values in field order. Every field needs a
    /// non-blank value; values are trimmed.
    pub fn collect(&self, inputs: &HashMap<String, String>) -> Result<ParameterValues, FormError> {
        let mut values = ParameterValues::new();
        for field in &self.fields {
            let value = inputs
                .get(&field.name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| FormError::Missing(field.name.clone()))?;
            values.insert(field.name.clone(), value);
        }
        Ok(values)
    }
}

/// Declared names that have no value
pub fn missing_parameters(declaration: &ParameterDeclaration, values: &ParameterValues) -> Vec<String> {
    declaration
        .iter()
        .filter(|name| !values.contains(name))
        .map(str::to_string)
        .collect()
}
