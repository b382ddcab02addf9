// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Template scanning: parameter declarations and call-site rewriting

pub mod declaration;
pub mod rewriter;
pub mod values;

pub use declaration::{extract_parameters, read_declaration, ParameterDeclaration};
pub use rewriter::{is_call_line, rewrite_call, rewrite_template, CallSite, Rewrite};
pub use values::{ParameterValues, ParseValueError};

/// Comment prefixes that introduce a parameter declaration (compared lower-cased)
pub const DECLARATION_MARKERS: [&str; 2] = ["// param:", "// params:"];

/// Substring that explicitly marks the call line to rewrite
pub const CALL_MARKER: &str = "// CALL";

/// Module name used when a template has no call line of its own
pub const DEFAULT_MODULE: &str = "param_module";
