// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::form::FormDescription;
use crate::generator::GeneratedArtifact;
use crate::template::CallSite;
use colored::*;
use std::path::Path;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report the templates found in a dataset directory
    pub fn report_templates(dataset_dir: &Path, templates: &[String]) {
        println!("{} {}", "Templates:".bold(), dataset_dir.display().to_string().bright_black());
        if templates.is_empty() {
            println!("  {}", "(none found)".bright_black());
        }
        for name in templates {
            println!("  - {}", name.cyan());
        }
    }

    /// Report the parameter form of a template
    pub fn report_form(form: &FormDescription) {
        println!("{} {}", "Template:".bold(), form.template.cyan());
        if let Some(ref notice) = form.notice {
            println!("  {}", notice.yellow());
        }
        for field in &form.fields {
            println!("  {} {}", field.label.bright_black(), "<value>".dimmed());
        }
    }

    /// Report a generated artifact, optionally followed by its text
    pub fn report_artifact(artifact: &GeneratedArtifact, preview: bool, written: bool) {
        if preview {
            println!("\n{}", "━".repeat(80).bright_black());
            println!("{} {}", "Generated SCAD:".bold(), artifact.template.cyan());
            println!("{}", "━".repeat(80).bright_black());
            print!("{}", artifact.text);
            if !artifact.text.ends_with('\n') {
                println!();
            }
            println!("{}", "━".repeat(80).bright_black());
        }

        println!(
            "  {} {}",
            "Call:".bright_black(),
            Self::describe_call_site(artifact.call_site)
        );
        if written {
            Self::success(&format!("Wrote: {}", artifact.path.display()));
        } else {
            Self::report_info(&format!("Dry run, would write: {}", artifact.path.display()));
        }
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn describe_call_site(call_site: CallSite) -> String {
        match call_site {
            CallSite::Line(index) => format!("rewrote line {}", index + 1),
            CallSite::Synthesized => "appended default call".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_call_site() {
        assert_eq!(Reporter::describe_call_site(CallSite::Line(0)), "rewrote line 1");
        assert_eq!(
            Reporter::describe_call_site(CallSite::Synthesized),
            "appended default call"
        );
    }
}
