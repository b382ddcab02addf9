// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Call-site rewriting
//!
//! The call line is the first line that either contains the `// CALL`
//! marker or, once trimmed, starts with an identifier immediately followed
//! by `(`. Its argument list is replaced with the supplied values. All
//! other lines are copied through byte for byte.

use regex::Regex;
use std::sync::LazyLock;

use super::values::ParameterValues;
use super::{CALL_MARKER, DEFAULT_MODULE};

static CALL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*\(").expect("call pattern is valid"));

/// Where the rewritten call ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    /// Zero-based index of the rewritten template line
    Line(usize),
    /// No line qualified; a default call was appended
    Synthesized,
}

/// Result of rewriting a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub call_site: CallSite,
}

/// Check whether a line qualifies as the call line
pub fn is_call_line(line: &str) -> bool {
    line.contains(CALL_MARKER) || CALL_PATTERN.is_match(line.trim())
}

/// Replace the argument list of a single line (without its line terminator).
///
/// - no `(`: the bare statement gets `(<args>);` appended
/// - `(` without a later `)`: everything from `(` on becomes `(<args>);`
/// - otherwise the text between the first `(` and the next `)` is replaced
pub fn rewrite_call(line: &str, values: &ParameterValues) -> String {
    let args = values.render_arguments();

    let Some(open) = line.find('(') else {
        let statement = line.trim_end();
        let statement = statement.strip_suffix(';').unwrap_or(statement).trim_end();
        return format!("{}({});", statement, args);
    };

    match line[open + 1..].find(')') {
        None => format!("{}({});", &line[..open], args),
        Some(offset) => {
            let close = open + 1 + offset;
            format!("{}{}{}", &line[..=open], args, &line[close..])
        }
    }
}

/// Rewrite the first call line of a template, or append a default call
/// when there is none.
pub fn rewrite_template(source: &str, values: &ParameterValues) -> Rewrite {
    let mut text = String::with_capacity(source.len() + 64);
    let mut call_site = None;

    for (index, segment) in source.split_inclusive('\n').enumerate() {
        let (content, ending) = split_line_ending(segment);
        if call_site.is_none() && is_call_line(content) {
            text.push_str(&rewrite_call(content, values));
            text.push_str(ending);
            call_site = Some(CallSite::Line(index));
        } else {
            text.push_str(segment);
        }
    }

    let call_site = match call_site {
        Some(site) => site,
        None => {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str("\n// Auto-generated call\n");
            text.push_str(&rewrite_call(&format!("{}();", DEFAULT_MODULE), values));
            text.push('\n');
            CallSite::Synthesized
        }
    };

    Rewrite { text, call_site }
}

fn split_line_ending(segment: &str) -> (&str, &str) {
    if let Some(content) = segment.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = segment.strip_suffix('\n') {
        (content, "\n")
    } else {
        (segment, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> ParameterValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_replace_existing_arguments() {
        let v = values(&[("size", "20"), ("center", "false")]);
        assert_eq!(
            rewrite_call("cube(size=1, center=true);", &v),
            "cube(size=20, center=false);"
        );
    }

    #[test]
    fn test_preserves_surrounding_text() {
        let v = values(&[("r", "5")]);
        assert_eq!(
            rewrite_call("  sphere(r=1) ; // main body", &v),
            "  sphere(r=5) ; // main body"
        );
    }

    #[test]
    fn test_bare_statement() {
        let v = values(&[("x", "5")]);
        assert_eq!(rewrite_call("do_thing", &v), "do_thing(x=5);");
        assert_eq!(rewrite_call("do_thing;  ", &v), "do_thing(x=5);");
    }

    #[test]
    fn test_unclosed_argument_list() {
        let v = values(&[("h", "3")]);
        assert_eq!(rewrite_call("cylinder(h=1, r=", &v), "cylinder(h=3);");
    }

    #[test]
    fn test_only_first_closing_paren() {
        let v = values(&[("v", "[1,2,3]")]);
        assert_eq!(
            rewrite_call("translate([0,0,0]) cube(4);", &v),
            "translate(v=[1,2,3]) cube(4);"
        );
    }

    #[test]
    fn test_call_line_detection() {
        assert!(is_call_line("cube(1);"));
        assert!(is_call_line("   _part2(a=1);"));
        assert!(is_call_line("thing // CALL"));
        assert!(!is_call_line("cube (1);"));
        assert!(!is_call_line("// comment cube(1)"));
        assert!(!is_call_line("2d(1);"));
        assert!(!is_call_line("$fn = 32;"));
    }

    #[test]
    fn test_first_qualifying_line_only() {
        let source = "// param: a=1\nfirst(a=0);\nsecond(a=0);\n";
        let rewrite = rewrite_template(source, &values(&[("a", "9")]));
        assert_eq!(rewrite.text, "// param: a=1\nfirst(a=9);\nsecond(a=0);\n");
        assert_eq!(rewrite.call_site, CallSite::Line(1));
    }

    #[test]
    fn test_marker_wins_when_first() {
        let source = "$fn = 64;\npart(); // CALL\nother();\n";
        let rewrite = rewrite_template(source, &values(&[("w", "2")]));
        assert_eq!(rewrite.text, "$fn = 64;\npart(w=2); // CALL\nother();\n");
    }

    #[test]
    fn test_fallback_appends_default_call() {
        let source = "// nothing callable\n$fn = 32;\n";
        let rewrite = rewrite_template(source, &values(&[("w", "10")]));
        assert_eq!(
            rewrite.text,
            "// nothing callable\n$fn = 32;\n\n// Auto-generated call\nparam_module(w=10);\n"
        );
        assert_eq!(rewrite.call_site, CallSite::Synthesized);
    }

    #[test]
    fn test_fallback_terminates_last_line() {
        let rewrite = rewrite_template("$fn = 32;", &values(&[("w", "1")]));
        assert_eq!(
            rewrite.text,
            "$fn = 32;\n\n// Auto-generated call\nparam_module(w=1);\n"
        );
    }

    #[test]
    fn test_line_endings_preserved() {
        let source = "// header\r\nbox(a=1);\r\n";
        let rewrite = rewrite_template(source, &values(&[("a", "2")]));
        assert_eq!(rewrite.text, "// header\r\nbox(a=2);\r\n");
    }

    #[test]
    fn test_rewrite_of_generated_output_is_stable() {
        let v = values(&[("w", "10")]);
        let first = rewrite_template("$fn = 8;\n", &v);
        let second = rewrite_template(&first.text, &v);
        assert_eq!(first.text, second.text);
        assert_eq!(second.call_site, CallSite::Line(3));
    }
}
