// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Integration tests for template generation

use scadgen::{
    describe_form, generate, CallSite, GenerateError, Generator, GeneratorConfig, ParameterValues,
};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BRACKET: &str = "\
// Simple L bracket
// param: width=20, height=20, thickness=10

bracket(width=20, height=20, thickness=10); // CALL

module bracket(width, height, thickness) {
    cube([width, thickness, height]);
}
";

struct Fixture {
    _temp_dir: TempDir,
    config: GeneratorConfig,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let dataset = temp_dir.path().join("scad_dataset");
        fs::create_dir_all(&dataset).expect("dataset dir");
        let config = GeneratorConfig::resolve(temp_dir.path());
        assert_eq!(config.dataset_dir, dataset);
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    fn add_template(&self, name: &str, source: &str) -> PathBuf {
        let path = self.config.dataset_dir.join(name);
        fs::write(&path, source).expect("write template");
        path
    }
}

#[test]
fn test_generate_marked_call() {
    let fixture = Fixture::new();
    let template_path = fixture.add_template("bracket.scad", BRACKET);

    let generator = Generator::new(&fixture.config);
    let form = describe_form("bracket.scad", &generator.declaration("bracket.scad"));
    let inputs = HashMap::from([
        ("width".to_string(), "40".to_string()),
        ("height".to_string(), "25".to_string()),
        ("thickness".to_string(), "4".to_string()),
    ]);
    let values = form.collect(&inputs).expect("all fields filled");

    let artifact = generator.generate("bracket.scad", &values).expect("generate");

    assert_eq!(
        artifact.path,
        fixture.config.output_dir.join("generated_bracket.scad")
    );
    // `cube(` inside the module body also qualifies but comes later
    assert_eq!(artifact.call_site, CallSite::Line(3));
    assert!(artifact.text.contains("    cube([width, thickness, height]);\n"));

    let written = fs::read_to_string(&artifact.path).expect("read output");
    assert_eq!(written, artifact.text);
    assert_eq!(
        written,
        BRACKET.replace(
            "bracket(width=20, height=20, thickness=10); // CALL",
            "bracket(width=40, height=25, thickness=4); // CALL"
        )
    );

    // The template itself is untouched
    assert_eq!(fs::read_to_string(template_path).unwrap(), BRACKET);
}

#[test]
fn test_generate_appends_default_call() {
    let fixture = Fixture::new();
    let source = "// param: w=1\n$fn = 32;\nmodule param_module(w) { cube(w); }\n";
    fixture.add_template("plate.scad", source);

    let values = ParameterValues::from_assignments(["w=10"]).unwrap();
    let artifact = generate(&fixture.config, "plate.scad", &values).expect("generate");

    assert_eq!(artifact.call_site, CallSite::Synthesized);
    assert!(artifact.text.starts_with(source));
    assert!(artifact
        .text
        .ends_with("\n\n// Auto-generated call\nparam_module(w=10);\n"));
}

#[test]
fn test_generation_is_repeatable() {
    let fixture = Fixture::new();
    fixture.add_template("bracket.scad", BRACKET);
    let values = ParameterValues::from_assignments(["width=5", "height=6", "thickness=7"]).unwrap();

    let first = generate(&fixture.config, "bracket.scad", &values).unwrap();
    let first_bytes = fs::read(&first.path).unwrap();
    let second = generate(&fixture.config, "bracket.scad", &values).unwrap();
    let second_bytes = fs::read(&second.path).unwrap();

    assert_eq!(first.path, second.path);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn test_regenerating_from_output_is_value_equivalent() {
    let fixture = Fixture::new();
    fixture.add_template("bracket.scad", BRACKET);
    let values = ParameterValues::from_assignments(["width=5", "height=6", "thickness=7"]).unwrap();

    let first = generate(&fixture.config, "bracket.scad", &values).unwrap();
    fixture.add_template("again.scad", &first.text);
    let second = generate(&fixture.config, "again.scad", &values).unwrap();

    assert_eq!(first.text, second.text);
}

#[test]
fn test_overwrites_previous_output() {
    let fixture = Fixture::new();
    fixture.add_template("peg.scad", "peg(d=1);\n");

    let small = ParameterValues::from_assignments(["d=2"]).unwrap();
    let large = ParameterValues::from_assignments(["d=9"]).unwrap();
    generate(&fixture.config, "peg.scad", &small).unwrap();
    let artifact = generate(&fixture.config, "peg.scad", &large).unwrap();

    assert_eq!(fs::read_to_string(artifact.path).unwrap(), "peg(d=9);\n");
}

#[test]
fn test_missing_template() {
    let fixture = Fixture::new();
    let err = generate(&fixture.config, "ghost.scad", &ParameterValues::new()).unwrap_err();

    assert!(matches!(err, GenerateError::TemplateNotFound { .. }));
    assert!(err.to_string().contains("ghost.scad"));
    assert!(!fixture.config.output_dir.exists());
}

#[test]
fn test_listing_and_declarations() {
    let fixture = Fixture::new();
    fixture.add_template("zeta.scad", "zeta();\n");
    fixture.add_template("bracket.scad", BRACKET);
    fixture.add_template("readme.md", "# not a template\n");

    let generator = Generator::new(&fixture.config);
    assert_eq!(
        generator.catalog().list().unwrap(),
        vec!["bracket.scad", "zeta.scad"]
    );
    assert_eq!(
        generator.declaration("bracket.scad").names(),
        ["width", "height", "thickness"]
    );
    assert!(generator.declaration("zeta.scad").is_empty());
    assert!(generator.declaration("missing.scad").is_empty());
}
