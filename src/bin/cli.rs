// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! scadgen CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scadgen::cli::Reporter;
use scadgen::config::CONFIG_FILE;
use scadgen::{describe_form, missing_parameters, Generator, GeneratorConfig, ParameterValues};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Exit code for usage errors (bad arguments, unknown template, missing values)
const USAGE_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "scadgen")]
#[command(about = "Fill OpenSCAD templates with parameters and generate new .scad files", long_about = None)]
struct Cli {
    /// Template directory (overrides config and SCADGEN_DATASET_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    dataset: Option<PathBuf>,

    /// Output directory (overrides config and SCADGEN_OUTPUT_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Configuration file (defaults to ./scadgen.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available templates
    List,

    /// Show the parameter fields a template declares
    Fields {
        /// Template file name (e.g. bracket.scad)
        template: String,

        /// Print the form description as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a .scad file from a template
    Generate {
        /// Template file name (e.g. bracket.scad)
        template: String,

        /// Parameter values like width=20 height=10
        #[arg(short, long = "set", value_name = "KEY=VALUE", num_args = 1..)]
        set: Vec<String>,

        /// Generate even when declared parameters have no value
        #[arg(long)]
        allow_missing: bool,

        /// Show the result without writing it
        #[arg(long)]
        dry_run: bool,

        /// Do not print the generated text
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write the resolved configuration as TOML
    InitConfig {
        /// Destination file
        #[arg(default_value = CONFIG_FILE)]
        path: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Version => println!("scadgen v{}", env!("CARGO_PKG_VERSION")),
        Commands::List => list_command(&load_generator(&cli)?)?,
        Commands::Fields { template, json } => {
            fields_command(&load_generator(&cli)?, template, *json)?
        }
        Commands::Generate {
            template,
            set,
            allow_missing,
            dry_run,
            quiet,
        } => generate_command(
            &load_generator(&cli)?,
            template,
            set,
            *allow_missing,
            *dry_run,
            *quiet,
        )?,
        Commands::InitConfig { path } => {
            load_config(&cli)?.save(path)?;
            Reporter::success(&format!("Wrote configuration: {}", path.display()));
        }
    }

    Ok(())
}

/// `RUST_LOG` decides the filter unless `-v` asks for debug output
fn init_tracing(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if !verbose => filter,
        _ => EnvFilter::new(if verbose { "debug" } else { "warn" }),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_generator(cli: &Cli) -> Result<Generator> {
    Ok(Generator::new(&load_config(cli)?))
}

/// Resolve directories once: config file or defaults, then env, then flags
fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to determine working directory")?;
            GeneratorConfig::load(cwd)?
        }
    };

    if let Some(dataset) = &cli.dataset {
        config.dataset_dir = dataset.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }

    Ok(config)
}

fn list_command(generator: &Generator) -> Result<()> {
    let catalog = generator.catalog();
    if !catalog.exists() {
        Reporter::report_warning(&format!(
            "Dataset folder not found: {}",
            catalog.dataset_dir().display()
        ));
    }

    let templates = catalog.list()?;
    Reporter::report_templates(catalog.dataset_dir(), &templates);
    Ok(())
}

fn fields_command(generator: &Generator, template: &str, json: bool) -> Result<()> {
    require_template(generator, template)?;

    let form = describe_form(template, &generator.declaration(template));
    if json {
        println!("{}", serde_json::to_string_pretty(&form)?);
    } else {
        Reporter::report_form(&form);
    }
    Ok(())
}

fn generate_command(
    generator: &Generator,
    template: &str,
    assignments: &[String],
    allow_missing: bool,
    dry_run: bool,
    quiet: bool,
) -> Result<()> {
    require_template(generator, template)?;

    let values = match ParameterValues::from_assignments(assignments) {
        Ok(values) => values,
        Err(e) => {
            Reporter::report_error(&format!("Invalid --set value: {}", e));
            std::process::exit(USAGE_ERROR);
        }
    };

    let missing = missing_parameters(&generator.declaration(template), &values);
    if !missing.is_empty() {
        let message = format!(
            "Missing values for: {} (declared via // param: ...)\n      Pass them with: --set {}",
            missing.join(", "),
            missing
                .iter()
                .map(|name| format!("{}=VALUE", name))
                .collect::<Vec<_>>()
                .join(" ")
        );
        if allow_missing {
            Reporter::report_warning(&message);
        } else {
            Reporter::report_error(&message);
            std::process::exit(USAGE_ERROR);
        }
    }

    let artifact = if dry_run {
        generator.render(template, &values)
    } else {
        generator.generate(template, &values)
    }
    .with_context(|| format!("Generation failed for {}", template))?;

    Reporter::report_artifact(&artifact, !quiet, !dry_run);
    Ok(())
}

/// Exit with a usage error unless the template is in the dataset
fn require_template(generator: &Generator, template: &str) -> Result<()> {
    let catalog = generator.catalog();
    if !catalog.exists() {
        Reporter::report_error(&format!(
            "Dataset folder not found: {}",
            catalog.dataset_dir().display()
        ));
        std::process::exit(USAGE_ERROR);
    }

    if !catalog.contains(template) {
        let available = catalog.list()?;
        Reporter::report_error(&format!("Template not found in dataset: {}", template));
        Reporter::report_info(&format!(
            "Available templates: {}",
            if available.is_empty() {
                "(none)".to_string()
            } else {
                available.join(", ")
            }
        ));
        std::process::exit(USAGE_ERROR);
    }

    Ok(())
}
