//! onvoc CLI: initialize, synchronize, annotate, and validate the
//! controlled vocabulary tree.
//!
//! Logging: set `RUST_LOG=info` (or `warn`, `debug`) to adjust what the
//! tools report on stderr; reports themselves go to stdout.

mod cli;

use std::process;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use onvoc_check::{
    check_categories, check_ids, check_levels, check_mappings, check_synchronization,
};
use onvoc_store::IdFormat;
use onvoc_tree::{TreeInitializer, TreeSynchronizer, annotate_folders};

use crate::cli::{Cli, Command, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let strict = cli.strict;
    let output = cli.output;

    // RUST_LOG overrides; default info.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Command::Initialize {
            input,
            output: output_root,
            prefix,
        } => {
            let format = IdFormat::new(&prefix)?;
            let report = TreeInitializer::new(input, output_root, format).run()?;
            emit(output, &report, || {
                format!(
                    "Initialized {} categories, {} subcategories, {} terms.",
                    report.categories, report.subcategories, report.terms
                )
            })
        }
        Command::Synchronize {
            original,
            copy,
            prefix,
        } => {
            let format = IdFormat::new(&prefix)?;
            let report = TreeSynchronizer::new(original, copy, format, strict).run()?;
            emit(output, &report, || {
                format!("Synchronization complete: {} additions.", report.change_count())
            })
        }
        Command::Annotate {
            folders,
            vocabulary,
        } => {
            let report = annotate_folders(&folders, &vocabulary, strict)?;
            emit(output, &report, || {
                format!(
                    "Annotated {} files ({} matched, {} unmatched terms).",
                    report.annotated.len(),
                    report.matched,
                    report.unmatched
                )
            })
        }
        Command::CheckIds { root } => {
            let report = check_ids(&root, strict)?;
            render_check(
                output,
                &report,
                report.is_clean(),
                &report.findings(),
                None,
                "All terms and vocabulary IDs have a one-to-one correspondence.",
            )
        }
        Command::CheckCategories { vocabulary } => {
            let report = check_categories(&vocabulary, strict)?;
            render_check(
                output,
                &report,
                report.is_clean(),
                &report.findings,
                Some("Validation errors found:"),
                "All categories and subcategories match the folder/.tsv structure.",
            )
        }
        Command::CheckSynchronization { terms, vocabulary } => {
            let report = check_synchronization(&terms, &vocabulary, strict)?;
            render_check(
                output,
                &report,
                report.is_clean(),
                &report.mismatches,
                Some("Synchronization check found mismatches:"),
                "Success: Terms and vocabulary are in sync.",
            )
        }
        Command::CheckMappings {
            vocabulary,
            mappings,
        } => {
            let report = check_mappings(&vocabulary, &mappings, strict)?;
            let mut lines = Vec::new();
            for file in &report.files {
                if file.skipped {
                    lines.push(format!(
                        "Skipped {} (missing required columns)",
                        file.path.display()
                    ));
                    continue;
                }
                for error in &file.errors {
                    lines.push(format!("{}: {}", file.path.display(), error));
                }
            }
            render_check(
                output,
                &report,
                report.is_clean(),
                &lines,
                None,
                "All validated mappings are valid!",
            )
        }
        Command::CheckLevels { vocab } => {
            let report = check_levels(&vocab)?;
            render_check(
                output,
                &report,
                report.is_clean(),
                &report.violations,
                Some("Found category/subcategory names used as terms:"),
                "Success: No category or subcategory names occur as terms.",
            )
        }
    }
}

/// Print a write-tool report in the selected format.
fn emit<T: Serialize>(
    output: OutputFormat,
    report: &T,
    text: impl FnOnce() -> String,
) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => println!("{}", text()),
    }
    Ok(())
}

/// Print a validator report and exit non-zero when it is not clean.
fn render_check<T: Serialize>(
    output: OutputFormat,
    report: &T,
    clean: bool,
    lines: &[String],
    heading: Option<&str>,
    success: &str,
) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            if clean {
                println!("{success}");
            } else {
                if let Some(heading) = heading {
                    println!("{heading}");
                }
                for line in lines {
                    println!("  - {line}");
                }
            }
        }
    }
    if clean {
        Ok(())
    } else {
        process::exit(1)
    }
}
