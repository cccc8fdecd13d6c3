use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use onvoc_store::DEFAULT_PREFIX;

#[derive(Parser)]
#[command(name = "onvoc")]
#[command(about = "Controlled vocabulary toolchain: stable term IDs over a TSV tree.")]
pub(crate) struct Cli {
    /// Strict TSV parsing: a malformed header or short row is an error
    /// instead of a silent fallback/skip.
    #[arg(long, global = true)]
    pub(crate) strict: bool,

    /// Output format for reports.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub(crate) output: OutputFormat,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Materialize an ID-annotated .tsv tree from a plain-text source tree.
    Initialize {
        /// Root folder of the plain-text controlled vocabulary.
        #[arg(long)]
        input: PathBuf,

        /// Root folder where the .tsv tree is written.
        #[arg(long)]
        output: PathBuf,

        /// Identifier prefix.
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
    },
    /// Append new categories, subcategories, and terms to an existing copy.
    Synchronize {
        /// Root folder of the plain-text controlled vocabulary.
        #[arg(long)]
        original: PathBuf,

        /// Root folder of the ID-annotated copy.
        #[arg(long)]
        copy: PathBuf,

        /// Identifier prefix used by the copy.
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
    },
    /// Annotate .txt term lists with identifiers from the vocabulary.
    Annotate {
        /// Directories containing term list files to annotate (repeatable).
        #[arg(long, num_args = 1.., required = true)]
        folders: Vec<PathBuf>,

        /// Root of the vocabulary (.tsv files with term and vocabulary_id).
        #[arg(long)]
        vocabulary: PathBuf,
    },
    /// Verify the term/identifier bijection across every .tsv under a root.
    CheckIds {
        /// Root directory containing TSV files to validate.
        #[arg(long)]
        root: PathBuf,
    },
    /// Verify listings match folders and leaf files in both directions.
    CheckCategories {
        /// Vocabulary directory containing Categories.tsv and category folders.
        vocabulary: PathBuf,
    },
    /// Audit drift between a terms tree (.txt) and a vocabulary tree (.tsv).
    CheckSynchronization {
        /// Root folder of the terms directory (with .txt files).
        #[arg(long)]
        terms: PathBuf,

        /// Root folder of the vocabulary directory (with .tsv files).
        #[arg(long)]
        vocabulary: PathBuf,
    },
    /// Validate mapping files against vocabulary identifiers.
    CheckMappings {
        /// Root folder of the vocabulary directory.
        #[arg(long)]
        vocabulary: PathBuf,

        /// Folder of mapping .tsv files.
        #[arg(long)]
        mappings: PathBuf,
    },
    /// Ensure category and subcategory names do not occur as terms.
    CheckLevels {
        /// Root of the vocabulary structure (folders with .txt or .tsv files).
        #[arg(long)]
        vocab: PathBuf,
    },
}
