//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// stimrand - balanced subsets and constrained prerandomizations of stimuli
#[derive(Parser, Debug)]
#[command(name = "stimrand")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the stimulus files
    ///
    /// Optional when a configuration file provides it
    #[arg(value_name = "PATH")]
    pub target: Option<PathBuf>,

    // === Stimulus Options ===
    /// Comma-separated category names (e.g., "animal,human,nature")
    ///
    /// Inferred from "[category]_[number]" file names when omitted
    #[arg(long)]
    pub categories: Option<String>,

    // === Subset Options ===
    /// Number of balanced subsets to create
    #[arg(short = 's', long)]
    pub subsets: Option<String>,

    // === Prerandomization Options ===
    /// Number of prerandomizations per list (per subset when subsets exist)
    #[arg(short = 'p', long)]
    pub prerands: Option<String>,

    /// Prerandomization method: unconstrained, pseudo-constrained or pure-constrained
    #[arg(short = 'm', long)]
    pub method: Option<String>,

    // === Output Options ===
    /// Where to place the output directories
    #[arg(long, value_enum)]
    pub dir_type: Option<DirTypeArg>,

    /// Subset directory (overrides --dir-type)
    #[arg(long)]
    pub subsets_dir: Option<PathBuf>,

    /// Prerandomization directory (overrides --dir-type)
    #[arg(long)]
    pub prerands_dir: Option<PathBuf>,

    /// Write a JSON summary of the run to this path
    #[arg(long)]
    pub json_summary: Option<PathBuf>,

    // === Runtime Options ===
    /// Seed for reproducible runs
    #[arg(long, env = "STIMRAND_SEED")]
    pub seed: Option<u64>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Dry run - validate configuration without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Output directory placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirTypeArg {
    /// Next to the stimulus directory
    Parent,
    /// Inside the stimulus directory
    Child,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.config.is_none() {
            if self.target.is_none() {
                anyhow::bail!("a stimulus directory is required unless --config is given");
            }
            if self.subsets.is_none() && self.prerands.is_none() {
                anyhow::bail!("nothing to do: specify --subsets and/or --prerands");
            }
        }

        if self.method.is_some() && self.prerands.is_none() && self.config.is_none() {
            anyhow::bail!("--method only applies together with --prerands");
        }

        Ok(())
    }
}
