//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod randomization;
pub mod toml;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub use randomization::{DirType, Method};

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub stimuli: StimuliConfig,
    /// Split the stimuli into balanced subsets (skipped when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsets: Option<SubsetConfig>,
    /// Create prerandomizations (skipped when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerands: Option<PrerandConfig>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Stimulus location and categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StimuliConfig {
    /// Directory holding the stimulus files
    pub path: PathBuf,
    /// Category names; inferred from `[category]_[rest]` file names if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// Subset creation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsetConfig {
    /// Number of subsets
    pub count: usize,
}

/// Prerandomization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrerandConfig {
    /// Prerandomizations per list (per subset when subsets exist)
    pub count: usize,
    /// Prerandomization method
    #[serde(default)]
    pub method: Method,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Placement of derived output directories
    #[serde(default)]
    pub dir_type: DirType,
    /// Explicit subset directory (overrides dir_type)
    pub subsets_dir: Option<PathBuf>,
    /// Explicit prerandomization directory (overrides dir_type)
    pub prerands_dir: Option<PathBuf>,
    /// JSON run summary path
    pub json_summary: Option<PathBuf>,
}

/// Runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Seed for every random draw in the run
    pub seed: Option<u64>,
    /// Validate and print the configuration without writing anything
    #[serde(default)]
    pub dry_run: bool,
    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    /// Configuration for a stimulus directory with nothing to do yet
    pub fn for_stimuli(path: impl Into<PathBuf>) -> Self {
        Self {
            stimuli: StimuliConfig {
                path: path.into(),
                categories: None,
            },
            subsets: None,
            prerands: None,
            output: OutputConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

// Display trait implementations

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Stimuli: {}", self.stimuli)?;
        match &self.subsets {
            Some(subsets) => writeln!(f, "  Subsets: {}", subsets.count)?,
            None => writeln!(f, "  Subsets: none")?,
        }
        match &self.prerands {
            Some(prerands) => writeln!(f, "  Prerandomizations: {}", prerands)?,
            None => writeln!(f, "  Prerandomizations: none")?,
        }
        writeln!(f, "  Output: {}", self.output)?;
        writeln!(f, "  Runtime: {}", self.runtime)?;
        Ok(())
    }
}

impl fmt::Display for StimuliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        match &self.categories {
            Some(categories) => write!(f, ", categories=[{}]", categories.join(", ")),
            None => write!(f, ", categories=auto"),
        }
    }
}

impl fmt::Display for PrerandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per list, method={}", self.count, self.method)
    }
}

impl fmt::Display for OutputConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dir_type={}", self.dir_type)?;
        if let Some(ref dir) = self.subsets_dir {
            write!(f, ", subsets_dir={}", dir.display())?;
        }
        if let Some(ref dir) = self.prerands_dir {
            write!(f, ", prerands_dir={}", dir.display())?;
        }
        if let Some(ref path) = self.json_summary {
            write!(f, ", json_summary={}", path.display())?;
        }
        Ok(())
    }
}

impl fmt::Display for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seed {
            Some(seed) => write!(f, "seed={}", seed)?,
            None => write!(f, "seed=random")?,
        }
        if self.dry_run {
            write!(f, ", dry_run")?;
        }
        if self.debug {
            write!(f, ", debug")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_summary() {
        let mut config = Config::for_stimuli("/data/stim");
        config.stimuli.categories = Some(vec!["animal".into(), "human".into()]);
        config.prerands = Some(PrerandConfig {
            count: 4,
            method: Method::PureConstrained,
        });
        config.runtime.seed = Some(7);

        let text = config.to_string();
        assert!(text.contains("/data/stim, categories=[animal, human]"));
        assert!(text.contains("Subsets: none"));
        assert!(text.contains("4 per list, method=pure-constrained"));
        assert!(text.contains("seed=7"));
    }
}
