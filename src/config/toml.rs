//! TOML configuration file parsing
//!
//! ```toml
//! [stimuli]
//! path = "/data/stim"
//! categories = ["animal", "human", "nature"]
//!
//! [subsets]
//! count = 4
//!
//! [prerands]
//! count = 10
//! method = "pure-constrained"
//!
//! [output]
//! dir_type = "child"
//!
//! [runtime]
//! seed = 1234
//! ```

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{convert_dir_type, parse_categories, parse_count, parse_method};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Override stimuli
    if let Some(ref target) = cli.target {
        config.stimuli.path = target.clone();
    }
    if let Some(ref categories) = cli.categories {
        config.stimuli.categories = Some(parse_categories(categories)?);
    }

    // Override subsets
    if let Some(ref subsets) = cli.subsets {
        let count = parse_count("number of subsets", subsets).context("Invalid --subsets")?;
        config.subsets = Some(SubsetConfig { count });
    }

    // Override prerands; a lone --method adjusts the configured section
    if let Some(ref prerands) = cli.prerands {
        let count = parse_count("number of prerandomizations", prerands).context("Invalid --prerands")?;
        let method = config.prerands.as_ref().map(|p| p.method).unwrap_or_default();
        config.prerands = Some(PrerandConfig { count, method });
    }
    if let Some(ref name) = cli.method {
        let method = parse_method(name).context("Invalid --method")?;
        match config.prerands {
            Some(ref mut prerands) => prerands.method = method,
            None => anyhow::bail!("--method given but no prerandomizations are configured"),
        }
    }

    // Override output settings
    if let Some(dir_type) = cli.dir_type {
        config.output.dir_type = convert_dir_type(dir_type);
    }
    if let Some(ref dir) = cli.subsets_dir {
        config.output.subsets_dir = Some(dir.clone());
    }
    if let Some(ref dir) = cli.prerands_dir {
        config.output.prerands_dir = Some(dir.clone());
    }
    if let Some(ref path) = cli.json_summary {
        config.output.json_summary = Some(path.clone());
    }

    // Override runtime settings
    if cli.seed.is_some() {
        config.runtime.seed = cli.seed;
    }
    if cli.dry_run {
        config.runtime.dry_run = true;
    }
    if cli.debug {
        config.runtime.debug = true;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const BASIC: &str = r#"
[stimuli]
path = "/data/stim"
categories = ["animal", "human", "nature"]

[subsets]
count = 4

[prerands]
count = 10
method = "pure_con"

[output]
dir_type = "child"

[runtime]
seed = 1234
"#;

    #[test]
    fn test_parse_toml_basic() {
        let config = parse_toml_string(BASIC).unwrap();

        assert_eq!(config.stimuli.path, PathBuf::from("/data/stim"));
        assert_eq!(config.stimuli.categories.as_ref().unwrap().len(), 3);
        assert_eq!(config.subsets.as_ref().unwrap().count, 4);
        let prerands = config.prerands.as_ref().unwrap();
        assert_eq!(prerands.count, 10);
        assert_eq!(prerands.method, Method::PureConstrained);
        assert_eq!(config.output.dir_type, DirType::Child);
        assert_eq!(config.runtime.seed, Some(1234));
        assert!(!config.runtime.dry_run);
    }

    #[test]
    fn test_parse_toml_minimal_defaults() {
        let config = parse_toml_string("[stimuli]\npath = \"/data/stim\"\n").unwrap();

        assert!(config.subsets.is_none());
        assert!(config.prerands.is_none());
        assert_eq!(config.output.dir_type, DirType::Parent);
        assert!(config.runtime.seed.is_none());
    }

    #[test]
    fn test_parse_toml_rejects_unknown_method() {
        let toml = "[stimuli]\npath = \"/x\"\n[prerands]\ncount = 2\nmethod = \"shuffled\"\n";
        let err = parse_toml_string(toml).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown method"));
    }

    #[test]
    fn test_parse_toml_rejects_non_numeric_count() {
        let toml = "[stimuli]\npath = \"/x\"\n[prerands]\ncount = \"10\"\n";
        assert!(parse_toml_string(toml).is_err());
    }

    #[test]
    fn test_parse_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(&path, BASIC).unwrap();

        let config = parse_toml_file(&path).unwrap();
        assert_eq!(config.subsets.unwrap().count, 4);
        assert!(parse_toml_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_merge_cli_overrides() {
        let config = parse_toml_string(BASIC).unwrap();
        let cli = Cli::try_parse_from([
            "stimrand", "-c", "run.toml", "/other/stim", "-p", "2", "--seed", "5", "--dir-type", "parent",
        ])
        .unwrap();

        let merged = merge_cli_with_config(&cli, config).unwrap();
        assert_eq!(merged.stimuli.path, PathBuf::from("/other/stim"));
        let prerands = merged.prerands.unwrap();
        assert_eq!(prerands.count, 2);
        // Method from the file survives a count override
        assert_eq!(prerands.method, Method::PureConstrained);
        assert_eq!(merged.runtime.seed, Some(5));
        assert_eq!(merged.output.dir_type, DirType::Parent);
        assert_eq!(merged.subsets.unwrap().count, 4);
    }

    #[test]
    fn test_merge_method_without_prerands() {
        let config = parse_toml_string("[stimuli]\npath = \"/x\"\n").unwrap();
        let cli = Cli::try_parse_from(["stimrand", "-c", "run.toml", "-m", "pure"]).unwrap();
        assert!(merge_cli_with_config(&cli, config).is_err());
    }
}
