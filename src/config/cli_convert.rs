//! CLI to Config conversion utilities

use crate::config::cli::{self, Cli};
use crate::config::{Config, DirType, Method, PrerandConfig, SubsetConfig};
use crate::sequence;
use anyhow::{Context, Result};

/// Parse a count argument (e.g., "4"); rejects non-numeric and zero values
pub fn parse_count(what: &str, s: &str) -> Result<usize> {
    let count = sequence::parse_count(what, s)?;
    Ok(count)
}

/// Parse a comma-separated category list, dropping empty entries
pub fn parse_categories(s: &str) -> Result<Vec<String>> {
    let categories: Vec<String> = s
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if categories.is_empty() {
        anyhow::bail!("Category list '{}' contains no names", s);
    }

    Ok(categories)
}

/// Parse a method name
pub fn parse_method(s: &str) -> Result<Method> {
    let method = s.parse::<Method>()?;
    Ok(method)
}

/// Convert CLI DirTypeArg to config DirType
pub fn convert_dir_type(arg: cli::DirTypeArg) -> DirType {
    match arg {
        cli::DirTypeArg::Parent => DirType::Parent,
        cli::DirTypeArg::Child => DirType::Child,
    }
}

/// Build configuration from CLI arguments alone
pub fn build_config_from_cli(cli: &Cli) -> Result<Config> {
    let target = cli
        .target
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Stimulus directory required"))?;

    let mut config = Config::for_stimuli(target);

    if let Some(ref categories) = cli.categories {
        config.stimuli.categories = Some(parse_categories(categories)?);
    }

    if let Some(ref subsets) = cli.subsets {
        let count = parse_count("number of subsets", subsets).context("Invalid --subsets")?;
        config.subsets = Some(SubsetConfig { count });
    }

    if let Some(ref prerands) = cli.prerands {
        let count = parse_count("number of prerandomizations", prerands).context("Invalid --prerands")?;
        let method = match cli.method {
            Some(ref name) => parse_method(name).context("Invalid --method")?,
            None => Method::default(),
        };
        config.prerands = Some(PrerandConfig { count, method });
    }

    if let Some(dir_type) = cli.dir_type {
        config.output.dir_type = convert_dir_type(dir_type);
    }
    config.output.subsets_dir = cli.subsets_dir.clone();
    config.output.prerands_dir = cli.prerands_dir.clone();
    config.output.json_summary = cli.json_summary.clone();

    config.runtime.seed = cli.seed;
    config.runtime.dry_run = cli.dry_run;
    config.runtime.debug = cli.debug;

    Ok(config)
}
