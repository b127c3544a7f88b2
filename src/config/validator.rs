//! Configuration validation
//!
//! Everything here runs before any randomization or output, so a bad request
//! fails before a single random draw. The stimulus directory is only listed,
//! to check it carries the categories the chosen method needs.

use super::*;
use crate::error::StimError;
use crate::prerand::method_categories;
use crate::stimuli::StimulusSet;
use anyhow::{Context, Result};
use std::collections::HashSet;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_stimuli(&config.stimuli).context("Invalid [stimuli] section")?;

    if let Some(ref subsets) = config.subsets {
        if subsets.count == 0 {
            return Err(StimError::invalid("number of subsets must be at least 1"))
                .context("Invalid [subsets] section");
        }
    }

    if let Some(ref prerands) = config.prerands {
        if prerands.count == 0 {
            return Err(StimError::invalid("number of prerandomizations must be at least 1"))
                .context("Invalid [prerands] section");
        }
    }

    if config.subsets.is_none() && config.prerands.is_none() {
        anyhow::bail!("Nothing to do: configure subsets and/or prerands");
    }

    validate_output(&config.output)?;
    validate_method_categories(config)?;

    Ok(())
}

/// Check the stimuli carry the categories a constrained method needs
fn validate_method_categories(config: &Config) -> Result<()> {
    let method = match config.prerands {
        Some(ref prerands) if prerands.method.is_constrained() => prerands.method,
        _ => return Ok(()),
    };

    let stimuli = StimulusSet::open(&config.stimuli.path, config.stimuli.categories.clone())?;
    method_categories(&stimuli, method).context("Invalid [prerands] section")?;

    Ok(())
}

/// Validate stimulus directory and category names
pub fn validate_stimuli(stimuli: &StimuliConfig) -> Result<()> {
    if !stimuli.path.is_dir() {
        anyhow::bail!("Stimulus directory does not exist: {}", stimuli.path.display());
    }

    if let Some(ref categories) = stimuli.categories {
        if categories.is_empty() {
            return Err(StimError::invalid("category list is empty").into());
        }

        let mut seen = HashSet::new();
        for category in categories {
            if category.trim().is_empty() {
                return Err(StimError::invalid("category names must not be blank").into());
            }
            if !seen.insert(category.as_str()) {
                return Err(StimError::invalid(format!("category '{}' listed twice", category)).into());
            }
        }
    }

    Ok(())
}

/// Validate output placement
fn validate_output(output: &OutputConfig) -> Result<()> {
    if let (Some(subsets), Some(prerands)) = (&output.subsets_dir, &output.prerands_dir) {
        if subsets == prerands {
            anyhow::bail!(
                "subsets_dir and prerands_dir must differ, both are {}",
                subsets.display()
            );
        }
    }

    if let Some(ref path) = output.json_summary {
        if path.is_dir() {
            anyhow::bail!("json_summary must be a file path, got directory {}", path.display());
        }
    }

    Ok(())
}
