//! JSON run summary
//!
//! Records what a run produced so an experiment can be traced back to the
//! seed and method that built its lists.

use crate::config::Method;
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// One written subset list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsetRecord {
    pub index: usize,
    pub path: PathBuf,
    pub items: usize,
}

/// One written prerandomization list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrerandRecord {
    /// Subset the list was drawn from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subset: Option<usize>,
    pub index: usize,
    pub path: PathBuf,
    pub items: usize,
    /// Neighbouring items that share a category (0 when uncategorized)
    pub adjacent_repeats: usize,
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub stimuli: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    pub subsets: Vec<SubsetRecord>,
    pub prerands: Vec<PrerandRecord>,
}

impl RunSummary {
    pub fn new(stimuli: &Path, categories: Option<&[String]>, seed: Option<u64>) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            stimuli: stimuli.to_path_buf(),
            categories: categories.map(<[String]>::to_vec),
            seed,
            method: None,
            subsets: Vec::new(),
            prerands: Vec::new(),
        }
    }

    /// Total adjacent category repeats across all prerandomizations
    pub fn total_adjacent_repeats(&self) -> usize {
        self.prerands.iter().map(|p| p.adjacent_repeats).sum()
    }
}

/// Write the summary as pretty-printed JSON
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file: {}", path.display()))?;

    serde_json::to_writer_pretty(file, summary)
        .with_context(|| format!("Failed to write summary file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_summary() {
        let dir = tempfile::tempdir().unwrap();
        let categories = vec!["animal".to_string(), "human".to_string()];

        let mut summary = RunSummary::new(Path::new("/data/stim"), Some(&categories), Some(42));
        summary.method = Some(Method::PureConstrained);
        summary.prerands.push(PrerandRecord {
            subset: None,
            index: 1,
            path: dir.path().join("prerand_1.tsv"),
            items: 20,
            adjacent_repeats: 0,
        });

        let path = dir.path().join("summary.json");
        write_summary(&path, &summary).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["seed"], 42);
        assert_eq!(value["method"], "pure-constrained");
        assert_eq!(value["prerands"][0]["items"], 20);
        assert!(value["prerands"][0].get("subset").is_none());
        assert_eq!(value["categories"][1], "human");
    }

    #[test]
    fn test_total_adjacent_repeats() {
        let mut summary = RunSummary::new(Path::new("/x"), None, None);
        for (index, repeats) in [(1, 2), (2, 0), (3, 1)] {
            summary.prerands.push(PrerandRecord {
                subset: Some(1),
                index,
                path: PathBuf::from(format!("p{}", index)),
                items: 10,
                adjacent_repeats: repeats,
            });
        }
        assert_eq!(summary.total_adjacent_repeats(), 3);
    }
}
