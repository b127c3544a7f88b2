//! Identifier list files
//!
//! Lists are plain text: one identifier per line, no header. Experiment
//! software reads them row by row, so the order of lines is the
//! presentation order.
//!
//! File names are deterministic:
//! - `subset_{s}.tsv` for subset `s`
//! - `prerand_{p}.tsv` for prerandomization `p` of the whole stimulus set
//! - `subset_{s}_prerand_{p}.tsv` for prerandomization `p` of subset `s`
//!
//! Indices start at 1.

use crate::Result;
use anyhow::Context;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const LIST_EXTENSION: &str = "tsv";

/// File name for subset `index`
pub fn subset_file_name(index: usize) -> String {
    format!("subset_{}.{}", index, LIST_EXTENSION)
}

/// File name for prerandomization `index`, optionally of a subset
pub fn prerand_file_name(subset: Option<usize>, index: usize) -> String {
    match subset {
        Some(s) => format!("subset_{}_prerand_{}.{}", s, index, LIST_EXTENSION),
        None => format!("prerand_{}.{}", index, LIST_EXTENSION),
    }
}

/// Subset index encoded in a subset file name
pub fn parse_subset_file_name(name: &str) -> Option<usize> {
    name.strip_prefix("subset_")?
        .strip_suffix(&format!(".{}", LIST_EXTENSION))?
        .parse()
        .ok()
}

/// Write identifiers one per line
pub fn write_stim_list<S: AsRef<str>>(path: &Path, items: &[S]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create list file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for item in items {
        writeln!(writer, "{}", item.as_ref())
            .with_context(|| format!("Failed to write list file: {}", path.display()))?;
    }

    writer.flush()
        .with_context(|| format!("Failed to write list file: {}", path.display()))?;
    Ok(())
}

/// Read a list file, ignoring blank lines
pub fn read_stim_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read list file: {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// A subset list read back from disk
#[derive(Debug, Clone)]
pub struct SubsetList {
    pub index: usize,
    pub path: PathBuf,
    pub items: Vec<String>,
}

/// Read every `subset_{s}.tsv` in `dir`, ordered by subset index
///
/// Other files (including prerandomizations of subsets) are ignored.
pub fn read_subset_dir(dir: &Path) -> Result<Vec<SubsetList>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read subset directory: {}", dir.display()))?;

    let mut subsets = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        // Subset lists always have ASCII names
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };

        if let Some(index) = parse_subset_file_name(&name) {
            let path = entry.path();
            let items = read_stim_list(&path)?;
            subsets.push(SubsetList { index, path, items });
        }
    }

    subsets.sort_by_key(|s| s.index);
    Ok(subsets)
}
