//! Output files
//!
//! - [`list`]: one identifier per line, no header, used for both subsets
//!   and prerandomizations
//! - [`summary`]: optional JSON record of everything a run produced

pub mod list;
pub mod summary;

use crate::config::DirType;
use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name for subset lists
pub const SUBSETS_DIR: &str = "subsets";

/// Directory name for prerandomization lists
pub const PRERANDS_DIR: &str = "prerands";

/// Resolve and create an output directory
///
/// `explicit` wins over the path derived from `dir_type`.
pub fn prepare_output_dir(
    root: &Path,
    name: &str,
    dir_type: DirType,
    explicit: Option<&Path>,
) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir.to_path_buf(),
        None => dir_type.resolve(root, name),
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_output_dir_child() {
        let root = tempfile::tempdir().unwrap();
        let dir = prepare_output_dir(root.path(), SUBSETS_DIR, DirType::Child, None).unwrap();

        assert_eq!(dir, root.path().join("subsets"));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_prepare_output_dir_parent() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("stim");
        fs::create_dir(&root).unwrap();

        let dir = prepare_output_dir(&root, PRERANDS_DIR, DirType::Parent, None).unwrap();
        assert!(base.path().join("prerands").is_dir());
        assert!(dir.ends_with("prerands"));
    }

    #[test]
    fn test_prepare_output_dir_explicit() {
        let root = tempfile::tempdir().unwrap();
        let explicit = root.path().join("custom").join("lists");

        let dir = prepare_output_dir(root.path(), SUBSETS_DIR, DirType::Child, Some(&explicit)).unwrap();
        assert_eq!(dir, explicit);
        assert!(explicit.is_dir());
        assert!(!root.path().join("subsets").exists());
    }
}
