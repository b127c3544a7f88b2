//! Stimulus directories and their categories
//!
//! A stimulus directory is a flat folder of files. Categories are either
//! given by the user or inferred from file names of the form
//! `[category]_[rest]` (e.g. `animal_01.wav`). Output directories and
//! hidden files are never treated as stimuli.

use crate::error::{StimError, StimResult};
use crate::Result;
use anyhow::Context;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A folder of stimulus files and their category names
#[derive(Debug, Clone)]
pub struct StimulusSet {
    path: PathBuf,
    categories: Option<Vec<String>>,
}

impl StimulusSet {
    /// Open a stimulus directory
    ///
    /// User categories are sorted so they line up with the sorted file list;
    /// when none are given they are inferred with [`scan_categories`].
    pub fn open(path: impl Into<PathBuf>, categories: Option<Vec<String>>) -> Result<Self> {
        let path = path.into();

        let categories = match categories {
            Some(mut categories) if !categories.is_empty() => {
                categories.sort();
                Some(categories)
            }
            _ => scan_categories(&path)?,
        };

        debug!(path = %path.display(), ?categories, "opened stimulus set");
        Ok(Self { path, categories })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }

    /// Categories, or [`StimError::NoCategories`] for this directory
    pub fn require_categories(&self) -> StimResult<&[String]> {
        self.categories().ok_or_else(|| StimError::NoCategories {
            path: self.path.clone(),
        })
    }

    /// Sorted stimulus file names
    pub fn list_files(&self) -> Result<Vec<String>> {
        list_files(&self.path)
    }
}

/// Sorted names of the regular, non-hidden files in `dir`
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read stimulus directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let file_type = entry.file_type()
            .with_context(|| format!("Failed to stat {}", entry.path().display()))?;
        if !file_type.is_file() {
            continue;
        }

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!(name = ?raw, dir = %dir.display(), "skipping file with non-UTF-8 name");
                continue;
            }
        };
        if name.starts_with('.') {
            continue;
        }
        files.push(name);
    }

    files.sort();
    Ok(files)
}

/// Infer categories from `[category]_[rest]` file names
///
/// Returns `None` when the names do not look categorized: every file
/// yields its own category, or there are more categories than half the
/// files.
pub fn scan_categories(dir: &Path) -> Result<Option<Vec<String>>> {
    let files = list_files(dir)?;
    Ok(infer_categories(&files))
}

/// Name-only form of [`scan_categories`]
pub fn infer_categories<S: AsRef<str>>(files: &[S]) -> Option<Vec<String>> {
    let categories: BTreeSet<&str> = files
        .iter()
        .map(|f| f.as_ref().split('_').next().unwrap_or_default())
        .collect();

    if categories.len() == files.len() || categories.len() > files.len() / 2 {
        return None;
    }

    Some(categories.into_iter().map(str::to_string).collect())
}

/// Index of the category `file` belongs to
///
/// The longest matching name prefix wins, so `cat_1` goes to `cat` and
/// `cattle_1` to `cattle` when both exist.
pub fn category_of<S: AsRef<str>>(file: &str, categories: &[S]) -> Option<usize> {
    categories
        .iter()
        .enumerate()
        .filter(|(_, c)| file.starts_with(c.as_ref()))
        .max_by_key(|(_, c)| c.as_ref().len())
        .map(|(i, _)| i)
}

/// Group `files` by category, in category order
///
/// Each group is sorted. A file matching no category is an error.
pub fn group_by_category<S: AsRef<str>>(files: &[String], categories: &[S]) -> StimResult<Vec<Vec<String>>> {
    let mut groups: Vec<Vec<String>> = vec![Vec::new(); categories.len()];

    for file in files {
        let category = category_of(file, categories).ok_or_else(|| {
            StimError::invalid(format!("file '{}' matches none of the categories", file))
        })?;
        groups[category].push(file.clone());
    }

    for group in &mut groups {
        group.sort();
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_list_files_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("face_01.png"), b"").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"face_\xff.png")), b"").unwrap();

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files, vec!["face_01.png"]);
    }

    fn touch_all(dir: &Path, names: &[String]) {
        for name in names {
            fs::write(dir.join(name), b"").unwrap();
        }
    }

    fn categorized(categories: &[&str], per_cat: usize) -> Vec<String> {
        categories
            .iter()
            .flat_map(|c| (0..per_cat).map(move |i| format!("{}_{:02}.wav", c, i)))
            .collect()
    }

    #[test]
    fn test_scan_categories() {
        let dir = tempfile::tempdir().unwrap();
        touch_all(dir.path(), &categorized(&["nature", "animal", "human"], 10));

        let categories = scan_categories(dir.path()).unwrap().unwrap();
        assert_eq!(categories, vec!["animal", "human", "nature"]);
    }

    #[test]
    fn test_scan_categories_plain_files() {
        let dir = tempfile::tempdir().unwrap();
        let names: Vec<String> = (0..10).map(|i| format!("tmp{}x.wav", i)).collect();
        touch_all(dir.path(), &names);

        assert_eq!(scan_categories(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_infer_categories_too_many() {
        // 3 categories over 4 files is more than half
        let files = ["a_1", "b_1", "c_1", "c_2"];
        assert_eq!(infer_categories(&files), None);
        assert_eq!(infer_categories::<&str>(&[]), None);
    }

    #[test]
    fn test_list_files_skips_dirs_and_hidden() {
        let dir = tempfile::tempdir().unwrap();
        touch_all(dir.path(), &["b_1.wav".to_string(), "a_1.wav".to_string(), ".DS_Store".to_string()]);
        fs::create_dir(dir.path().join("subsets")).unwrap();

        assert_eq!(list_files(dir.path()).unwrap(), vec!["a_1.wav", "b_1.wav"]);
    }

    #[test]
    fn test_open_sorts_user_categories() {
        let dir = tempfile::tempdir().unwrap();
        let set = StimulusSet::open(dir.path(), Some(vec!["nature".into(), "animal".into()])).unwrap();

        assert_eq!(set.categories().unwrap(), ["animal", "nature"]);
        assert_eq!(set.path(), dir.path());
    }

    #[test]
    fn test_require_categories() {
        let dir = tempfile::tempdir().unwrap();
        let set = StimulusSet::open(dir.path(), None).unwrap();

        assert!(matches!(set.require_categories(), Err(StimError::NoCategories { .. })));
    }

    #[test]
    fn test_category_of_longest_prefix() {
        let categories = ["cat", "cattle"];
        assert_eq!(category_of("cat_01.wav", &categories), Some(0));
        assert_eq!(category_of("cattle_01.wav", &categories), Some(1));
        assert_eq!(category_of("dog_01.wav", &categories), None);
    }

    #[test]
    fn test_group_by_category() {
        let categories = ["animal", "human"];
        let files = vec![
            "human_01.wav".to_string(),
            "animal_02.wav".to_string(),
            "animal_01.wav".to_string(),
            "human_00.wav".to_string(),
        ];

        let groups = group_by_category(&files, &categories).unwrap();
        assert_eq!(groups[0], vec!["animal_01.wav", "animal_02.wav"]);
        assert_eq!(groups[1], vec!["human_00.wav", "human_01.wav"]);

        let stray = vec!["robot_01.wav".to_string()];
        assert!(matches!(
            group_by_category(&stray, &categories),
            Err(StimError::InvalidArgument(_))
        ));
    }
}
