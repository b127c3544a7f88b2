//! Position to file lookup
//!
//! The file list must already be grouped so that every run of
//! `files.len() / categories.len()` entries belongs to one category, in the
//! same order as the category list. Category membership is implied by the
//! block a position falls in and is not stored.

use crate::error::{StimError, StimResult};

/// Dense mapping from item position to identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIndex {
    files: Vec<String>,
    block_size: usize,
}

/// Build the index for `files` grouped by `categories`
pub fn build_index<S: AsRef<str>>(categories: &[S], files: &[String]) -> StimResult<FileIndex> {
    if categories.is_empty() {
        return Err(StimError::invalid("cannot index files without categories"));
    }
    if files.len() % categories.len() != 0 {
        return Err(StimError::invalid(format!(
            "{} files cannot be split into {} equal category blocks",
            files.len(),
            categories.len()
        )));
    }

    Ok(FileIndex {
        files: files.to_vec(),
        block_size: files.len() / categories.len(),
    })
}

impl FileIndex {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.files.get(position).map(String::as_str)
    }

    /// Items per category block
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Turn a position assignment into the final ordering
    ///
    /// `ordering[i] = index[assignment[i]]`.
    pub fn resolve(&self, assignment: &[usize]) -> StimResult<Vec<String>> {
        assignment
            .iter()
            .map(|&position| {
                self.get(position).map(str::to_owned).ok_or_else(|| {
                    StimError::invalid(format!(
                        "position {} is outside an index of {} files",
                        position,
                        self.files.len()
                    ))
                })
            })
            .collect()
    }
}
