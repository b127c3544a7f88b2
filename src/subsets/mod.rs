//! Balanced subsets
//!
//! Splits a categorized stimulus set into `n` subsets of equal size, each
//! holding the same number of files from every category. Files are drawn at
//! random within each category.

use crate::error::{StimError, StimResult};
use crate::output::list::{subset_file_name, write_stim_list};
use crate::output::summary::SubsetRecord;
use crate::stimuli::{group_by_category, StimulusSet};
use crate::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;
use tracing::{debug, info};

/// Split `files` into `set_num` balanced subsets
///
/// Every subset holds `files.len() / set_num` files, an equal share of each
/// category, grouped by category in category order.
pub fn split_into_subsets<R: Rng + ?Sized, S: AsRef<str>>(
    rng: &mut R,
    files: &[String],
    categories: &[S],
    set_num: usize,
) -> StimResult<Vec<Vec<String>>> {
    if set_num == 0 {
        return Err(StimError::invalid("number of subsets must be at least 1"));
    }
    if categories.is_empty() {
        return Err(StimError::invalid("cannot balance subsets without categories"));
    }

    if files.len() % set_num != 0 {
        return Err(StimError::impossible(format!(
            "It is not possible to equally divide {} stimuli into {} sets, {} files would be remaining",
            files.len(),
            set_num,
            files.len() % set_num
        )));
    }

    let files_per_set = files.len() / set_num;
    if files_per_set % categories.len() != 0 {
        return Err(StimError::impossible(format!(
            "It is not possible to keep the same number of files per category for {} categories, \
             {} files per set would be remaining",
            categories.len(),
            files_per_set % categories.len()
        )));
    }
    let per_cat_per_set = files_per_set / categories.len();

    let groups = group_by_category(files, categories)?;
    for (category, group) in categories.iter().zip(&groups) {
        if group.len() != per_cat_per_set * set_num {
            return Err(StimError::impossible(format!(
                "category '{}' has {} files, every category needs {}",
                category.as_ref(),
                group.len(),
                per_cat_per_set * set_num
            )));
        }
    }

    let mut subsets: Vec<Vec<String>> = vec![Vec::with_capacity(files_per_set); set_num];
    for mut group in groups {
        group.shuffle(rng);
        for (subset, chunk) in subsets.iter_mut().zip(group.chunks(per_cat_per_set)) {
            subset.extend_from_slice(chunk);
        }
    }

    Ok(subsets)
}

/// Split a stimulus set and write one list per subset into `out_dir`
pub fn create_subsets<R: Rng + ?Sized>(
    rng: &mut R,
    stimuli: &StimulusSet,
    set_num: usize,
    out_dir: &Path,
) -> Result<Vec<SubsetRecord>> {
    let categories = stimuli.require_categories()?;
    let files = stimuli.list_files()?;
    debug!(files = files.len(), set_num, "splitting stimuli into subsets");

    let subsets = split_into_subsets(rng, &files, categories, set_num)?;

    let mut records = Vec::with_capacity(subsets.len());
    for (i, subset) in subsets.iter().enumerate() {
        let index = i + 1;
        let path = out_dir.join(subset_file_name(index));
        write_stim_list(&path, subset)?;
        records.push(SubsetRecord {
            index,
            path,
            items: subset.len(),
        });
    }

    info!(count = records.len(), dir = %out_dir.display(), "created subsets");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::list::read_subset_dir;
    use crate::stimuli::category_of;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::collections::HashSet;
    use std::fs;

    const CATEGORIES: [&str; 3] = ["animal", "human", "nature"];

    fn categorized(per_cat: usize) -> Vec<String> {
        CATEGORIES
            .iter()
            .flat_map(|c| (0..per_cat).map(move |i| format!("{}_{:02}.wav", c, i)))
            .collect()
    }

    #[test]
    fn test_split_balanced() {
        let files = categorized(48);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let subsets = split_into_subsets(&mut rng, &files, &CATEGORIES, 4).unwrap();

        assert_eq!(subsets.len(), 4);
        let mut seen = HashSet::new();
        for subset in &subsets {
            assert_eq!(subset.len(), 36);
            for category in 0..CATEGORIES.len() {
                let count = subset
                    .iter()
                    .filter(|f| category_of(f, &CATEGORIES) == Some(category))
                    .count();
                assert_eq!(count, 12);
            }
            seen.extend(subset.iter().cloned());
        }
        assert_eq!(seen.len(), files.len());
    }

    #[test]
    fn test_split_uneven_sets() {
        let files = categorized(10);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);

        assert!(matches!(
            split_into_subsets(&mut rng, &files, &CATEGORIES, 7),
            Err(StimError::ImpossibleConstraint(_))
        ));
    }

    #[test]
    fn test_split_uneven_categories_per_set() {
        // 15 sets of 2 cannot hold 3 categories evenly
        let files = categorized(10);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);

        assert!(split_into_subsets(&mut rng, &files, &CATEGORIES, 10).is_ok());
        assert!(matches!(
            split_into_subsets(&mut rng, &files, &CATEGORIES, 15),
            Err(StimError::ImpossibleConstraint(_))
        ));
    }

    #[test]
    fn test_split_unbalanced_categories() {
        let mut files = categorized(4);
        files.retain(|f| f != "animal_03.wav");
        files.push("human_99.wav".to_string());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);

        assert!(matches!(
            split_into_subsets(&mut rng, &files, &CATEGORIES, 2),
            Err(StimError::ImpossibleConstraint(_))
        ));
    }

    #[test]
    fn test_split_zero_sets() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        assert!(matches!(
            split_into_subsets(&mut rng, &categorized(2), &CATEGORIES, 0),
            Err(StimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_create_subsets_writes_files() {
        let stim_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        for name in categorized(8) {
            fs::write(stim_dir.path().join(name), b"").unwrap();
        }

        let stimuli = StimulusSet::open(stim_dir.path(), None).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(6);
        let records = create_subsets(&mut rng, &stimuli, 4, out_dir.path()).unwrap();

        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.items == 6));

        let parsed = read_subset_dir(out_dir.path()).unwrap();
        assert_eq!(parsed.len(), fs::read_dir(out_dir.path()).unwrap().count());
        assert!(parsed.iter().all(|s| s.items.len() == 6));
    }

    #[test]
    fn test_create_subsets_without_categories() {
        let stim_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        for i in 0..10 {
            fs::write(stim_dir.path().join(format!("plain{}.wav", i)), b"").unwrap();
        }

        let stimuli = StimulusSet::open(stim_dir.path(), None).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let err = create_subsets(&mut rng, &stimuli, 2, out_dir.path()).unwrap_err();

        assert!(matches!(err.downcast_ref::<StimError>(), Some(StimError::NoCategories { .. })));
    }
}
