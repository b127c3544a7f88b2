//! Prerandomizations
//!
//! A prerandomization is one presentation order of a stimulus list, written
//! to its own file so an experiment can load it as-is. Three methods are
//! available:
//!
//! - **unconstrained**: plain shuffle of the list
//! - **pseudo-constrained**: local-swap labels, then items mapped in
//! - **pure-constrained**: weighted-sampling labels, then items mapped in
//!
//! The constrained methods run the full pipeline:
//!
//! ```text
//! group by category ─▶ label sequence ─▶ shuffle_positions ─▶ FileIndex::resolve
//! ```

use crate::config::Method;
use crate::error::{StimError, StimResult};
use crate::mapping::{build_index, shuffle_positions};
use crate::output::list::{prerand_file_name, read_subset_dir, write_stim_list};
use crate::output::summary::PrerandRecord;
use crate::sequence::local_swap::LocalSwapGenerator;
use crate::sequence::weighted::WeightedSamplingGenerator;
use crate::sequence::LabelGenerator;
use crate::stimuli::{category_of, group_by_category, StimulusSet};
use crate::Result;
use anyhow::Context;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::path::Path;
use tracing::{debug, info};

/// Produces prerandomizations from one owned random source
///
/// Both label generators are seeded from the prerandomizer's own RNG, so a
/// seeded prerandomizer reproduces every list it writes.
pub struct Prerandomizer {
    rng: Xoshiro256PlusPlus,
    local_swap: LocalSwapGenerator,
    weighted: WeightedSamplingGenerator,
}

impl Prerandomizer {
    /// Create a prerandomizer with random seed
    pub fn new() -> Self {
        Self::from_rng(Xoshiro256PlusPlus::from_entropy())
    }

    /// Create a prerandomizer with specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    fn from_rng(mut rng: Xoshiro256PlusPlus) -> Self {
        let local_swap = LocalSwapGenerator::with_seed(rng.gen());
        let weighted = WeightedSamplingGenerator::with_seed(rng.gen());
        Self { rng, local_swap, weighted }
    }

    /// Label generator for a constrained method
    fn generator(&mut self, method: Method) -> Option<&mut dyn LabelGenerator> {
        match method {
            Method::Unconstrained => None,
            Method::PseudoConstrained => Some(&mut self.local_swap),
            Method::PureConstrained => Some(&mut self.weighted),
        }
    }

    /// Sequences that needed the weighted generator's repair pass so far
    pub fn repairs(&self) -> u64 {
        self.weighted.repairs()
    }

    /// Order one list of files
    ///
    /// Constrained methods need every file to belong to one of `categories`
    /// and every category to hold the same number of files. The result
    /// holds each input file exactly once.
    pub fn prerandomize_list<S: AsRef<str>>(
        &mut self,
        files: &[String],
        categories: &[S],
        method: Method,
    ) -> StimResult<Vec<String>> {
        if !method.is_constrained() {
            let mut ordering = files.to_vec();
            ordering.shuffle(&mut self.rng);
            return Ok(ordering);
        }

        if categories.is_empty() {
            return Err(StimError::invalid(format!("{} needs categories", method)));
        }

        let groups = group_by_category(files, categories)?;
        let elements = groups[0].len();
        if let Some((category, group)) = categories
            .iter()
            .zip(&groups)
            .find(|(_, group)| group.len() != elements)
        {
            return Err(StimError::impossible(format!(
                "category '{}' has {} files but '{}' has {}; {} needs equal counts",
                category.as_ref(),
                group.len(),
                categories[0].as_ref(),
                elements,
                method
            )));
        }

        let labels = match self.generator(method) {
            Some(generator) => {
                debug!(generator = generator.name(), categories = categories.len(), elements, "generating labels");
                generator.generate(categories.len(), elements)?
            }
            None => return Err(StimError::invalid(format!("{} has no label generator", method))),
        };
        let assignment = shuffle_positions(&mut self.rng, &labels)?;

        let grouped: Vec<String> = groups.into_iter().flatten().collect();
        let index = build_index(categories, &grouped)?;
        index.resolve(&assignment)
    }

    /// Write `count` prerandomizations of every list
    ///
    /// With `subsets_dir`, each `subset_{s}.tsv` there is one list;
    /// otherwise the stimulus directory itself is the only list.
    pub fn create_prerands(
        &mut self,
        stimuli: &StimulusSet,
        subsets_dir: Option<&Path>,
        out_dir: &Path,
        count: usize,
        method: Method,
    ) -> Result<Vec<PrerandRecord>> {
        if count == 0 {
            return Err(StimError::invalid("number of prerandomizations must be at least 1").into());
        }

        // Validate before touching the lists
        let categories = method_categories(stimuli, method)?;

        let lists: Vec<(Option<usize>, Vec<String>)> = match subsets_dir {
            Some(dir) => {
                let subsets = read_subset_dir(dir)?;
                if subsets.is_empty() {
                    anyhow::bail!("No subset lists found in {}", dir.display());
                }
                subsets.into_iter().map(|s| (Some(s.index), s.items)).collect()
            }
            None => vec![(None, stimuli.list_files()?)],
        };

        let mut records = Vec::with_capacity(lists.len() * count);
        for (subset, mut files) in lists {
            files.sort();
            debug!(?subset, files = files.len(), %method, "prerandomizing list");

            for index in 1..=count {
                let ordering = self
                    .prerandomize_list(&files, categories, method)
                    .with_context(|| match subset {
                        Some(s) => format!("Failed to prerandomize subset {}", s),
                        None => format!("Failed to prerandomize {}", stimuli.path().display()),
                    })?;

                let path = out_dir.join(prerand_file_name(subset, index));
                write_stim_list(&path, &ordering)?;

                records.push(PrerandRecord {
                    subset,
                    index,
                    path,
                    items: ordering.len(),
                    adjacent_repeats: category_repeats(&ordering, categories),
                });
            }
        }

        info!(count = records.len(), %method, dir = %out_dir.display(), "created prerandomizations");
        Ok(records)
    }
}

impl Default for Prerandomizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Categories `method` works with for `stimuli`
///
/// Constrained methods need at least two categories; unconstrained ones use
/// whatever was found, possibly none.
pub fn method_categories(stimuli: &StimulusSet, method: Method) -> StimResult<&[String]> {
    if !method.is_constrained() {
        return Ok(stimuli.categories().unwrap_or(&[]));
    }

    let categories = stimuli.require_categories()?;
    if categories.len() < 2 {
        return Err(StimError::invalid(format!(
            "{} needs at least 2 categories, {} has {}",
            method,
            stimuli.path().display(),
            categories.len()
        )));
    }
    Ok(categories)
}

/// Neighbouring items that belong to the same known category
pub fn category_repeats<S: AsRef<str>>(items: &[String], categories: &[S]) -> usize {
    if categories.is_empty() {
        return 0;
    }

    let labels: Vec<Option<usize>> = items.iter().map(|item| category_of(item, categories)).collect();
    labels
        .windows(2)
        .filter(|pair| pair[0].is_some() && pair[0] == pair[1])
        .count()
}
