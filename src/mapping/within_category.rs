//! Within-category position shuffler
//!
//! Items sit in `K` blocks of `len / K` positions, block `c` holding
//! category `c`. Every slot of the label sequence labelled `c` draws,
//! without replacement, from a shuffled copy of block `c`'s range. The
//! category pattern is kept while the item filling each slot is random.

use crate::error::{StimError, StimResult};
use crate::sequence::LabelSequence;
use rand::seq::SliceRandom;
use rand::Rng;

/// Assign a random item position to every slot of `labels`
///
/// The result is a permutation of `0..labels.len()`; slot `i` receives a
/// position inside the block of category `labels[i]`.
pub fn shuffle_positions<R: Rng + ?Sized>(rng: &mut R, labels: &LabelSequence) -> StimResult<Vec<usize>> {
    shuffle_label_slice(rng, labels.labels(), labels.num_categories())
}

/// Slice form of [`shuffle_positions`] for labels built outside this crate
///
/// Checks the contiguous-block precondition before drawing anything.
pub fn shuffle_label_slice<R: Rng + ?Sized>(
    rng: &mut R,
    labels: &[usize],
    num_categories: usize,
) -> StimResult<Vec<usize>> {
    if num_categories == 0 {
        return Err(StimError::invalid("number of categories must be at least 1"));
    }
    if labels.len() % num_categories != 0 {
        return Err(StimError::invalid(format!(
            "{} labels cannot be split into {} equal blocks",
            labels.len(),
            num_categories
        )));
    }

    let stim_per_cat = labels.len() / num_categories;

    let mut blocks: Vec<Vec<usize>> = (0..num_categories)
        .map(|c| {
            let mut block: Vec<usize> = (c * stim_per_cat..(c + 1) * stim_per_cat).collect();
            block.shuffle(rng);
            block
        })
        .collect();

    let mut assignment = Vec::with_capacity(labels.len());
    for (slot, &label) in labels.iter().enumerate() {
        let block = blocks.get_mut(label).ok_or_else(|| {
            StimError::invalid(format!(
                "label {} at slot {} is outside 0..{}",
                label, slot, num_categories
            ))
        })?;
        let position = block.pop().ok_or_else(|| {
            StimError::invalid(format!(
                "category {} occurs more than {} times",
                label, stim_per_cat
            ))
        })?;
        assignment.push(position);
    }

    Ok(assignment)
}
