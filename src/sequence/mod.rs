//! Category label sequence generation
//!
//! A label sequence describes a presentation order at the category level:
//! `K * E` entries, each one a category index in `0..K`, every category
//! appearing exactly `E` times. The constrained prerandomization modes need
//! sequences in which no two neighbouring entries share a category.
//!
//! # Generators
//!
//! - **Local swap** ("pseudo-constrained"): one shuffled chunk per round,
//!   with a swap at the chunk boundary when it would repeat a category
//! - **Weighted sampling** ("pure-constrained"): element-by-element weighted
//!   draws that exclude the previous category, plus a repair pass
//!
//! Items are later mapped onto the sequence by
//! [`crate::mapping::within_category`], so a generator never sees file names.
//!
//! # Example
//!
//! ```
//! use stimrand::sequence::{LabelGenerator, weighted::WeightedSamplingGenerator};
//!
//! let mut generator = WeightedSamplingGenerator::with_seed(7);
//! let labels = generator.generate(3, 4).unwrap();
//! assert_eq!(labels.len(), 12);
//! assert_eq!(labels.adjacent_repeats(), 0);
//! ```

use crate::error::{StimError, StimResult};

pub mod local_swap;
pub mod weighted;

/// Generator of category label sequences
///
/// Implementations own their random source so a seeded generator always
/// reproduces the same sequences.
pub trait LabelGenerator: Send {
    /// Generate a sequence of `num_categories * elements` labels
    ///
    /// Fails with [`StimError::InvalidArgument`] when `num_categories < 2`
    /// or `elements < 1`. Validation happens before any random draw.
    fn generate(&mut self, num_categories: usize, elements: usize) -> StimResult<LabelSequence>;

    /// Short name used in logs and run summaries
    fn name(&self) -> &'static str;
}

/// Validated category count and items per category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCounts {
    pub num_categories: usize,
    pub elements: usize,
}

impl CategoryCounts {
    /// Validate counts for a constrained sequence
    ///
    /// At least two categories are needed for a swap target (local swap) or
    /// an alternative draw (weighted sampling).
    pub fn new(num_categories: usize, elements: usize) -> StimResult<Self> {
        if num_categories < 2 {
            return Err(StimError::invalid(format!(
                "number of categories must be at least 2, got {}",
                num_categories
            )));
        }
        if elements < 1 {
            return Err(StimError::invalid(format!(
                "elements per category must be at least 1, got {}",
                elements
            )));
        }
        num_categories.checked_mul(elements).ok_or_else(|| {
            StimError::invalid(format!(
                "{} categories x {} elements overflows the sequence length",
                num_categories, elements
            ))
        })?;

        Ok(Self { num_categories, elements })
    }

    /// Parse counts from their textual form
    ///
    /// Anything that is not a plain positive integer is rejected, so `"ten"`
    /// or `"2.5"` never reach a generator.
    pub fn parse(num_categories: &str, elements: &str) -> StimResult<Self> {
        let k = parse_count("number of categories", num_categories)?;
        let e = parse_count("elements per category", elements)?;
        Self::new(k, e)
    }

    /// Total sequence length
    pub fn total(&self) -> usize {
        self.num_categories * self.elements
    }
}

/// Parse a strictly positive integer count
///
/// `what` names the argument in the error message.
pub fn parse_count(what: &str, s: &str) -> StimResult<usize> {
    let trimmed = s.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StimError::invalid(format!(
            "{} must be a positive integer, got '{}'",
            what, s
        )));
    }
    let value: usize = trimmed.parse().map_err(|_| {
        StimError::invalid(format!("{} is out of range: '{}'", what, s))
    })?;
    if value == 0 {
        return Err(StimError::invalid(format!("{} must be at least 1", what)));
    }
    Ok(value)
}

/// Ordered category labels with their shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSequence {
    labels: Vec<usize>,
    num_categories: usize,
}

impl LabelSequence {
    pub(crate) fn from_generated(labels: Vec<usize>, counts: CategoryCounts) -> Self {
        debug_assert_eq!(labels.len(), counts.total());
        Self {
            labels,
            num_categories: counts.num_categories,
        }
    }

    /// Build a sequence from externally supplied labels
    ///
    /// Labels must be contiguous integers `0..num_categories`, each occurring
    /// the same number of times. Adjacency is not checked here.
    pub fn from_labels(labels: Vec<usize>, num_categories: usize) -> StimResult<Self> {
        if num_categories == 0 {
            return Err(StimError::invalid("number of categories must be at least 1"));
        }
        if labels.len() % num_categories != 0 {
            return Err(StimError::invalid(format!(
                "{} labels cannot be split evenly into {} categories",
                labels.len(),
                num_categories
            )));
        }

        let per_category = labels.len() / num_categories;
        let mut counts = vec![0usize; num_categories];
        for &label in &labels {
            if label >= num_categories {
                return Err(StimError::invalid(format!(
                    "label {} is outside 0..{}",
                    label, num_categories
                )));
            }
            counts[label] += 1;
        }
        if let Some((category, &count)) = counts
            .iter()
            .enumerate()
            .find(|(_, &count)| count != per_category)
        {
            return Err(StimError::invalid(format!(
                "category {} occurs {} times, expected {}",
                category, count, per_category
            )));
        }

        Ok(Self { labels, num_categories })
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn num_categories(&self) -> usize {
        self.num_categories
    }

    /// Items per category
    pub fn elements(&self) -> usize {
        self.labels.len() / self.num_categories
    }

    /// Number of neighbouring pairs that share a category
    pub fn adjacent_repeats(&self) -> usize {
        count_adjacent_repeats(&self.labels)
    }

    /// Occurrences of each category, indexed by category
    pub fn category_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.num_categories];
        for &label in &self.labels {
            counts[label] += 1;
        }
        counts
    }
}

/// Count neighbouring pairs with equal values
pub fn count_adjacent_repeats<T: PartialEq>(items: &[T]) -> usize {
    items.windows(2).filter(|pair| pair[0] == pair[1]).count()
}
