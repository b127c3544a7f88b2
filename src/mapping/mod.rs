//! Mapping category labels onto concrete items
//!
//! A [`LabelSequence`](crate::sequence::LabelSequence) fixes which category
//! fills each slot. The shuffler decides which item of that category goes
//! there, and the file index turns the chosen item positions back into
//! identifiers:
//!
//! ```text
//! labels ──shuffle_positions──▶ assignment ──FileIndex::resolve──▶ ordering
//! ```
//!
//! Both steps rely on items being grouped in contiguous, equally sized
//! blocks, one block per category in category order.

pub mod file_index;
pub mod within_category;

pub use file_index::{build_index, FileIndex};
pub use within_category::shuffle_positions;
