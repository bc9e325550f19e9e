//! Slot narrowing and re-indexing.
//!
//! Try-extract removes one slot from a union and closes the gap; every surviving
//! slot above the removed one moves down by one position.

use crate::core::types::SlotDescriptor;

/// Position of `active` after slot `removed` is taken out of the sequence.
///
/// Returns `None` when the active slot is the one being removed.
pub fn remainder_index(active: usize, removed: usize) -> Option<usize> {
    match active.cmp(&removed) {
        std::cmp::Ordering::Less => Some(active),
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some(active - 1),
    }
}

impl SlotDescriptor {
    /// The slots left after removing `removed`, keeping their original names.
    pub fn without(&self, removed: usize) -> SlotDescriptor {
        let names = self
            .names()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != removed)
            .map(|(_, name)| name.clone())
            .collect();
        SlotDescriptor::from_names(names)
    }

    /// The same slots with the parameter at `index` renamed to `replacement`.
    pub fn replaced(&self, index: usize, replacement: &str) -> SlotDescriptor {
        let names = self
            .names()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if i == index {
                    replacement.to_string()
                } else {
                    name.clone()
                }
            })
            .collect();
        SlotDescriptor::from_names(names)
    }
}
