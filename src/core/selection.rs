//! Checkbox selection over the expense table.
//!
//! The selection is a set of record ids and does not care how the table is ordered.

use std::collections::HashSet;

/// Set of selected expense ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<i64>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Flips one checkbox. Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Whether every displayed id is selected (and there is at least one).
    #[must_use]
    pub fn all_selected(&self, displayed: &[i64]) -> bool {
        !displayed.is_empty() && displayed.iter().all(|id| self.ids.contains(id))
    }

    /// The "select all" header checkbox: clears the selection when everything displayed is
    /// already selected, otherwise selects exactly the displayed ids.
    pub fn toggle_all(&mut self, displayed: &[i64]) {
        if self.all_selected(displayed) {
            self.ids.clear();
        } else {
            self.ids = displayed.iter().copied().collect();
        }
    }

    /// Drops ids that are no longer displayed, e.g. after a re-fetch.
    pub fn retain_displayed(&mut self, displayed: &[i64]) {
        let displayed: HashSet<i64> = displayed.iter().copied().collect();
        self.ids.retain(|id| displayed.contains(id));
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
