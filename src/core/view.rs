//! Per-user view state and in-flight mutation tracking.
//!
//! [`ViewState`] is what one user is looking at: the last fetched record list, the table's
//! sort configuration, the checkbox selection and the year shown in the summary. Its
//! record list is only replaced by [`ViewState::refresh`] after a successful fetch, so a
//! failed store call leaves it untouched.
//!
//! [`InFlight`] rejects a second mutation of a record while the first is still waiting on
//! the store. Guards are held across the store call and released on drop.

use crate::{
    core::{
        aggregate::{ExpenseSummary, aggregate},
        partition::{Partition, partition},
        selection::Selection,
        sort::{SortConfig, SortKey},
    },
    entities::expense,
    errors::{Error, Result},
};
use std::{
    collections::HashSet,
    fmt,
    sync::{Mutex, PoisonError},
};
use tracing::warn;

/// What one user currently sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    records: Vec<expense::Model>,
    /// Table ordering
    pub sort: SortConfig,
    /// Checked rows of the expense table
    pub selection: Selection,
    /// Year covered by the monthly summary and chart
    pub year: i32,
}

impl ViewState {
    /// A fresh view for `year`, with nothing fetched yet.
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    /// The last fetched records, in store order.
    #[must_use]
    pub fn records(&self) -> &[expense::Model] {
        &self.records
    }

    /// Replaces the record list with a fresh fetch and drops selected ids that are no
    /// longer in the expense table.
    pub fn refresh(&mut self, records: Vec<expense::Model>) {
        self.records = records;
        let displayed = self.displayed_ids();
        self.selection.retain_displayed(&displayed);
    }

    /// The three category views over the current list.
    #[must_use]
    pub fn partition(&self) -> Partition<'_> {
        partition(&self.records)
    }

    /// Regular expenses in table order.
    #[must_use]
    pub fn table(&self) -> Vec<&expense::Model> {
        self.sort.apply(&self.partition().regular)
    }

    /// Ids of the rows in the expense table, in table order.
    #[must_use]
    pub fn displayed_ids(&self) -> Vec<i64> {
        self.table().iter().map(|record| record.id).collect()
    }

    /// Stat cards and monthly breakdown for the current year.
    #[must_use]
    pub fn summary(&self) -> ExpenseSummary {
        aggregate(&self.partition().regular, self.year)
    }

    /// A click on a column header.
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort.toggle(key);
    }

    /// The "select all" checkbox.
    pub fn toggle_select_all(&mut self) {
        let displayed = self.displayed_ids();
        self.selection.toggle_all(&displayed);
    }

    /// A row checkbox. Only rows in the expense table can be selected.
    pub fn toggle_selected(&mut self, id: i64) -> Result<bool> {
        if !self.displayed_ids().contains(&id) {
            return Err(Error::ExpenseNotFound { id });
        }
        Ok(self.selection.toggle(id))
    }
}

/// What a mutation locks while it waits on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKey {
    /// An existing record, by id
    Expense(i64),
    /// An insert submitted by this user
    Insert(u64),
}

impl fmt::Display for MutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense(id) => write!(f, "Expense #{id}"),
            Self::Insert(_) => f.write_str("Your previous entry"),
        }
    }
}

/// Keys with a mutation currently waiting on the store.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: Mutex<HashSet<MutationKey>>,
}

impl InFlight {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` busy until the returned guard is dropped.
    pub fn acquire(&self, key: MutationKey) -> Result<InFlightGuard<'_>> {
        self.acquire_all(&[key])
    }

    /// Marks every key busy, or none of them if any is already busy.
    pub fn acquire_all(&self, keys: &[MutationKey]) -> Result<InFlightGuard<'_>> {
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(taken) = keys.iter().find(|key| busy.contains(key)) {
            warn!(key = %taken, "rejected overlapping mutation");
            return Err(Error::Busy {
                what: taken.to_string(),
            });
        }

        busy.extend(keys.iter().copied());
        Ok(InFlightGuard {
            owner: self,
            keys: keys.to_vec(),
        })
    }

    /// Whether `key` currently has a mutation in flight.
    #[must_use]
    pub fn is_busy(&self, key: MutationKey) -> bool {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
    }
}

/// Releases its keys when dropped.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    keys: Vec<MutationKey>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut busy = self.owner.busy.lock().unwrap_or_else(PoisonError::into_inner);
        for key in &self.keys {
            busy.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::{
            expense::{
                ExpenseCategory, ExpenseInput, create_expense, delete_expenses, get_all_expenses,
            },
            sort::SortDirection,
        },
        test_utils::*,
    };

    fn view_with(records: Vec<expense::Model>) -> ViewState {
        let mut view = ViewState::new(2024);
        view.refresh(records);
        view
    }

    #[test]
    fn test_table_only_shows_regular_expenses_in_sort_order() {
        let mut records = vec![
            sample_expense(1, "water"),
            sample_expense(2, "Cleaning"),
            sample_expense(3, "Painting"),
        ];
        records[2].is_planned = true;
        let mut view = view_with(records);

        view.sort_by(SortKey::Item);
        let items: Vec<&str> = view.table().iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, vec!["Cleaning", "water"]);

        view.sort_by(SortKey::Item);
        assert_eq!(view.sort.direction, SortDirection::Desc);
        assert_eq!(view.displayed_ids(), vec![1, 2]);
    }

    #[test]
    fn test_summary_uses_view_year() {
        let mut records = vec![sample_expense(1, "A"), sample_expense(2, "B")];
        records[0].value = Some("10".to_string());
        records[0].year = Some(2024);
        records[1].value = Some("5".to_string());
        records[1].year = Some(2023);
        let mut view = view_with(records);

        assert_eq!(view.summary().year_total, 10.0);
        view.year = 2023;
        assert_eq!(view.summary().year_total, 5.0);
        assert_eq!(view.summary().grand_total, 15.0);
    }

    #[test]
    fn test_select_all_covers_only_displayed_rows() {
        let mut records = vec![sample_expense(1, "A"), sample_expense(2, "B"), sample_expense(3, "C")];
        records[1].is_risk_item = true;
        let mut view = view_with(records);

        view.toggle_select_all();
        assert_eq!(view.selection.ids(), vec![1, 3]);

        view.toggle_select_all();
        assert!(view.selection.is_empty());
    }

    #[test]
    fn test_toggle_selected_rejects_hidden_rows() {
        let mut records = vec![sample_expense(1, "A"), sample_expense(2, "B")];
        records[1].is_planned = true;
        let mut view = view_with(records);

        assert!(view.toggle_selected(1).unwrap_or(false));
        assert!(matches!(view.toggle_selected(2), Err(Error::ExpenseNotFound { id: 2 })));
    }

    #[test]
    fn test_refresh_prunes_selection() {
        let mut view = view_with(vec![sample_expense(1, "A"), sample_expense(2, "B")]);
        view.toggle_select_all();

        view.refresh(vec![sample_expense(2, "B")]);
        assert_eq!(view.selection.ids(), vec![2]);
    }

    #[tokio::test]
    async fn test_select_all_then_delete_selection() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_expense(&db, "Water", "100").await?;
        create_test_expense(&db, "Gas", "50").await?;
        let planned = create_expense(
            &db,
            ExpenseInput::new(ExpenseCategory::Planned, "New gate", today()),
        )
        .await?;

        let mut view = ViewState::new(2024);
        view.refresh(get_all_expenses(&db).await?);
        view.toggle_select_all();
        let selected = view.selection.ids();
        assert_eq!(selected.len(), 2);

        let deleted = delete_expenses(&db, &selected).await?;
        assert_eq!(deleted, 2);
        view.refresh(get_all_expenses(&db).await?);

        assert!(view.selection.is_empty());
        let remaining: Vec<i64> = view.records().iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![planned.id]);
        Ok(())
    }

    #[test]
    fn test_in_flight_rejects_overlap() {
        let in_flight = InFlight::new();

        let guard = in_flight.acquire(MutationKey::Expense(7));
        assert!(guard.is_ok());
        assert!(in_flight.is_busy(MutationKey::Expense(7)));
        assert!(matches!(
            in_flight.acquire(MutationKey::Expense(7)),
            Err(Error::Busy { .. })
        ));
        assert!(in_flight.acquire(MutationKey::Expense(8)).is_ok());
        assert!(in_flight.acquire(MutationKey::Insert(7)).is_ok());

        drop(guard);
        assert!(!in_flight.is_busy(MutationKey::Expense(7)));
        assert!(in_flight.acquire(MutationKey::Expense(7)).is_ok());
    }

    #[test]
    fn test_in_flight_acquire_all_is_all_or_nothing() {
        let in_flight = InFlight::new();
        let _held = in_flight.acquire(MutationKey::Expense(2));

        let keys = [1, 2, 3].map(MutationKey::Expense);
        let Err(Error::Busy { what }) = in_flight.acquire_all(&keys) else {
            panic!("expected a busy error");
        };
        assert_eq!(what, "Expense #2");
        assert!(!in_flight.is_busy(MutationKey::Expense(1)));
        assert!(!in_flight.is_busy(MutationKey::Expense(3)));

        let batch = in_flight.acquire_all(&[MutationKey::Expense(1), MutationKey::Expense(3)]);
        assert!(batch.is_ok());
        assert!(in_flight.is_busy(MutationKey::Expense(1)));
        assert!(in_flight.is_busy(MutationKey::Expense(3)));
    }
}
