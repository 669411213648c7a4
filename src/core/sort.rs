//! Table ordering for regular expenses.
//!
//! [`sort_expenses`] is a pure, stable sort over borrowed records. [`SortConfig`] carries
//! the column-header state: choosing the active column again flips the direction, any
//! other column starts ascending.

use crate::{
    core::coerce::{coerce_int, coerce_value},
    entities::expense,
};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Columns the expense table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Creation time (the store's default order)
    #[default]
    CreatedAt,
    /// Paid/pending
    Status,
    /// Item name
    Item,
    /// Amount, compared numerically
    Value,
    /// Periodicity label
    Periodicity,
    /// Month number
    Month,
    /// Year number
    Year,
    /// Maintenance date
    MaintenanceDate,
}

impl SortKey {
    /// Every key, in table column order.
    pub const ALL: [Self; 8] = [
        Self::CreatedAt,
        Self::Status,
        Self::Item,
        Self::Value,
        Self::Periodicity,
        Self::Month,
        Self::Year,
        Self::MaintenanceDate,
    ];

    /// Store field name of the column.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Status => "status",
            Self::Item => "item",
            Self::Value => "value",
            Self::Periodicity => "periodicity",
            Self::Month => "month",
            Self::Year => "year",
            Self::MaintenanceDate => "maintenance_date",
        }
    }

    /// Compares two records on this column, ascending.
    #[must_use]
    pub fn compare(self, a: &expense::Model, b: &expense::Model) -> Ordering {
        match self {
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::Status => u8::from(a.status).cmp(&u8::from(b.status)),
            Self::Value => coerce_value(a.value.as_deref())
                .total_cmp(&coerce_value(b.value.as_deref())),
            Self::Month => coerce_int(a.month).cmp(&coerce_int(b.month)),
            Self::Year => coerce_int(a.year).cmp(&coerce_int(b.year)),
            Self::Item => compare_text(Some(&a.item), Some(&b.item)),
            Self::Periodicity => {
                compare_text(a.periodicity.as_deref(), b.periodicity.as_deref())
            }
            Self::MaintenanceDate => compare_text(
                a.maintenance_date.map(|d| d.to_string()).as_deref(),
                b.maintenance_date.map(|d| d.to_string()).as_deref(),
            ),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for SortKey {
    type Err = crate::errors::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.field_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| crate::errors::Error::validation(format!("Unknown sort column '{s}'")))
    }
}

/// Ascending or descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Arrow shown next to the active column.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Current column-header state of the expense table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    /// Active column
    pub key: SortKey,
    /// Active direction
    pub direction: SortDirection,
}

impl SortConfig {
    /// Applies a header click: the active key flips direction, a new key starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }

    /// Orders `records` according to this configuration.
    #[must_use]
    pub fn apply<'a>(&self, records: &[&'a expense::Model]) -> Vec<&'a expense::Model> {
        sort_expenses(records, self.key, self.direction)
    }
}

/// Returns `records` ordered by `key` in `direction`.
///
/// The sort is stable: ties keep their input order, so applying the same key and
/// direction twice yields the same list.
#[must_use]
pub fn sort_expenses<'a>(
    records: &[&'a expense::Model],
    key: SortKey,
    direction: SortDirection,
) -> Vec<&'a expense::Model> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = key.compare(a, b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// Case-insensitive text comparison; missing text sorts as the empty string.
fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.unwrap_or_default().to_lowercase();
    let b = b.unwrap_or_default().to_lowercase();
    a.cmp(&b)
}
