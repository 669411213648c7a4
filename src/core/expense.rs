//! Expense business logic - the record store operations.
//!
//! Provides fetch-all, insert, update-by-id, delete-by-id and delete-by-id-set over the
//! `expenses` table, plus status toggling and duplication built on top of them. Input is
//! validated before the store is contacted: an empty `item`, a month outside 1-12 or a
//! malformed date never reach the database. The amount is stored exactly as typed.
//! All functions are async and return Result types for error handling.

use crate::{
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use std::{fmt, str::FromStr};
use tracing::{debug, info};

/// Date format accepted for maintenance dates and deadlines.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which of the three views a record is written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    /// Ordinary expense, aggregated into totals
    #[default]
    Regular,
    /// Planned item, not yet carried out
    Planned,
    /// Risk register entry
    Risk,
}

impl ExpenseCategory {
    /// The stored `(is_planned, is_risk_item)` flags for this category.
    #[must_use]
    pub const fn flags(self) -> (bool, bool) {
        match self {
            Self::Regular => (false, false),
            Self::Planned => (true, false),
            Self::Risk => (false, true),
        }
    }

    /// Whether `record` shows up in this category's view.
    #[must_use]
    pub const fn includes(self, record: &expense::Model) -> bool {
        match self {
            Self::Regular => !record.is_planned && !record.is_risk_item,
            Self::Planned => record.is_planned,
            Self::Risk => record.is_risk_item,
        }
    }

    /// Lower-case name used in messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Regular => "expense",
            Self::Planned => "planned item",
            Self::Risk => "risk item",
        }
    }
}

/// How often an expense recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Periodicity {
    /// Every month
    Monthly,
    /// Every two months
    Bimonthly,
    /// Every three months
    Quarterly,
    /// Twice a year
    Semiannual,
    /// Once a year
    Annual,
    /// Does not recur
    OneTime,
}

impl Periodicity {
    /// Every periodicity, shortest interval first.
    pub const ALL: [Self; 6] = [
        Self::Monthly,
        Self::Bimonthly,
        Self::Quarterly,
        Self::Semiannual,
        Self::Annual,
        Self::OneTime,
    ];

    /// The label stored in the `periodicity` column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Bimonthly => "Bimonthly",
            Self::Quarterly => "Quarterly",
            Self::Semiannual => "Semiannual",
            Self::Annual => "Annual",
            Self::OneTime => "One-time",
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Periodicity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::validation(format!("Unknown periodicity '{s}'")))
    }
}

/// A new record as entered in one of the forms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpenseInput {
    /// Target view; decides the stored category flags
    pub category: ExpenseCategory,
    /// Required display name
    pub item: String,
    /// Amount as typed
    pub value: Option<String>,
    /// Recurrence
    pub periodicity: Option<Periodicity>,
    /// Month, 1-12
    pub month: Option<i32>,
    /// Year
    pub year: Option<i32>,
    /// Paid (or completed, for planned items)
    pub status: bool,
    /// Informational maintenance date
    pub maintenance_date: Option<NaiveDate>,
    /// Informational deadline
    pub deadline: Option<NaiveDate>,
    /// Observation
    pub obs: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Law or regulation
    pub law: Option<String>,
    /// Risk classification
    pub risk_type: Option<String>,
}

impl ExpenseInput {
    /// Form defaults: the given category and item, dated to `today`, pending.
    ///
    /// Risk items carry no amount, so their value is fixed at `"0"`.
    #[must_use]
    pub fn new(category: ExpenseCategory, item: impl Into<String>, today: NaiveDate) -> Self {
        let value = (category == ExpenseCategory::Risk).then(|| "0".to_string());
        Self {
            category,
            item: item.into(),
            value,
            month: Some(month_of(today)),
            year: Some(today.year()),
            ..Default::default()
        }
    }
}

/// Changes applied by an edit. `None` leaves a field untouched; an empty string clears
/// an optional text field; `Some(None)` clears a date or the periodicity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpensePatch {
    /// New display name, must not be empty
    pub item: Option<String>,
    /// New amount text
    pub value: Option<String>,
    /// New or cleared recurrence
    pub periodicity: Option<Option<Periodicity>>,
    /// New month, 1-12
    pub month: Option<i32>,
    /// New year
    pub year: Option<i32>,
    /// New paid flag
    pub status: Option<bool>,
    /// New or cleared maintenance date
    pub maintenance_date: Option<Option<NaiveDate>>,
    /// New or cleared deadline
    pub deadline: Option<Option<NaiveDate>>,
    /// New observation
    pub obs: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New law reference
    pub law: Option<String>,
    /// New risk classification
    pub risk_type: Option<String>,
}

impl ExpensePatch {
    /// The fields every save from a category's form rewrites: planned and risk items are
    /// re-dated to `today`, and risk items keep a zero amount.
    #[must_use]
    pub fn category_defaults(category: ExpenseCategory, today: NaiveDate) -> Self {
        match category {
            ExpenseCategory::Regular => Self::default(),
            ExpenseCategory::Planned => Self {
                month: Some(month_of(today)),
                year: Some(today.year()),
                ..Default::default()
            },
            ExpenseCategory::Risk => Self {
                value: Some("0".to_string()),
                month: Some(month_of(today)),
                year: Some(today.year()),
                ..Default::default()
            },
        }
    }

    /// Fills every field this patch leaves untouched from `defaults`.
    #[must_use]
    pub fn or(self, defaults: Self) -> Self {
        Self {
            item: self.item.or(defaults.item),
            value: self.value.or(defaults.value),
            periodicity: self.periodicity.or(defaults.periodicity),
            month: self.month.or(defaults.month),
            year: self.year.or(defaults.year),
            status: self.status.or(defaults.status),
            maintenance_date: self.maintenance_date.or(defaults.maintenance_date),
            deadline: self.deadline.or(defaults.deadline),
            obs: self.obs.or(defaults.obs),
            description: self.description.or(defaults.description),
            law: self.law.or(defaults.law),
            risk_type: self.risk_type.or(defaults.risk_type),
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(self, active: &mut expense::ActiveModel) -> Result<()> {
        if let Some(item) = self.item {
            active.item = Set(validate_item(&item)?);
        }
        if let Some(value) = self.value {
            active.value = Set(normalize_text(Some(value)));
        }
        if let Some(periodicity) = self.periodicity {
            active.periodicity = Set(periodicity.map(|p| p.label().to_string()));
        }
        if let Some(month) = self.month {
            active.month = Set(validate_month(Some(month))?);
        }
        if let Some(year) = self.year {
            active.year = Set(Some(year));
        }
        if let Some(status) = self.status {
            active.status = Set(status);
        }
        if let Some(date) = self.maintenance_date {
            active.maintenance_date = Set(date);
        }
        if let Some(date) = self.deadline {
            active.deadline = Set(date);
        }
        if let Some(obs) = self.obs {
            active.obs = Set(normalize_text(Some(obs)));
        }
        if let Some(description) = self.description {
            active.description = Set(normalize_text(Some(description)));
        }
        if let Some(law) = self.law {
            active.law = Set(normalize_text(Some(law)));
        }
        if let Some(risk_type) = self.risk_type {
            active.risk_type = Set(normalize_text(Some(risk_type)));
        }
        Ok(())
    }
}

/// Checks the one required field and returns it trimmed.
pub fn validate_item(item: &str) -> Result<String> {
    let trimmed = item.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Item is required"));
    }
    Ok(trimmed.to_string())
}

/// Accepts a missing month or one in 1-12.
pub fn validate_month(month: Option<i32>) -> Result<Option<i32>> {
    match month {
        Some(m) if !(1..=12).contains(&m) => Err(Error::validation(format!(
            "Month must be between 1 and 12, got {m}"
        ))),
        other => Ok(other),
    }
}

/// Parses a `YYYY-MM-DD` date. Blank input or `-` means "no date".
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|e| Error::validation(format!("Invalid date '{trimmed}' (expected YYYY-MM-DD): {e}")))
}

/// Trims optional free text; blank text becomes `None`.
#[must_use]
pub fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn month_of(date: NaiveDate) -> i32 {
    // month() is 1-12, always representable
    i32::try_from(date.month()).unwrap_or(1)
}

/// Retrieves every record, newest first (ties broken by id, newest first).
///
/// This is the full re-fetch performed after every mutation.
pub async fn get_all_expenses(db: &DatabaseConnection) -> Result<Vec<expense::Model>> {
    let records = Expense::find()
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await?;
    debug!(count = records.len(), "fetched expenses");
    Ok(records)
}

/// Finds a record by id, returning None if it does not exist.
pub async fn get_expense_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<expense::Model>> {
    Expense::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds a record by id and checks it belongs to `category`'s view.
///
/// Keeps the planned and risk forms from editing records of another view.
pub async fn get_expense_in_category(
    db: &DatabaseConnection,
    id: i64,
    category: ExpenseCategory,
) -> Result<expense::Model> {
    let record = get_expense_by_id(db, id)
        .await?
        .ok_or(Error::ExpenseNotFound { id })?;

    if !category.includes(&record) {
        return Err(Error::validation(format!("#{id} is not a {}", category.noun())));
    }
    Ok(record)
}

/// Counts stored records of every category.
pub async fn count_expenses(db: &DatabaseConnection) -> Result<u64> {
    Expense::find().count(db).await.map_err(Into::into)
}

/// Validates `input` and inserts it. The store assigns `id` and `created_at`.
pub async fn create_expense(db: &DatabaseConnection, input: ExpenseInput) -> Result<expense::Model> {
    let item = validate_item(&input.item)?;
    let month = validate_month(input.month)?;
    let (is_planned, is_risk_item) = input.category.flags();

    let record = expense::ActiveModel {
        item: Set(item),
        value: Set(normalize_text(input.value)),
        periodicity: Set(input.periodicity.map(|p| p.label().to_string())),
        month: Set(month),
        year: Set(input.year),
        status: Set(input.status),
        maintenance_date: Set(input.maintenance_date),
        deadline: Set(input.deadline),
        obs: Set(normalize_text(input.obs)),
        description: Set(normalize_text(input.description)),
        law: Set(normalize_text(input.law)),
        risk_type: Set(normalize_text(input.risk_type)),
        is_planned: Set(is_planned),
        is_risk_item: Set(is_risk_item),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let created = record.insert(db).await?;
    info!(id = created.id, item = %created.item, category = ?input.category, "expense created");
    Ok(created)
}

/// Applies `patch` to the record with `id`.
///
/// Validation happens before the lookup, so a bad patch never touches the store.
pub async fn update_expense(
    db: &DatabaseConnection,
    id: i64,
    patch: ExpensePatch,
) -> Result<expense::Model> {
    if let Some(item) = &patch.item {
        validate_item(item)?;
    }
    validate_month(patch.month)?;

    let existing = Expense::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::ExpenseNotFound { id })?;

    let mut active: expense::ActiveModel = existing.into();
    patch.apply(&mut active)?;
    let updated = active.update(db).await?;

    info!(id, "expense updated");
    Ok(updated)
}

/// Flips paid/pending on one record.
pub async fn toggle_expense_status(db: &DatabaseConnection, id: i64) -> Result<expense::Model> {
    let existing = Expense::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::ExpenseNotFound { id })?;

    let new_status = !existing.status;
    let mut active: expense::ActiveModel = existing.into();
    active.status = Set(new_status);
    let updated = active.update(db).await?;

    info!(id, status = new_status, "expense status toggled");
    Ok(updated)
}

/// Inserts a copy of the record with `id`. The copy gets a fresh id and creation time and
/// starts out pending; every other field is carried over.
pub async fn duplicate_expense(db: &DatabaseConnection, id: i64) -> Result<expense::Model> {
    let source = Expense::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::ExpenseNotFound { id })?;

    let copy = expense::ActiveModel {
        item: Set(source.item),
        value: Set(source.value),
        periodicity: Set(source.periodicity),
        month: Set(source.month),
        year: Set(source.year),
        status: Set(false),
        maintenance_date: Set(source.maintenance_date),
        deadline: Set(source.deadline),
        obs: Set(source.obs),
        description: Set(source.description),
        law: Set(source.law),
        risk_type: Set(source.risk_type),
        is_planned: Set(source.is_planned),
        is_risk_item: Set(source.is_risk_item),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let created = copy.insert(db).await?;
    info!(source = id, id = created.id, "expense duplicated");
    Ok(created)
}

/// Deletes one record.
pub async fn delete_expense(db: &DatabaseConnection, id: i64) -> Result<()> {
    let result = Expense::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ExpenseNotFound { id });
    }
    info!(id, "expense deleted");
    Ok(())
}

/// Deletes every record whose id is in `ids` and returns how many rows went away.
/// Ids that do not exist are ignored.
pub async fn delete_expenses(db: &DatabaseConnection, ids: &[i64]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = Expense::delete_many()
        .filter(expense::Column::Id.is_in(ids.iter().copied()))
        .exec(db)
        .await?;

    info!(requested = ids.len(), deleted = result.rows_affected, "expenses bulk deleted");
    Ok(result.rows_affected)
}
