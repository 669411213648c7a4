//! Shared test utilities for the expense tracker.
//!
//! This module provides common helper functions for setting up test databases
//! and building expense records with sensible defaults.

use crate::{
    core::expense::{ExpenseCategory, ExpenseInput, create_expense},
    entities::expense,
    errors::Result,
};
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The fixed "today" used by form defaults in tests: 2024-03-15.
#[must_use]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default()
}

/// Builds an unsaved regular expense for pure (no database) tests.
///
/// # Defaults
/// * `value`: None
/// * `month`/`year`: 3/2024
/// * `status`: pending
/// * `created_at`: 2024-03-15 12:00 UTC
#[must_use]
pub fn sample_expense(id: i64, item: &str) -> expense::Model {
    expense::Model {
        id,
        item: item.to_string(),
        value: None,
        periodicity: None,
        month: Some(3),
        year: Some(2024),
        status: false,
        maintenance_date: None,
        deadline: None,
        obs: None,
        description: None,
        law: None,
        risk_type: None,
        is_planned: false,
        is_risk_item: false,
        created_at: Utc
            .with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}

/// Inserts a regular expense with the given amount text, dated to [`today`].
pub async fn create_test_expense(
    db: &DatabaseConnection,
    item: &str,
    value: &str,
) -> Result<expense::Model> {
    let mut input = ExpenseInput::new(ExpenseCategory::Regular, item, today());
    input.value = Some(value.to_string());
    create_expense(db, input).await
}

/// Sets up a database with one regular expense already stored.
/// Returns (db, expense) for tests that need an existing record.
pub async fn setup_with_expense() -> Result<(DatabaseConnection, expense::Model)> {
    let db = setup_test_db().await?;
    let expense = create_test_expense(&db, "Elevator", "250.00").await?;
    Ok((db, expense))
}
