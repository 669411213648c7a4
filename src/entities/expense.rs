//! Expense entity - the single record type of the condominium ledger.
//!
//! Regular expenses, planned items and risk items all live in the `expenses` table.
//! Which view a row belongs to is decided only by `is_planned` and `is_risk_item`.
//! `value` is kept as free-form text and coerced to a number wherever it is used.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Identifier assigned by the store on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Electricity", "Elevator maintenance")
    pub item: String,
    /// Amount as entered; see [`crate::core::coerce::coerce_value`]
    pub value: Option<String>,
    /// Periodicity label (`"Monthly"`, `"Annual"`, ...) or empty
    pub periodicity: Option<String>,
    /// Month of the expense, 1-12
    pub month: Option<i32>,
    /// Year of the expense
    pub year: Option<i32>,
    /// Paid (true) or pending (false)
    pub status: bool,
    /// Informational maintenance date
    pub maintenance_date: Option<Date>,
    /// Informational deadline, used by risk items
    pub deadline: Option<Date>,
    /// Short observation
    pub obs: Option<String>,
    /// Longer description
    pub description: Option<String>,
    /// Law or regulation the expense relates to
    pub law: Option<String>,
    /// Risk classification, used by risk items
    pub risk_type: Option<String>,
    /// Item is planned but not yet carried out
    pub is_planned: bool,
    /// Item is tracked in the risk register
    pub is_risk_item: bool,
    /// When the store created the record
    pub created_at: DateTimeUtc,
}

/// Expenses have no relationships with other tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
