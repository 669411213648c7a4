//! Application settings loaded from `config.toml`.
//!
//! The file is optional. It carries display settings for the bot and an optional list
//! of `[[expenses]]` used to seed an empty database on first run.

use crate::{
    core::expense::{
        ExpenseCategory, ExpenseInput, Periodicity, count_expenses, create_expense, parse_date,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the settings file, overridden by `CONDO_CONFIG`.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// The whole `config.toml` file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// How amounts and tables are rendered
    pub display: DisplaySettings,
    /// Records inserted when the store is empty
    pub expenses: Vec<SeedExpense>,
}

/// The `[display]` table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Prefix for every amount
    pub currency_symbol: String,
    /// Maximum rows per listing
    pub list_limit: usize,
    /// Width of the monthly bar chart, in cells
    pub chart_width: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            list_limit: 25,
            chart_width: 20,
        }
    }
}

/// One `[[expenses]]` entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SeedExpense {
    /// `regular`, `planned` or `risk`
    #[serde(default)]
    pub category: ExpenseCategory,
    /// Display name
    pub item: String,
    /// Amount text
    pub value: Option<String>,
    /// Periodicity label, e.g. `"Monthly"`
    pub periodicity: Option<String>,
    /// Month, defaults to the current one
    pub month: Option<i32>,
    /// Year, defaults to the current one
    pub year: Option<i32>,
    /// Already paid
    #[serde(default)]
    pub status: bool,
    /// `YYYY-MM-DD`
    pub maintenance_date: Option<String>,
    /// `YYYY-MM-DD`
    pub deadline: Option<String>,
    /// Observation
    pub obs: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Law or regulation
    pub law: Option<String>,
    /// Risk classification
    pub risk_type: Option<String>,
}

impl SeedExpense {
    /// Converts the entry into form input, using `today` for a missing month or year.
    pub fn to_input(&self, today: NaiveDate) -> Result<ExpenseInput> {
        let mut input = ExpenseInput::new(self.category, self.item.clone(), today);

        if self.value.is_some() {
            input.value.clone_from(&self.value);
        }
        input.periodicity = self
            .periodicity
            .as_deref()
            .map(str::parse::<Periodicity>)
            .transpose()?;
        if self.month.is_some() {
            input.month = self.month;
        }
        if self.year.is_some() {
            input.year = self.year;
        }
        input.status = self.status;
        input.maintenance_date = parse_optional_date(self.maintenance_date.as_deref())?;
        input.deadline = parse_optional_date(self.deadline.as_deref())?;
        input.obs.clone_from(&self.obs);
        input.description.clone_from(&self.description);
        input.law.clone_from(&self.law);
        input.risk_type.clone_from(&self.risk_type);
        Ok(input)
    }
}

fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map_or(Ok(None), parse_date)
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

/// Loads settings from `path`. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or is not valid TOML.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "No config file found, using defaults");
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    let settings = parse_settings(&contents)?;

    debug!(
        path = %path.display(),
        seeds = settings.expenses.len(),
        currency = %settings.display.currency_symbol,
        "loaded settings"
    );
    Ok(settings)
}

/// Inserts the configured seed records, but only into an empty store.
///
/// Returns how many records were inserted.
pub async fn seed_expenses(
    db: &DatabaseConnection,
    settings: &Settings,
    today: NaiveDate,
) -> Result<usize> {
    if settings.expenses.is_empty() {
        return Ok(0);
    }

    let existing = count_expenses(db).await?;
    if existing > 0 {
        debug!(existing, "store already has records, skipping seed");
        return Ok(0);
    }

    // Validate every entry before inserting any of them.
    let inputs = settings
        .expenses
        .iter()
        .map(|seed| seed.to_input(today))
        .collect::<Result<Vec<_>>>()?;

    let mut inserted = 0;
    for input in inputs {
        create_expense(db, input).await?;
        inserted += 1;
    }

    info!(inserted, "Seeded expenses from config");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::expense::get_all_expenses, test_utils::*};

    const SAMPLE: &str = r#"
        [display]
        currency_symbol = "$"
        list_limit = 10

        [[expenses]]
        item = "Water"
        value = "120.50"
        periodicity = "Monthly"
        month = 1
        year = 2024

        [[expenses]]
        category = "risk"
        item = "Fire extinguishers"
        deadline = "2024-09-30"
        risk_type = "Fire"
    "#;

    #[test]
    fn test_parse_settings() {
        let settings = parse_settings(SAMPLE).unwrap();

        assert_eq!(settings.display.currency_symbol, "$");
        assert_eq!(settings.display.list_limit, 10);
        assert_eq!(settings.display.chart_width, 20);
        assert_eq!(settings.expenses.len(), 2);
        assert_eq!(settings.expenses[0].category, ExpenseCategory::Regular);
        assert_eq!(settings.expenses[1].category, ExpenseCategory::Risk);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.display.currency_symbol, "R$");
        assert_eq!(settings.display.list_limit, 25);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = load_settings("definitely/not/here/config.toml").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = parse_settings("[display\ncurrency_symbol = 1");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_seed_to_input_rejects_unknown_periodicity() {
        let seed = SeedExpense {
            category: ExpenseCategory::Regular,
            item: "Water".to_string(),
            value: None,
            periodicity: Some("weekly".to_string()),
            month: None,
            year: None,
            status: false,
            maintenance_date: None,
            deadline: None,
            obs: None,
            description: None,
            law: None,
            risk_type: None,
        };
        assert!(matches!(seed.to_input(today()), Err(Error::Validation { .. })));
    }

    #[tokio::test]
    async fn test_seed_expenses_into_empty_store() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = parse_settings(SAMPLE)?;

        let inserted = seed_expenses(&db, &settings, today()).await?;
        assert_eq!(inserted, 2);

        let all = get_all_expenses(&db).await?;
        let risk = all.iter().find(|r| r.is_risk_item).unwrap();
        assert_eq!(risk.value.as_deref(), Some("0"));
        assert_eq!(risk.month, Some(3));
        assert_eq!(risk.deadline, NaiveDate::from_ymd_opt(2024, 9, 30));

        let water = all.iter().find(|r| r.item == "Water").unwrap();
        assert_eq!(water.month, Some(1));
        assert_eq!(water.periodicity.as_deref(), Some("Monthly"));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_expenses_skips_non_empty_store() -> Result<()> {
        let (db, _) = setup_with_expense().await?;
        let settings = parse_settings(SAMPLE)?;

        assert_eq!(seed_expenses(&db, &settings, today()).await?, 0);
        assert_eq!(count_expenses(&db).await?, 1);
        Ok(())
    }
}
