//! Mutations shared by the expense, planned and risk commands.
//!
//! Every action follows the same sequence: take the in-flight guard, call the store,
//! release the guard, re-fetch into the caller's session and render the refreshed view
//! under the confirmation line. The whole reply fits in one Discord message.
//! A failure at any step returns before the session is touched.

use crate::{
    bot::{
        BotData,
        render::{MESSAGE_LIMIT, short_name},
    },
    config::settings::DisplaySettings,
    core::{
        expense::{
            self, ExpenseCategory, ExpenseInput, ExpensePatch, Periodicity, parse_date,
        },
        view::{MutationKey, ViewState},
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use tracing::info;

/// Renders the view a command shows after its mutation, in at most the given bytes.
pub type Render = fn(&ViewState, &DisplaySettings, usize) -> Result<String>;

/// Parses an optional periodicity argument.
pub fn parse_periodicity(raw: Option<&str>) -> Result<Option<Periodicity>> {
    raw.map(str::parse).transpose()
}

/// Parses an optional periodicity argument for an edit: absent leaves it alone, `-`
/// clears it.
pub fn parse_periodicity_patch(raw: Option<&str>) -> Result<Option<Option<Periodicity>>> {
    raw.map(|raw| match raw.trim() {
        "" | "-" => Ok(None),
        label => label.parse().map(Some),
    })
    .transpose()
}

/// Parses an optional date argument for a new record.
pub fn parse_date_arg(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map_or(Ok(None), parse_date)
}

/// Parses an optional date argument for an edit: absent leaves the date alone, `-`
/// clears it.
pub fn parse_date_patch(raw: Option<&str>) -> Result<Option<Option<NaiveDate>>> {
    raw.map(parse_date).transpose()
}

/// Re-fetches into the caller's session and renders it.
pub async fn show(data: &BotData, user_id: u64, render: Render) -> Result<String> {
    data.refresh_session(user_id, |view| {
        render(view, &data.settings.display, MESSAGE_LIMIT)
    })
    .await?
}

/// Re-fetches and renders the view below `headline`.
async fn confirm(data: &BotData, user_id: u64, headline: &str, render: Render) -> Result<String> {
    let budget = MESSAGE_LIMIT.saturating_sub(headline.len() + 1);
    let body = data
        .refresh_session(user_id, |view| render(view, &data.settings.display, budget))
        .await??;
    Ok(format!("{headline}\n{body}"))
}

/// Inserts `input` and shows the refreshed view.
pub async fn insert(
    data: &BotData,
    user_id: u64,
    input: ExpenseInput,
    render: Render,
) -> Result<String> {
    let noun = input.category.noun();
    let created = {
        let _guard = data.in_flight.acquire(MutationKey::Insert(user_id))?;
        expense::create_expense(&data.database, input).await?
    };

    let headline = format!(
        "✅ Added {noun} #{} **{}**",
        created.id,
        short_name(&created.item)
    );
    confirm(data, user_id, &headline, render).await
}

/// Applies `patch` to a record of `category` and shows the refreshed view.
///
/// An empty patch is rejected; the category's form defaults are added afterwards.
pub async fn edit(
    data: &BotData,
    user_id: u64,
    id: i64,
    category: ExpenseCategory,
    patch: ExpensePatch,
    today: NaiveDate,
    render: Render,
) -> Result<String> {
    if patch.is_empty() {
        return Err(Error::validation(
            "Please specify at least one field to update.",
        ));
    }
    let patch = patch.or(ExpensePatch::category_defaults(category, today));

    let updated = {
        let _guard = data.in_flight.acquire(MutationKey::Expense(id))?;
        expense::get_expense_in_category(&data.database, id, category).await?;
        expense::update_expense(&data.database, id, patch).await?
    };

    let headline = format!(
        "✅ Updated {} #{} **{}**",
        category.noun(),
        updated.id,
        short_name(&updated.item)
    );
    confirm(data, user_id, &headline, render).await
}

/// Deletes one record of `category` and shows the refreshed view.
pub async fn delete(
    data: &BotData,
    user_id: u64,
    id: i64,
    category: ExpenseCategory,
    render: Render,
) -> Result<String> {
    let removed = {
        let _guard = data.in_flight.acquire(MutationKey::Expense(id))?;
        let record = expense::get_expense_in_category(&data.database, id, category).await?;
        expense::delete_expense(&data.database, id).await?;
        record
    };

    let headline = format!(
        "✅ Deleted {} #{id} **{}**",
        category.noun(),
        short_name(&removed.item)
    );
    confirm(data, user_id, &headline, render).await
}

/// Flips paid/pending (or completed/pending) and shows the refreshed view.
pub async fn toggle_status(
    data: &BotData,
    user_id: u64,
    id: i64,
    category: ExpenseCategory,
    render: Render,
) -> Result<String> {
    let updated = {
        let _guard = data.in_flight.acquire(MutationKey::Expense(id))?;
        expense::get_expense_in_category(&data.database, id, category).await?;
        expense::toggle_expense_status(&data.database, id).await?
    };

    let state = match (updated.status, category) {
        (true, ExpenseCategory::Planned) => "completed",
        (true, _) => "paid",
        (false, _) => "pending",
    };
    let headline = format!(
        "✅ #{} **{}** is now {state}",
        updated.id,
        short_name(&updated.item)
    );
    confirm(data, user_id, &headline, render).await
}

/// Copies a record and shows the refreshed view.
pub async fn duplicate(data: &BotData, user_id: u64, id: i64, render: Render) -> Result<String> {
    let copy = {
        let _guard = data.in_flight.acquire(MutationKey::Expense(id))?;
        expense::duplicate_expense(&data.database, id).await?
    };

    let headline = format!(
        "✅ Duplicated #{id} as #{} **{}**",
        copy.id,
        short_name(&copy.item)
    );
    confirm(data, user_id, &headline, render).await
}

/// Deletes every selected row of the caller's expense table.
///
/// Every id is locked or none is; the selection is pruned by the refresh that follows.
pub async fn delete_selected(data: &BotData, user_id: u64, render: Render) -> Result<String> {
    let ids = data
        .with_session(user_id, |view| view.selection.ids())
        .await?;
    if ids.is_empty() {
        return Err(Error::validation("Nothing is selected. Use `/select` first."));
    }

    let keys: Vec<MutationKey> = ids.iter().copied().map(MutationKey::Expense).collect();
    let deleted = {
        let _guard = data.in_flight.acquire_all(&keys)?;
        expense::delete_expenses(&data.database, &ids).await?
    };
    info!(user_id, deleted, "deleted selection");

    let headline = format!(
        "✅ Deleted {deleted} expense{}",
        if deleted == 1 { "" } else { "s" }
    );
    confirm(data, user_id, &headline, render).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bot::render, config::settings::Settings, test_utils::*};

    #[tokio::test]
    async fn test_insert_then_edit_planned_item() -> Result<()> {
        let data = BotData::new(setup_test_db().await?, Settings::default());
        let mut input = ExpenseInput::new(ExpenseCategory::Planned, "Facade painting", today());
        input.value = Some("9000".to_string());

        let added = insert(&data, 1, input, render::planned_list).await?;
        assert!(added.starts_with("✅ Added planned item #1 **Facade painting**"));
        assert!(added.contains("R$ 9000.00"));

        let patch = ExpensePatch {
            obs: Some("Waiting for quotes".to_string()),
            ..Default::default()
        };
        let edited = edit(&data, 1, 1, ExpenseCategory::Planned, patch, today(), render::planned_list)
            .await?;
        assert!(edited.contains("Waiting for quotes"));
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_rejects_empty_patch_and_wrong_category() -> Result<()> {
        let (db, expense) = setup_with_expense().await?;
        let data = BotData::new(db, Settings::default());

        let empty = edit(
            &data,
            1,
            expense.id,
            ExpenseCategory::Regular,
            ExpensePatch::default(),
            today(),
            render::expense_table,
        )
        .await;
        assert!(matches!(empty, Err(Error::Validation { .. })));

        let patch = ExpensePatch {
            risk_type: Some("Fire".to_string()),
            ..Default::default()
        };
        let wrong = edit(&data, 1, expense.id, ExpenseCategory::Risk, patch, today(), render::risk_list)
            .await;
        assert!(matches!(wrong, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_busy_record_rejects_second_mutation() -> Result<()> {
        let (db, expense) = setup_with_expense().await?;
        let data = BotData::new(db, Settings::default());
        let _held = data.in_flight.acquire(MutationKey::Expense(expense.id))?;

        let result = delete(&data, 1, expense.id, ExpenseCategory::Regular, render::expense_table)
            .await;

        assert!(matches!(result, Err(Error::Busy { .. })));
        assert_eq!(expense::count_expenses(&data.database).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_and_duplicate() -> Result<()> {
        let (db, original) = setup_with_expense().await?;
        let data = BotData::new(db, Settings::default());

        let toggled = toggle_status(&data, 1, original.id, ExpenseCategory::Regular, render::expense_table)
            .await?;
        assert!(toggled.contains("is now paid"));

        let copied = duplicate(&data, 1, original.id, render::expense_table).await?;
        assert!(copied.starts_with(&format!("✅ Duplicated #{}", original.id)));
        assert_eq!(expense::count_expenses(&data.database).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_selected() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_expense(&db, "Water", "10").await?;
        create_test_expense(&db, "Gas", "20").await?;
        let data = BotData::new(db, Settings::default());

        let nothing = delete_selected(&data, 3, render::expense_table).await;
        assert!(matches!(nothing, Err(Error::Validation { .. })));

        data.refresh_session(3, ViewState::toggle_select_all).await?;
        let message = delete_selected(&data, 3, render::expense_table).await?;

        assert!(message.starts_with("✅ Deleted 2 expenses"));
        assert!(data.with_session(3, |view| view.selection.is_empty()).await?);
        assert_eq!(expense::count_expenses(&data.database).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_reply_with_full_table_fits_one_message() -> Result<()> {
        let db = setup_test_db().await?;
        for n in 0..30 {
            create_test_expense(&db, &format!("Monthly cleaning service {n:02}"), "1500.00")
                .await?;
        }
        let data = BotData::new(db, Settings::default());

        let long_item = "Replacement of the main water pump ".repeat(3);
        let input = ExpenseInput::new(ExpenseCategory::Regular, long_item.clone(), today());
        let message = insert(&data, 1, input, render::expense_table).await?;

        assert!(message.chars().count() <= MESSAGE_LIMIT);
        assert!(message.len() <= MESSAGE_LIMIT);
        assert!(message.starts_with("✅ Added expense #31 **Replacement of the main water pump"));
        assert!(message.contains("📋 **Expenses** (31)"));
        assert_eq!(expense::count_expenses(&data.database).await?, 31);
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_clears_periodicity() -> Result<()> {
        let db = setup_test_db().await?;
        let mut input = ExpenseInput::new(ExpenseCategory::Regular, "Pest control", today());
        input.periodicity = Some(Periodicity::Quarterly);
        let created = expense::create_expense(&db, input).await?;
        let data = BotData::new(db, Settings::default());

        let patch = ExpensePatch {
            periodicity: parse_periodicity_patch(Some("-"))?,
            ..Default::default()
        };
        edit(&data, 1, created.id, ExpenseCategory::Regular, patch, today(), render::expense_table)
            .await?;

        let stored = expense::get_expense_in_category(&data.database, created.id, ExpenseCategory::Regular)
            .await?;
        assert_eq!(stored.periodicity, None);
        Ok(())
    }

    #[test]
    fn test_argument_parsers() -> Result<()> {
        assert_eq!(parse_periodicity(Some("annual"))?, Some(Periodicity::Annual));
        assert_eq!(parse_periodicity(None)?, None);
        assert_eq!(parse_periodicity_patch(None)?, None);
        assert_eq!(parse_periodicity_patch(Some("-"))?, Some(None));
        assert_eq!(
            parse_periodicity_patch(Some("Monthly"))?,
            Some(Some(Periodicity::Monthly))
        );
        assert!(parse_periodicity_patch(Some("weekly")).is_err());
        assert_eq!(parse_date_arg(Some("-"))?, None);
        assert_eq!(parse_date_patch(None)?, None);
        assert_eq!(parse_date_patch(Some("-"))?, Some(None));
        assert!(parse_date_arg(Some("tomorrow")).is_err());
        Ok(())
    }
}
