//! Regular expense commands - the `/expense` group.
//!
//! Every mutation re-fetches the whole list and answers with the refreshed table.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, actions,
            handlers::autocomplete,
            render, respond, today,
        },
        core::expense::{ExpenseCategory, ExpenseInput, ExpensePatch},
        errors::{Error, Result},
    };

    /// Parent command for regular expenses.
    #[poise::command(
        slash_command,
        subcommands(
            "expense_add",
            "expense_edit",
            "expense_delete",
            "expense_duplicate",
            "expense_toggle",
            "expense_list"
        )
    )]
    pub async fn expense(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Expense command. Available subcommands:\n\
            `/expense add` - Record a new expense\n\
            `/expense edit` - Change an expense\n\
            `/expense toggle` - Flip paid/pending\n\
            `/expense duplicate` - Copy an expense\n\
            `/expense delete` - Delete an expense\n\
            `/expense list` - Show the expense table";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Records a new expense. Month and year default to the current ones.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn expense_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What the expense is for"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
        #[description = "Amount, e.g. 350.00"] value: Option<String>,
        #[description = "How often it recurs"]
        #[autocomplete = "autocomplete::autocomplete_periodicity"]
        periodicity: Option<String>,
        #[description = "Month (1-12)"]
        #[min = 1]
        #[max = 12]
        month: Option<i32>,
        #[description = "Year"] year: Option<i32>,
        #[description = "Already paid? (default: false)"] paid: Option<bool>,
        #[description = "Maintenance date (YYYY-MM-DD)"] maintenance_date: Option<String>,
        #[description = "Deadline (YYYY-MM-DD)"] deadline: Option<String>,
        #[description = "Observation"] obs: Option<String>,
        #[description = "Description"] description: Option<String>,
        #[description = "Law or regulation"] law: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let user_id = ctx.author().id.get();

        let outcome = async {
            let mut input = ExpenseInput::new(ExpenseCategory::Regular, item, today());
            input.value = value;
            input.periodicity = actions::parse_periodicity(periodicity.as_deref())?;
            if month.is_some() {
                input.month = month;
            }
            if year.is_some() {
                input.year = year;
            }
            input.status = paid.unwrap_or(false);
            input.maintenance_date = actions::parse_date_arg(maintenance_date.as_deref())?;
            input.deadline = actions::parse_date_arg(deadline.as_deref())?;
            input.obs = obs;
            input.description = description;
            input.law = law;

            actions::insert(data, user_id, input, render::expense_table).await
        }
        .await;

        respond(ctx, "add the expense", outcome).await
    }

    /// Changes fields of an expense. Use `-` to clear a date or the periodicity.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit")]
    pub async fn expense_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense id (shown as #id)"] id: i64,
        #[description = "New item name"] item: Option<String>,
        #[description = "New amount"] value: Option<String>,
        #[description = "New periodicity (or - to clear)"]
        #[autocomplete = "autocomplete::autocomplete_periodicity"]
        periodicity: Option<String>,
        #[description = "New month (1-12)"]
        #[min = 1]
        #[max = 12]
        month: Option<i32>,
        #[description = "New year"] year: Option<i32>,
        #[description = "Paid?"] paid: Option<bool>,
        #[description = "Maintenance date (YYYY-MM-DD, or - to clear)"] maintenance_date: Option<
            String,
        >,
        #[description = "Deadline (YYYY-MM-DD, or - to clear)"] deadline: Option<String>,
        #[description = "Observation (empty to clear)"] obs: Option<String>,
        #[description = "Description"] description: Option<String>,
        #[description = "Law or regulation"] law: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let user_id = ctx.author().id.get();

        let outcome = async {
            let patch = ExpensePatch {
                item,
                value,
                periodicity: actions::parse_periodicity_patch(periodicity.as_deref())?,
                month,
                year,
                status: paid,
                maintenance_date: actions::parse_date_patch(maintenance_date.as_deref())?,
                deadline: actions::parse_date_patch(deadline.as_deref())?,
                obs,
                description,
                law,
                risk_type: None,
            };

            actions::edit(
                data,
                user_id,
                id,
                ExpenseCategory::Regular,
                patch,
                today(),
                render::expense_table,
            )
            .await
        }
        .await;

        respond(ctx, "update the expense", outcome).await
    }

    /// Deletes an expense.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn expense_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense id (shown as #id)"] id: i64,
    ) -> Result<()> {
        ctx.defer().await?;
        let outcome = actions::delete(
            ctx.data(),
            ctx.author().id.get(),
            id,
            ExpenseCategory::Regular,
            render::expense_table,
        )
        .await;

        respond(ctx, "delete the expense", outcome).await
    }

    /// Copies an expense into a new pending one.
    #[poise::command(slash_command, rename = "duplicate")]
    pub async fn expense_duplicate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense id (shown as #id)"] id: i64,
    ) -> Result<()> {
        ctx.defer().await?;
        let outcome =
            actions::duplicate(ctx.data(), ctx.author().id.get(), id, render::expense_table).await;

        respond(ctx, "duplicate the expense", outcome).await
    }

    /// Flips an expense between paid and pending.
    #[poise::command(slash_command, rename = "toggle")]
    pub async fn expense_toggle(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense id (shown as #id)"] id: i64,
    ) -> Result<()> {
        ctx.defer().await?;
        let outcome = actions::toggle_status(
            ctx.data(),
            ctx.author().id.get(),
            id,
            ExpenseCategory::Regular,
            render::expense_table,
        )
        .await;

        respond(ctx, "update the status", outcome).await
    }

    /// Shows the expense table in your current sort order.
    #[poise::command(slash_command, rename = "list")]
    pub async fn expense_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let outcome = actions::show(ctx.data(), ctx.author().id.get(), render::expense_table).await;

        respond(ctx, "load expenses", outcome).await
    }
}

// Re-export all commands
pub use inner::*;
