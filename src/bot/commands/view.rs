//! Table view commands - sorting, row selection, bulk delete and the summary.
//!
//! Sorting and selection work on the caller's session without re-fetching; the bulk
//! delete and the summary go back to the store.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, actions, handlers::autocomplete, render, respond},
        core::sort::SortKey,
        errors::{Error, Result},
    };
    use tracing::debug;

    /// Sorts the expense table. Choosing the same column again reverses the order.
    #[poise::command(slash_command)]
    pub async fn sort(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Column to sort by"]
        #[autocomplete = "autocomplete::autocomplete_sort_key"]
        column: String,
    ) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let user_id = ctx.author().id.get();

        let outcome = async {
            let key: SortKey = column.parse()?;
            data.with_session(user_id, |view| {
                view.sort_by(key);
                debug!(user_id, key = %view.sort.key, direction = ?view.sort.direction, "sorted table");
                render::expense_table(view, &data.settings.display, render::MESSAGE_LIMIT)
            })
            .await?
        }
        .await;

        respond(ctx, "sort the table", outcome).await
    }

    /// Checks rows of the expense table.
    #[poise::command(
        slash_command,
        subcommands("select_toggle", "select_all", "select_clear")
    )]
    pub async fn select(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Selection command. Available subcommands:\n\
            `/select toggle` - Check or uncheck one row\n\
            `/select all` - Check every row, or uncheck them all if they already are\n\
            `/select clear` - Uncheck everything\n\
            Then use `/delete_selected` to delete the checked rows.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Checks or unchecks one row.
    #[poise::command(slash_command, rename = "toggle")]
    pub async fn select_toggle(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense id (shown as #id)"] id: i64,
    ) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let outcome = data
            .with_session(ctx.author().id.get(), |view| {
                view.toggle_selected(id)?;
                render::expense_table(view, &data.settings.display, render::MESSAGE_LIMIT)
            })
            .await
            .and_then(|rendered| rendered);

        respond(ctx, "update the selection", outcome).await
    }

    /// Checks every row, or unchecks them all when every row is already checked.
    #[poise::command(slash_command, rename = "all")]
    pub async fn select_all(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let outcome = data
            .with_session(ctx.author().id.get(), |view| {
                view.toggle_select_all();
                render::expense_table(view, &data.settings.display, render::MESSAGE_LIMIT)
            })
            .await
            .and_then(|rendered| rendered);

        respond(ctx, "update the selection", outcome).await
    }

    /// Unchecks every row.
    #[poise::command(slash_command, rename = "clear")]
    pub async fn select_clear(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let outcome = data
            .with_session(ctx.author().id.get(), |view| {
                view.selection.clear();
                render::expense_table(view, &data.settings.display, render::MESSAGE_LIMIT)
            })
            .await
            .and_then(|rendered| rendered);

        respond(ctx, "update the selection", outcome).await
    }

    /// Deletes every checked row of the expense table.
    #[poise::command(slash_command)]
    pub async fn delete_selected(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let outcome =
            actions::delete_selected(ctx.data(), ctx.author().id.get(), render::expense_table)
                .await;

        respond(ctx, "delete the selected expenses", outcome).await
    }

    /// Shows totals, the month-by-month table and the monthly chart.
    #[poise::command(slash_command)]
    pub async fn summary(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Year to break down by month (default: the last one you chose)"]
        year: Option<i32>,
    ) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();

        let outcome = data
            .refresh_session(ctx.author().id.get(), |view| {
                if let Some(year) = year {
                    view.year = year;
                }
                render::summary(view, &data.settings.display, render::MESSAGE_LIMIT)
            })
            .await
            .and_then(|rendered| rendered);

        respond(ctx, "build the summary", outcome).await
    }
}

// Re-export all commands
pub use inner::*;
