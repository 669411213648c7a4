//! Planned item commands - the `/planned` group.
//!
//! Planned items are re-dated to the current month and year on every save.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, actions, render, respond, today},
        core::expense::{ExpenseCategory, ExpenseInput, ExpensePatch},
        errors::{Error, Result},
    };

    /// Parent command for planned items.
    #[poise::command(
        slash_command,
        subcommands("planned_add", "planned_edit", "planned_delete", "planned_list")
    )]
    pub async fn planned(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Planned items command. Available subcommands:\n\
            `/planned add` - Plan a new item\n\
            `/planned edit` - Change a planned item\n\
            `/planned delete` - Delete a planned item\n\
            `/planned list` - Show all planned items";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Plans a new item.
    #[poise::command(slash_command, rename = "add")]
    pub async fn planned_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What is planned"] item: String,
        #[description = "Estimated amount"] value: Option<String>,
        #[description = "Observation"] obs: Option<String>,
        #[description = "Already completed? (default: false)"] completed: Option<bool>,
    ) -> Result<()> {
        ctx.defer().await?;

        let mut input = ExpenseInput::new(ExpenseCategory::Planned, item, today());
        input.value = value;
        input.obs = obs;
        input.status = completed.unwrap_or(false);

        let outcome =
            actions::insert(ctx.data(), ctx.author().id.get(), input, render::planned_list).await;
        respond(ctx, "add the planned item", outcome).await
    }

    /// Changes a planned item.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn planned_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Planned item id (shown as #id)"] id: i64,
        #[description = "New name"] item: Option<String>,
        #[description = "New estimated amount"] value: Option<String>,
        #[description = "Observation (empty to clear)"] obs: Option<String>,
        #[description = "Completed?"] completed: Option<bool>,
    ) -> Result<()> {
        ctx.defer().await?;

        let patch = ExpensePatch {
            item,
            value,
            obs,
            status: completed,
            ..Default::default()
        };
        let outcome = actions::edit(
            ctx.data(),
            ctx.author().id.get(),
            id,
            ExpenseCategory::Planned,
            patch,
            today(),
            render::planned_list,
        )
        .await;
        respond(ctx, "update the planned item", outcome).await
    }

    /// Deletes a planned item.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn planned_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Planned item id (shown as #id)"] id: i64,
    ) -> Result<()> {
        ctx.defer().await?;
        let outcome = actions::delete(
            ctx.data(),
            ctx.author().id.get(),
            id,
            ExpenseCategory::Planned,
            render::planned_list,
        )
        .await;
        respond(ctx, "delete the planned item", outcome).await
    }

    /// Shows every planned item.
    #[poise::command(slash_command, rename = "list")]
    pub async fn planned_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let outcome = actions::show(ctx.data(), ctx.author().id.get(), render::planned_list).await;
        respond(ctx, "load planned items", outcome).await
    }
}

// Re-export all commands
pub use inner::*;
