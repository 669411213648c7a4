//! Risk register commands - the `/risk` group.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, actions, render, respond, today},
        core::expense::{ExpenseCategory, ExpenseInput, ExpensePatch},
        errors::{Error, Result},
    };

    /// Parent command for the risk register.
    #[poise::command(
        slash_command,
        subcommands("risk_add", "risk_edit", "risk_delete", "risk_list")
    )]
    pub async fn risk(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Risk register command. Available subcommands:\n\
            `/risk add` - Register a new risk\n\
            `/risk edit` - Change a risk\n\
            `/risk delete` - Delete a risk\n\
            `/risk list` - Show the risk register";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Registers a new risk.
    #[poise::command(slash_command, rename = "add")]
    pub async fn risk_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What is at risk"] item: String,
        #[description = "Kind of risk, e.g. Fire, Structural"] risk_type: Option<String>,
        #[description = "Deadline (YYYY-MM-DD)"] deadline: Option<String>,
        #[description = "Description"] description: Option<String>,
        #[description = "Observation"] obs: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let user_id = ctx.author().id.get();

        let outcome = async {
            let mut input = ExpenseInput::new(ExpenseCategory::Risk, item, today());
            input.risk_type = risk_type;
            input.deadline = actions::parse_date_arg(deadline.as_deref())?;
            input.description = description;
            input.obs = obs;

            actions::insert(data, user_id, input, render::risk_list).await
        }
        .await;

        respond(ctx, "add the risk item", outcome).await
    }

    /// Changes a risk. Use `-` to clear the deadline.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn risk_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Risk id (shown as #id)"] id: i64,
        #[description = "New name"] item: Option<String>,
        #[description = "Kind of risk"] risk_type: Option<String>,
        #[description = "Deadline (YYYY-MM-DD, or - to clear)"] deadline: Option<String>,
        #[description = "Description"] description: Option<String>,
        #[description = "Observation (empty to clear)"] obs: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let user_id = ctx.author().id.get();

        let outcome = async {
            let patch = ExpensePatch {
                item,
                risk_type,
                deadline: actions::parse_date_patch(deadline.as_deref())?,
                description,
                obs,
                ..Default::default()
            };

            actions::edit(
                data,
                user_id,
                id,
                ExpenseCategory::Risk,
                patch,
                today(),
                render::risk_list,
            )
            .await
        }
        .await;

        respond(ctx, "update the risk item", outcome).await
    }

    /// Deletes a risk.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn risk_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Risk id (shown as #id)"] id: i64,
    ) -> Result<()> {
        ctx.defer().await?;
        let outcome = actions::delete(
            ctx.data(),
            ctx.author().id.get(),
            id,
            ExpenseCategory::Risk,
            render::risk_list,
        )
        .await;
        respond(ctx, "delete the risk item", outcome).await
    }

    /// Shows the risk register.
    #[poise::command(slash_command, rename = "list")]
    pub async fn risk_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let outcome = actions::show(ctx.data(), ctx.author().id.get(), render::risk_list).await;
        respond(ctx, "load the risk register", outcome).await
    }
}

// Re-export all commands
pub use inner::*;
