//! General Discord commands - ping and help.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Condo Expenses Help**\n\
        Track the building's expenses, planned works and risks.\n\n\
        **Expenses**\n\
        • `/expense add <item> [value] [periodicity] [month] [year] ...` - Records an expense.\n\
        • `/expense edit <id> ...` - Changes any field of an expense.\n\
        • `/expense toggle <id>` - Flips paid/pending.\n\
        • `/expense duplicate <id>` - Copies an expense as a new pending one.\n\
        • `/expense delete <id>` - Deletes an expense.\n\
        • `/expense list` - Shows the expense table.\n\n\
        **Table**\n\
        • `/sort <column>` - Sorts by a column; the same column again reverses the order.\n\
        • `/select toggle <id>` / `/select all` / `/select clear` - Checks rows.\n\
        • `/delete_selected` - Deletes every checked row.\n\
        • `/summary [year]` - Totals, month-by-month table and chart.\n\n\
        **Planned items and risks**\n\
        • `/planned add|edit|delete|list` - Works planned for the building.\n\
        • `/risk add|edit|delete|list` - The risk register.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Every listing shows record ids as `#id`.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
