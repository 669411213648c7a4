//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the expense tracker: slash commands,
//! autocomplete handlers, per-user view sessions and the framework setup.

/// Store mutations shared by the category commands
pub mod actions;
/// Discord command implementations (expenses, planned items, risks, views, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Message bodies built from a view session
pub mod render;

use crate::{
    config::settings::Settings,
    core::{
        expense::get_all_expenses,
        view::{InFlight, ViewState},
    },
    errors::{Error, Result},
};
use chrono::{Datelike, Local, NaiveDate};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection, the loaded settings, every user's
/// view session and the registry of mutations still waiting on the store.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Display settings from config.toml
    pub settings: Settings,
    /// Records with a mutation in flight
    pub in_flight: InFlight,
    sessions: Mutex<HashMap<u64, ViewState>>,
}

impl BotData {
    /// Creates a new `BotData` instance with no open sessions.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: Settings) -> Self {
        Self {
            database,
            settings,
            in_flight: InFlight::new(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Re-fetches every record into `user_id`'s session, then runs `f` on it.
    ///
    /// The session lock is not held during the fetch; only the record list of the live
    /// session is replaced afterwards, so sorting or selection done meanwhile is kept.
    /// If the fetch fails the session keeps its previous list.
    pub async fn refresh_session<T>(
        &self,
        user_id: u64,
        f: impl FnOnce(&mut ViewState) -> T,
    ) -> Result<T> {
        let records = get_all_expenses(&self.database).await?;

        let mut sessions = self.sessions.lock().await;
        let view = sessions
            .entry(user_id)
            .or_insert_with(|| ViewState::new(current_year()));
        view.refresh(records);
        Ok(f(view))
    }

    /// Runs `f` on `user_id`'s session without contacting the store, unless the
    /// session has never been loaded.
    pub async fn with_session<T>(
        &self,
        user_id: u64,
        f: impl FnOnce(&mut ViewState) -> T,
    ) -> Result<T> {
        let loaded = self.sessions.lock().await.contains_key(&user_id);
        if !loaded {
            return self.refresh_session(user_id, f).await;
        }

        let mut sessions = self.sessions.lock().await;
        let view = sessions
            .entry(user_id)
            .or_insert_with(|| ViewState::new(current_year()));
        Ok(f(view))
    }
}

/// Today's date in the bot's local time zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn current_year() -> i32 {
    today().year()
}

/// Sends the outcome of a command: the message on success, an ❌ line on failure.
///
/// Store failures name the action that failed and are logged; input problems are not.
pub async fn respond(
    ctx: poise::Context<'_, BotData, Error>,
    action: &str,
    outcome: Result<String>,
) -> Result<()> {
    match outcome {
        Ok(message) => {
            ctx.say(message).await?;
        }
        Err(err) if err.is_local() || matches!(err, Error::ExpenseNotFound { .. }) => {
            ctx.say(format!("❌ {err}")).await?;
        }
        Err(err) => {
            error!(action, error = %err, "command failed");
            ctx.say(format!("❌ Failed to {action}: {err}")).await?;
        }
    }
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the poise framework, registers every command globally and runs the client
/// until it stops.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::expense(),
                commands::planned(),
                commands::risk(),
                commands::sort(),
                commands::select(),
                commands::delete_selected(),
                commands::summary(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}
