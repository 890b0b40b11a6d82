//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the IMQAP portal: every page
//! of the portal is a slash command, and every command first resolves the
//! caller's session and checks the route it belongs to.

/// Discord command implementations (session, dashboard, requests, library, vendors, reports)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::PortalConfig,
    core::{
        identity::User,
        navigation::{self, Route},
        session::SessionStore,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument, warn};

/// Shared data available to all bot commands.
///
/// Holds the domain store, the identity store and the portal settings. There
/// is no other application state.
pub struct BotData {
    /// Database connection for all domain store operations
    pub database: DatabaseConnection,
    /// Logged-in users, one per Discord user
    pub sessions: SessionStore,
    /// Plants, categories and other form options
    pub config: PortalConfig,
}

impl BotData {
    /// Creates a new `BotData` instance from its three parts.
    #[must_use]
    pub const fn new(
        database: DatabaseConnection,
        sessions: SessionStore,
        config: PortalConfig,
    ) -> Self {
        Self {
            database,
            sessions,
            config,
        }
    }
}

/// Session key for the invoking Discord user.
#[must_use]
pub fn client_key(ctx: poise::Context<'_, BotData, Error>) -> String {
    ctx.author().id.to_string()
}

/// Resolves the caller's session and checks it may open `route`.
pub async fn page_user(ctx: poise::Context<'_, BotData, Error>, route: Route) -> Result<User> {
    let user = ctx.data().sessions.current(&client_key(ctx)).await;
    navigation::authorize(user.as_ref(), route).cloned()
}

/// Parses a `YYYY-MM-DD` form value.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("{field} must be a date like 2024-01-31")))
}

/// Splits a list of ids separated by commas or whitespace.
#[must_use]
pub fn parse_id_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Rows listed in one reply before the rest is summarised.
pub const LIST_LIMIT: usize = 15;

/// Discord message length limit, in characters.
pub const MESSAGE_LIMIT: usize = 2000;

/// Discord embed field value limit, in characters.
pub const FIELD_LIMIT: usize = 1024;

/// Room kept free for the "…and N more" line.
const MORE_LINE_RESERVE: usize = 32;

/// Appends up to `limit` of `lines` to `out` while `out` stays within
/// `budget` characters, then a line counting the ones left out.
pub fn push_capped(out: &mut String, lines: Vec<String>, limit: usize, budget: usize) {
    let budget = budget.saturating_sub(MORE_LINE_RESERVE);
    let total = lines.len();
    let mut used = out.chars().count();
    let mut shown = 0;
    for line in lines.into_iter().take(limit) {
        let len = line.chars().count() + 1;
        if used + len > budget {
            break;
        }
        out.push_str(&line);
        out.push('\n');
        used += len;
        shown += 1;
    }
    if shown < total {
        out.push_str(&format!("_…and {} more_\n", total - shown));
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } if error.is_user_facing() => {
            warn!("Command `{}` refused: {error}", ctx.command().name);
            let reply = poise::CreateReply::default()
                .content(format!("❌ {error}"))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {e}");
            }
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
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

/// Registers every command and runs the Discord client until it stops.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
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
    let mut client = serenity::ClientBuilder::new(token, intents)
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

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("GRN date", " 2024-01-15 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        let err = parse_date("GRN date", "15/01/2024").unwrap_err();
        assert!(matches!(err, Error::Validation { message } if message.starts_with("GRN date")));
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1, 2  3,,4"), vec!["1", "2", "3", "4"]);
        assert!(parse_id_list(" , ").is_empty());
    }

    #[test]
    fn test_push_capped_limits_line_count() {
        let lines: Vec<String> = (1..=20).map(|i| format!("row {i}")).collect();
        let mut out = String::from("header\n");
        push_capped(&mut out, lines, LIST_LIMIT, MESSAGE_LIMIT);

        assert!(out.contains("row 15\n"));
        assert!(!out.contains("row 16"));
        assert!(out.ends_with("_…and 5 more_\n"));
    }

    #[test]
    fn test_push_capped_respects_character_budget() {
        let lines: Vec<String> = (0..LIST_LIMIT).map(|i| format!("{i:03} {}", "x".repeat(200))).collect();
        let mut out = String::new();
        push_capped(&mut out, lines, LIST_LIMIT, MESSAGE_LIMIT);
        assert!(out.chars().count() <= MESSAGE_LIMIT);
        assert!(out.contains("more_"));

        let months: Vec<String> = (0..60).map(|i| format!("`2024-{i:02}` 10 approved · 3 rejected")).collect();
        let mut field = String::new();
        push_capped(&mut field, months, usize::MAX, FIELD_LIMIT);
        assert!(field.chars().count() <= FIELD_LIMIT);
        assert!(field.starts_with("`2024-00`"));
    }

    #[test]
    fn test_push_capped_short_list_is_untouched() {
        let mut out = String::new();
        push_capped(&mut out, vec!["a".to_string(), "b".to_string()], LIST_LIMIT, MESSAGE_LIMIT);
        assert_eq!(out, "a\nb\n");
    }
}
