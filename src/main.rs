#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use imqap_portal::{
    bot::{self, BotData},
    config::{self, database},
    core::{seed, session::SessionStore},
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Portal settings
    let portal_config = config::portal::load_default_config()
        .inspect_err(|e| error!("Critical error loading portal configuration: {e}"))?;

    // 4. Domain store: fresh tables and sample records on every start
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;
    seed::seed_sample_data(&db)
        .await
        .inspect(|_| info!("Sample data seeded successfully."))
        .inspect_err(|e| error!("Failed to seed sample data: {e}"))?;

    // 5. Identity store, restored from the session file
    let sessions = SessionStore::open(&portal_config.session_file)
        .inspect_err(|e| error!("Failed to restore sessions: {e}"))?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(db, sessions, portal_config)).await
}
