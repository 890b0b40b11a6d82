//! General Discord commands - ping and help.
//! These commands need neither a session nor the database.

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
        let help_text = "**IMQAP Portal Help**\n\
        Inventory Management & Quality Assurance Portal.\n\n\
        **Session**\n\
        • `/login <email> <password>` - Signs you in (demo password: `password`).\n\
        • `/logout` - Signs you out.\n\
        • `/whoami` - Shows who you are signed in as.\n\
        • `/nav` - Lists the pages your role can open.\n\n\
        **Pages**\n\
        • `/dashboard` - Headline quality statistics.\n\
        • `/requests` - Validation requests and their status.\n\
        • `/request_info <id>` - One request in detail.\n\
        • `/new_request <plant> <file> [remarks]` - Raises a validation request.\n\
        • `/review_request <id> <status> [comments]` - Updates a request (Seven Procure).\n\
        • `/library <list|add|approve|reject|export>` - Quality library (Seven Procure).\n\
        • `/vendors [search] [supply_type]` - Vendor registry.\n\
        • `/add_vendor`, `/update_vendor` - Maintains the vendor registry.\n\
        • `/report [filters]` - Quality report with plant and category breakdowns.\n\
        • `/export_report <format>` - Exports the report.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
