//! Session commands - login, logout, whoami and the navigation menu.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, client_key},
        core::navigation,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Signs in with one of the portal accounts.
    ///
    /// Slash-only and ephemeral so the password never shows up in a channel.
    #[poise::command(slash_command, ephemeral)]
    pub async fn login(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Account email"] email: String,
        #[description = "Password"] password: String,
    ) -> Result<()> {
        let user = ctx
            .data()
            .sessions
            .sign_in(&client_key(ctx), email.trim(), &password)
            .await?;
        let menu: Vec<&str> = navigation::navigation_for(user.role)
            .into_iter()
            .map(navigation::Route::name)
            .collect();
        ctx.say(format!(
            "✅ Welcome, **{}** ({}).\nYou can open: {}",
            user.name,
            user.role.label(),
            menu.join(" · ")
        ))
        .await?;
        Ok(())
    }

    /// Signs out of the portal.
    #[poise::command(slash_command, prefix_command, ephemeral)]
    pub async fn logout(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.data().sessions.logout(&client_key(ctx)).await?;
        ctx.say("👋 Signed out.").await?;
        Ok(())
    }

    /// Shows the account you are signed in with.
    #[poise::command(slash_command, prefix_command, ephemeral)]
    pub async fn whoami(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ctx
            .data()
            .sessions
            .current(&client_key(ctx))
            .await
            .ok_or(Error::NotLoggedIn)?;

        ctx.say(format!(
            "👤 **{}** <{}>\nRole: {}",
            user.name,
            user.email,
            user.role.label()
        ))
        .await?;
        Ok(())
    }

    /// Lists the portal pages your role can open.
    #[poise::command(slash_command, prefix_command)]
    pub async fn nav(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ctx
            .data()
            .sessions
            .current(&client_key(ctx))
            .await
            .ok_or(Error::NotLoggedIn)?;

        let mut response = format!("🧭 **Navigation for {}**\n\n", user.role.label());
        for route in navigation::navigation_for(user.role) {
            let command = match route {
                navigation::Route::Dashboard => "/dashboard",
                navigation::Route::Requests => "/requests",
                navigation::Route::Library => "/library list",
                navigation::Route::Vendors => "/vendors",
                navigation::Route::Reports => "/report",
            };
            writeln!(
                &mut response,
                "• **{}** `{}` - `{command}`",
                route.name(),
                route.path()
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
