//! Validation request commands - the request tracker, new requests and reviews.
//!
//! Finance and procurement users raise requests with an attached GRN file;
//! Seven Procure reviewers move them between statuses.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, LIST_LIMIT, MESSAGE_LIMIT, handlers::autocomplete, page_user, push_capped,
        },
        core::{navigation::Route, request},
        entities::RequestStatus,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Status choices offered to reviewers.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum StatusChoice {
        #[name = "Open"]
        Open,
        #[name = "In Progress"]
        InProgress,
        #[name = "Completed"]
        Completed,
    }

    impl From<StatusChoice> for RequestStatus {
        fn from(choice: StatusChoice) -> Self {
            match choice {
                StatusChoice::Open => Self::Open,
                StatusChoice::InProgress => Self::InProgress,
                StatusChoice::Completed => Self::Completed,
            }
        }
    }

    const fn status_emoji(status: RequestStatus) -> &'static str {
        match status {
            RequestStatus::Open => "🟡",
            RequestStatus::InProgress => "🔵",
            RequestStatus::Completed => "🟢",
        }
    }

    /// Lists validation requests, optionally only those in one status.
    #[poise::command(slash_command, prefix_command)]
    pub async fn requests(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show requests in this status"]
        #[autocomplete = "autocomplete::autocomplete_request_status"]
        status: Option<String>,
    ) -> Result<()> {
        page_user(ctx, Route::Requests).await?;
        let status = status
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<RequestStatus>())
            .transpose()?;

        let all = request::get_all_requests(&ctx.data().database).await?;

        let mut response = String::from("📋 **Validation Requests**\n");
        let counts: Vec<String> = request::status_counts(&all)
            .into_iter()
            .map(|(s, n)| format!("{s}: {n}"))
            .collect();
        writeln!(&mut response, "_{}_\n", counts.join(" · "))?;

        let shown: Vec<_> = all
            .iter()
            .filter(|r| status.is_none_or(|wanted| r.status == wanted))
            .collect();
        if shown.is_empty() {
            response.push_str("No requests found.");
        }
        let lines = shown
            .into_iter()
            .map(|req| {
                format!(
                    "{} **#{}** {} · {} · {} · {}",
                    status_emoji(req.status),
                    req.id,
                    req.plant,
                    req.requester,
                    req.submission_date.format("%Y-%m-%d"),
                    req.status
                )
            })
            .collect();
        push_capped(&mut response, lines, LIST_LIMIT, MESSAGE_LIMIT);

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows one validation request in detail.
    #[poise::command(slash_command, prefix_command)]
    pub async fn request_info(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Request id"] id: String,
    ) -> Result<()> {
        page_user(ctx, Route::Requests).await?;
        let req = request::find_request(&ctx.data().database, &id).await?;

        let mut response = format!("📋 **Request #{}**\n\n", req.id);
        writeln!(&mut response, "👤 Requester: {}", req.requester)?;
        writeln!(&mut response, "🏭 Plant: {}", req.plant)?;
        writeln!(
            &mut response,
            "📅 Submitted: {}",
            req.submission_date.format("%Y-%m-%d")
        )?;
        writeln!(
            &mut response,
            "{} Status: {}",
            status_emoji(req.status),
            req.status
        )?;
        writeln!(
            &mut response,
            "📎 File: {}",
            req.file_name.as_deref().unwrap_or("none")
        )?;
        if !req.remarks.is_empty() {
            writeln!(&mut response, "📝 Remarks: {}", req.remarks)?;
        }
        if let Some(comments) = req.sp_comments.as_deref().filter(|c| !c.is_empty()) {
            writeln!(&mut response, "💬 SP Comments: {comments}")?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Raises a new validation request with a GRN data file.
    #[poise::command(slash_command)]
    pub async fn new_request(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Plant the GRN data belongs to"]
        #[autocomplete = "autocomplete::autocomplete_plant"]
        plant: String,
        #[description = "GRN data file (.xlsx, .xls or .csv)"] file: Option<serenity::Attachment>,
        #[description = "Remarks for the reviewers"] remarks: Option<String>,
    ) -> Result<()> {
        let user = page_user(ctx, Route::Requests).await?;

        let form = request::RequestForm {
            plant,
            remarks: remarks.unwrap_or_default(),
            file_name: file.map(|attachment| attachment.filename),
        };
        let today = chrono::Local::now().date_naive();
        let created = request::submit_request(&ctx.data().database, &user, form, today).await?;

        ctx.say(format!(
            "✅ Request **#{}** submitted for {} with `{}`. The Seven Procure team has been notified.",
            created.id,
            created.plant,
            created.file_name.as_deref().unwrap_or_default()
        ))
        .await?;
        Ok(())
    }

    /// Moves a request to a new status (Seven Procure only).
    #[poise::command(slash_command, prefix_command)]
    pub async fn review_request(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Request id"] id: String,
        #[description = "New status"] status: StatusChoice,
        #[description = "Comments for the requester"] comments: Option<String>,
    ) -> Result<()> {
        let user = page_user(ctx, Route::Requests).await?;
        let status = RequestStatus::from(status);

        let applied =
            request::review_request(&ctx.data().database, &user, id.trim(), status, comments)
                .await?;

        if applied {
            ctx.say(format!(
                "✅ Request **#{}** is now **{status}**. The requester has been notified.",
                id.trim()
            ))
            .await?;
        } else {
            ctx.say(format!(
                "ℹ️ Request **#{}** is already {status}. Nothing changed.",
                id.trim()
            ))
            .await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
