//! Dashboard command - headline quality statistics as an embed.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, page_user},
        core::{library, navigation::Route, report, request, vendor},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Shows the dashboard: library totals, spend, approval rates and vendors.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        use poise::serenity_prelude as serenity;

        let user = page_user(ctx, Route::Dashboard).await?;
        let data = ctx.data();
        let db = &data.database;

        let items = library::get_all_library_items(db).await?;
        let vendors = vendor::get_all_vendors(db).await?;
        let requests = request::get_all_requests(db).await?;

        let summary = report::dashboard_summary(&items, &vendors);
        let breakdown = report::generate_report(
            &items,
            &report::ReportFilter::default(),
            &data.config.plants,
            &data.config.categories,
        );

        let mut plant_lines = String::new();
        for row in &breakdown.by_plant {
            writeln!(
                &mut plant_lines,
                "{}: {} items · {}",
                row.name,
                row.summary.total_items,
                report::format_lakh(row.summary.total_value)
            )?;
        }
        if plant_lines.is_empty() {
            plant_lines.push_str("_No items yet_");
        }

        let mut category_lines = String::new();
        for row in &breakdown.by_category {
            let share = report::percent(row.summary.total_items, summary.items.total_items);
            writeln!(
                &mut category_lines,
                "{} {} {}",
                report::format_share_bar(share, Some(8)),
                row.name,
                report::format_percent(share)
            )?;
        }
        if category_lines.is_empty() {
            category_lines.push_str("_No items yet_");
        }

        let mut request_lines = String::new();
        for (status, count) in request::status_counts(&requests) {
            writeln!(&mut request_lines, "{status}: {count}")?;
        }

        let rating = summary
            .average_rating
            .map_or_else(|| "n/a".to_string(), |r| format!("{r:.1}"));

        let embed = serenity::CreateEmbed::default()
            .title("📊 IMQAP Dashboard")
            .description(format!(
                "Welcome back, {} ({})",
                user.name,
                user.role.label()
            ))
            .color(0x0034_98DB)
            .field("Total Items", summary.items.total_items.to_string(), true)
            .field("Approved", summary.items.approved_items.to_string(), true)
            .field("Rejected", summary.items.rejected_items.to_string(), true)
            .field(
                "Approval Rate",
                report::format_percent(summary.items.approval_rate()),
                true,
            )
            .field(
                "Rejection Rate",
                report::format_percent(summary.items.rejection_rate()),
                true,
            )
            .field(
                "Total Spend",
                report::format_lakh(summary.items.total_value),
                true,
            )
            .field(
                "Active Vendors",
                format!(
                    "{} ({} QC eligible, avg rating {rating})",
                    summary.active_vendors, summary.quality_check_eligible
                ),
                false,
            )
            .field("Plant-wise Inspections", plant_lines, false)
            .field("Category Distribution", category_lines, false)
            .field("Requests", request_lines, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
