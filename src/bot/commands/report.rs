//! Report commands - the filtered quality report and its export.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, FIELD_LIMIT, handlers::autocomplete, page_user, parse_date, push_capped},
        core::{library, navigation::Route, notify::ExportFormat, report},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Export formats offered on the report page.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum ExportChoice {
        #[name = "Excel"]
        Excel,
        #[name = "PDF"]
        Pdf,
    }

    impl From<ExportChoice> for ExportFormat {
        fn from(choice: ExportChoice) -> Self {
            match choice {
                ExportChoice::Excel => Self::Excel,
                ExportChoice::Pdf => Self::Pdf,
            }
        }
    }

    /// Shows the quality report, with plant and category breakdowns.
    #[allow(clippy::too_many_lines)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn report(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Plant"]
        #[autocomplete = "autocomplete::autocomplete_plant"]
        plant: Option<String>,
        #[description = "Supplier"]
        #[autocomplete = "autocomplete::autocomplete_vendor_name"]
        vendor: Option<String>,
        #[description = "Category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "From date (YYYY-MM-DD)"] date_from: Option<String>,
        #[description = "To date (YYYY-MM-DD)"] date_to: Option<String>,
    ) -> Result<()> {
        use poise::serenity_prelude as serenity;

        page_user(ctx, Route::Reports).await?;
        let data = ctx.data();

        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let filter = report::ReportFilter {
            plant: non_empty(plant),
            vendor: non_empty(vendor),
            category: non_empty(category),
            date_from: non_empty(date_from)
                .map(|d| parse_date("From date", &d))
                .transpose()?,
            date_to: non_empty(date_to)
                .map(|d| parse_date("To date", &d))
                .transpose()?,
        };

        let items = library::get_all_library_items(&data.database).await?;
        let quality = report::generate_report(
            &items,
            &filter,
            &data.config.plants,
            &data.config.categories,
        );
        let summary = &quality.summary;

        let mut plant_lines = String::new();
        let rows = quality
            .by_plant
            .iter()
            .map(|row| {
                format!(
                    "**{}** - {} total · ✅ {} · ❌ {} · {}",
                    row.name,
                    row.summary.total_items,
                    row.summary.approved_items,
                    row.summary.rejected_items,
                    report::format_lakh(row.summary.total_value)
                )
            })
            .collect();
        push_capped(&mut plant_lines, rows, usize::MAX, FIELD_LIMIT);
        if plant_lines.is_empty() {
            plant_lines.push_str("_No items_");
        }

        let mut category_lines = String::new();
        let rows = quality
            .by_category
            .iter()
            .map(|row| {
                format!(
                    "**{}** - {} total · ✅ {} · ❌ {} · {} approved",
                    row.name,
                    row.summary.total_items,
                    row.summary.approved_items,
                    row.summary.rejected_items,
                    report::format_percent(row.summary.approval_rate())
                )
            })
            .collect();
        push_capped(&mut category_lines, rows, usize::MAX, FIELD_LIMIT);
        if category_lines.is_empty() {
            category_lines.push_str("_No items_");
        }

        // Newest month first
        let mut timeline_lines = String::new();
        let months = quality
            .timeline
            .iter()
            .rev()
            .map(|point| {
                format!(
                    "`{}` {} approved · {} rejected",
                    point.month, point.approved, point.rejected
                )
            })
            .collect();
        push_capped(&mut timeline_lines, months, usize::MAX, FIELD_LIMIT);
        if timeline_lines.is_empty() {
            timeline_lines.push_str("_No items_");
        }

        let mut description = String::from("Filters: ");
        let mut any_filter = false;
        for (label, value) in [
            ("plant", filter.plant.as_deref()),
            ("vendor", filter.vendor.as_deref()),
            ("category", filter.category.as_deref()),
        ] {
            if let Some(value) = value {
                write!(&mut description, "{label}={value} ")?;
                any_filter = true;
            }
        }
        if let Some(from) = filter.date_from {
            write!(&mut description, "from={from} ")?;
            any_filter = true;
        }
        if let Some(to) = filter.date_to {
            write!(&mut description, "to={to} ")?;
            any_filter = true;
        }
        if !any_filter {
            description.push_str("none");
        }

        let embed = serenity::CreateEmbed::default()
            .title("📈 Quality Report")
            .description(description)
            .color(0x0034_98DB)
            .field("Total Items", summary.total_items.to_string(), true)
            .field(
                "Approval Rate",
                report::format_percent(summary.approval_rate()),
                true,
            )
            .field(
                "Rejection Rate",
                report::format_percent(summary.rejection_rate()),
                true,
            )
            .field("Total Value", report::format_lakh(summary.total_value), true)
            .field("Plant-wise Summary", plant_lines, false)
            .field("Category-wise Summary", category_lines, false)
            .field("Approval Timeline", timeline_lines, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Exports the quality report as Excel or PDF.
    #[poise::command(slash_command, prefix_command)]
    pub async fn export_report(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Export format"] format: ExportChoice,
    ) -> Result<()> {
        page_user(ctx, Route::Reports).await?;

        let format = ExportFormat::from(format);
        report::export_report(format);
        ctx.say(format!("📤 Exporting report as {format}...")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
