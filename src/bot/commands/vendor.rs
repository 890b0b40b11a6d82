//! Vendor registry commands - listing, adding and updating vendors.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, LIST_LIMIT, MESSAGE_LIMIT, handlers::autocomplete, page_user, parse_date,
            push_capped,
        },
        core::{navigation::Route, vendor},
        entities::SupplyType,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Lists vendors, filtered by name/code and supply type.
    #[poise::command(slash_command, prefix_command)]
    pub async fn vendors(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Search vendor name or code"] search: Option<String>,
        #[description = "Supply type"]
        #[autocomplete = "autocomplete::autocomplete_supply_type_filter"]
        supply_type: Option<String>,
    ) -> Result<()> {
        page_user(ctx, Route::Vendors).await?;

        let filter = vendor::VendorFilter {
            search: search.unwrap_or_default(),
            supply_type: vendor::SupplyTypeFilter::parse(supply_type.as_deref().unwrap_or(""))?,
        };
        let all = vendor::get_all_vendors(&ctx.data().database).await?;
        let found = vendor::filter_vendors(&all, &filter);

        let mut response = format!(
            "🏢 **Vendor Registry** - {} of {} vendors\n\n",
            found.len(),
            all.len()
        );
        if found.is_empty() {
            response.push_str("No vendors match these filters.");
        }
        let lines = found
            .iter()
            .map(|v| format!("`#{}` {}", v.id, vendor::format_vendor_line(v)))
            .collect();
        push_capped(&mut response, lines, LIST_LIMIT, MESSAGE_LIMIT);

        ctx.say(response).await?;
        Ok(())
    }

    /// Adds a vendor to the registry.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_vendor(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Vendor code"] vendor_code: String,
        #[description = "Vendor name"] name: String,
        #[description = "Supply type (regular or one-time)"]
        #[autocomplete = "autocomplete::autocomplete_supply_type"]
        supply_type: String,
        #[description = "Annual sale value in rupees"] annual_sale_value: f64,
        #[description = "Last audit date (YYYY-MM-DD)"] last_audit_date: String,
        #[description = "Performance rating, 1.0 to 5.0"] performance_rating: f64,
        #[description = "Eligible for quality checks? (default: true)"]
        quality_check_eligible: Option<bool>,
    ) -> Result<()> {
        page_user(ctx, Route::Vendors).await?;

        let new = vendor::NewVendor {
            vendor_code,
            name,
            supply_type: supply_type.parse::<SupplyType>()?,
            annual_sale_value,
            quality_check_eligible: quality_check_eligible.unwrap_or(true),
            last_audit_date: parse_date("Last audit date", &last_audit_date)?,
            performance_rating,
        };
        new.validate()?;

        let created = vendor::add_vendor(&ctx.data().database, new).await?;
        ctx.say(format!(
            "✅ Added vendor `#{}`\n{}",
            created.id,
            vendor::format_vendor_line(&created)
        ))
        .await?;
        Ok(())
    }

    /// Updates fields of a vendor; omitted fields are left as they are.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn update_vendor(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Vendor id"] id: String,
        #[description = "New vendor code"] vendor_code: Option<String>,
        #[description = "New name"] name: Option<String>,
        #[description = "New supply type"]
        #[autocomplete = "autocomplete::autocomplete_supply_type"]
        supply_type: Option<String>,
        #[description = "New annual sale value"] annual_sale_value: Option<f64>,
        #[description = "Eligible for quality checks?"] quality_check_eligible: Option<bool>,
        #[description = "New last audit date (YYYY-MM-DD)"] last_audit_date: Option<String>,
        #[description = "New performance rating"] performance_rating: Option<f64>,
    ) -> Result<()> {
        page_user(ctx, Route::Vendors).await?;

        let patch = vendor::VendorPatch {
            vendor_code,
            name,
            supply_type: supply_type.map(|s| s.parse::<SupplyType>()).transpose()?,
            annual_sale_value,
            quality_check_eligible,
            last_audit_date: last_audit_date
                .map(|d| parse_date("Last audit date", &d))
                .transpose()?,
            performance_rating,
        };
        if patch.is_empty() {
            ctx.say("ℹ️ Nothing to update.").await?;
            return Ok(());
        }
        patch.validate()?;

        let db = &ctx.data().database;
        let touched = vendor::update_vendor(db, id.trim(), patch).await?;
        if touched == 0 {
            ctx.say(format!("❌ Vendor `#{}` not found.", id.trim()))
                .await?;
            return Ok(());
        }

        let mut response = format!("✅ Updated {touched} vendor record(s)\n");
        if let Some(updated) = vendor::get_vendor_by_id(db, id.trim()).await? {
            writeln!(&mut response, "{}", vendor::format_vendor_line(&updated))?;
        }
        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
