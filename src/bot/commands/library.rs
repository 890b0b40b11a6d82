//! Quality library commands - listing, adding, approving and exporting items.
//!
//! The library page is restricted to the Seven Procure role, so every
//! subcommand checks the `Library` route before touching the store.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, LIST_LIMIT, MESSAGE_LIMIT, handlers::autocomplete, page_user, parse_date,
            parse_id_list, push_capped,
        },
        core::{library, navigation::Route, report},
        errors::{Error, Result},
    };

    /// Quality library of inspected items (Seven Procure only).
    #[poise::command(
        slash_command,
        prefix_command,
        subcommands(
            "library_list",
            "library_add",
            "library_approve",
            "library_reject",
            "library_export"
        ),
        subcommand_required
    )]
    pub async fn library(_ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        Ok(())
    }

    fn filter_from(
        plant: Option<String>,
        category: Option<String>,
        approved: Option<bool>,
        search: Option<String>,
    ) -> library::LibraryFilter {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        library::LibraryFilter {
            plant: non_empty(plant),
            category: non_empty(category),
            approved,
            search: non_empty(search),
        }
    }

    /// Lists library items matching the filters.
    #[poise::command(slash_command, prefix_command, rename = "list")]
    pub async fn library_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Plant"]
        #[autocomplete = "autocomplete::autocomplete_plant"]
        plant: Option<String>,
        #[description = "Category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "Only approved (true) or rejected (false) items"] approved: Option<bool>,
        #[description = "Search description, supplier or GRN number"] search: Option<String>,
    ) -> Result<()> {
        page_user(ctx, Route::Library).await?;

        let items = library::get_all_library_items(&ctx.data().database).await?;
        let filter = filter_from(plant, category, approved, search);
        let found = library::filter_library_items(&items, &filter);

        let mut response = format!(
            "📚 **Quality Library** - {} of {} items\n\n",
            found.len(),
            items.len()
        );
        if found.is_empty() {
            response.push_str("No items match these filters.");
        }
        let lines = found
            .iter()
            .map(|item| {
                format!(
                    "{} `#{}` **{}** · {} · {} · {} · {} × {:.2} = {}",
                    if item.approved { "✅" } else { "❌" },
                    item.id,
                    item.item_description,
                    item.grn_no,
                    item.supplier_name,
                    item.plant,
                    item.grn_quantity,
                    item.item_rate,
                    report::format_lakh(library::item_value(item))
                )
            })
            .collect();
        push_capped(&mut response, lines, LIST_LIMIT, MESSAGE_LIMIT);

        ctx.say(response).await?;
        Ok(())
    }

    /// Adds an inspected item to the library.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command, rename = "add")]
    pub async fn library_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item description"] item_description: String,
        #[description = "GRN number"] grn_no: String,
        #[description = "GRN date (YYYY-MM-DD)"] grn_date: String,
        #[description = "Supplier"]
        #[autocomplete = "autocomplete::autocomplete_vendor_name"]
        supplier_name: String,
        #[description = "PO number"] po_no: String,
        #[description = "GRN quantity"] grn_quantity: i64,
        #[description = "Item rate"] item_rate: f64,
        #[description = "Item code"] item_code: String,
        #[description = "Plant"]
        #[autocomplete = "autocomplete::autocomplete_plant"]
        plant: String,
        #[description = "Category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Inspection method"]
        #[autocomplete = "autocomplete::autocomplete_inspection_method"]
        inspection_method: String,
        #[description = "Inspection outcome"] outcome: Option<String>,
        #[description = "Regular supply? (default: false)"] regular_supply: Option<bool>,
        #[description = "Physical sample taken? (default: false)"] physical_sample: Option<bool>,
        #[description = "Repeat inspection needed? (default: false)"] repeat_inspection: Option<
            bool,
        >,
        #[description = "Repeat inspection date (YYYY-MM-DD)"] repeat_date: Option<String>,
        #[description = "Technical specifications"] technical_specs: Option<String>,
        #[description = "Remarks"] remarks: Option<String>,
        #[description = "Approve on entry? (default: false)"] approved: Option<bool>,
    ) -> Result<()> {
        let user = page_user(ctx, Route::Library).await?;

        let grn_date = parse_date("GRN date", &grn_date)?;
        let repeat_date = repeat_date
            .filter(|d| !d.trim().is_empty())
            .map(|d| parse_date("Repeat date", &d))
            .transpose()?;

        let form = library::LibraryItemForm {
            item_description,
            grn_no,
            grn_date,
            supplier_name,
            po_no,
            grn_quantity,
            item_rate,
            item_code,
            plant,
            category,
            regular_supply: regular_supply.unwrap_or(false),
            physical_sample: physical_sample.unwrap_or(false),
            repeat_inspection: repeat_inspection.unwrap_or(false),
            repeat_date,
            technical_specs: technical_specs.unwrap_or_default(),
            inspection_method,
            outcome: outcome.unwrap_or_default(),
            remarks: remarks.unwrap_or_default(),
            approved: approved.unwrap_or(false),
        };

        let today = chrono::Local::now().date_naive();
        let item = library::submit_library_item(&ctx.data().database, &user, form, today).await?;

        let vendor_note = if item.vendor_code.is_empty() {
            "no registered vendor".to_string()
        } else {
            format!("vendor {}", item.vendor_code)
        };
        ctx.say(format!(
            "✅ Added **{}** (`#{}`, {}) from {} ({vendor_note}) worth {}.",
            item.item_description,
            item.id,
            item.grn_no,
            item.supplier_name,
            report::format_lakh(library::item_value(&item))
        ))
        .await?;
        Ok(())
    }

    async fn review(
        ctx: poise::Context<'_, BotData, Error>,
        ids: &str,
        approved: bool,
    ) -> Result<()> {
        let user = page_user(ctx, Route::Library).await?;
        let ids = parse_id_list(ids);

        let touched = library::set_approval(&ctx.data().database, &user, &ids, approved).await?;

        ctx.say(format!(
            "{} {} {touched} item(s). Consolidated email sent for {} selected item(s).",
            if approved { "✅" } else { "❌" },
            if approved { "Approved" } else { "Rejected" },
            ids.len()
        ))
        .await?;
        Ok(())
    }

    /// Approves the selected items.
    #[poise::command(slash_command, prefix_command, rename = "approve")]
    pub async fn library_approve(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item ids, separated by commas or spaces"] ids: String,
    ) -> Result<()> {
        review(ctx, &ids, true).await
    }

    /// Rejects the selected items.
    #[poise::command(slash_command, prefix_command, rename = "reject")]
    pub async fn library_reject(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item ids, separated by commas or spaces"] ids: String,
    ) -> Result<()> {
        review(ctx, &ids, false).await
    }

    /// Exports the library items matching the filters.
    #[poise::command(slash_command, prefix_command, rename = "export")]
    pub async fn library_export(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Plant"]
        #[autocomplete = "autocomplete::autocomplete_plant"]
        plant: Option<String>,
        #[description = "Category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "Only approved (true) or rejected (false) items"] approved: Option<bool>,
        #[description = "Search description, supplier or GRN number"] search: Option<String>,
    ) -> Result<()> {
        page_user(ctx, Route::Library).await?;

        let items = library::get_all_library_items(&ctx.data().database).await?;
        let filter = filter_from(plant, category, approved, search);
        let found = library::filter_library_items(&items, &filter);
        library::export_library(&found);

        ctx.say(format!(
            "📤 Exporting library data ({} items)...",
            found.len()
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
