//! Autocomplete handlers for Discord slash command parameters.
//!
//! Plants, categories and inspection methods come from the portal settings;
//! vendor names come from the vendor registry.

use crate::{
    bot::BotData,
    core::vendor::{self, SupplyTypeFilter},
    entities::{RequestStatus, SupplyType},
    errors::Error,
};

/// Discord autocomplete limit.
const MAX_SUGGESTIONS: usize = 25;

/// Options containing `partial` (case-insensitive), in their original order.
fn matching<'a>(options: impl IntoIterator<Item = &'a str>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    options
        .into_iter()
        .filter(|option| option.to_lowercase().contains(&partial_lower))
        .map(ToString::to_string)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests configured plant names.
pub async fn autocomplete_plant(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(ctx.data().config.plants.iter().map(String::as_str), partial)
}

/// Suggests configured item categories.
pub async fn autocomplete_category(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(
        ctx.data().config.categories.iter().map(String::as_str),
        partial,
    )
}

/// Suggests configured inspection methods.
pub async fn autocomplete_inspection_method(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(
        ctx.data()
            .config
            .inspection_methods
            .iter()
            .map(String::as_str),
        partial,
    )
}

/// Suggests registered vendor names, alphabetically.
pub async fn autocomplete_vendor_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(vendors) = vendor::get_all_vendors(&ctx.data().database).await else {
        return Vec::new();
    };

    let mut names = matching(vendors.iter().map(|v| v.name.as_str()), partial);
    names.sort();
    names.dedup();
    names
}

/// Suggests request statuses by their stored value.
pub async fn autocomplete_request_status(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(RequestStatus::ALL.iter().map(|s| s.as_str()), partial)
}

/// Suggests settable supply types.
pub async fn autocomplete_supply_type(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(SupplyType::ALL.iter().map(|s| s.as_str()), partial)
}

/// Suggests the vendor page's supply-type filter options.
pub async fn autocomplete_supply_type_filter(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let options = SupplyType::ALL
        .iter()
        .map(|s| s.as_str())
        .chain([SupplyTypeFilter::BLACK_LISTED]);
    matching(options, partial)
}
