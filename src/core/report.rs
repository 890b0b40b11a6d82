//! Dashboard and report generation.
//!
//! Everything here is a pure projection over the current store contents:
//! recomputed on every call, nothing cached. The bot layer fetches the
//! collections and formats the structs returned here.

use super::{
    library::item_value,
    notify::{self, ExportFormat, Notification},
};
use crate::entities::{library_item, vendor};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Headline figures for the dashboard and the report page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Items considered
    pub total_items: usize,
    /// Items with `approved == true`
    pub approved_items: usize,
    /// Items with `approved == false`
    pub rejected_items: usize,
    /// Σ quantity × rate
    pub total_value: f64,
}

impl Summary {
    /// Summarizes the given items.
    #[must_use]
    pub fn of(items: &[&library_item::Model]) -> Self {
        let approved_items = items.iter().filter(|item| item.approved).count();
        Self {
            total_items: items.len(),
            approved_items,
            rejected_items: items.len() - approved_items,
            total_value: items.iter().map(|item| item_value(item)).sum(),
        }
    }

    /// Approved share in percent, 0 when there are no items.
    #[must_use]
    pub fn approval_rate(&self) -> f64 {
        percent(self.approved_items, self.total_items)
    }

    /// Rejected share in percent, 0 when there are no items.
    #[must_use]
    pub fn rejection_rate(&self) -> f64 {
        percent(self.rejected_items, self.total_items)
    }
}

/// Dashboard figures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    /// Library totals
    pub items: Summary,
    /// Registered vendors
    pub active_vendors: usize,
    /// Vendors eligible for quality checks
    pub quality_check_eligible: usize,
    /// Mean vendor rating, `None` without vendors
    pub average_rating: Option<f64>,
}

/// Computes the dashboard over the whole library and vendor registry.
#[must_use]
pub fn dashboard_summary(
    items: &[library_item::Model],
    vendors: &[vendor::Model],
) -> DashboardSummary {
    let all: Vec<&library_item::Model> = items.iter().collect();
    #[allow(clippy::cast_precision_loss)] // vendor counts are tiny
    let average_rating = (!vendors.is_empty()).then(|| {
        vendors.iter().map(|v| v.performance_rating).sum::<f64>() / vendors.len() as f64
    });

    DashboardSummary {
        items: Summary::of(&all),
        active_vendors: vendors.len(),
        quality_check_eligible: vendors.iter().filter(|v| v.quality_check_eligible).count(),
        average_rating,
    }
}

/// Report page filter. `None` means "any"; the date range is inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Exact plant
    pub plant: Option<String>,
    /// Exact supplier name
    pub vendor: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Earliest entry date
    pub date_from: Option<NaiveDate>,
    /// Latest entry date
    pub date_to: Option<NaiveDate>,
}

impl ReportFilter {
    /// Whether `item` satisfies every set predicate.
    #[must_use]
    pub fn matches(&self, item: &library_item::Model) -> bool {
        self.plant.as_ref().is_none_or(|p| &item.plant == p)
            && self.vendor.as_ref().is_none_or(|v| &item.supplier_name == v)
            && self.category.as_ref().is_none_or(|c| &item.category == c)
            && self.date_from.is_none_or(|from| item.created_date >= from)
            && self.date_to.is_none_or(|to| item.created_date <= to)
    }
}

/// The items matching `filter`, in their original order.
#[must_use]
pub fn filter_report_items<'a>(
    items: &'a [library_item::Model],
    filter: &ReportFilter,
) -> Vec<&'a library_item::Model> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// One row of a plant- or category-wise breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    /// Plant or category name
    pub name: String,
    /// Figures for that group
    pub summary: Summary,
}

/// One month of the approval timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePoint {
    /// `YYYY-MM`
    pub month: String,
    /// Approved items entered that month
    pub approved: usize,
    /// Rejected items entered that month
    pub rejected: usize,
}

impl TimelinePoint {
    /// Items entered that month.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.approved + self.rejected
    }
}

/// A complete report over the filtered items.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    /// Totals over the filtered items
    pub summary: Summary,
    /// Per plant, in configured order, groups without items dropped
    pub by_plant: Vec<Breakdown>,
    /// Per category, in configured order, groups without items dropped
    pub by_category: Vec<Breakdown>,
    /// Per entry month, oldest first
    pub timeline: Vec<TimelinePoint>,
}

/// Builds the report for `filter`. Groups are taken from the configured
/// plant and category lists, so items outside those lists only count
/// towards the totals and the timeline.
#[must_use]
pub fn generate_report(
    items: &[library_item::Model],
    filter: &ReportFilter,
    plants: &[String],
    categories: &[String],
) -> QualityReport {
    let filtered = filter_report_items(items, filter);

    let group = |names: &[String], key: fn(&library_item::Model) -> &str| -> Vec<Breakdown> {
        names
            .iter()
            .map(|name| {
                let members: Vec<&library_item::Model> = filtered
                    .iter()
                    .copied()
                    .filter(|item| key(item) == name.as_str())
                    .collect();
                Breakdown {
                    name: name.clone(),
                    summary: Summary::of(&members),
                }
            })
            .filter(|row| row.summary.total_items > 0)
            .collect()
    };

    let by_plant = group(plants, |item| item.plant.as_str());
    let by_category = group(categories, |item| item.category.as_str());

    let mut months: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for item in &filtered {
        let entry = months
            .entry(item.created_date.format("%Y-%m").to_string())
            .or_default();
        if item.approved {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }
    let timeline = months
        .into_iter()
        .map(|(month, (approved, rejected))| TimelinePoint {
            month,
            approved,
            rejected,
        })
        .collect();

    QualityReport {
        summary: Summary::of(&filtered),
        by_plant,
        by_category,
        timeline,
    }
}

/// Simulated report export.
pub fn export_report(format: ExportFormat) {
    notify::dispatch(&Notification::Export {
        subject: "report".to_string(),
        format: Some(format),
    });
}

/// `part / whole` in percent, 0 for an empty whole.
#[must_use]
#[allow(clippy::cast_precision_loss)] // item counts are far below 2^52
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Formats rupees in lakh, e.g. `₹15.00L` for 1,500,000.
#[must_use]
pub fn format_lakh(amount: f64) -> String {
    format!("₹{:.2}L", amount / 100_000.0)
}

/// Formats a percentage with one decimal, e.g. `66.7%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Text bar for a share, like `[████░░░░░░]`.
#[must_use]
pub fn format_share_bar(percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percent.clamp(0.0, 100.0);

    // clamped ∈ [0, 100] and length is small, so the cast stays in [0, length]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        config::PortalConfig,
        core::{library, vendor as vendors},
        errors::Result,
        test_utils::*,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_on_seed_data() -> Result<()> {
        let db = setup_seeded_db().await?;
        let items = library::get_all_library_items(&db).await?;
        let vendor_list = vendors::get_all_vendors(&db).await?;

        let dashboard = dashboard_summary(&items, &vendor_list);
        assert_eq!(dashboard.items.total_items, 1);
        assert_eq!(dashboard.items.approved_items, 1);
        assert_eq!(dashboard.items.rejected_items, 0);
        assert_eq!(dashboard.items.total_value, 25_000.0);
        assert_eq!(dashboard.items.approval_rate(), 100.0);
        assert_eq!(dashboard.active_vendors, 2);
        assert_eq!(dashboard.quality_check_eligible, 2);
        assert!((dashboard.average_rating.unwrap() - 4.35).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_empty_dashboard_has_zero_rates() {
        let dashboard = dashboard_summary(&[], &[]);
        assert_eq!(dashboard.items.approval_rate(), 0.0);
        assert_eq!(dashboard.items.rejection_rate(), 0.0);
        assert!(dashboard.average_rating.is_none());
    }

    #[tokio::test]
    async fn test_report_filters_and_breakdowns() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_test_library_item(&db, "Plant 1", "Fabrication", true).await?;
        let b = create_test_library_item(&db, "Plant 1", "Packaging", false).await?;
        let c = create_test_library_item(&db, "SPD", "Fabrication", true).await?;
        // Entry dates: a in January, b and c in February
        for (item, day) in [(&a, date(2024, 1, 20)), (&b, date(2024, 2, 3)), (&c, date(2024, 2, 28))]
        {
            library::update_library_item(
                &db,
                &item.id,
                library::LibraryItemPatch {
                    created_date: Some(day),
                    ..Default::default()
                },
            )
            .await?;
        }

        let items = library::get_all_library_items(&db).await?;
        let config = PortalConfig::default();

        let report = generate_report(
            &items,
            &ReportFilter::default(),
            &config.plants,
            &config.categories,
        );
        assert_eq!(report.summary.total_items, 3);
        assert_eq!(report.summary.rejected_items, 1);
        let plant_names: Vec<&str> = report.by_plant.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(plant_names, vec!["Plant 1", "SPD"]);
        assert_eq!(report.by_plant[0].summary.total_items, 2);
        assert_eq!(report.by_plant[0].summary.approved_items, 1);
        let category_names: Vec<&str> =
            report.by_category.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(category_names, vec!["Fabrication", "Packaging"]);
        assert_eq!(
            report.timeline,
            vec![
                TimelinePoint {
                    month: "2024-01".to_string(),
                    approved: 1,
                    rejected: 0
                },
                TimelinePoint {
                    month: "2024-02".to_string(),
                    approved: 1,
                    rejected: 1
                },
            ]
        );

        let february = ReportFilter {
            date_from: Some(date(2024, 2, 3)),
            date_to: Some(date(2024, 2, 28)),
            ..Default::default()
        };
        let report = generate_report(&items, &february, &config.plants, &config.categories);
        assert_eq!(report.summary.total_items, 2);

        let fabrication_in_spd = ReportFilter {
            plant: Some("SPD".to_string()),
            category: Some("Fabrication".to_string()),
            ..Default::default()
        };
        let report =
            generate_report(&items, &fabrication_in_spd, &config.plants, &config.categories);
        assert_eq!(report.summary.total_items, 1);
        assert_eq!(report.summary.approval_rate(), 100.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_report_vendor_filter_uses_supplier_name() -> Result<()> {
        let db = setup_seeded_db().await?;
        let items = library::get_all_library_items(&db).await?;

        let abc = ReportFilter {
            vendor: Some("ABC Suppliers Ltd".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_report_items(&items, &abc).len(), 1);

        let xyz = ReportFilter {
            vendor: Some("XYZ Materials Corp".to_string()),
            ..Default::default()
        };
        assert!(filter_report_items(&items, &xyz).is_empty());
        Ok(())
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(format_percent(percent(2, 3)), "66.7%");
    }

    #[test]
    fn test_format_lakh() {
        assert_eq!(format_lakh(1_500_000.0), "₹15.00L");
        assert_eq!(format_lakh(25_000.0), "₹0.25L");
        assert_eq!(format_lakh(0.0), "₹0.00L");
    }

    #[test]
    fn test_format_share_bar() {
        assert_eq!(format_share_bar(100.0, Some(10)), "[██████████]");
        assert_eq!(format_share_bar(50.0, Some(10)), "[█████░░░░░]");
        assert_eq!(format_share_bar(-5.0, Some(4)), "[░░░░]");
    }
}
