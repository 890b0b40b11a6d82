//! Vendor registry business logic.

use super::{ids::next_id, report::format_lakh};
use crate::{
    entities::{SupplyType, Vendor, vendor},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryOrder, Set, prelude::*};
use std::fmt;
use tracing::debug;

/// A vendor without its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVendor {
    /// Vendor code (required)
    pub vendor_code: String,
    /// Registered name (required)
    pub name: String,
    /// Regular or one-time
    pub supply_type: SupplyType,
    /// Annual sale value, not negative
    pub annual_sale_value: f64,
    /// Eligible for quality checks
    pub quality_check_eligible: bool,
    /// Last audit date
    pub last_audit_date: NaiveDate,
    /// Rating between 1.0 and 5.0
    pub performance_rating: f64,
}

impl NewVendor {
    /// Required-field and range checks from the add-vendor form.
    pub fn validate(&self) -> Result<()> {
        if self.vendor_code.trim().is_empty() {
            return Err(Error::validation("Vendor code is required"));
        }
        if self.name.trim().is_empty() {
            return Err(Error::validation("Vendor name is required"));
        }
        check_sale_value(self.annual_sale_value)?;
        check_rating(self.performance_rating)
    }
}

fn check_sale_value(value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::validation("Annual sale value must be a non-negative number"))
    }
}

fn check_rating(rating: f64) -> Result<()> {
    if (1.0..=5.0).contains(&rating) {
        Ok(())
    } else {
        Err(Error::validation("Performance rating must be between 1.0 and 5.0"))
    }
}

/// Fields to merge into an existing vendor. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct VendorPatch {
    pub vendor_code: Option<String>,
    pub name: Option<String>,
    pub supply_type: Option<SupplyType>,
    pub annual_sale_value: Option<f64>,
    pub quality_check_eligible: Option<bool>,
    pub last_audit_date: Option<NaiveDate>,
    pub performance_rating: Option<f64>,
}

impl VendorPatch {
    /// True when the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Range checks for the numeric fields that are present.
    pub fn validate(&self) -> Result<()> {
        if let Some(value) = self.annual_sale_value {
            check_sale_value(value)?;
        }
        if let Some(rating) = self.performance_rating {
            check_rating(rating)?;
        }
        Ok(())
    }

    fn into_active_model(self) -> vendor::ActiveModel {
        vendor::ActiveModel {
            vendor_code: self.vendor_code.map_or(ActiveValue::NotSet, Set),
            name: self.name.map_or(ActiveValue::NotSet, Set),
            supply_type: self.supply_type.map_or(ActiveValue::NotSet, Set),
            annual_sale_value: self.annual_sale_value.map_or(ActiveValue::NotSet, Set),
            quality_check_eligible: self.quality_check_eligible.map_or(ActiveValue::NotSet, Set),
            last_audit_date: self.last_audit_date.map_or(ActiveValue::NotSet, Set),
            performance_rating: self.performance_rating.map_or(ActiveValue::NotSet, Set),
            ..Default::default()
        }
    }
}

/// Supply-type choice on the vendor page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SupplyTypeFilter {
    /// No restriction
    #[default]
    All,
    /// Exactly this supply type
    Only(SupplyType),
    /// The "Black Listed" option. No vendor can carry this supply type, so it
    /// never matches anything.
    BlackListed,
}

impl SupplyTypeFilter {
    /// Label of the black-listed option, compared case-insensitively.
    pub const BLACK_LISTED: &'static str = "Black Listed";

    /// Parses a filter option; the empty string is [`SupplyTypeFilter::All`].
    pub fn parse(value: &str) -> Result<Self> {
        if value.is_empty() {
            Ok(Self::All)
        } else if value.eq_ignore_ascii_case(Self::BLACK_LISTED) {
            Ok(Self::BlackListed)
        } else {
            value.parse().map(Self::Only)
        }
    }

    /// Whether a vendor with `supply_type` passes.
    #[must_use]
    pub fn matches(self, supply_type: SupplyType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == supply_type,
            Self::BlackListed => supply_type
                .as_str()
                .eq_ignore_ascii_case(Self::BLACK_LISTED),
        }
    }
}

/// Vendor page filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorFilter {
    /// Case-insensitive substring of name or code; empty matches all
    pub search: String,
    /// Supply-type restriction
    pub supply_type: SupplyTypeFilter,
}

impl VendorFilter {
    /// Whether `vendor` satisfies both predicates.
    #[must_use]
    pub fn matches(&self, vendor: &vendor::Model) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = vendor.name.to_lowercase().contains(&needle)
            || vendor.vendor_code.to_lowercase().contains(&needle);
        matches_search && self.supply_type.matches(vendor.supply_type)
    }
}

/// The vendors matching `filter`, in their original order.
#[must_use]
pub fn filter_vendors(vendors: &[vendor::Model], filter: &VendorFilter) -> Vec<vendor::Model> {
    vendors
        .iter()
        .filter(|v| filter.matches(v))
        .cloned()
        .collect()
}

/// Qualitative band for a performance rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBand {
    /// 4.5 and above
    Excellent,
    /// 4.0 to below 4.5
    Good,
    /// 3.5 to below 4.0
    Fair,
    /// Below 3.5
    Poor,
}

impl RatingBand {
    /// Band for `rating`.
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            Self::Excellent
        } else if rating >= 4.0 {
            Self::Good
        } else if rating >= 3.5 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// Marker shown next to the rating.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Excellent => "🟢",
            Self::Good => "🔵",
            Self::Fair => "🟡",
            Self::Poor => "🔴",
        }
    }
}

impl fmt::Display for RatingBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// Number of filled stars out of five (the rating rounded down).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn star_count(rating: f64) -> usize {
    // Clamped to [0, 5] first, so the cast cannot truncate
    rating.floor().clamp(0.0, 5.0) as usize
}

/// Five stars, filled up to [`star_count`].
#[must_use]
pub fn format_stars(rating: f64) -> String {
    let filled = star_count(rating);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// One-line summary used in vendor listings.
#[must_use]
pub fn format_vendor_line(vendor: &vendor::Model) -> String {
    let band = RatingBand::from_rating(vendor.performance_rating);
    format!(
        "**{}** ({}) · {} · {} · {} {} {:.1} · QC {} · audited {}",
        vendor.name,
        vendor.vendor_code,
        vendor.supply_type,
        format_lakh(vendor.annual_sale_value),
        band.emoji(),
        format_stars(vendor.performance_rating),
        vendor.performance_rating,
        if vendor.quality_check_eligible {
            "Eligible"
        } else {
            "Not Eligible"
        },
        vendor.last_audit_date.format("%Y-%m-%d"),
    )
}

/// Every vendor, in the order they were added.
pub async fn get_all_vendors(db: &DatabaseConnection) -> Result<Vec<vendor::Model>> {
    Vendor::find()
        .order_by_asc(vendor::Column::Seq)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The first vendor carrying `id`, if any.
pub async fn get_vendor_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<vendor::Model>> {
    Vendor::find()
        .filter(vendor::Column::Id.eq(id))
        .order_by_asc(vendor::Column::Seq)
        .one(db)
        .await
        .map_err(Into::into)
}

/// The first vendor registered under exactly this name.
pub async fn get_vendor_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<vendor::Model>> {
    Vendor::find()
        .filter(vendor::Column::Name.eq(name))
        .order_by_asc(vendor::Column::Seq)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Assigns a timestamp id and appends the vendor. Duplicate codes are allowed.
pub async fn add_vendor(db: &DatabaseConnection, new: NewVendor) -> Result<vendor::Model> {
    let model = vendor::ActiveModel {
        id: Set(next_id()),
        vendor_code: Set(new.vendor_code),
        name: Set(new.name),
        supply_type: Set(new.supply_type),
        annual_sale_value: Set(new.annual_sale_value),
        quality_check_eligible: Set(new.quality_check_eligible),
        last_audit_date: Set(new.last_audit_date),
        performance_rating: Set(new.performance_rating),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    debug!("Added vendor {} ({})", inserted.name, inserted.vendor_code);
    Ok(inserted)
}

/// Merges `patch` into every vendor with this id and returns how many were
/// touched (zero for an unknown id). Library items keep their copied codes.
pub async fn update_vendor(db: &DatabaseConnection, id: &str, patch: VendorPatch) -> Result<u64> {
    if patch.is_empty() {
        return Ok(Vendor::find()
            .filter(vendor::Column::Id.eq(id))
            .count(db)
            .await?);
    }

    let result = Vendor::update_many()
        .set(patch.into_active_model())
        .filter(vendor::Column::Id.eq(id))
        .exec(db)
        .await?;
    debug!("Updated {} vendor(s) with id {id}", result.rows_affected);
    Ok(result.rows_affected)
}
