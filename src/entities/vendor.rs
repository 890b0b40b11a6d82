//! Vendor entity - a supplier in the vendor registry.

use crate::errors;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How often a vendor supplies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "kebab-case")]
pub enum SupplyType {
    /// Recurring supplier
    #[sea_orm(string_value = "regular")]
    Regular,
    /// Single purchase
    #[sea_orm(string_value = "one-time")]
    OneTime,
}

impl SupplyType {
    /// Every settable supply type.
    pub const ALL: [Self; 2] = [Self::Regular, Self::OneTime];

    /// Stored value (`regular`, `one-time`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::OneTime => "one-time",
        }
    }
}

impl fmt::Display for SupplyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupplyType {
    type Err = errors::Error;

    fn from_str(s: &str) -> errors::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|supply_type| supply_type.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| errors::Error::validation(format!("Unknown supply type '{s}'")))
    }
}

/// Vendor database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    /// Insertion order
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub seq: i64,
    /// Public identifier, derived from the creation timestamp (not unique)
    pub id: String,
    /// Vendor code (e.g. `"V001"`), not checked for uniqueness
    pub vendor_code: String,
    /// Registered name
    pub name: String,
    /// Regular or one-time supplier
    pub supply_type: SupplyType,
    /// Annual sale value in rupees
    pub annual_sale_value: f64,
    /// Eligible for quality checks
    pub quality_check_eligible: bool,
    /// Date of the last audit
    pub last_audit_date: Date,
    /// Performance rating between 1.0 and 5.0
    pub performance_rating: f64,
}

/// Library items reference vendors by a copied code, not a relation
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use sea_orm::{Set, TryIntoModel};

    #[test]
    fn test_active_model_into_model() {
        let active = ActiveModel {
            seq: Set(1),
            id: Set("1".to_string()),
            vendor_code: Set("V001".to_string()),
            name: Set("ABC Suppliers Ltd".to_string()),
            supply_type: Set("One-Time".parse().unwrap()),
            annual_sale_value: Set(1_500_000.0),
            quality_check_eligible: Set(true),
            last_audit_date: Set(chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            performance_rating: Set(4.5),
        };

        let model = active.try_into_model().unwrap();
        assert_eq!(model.supply_type, SupplyType::OneTime);
        assert!(matches!(
            "weekly".parse::<SupplyType>(),
            Err(errors::Error::Validation { .. })
        ));
    }
}
