//! Request entity - a plant's request for GRN data validation.
//!
//! Requests are raised by the finance and procurement teams with an attached
//! GRN file and reviewed by Seven Procure, who moves them through
//! `open`, `in-progress` and `completed`.

use crate::errors;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Review state of a request. Any state may be set from any other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    /// Submitted, not yet picked up
    #[sea_orm(string_value = "open")]
    Open,
    /// Under review
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    /// Review finished
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl RequestStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Completed];

    /// Stored value (`open`, `in-progress`, `completed`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// Displays with the dash replaced by a space (`in progress`).
impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().replace('-', " "))
    }
}

impl FromStr for RequestStatus {
    type Err = errors::Error;

    fn from_str(s: &str) -> errors::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| errors::Error::validation(format!("Unknown request status '{s}'")))
    }
}

/// Request database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    /// Insertion order
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub seq: i64,
    /// Public identifier, derived from the creation timestamp (not unique)
    pub id: String,
    /// Display name of the user who raised the request
    pub requester: String,
    /// Plant the GRN data belongs to
    pub plant: String,
    /// Day the request was raised
    pub submission_date: Date,
    /// Review state
    pub status: RequestStatus,
    /// Free-text remarks from the requester
    pub remarks: String,
    /// Name of the attached GRN file
    pub file_name: Option<String>,
    /// Reviewer (Seven Procure) comments
    pub sp_comments: Option<String>,
}

/// Requests have no relations; plants are plain strings
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
            requester: Set("John Finance".to_string()),
            plant: Set("Plant 1".to_string()),
            submission_date: Set(chrono::NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()),
            status: Set("in-progress".parse().unwrap()),
            remarks: Set(String::new()),
            file_name: Set(None),
            sp_comments: Set(None),
        };

        let model = active.try_into_model().unwrap();
        assert_eq!(model.status, RequestStatus::InProgress);
        assert!(matches!(
            "done".parse::<RequestStatus>(),
            Err(errors::Error::Validation { .. })
        ));
    }
}
