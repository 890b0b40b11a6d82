//! Library item entity - one inspected GRN line in the quality library.
//!
//! `vendor_code` is a copy taken from the vendor registry at creation time
//! and is not kept in sync with it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Library item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "library_items")]
pub struct Model {
    /// Insertion order
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub seq: i64,
    /// Public identifier, derived from the creation timestamp (not unique)
    pub id: String,
    /// What was received
    pub item_description: String,
    /// Goods Receipt Note number
    pub grn_no: String,
    /// Goods Receipt Note date
    pub grn_date: Date,
    /// Supplier as named in the vendor registry
    pub supplier_name: String,
    /// Purchase Order number
    pub po_no: String,
    /// Received quantity
    pub grn_quantity: i64,
    /// Unit rate in rupees
    pub item_rate: f64,
    /// Internal item code
    pub item_code: String,
    /// Vendor code copied from the registry
    pub vendor_code: String,
    /// Receiving plant
    pub plant: String,
    /// Item category (e.g. `"Fabrication"`)
    pub category: String,
    /// Supplied on a regular basis
    pub regular_supply: bool,
    /// A physical sample was inspected
    pub physical_sample: bool,
    /// Another inspection is scheduled
    pub repeat_inspection: bool,
    /// Date of the repeat inspection, if scheduled
    pub repeat_date: Option<Date>,
    /// Reviewer who entered the item
    pub user_name: String,
    /// Technical specification (e.g. `"ASTM A53 Grade B"`)
    pub technical_specs: String,
    /// `Visual`, `Measurement` or `Lab`
    pub inspection_method: String,
    /// Inspection outcome
    pub outcome: String,
    /// Free-text remarks
    pub remarks: String,
    /// Approved or rejected
    pub approved: bool,
    /// Day the item was entered
    pub created_date: Date,
}

/// No foreign keys: `vendor_code` is denormalized on purpose
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
