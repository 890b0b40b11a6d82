//! Quality library business logic - inspected items, filters and approvals.

use super::{
    identity::User,
    ids::next_id,
    navigation::require_admin,
    notify::{self, Notification},
    vendor,
};
use crate::{
    entities::{LibraryItem, library_item},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// A library item without its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLibraryItem {
    /// What was received
    pub item_description: String,
    /// GRN number
    pub grn_no: String,
    /// GRN date
    pub grn_date: NaiveDate,
    /// Supplier name
    pub supplier_name: String,
    /// PO number
    pub po_no: String,
    /// Received quantity
    pub grn_quantity: i64,
    /// Unit rate
    pub item_rate: f64,
    /// Item code
    pub item_code: String,
    /// Vendor code copy
    pub vendor_code: String,
    /// Receiving plant
    pub plant: String,
    /// Category
    pub category: String,
    /// Regular supply flag
    pub regular_supply: bool,
    /// Physical sample flag
    pub physical_sample: bool,
    /// Repeat inspection flag
    pub repeat_inspection: bool,
    /// Repeat inspection date
    pub repeat_date: Option<NaiveDate>,
    /// Who entered the item
    pub user_name: String,
    /// Technical specification
    pub technical_specs: String,
    /// Inspection method
    pub inspection_method: String,
    /// Inspection outcome
    pub outcome: String,
    /// Remarks
    pub remarks: String,
    /// Approval flag
    pub approved: bool,
    /// Entry date
    pub created_date: NaiveDate,
}

/// Fields to merge into an existing item. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct LibraryItemPatch {
    pub item_description: Option<String>,
    pub grn_no: Option<String>,
    pub grn_date: Option<NaiveDate>,
    pub supplier_name: Option<String>,
    pub po_no: Option<String>,
    pub grn_quantity: Option<i64>,
    pub item_rate: Option<f64>,
    pub item_code: Option<String>,
    pub vendor_code: Option<String>,
    pub plant: Option<String>,
    pub category: Option<String>,
    pub regular_supply: Option<bool>,
    pub physical_sample: Option<bool>,
    pub repeat_inspection: Option<bool>,
    pub repeat_date: Option<Option<NaiveDate>>,
    pub user_name: Option<String>,
    pub technical_specs: Option<String>,
    pub inspection_method: Option<String>,
    pub outcome: Option<String>,
    pub remarks: Option<String>,
    pub approved: Option<bool>,
    pub created_date: Option<NaiveDate>,
}

impl LibraryItemPatch {
    /// True when the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn into_active_model(self) -> library_item::ActiveModel {
        library_item::ActiveModel {
            item_description: self.item_description.map_or(ActiveValue::NotSet, Set),
            grn_no: self.grn_no.map_or(ActiveValue::NotSet, Set),
            grn_date: self.grn_date.map_or(ActiveValue::NotSet, Set),
            supplier_name: self.supplier_name.map_or(ActiveValue::NotSet, Set),
            po_no: self.po_no.map_or(ActiveValue::NotSet, Set),
            grn_quantity: self.grn_quantity.map_or(ActiveValue::NotSet, Set),
            item_rate: self.item_rate.map_or(ActiveValue::NotSet, Set),
            item_code: self.item_code.map_or(ActiveValue::NotSet, Set),
            vendor_code: self.vendor_code.map_or(ActiveValue::NotSet, Set),
            plant: self.plant.map_or(ActiveValue::NotSet, Set),
            category: self.category.map_or(ActiveValue::NotSet, Set),
            regular_supply: self.regular_supply.map_or(ActiveValue::NotSet, Set),
            physical_sample: self.physical_sample.map_or(ActiveValue::NotSet, Set),
            repeat_inspection: self.repeat_inspection.map_or(ActiveValue::NotSet, Set),
            repeat_date: self.repeat_date.map_or(ActiveValue::NotSet, Set),
            user_name: self.user_name.map_or(ActiveValue::NotSet, Set),
            technical_specs: self.technical_specs.map_or(ActiveValue::NotSet, Set),
            inspection_method: self.inspection_method.map_or(ActiveValue::NotSet, Set),
            outcome: self.outcome.map_or(ActiveValue::NotSet, Set),
            remarks: self.remarks.map_or(ActiveValue::NotSet, Set),
            approved: self.approved.map_or(ActiveValue::NotSet, Set),
            created_date: self.created_date.map_or(ActiveValue::NotSet, Set),
            ..Default::default()
        }
    }
}

/// What a reviewer fills in on the add-item form.
///
/// The vendor code, user name and entry date are filled in by
/// [`submit_library_item`].
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryItemForm {
    /// Item description (required)
    pub item_description: String,
    /// GRN number (required)
    pub grn_no: String,
    /// GRN date (required)
    pub grn_date: NaiveDate,
    /// Supplier, chosen from the vendor registry (required)
    pub supplier_name: String,
    /// PO number (required)
    pub po_no: String,
    /// Received quantity, at least 1
    pub grn_quantity: i64,
    /// Unit rate, not negative
    pub item_rate: f64,
    /// Item code (required)
    pub item_code: String,
    /// Plant (required)
    pub plant: String,
    /// Category (required)
    pub category: String,
    /// Regular supply flag
    pub regular_supply: bool,
    /// Physical sample flag
    pub physical_sample: bool,
    /// Repeat inspection flag
    pub repeat_inspection: bool,
    /// Repeat inspection date
    pub repeat_date: Option<NaiveDate>,
    /// Technical specification
    pub technical_specs: String,
    /// Inspection method (required)
    pub inspection_method: String,
    /// Inspection outcome
    pub outcome: String,
    /// Remarks
    pub remarks: String,
    /// Approved on entry
    pub approved: bool,
}

impl LibraryItemForm {
    /// Required-field and range checks.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("Item description", &self.item_description),
            ("GRN number", &self.grn_no),
            ("Supplier", &self.supplier_name),
            ("PO number", &self.po_no),
            ("Item code", &self.item_code),
            ("Plant", &self.plant),
            ("Category", &self.category),
            ("Inspection method", &self.inspection_method),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(Error::validation(format!("{field} is required")));
        }
        if self.grn_quantity < 1 {
            return Err(Error::validation("GRN quantity must be at least 1"));
        }
        if !self.item_rate.is_finite() || self.item_rate < 0.0 {
            return Err(Error::validation("Item rate must be a non-negative number"));
        }
        Ok(())
    }
}

/// Library filter. `None` on a field means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryFilter {
    /// Exact plant
    pub plant: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Approval flag
    pub approved: Option<bool>,
    /// Case-insensitive substring of description, supplier or GRN number
    pub search: Option<String>,
}

impl LibraryFilter {
    /// Builds a filter from raw form values, where an empty string means
    /// "any" and `approved` is `"true"` or `"false"`.
    pub fn from_form(plant: &str, category: &str, approved: &str, search: &str) -> Result<Self> {
        let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());
        let approved = match approved {
            "" => None,
            "true" => Some(true),
            "false" => Some(false),
            other => {
                return Err(Error::validation(format!(
                    "Approval filter must be 'true' or 'false', got '{other}'"
                )));
            }
        };

        Ok(Self {
            plant: non_empty(plant),
            category: non_empty(category),
            approved,
            search: non_empty(search),
        })
    }

    /// Whether `item` satisfies every set predicate.
    #[must_use]
    pub fn matches(&self, item: &library_item::Model) -> bool {
        self.plant.as_ref().is_none_or(|plant| &item.plant == plant)
            && self
                .category
                .as_ref()
                .is_none_or(|category| &item.category == category)
            && self.approved.is_none_or(|approved| item.approved == approved)
            && self.search.as_ref().is_none_or(|search| {
                let needle = search.to_lowercase();
                [&item.item_description, &item.supplier_name, &item.grn_no]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
    }
}

/// The items matching `filter`, in their original order.
#[must_use]
pub fn filter_library_items(
    items: &[library_item::Model],
    filter: &LibraryFilter,
) -> Vec<library_item::Model> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

/// Quantity times rate.
#[must_use]
#[allow(clippy::cast_precision_loss)] // GRN quantities stay far below 2^52
pub fn item_value(item: &library_item::Model) -> f64 {
    item.grn_quantity as f64 * item.item_rate
}

/// Every library item, in the order they were added.
pub async fn get_all_library_items(db: &DatabaseConnection) -> Result<Vec<library_item::Model>> {
    LibraryItem::find()
        .order_by_asc(library_item::Column::Seq)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The first item carrying `id`, if any.
pub async fn get_library_item_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<library_item::Model>> {
    LibraryItem::find()
        .filter(library_item::Column::Id.eq(id))
        .order_by_asc(library_item::Column::Seq)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Assigns a timestamp id and appends the item.
pub async fn add_library_item(
    db: &DatabaseConnection,
    new: NewLibraryItem,
) -> Result<library_item::Model> {
    let model = library_item::ActiveModel {
        id: Set(next_id()),
        item_description: Set(new.item_description),
        grn_no: Set(new.grn_no),
        grn_date: Set(new.grn_date),
        supplier_name: Set(new.supplier_name),
        po_no: Set(new.po_no),
        grn_quantity: Set(new.grn_quantity),
        item_rate: Set(new.item_rate),
        item_code: Set(new.item_code),
        vendor_code: Set(new.vendor_code),
        plant: Set(new.plant),
        category: Set(new.category),
        regular_supply: Set(new.regular_supply),
        physical_sample: Set(new.physical_sample),
        repeat_inspection: Set(new.repeat_inspection),
        repeat_date: Set(new.repeat_date),
        user_name: Set(new.user_name),
        technical_specs: Set(new.technical_specs),
        inspection_method: Set(new.inspection_method),
        outcome: Set(new.outcome),
        remarks: Set(new.remarks),
        approved: Set(new.approved),
        created_date: Set(new.created_date),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    debug!("Added library item {}", inserted.id);
    Ok(inserted)
}

/// Merges `patch` into every item with this id and returns how many were
/// touched (zero for an unknown id).
pub async fn update_library_item(
    db: &DatabaseConnection,
    id: &str,
    patch: LibraryItemPatch,
) -> Result<u64> {
    if patch.is_empty() {
        return Ok(LibraryItem::find()
            .filter(library_item::Column::Id.eq(id))
            .count(db)
            .await?);
    }

    let result = LibraryItem::update_many()
        .set(patch.into_active_model())
        .filter(library_item::Column::Id.eq(id))
        .exec(db)
        .await?;
    debug!(
        "Updated {} library item(s) with id {id}",
        result.rows_affected
    );
    Ok(result.rows_affected)
}

/// Validates the form and appends the item on behalf of `reviewer`.
///
/// The vendor code is copied from the first vendor whose name equals the
/// supplier, or left empty when there is none.
#[instrument(skip(db, reviewer, form), fields(reviewer = %reviewer.name, grn = %form.grn_no))]
pub async fn submit_library_item(
    db: &DatabaseConnection,
    reviewer: &User,
    form: LibraryItemForm,
    created_date: NaiveDate,
) -> Result<library_item::Model> {
    require_admin(reviewer, "add library items")?;
    form.validate()?;

    let vendor_code = vendor::get_vendor_by_name(db, &form.supplier_name)
        .await?
        .map(|v| v.vendor_code)
        .unwrap_or_default();

    add_library_item(
        db,
        NewLibraryItem {
            item_description: form.item_description,
            grn_no: form.grn_no,
            grn_date: form.grn_date,
            supplier_name: form.supplier_name,
            po_no: form.po_no,
            grn_quantity: form.grn_quantity,
            item_rate: form.item_rate,
            item_code: form.item_code,
            vendor_code,
            plant: form.plant,
            category: form.category,
            regular_supply: form.regular_supply,
            physical_sample: form.physical_sample,
            repeat_inspection: form.repeat_inspection,
            repeat_date: form.repeat_date,
            user_name: reviewer.name.clone(),
            technical_specs: form.technical_specs,
            inspection_method: form.inspection_method,
            outcome: form.outcome,
            remarks: form.remarks,
            approved: form.approved,
            created_date,
        },
    )
    .await
}

/// Approves or rejects every selected item and sends one consolidated
/// notification. Returns the number of records touched.
#[instrument(skip(db, reviewer), fields(reviewer = %reviewer.name))]
pub async fn set_approval(
    db: &DatabaseConnection,
    reviewer: &User,
    ids: &[String],
    approved: bool,
) -> Result<u64> {
    require_admin(reviewer, "approve or reject library items")?;
    if ids.is_empty() {
        return Err(Error::validation("Select at least one item"));
    }

    let mut touched = 0;
    for id in ids {
        touched += update_library_item(
            db,
            id,
            LibraryItemPatch {
                approved: Some(approved),
                ..Default::default()
            },
        )
        .await?;
    }

    info!(
        "{} {touched} library item(s)",
        if approved { "Approved" } else { "Rejected" }
    );
    notify::dispatch(&Notification::BulkReview {
        approved,
        count: ids.len(),
    });
    Ok(touched)
}

/// Simulated export of the given items.
pub fn export_library(items: &[library_item::Model]) {
    notify::dispatch(&Notification::Export {
        subject: format!("library data ({} items)", items.len()),
        format: None,
    });
}
