//! Shared test utilities for the portal.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    config::database,
    core::{library, request, seed, vendor},
    entities::{self, RequestStatus, SupplyType},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default()
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = database::connect(database::DEFAULT_DATABASE_URL).await?;
    database::create_tables(&db).await?;
    Ok(db)
}

/// Same as [`setup_test_db`], with the startup sample records loaded.
pub async fn setup_seeded_db() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    seed::seed_sample_data(&db).await?;
    Ok(db)
}

/// Creates an open request for `plant`.
///
/// # Defaults
/// * `requester`: `"Test Requester"`
/// * `remarks`: `"Test remarks"`
/// * `file_name`: `"grn.xlsx"`
pub async fn create_test_request(
    db: &DatabaseConnection,
    plant: &str,
) -> Result<entities::request::Model> {
    request::add_request(
        db,
        request::NewRequest {
            requester: "Test Requester".to_string(),
            plant: plant.to_string(),
            submission_date: test_date(),
            status: RequestStatus::Open,
            remarks: "Test remarks".to_string(),
            file_name: Some("grn.xlsx".to_string()),
            sp_comments: None,
        },
    )
    .await
}

/// A complete add-item form for `supplier`.
#[must_use]
pub fn test_library_form(supplier: &str) -> library::LibraryItemForm {
    library::LibraryItemForm {
        item_description: "Test Item".to_string(),
        grn_no: "GRN-T1".to_string(),
        grn_date: test_date(),
        supplier_name: supplier.to_string(),
        po_no: "PO-T1".to_string(),
        grn_quantity: 10,
        item_rate: 12.5,
        item_code: "ITM-T1".to_string(),
        plant: "Plant 1".to_string(),
        category: "Tools".to_string(),
        regular_supply: true,
        physical_sample: false,
        repeat_inspection: false,
        repeat_date: None,
        technical_specs: String::new(),
        inspection_method: "Visual".to_string(),
        outcome: "Passed".to_string(),
        remarks: String::new(),
        approved: false,
    }
}

/// Creates a library item in `plant` / `category`.
///
/// # Defaults
/// * 10 units at 12.5 from `"Test Supplier"` (`"VT01"`)
/// * entered by `"Admin SP"` on 2024-03-15
pub async fn create_test_library_item(
    db: &DatabaseConnection,
    plant: &str,
    category: &str,
    approved: bool,
) -> Result<entities::library_item::Model> {
    let form = test_library_form("Test Supplier");
    library::add_library_item(
        db,
        library::NewLibraryItem {
            item_description: form.item_description,
            grn_no: form.grn_no,
            grn_date: form.grn_date,
            supplier_name: form.supplier_name,
            po_no: form.po_no,
            grn_quantity: form.grn_quantity,
            item_rate: form.item_rate,
            item_code: form.item_code,
            vendor_code: "VT01".to_string(),
            plant: plant.to_string(),
            category: category.to_string(),
            regular_supply: form.regular_supply,
            physical_sample: form.physical_sample,
            repeat_inspection: form.repeat_inspection,
            repeat_date: form.repeat_date,
            user_name: "Admin SP".to_string(),
            technical_specs: form.technical_specs,
            inspection_method: form.inspection_method,
            outcome: form.outcome,
            remarks: form.remarks,
            approved,
            created_date: test_date(),
        },
    )
    .await
}

/// A valid regular vendor with the given code and name.
#[must_use]
pub fn test_new_vendor(code: &str, name: &str) -> vendor::NewVendor {
    vendor::NewVendor {
        vendor_code: code.to_string(),
        name: name.to_string(),
        supply_type: SupplyType::Regular,
        annual_sale_value: 100_000.0,
        quality_check_eligible: true,
        last_audit_date: test_date(),
        performance_rating: 4.0,
    }
}
