//! Sample records loaded into the domain store at every start.
//!
//! Seed records keep their fixed ids ("1", "2") instead of timestamp ids.

use crate::{
    entities::{RequestStatus, SupplyType, library_item, request, vendor},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::info;

fn day(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| Error::Config {
        message: format!("Invalid seed date {y}-{m:02}-{d:02}"),
    })
}

fn sample_vendors() -> Result<Vec<vendor::ActiveModel>> {
    Ok(vec![
        vendor::ActiveModel {
            id: Set("1".to_string()),
            vendor_code: Set("V001".to_string()),
            name: Set("ABC Suppliers Ltd".to_string()),
            supply_type: Set(SupplyType::Regular),
            annual_sale_value: Set(1_500_000.0),
            quality_check_eligible: Set(true),
            last_audit_date: Set(day(2024, 1, 15)?),
            performance_rating: Set(4.5),
            ..Default::default()
        },
        vendor::ActiveModel {
            id: Set("2".to_string()),
            vendor_code: Set("V002".to_string()),
            name: Set("XYZ Materials Corp".to_string()),
            supply_type: Set(SupplyType::OneTime),
            annual_sale_value: Set(750_000.0),
            quality_check_eligible: Set(true),
            last_audit_date: Set(day(2024, 2, 10)?),
            performance_rating: Set(4.2),
            ..Default::default()
        },
    ])
}

fn sample_requests() -> Result<Vec<request::ActiveModel>> {
    Ok(vec![
        request::ActiveModel {
            id: Set("1".to_string()),
            requester: Set("John Finance".to_string()),
            plant: Set("Plant 1".to_string()),
            submission_date: Set(day(2024, 1, 20)?),
            status: Set(RequestStatus::Open),
            remarks: Set("Urgent validation needed for Q1 materials".to_string()),
            file_name: Set(Some("grn_data_jan_2024.xlsx".to_string())),
            sp_comments: Set(None),
            ..Default::default()
        },
        request::ActiveModel {
            id: Set("2".to_string()),
            requester: Set("Sarah Procurement".to_string()),
            plant: Set("SPD".to_string()),
            submission_date: Set(day(2024, 1, 18)?),
            status: Set(RequestStatus::Completed),
            remarks: Set("Monthly GRN validation".to_string()),
            file_name: Set(Some("spd_grn_jan.xlsx".to_string())),
            sp_comments: Set(Some("All items validated successfully".to_string())),
            ..Default::default()
        },
    ])
}

fn sample_library_items() -> Result<Vec<library_item::ActiveModel>> {
    Ok(vec![library_item::ActiveModel {
        id: Set("1".to_string()),
        item_description: Set("Steel Pipes - 2 inch diameter".to_string()),
        grn_no: Set("GRN001".to_string()),
        grn_date: Set(day(2024, 1, 15)?),
        supplier_name: Set("ABC Suppliers Ltd".to_string()),
        po_no: Set("PO12345".to_string()),
        grn_quantity: Set(100),
        item_rate: Set(250.0),
        item_code: Set("ITM001".to_string()),
        vendor_code: Set("V001".to_string()),
        plant: Set("Plant 1".to_string()),
        category: Set("Fabrication".to_string()),
        regular_supply: Set(true),
        physical_sample: Set(true),
        repeat_inspection: Set(false),
        repeat_date: Set(None),
        user_name: Set("Admin SP".to_string()),
        technical_specs: Set("ASTM A53 Grade B".to_string()),
        inspection_method: Set("Visual".to_string()),
        outcome: Set("Passed".to_string()),
        remarks: Set("Quality meets specifications".to_string()),
        approved: Set(true),
        created_date: Set(day(2024, 1, 20)?),
        ..Default::default()
    }])
}

/// Inserts the sample vendors, requests and library items.
///
/// Expects freshly created tables; seeding twice duplicates the records.
pub async fn seed_sample_data(db: &DatabaseConnection) -> Result<()> {
    let vendors = sample_vendors()?;
    let requests = sample_requests()?;
    let items = sample_library_items()?;
    let counts = (vendors.len(), requests.len(), items.len());

    for model in vendors {
        model.insert(db).await?;
    }
    for model in requests {
        model.insert(db).await?;
    }
    for model in items {
        model.insert(db).await?;
    }

    info!(
        "Seeded {} vendor(s), {} request(s), {} library item(s)",
        counts.0, counts.1, counts.2
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{library, request as requests, vendor as vendors},
        test_utils::setup_test_db,
    };

    #[tokio::test]
    async fn test_seed_sample_data() -> Result<()> {
        let db = setup_test_db().await?;
        seed_sample_data(&db).await?;

        let vendor_list = vendors::get_all_vendors(&db).await?;
        assert_eq!(vendor_list.len(), 2);
        assert_eq!(vendor_list[0].vendor_code, "V001");
        assert_eq!(vendor_list[1].supply_type, SupplyType::OneTime);

        let request_list = requests::get_all_requests(&db).await?;
        assert_eq!(request_list.len(), 2);
        assert_eq!(request_list[0].status, RequestStatus::Open);
        assert_eq!(
            request_list[1].sp_comments.as_deref(),
            Some("All items validated successfully")
        );

        let items = library::get_all_library_items(&db).await?;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].vendor_code, "V001");
        assert!(items[0].approved);

        Ok(())
    }
}
