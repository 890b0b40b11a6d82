//! Entity module - `SeaORM` definitions for the three portal collections.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod library_item;
pub mod request;
pub mod vendor;

// Re-export specific types to avoid conflicts
pub use library_item::{
    Column as LibraryItemColumn, Entity as LibraryItem, Model as LibraryItemModel,
};
pub use request::{Column as RequestColumn, Entity as Request, Model as RequestModel, RequestStatus};
pub use vendor::{Column as VendorColumn, Entity as Vendor, Model as VendorModel, SupplyType};
