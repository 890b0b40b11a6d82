//! Database configuration for the portal's domain store.
//!
//! The store lives in an in-memory `SQLite` database by default, so every
//! start begins from the seed records and nothing survives a restart. Tables
//! are generated from the entity definitions with `SeaORM`'s
//! `Schema::create_table_from_entity`, keeping the schema in step with the
//! Rust structs without hand-written SQL.

use crate::entities::{LibraryItem, Request, Vendor};
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::info;

/// Default store: memory-resident, gone on restart.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Idle and lifetime limit for the pooled connection. A memory-resident
/// `SQLite` database lives exactly as long as its connection.
const CONNECTION_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Gets the database URL from `DATABASE_URL`, falling back to the in-memory store.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Pool settings for `url`: one connection, opened eagerly and never reaped.
#[must_use]
pub fn connect_options(url: &str) -> ConnectOptions {
    let mut options = ConnectOptions::new(url);
    options
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(CONNECTION_LIFETIME)
        .max_lifetime(CONNECTION_LIFETIME);
    options
}

/// Connects to `url` with [`connect_options`].
pub async fn connect(url: &str) -> Result<DatabaseConnection> {
    Database::connect(connect_options(url))
        .await
        .map_err(Into::into)
}

/// Connects to the store named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    info!("Connecting to domain store at {database_url}");
    connect(&database_url).await
}

/// Creates the `requests`, `library_items` and `vendors` tables.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let request_table = schema.create_table_from_entity(Request);
    let library_table = schema.create_table_from_entity(LibraryItem);
    let vendor_table = schema.create_table_from_entity(Vendor);

    db.execute(builder.build(&request_table)).await?;
    db.execute(builder.build(&library_table)).await?;
    db.execute(builder.build(&vendor_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{LibraryItemModel, RequestModel, VendorModel};
    use crate::core::{request, seed};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = connect(DEFAULT_DATABASE_URL).await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<RequestModel> = Request::find().limit(1).all(&db).await?;
        let _: Vec<LibraryItemModel> = LibraryItem::find().limit(1).all(&db).await?;
        let _: Vec<VendorModel> = Vendor::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_twice_fails() -> Result<()> {
        let db = connect(DEFAULT_DATABASE_URL).await?;
        create_tables(&db).await?;
        assert!(create_tables(&db).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_store_survives_idle_reaping() -> Result<()> {
        // Short idle timeout so the pool's reaper runs during the test
        let mut options = connect_options(DEFAULT_DATABASE_URL);
        options.idle_timeout(Duration::from_millis(200));
        let db = Database::connect(options).await?;
        create_tables(&db).await?;
        seed::seed_sample_data(&db).await?;
        assert_eq!(request::get_all_requests(&db).await?.len(), 2);

        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(request::get_all_requests(&db).await?.len(), 2);
        Ok(())
    }
}
