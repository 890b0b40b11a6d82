/// Domain store connection and table creation
pub mod database;

/// Portal settings loaded from config.toml
pub mod portal;

pub use portal::PortalConfig;
