//! Core business logic - framework-agnostic identity, store and view operations.
//!
//! Nothing in here knows about Discord. The bot layer looks up the session,
//! calls into these modules with the database connection and formats the
//! results.

/// Timestamp-derived record identifiers
pub mod ids;
/// Account directory and credential check
pub mod identity;
/// Quality library store operations, filters and approvals
pub mod library;
/// Role-gated routes
pub mod navigation;
/// Simulated email notifications and exports
pub mod notify;
/// Dashboard and report projections
pub mod report;
/// Request store operations and review workflow
pub mod request;
/// User roles
pub mod role;
/// Sample records loaded at startup
pub mod seed;
/// Per-client session store
pub mod session;
/// Vendor registry store operations and filters
pub mod vendor;
