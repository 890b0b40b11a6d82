//! Discord command implementations organized by portal page.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Dashboard command
pub mod dashboard;

/// General utility commands
pub mod general;

/// Quality library commands
pub mod library;

/// Report commands
pub mod report;

/// Validation request commands
pub mod request;

/// Login, logout and navigation commands
pub mod session;

/// Vendor registry commands
pub mod vendor;

// Export commands
pub use dashboard::*;
pub use general::*;
pub use library::*;
pub use report::*;
pub use request::*;
pub use session::*;
pub use vendor::*;

use crate::{bot::BotData, errors::Error};

/// Every command the bot registers, in help order.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        login(),
        logout(),
        whoami(),
        nav(),
        dashboard(),
        requests(),
        request_info(),
        new_request(),
        review_request(),
        library(),
        vendors(),
        add_vendor(),
        update_vendor(),
        report(),
        export_report(),
    ]
}
