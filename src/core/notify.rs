//! Simulated email notifications and exports.
//!
//! The portal does not send mail or write export files. Each event is logged
//! under the `imqap::notify` target so it can be followed in the logs.

use crate::entities::RequestStatus;
use std::fmt;
use tracing::info;

/// Export formats offered on the reports page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Spreadsheet export
    Excel,
    /// Document export
    Pdf,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excel => f.write_str("EXCEL"),
            Self::Pdf => f.write_str("PDF"),
        }
    }
}

/// An event that would have produced an email or a file.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A new request was raised; Seven Procure is told.
    RequestSubmitted {
        /// Id of the new request
        request_id: String,
        /// Plant of the request
        plant: String,
    },
    /// A reviewer changed a request's status; the requester is told.
    StatusChanged {
        /// Id of the request
        request_id: String,
        /// New status
        status: RequestStatus,
    },
    /// One consolidated email for a bulk approve/reject.
    BulkReview {
        /// Approved (`true`) or rejected
        approved: bool,
        /// Number of items in the batch
        count: usize,
    },
    /// Library or report data export.
    Export {
        /// What was exported
        subject: String,
        /// Requested format, when the page offers a choice
        format: Option<ExportFormat>,
    },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestSubmitted { request_id, plant } => write!(
                f,
                "Email notification sent to Seven Procure team for request {request_id} ({plant})"
            ),
            Self::StatusChanged { request_id, status } => write!(
                f,
                "Email notification sent for request {request_id} status change to {}",
                status.as_str()
            ),
            Self::BulkReview { approved, count } => write!(
                f,
                "Consolidated email sent for {} {count} items",
                if *approved { "approving" } else { "rejecting" }
            ),
            Self::Export {
                subject,
                format: Some(format),
            } => write!(f, "Exporting {subject} as {format}..."),
            Self::Export {
                subject,
                format: None,
            } => write!(f, "Exporting {subject}..."),
        }
    }
}

/// Logs the notification in place of delivering it.
pub fn dispatch(notification: &Notification) {
    info!(target: "imqap::notify", "{notification}");
}
