//! Unified error types for the portal.
//!
//! Every layer (core, config, bot) returns [`Result`], so `?` works across
//! database, configuration and Discord framework failures alike.

use crate::core::{navigation::Route, role::Role};
use thiserror::Error;

/// All errors the portal can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or was invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying store (`SeaORM`) failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure, usually while persisting sessions
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Session or config file is not valid TOML
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Session file could not be serialized
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Email unknown or wrong password
    #[error("Invalid credentials. Use password: \"password\"")]
    InvalidCredentials,

    /// No user is logged in for this client
    #[error("You are not logged in. Use `/login` first.")]
    NotLoggedIn,

    /// The user's role is not a member of the route's role list
    #[error("The {route} page is not available to the {role} role")]
    Forbidden {
        /// Role of the current user
        role: Role,
        /// Route that was requested
        route: Route,
    },

    /// Action reserved for the Seven Procure role
    #[error("Only Seven Procure reviewers can {action}")]
    AdminOnly {
        /// Human-readable action name
        action: String,
    },

    /// Action not available to the Seven Procure role
    #[error("Seven Procure reviewers cannot {action}")]
    NotForAdmin {
        /// Human-readable action name
        action: String,
    },

    /// Submitted form failed a required-field or type check
    #[error("Validation error: {message}")]
    Validation {
        /// Which field failed and why
        message: String,
    },

    /// No request carries the given id
    #[error("Request #{id} not found")]
    RequestNotFound {
        /// Requested id
        id: String,
    },

    /// Writing a rendered view failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Serenity/Poise framework failure
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for errors that should be shown to the user inline instead of
    /// being logged as failures.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::NotLoggedIn
                | Self::Forbidden { .. }
                | Self::AdminOnly { .. }
                | Self::NotForAdmin { .. }
                | Self::Validation { .. }
                | Self::RequestNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
