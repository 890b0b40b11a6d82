//! User roles - the only authorization axis in the portal.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Finance team member
    Finance,
    /// Procurement team member
    Procurement,
    /// Seven Procure reviewer, the administrative role
    SevenProcure,
}

impl Role {
    /// All roles, in the order they are listed in the user directory.
    pub const ALL: [Self; 3] = [Self::Finance, Self::Procurement, Self::SevenProcure];

    /// Wire name of the role (`finance`, `procurement`, `seven-procure`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Procurement => "procurement",
            Self::SevenProcure => "seven-procure",
        }
    }

    /// Label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Finance => "Finance",
            Self::Procurement => "Procurement",
            Self::SevenProcure => "Seven Procure",
        }
    }

    /// Seven Procure is the only administrative role.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        match self {
            Self::SevenProcure => true,
            Self::Finance | Self::Procurement => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "finance" => Ok(Self::Finance),
            "procurement" => Ok(Self::Procurement),
            "seven-procure" => Ok(Self::SevenProcure),
            other => Err(Error::validation(format!("Unknown role '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_only_seven_procure_is_admin() {
        assert!(!Role::Finance.is_admin());
        assert!(!Role::Procurement.is_admin());
        assert!(Role::SevenProcure.is_admin());
    }

    #[test]
    fn test_role_parses_its_own_wire_name() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("admin".parse::<Role>().is_err());
        assert!("Finance".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_kebab_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            role: Role,
        }

        let text = toml::to_string(&Wrapper {
            role: Role::SevenProcure,
        })
        .unwrap();
        assert_eq!(text.trim(), "role = \"seven-procure\"");

        let back: Wrapper = toml::from_str(&text).unwrap();
        assert_eq!(back.role, Role::SevenProcure);
    }
}
