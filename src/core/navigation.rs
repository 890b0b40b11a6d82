//! Role-gated navigation.
//!
//! Five routes, each with the list of roles allowed to see it. The same
//! table drives the navigation menu and the access check every page runs.

use super::{identity::User, role::Role};
use crate::errors::{Error, Result};
use std::fmt;

/// A page of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Headline statistics
    Dashboard,
    /// Validation request tracker
    Requests,
    /// Quality library of inspected items
    Library,
    /// Vendor registry
    Vendors,
    /// Filtered reporting
    Reports,
}

impl Route {
    /// Every route, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Requests,
        Self::Library,
        Self::Vendors,
        Self::Reports,
    ];

    /// Menu label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Requests => "Requests",
            Self::Library => "Library",
            Self::Vendors => "Vendors",
            Self::Reports => "Reports",
        }
    }

    /// Route path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Requests => "/requests",
            Self::Library => "/library",
            Self::Vendors => "/vendors",
            Self::Reports => "/reports",
        }
    }

    /// Roles that may open this route.
    #[must_use]
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::Library => &[Role::SevenProcure],
            Self::Dashboard | Self::Requests | Self::Vendors | Self::Reports => &Role::ALL,
        }
    }

    /// Whether `role` is in this route's membership list.
    #[must_use]
    pub fn allows(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    /// Resolves a path. The index (`/` or empty) redirects to the dashboard.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Self::Dashboard),
            p => Self::ALL.into_iter().find(|route| route.path() == p),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The menu for `role`, in display order.
#[must_use]
pub fn navigation_for(role: Role) -> Vec<Route> {
    Route::ALL
        .into_iter()
        .filter(|route| route.allows(role))
        .collect()
}

/// Gate for a page: requires a session whose role may open `route`.
pub fn authorize(user: Option<&User>, route: Route) -> Result<&User> {
    let user = user.ok_or(Error::NotLoggedIn)?;
    if route.allows(user.role) {
        Ok(user)
    } else {
        Err(Error::Forbidden {
            role: user.role,
            route,
        })
    }
}

/// Gate for actions reserved to the administrative role.
pub fn require_admin<'a>(user: &'a User, action: &str) -> Result<&'a User> {
    if user.is_admin() {
        Ok(user)
    } else {
        Err(Error::AdminOnly {
            action: action.to_string(),
        })
    }
}

/// Gate for actions the administrative role does not perform (raising
/// requests is left to the finance and procurement teams).
pub fn require_non_admin<'a>(user: &'a User, action: &str) -> Result<&'a User> {
    if user.is_admin() {
        Err(Error::NotForAdmin {
            action: action.to_string(),
        })
    } else {
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::identity::find_user_by_email;

    #[test]
    fn test_finance_never_sees_library() {
        let menu = navigation_for(Role::Finance);
        assert!(!menu.contains(&Route::Library));
        assert_eq!(
            menu,
            vec![
                Route::Dashboard,
                Route::Requests,
                Route::Vendors,
                Route::Reports
            ]
        );
    }

    #[test]
    fn test_seven_procure_sees_all_routes() {
        assert_eq!(navigation_for(Role::SevenProcure), Route::ALL.to_vec());
    }

    #[test]
    fn test_procurement_menu_matches_finance() {
        assert_eq!(
            navigation_for(Role::Procurement),
            navigation_for(Role::Finance)
        );
    }

    #[test]
    fn test_authorize_requires_session() {
        assert!(matches!(
            authorize(None, Route::Dashboard),
            Err(Error::NotLoggedIn)
        ));
    }

    #[test]
    fn test_authorize_checks_role_membership() {
        let finance = find_user_by_email("finance@company.com").unwrap();
        let admin = find_user_by_email("admin@sevenprocure.com").unwrap();

        assert!(authorize(Some(&finance), Route::Reports).is_ok());
        assert!(matches!(
            authorize(Some(&finance), Route::Library),
            Err(Error::Forbidden {
                role: Role::Finance,
                route: Route::Library
            })
        ));
        assert_eq!(authorize(Some(&admin), Route::Library).unwrap(), &admin);
    }

    #[test]
    fn test_admin_gates() {
        let procurement = find_user_by_email("procurement@company.com").unwrap();
        let admin = find_user_by_email("admin@sevenprocure.com").unwrap();

        assert!(require_admin(&admin, "review requests").is_ok());
        assert!(matches!(
            require_admin(&procurement, "review requests"),
            Err(Error::AdminOnly { .. })
        ));
        assert!(require_non_admin(&procurement, "raise requests").is_ok());
        assert!(matches!(
            require_non_admin(&admin, "raise requests"),
            Err(Error::NotForAdmin { .. })
        ));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path(""), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/library"), Some(Route::Library));
        assert_eq!(Route::from_path("/reports/"), Some(Route::Reports));
        assert_eq!(Route::from_path("/login"), None);
    }
}
