//! Sidebar navigation, filtered by role.

use crate::session::Role;
use std::collections::BTreeSet;

const EVERYONE: &[Role] = &[Role::Admin, Role::Manager, Role::Cashier];
const MANAGEMENT: &[Role] = &[Role::Admin, Role::Manager];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    /// Stable key.
    pub id: &'static str,
    /// Text shown in the sidebar.
    pub label: &'static str,
    /// Route.
    pub href: &'static str,
    /// Roles that see this entry.
    pub roles: &'static [Role],
}

impl NavEntry {
    /// True if any of `roles` may see this entry.
    pub fn visible_to(&self, roles: &BTreeSet<Role>) -> bool {
        self.roles.iter().any(|role| roles.contains(role))
    }
}

static DEFAULT_MENU: [NavEntry; 9] = [
    NavEntry {
        id: "dashboard",
        label: "Dashboard",
        href: "/dashboard",
        roles: EVERYONE,
    },
    NavEntry {
        id: "sales",
        label: "Sales",
        href: "/dashboard/sales",
        roles: EVERYONE,
    },
    NavEntry {
        id: "products",
        label: "Products",
        href: "/dashboard/products",
        roles: MANAGEMENT,
    },
    NavEntry {
        id: "inventory",
        label: "Inventory",
        href: "/dashboard/inventory",
        roles: MANAGEMENT,
    },
    NavEntry {
        id: "reports",
        label: "Reports",
        href: "/dashboard/reports",
        roles: MANAGEMENT,
    },
    NavEntry {
        id: "users",
        label: "Users",
        href: "/dashboard/users",
        roles: ADMIN_ONLY,
    },
    NavEntry {
        id: "settings",
        label: "Settings",
        href: "/dashboard/settings",
        roles: MANAGEMENT,
    },
    NavEntry {
        id: "tables",
        label: "Tables",
        href: "/dashboard/tables",
        roles: EVERYONE,
    },
    NavEntry {
        id: "kitchen",
        label: "Kitchen",
        href: "/dashboard/kitchen",
        roles: EVERYONE,
    },
];

/// The dashboard's sidebar, in display order.
pub fn default_menu() -> &'static [NavEntry] {
    &DEFAULT_MENU
}

/// Entries visible to a holder of any of `roles`, in their original order.
///
/// ```rust
/// use posboard::menu::{default_menu, visible_entries};
/// use posboard::session::Role;
/// use std::collections::BTreeSet;
///
/// let cashier = BTreeSet::from([Role::Cashier]);
/// let ids: Vec<&str> = visible_entries(default_menu(), &cashier)
///     .iter()
///     .map(|e| e.id)
///     .collect();
/// assert_eq!(ids, ["dashboard", "sales", "tables", "kitchen"]);
/// ```
pub fn visible_entries<'a>(entries: &'a [NavEntry], roles: &BTreeSet<Role>) -> Vec<&'a NavEntry> {
    entries.iter().filter(|entry| entry.visible_to(roles)).collect()
}

/// Entries visible to a single role.
pub fn entries_for(role: Role) -> Vec<&'static NavEntry> {
    visible_entries(default_menu(), &BTreeSet::from([role]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entries: &[&NavEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_admin_sees_everything() {
        assert_eq!(entries_for(Role::Admin).len(), default_menu().len());
    }

    #[test]
    fn test_manager_lacks_users() {
        let manager = ids(&entries_for(Role::Manager));
        assert!(manager.contains(&"settings"));
        assert!(!manager.contains(&"users"));
    }

    #[test]
    fn test_role_set_is_a_union() {
        let roles = BTreeSet::from([Role::Cashier, Role::Manager]);
        assert_eq!(visible_entries(default_menu(), &roles).len(), 8);
        assert!(visible_entries(default_menu(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_menu_order() {
        let all = ids(&entries_for(Role::Admin));
        assert_eq!(
            all,
            [
                "dashboard",
                "sales",
                "products",
                "inventory",
                "reports",
                "users",
                "settings",
                "tables",
                "kitchen"
            ]
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let unique: BTreeSet<&str> = default_menu().iter().map(|e| e.id).collect();
        assert_eq!(unique.len(), default_menu().len());
    }
}
