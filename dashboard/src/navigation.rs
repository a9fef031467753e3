//! Menu and quick actions, derived purely from the effective [`Role`].
//!
//! Order is part of the contract: base entries first, superadmin-only
//! entries appended after them, both in declaration order.

use serde::Serialize;
use shared::types::{Principal, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Everyone,
    SuperAdminOnly,
}

impl Visibility {
    pub fn allows(&self, role: Role) -> bool {
        match (self, role) {
            (Self::Everyone, _) => true,
            (Self::SuperAdminOnly, Role::SuperAdmin) => true,
            (Self::SuperAdminOnly, Role::Admin | Role::Client) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub route: &'static str,
    pub icon: &'static str,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub route: &'static str,
    pub visibility: Visibility,
}

const fn nav(
    label: &'static str,
    route: &'static str,
    icon: &'static str,
    visibility: Visibility,
) -> NavItem {
    NavItem {
        label,
        route,
        icon,
        visibility,
    }
}

const MENU: [NavItem; 8] = [
    nav("Dashboard", "/dashboard", "layout-dashboard", Visibility::Everyone),
    nav("Exams", "/exams", "file-text", Visibility::Everyone),
    nav("Users", "/users", "users", Visibility::Everyone),
    nav("Results", "/results", "bar-chart", Visibility::Everyone),
    nav("Assessment", "/assessment", "pen-tool", Visibility::Everyone),
    nav("Partners", "/partners", "briefcase", Visibility::SuperAdminOnly),
    nav("Admins", "/admins", "shield", Visibility::SuperAdminOnly),
    nav("Add-Balance", "/add-balance", "wallet", Visibility::SuperAdminOnly),
];

const QUICK_ACTIONS: [QuickAction; 5] = [
    QuickAction {
        label: "Create exam",
        route: "/exams/new",
        visibility: Visibility::Everyone,
    },
    QuickAction {
        label: "Add writing section",
        route: "/assessment/writing/new",
        visibility: Visibility::Everyone,
    },
    QuickAction {
        label: "Add admin",
        route: "/admins/new",
        visibility: Visibility::SuperAdminOnly,
    },
    QuickAction {
        label: "Add partner",
        route: "/partners/new",
        visibility: Visibility::SuperAdminOnly,
    },
    QuickAction {
        label: "Add balance",
        route: "/add-balance",
        visibility: Visibility::SuperAdminOnly,
    },
];

pub fn navigation(role: Role) -> Vec<NavItem> {
    MENU.iter()
        .filter(|item| item.visibility.allows(role))
        .cloned()
        .collect()
}

pub fn navigation_for(principal: &Principal) -> Vec<NavItem> {
    navigation(principal.role())
}

pub fn quick_actions(role: Role) -> Vec<QuickAction> {
    QUICK_ACTIONS
        .iter()
        .filter(|action| action.visibility.allows(role))
        .cloned()
        .collect()
}
