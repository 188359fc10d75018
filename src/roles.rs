use serde::Serialize;
use std::collections::HashMap;

/// Who a signed-in user is to this schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Ea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewSchedule,
    EditSchedule,
    ViewCalendar,
    EditCalendar,
    ManageSettings,
    ManageUsers,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ViewSchedule => "view_schedule",
            Capability::EditSchedule => "edit_schedule",
            Capability::ViewCalendar => "view_calendar",
            Capability::EditCalendar => "edit_calendar",
            Capability::ManageSettings => "manage_settings",
            Capability::ManageUsers => "manage_users",
        }
    }
}

/// Capabilities granted to each role.
pub const PERMISSIONS: &[(Role, &[Capability])] = &[
    (
        Role::Owner,
        &[
            Capability::ViewSchedule,
            Capability::EditSchedule,
            Capability::ViewCalendar,
            Capability::EditCalendar,
            Capability::ManageSettings,
            Capability::ManageUsers,
        ],
    ),
    (
        Role::Ea,
        &[
            Capability::ViewSchedule,
            Capability::EditSchedule,
            Capability::ViewCalendar,
            Capability::EditCalendar,
        ],
    ),
];

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Ea => "ea",
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        PERMISSIONS
            .iter()
            .find(|(role, _)| *role == self)
            .is_some_and(|(_, granted)| granted.contains(&capability))
    }
}

/// A caller whose email resolved to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppUser {
    pub email: String,
    pub role: Role,
}

/// Maps known emails to roles. Matching ignores case.
#[derive(Debug, Clone, Default)]
pub struct RoleDirectory {
    members: HashMap<String, Role>,
}

impl RoleDirectory {
    pub fn new(owner_email: Option<&str>, ea_email: Option<&str>) -> Self {
        let mut directory = Self::default();
        // Owner wins if both are configured to the same address.
        if let Some(email) = ea_email {
            directory.insert(email, Role::Ea);
        }
        if let Some(email) = owner_email {
            directory.insert(email, Role::Owner);
        }
        directory
    }

    fn insert(&mut self, email: &str, role: Role) {
        let email = email.trim();
        if !email.is_empty() {
            self.members.insert(email.to_lowercase(), role);
        }
    }

    pub fn resolve(&self, email: &str) -> Option<AppUser> {
        let email = email.trim();
        self.members.get(&email.to_lowercase()).map(|&role| AppUser {
            email: email.to_string(),
            role,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_table() {
        assert!(Role::Owner.can(Capability::ManageSettings));
        assert!(Role::Owner.can(Capability::ManageUsers));
        assert!(Role::Ea.can(Capability::EditSchedule));
        assert!(Role::Ea.can(Capability::EditCalendar));
        assert!(!Role::Ea.can(Capability::ManageSettings));
        assert!(!Role::Ea.can(Capability::ManageUsers));
    }

    #[test]
    fn test_resolve_ignores_case() {
        let directory = RoleDirectory::new(Some("Owner@Example.com"), Some("ea@example.com"));
        assert_eq!(directory.resolve("owner@example.com").unwrap().role, Role::Owner);
        assert_eq!(directory.resolve("EA@EXAMPLE.COM").unwrap().role, Role::Ea);
        assert!(directory.resolve("stranger@example.com").is_none());
        assert!(directory.resolve("").is_none());
    }

    #[test]
    fn test_unconfigured_directory_resolves_nobody() {
        let directory = RoleDirectory::new(None, Some("  "));
        assert!(directory.is_empty());
        assert!(directory.resolve("anyone@example.com").is_none());
    }
}
