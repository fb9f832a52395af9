// ABOUTME: Staff account definitions and the profile projection stored per identity
// ABOUTME: The first role in a staff account's role list is its primary role
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};

/// A staff login to create in the identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAccount {
    /// Login email, unique across identities
    pub email: String,
    /// Initial password
    pub password: String,
    /// Name shown in the app
    pub display_name: String,
    /// Ordered roles; the first is the primary role
    pub roles: Vec<String>,
}

impl StaffAccount {
    /// Create a staff account definition
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
        roles: &[&str],
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: display_name.into(),
            roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        }
    }

    /// Primary role, empty when no roles are listed
    #[must_use]
    pub fn primary_role(&self) -> &str {
        self.roles.first().map_or("", String::as_str)
    }

    /// Profile projection written under `userProfiles/{uid}`
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            role: self.primary_role().to_owned(),
            roles: self.roles.clone(),
            is_active: true,
        }
    }
}

/// Profile document mirrored from a staff account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Name shown in the app
    pub display_name: String,
    /// Login email
    pub email: String,
    /// Primary role
    pub role: String,
    /// All roles, primary first
    pub roles: Vec<String>,
    /// Seeded profiles are always active
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_role_is_first() {
        let doctor = StaffAccount::new("d@x.com", "P", "Dr", &["medical_officer", "doctor"]);
        assert_eq!(doctor.primary_role(), "medical_officer");

        let nobody = StaffAccount::new("n@x.com", "P", "N", &[]);
        assert_eq!(nobody.primary_role(), "");
    }

    #[test]
    fn test_profile_wire_fields() {
        let admin = StaffAccount::new("a@x.com", "P1", "A", &["admin"]);
        let json = serde_json::to_value(admin.profile()).unwrap();

        assert_eq!(json["displayName"], "A");
        assert_eq!(json["role"], "admin");
        assert_eq!(json["roles"], serde_json::json!(["admin"]));
        assert_eq!(json["isActive"], true);
        assert!(json.get("password").is_none());
    }
}
