//! Signed-in user profiles.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HOUSEHOLD, HOUSEHOLD_CODE_LEN};

/// A user and the household whose events and links they see.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub uid: String,
    pub display_name: String,
    pub household_code: String,
}

impl UserProfile {
    /// Profile for a first sign-in. The name falls back to the email, and the
    /// household code is the start of the uid so a new user begins in a
    /// household of their own.
    pub fn for_new_user(uid: &str, display_name: Option<&str>, email: Option<&str>) -> Self {
        let display_name = display_name
            .filter(|n| !n.trim().is_empty())
            .or(email)
            .unwrap_or_default()
            .to_string();

        UserProfile {
            uid: uid.to_string(),
            display_name,
            household_code: uid.chars().take(HOUSEHOLD_CODE_LEN).collect(),
        }
    }

    /// The household to read from; profiles without a code share the default one.
    pub fn effective_household(&self) -> &str {
        let code = self.household_code.trim();
        if code.is_empty() { DEFAULT_HOUSEHOLD } else { code }
    }
}
