use std::fmt;

use serde::{Deserialize, Serialize};

/// The sole authorization discriminant. There is no finer permission model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Pharmacist,
    Administrator,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Pharmacist, Role::Administrator];

    pub fn label(self) -> &'static str {
        match self {
            Role::Pharmacist => "Pharmacist",
            Role::Administrator => "Administrator",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }

    /// The role a user is switched to from the user management list.
    pub fn toggled(self) -> Self {
        match self {
            Role::Pharmacist => Role::Administrator,
            Role::Administrator => Role::Pharmacist,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub profile_completed: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl User {
    pub fn is_pharmacist(&self) -> bool {
        self.role == Role::Pharmacist
    }

    pub fn is_administrator(&self) -> bool {
        self.role == Role::Administrator
    }
}

/// Partial update to a user's own profile. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub profile_completed: Option<bool>,
}
