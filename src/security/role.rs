use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CaisseError;

/// Closed set of application roles. Write paths check capabilities through
/// the predicates below, never by comparing strings at call sites.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instructeur,
    Observateur,
}

impl Role {
    /// Roles allowed to create and edit rows.
    pub fn can_write(self) -> bool {
        matches!(self, Role::Admin | Role::Instructeur)
    }

    /// Only administrators may delete.
    pub fn can_delete(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructeur => "instructeur",
            Role::Observateur => "observateur",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CaisseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "instructeur" => Ok(Role::Instructeur),
            "observateur" => Ok(Role::Observateur),
            other => Err(CaisseError::Validation(format!("unknown role `{other}`"))),
        }
    }
}
