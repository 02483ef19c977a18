//! Budget reference tables: rubriques (expense categories) and services
//! (organizational units). Both are soft-disabled rather than deleted so that
//! historical rows keep resolving.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// Budget expense category referenced by dépenses and programmation lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rubrique {
    pub id: Uuid,
    pub code: String,
    pub libelle: String,
    pub actif: bool,
}

impl Rubrique {
    pub fn new(code: impl Into<String>, libelle: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            libelle: libelle.into(),
            actif: true,
        }
    }
}

impl Identifiable for Rubrique {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Rubrique {
    fn display_label(&self) -> String {
        format!("{} — {}", self.code, self.libelle)
    }
}

/// Organizational unit attached to recettes and dépenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRef {
    pub id: Uuid,
    pub code: String,
    pub libelle: String,
    pub actif: bool,
}

impl ServiceRef {
    pub fn new(code: impl Into<String>, libelle: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            libelle: libelle.into(),
            actif: true,
        }
    }
}

impl Identifiable for ServiceRef {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for ServiceRef {
    fn display_label(&self) -> String {
        format!("{} — {}", self.code, self.libelle)
    }
}
