//! The registre is the in-memory aggregate owning every recorded row for one
//! caisse: transactions, reference tables, and programmation lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Programmation, Rubrique, ServiceRef, Transaction, TransactionKind};
use crate::errors::CaisseError;
use crate::store::{Periode, TransactionStore};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registre {
    pub id: Uuid,
    pub nom: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub rubriques: Vec<Rubrique>,
    #[serde(default)]
    pub services: Vec<ServiceRef>,
    #[serde(default)]
    pub programmations: Vec<Programmation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Registre::schema_version_default")]
    pub schema_version: u8,
}

impl Registre {
    pub fn new(nom: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            nom: nom.into(),
            transactions: Vec::new(),
            rubriques: Vec::new(),
            services: Vec::new(),
            programmations: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Next per-kind sequence number. Uniqueness within a kind is owned here,
    /// the same way the hosted store computed it server-side.
    pub fn prochain_numero(&self, kind: TransactionKind) -> u32 {
        self.transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .map(|txn| txn.numero)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Next programmation sequence within a (mois, annee) pair.
    pub fn prochain_numero_programmation(&self, mois: u32, annee: i32) -> u32 {
        self.programmations
            .iter()
            .filter(|ligne| ligne.mois == mois && ligne.annee == annee)
            .map(|ligne| ligne.numero)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Inserts a transaction, assigning its sequence number when unset.
    pub fn add_transaction(&mut self, mut transaction: Transaction) -> Uuid {
        if transaction.numero == 0 {
            transaction.numero = self.prochain_numero(transaction.kind);
        }
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let idx = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(idx);
        self.touch();
        Some(removed)
    }

    pub fn add_rubrique(&mut self, rubrique: Rubrique) -> Uuid {
        let id = rubrique.id;
        self.rubriques.push(rubrique);
        self.touch();
        id
    }

    pub fn rubrique_par_code(&self, code: &str) -> Option<&Rubrique> {
        self.rubriques.iter().find(|r| r.code == code)
    }

    pub fn rubrique_mut(&mut self, id: Uuid) -> Option<&mut Rubrique> {
        self.rubriques.iter_mut().find(|r| r.id == id)
    }

    /// True when any dépense or programmation line still references the code.
    pub fn rubrique_referencee(&self, code: &str) -> bool {
        self.transactions
            .iter()
            .any(|txn| txn.rubrique.as_deref() == Some(code))
            || self.programmations.iter().any(|p| p.rubrique == code)
    }

    pub fn remove_rubrique(&mut self, id: Uuid) -> Option<Rubrique> {
        let idx = self.rubriques.iter().position(|r| r.id == id)?;
        let removed = self.rubriques.remove(idx);
        self.touch();
        Some(removed)
    }

    pub fn add_service(&mut self, service: ServiceRef) -> Uuid {
        let id = service.id;
        self.services.push(service);
        self.touch();
        id
    }

    pub fn service_par_code(&self, code: &str) -> Option<&ServiceRef> {
        self.services.iter().find(|s| s.code == code)
    }

    pub fn service_mut(&mut self, id: Uuid) -> Option<&mut ServiceRef> {
        self.services.iter_mut().find(|s| s.id == id)
    }

    /// Inserts a programmation line, assigning its per-month sequence number.
    pub fn add_programmation(&mut self, mut ligne: Programmation) -> Uuid {
        if ligne.numero == 0 {
            ligne.numero = self.prochain_numero_programmation(ligne.mois, ligne.annee);
        }
        let id = ligne.id;
        self.programmations.push(ligne);
        self.touch();
        id
    }

    pub fn programmation(&self, id: Uuid) -> Option<&Programmation> {
        self.programmations.iter().find(|p| p.id == id)
    }

    pub fn programmation_mut(&mut self, id: Uuid) -> Option<&mut Programmation> {
        self.programmations.iter_mut().find(|p| p.id == id)
    }

    /// Lines for one (mois, annee), sorted by sequence number.
    pub fn programmations_du_mois(&self, mois: u32, annee: i32) -> Vec<&Programmation> {
        let mut lignes: Vec<&Programmation> = self
            .programmations
            .iter()
            .filter(|p| p.mois == mois && p.annee == annee)
            .collect();
        lignes.sort_by_key(|p| p.numero);
        lignes
    }

    /// Removes a programmation line. Validated lines are locked.
    pub fn remove_programmation(&mut self, id: Uuid) -> Result<Programmation, CaisseError> {
        let idx = self
            .programmations
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CaisseError::InvalidRef(format!("programmation {id} not found")))?;
        if self.programmations[idx].valide {
            return Err(CaisseError::Validation(
                "a validated programmation line cannot be deleted".to_string(),
            ));
        }
        let removed = self.programmations.remove(idx);
        self.touch();
        Ok(removed)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl TransactionStore for Registre {
    fn transactions_dans_periode(
        &self,
        kind: TransactionKind,
        periode: &Periode,
    ) -> Result<Vec<Transaction>, CaisseError> {
        Ok(self
            .transactions
            .iter()
            .filter(|txn| txn.kind == kind && periode.contient(txn.date))
            .cloned()
            .collect())
    }
}
