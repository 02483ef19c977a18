use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};
use crate::lettres::nombre_en_lettres;

/// Width of the zero-padded sequence number inside a reference code.
const REFERENCE_PAD: usize = 4;

/// Distinguishes cash-in from cash-out entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Recette,
    Depense,
}

impl TransactionKind {
    /// Prefix used when building the reference code (`REC-0001`, `DEP-0001`).
    pub fn reference_prefix(&self) -> &'static str {
        match self {
            TransactionKind::Recette => "REC",
            TransactionKind::Depense => "DEP",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Recette => "Recette",
            TransactionKind::Depense => "Dépense",
        }
    }
}

/// A recorded cash movement. Identity (`id`, `numero`) is immutable once the
/// row is persisted; business fields stay editable by writer roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    /// Per-kind sequence number, assigned by the registre on insertion.
    pub numero: u32,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub heure: NaiveTime,
    /// Provenance for a recette, bénéficiaire for a dépense.
    pub tiers: String,
    pub motif: String,
    /// Whole currency units, never negative.
    pub montant: i64,
    pub montant_lettres: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubrique: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solde_avant: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solde_apres: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

impl Transaction {
    pub fn nouvelle(
        kind: TransactionKind,
        date: NaiveDate,
        tiers: impl Into<String>,
        motif: impl Into<String>,
        montant: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            numero: 0,
            kind,
            date,
            heure: Utc::now().time(),
            tiers: tiers.into(),
            motif: motif.into(),
            montant,
            montant_lettres: nombre_en_lettres(montant),
            rubrique: None,
            service: None,
            beo: None,
            solde_avant: None,
            solde_apres: None,
            observation: None,
        }
    }

    pub fn with_rubrique(mut self, code: impl Into<String>) -> Self {
        self.rubrique = Some(code.into());
        self
    }

    pub fn with_service(mut self, code: impl Into<String>) -> Self {
        self.service = Some(code.into());
        self
    }

    pub fn with_observation(mut self, note: impl Into<String>) -> Self {
        self.observation = Some(note.into());
        self
    }

    /// Reference code shown on official documents, unique per transaction.
    pub fn reference(&self) -> String {
        format!(
            "{}-{:0pad$}",
            self.kind.reference_prefix(),
            self.numero,
            pad = REFERENCE_PAD
        )
    }

    /// Updates the amount, keeping the legal amount-in-words field in sync.
    pub fn set_montant(&mut self, montant: i64) {
        self.montant = montant;
        self.montant_lettres = nombre_en_lettres(montant);
    }

    /// Records the cash position around this movement. A recette adds to the
    /// opening balance, a dépense subtracts from it.
    pub fn set_soldes(&mut self, solde_avant: i64) {
        let delta = match self.kind {
            TransactionKind::Recette => self.montant,
            TransactionKind::Depense => -self.montant,
        };
        self.solde_avant = Some(solde_avant);
        self.solde_apres = Some(solde_avant + delta);
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {} ({})", self.reference(), self.motif, self.montant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reference_is_zero_padded_per_kind() {
        let mut rec = Transaction::nouvelle(
            TransactionKind::Recette,
            date(2025, 1, 5),
            "Tresor",
            "Taxe",
            1000,
        );
        rec.numero = 7;
        assert_eq!(rec.reference(), "REC-0007");

        let mut dep = Transaction::nouvelle(
            TransactionKind::Depense,
            date(2025, 1, 6),
            "Fournisseur",
            "Achat",
            400,
        );
        dep.numero = 123;
        assert_eq!(dep.reference(), "DEP-0123");
    }

    #[test]
    fn set_montant_keeps_words_in_sync() {
        let mut txn = Transaction::nouvelle(
            TransactionKind::Recette,
            date(2025, 1, 5),
            "Tresor",
            "Taxe",
            1000,
        );
        assert_eq!(txn.montant_lettres, "mille");
        txn.set_montant(1234);
        assert_eq!(txn.montant_lettres, "mille deux cent trente-quatre");
    }

    #[test]
    fn soldes_follow_the_kind_sign_convention() {
        let mut rec = Transaction::nouvelle(
            TransactionKind::Recette,
            date(2025, 1, 5),
            "Tresor",
            "Taxe",
            1000,
        );
        rec.set_soldes(250);
        assert_eq!(rec.solde_apres, Some(1250));

        let mut dep = Transaction::nouvelle(
            TransactionKind::Depense,
            date(2025, 1, 6),
            "Fournisseur",
            "Achat",
            400,
        );
        dep.set_soldes(1250);
        assert_eq!(dep.solde_apres, Some(850));
    }
}
