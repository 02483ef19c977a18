//! Sommaire: one aggregate row per budget rubric plus the recette total and
//! an optional carry-forward row.

use serde::{Deserialize, Serialize};

use crate::domain::TransactionKind;
use crate::errors::CaisseError;
use crate::store::{Periode, TransactionStore};

/// Code of the carry-forward row.
pub const CODE_REPORT: &str = "REPORT";
/// Code of the aggregate recette row.
pub const CODE_RECETTES: &str = "REC";
/// Fallback code for dépenses with no rubric reference.
pub const CODE_AUTRE: &str = "AUTRE";

const LIBELLE_REPORT: &str = "Solde reporté";
const LIBELLE_RECETTES: &str = "Total des recettes";
const LIBELLE_AUTRE: &str = "Autres dépenses";

/// One aggregate row of the sommaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LigneSommaire {
    pub code: String,
    pub libelle: String,
    pub recette: i64,
    pub depense: i64,
    /// Period flow of the row. Zero on the carry-forward row: the balance
    /// brought forward is not a movement of the period, which keeps the sum
    /// of nets equal to `solde final − solde initial`.
    pub net: i64,
    pub encaisse: i64,
    pub solde: i64,
}

/// Generates the sommaire for the range. Dépenses are grouped by rubric code
/// in first-seen order; recettes are collapsed into one total row. The
/// carry-forward row is emitted only when `solde_initial > 0`.
pub fn sommaire(
    store: &dyn TransactionStore,
    periode: &Periode,
    solde_initial: i64,
) -> Result<Vec<LigneSommaire>, CaisseError> {
    if periode.est_vide() {
        return Ok(Vec::new());
    }

    let total_recettes: i64 = store.total_dans_periode(TransactionKind::Recette, periode)?;

    // Insertion-ordered grouping: (code, libelle, total).
    let mut groupes: Vec<(String, String, i64)> = Vec::new();
    for txn in store.transactions_dans_periode(TransactionKind::Depense, periode)? {
        let (code, libelle) = match txn.rubrique.as_deref() {
            Some(code) => (code.to_string(), code.to_string()),
            None => (CODE_AUTRE.to_string(), LIBELLE_AUTRE.to_string()),
        };
        match groupes.iter_mut().find(|(c, _, _)| *c == code) {
            Some((_, _, total)) => *total += txn.montant,
            None => groupes.push((code, libelle, txn.montant)),
        }
    }

    let mut lignes = Vec::new();
    if solde_initial > 0 {
        lignes.push(LigneSommaire {
            code: CODE_REPORT.to_string(),
            libelle: LIBELLE_REPORT.to_string(),
            recette: solde_initial,
            depense: 0,
            net: 0,
            encaisse: solde_initial,
            solde: solde_initial,
        });
    }

    let mut solde = solde_initial + total_recettes;
    lignes.push(LigneSommaire {
        code: CODE_RECETTES.to_string(),
        libelle: LIBELLE_RECETTES.to_string(),
        recette: total_recettes,
        depense: 0,
        net: total_recettes,
        encaisse: solde,
        solde,
    });

    for (code, libelle, total) in groupes {
        solde -= total;
        lignes.push(LigneSommaire {
            code,
            libelle,
            recette: 0,
            depense: total,
            net: -total,
            encaisse: solde,
            solde,
        });
    }

    Ok(lignes)
}
