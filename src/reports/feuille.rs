//! Feuille de caisse: chronological ledger rows with running balances over an
//! inclusive date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::TransactionKind;
use crate::errors::CaisseError;
use crate::store::{Periode, TransactionStore};

/// One printed row of the feuille de caisse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LigneFeuille {
    /// 1-based display order, independent of the stored sequence numbers.
    pub numero: u32,
    pub date: NaiveDate,
    /// `REC-0001` / `DEP-0001`, unique per transaction.
    pub reference: String,
    pub libelle: String,
    pub recette: i64,
    pub depense: i64,
    pub net: i64,
    /// Cash in the drawer. Defined identical to `solde` on this form: there
    /// is no separate encaisse/bank split.
    pub encaisse: i64,
    pub solde: i64,
}

/// Generates the feuille de caisse for the range, seeding the running balance
/// at `solde_initial`. An empty or inverted range yields an empty sheet.
pub fn feuille_caisse(
    store: &dyn TransactionStore,
    periode: &Periode,
    solde_initial: i64,
) -> Result<Vec<LigneFeuille>, CaisseError> {
    if periode.est_vide() {
        return Ok(Vec::new());
    }

    let mut mouvements: Vec<(NaiveDate, String, String, i64, i64)> = Vec::new();
    for txn in store.transactions_dans_periode(TransactionKind::Recette, periode)? {
        mouvements.push((txn.date, txn.reference(), txn.motif.clone(), txn.montant, 0));
    }
    for txn in store.transactions_dans_periode(TransactionKind::Depense, periode)? {
        mouvements.push((txn.date, txn.reference(), txn.motif.clone(), 0, txn.montant));
    }

    // Deterministic order: date first, then the unique reference code breaks
    // same-day ties.
    mouvements.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mut solde = solde_initial;
    let lignes = mouvements
        .into_iter()
        .enumerate()
        .map(|(idx, (date, reference, libelle, recette, depense))| {
            let net = recette - depense;
            solde += net;
            LigneFeuille {
                numero: idx as u32 + 1,
                date,
                reference,
                libelle,
                recette,
                depense,
                net,
                encaisse: solde,
                solde,
            }
        })
        .collect();
    Ok(lignes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Transaction;
    use crate::registre::Registre;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registre_janvier() -> Registre {
        let mut registre = Registre::new("Essai");
        registre.add_transaction(Transaction::nouvelle(
            TransactionKind::Recette,
            date(2025, 1, 5),
            "Tresor",
            "Taxe fonciere",
            1000,
        ));
        registre.add_transaction(Transaction::nouvelle(
            TransactionKind::Depense,
            date(2025, 1, 10),
            "Fournisseur",
            "Fournitures",
            400,
        ));
        registre
    }

    #[test]
    fn scenario_two_rows_final_balance() {
        let registre = registre_janvier();
        let periode = Periode::new(date(2025, 1, 1), date(2025, 1, 31));
        let lignes = feuille_caisse(&registre, &periode, 0).unwrap();

        assert_eq!(lignes.len(), 2);
        assert_eq!(lignes[0].reference, "REC-0001");
        assert_eq!(lignes[0].solde, 1000);
        assert_eq!(lignes[1].reference, "DEP-0001");
        assert_eq!(lignes[1].solde, 600);
        assert_eq!(lignes[1].encaisse, 600);
    }

    #[test]
    fn balance_conservation_holds() {
        let mut registre = registre_janvier();
        registre.add_transaction(Transaction::nouvelle(
            TransactionKind::Recette,
            date(2025, 1, 10),
            "Tresor",
            "Amende",
            250,
        ));
        let periode = Periode::new(date(2025, 1, 1), date(2025, 1, 31));
        let lignes = feuille_caisse(&registre, &periode, 500).unwrap();

        let recettes: i64 = lignes.iter().map(|l| l.recette).sum();
        let depenses: i64 = lignes.iter().map(|l| l.depense).sum();
        assert_eq!(lignes.last().unwrap().solde, 500 + recettes - depenses);
    }

    #[test]
    fn rows_are_ordered_by_date_then_reference() {
        let mut registre = Registre::new("Essai");
        // Same-day recette and dépense: DEP sorts before REC lexicographically.
        registre.add_transaction(Transaction::nouvelle(
            TransactionKind::Recette,
            date(2025, 3, 7),
            "Tresor",
            "Taxe",
            100,
        ));
        registre.add_transaction(Transaction::nouvelle(
            TransactionKind::Depense,
            date(2025, 3, 7),
            "Fournisseur",
            "Achat",
            40,
        ));
        registre.add_transaction(Transaction::nouvelle(
            TransactionKind::Recette,
            date(2025, 3, 1),
            "Tresor",
            "Amende",
            10,
        ));

        let periode = Periode::new(date(2025, 3, 1), date(2025, 3, 31));
        let lignes = feuille_caisse(&registre, &periode, 0).unwrap();
        let refs: Vec<&str> = lignes.iter().map(|l| l.reference.as_str()).collect();
        assert_eq!(refs, vec!["REC-0002", "DEP-0001", "REC-0001"]);
        assert_eq!(
            lignes.iter().map(|l| l.numero).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn inverted_range_yields_empty_sheet() {
        let registre = registre_janvier();
        let periode = Periode::new(date(2025, 1, 31), date(2025, 1, 1));
        assert!(feuille_caisse(&registre, &periode, 0).unwrap().is_empty());
    }

    #[test]
    fn generation_is_idempotent() {
        let registre = registre_janvier();
        let periode = Periode::new(date(2025, 1, 1), date(2025, 1, 31));
        let once = feuille_caisse(&registre, &periode, 0).unwrap();
        let twice = feuille_caisse(&registre, &periode, 0).unwrap();
        assert_eq!(once, twice);
    }
}
