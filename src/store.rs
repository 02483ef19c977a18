//! Read-side contract over the row store: inclusive date-range queries used
//! by the report generators and the balance resolver.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionKind};
use crate::errors::CaisseError;

/// Inclusive date range. An inverted range is not an error: queries over it
/// simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Periode {
    pub debut: NaiveDate,
    pub fin: NaiveDate,
}

impl Periode {
    pub fn new(debut: NaiveDate, fin: NaiveDate) -> Self {
        Self { debut, fin }
    }

    /// Full calendar month window, honoring variable month lengths.
    pub fn mois(mois: u32, annee: i32) -> Result<Self, CaisseError> {
        let debut = NaiveDate::from_ymd_opt(annee, mois, 1)
            .ok_or_else(|| CaisseError::Validation(format!("invalid month {mois}/{annee}")))?;
        let fin = dernier_jour_du_mois(annee, mois)
            .ok_or_else(|| CaisseError::Validation(format!("invalid month {mois}/{annee}")))?;
        Ok(Self { debut, fin })
    }

    pub fn contient(&self, date: NaiveDate) -> bool {
        self.debut <= date && date <= self.fin
    }

    pub fn est_vide(&self) -> bool {
        self.debut > self.fin
    }
}

/// Last day of a month, derived from the first day of the following month.
pub fn dernier_jour_du_mois(annee: i32, mois: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if mois == 12 {
        (annee + 1, 1)
    } else {
        (annee, mois + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_next - Duration::days(1))
}

/// Previous (mois, annee), rolling the year over January.
pub fn mois_precedent(mois: u32, annee: i32) -> (u32, i32) {
    if mois == 1 {
        (12, annee - 1)
    } else {
        (mois - 1, annee)
    }
}

/// Filtered range reads against the transaction store. The registre provides
/// the in-memory implementation; a remote row store would implement the same
/// contract.
pub trait TransactionStore {
    /// Rows of one kind with `date` inside the inclusive range.
    fn transactions_dans_periode(
        &self,
        kind: TransactionKind,
        periode: &Periode,
    ) -> Result<Vec<Transaction>, CaisseError>;

    /// Sum of `montant` over the matching rows.
    fn total_dans_periode(
        &self,
        kind: TransactionKind,
        periode: &Periode,
    ) -> Result<i64, CaisseError> {
        Ok(self
            .transactions_dans_periode(kind, periode)?
            .iter()
            .map(|txn| txn.montant)
            .sum())
    }
}
