//! Carry-forward balance resolver: walks backward month by month, summing
//! recettes and dépenses, down to the configured floor year.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::TransactionKind;
use crate::errors::CaisseError;
use crate::store::{mois_precedent, Periode, TransactionStore};

/// Cooperative cancellation flag shared with the caller. The resolver is the
/// only multi-round-trip operation, so it checks the token once per month
/// walked.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Resolves the balance carried into a month. One pair of range queries is
/// issued per month walked backward, with no memoization: a historical edit
/// is therefore always visible to the next resolution.
pub struct SoldeResolver<'a> {
    store: &'a dyn TransactionStore,
    /// Recursion floor. The walk never descends below this year; without it
    /// the backward recursion would be unbounded.
    annee_plancher: i32,
    cancel: CancelToken,
}

impl<'a> SoldeResolver<'a> {
    pub fn new(store: &'a dyn TransactionStore, annee_plancher: i32) -> Self {
        Self {
            store,
            annee_plancher,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Balance carried into (mois, annee): the closing balance of the
    /// previous month.
    pub fn solde_anterieur(&self, mois: u32, annee: i32) -> Result<i64, CaisseError> {
        if !(1..=12).contains(&mois) {
            return Err(CaisseError::Validation(format!(
                "month must be 1-12, got {mois}"
            )));
        }
        let (mois_prec, annee_prec) = mois_precedent(mois, annee);
        self.solde_fin_de_mois(mois_prec, annee_prec)
    }

    /// Closing balance of (mois, annee): its own totals plus whatever was
    /// carried into it, recursing while the year stays at or above the floor.
    fn solde_fin_de_mois(&self, mois: u32, annee: i32) -> Result<i64, CaisseError> {
        if self.cancel.is_cancelled() {
            return Err(CaisseError::Cancelled);
        }
        tracing::debug!(mois, annee, "resolving month balance");

        let periode = Periode::mois(mois, annee)?;
        let recettes = self
            .store
            .total_dans_periode(TransactionKind::Recette, &periode)?;
        let depenses = self
            .store
            .total_dans_periode(TransactionKind::Depense, &periode)?;

        let report = if annee >= self.annee_plancher {
            let (mois_prec, annee_prec) = mois_precedent(mois, annee);
            self.solde_fin_de_mois(mois_prec, annee_prec)?
        } else {
            0
        };

        Ok(report + recettes - depenses)
    }
}
