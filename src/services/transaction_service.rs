//! Business logic helpers for recette and dépense rows.

use uuid::Uuid;

use crate::domain::Transaction;
use crate::registre::Registre;
use crate::security::Role;
use crate::services::{require_delete, require_write, ServiceError, ServiceResult};

/// Provides validated, role-gated CRUD helpers for transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates and records a transaction, returning its identifier.
    pub fn enregistrer(
        registre: &mut Registre,
        role: Role,
        transaction: Transaction,
    ) -> ServiceResult<Uuid> {
        require_write(role)?;
        valider(&transaction)?;
        if let Some(code) = transaction.rubrique.as_deref() {
            if registre.rubrique_par_code(code).is_none() {
                return Err(ServiceError::Invalid(format!("unknown rubrique `{code}`")));
            }
        }
        if let Some(code) = transaction.service.as_deref() {
            if registre.service_par_code(code).is_none() {
                return Err(ServiceError::Invalid(format!("unknown service `{code}`")));
            }
        }
        let id = registre.add_transaction(transaction);
        tracing::info!(%id, "transaction recorded");
        Ok(id)
    }

    /// Updates mutable fields via the mutator; identity fields stay put and
    /// the result is re-validated.
    pub fn modifier<F>(
        registre: &mut Registre,
        role: Role,
        id: Uuid,
        mutator: F,
    ) -> ServiceResult<()>
    where
        F: FnOnce(&mut Transaction),
    {
        require_write(role)?;
        let txn = registre
            .transaction_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        let (id_avant, numero_avant) = (txn.id, txn.numero);
        mutator(txn);
        txn.id = id_avant;
        txn.numero = numero_avant;
        valider(txn)?;
        registre.touch();
        Ok(())
    }

    /// Removes the transaction, returning the removed instance.
    pub fn supprimer(registre: &mut Registre, role: Role, id: Uuid) -> ServiceResult<Transaction> {
        require_delete(role)?;
        registre
            .remove_transaction(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))
    }
}

/// Field-level validation applied before any store write.
fn valider(transaction: &Transaction) -> ServiceResult<()> {
    if transaction.montant < 0 {
        return Err(ServiceError::Invalid(
            "montant: must not be negative".into(),
        ));
    }
    if transaction.motif.trim().is_empty() {
        return Err(ServiceError::Invalid("motif: required".into()));
    }
    if transaction.tiers.trim().is_empty() {
        return Err(ServiceError::Invalid("tiers: required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rubrique, TransactionKind};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recette(montant: i64) -> Transaction {
        Transaction::nouvelle(
            TransactionKind::Recette,
            date(2025, 1, 5),
            "Tresor",
            "Taxe",
            montant,
        )
    }

    #[test]
    fn observer_cannot_write() {
        let mut registre = Registre::new("Essai");
        let err = TransactionService::enregistrer(&mut registre, Role::Observateur, recette(100))
            .expect_err("observer writes must be rejected");
        assert!(matches!(err, ServiceError::Permission(Role::Observateur)));
        assert_eq!(registre.transaction_count(), 0);
    }

    #[test]
    fn only_admin_deletes() {
        let mut registre = Registre::new("Essai");
        let id =
            TransactionService::enregistrer(&mut registre, Role::Instructeur, recette(100)).unwrap();

        let err = TransactionService::supprimer(&mut registre, Role::Instructeur, id)
            .expect_err("instructeur delete must be rejected");
        assert!(matches!(err, ServiceError::Permission(_)));

        let removed = TransactionService::supprimer(&mut registre, Role::Admin, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(registre.transaction(id).is_none());
    }

    #[test]
    fn validation_rejects_missing_fields() {
        let mut registre = Registre::new("Essai");
        let mut sans_motif = recette(100);
        sans_motif.motif = "  ".into();
        let err = TransactionService::enregistrer(&mut registre, Role::Admin, sans_motif)
            .expect_err("empty motif must be rejected");
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("motif")));

        let err = TransactionService::enregistrer(&mut registre, Role::Admin, recette(-5))
            .expect_err("negative montant must be rejected");
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("montant")));
    }

    #[test]
    fn unknown_rubrique_is_rejected() {
        let mut registre = Registre::new("Essai");
        let txn = Transaction::nouvelle(
            TransactionKind::Depense,
            date(2025, 1, 6),
            "Fournisseur",
            "Achat",
            50,
        )
        .with_rubrique("R99");
        let err = TransactionService::enregistrer(&mut registre, Role::Admin, txn)
            .expect_err("unknown rubrique must be rejected");
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("R99")));
    }

    #[test]
    fn update_preserves_identity_fields() {
        let mut registre = Registre::new("Essai");
        registre.add_rubrique(Rubrique::new("R01", "Carburant"));
        let id = TransactionService::enregistrer(&mut registre, Role::Admin, recette(100)).unwrap();
        let numero = registre.transaction(id).unwrap().numero;

        TransactionService::modifier(&mut registre, Role::Admin, id, |txn| {
            txn.numero = 999;
            txn.set_montant(250);
        })
        .unwrap();

        let txn = registre.transaction(id).unwrap();
        assert_eq!(txn.numero, numero);
        assert_eq!(txn.montant, 250);
        assert_eq!(txn.montant_lettres, "deux cent cinquante");
    }
}
