//! Monthly budget programmation: planned lines per rubric, validated before
//! execution and locked against deletion afterwards.

use uuid::Uuid;

use crate::domain::Programmation;
use crate::errors::CaisseError;
use crate::registre::Registre;
use crate::security::Role;
use crate::services::{require_delete, require_write, ServiceError, ServiceResult};

pub struct ProgrammationService;

impl ProgrammationService {
    pub fn ajouter(
        registre: &mut Registre,
        role: Role,
        ligne: Programmation,
    ) -> ServiceResult<Uuid> {
        require_write(role)?;
        if !(1..=12).contains(&ligne.mois) {
            return Err(ServiceError::Invalid(format!(
                "mois: must be 1-12, got {}",
                ligne.mois
            )));
        }
        if ligne.designation.trim().is_empty() {
            return Err(ServiceError::Invalid("designation: required".into()));
        }
        if ligne.montant_prevu < 0 {
            return Err(ServiceError::Invalid(
                "montant_prevu: must not be negative".into(),
            ));
        }
        if registre.rubrique_par_code(&ligne.rubrique).is_none() {
            return Err(ServiceError::Invalid(format!(
                "unknown rubrique `{}`",
                ligne.rubrique
            )));
        }
        Ok(registre.add_programmation(ligne))
    }

    /// Marks the line as validated, locking it permanently.
    pub fn valider(registre: &mut Registre, role: Role, id: Uuid) -> ServiceResult<()> {
        require_write(role)?;
        let ligne = registre
            .programmation_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Programmation not found".into()))?;
        ligne.valider();
        registre.touch();
        Ok(())
    }

    /// Removes an unvalidated line; a validated one is refused.
    pub fn supprimer(registre: &mut Registre, role: Role, id: Uuid) -> ServiceResult<Programmation> {
        require_delete(role)?;
        match registre.remove_programmation(id) {
            Ok(ligne) => Ok(ligne),
            Err(CaisseError::Validation(message)) => Err(ServiceError::Invalid(message)),
            Err(err) => Err(err.into()),
        }
    }

    /// Lines of one month, sorted by sequence number.
    pub fn du_mois(registre: &Registre, mois: u32, annee: i32) -> Vec<&Programmation> {
        registre.programmations_du_mois(mois, annee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rubrique;

    fn registre_avec_rubrique() -> Registre {
        let mut registre = Registre::new("Essai");
        registre.add_rubrique(Rubrique::new("R01", "Carburant"));
        registre
    }

    #[test]
    fn validated_line_survives_delete_attempts() {
        let mut registre = registre_avec_rubrique();
        let id = ProgrammationService::ajouter(
            &mut registre,
            Role::Admin,
            Programmation::new(1, 2025, "R01", "Carburant janvier", 5000),
        )
        .unwrap();
        ProgrammationService::valider(&mut registre, Role::Admin, id).unwrap();

        let err = ProgrammationService::supprimer(&mut registre, Role::Admin, id)
            .expect_err("validated line must be locked");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(registre.programmation(id).is_some());
    }

    #[test]
    fn unvalidated_line_can_be_deleted_by_admin() {
        let mut registre = registre_avec_rubrique();
        let id = ProgrammationService::ajouter(
            &mut registre,
            Role::Admin,
            Programmation::new(1, 2025, "R01", "Carburant janvier", 5000),
        )
        .unwrap();
        let removed = ProgrammationService::supprimer(&mut registre, Role::Admin, id).unwrap();
        assert_eq!(removed.id, id);
    }

    #[test]
    fn invalid_month_and_unknown_rubrique_are_rejected() {
        let mut registre = registre_avec_rubrique();
        let err = ProgrammationService::ajouter(
            &mut registre,
            Role::Admin,
            Programmation::new(13, 2025, "R01", "Hors calendrier", 100),
        )
        .expect_err("month 13 must be rejected");
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("mois")));

        let err = ProgrammationService::ajouter(
            &mut registre,
            Role::Admin,
            Programmation::new(2, 2025, "R99", "Rubrique inconnue", 100),
        )
        .expect_err("unknown rubrique must be rejected");
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("R99")));
    }

    #[test]
    fn words_follow_the_planned_amount() {
        let ligne = Programmation::new(3, 2025, "R01", "Entretien", 2000);
        assert_eq!(ligne.montant_prevu_lettres, "deux mille");
    }
}
