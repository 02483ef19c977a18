//! CRUD helpers for the rubrique and service reference tables. Codes are
//! unique; referenced entries are soft-disabled instead of deleted.

use uuid::Uuid;

use crate::domain::{Rubrique, ServiceRef};
use crate::registre::Registre;
use crate::security::Role;
use crate::services::{require_write, ServiceError, ServiceResult};

pub struct RubriqueService;

impl RubriqueService {
    pub fn creer(
        registre: &mut Registre,
        role: Role,
        code: &str,
        libelle: &str,
    ) -> ServiceResult<Uuid> {
        require_write(role)?;
        let code = code.trim();
        if code.is_empty() {
            return Err(ServiceError::Invalid("code: required".into()));
        }
        if libelle.trim().is_empty() {
            return Err(ServiceError::Invalid("libelle: required".into()));
        }
        if registre.rubrique_par_code(code).is_some() {
            return Err(ServiceError::Invalid(format!(
                "rubrique `{code}` already exists"
            )));
        }
        Ok(registre.add_rubrique(Rubrique::new(code, libelle.trim())))
    }

    pub fn renommer(
        registre: &mut Registre,
        role: Role,
        id: Uuid,
        libelle: &str,
    ) -> ServiceResult<()> {
        require_write(role)?;
        if libelle.trim().is_empty() {
            return Err(ServiceError::Invalid("libelle: required".into()));
        }
        let rubrique = registre
            .rubrique_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Rubrique not found".into()))?;
        rubrique.libelle = libelle.trim().to_string();
        registre.touch();
        Ok(())
    }

    /// Disables the rubrique; historical rows keep their reference.
    pub fn desactiver(registre: &mut Registre, role: Role, id: Uuid) -> ServiceResult<()> {
        require_write(role)?;
        let rubrique = registre
            .rubrique_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Rubrique not found".into()))?;
        rubrique.actif = false;
        registre.touch();
        Ok(())
    }

    /// Hard-deletes an unreferenced rubrique. A referenced one must be
    /// deactivated instead so historical rows keep resolving.
    pub fn supprimer(registre: &mut Registre, role: Role, id: Uuid) -> ServiceResult<Rubrique> {
        crate::services::require_delete(role)?;
        let code = registre
            .rubriques
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.code.clone())
            .ok_or_else(|| ServiceError::Invalid("Rubrique not found".into()))?;
        if registre.rubrique_referencee(&code) {
            return Err(ServiceError::Invalid(format!(
                "rubrique `{code}` is referenced; deactivate it instead"
            )));
        }
        registre
            .remove_rubrique(id)
            .ok_or_else(|| ServiceError::Invalid("Rubrique not found".into()))
    }

    /// Active rubriques, in creation order.
    pub fn actives(registre: &Registre) -> Vec<&Rubrique> {
        registre.rubriques.iter().filter(|r| r.actif).collect()
    }
}

pub struct ServiceRefService;

impl ServiceRefService {
    pub fn creer(
        registre: &mut Registre,
        role: Role,
        code: &str,
        libelle: &str,
    ) -> ServiceResult<Uuid> {
        require_write(role)?;
        let code = code.trim();
        if code.is_empty() {
            return Err(ServiceError::Invalid("code: required".into()));
        }
        if libelle.trim().is_empty() {
            return Err(ServiceError::Invalid("libelle: required".into()));
        }
        if registre.service_par_code(code).is_some() {
            return Err(ServiceError::Invalid(format!(
                "service `{code}` already exists"
            )));
        }
        Ok(registre.add_service(ServiceRef::new(code, libelle.trim())))
    }

    pub fn desactiver(registre: &mut Registre, role: Role, id: Uuid) -> ServiceResult<()> {
        require_write(role)?;
        let service = registre
            .service_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Service not found".into()))?;
        service.actif = false;
        registre.touch();
        Ok(())
    }

    pub fn actifs(registre: &Registre) -> Vec<&ServiceRef> {
        registre.services.iter().filter(|s| s.actif).collect()
    }
}
