//! Report façade: generates the feuille de caisse and sommaire view-models,
//! resolves carry-forward balances, and shapes them into export documents.

use crate::config::Config;
use crate::export::{Colonne, Document};
use crate::registre::Registre;
use crate::reports::{feuille_caisse, sommaire, LigneFeuille, LigneSommaire, SoldeResolver};
use crate::services::ServiceResult;
use crate::store::Periode;
use crate::utils::format_montant;

pub struct ReportService;

impl ReportService {
    pub fn feuille(
        registre: &Registre,
        periode: &Periode,
        solde_initial: i64,
    ) -> ServiceResult<Vec<LigneFeuille>> {
        Ok(feuille_caisse(registre, periode, solde_initial)?)
    }

    pub fn sommaire(
        registre: &Registre,
        periode: &Periode,
        solde_initial: i64,
    ) -> ServiceResult<Vec<LigneSommaire>> {
        Ok(sommaire(registre, periode, solde_initial)?)
    }

    /// Balance carried into (mois, annee), resolved against the configured
    /// floor year.
    pub fn solde_anterieur(
        registre: &Registre,
        config: &Config,
        mois: u32,
        annee: i32,
    ) -> ServiceResult<i64> {
        let resolver = SoldeResolver::new(registre, config.annee_plancher);
        Ok(resolver.solde_anterieur(mois, annee)?)
    }

    /// Feuille de caisse shaped for the document renderers.
    pub fn document_feuille(lignes: &[LigneFeuille], periode: &Periode) -> Document {
        let mut doc = Document::new(
            "FEUILLE DE CAISSE",
            vec![
                Colonne::new("N°", "numero", 4),
                Colonne::new("Date", "date", 10),
                Colonne::new("Référence", "reference", 10),
                Colonne::new("Libellé", "libelle", 28),
                Colonne::new("Recette", "recette", 12),
                Colonne::new("Dépense", "depense", 12),
                Colonne::new("Solde", "solde", 12),
            ],
        )
        .with_sous_titre(format!("Période du {} au {}", periode.debut, periode.fin));
        for ligne in lignes {
            doc.push_ligne(vec![
                ligne.numero.to_string(),
                ligne.date.to_string(),
                ligne.reference.clone(),
                ligne.libelle.clone(),
                format_montant(ligne.recette),
                format_montant(ligne.depense),
                format_montant(ligne.solde),
            ]);
        }
        doc
    }

    /// Sommaire shaped for the document renderers.
    pub fn document_sommaire(lignes: &[LigneSommaire], periode: &Periode) -> Document {
        let mut doc = Document::new(
            "SOMMAIRE",
            vec![
                Colonne::new("Code", "code", 8),
                Colonne::new("Libellé", "libelle", 28),
                Colonne::new("Recettes", "recette", 12),
                Colonne::new("Dépenses", "depense", 12),
                Colonne::new("Solde", "solde", 12),
            ],
        )
        .with_sous_titre(format!("Période du {} au {}", periode.debut, periode.fin));
        for ligne in lignes {
            doc.push_ligne(vec![
                ligne.code.clone(),
                ligne.libelle.clone(),
                format_montant(ligne.recette),
                format_montant(ligne.depense),
                format_montant(ligne.solde),
            ]);
        }
        doc
    }
}
