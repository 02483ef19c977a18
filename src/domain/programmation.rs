use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};
use crate::lettres::nombre_en_lettres;

/// A planned budget line for one rubric within a (mois, annee) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Programmation {
    pub id: Uuid,
    /// Sequence within the (mois, annee) pair, assigned on insertion.
    pub numero: u32,
    /// 1-12.
    pub mois: u32,
    pub annee: i32,
    pub rubrique: String,
    pub designation: String,
    pub montant_prevu: i64,
    pub montant_prevu_lettres: String,
    /// Once validated the line can no longer be deleted.
    pub valide: bool,
}

impl Programmation {
    pub fn new(
        mois: u32,
        annee: i32,
        rubrique: impl Into<String>,
        designation: impl Into<String>,
        montant_prevu: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            numero: 0,
            mois,
            annee,
            rubrique: rubrique.into(),
            designation: designation.into(),
            montant_prevu,
            montant_prevu_lettres: nombre_en_lettres(montant_prevu),
            valide: false,
        }
    }

    pub fn valider(&mut self) {
        self.valide = true;
    }
}

impl Identifiable for Programmation {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Programmation {
    fn display_label(&self) -> String {
        format!(
            "{:02}/{} #{} {} ({})",
            self.mois, self.annee, self.numero, self.designation, self.montant_prevu
        )
    }
}
