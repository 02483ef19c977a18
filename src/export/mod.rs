//! Renderer-agnostic document view-model and the adapters that serialize it.
//! The actual PDF/XLSX encodings belong to external collaborators; the text
//! adapter mirrors the paginated page layout they consume and the tableur
//! adapter emits a spreadsheet-importable CSV.

pub mod tableur;
pub mod texte;

use serde::{Deserialize, Serialize};

use crate::errors::CaisseError;

pub use tableur::TableurRenderer;
pub use texte::TexteRenderer;

/// One column of a rendered table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colonne {
    pub entete: String,
    pub cle: String,
    pub largeur: usize,
}

impl Colonne {
    pub fn new(entete: impl Into<String>, cle: impl Into<String>, largeur: usize) -> Self {
        Self {
            entete: entete.into(),
            cle: cle.into(),
            largeur,
        }
    }
}

/// View-model handed to every renderer: a titled, columned table with
/// pre-formatted cells and an optional watermark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub titre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sous_titre: Option<String>,
    pub colonnes: Vec<Colonne>,
    pub lignes: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filigrane: Option<String>,
}

impl Document {
    pub fn new(titre: impl Into<String>, colonnes: Vec<Colonne>) -> Self {
        Self {
            titre: titre.into(),
            sous_titre: None,
            colonnes,
            lignes: Vec::new(),
            filigrane: None,
        }
    }

    pub fn with_sous_titre(mut self, sous_titre: impl Into<String>) -> Self {
        self.sous_titre = Some(sous_titre.into());
        self
    }

    pub fn with_filigrane(mut self, filigrane: impl Into<String>) -> Self {
        self.filigrane = Some(filigrane.into());
        self
    }

    pub fn push_ligne(&mut self, cells: Vec<String>) {
        self.lignes.push(cells);
    }
}

/// Serializes a document into one output format.
pub trait DocumentRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, CaisseError>;

    /// File extension for downloads.
    fn extension(&self) -> &'static str;
}
