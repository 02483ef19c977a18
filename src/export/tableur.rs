//! Spreadsheet adapter: CSV emitted through the `csv` crate, importable by
//! the workbook tooling used downstream.

use csv::WriterBuilder;

use super::{Document, DocumentRenderer};
use crate::errors::CaisseError;

pub struct TableurRenderer;

impl TableurRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableurRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for TableurRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, CaisseError> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(document.colonnes.iter().map(|col| col.entete.as_str()))?;

        for row in &document.lignes {
            let cells: Vec<&str> = document
                .colonnes
                .iter()
                .enumerate()
                .map(|(idx, _)| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect();
            writer.write_record(&cells)?;
        }
        writer
            .into_inner()
            .map_err(|err| CaisseError::Storage(err.to_string()))
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Colonne;

    #[test]
    fn renders_header_and_rows() {
        let mut doc = Document::new(
            "Sommaire",
            vec![
                Colonne::new("Code", "code", 8),
                Colonne::new("Libellé", "libelle", 24),
            ],
        );
        doc.push_ligne(vec!["R01".to_string(), "Carburant".to_string()]);
        let text = String::from_utf8(TableurRenderer::new().render(&doc).unwrap()).unwrap();
        assert_eq!(text, "Code,Libellé\nR01,Carburant\n");
    }

    #[test]
    fn quotes_cells_with_separators() {
        let mut doc = Document::new("Sommaire", vec![Colonne::new("Libellé", "libelle", 24)]);
        doc.push_ligne(vec!["Achat, divers \"urgents\"".to_string()]);
        let text = String::from_utf8(TableurRenderer::new().render(&doc).unwrap()).unwrap();
        assert!(text.contains("\"Achat, divers \"\"urgents\"\"\""));
    }

    #[test]
    fn short_rows_are_padded_to_the_column_count() {
        let mut doc = Document::new(
            "Sommaire",
            vec![
                Colonne::new("Code", "code", 8),
                Colonne::new("Libellé", "libelle", 24),
            ],
        );
        doc.push_ligne(vec!["R01".to_string()]);
        let text = String::from_utf8(TableurRenderer::new().render(&doc).unwrap()).unwrap();
        assert_eq!(text, "Code,Libellé\nR01,\n");
    }
}
