//! Paginated plain-text rendering: repeated page headers, fixed-width
//! columns, an optional watermark line, and page-numbered footers.

use super::{Document, DocumentRenderer};
use crate::errors::CaisseError;

const DEFAULT_LIGNES_PAR_PAGE: usize = 40;

pub struct TexteRenderer {
    lignes_par_page: usize,
}

impl TexteRenderer {
    pub fn new() -> Self {
        Self {
            lignes_par_page: DEFAULT_LIGNES_PAR_PAGE,
        }
    }

    pub fn with_lignes_par_page(mut self, lignes_par_page: usize) -> Self {
        self.lignes_par_page = lignes_par_page.max(1);
        self
    }

    fn render_page(
        &self,
        document: &Document,
        rows: &[Vec<String>],
        page: usize,
        pages: usize,
        out: &mut String,
    ) {
        out.push_str(&document.titre);
        out.push('\n');
        if let Some(sous_titre) = &document.sous_titre {
            out.push_str(sous_titre);
            out.push('\n');
        }
        if let Some(filigrane) = &document.filigrane {
            out.push_str(&format!("*** {} ***\n", filigrane));
        }

        let header: Vec<String> = document
            .colonnes
            .iter()
            .map(|col| pad(&col.entete, col.largeur))
            .collect();
        out.push_str(&header.join(" | "));
        out.push('\n');
        let total_width: usize =
            document.colonnes.iter().map(|c| c.largeur).sum::<usize>()
                + 3 * document.colonnes.len().saturating_sub(1);
        out.push_str(&"-".repeat(total_width));
        out.push('\n');

        for row in rows {
            let cells: Vec<String> = document
                .colonnes
                .iter()
                .enumerate()
                .map(|(idx, col)| pad(row.get(idx).map(String::as_str).unwrap_or(""), col.largeur))
                .collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }

        out.push_str(&format!("Page {}/{}\n", page, pages));
    }
}

impl Default for TexteRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for TexteRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, CaisseError> {
        let pages = document.lignes.chunks(self.lignes_par_page).count().max(1);
        let mut out = String::new();
        if document.lignes.is_empty() {
            self.render_page(document, &[], 1, 1, &mut out);
        } else {
            for (idx, chunk) in document.lignes.chunks(self.lignes_par_page).enumerate() {
                if idx > 0 {
                    out.push('\u{c}');
                }
                self.render_page(document, chunk, idx + 1, pages, &mut out);
            }
        }
        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

fn pad(value: &str, width: usize) -> String {
    let mut cell: String = value.chars().take(width).collect();
    while cell.chars().count() < width {
        cell.push(' ');
    }
    cell
}
