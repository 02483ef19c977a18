//! Report view-model generators: the chronological feuille de caisse, the
//! per-rubric sommaire, and the carry-forward balance resolver.

pub mod feuille;
pub mod solde;
pub mod sommaire;

pub use feuille::{feuille_caisse, LigneFeuille};
pub use solde::{CancelToken, SoldeResolver};
pub use sommaire::{sommaire, LigneSommaire, CODE_AUTRE, CODE_RECETTES, CODE_REPORT};
