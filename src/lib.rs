#![doc(test(attr(deny(warnings))))]

//! Caisse Core provides the ledger, reporting, and administration primitives
//! behind a revenue-office cash register: recette/depense bookkeeping, monthly
//! programmation, official report generation, and role-gated operations.

pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod export;
pub mod lettres;
pub mod query;
pub mod registre;
pub mod reports;
pub mod security;
pub mod services;
pub mod storage;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Caisse Core tracing initialized.");
    });
}
