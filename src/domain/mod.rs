//! Domain entities recorded by the caisse: transactions, budget references,
//! and monthly programmation lines.

pub mod common;
pub mod programmation;
pub mod reference;
pub mod transaction;

pub use programmation::Programmation;
pub use reference::{Rubrique, ServiceRef};
pub use transaction::{Transaction, TransactionKind};
