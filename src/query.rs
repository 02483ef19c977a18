//! Paginated read layer over a registre, with the first page of each kind
//! cached behind an injected TTL cache.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cache::TtlCache;
use crate::domain::{Transaction, TransactionKind};
use crate::registre::Registre;

/// Row shape returned to listings. `date` mirrors `transaction.date` for
/// consumers of the legacy column name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LigneListe {
    pub date: NaiveDate,
    pub transaction: Transaction,
}

impl From<Transaction> for LigneListe {
    fn from(transaction: Transaction) -> Self {
        Self {
            date: transaction.date,
            transaction,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone)]
pub struct Page {
    pub lignes: Vec<LigneListe>,
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
}

/// Query layer owning the first-page cache. Callers hold one per screen; the
/// cache is explicit state, not a module-level global.
pub struct RegistreQuery {
    cache: TtlCache<Vec<LigneListe>>,
    first_page_ttl: Duration,
}

impl RegistreQuery {
    pub fn new(first_page_ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(),
            first_page_ttl,
        }
    }

    /// Newest-first page of one transaction kind.
    pub fn page(
        &mut self,
        registre: &Registre,
        kind: TransactionKind,
        offset: usize,
        limit: usize,
    ) -> Page {
        let total = registre
            .transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .count();

        if offset == 0 {
            let key = cache_key(kind, limit);
            if let Some(lignes) = self.cache.get(&key) {
                return Page {
                    lignes,
                    offset,
                    limit,
                    total,
                };
            }
            let lignes = fetch(registre, kind, 0, limit);
            self.cache
                .set(key, lignes.clone(), self.first_page_ttl);
            return Page {
                lignes,
                offset,
                limit,
                total,
            };
        }

        Page {
            lignes: fetch(registre, kind, offset, limit),
            offset,
            limit,
            total,
        }
    }

    /// Drops cached pages after a write so the next read observes it.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }
}

fn cache_key(kind: TransactionKind, limit: usize) -> String {
    format!("{}:page0:{}", kind.reference_prefix(), limit)
}

fn fetch(
    registre: &Registre,
    kind: TransactionKind,
    offset: usize,
    limit: usize,
) -> Vec<LigneListe> {
    let mut rows: Vec<&Transaction> = registre
        .transactions
        .iter()
        .filter(|txn| txn.kind == kind)
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.numero.cmp(&a.numero)));
    rows.into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .map(LigneListe::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registre_avec_recettes(n: u32) -> Registre {
        let mut registre = Registre::new("Essai");
        for i in 0..n {
            registre.add_transaction(Transaction::nouvelle(
                TransactionKind::Recette,
                date(2025, 1, 1 + i),
                "Tresor",
                format!("Taxe {i}"),
                100,
            ));
        }
        registre
    }

    #[test]
    fn pages_are_newest_first() {
        let registre = registre_avec_recettes(5);
        let mut query = RegistreQuery::new(Duration::from_secs(60));
        let page = query.page(&registre, TransactionKind::Recette, 0, 3);
        assert_eq!(page.total, 5);
        assert_eq!(page.lignes.len(), 3);
        assert_eq!(page.lignes[0].date, date(2025, 1, 5));
        assert_eq!(page.lignes[0].transaction.numero, 5);
    }

    #[test]
    fn offset_pages_bypass_the_cache() {
        let registre = registre_avec_recettes(5);
        let mut query = RegistreQuery::new(Duration::from_secs(60));
        let page = query.page(&registre, TransactionKind::Recette, 3, 3);
        assert_eq!(page.lignes.len(), 2);
        assert_eq!(page.lignes[1].date, date(2025, 1, 1));
    }

    #[test]
    fn first_page_is_served_from_cache_until_invalidated() {
        let mut registre = registre_avec_recettes(2);
        let mut query = RegistreQuery::new(Duration::from_secs(60));
        let before = query.page(&registre, TransactionKind::Recette, 0, 10);
        assert_eq!(before.lignes.len(), 2);

        registre.add_transaction(Transaction::nouvelle(
            TransactionKind::Recette,
            date(2025, 1, 20),
            "Tresor",
            "Taxe",
            100,
        ));

        // Stale until the caller invalidates after the write.
        let cached = query.page(&registre, TransactionKind::Recette, 0, 10);
        assert_eq!(cached.lignes.len(), 2);

        query.invalidate();
        let fresh = query.page(&registre, TransactionKind::Recette, 0, 10);
        assert_eq!(fresh.lignes.len(), 3);
    }

    #[test]
    fn date_alias_mirrors_the_transaction_date() {
        let registre = registre_avec_recettes(1);
        let mut query = RegistreQuery::new(Duration::from_secs(60));
        let page = query.page(&registre, TransactionKind::Recette, 0, 10);
        assert_eq!(page.lignes[0].date, page.lignes[0].transaction.date);
    }
}
