//! Audit-log and login-attempt records as the admin screens consume them:
//! filtered listings plus the per-day aggregation behind the charts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One audit-log row written by the backend on privileged actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub utilisateur: String,
    pub action: String,
    pub table: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AuditEntry {
    pub fn new(
        utilisateur: impl Into<String>,
        action: impl Into<String>,
        table: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            utilisateur: utilisateur.into(),
            action: action.into(),
            table: table.into(),
            date,
            details: None,
        }
    }
}

/// One recorded login attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub utilisateur: String,
    pub date: DateTime<Utc>,
    pub succes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
}

/// Listing filter; `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub utilisateur: Option<String>,
    pub action: Option<String>,
    pub depuis: Option<DateTime<Utc>>,
    pub jusqua: Option<DateTime<Utc>>,
}

impl AuditFilter {
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        if let Some(user) = &self.utilisateur {
            if &entry.utilisateur != user {
                return false;
            }
        }
        if let Some(action) = &self.action {
            if &entry.action != action {
                return false;
            }
        }
        if let Some(depuis) = self.depuis {
            if entry.date < depuis {
                return false;
            }
        }
        if let Some(jusqua) = self.jusqua {
            if entry.date > jusqua {
                return false;
            }
        }
        true
    }

    /// Matching entries, newest first.
    pub fn apply<'a>(&self, entries: &'a [AuditEntry]) -> Vec<&'a AuditEntry> {
        let mut matched: Vec<&AuditEntry> =
            entries.iter().filter(|e| self.matches(e)).collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        matched
    }
}

/// Per-day success/failure counts for the dashboard chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLoginStats {
    pub jour: NaiveDate,
    pub reussites: u32,
    pub echecs: u32,
}

/// Aggregates attempts per calendar day, ordered chronologically.
pub fn attempts_par_jour(attempts: &[LoginAttempt]) -> Vec<DailyLoginStats> {
    let mut jours: Vec<DailyLoginStats> = Vec::new();
    for attempt in attempts {
        let jour = attempt.date.date_naive();
        let idx = match jours.iter().position(|s| s.jour == jour) {
            Some(idx) => idx,
            None => {
                jours.push(DailyLoginStats {
                    jour,
                    reussites: 0,
                    echecs: 0,
                });
                jours.len() - 1
            }
        };
        let stats = &mut jours[idx];
        if attempt.succes {
            stats.reussites += 1;
        } else {
            stats.echecs += 1;
        }
    }
    jours.sort_by_key(|s| s.jour);
    jours
}
