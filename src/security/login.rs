//! Failed-login lockout policy: five strikes inside the window lock the
//! account for fifteen minutes. Credential checking itself lives in the auth
//! collaborator; this module only tracks attempts.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

/// Lockout thresholds. `now` is always passed by the caller so the policy
/// stays deterministic under test.
#[derive(Debug, Clone)]
pub struct LoginPolicy {
    pub max_failures: u32,
    pub lock_duration: Duration,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self {
            max_failures: 5,
            lock_duration: Duration::minutes(15),
        }
    }
}

/// Outcome of a lockout check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Open,
    Locked { until: DateTime<Utc> },
}

/// Tracks failures per user and applies the lockout policy.
#[derive(Debug, Default)]
pub struct LoginGuard {
    policy: LoginPolicy,
    failures: HashMap<String, u32>,
    locked_until: HashMap<String, DateTime<Utc>>,
}

impl LoginGuard {
    pub fn new(policy: LoginPolicy) -> Self {
        Self {
            policy,
            failures: HashMap::new(),
            locked_until: HashMap::new(),
        }
    }

    /// Current state for a user. An elapsed lock clears itself and resets the
    /// failure count.
    pub fn state(&mut self, user: &str, now: DateTime<Utc>) -> LoginState {
        if let Some(until) = self.locked_until.get(user).copied() {
            if now < until {
                return LoginState::Locked { until };
            }
            self.locked_until.remove(user);
            self.failures.remove(user);
        }
        LoginState::Open
    }

    /// Records a failed attempt, locking the account once the threshold is
    /// reached. Returns the resulting state.
    pub fn record_failure(&mut self, user: &str, now: DateTime<Utc>) -> LoginState {
        if let LoginState::Locked { until } = self.state(user, now) {
            return LoginState::Locked { until };
        }
        let count = self.failures.entry(user.to_string()).or_insert(0);
        *count += 1;
        if *count >= self.policy.max_failures {
            let until = now + self.policy.lock_duration;
            self.locked_until.insert(user.to_string(), until);
            tracing::warn!(user, %until, "account locked after repeated failures");
            return LoginState::Locked { until };
        }
        LoginState::Open
    }

    /// A successful login clears the failure history.
    pub fn record_success(&mut self, user: &str) {
        self.failures.remove(user);
        self.locked_until.remove(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn five_failures_lock_for_fifteen_minutes() {
        let mut guard = LoginGuard::new(LoginPolicy::default());
        let t0 = now();
        for _ in 0..4 {
            assert_eq!(guard.record_failure("agent", t0), LoginState::Open);
        }
        let state = guard.record_failure("agent", t0);
        assert_eq!(
            state,
            LoginState::Locked {
                until: t0 + Duration::minutes(15)
            }
        );
        assert!(matches!(
            guard.state("agent", t0 + Duration::minutes(14)),
            LoginState::Locked { .. }
        ));
    }

    #[test]
    fn lock_expires_and_resets_the_count() {
        let mut guard = LoginGuard::new(LoginPolicy::default());
        let t0 = now();
        for _ in 0..5 {
            guard.record_failure("agent", t0);
        }
        let later = t0 + Duration::minutes(16);
        assert_eq!(guard.state("agent", later), LoginState::Open);
        // Counter restarted: one more failure does not lock again.
        assert_eq!(guard.record_failure("agent", later), LoginState::Open);
    }

    #[test]
    fn success_clears_failures() {
        let mut guard = LoginGuard::new(LoginPolicy::default());
        let t0 = now();
        for _ in 0..4 {
            guard.record_failure("agent", t0);
        }
        guard.record_success("agent");
        assert_eq!(guard.record_failure("agent", t0), LoginState::Open);
    }

    #[test]
    fn users_are_tracked_independently() {
        let mut guard = LoginGuard::new(LoginPolicy::default());
        let t0 = now();
        for _ in 0..5 {
            guard.record_failure("a", t0);
        }
        assert_eq!(guard.state("b", t0), LoginState::Open);
    }
}
