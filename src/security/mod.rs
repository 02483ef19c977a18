//! Role capabilities, login-lockout policy, and audit-log listing used by the
//! administration screens.

pub mod audit;
pub mod login;
pub mod role;

pub use audit::{attempts_par_jour, AuditEntry, AuditFilter, DailyLoginStats, LoginAttempt};
pub use login::{LoginGuard, LoginPolicy, LoginState};
pub use role::Role;
