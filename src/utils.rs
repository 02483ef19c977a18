use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("caisse_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Formats a whole-unit amount with French thousands grouping (`1 234 567`).
pub fn format_montant(montant: i64) -> String {
    let negative = montant < 0;
    let digits = montant.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        let remaining = digits.len() - idx;
        if idx > 0 && remaining % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
