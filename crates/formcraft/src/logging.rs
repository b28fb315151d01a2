use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "FORMCRAFT_LOG";

/// Picks the filter directive: `FORMCRAFT_LOG`, then `RUST_LOG`, then the
/// configured fallback.
pub fn filter_directive(
    lookup: impl Fn(&str) -> Option<String>,
    fallback: &str,
) -> String {
    [ENV_LOG, "RUST_LOG"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Installs the global subscriber, writing to stderr so stdout stays
/// machine-readable. Safe to call more than once.
pub fn init(fallback: &str) {
    let directive = filter_directive(|key| std::env::var(key).ok(), fallback);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formcraft_log_wins_over_rust_log() {
        let env = |key: &str| match key {
            ENV_LOG => Some("debug".to_string()),
            "RUST_LOG" => Some("info".to_string()),
            _ => None,
        };
        assert_eq!(filter_directive(env, "warn"), "debug");
    }

    #[test]
    fn blank_values_fall_through() {
        let env = |key: &str| match key {
            ENV_LOG => Some(" ".to_string()),
            _ => None,
        };
        assert_eq!(filter_directive(env, "warn"), "warn");
    }
}
