//! Tracing setup for applications driving PopForge.
//!
//! The engine only emits `tracing` events:
//!
//! - **INFO**: generator construction and exhaustion
//! - **DEBUG**: manager construction, set-type materialization
//! - **TRACE**: every emitted combination
//!
//! A subscriber is installed only when the application asks for one.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<bool> = OnceLock::new();

/// Environment variable consulted before `RUST_LOG`.
pub const ENV_VAR: &str = "POPFORGE_LOG";

const DEFAULT_DIRECTIVE: &str = "popforge_ranking=info";

/// Installs a formatting subscriber filtered by `filter`.
///
/// Safe to call multiple times - only the first call has effect. Returns
/// `true` when this subscriber became the global default; `false` when the
/// filter did not parse or another global subscriber was already set.
pub fn init(filter: &str) -> bool {
    *INIT.get_or_init(|| match EnvFilter::try_new(filter) {
        Ok(filter) => install(filter),
        Err(_) => false,
    })
}

/// Installs a formatting subscriber filtered by `POPFORGE_LOG`, falling back
/// to `RUST_LOG` and then to `popforge_ranking=info`.
pub fn init_from_env() -> bool {
    *INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(ENV_VAR)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        install(filter)
    })
}

/// Uses `log_filter` from the configuration when present, the environment
/// otherwise.
pub fn init_from_config(config: &popforge_config::PopForgeConfig) -> bool {
    match config.log_filter.as_deref() {
        Some(filter) => init(filter),
        None => init_from_env(),
    }
}

fn install(filter: EnvFilter) -> bool {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let first = init("popforge=debug");
        assert_eq!(init("popforge=trace"), first);
        assert_eq!(init_from_env(), first);
    }
}
