pub mod builders;

use std::sync::Once;

use calgraph::logging::{LOG_ENV, parse_level_str};
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Output goes through the test writer, so it only shows for failing tests
/// (or with `-- --nocapture`). `RUST_LOG` wins if set; otherwise the level
/// comes from `CALGRAPH_LOG`, like the binary, and defaults to `warn` so
/// passing runs stay quiet.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(filter_directive(std::env::var(LOG_ENV).ok().as_deref()))
        });

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Filter directive for a `CALGRAPH_LOG` value: the named level for the
/// `calgraph` target, or `warn` when unset or unparsable.
pub fn filter_directive(calgraph_log: Option<&str>) -> String {
    match calgraph_log.and_then(parse_level_str) {
        Some(level) => format!("calgraph={}", level.to_string().to_lowercase()),
        None => "warn".to_string(),
    }
}

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("test timed out after 5 seconds")
}
