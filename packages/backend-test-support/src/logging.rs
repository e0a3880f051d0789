//! Test logging initialization shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per process.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`. Setting
/// `TEST_LOG_FORMAT=json` switches to the production JSON layout, which is
/// handy when checking that auth rejections never leak raw tokens.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let directives = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());
        let filter = EnvFilter::new(&directives);

        let json = std::env::var("TEST_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time();

        // Never panic if something else already initialized
        let installed = if json {
            builder.json().try_init().is_ok()
        } else {
            builder.try_init().is_ok()
        };

        if installed {
            debug!(filter = %directives, json, "test subscriber installed");
        }
    });
}
