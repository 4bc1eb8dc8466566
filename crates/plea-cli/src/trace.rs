//! Tracing configuration.
//!
//! Output is controlled by two environment variables:
//!
//! - `PLEA_LOG` (falling back to `RUST_LOG`): standard `EnvFilter`
//!   directives, e.g. `PLEA_LOG=debug` or
//!   `PLEA_LOG=plea_parser=trace,plea_cli=debug`
//! - `PLEA_LOG_FORMAT`: `text` (default) or `json`
//!
//! The subscriber is only installed when a filter variable is set, so
//! normal runs pay nothing.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let directives = std::env::var("PLEA_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_default();
    if directives.is_empty() {
        return;
    }

    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    let json = matches!(
        std::env::var("PLEA_LOG_FORMAT").as_deref(),
        Ok("json") | Ok("JSON")
    );

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
