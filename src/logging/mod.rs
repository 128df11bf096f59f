//! This module contains the logging setup for the application.
//!
//! Everything is logged through `tracing`; output goes to stderr so that
//! the host record lines printed on stdout stay machine readable.
use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Configures the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the built-in filters.
pub fn configure_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,deeplink_handler=debug"
    } else {
        "warn,deeplink_handler=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Renders an error followed by each of its sources, separated by `: `.
pub fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, thiserror::Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn chain_includes_every_source() {
        assert_eq!(error_chain(&Outer(Inner)), "outer: inner");
    }

    #[test]
    fn chain_of_single_error_is_its_message() {
        assert_eq!(error_chain(&Inner), "inner");
    }
}
