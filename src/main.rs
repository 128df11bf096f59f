//! The main entry point for the deep-link protocol handler.
mod app;
mod host;
mod logging;
mod protocol;
mod types;

use anyhow::Result;

/// The main function of the application.
///
/// Parses the deep-link URLs handed over by the operating system and
/// dispatches each of them to the matching protocol action.
///
/// # Errors
///
/// Returns an error if setup fails or if any of the URLs is not a valid
/// protocol URL.
#[tokio::main]
async fn main() -> Result<()> {
    app::launch().await
}
