//! This module handles the initial setup of the application.
use super::args::AppArgs;
use crate::host::{HostRuntime, InMemoryBotStore, ReadinessGate, ReqwestFetcher, Settings};
use crate::logging::configure_logging;
use crate::protocol::{HandlerConfig, HandlerContext, ProtocolHandler, Sequencing};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Contains all the components needed to handle the deep links.
pub struct PreparedApp {
    /// The command-line arguments.
    pub args: AppArgs,
    /// The protocol handler, wired to the host runtime.
    pub handler: ProtocolHandler,
    /// The host command loop, not yet running.
    pub runtime: HostRuntime,
    /// The store holding the active bot.
    pub store: Arc<InMemoryBotStore>,
}

/// Prepares the application for running.
///
/// This function performs the following steps:
/// 1. Configures logging.
/// 2. Loads the settings file and applies command-line overrides.
/// 3. Creates the readiness gates and the host command channel.
/// 4. Builds the HTTP client.
/// 5. Assembles the protocol handler.
///
/// # Errors
///
/// This function will return an error if the settings cannot be loaded or
/// the HTTP client cannot be built.
pub fn prepare(args: AppArgs) -> Result<PreparedApp> {
    configure_logging(args.verbose);

    let settings_path = args.config.as_deref().unwrap_or(DEFAULT_SETTINGS_PATH);
    let mut settings = Settings::load_or_default(settings_path)?;
    if let Some(tunnel_path) = &args.tunnel_path {
        settings.framework.tunnel_path = Some(tunnel_path.clone());
    }
    info!(
        "Settings loaded from {} (tunnel configured: {})",
        settings_path,
        settings.framework.tunnel_configured()
    );

    let tunnel = ReadinessGate::new("tunnel connected");
    if args.tunnel_connected {
        tunnel.signal();
    }

    let host_ready = ReadinessGate::new("host ready");
    let (remote, runtime) = HostRuntime::channel(host_ready.clone());

    let config = handler_config(&args, host_ready);
    let store = Arc::new(InMemoryBotStore::new());
    let http = ReqwestFetcher::new()?;

    let context = HandlerContext::new(
        Arc::new(settings),
        Arc::new(remote),
        store.clone(),
        Arc::new(http),
        tunnel,
        config,
    );

    Ok(PreparedApp {
        args,
        handler: ProtocolHandler::new(context),
        runtime,
        store,
    })
}

/// Builds the handler configuration from the command-line arguments.
fn handler_config(args: &AppArgs, host_ready: ReadinessGate) -> HandlerConfig {
    let sequencing = if args.use_timer {
        Sequencing::Delay(Duration::from_millis(args.startup_delay_ms))
    } else {
        Sequencing::HostReady(host_ready)
    };
    let readiness_timeout =
        (args.readiness_timeout_secs > 0).then(|| Duration::from_secs(args.readiness_timeout_secs));

    HandlerConfig {
        sequencing,
        readiness_timeout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> AppArgs {
        let mut argv = vec!["deeplink-handler"];
        argv.extend_from_slice(extra);
        argv.push("bfemulator://bot.open");
        AppArgs::try_parse_from(argv).expect("valid args")
    }

    #[test]
    fn host_ready_sequencing_by_default() {
        let config = handler_config(&args(&[]), ReadinessGate::new("host ready"));
        assert!(matches!(config.sequencing, Sequencing::HostReady(_)));
        assert_eq!(config.readiness_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn timer_sequencing_on_request() {
        let config = handler_config(
            &args(&["--use-timer", "--startup-delay-ms", "250"]),
            ReadinessGate::new("host ready"),
        );
        match config.sequencing {
            Sequencing::Delay(delay) => assert_eq!(delay, Duration::from_millis(250)),
            other => panic!("expected a delay, got {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_waits_forever() {
        let config = handler_config(
            &args(&["--readiness-timeout-secs", "0"]),
            ReadinessGate::new("host ready"),
        );
        assert_eq!(config.readiness_timeout, None);
    }
}
