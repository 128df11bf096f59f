//! This module defines the `HandlerContext`, which gives protocol actions
//! access to the host collaborators, and the deferral rules for actions
//! that must not run before the host is ready.
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::host::{
    BotStore, HttpFetcher, ReadinessGate, ReadinessTimeout, RemoteCommands, SettingsProvider,
};

/// Delay used when nothing better than a timer is available.
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_millis(1000);

/// Default upper bound on waiting for a readiness signal.
pub const DEFAULT_READINESS_TIMEOUT: Duration = Duration::from_secs(120);

/// How deferred actions are sequenced behind host start-up when no tunnel
/// is configured.
#[derive(Clone, Debug)]
pub enum Sequencing {
    /// Wait a fixed delay.
    Delay(Duration),
    /// Wait for the host to signal that it is ready.
    HostReady(ReadinessGate),
}

#[derive(Clone, Debug)]
pub struct HandlerConfig {
    pub sequencing: Sequencing,
    /// Upper bound on waiting for a readiness gate. `None` waits forever.
    pub readiness_timeout: Option<Duration>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            sequencing: Sequencing::Delay(DEFAULT_STARTUP_DELAY),
            readiness_timeout: Some(DEFAULT_READINESS_TIMEOUT),
        }
    }
}

/// What a deferred action waits on before running. Chosen when the action is
/// dispatched, from the settings at that moment.
#[derive(Clone, Debug)]
pub enum Deferral {
    Tunnel(ReadinessGate),
    HostReady(ReadinessGate),
    Delay(Duration),
}

impl Deferral {
    /// Waits until the deferred action may run.
    ///
    /// # Errors
    ///
    /// Returns a `ReadinessTimeout` if a gate stays closed past `limit`.
    pub async fn elapse(&self, limit: Option<Duration>) -> Result<(), ReadinessTimeout> {
        match self {
            Deferral::Tunnel(gate) | Deferral::HostReady(gate) => gate.wait_for(limit).await,
            Deferral::Delay(delay) => {
                sleep(*delay).await;
                Ok(())
            }
        }
    }
}

/// Provides the collaborators to protocol actions.
#[derive(Clone)]
pub struct HandlerContext {
    settings: Arc<dyn SettingsProvider>,
    remote: Arc<dyn RemoteCommands>,
    store: Arc<dyn BotStore>,
    http: Arc<dyn HttpFetcher>,
    tunnel: ReadinessGate,
    config: HandlerConfig,
}

impl HandlerContext {
    /// Creates a new `HandlerContext`.
    ///
    /// # Arguments
    ///
    /// * `settings` - Source of the framework settings.
    /// * `remote` - Channel for commands to the host application.
    /// * `store` - Store holding the active bot.
    /// * `http` - Client used to download transcripts.
    /// * `tunnel` - Gate opened when the tunnel reports it is connected.
    /// * `config` - Sequencing and timeout configuration.
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        remote: Arc<dyn RemoteCommands>,
        store: Arc<dyn BotStore>,
        http: Arc<dyn HttpFetcher>,
        tunnel: ReadinessGate,
        config: HandlerConfig,
    ) -> Self {
        Self {
            settings,
            remote,
            store,
            http,
            tunnel,
            config,
        }
    }

    pub fn remote(&self) -> &dyn RemoteCommands {
        self.remote.as_ref()
    }

    pub fn store(&self) -> &dyn BotStore {
        self.store.as_ref()
    }

    pub fn http(&self) -> &dyn HttpFetcher {
        self.http.as_ref()
    }

    pub fn readiness_timeout(&self) -> Option<Duration> {
        self.config.readiness_timeout
    }

    /// Picks what a gated action waits on.
    ///
    /// With a tunnel configured the action waits for the tunnel to connect;
    /// otherwise it follows the configured start-up sequencing.
    pub fn deferral(&self) -> Deferral {
        if self.settings.framework().tunnel_configured() {
            debug!("Tunnel configured, deferring until it connects");
            return Deferral::Tunnel(self.tunnel.clone());
        }

        match &self.config.sequencing {
            Sequencing::Delay(delay) => Deferral::Delay(*delay),
            Sequencing::HostReady(gate) => Deferral::HostReady(gate.clone()),
        }
    }
}
