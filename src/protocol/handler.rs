//! This module defines the `ProtocolHandler`, the entry point for deep links.
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::actions;
use super::command::ProtocolCommand;
use super::context::HandlerContext;
use super::error::ProtocolError;
use super::parser::parse_protocol_url;
use super::routes::Route;

/// Parses deep links and carries out the matching actions.
pub struct ProtocolHandler {
    context: HandlerContext,
}

impl ProtocolHandler {
    pub fn new(context: HandlerContext) -> Self {
        Self { context }
    }

    /// Routes a parsed command to its action.
    ///
    /// Links whose domain or action is unknown are ignored. Known links start
    /// their action and return its background task without waiting for it.
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, command: ProtocolCommand) -> Option<JoinHandle<()>> {
        let Some(route) = Route::resolve(command.domain(), command.action()) else {
            debug!(
                "Ignoring deep link with unknown route '{}.{}'",
                command.domain(),
                command.action()
            );
            return None;
        };

        info!("Dispatching deep link to {}", route.name());
        let mut keys: Vec<&str> = command.args().keys().map(String::as_str).collect();
        keys.sort_unstable();
        debug!(
            "Deep link query is {} bytes with arguments {:?}",
            command.raw_args().len(),
            keys
        );
        Some(actions::perform(route, &command, &self.context))
    }

    /// Parses a protocol URL and dispatches it.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidProtocol` if the URL does not use the
    /// protocol scheme. Nothing is dispatched in that case.
    pub fn parse_and_dispatch(&self, url: &str) -> Result<Option<JoinHandle<()>>, ProtocolError> {
        let command = parse_protocol_url(url)?;
        Ok(self.dispatch(command))
    }
}
