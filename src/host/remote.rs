//! This module defines the remote command channel between the protocol
//! handler and the host application.
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::types::RemoteCommand;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("remote command channel is closed")]
    ChannelClosed,
    #[error("{command} was rejected by the host: {reason}")]
    Rejected {
        command: &'static str,
        reason: String,
    },
}

/// A request travelling to the host runtime.
///
/// Notifications carry no response sender; calls carry one.
#[derive(Debug)]
pub struct HostRequest {
    pub command: RemoteCommand,
    pub response: Option<oneshot::Sender<Result<(), String>>>,
}

/// The two call shapes the host exposes.
#[async_trait]
pub trait RemoteCommands: Send + Sync {
    /// Sends a command without waiting for the host to act on it.
    ///
    /// # Errors
    ///
    /// Fails only if the command could not be handed to the host.
    fn notify(&self, command: RemoteCommand) -> Result<(), RemoteError>;

    /// Sends a command and waits for the host's answer.
    ///
    /// # Errors
    ///
    /// Fails if the channel is closed or the host rejects the command.
    async fn call(&self, command: RemoteCommand) -> Result<(), RemoteError>;
}

/// A handle for sending commands to the `HostRuntime`.
#[derive(Clone)]
pub struct RemoteHandle {
    pub(super) command_sender: mpsc::UnboundedSender<HostRequest>,
}

#[async_trait]
impl RemoteCommands for RemoteHandle {
    fn notify(&self, command: RemoteCommand) -> Result<(), RemoteError> {
        self.command_sender
            .send(HostRequest {
                command,
                response: None,
            })
            .map_err(|_| RemoteError::ChannelClosed)
    }

    async fn call(&self, command: RemoteCommand) -> Result<(), RemoteError> {
        let name = command.name();
        let (tx, rx) = oneshot::channel();
        self.command_sender
            .send(HostRequest {
                command,
                response: Some(tx),
            })
            .map_err(|_| RemoteError::ChannelClosed)?;

        match rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(reason)) => Err(RemoteError::Rejected {
                command: name,
                reason,
            }),
            Err(_) => Err(RemoteError::ChannelClosed),
        }
    }
}
