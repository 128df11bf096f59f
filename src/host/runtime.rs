//! This module contains the `HostRuntime`, the command loop that receives
//! remote commands from the protocol handler and acts on them.
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::types::RemoteCommand;

use super::readiness::ReadinessGate;
use super::remote::{HostRequest, RemoteHandle};

/// One line of the host's stdout record.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct HostRecord<'a> {
    received_at: DateTime<Utc>,
    command: &'static str,
    target: &'a str,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

pub struct HostRuntime {
    receiver: mpsc::UnboundedReceiver<HostRequest>,
    ready: ReadinessGate,
}

impl HostRuntime {
    /// Creates the runtime and the handle used to talk to it.
    ///
    /// # Arguments
    ///
    /// * `ready` - Signalled once the command loop is running.
    pub fn channel(ready: ReadinessGate) -> (RemoteHandle, Self) {
        let (command_sender, receiver) = mpsc::unbounded_channel();
        (RemoteHandle { command_sender }, Self { receiver, ready })
    }

    /// Runs the command loop until every `RemoteHandle` has been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be serialized.
    pub async fn run(mut self) -> Result<()> {
        info!("Host command loop started");
        self.ready.signal();

        while let Some(request) = self.receiver.recv().await {
            self.handle_request(request).await?;
        }

        debug!("All remote handles dropped, host command loop finished");
        Ok(())
    }

    async fn handle_request(&mut self, request: HostRequest) -> Result<()> {
        let HostRequest { command, response } = request;
        let outcome = execute(&command).await;

        let record = HostRecord {
            received_at: Utc::now(),
            command: command.name(),
            target: target_of(&command),
            accepted: outcome.is_ok(),
            reason: outcome.as_ref().err().map(String::as_str),
        };
        println!("{}", serde_json::to_string(&record)?);

        match response {
            Some(tx) => {
                if tx.send(outcome).is_err() {
                    debug!("Caller of {} went away before the answer", command.name());
                }
            }
            None => {
                if let Err(reason) = outcome {
                    warn!("Notification {} failed: {}", command.name(), reason);
                }
            }
        }

        Ok(())
    }
}

/// Carries out a command on the host side.
async fn execute(command: &RemoteCommand) -> Result<(), String> {
    match command {
        RemoteCommand::LoadBot { path, .. } => match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(format!("{} is not a bot file", path)),
            Err(e) => Err(format!("cannot open {}: {}", path, e)),
        },
        RemoteCommand::NewLiveChat { endpoint } if endpoint.endpoint.is_empty() => {
            Err("live chat endpoint has no URL".to_string())
        }
        RemoteCommand::NewLiveChat { .. } | RemoteCommand::OpenTranscript { .. } => Ok(()),
    }
}

/// The non-sensitive part of a command worth recording.
fn target_of(command: &RemoteCommand) -> &str {
    match command {
        RemoteCommand::NewLiveChat { endpoint } => &endpoint.endpoint,
        RemoteCommand::OpenTranscript { filename, .. } => filename,
        RemoteCommand::LoadBot { path, .. } => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::remote::{RemoteCommands, RemoteError};
    use crate::types::EndpointService;

    fn spawn_runtime() -> (RemoteHandle, ReadinessGate, tokio::task::JoinHandle<Result<()>>) {
        let ready = ReadinessGate::new("host ready");
        let (handle, runtime) = HostRuntime::channel(ready.clone());
        (handle, ready, tokio::spawn(runtime.run()))
    }

    #[tokio::test]
    async fn signals_ready_once_running() {
        let (handle, ready, task) = spawn_runtime();
        ready.wait().await;
        assert!(ready.is_open());

        drop(handle);
        task.await.expect("runtime task").expect("runtime result");
    }

    #[tokio::test]
    async fn load_bot_accepts_existing_file() {
        let (handle, _ready, task) = spawn_runtime();
        let file = tempfile::NamedTempFile::new().expect("temp file");

        handle
            .call(RemoteCommand::LoadBot {
                path: file.path().display().to_string(),
                secret: None,
            })
            .await
            .expect("existing bot file should load");

        drop(handle);
        task.await.expect("runtime task").expect("runtime result");
    }

    #[tokio::test]
    async fn load_bot_rejects_missing_file() {
        let (handle, _ready, task) = spawn_runtime();
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.bot");

        let error = handle
            .call(RemoteCommand::LoadBot {
                path: missing.display().to_string(),
                secret: Some("s3cret".to_string()),
            })
            .await
            .expect_err("missing bot file should be rejected");
        assert!(matches!(
            error,
            RemoteError::Rejected {
                command: "bot:load",
                ..
            }
        ));

        drop(handle);
        task.await.expect("runtime task").expect("runtime result");
    }

    #[tokio::test]
    async fn closed_runtime_reports_channel_closed() {
        let ready = ReadinessGate::new("host ready");
        let (handle, runtime) = HostRuntime::channel(ready);
        drop(runtime);

        let mut endpoint = EndpointService::new();
        endpoint.endpoint = "http://localhost:3978/api/messages".to_string();
        assert_eq!(
            handle.notify(RemoteCommand::NewLiveChat { endpoint }),
            Err(RemoteError::ChannelClosed)
        );
    }
}
