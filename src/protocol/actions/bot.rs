use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::host::{decode_base64, RemoteCommands};
use crate::logging::error_chain;
use crate::types::RemoteCommand;

use super::super::command::ProtocolCommand;
use super::super::context::HandlerContext;
use super::super::error::BotLoadError;
use super::decoded_arg;

/// Opens the bot project at the link's `path` argument.
///
/// `path` is base64. `secret` is optional and base64; when it is missing or
/// empty the bot is loaded without one. Loading waits like live chat does.
pub(super) fn open_bot(command: &ProtocolCommand, context: &HandlerContext) -> JoinHandle<()> {
    let path = decoded_arg(command, "path");
    let secret = command
        .arg("secret")
        .filter(|secret| !secret.is_empty())
        .map(decode_base64);

    let deferral = context.deferral();
    let context = context.clone();
    tokio::spawn(async move {
        if let Err(e) = deferral.elapse(context.readiness_timeout()).await {
            warn!("Opening bot at {} abandoned: {}", path, e);
            return;
        }

        match load_bot(&path, secret, context.remote()).await {
            Ok(()) => info!("Opened bot successfully"),
            Err(e) => error!("{}", error_chain(&e)),
        }
    })
}

pub(super) async fn load_bot(
    path: &str,
    secret: Option<String>,
    remote: &dyn RemoteCommands,
) -> Result<(), BotLoadError> {
    remote
        .call(RemoteCommand::LoadBot {
            path: path.to_string(),
            secret,
        })
        .await
        .map_err(|source| BotLoadError {
            path: path.to_string(),
            source,
        })
}
