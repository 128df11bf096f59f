use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::logging::error_chain;
use crate::types::{BotConfig, EndpointService, RemoteCommand};

use super::super::command::ProtocolCommand;
use super::super::context::HandlerContext;
use super::decoded_arg;

/// Installs a throwaway bot built from the link's endpoint details and
/// starts a live chat with it.
///
/// The bot becomes the active bot right away. The `livechat:new` command
/// waits for the tunnel or host start-up, see `HandlerContext::deferral`.
/// Arguments: `botUrl`, `msaAppId` and `msaPassword`, all base64.
pub(super) fn open_live_chat(command: &ProtocolCommand, context: &HandlerContext) -> JoinHandle<()> {
    let endpoint = EndpointService {
        endpoint: decoded_arg(command, "botUrl"),
        app_id: decoded_arg(command, "msaAppId"),
        app_password: decoded_arg(command, "msaPassword"),
        ..EndpointService::new()
    };

    let bot = BotConfig {
        services: vec![endpoint.clone()],
        ..BotConfig::default()
    };
    context.store().set_active_bot(bot);

    let deferral = context.deferral();
    let context = context.clone();
    tokio::spawn(async move {
        if let Err(e) = deferral.elapse(context.readiness_timeout()).await {
            warn!("Live chat with {} abandoned: {}", endpoint.endpoint, e);
            return;
        }

        let url = endpoint.endpoint.clone();
        match context.remote().notify(RemoteCommand::NewLiveChat { endpoint }) {
            Ok(()) => info!("Requested live chat with {}", url),
            Err(e) => error!("Could not start live chat with {}: {}", url, error_chain(&e)),
        }
    })
}
