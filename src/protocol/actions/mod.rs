//! This module contains the actions deep links can trigger.
//!
//! Each action reads its arguments synchronously and then runs the rest of
//! its work on a spawned task, whose handle it returns.
mod bot;
mod livechat;
mod transcript;


use tokio::task::JoinHandle;

use crate::host::decode_base64;

use super::command::ProtocolCommand;
use super::context::HandlerContext;
use super::routes::Route;

pub(super) fn perform(
    route: Route,
    command: &ProtocolCommand,
    context: &HandlerContext,
) -> JoinHandle<()> {
    match route {
        Route::LiveChatOpen => livechat::open_live_chat(command, context),
        Route::TranscriptOpen => transcript::open_transcript(command, context),
        Route::BotOpen => bot::open_bot(command, context),
    }
}

/// Decodes a base64 argument, treating a missing one as empty.
fn decoded_arg(command: &ProtocolCommand, key: &str) -> String {
    command.arg(key).map(decode_base64).unwrap_or_default()
}
