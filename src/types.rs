use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A transport endpoint the emulator can talk to a bot through.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointService {
    #[serde(rename = "type")]
    pub service_type: String,
    pub id: String,
    pub name: String,
    pub endpoint: String,
    pub app_id: String,
    pub app_password: String,
}

impl EndpointService {
    pub fn new() -> Self {
        Self {
            service_type: "endpoint".to_string(),
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            endpoint: String::new(),
            app_id: String::new(),
            app_password: String::new(),
        }
    }
}

impl Default for EndpointService {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    pub name: String,
    pub description: String,
    pub secret_key: String,
    pub services: Vec<EndpointService>,
}

/// File name the client shows for transcripts that arrive through a deep link.
pub const DEEP_LINKED_TRANSCRIPT: &str = "deepLinkedTranscript";

/// Commands sent from the protocol handler to the host application.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "command", content = "args")]
pub enum RemoteCommand {
    #[serde(rename = "livechat:new")]
    NewLiveChat { endpoint: EndpointService },
    #[serde(rename = "transcript:open")]
    OpenTranscript {
        filename: String,
        activities: Vec<serde_json::Value>,
        #[serde(rename = "deepLink")]
        deep_link: bool,
    },
    #[serde(rename = "bot:load")]
    LoadBot {
        path: String,
        secret: Option<String>,
    },
}

impl RemoteCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RemoteCommand::NewLiveChat { .. } => "livechat:new",
            RemoteCommand::OpenTranscript { .. } => "transcript:open",
            RemoteCommand::LoadBot { .. } => "bot:load",
        }
    }
}
