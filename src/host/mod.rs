//! This module defines the collaborators the protocol handler talks to:
//! settings, readiness signals, the remote command channel, the active bot
//! store and the outbound HTTP client, plus the host runtime serving the
//! remote command channel.
pub mod encoding;
pub mod http;
pub mod readiness;
pub mod remote;
pub mod runtime;
pub mod settings;
pub mod store;

pub use encoding::decode_base64;
pub use http::{HttpError, HttpFetcher, HttpResponse, ReqwestFetcher};
pub use readiness::{ReadinessGate, ReadinessTimeout};
pub use remote::{RemoteCommands, RemoteError};
pub use runtime::HostRuntime;
pub use settings::{FrameworkSettings, Settings, SettingsProvider};
pub use store::{BotStore, InMemoryBotStore};
