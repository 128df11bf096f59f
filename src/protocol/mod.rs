//! This module implements the `bfemulator://` deep-link protocol: parsing a
//! URL into a `ProtocolCommand`, routing it by domain and action, and
//! running the matching action.
mod actions;
pub mod command;
pub mod context;
pub mod error;
pub mod handler;
pub mod parser;
pub mod routes;

pub use context::{HandlerConfig, HandlerContext, Sequencing};
pub use error::{ProtocolError, TranscriptError};
pub use handler::ProtocolHandler;
