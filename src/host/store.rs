//! This module defines the shared store holding the active bot.
use std::sync::RwLock;

use crate::types::BotConfig;

/// Shared application state the protocol handler mutates.
pub trait BotStore: Send + Sync {
    /// Installs `bot` as the active bot, replacing whatever was active.
    fn set_active_bot(&self, bot: BotConfig);

    /// Returns the active bot, if any.
    fn active_bot(&self) -> Option<BotConfig>;
}

/// A `BotStore` kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryBotStore {
    active: RwLock<Option<BotConfig>>,
}

impl InMemoryBotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BotStore for InMemoryBotStore {
    fn set_active_bot(&self, bot: BotConfig) {
        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        *active = Some(bot);
    }

    fn active_bot(&self) -> Option<BotConfig> {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
