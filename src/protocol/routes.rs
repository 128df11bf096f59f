//! This module holds the routing table mapping a domain and an action to
//! the action the handler runs.
//!
//! The table is closed: adding a route means adding a variant here. Lookups
//! that miss return `None` and the dispatcher ignores the link.

/// Top-level routing key of a deep link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    LiveChat,
    Transcript,
    Bot,
}

impl Domain {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "livechat" => Some(Domain::LiveChat),
            "transcript" => Some(Domain::Transcript),
            "bot" => Some(Domain::Bot),
            _ => None,
        }
    }

    /// Resolves an action within this domain.
    pub fn route(self, action: &str) -> Option<Route> {
        match (self, action) {
            (Domain::LiveChat, "open") => Some(Route::LiveChatOpen),
            (Domain::Transcript, "open") => Some(Route::TranscriptOpen),
            (Domain::Bot, "open") => Some(Route::BotOpen),
            _ => None,
        }
    }
}

/// A fully resolved domain and action pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    LiveChatOpen,
    TranscriptOpen,
    BotOpen,
}

impl Route {
    /// Looks up the route for a domain and action. Both are expected in
    /// lowercase.
    pub fn resolve(domain: &str, action: &str) -> Option<Self> {
        Domain::from_name(domain)?.route(action)
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::LiveChatOpen => "livechat.open",
            Route::TranscriptOpen => "transcript.open",
            Route::BotOpen => "bot.open",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_routes() {
        assert_eq!(Route::resolve("livechat", "open"), Some(Route::LiveChatOpen));
        assert_eq!(Route::resolve("transcript", "open"), Some(Route::TranscriptOpen));
        assert_eq!(Route::resolve("bot", "open"), Some(Route::BotOpen));
    }

    #[test]
    fn unknown_domain_or_action_misses() {
        assert_eq!(Route::resolve("foo", "open"), None);
        assert_eq!(Route::resolve("bot", "close"), None);
        assert_eq!(Route::resolve("", ""), None);
        assert_eq!(Route::resolve("bot", ""), None);
    }

    #[test]
    fn route_names_round_trip_through_resolve() {
        for route in [Route::LiveChatOpen, Route::TranscriptOpen, Route::BotOpen] {
            let (domain, action) = route.name().split_once('.').expect("dotted name");
            assert_eq!(Route::resolve(domain, action), Some(route));
        }
    }
}
