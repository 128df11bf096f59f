use std::collections::HashMap;

/// A parsed deep link.
///
/// Built by the parser and consumed once by the dispatcher. Domain and
/// action are always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtocolCommand {
    domain: String,
    action: String,
    raw_args: String,
    args: HashMap<String, String>,
}

impl ProtocolCommand {
    pub(super) fn new(
        domain: &str,
        action: &str,
        raw_args: &str,
        args: HashMap<String, String>,
    ) -> Self {
        Self {
            domain: domain.to_lowercase(),
            action: action.to_lowercase(),
            raw_args: raw_args.to_string(),
            args,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// The query string exactly as it appeared in the URL.
    pub fn raw_args(&self) -> &str {
        &self.raw_args
    }

    pub fn args(&self) -> &HashMap<String, String> {
        &self.args
    }

    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }
}
