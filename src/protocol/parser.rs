//! This module parses `bfemulator://` URLs into `ProtocolCommand`s.
use std::collections::HashMap;

use super::command::ProtocolCommand;
use super::error::ProtocolError;

/// The only scheme the handler accepts.
pub const PROTOCOL: &str = "bfemulator://";

/// Extracts the domain, action and arguments from a protocol URL.
///
/// Path separators are dropped before anything else is looked at, since the
/// OS inserts them when it normalizes the URL (`bfemulator://bot.open/?path=`).
/// Everything after the first `?` is the query string.
///
/// # Errors
///
/// Returns `ProtocolError::InvalidProtocol` if `url` does not start with
/// [`PROTOCOL`].
pub fn parse_protocol_url(url: &str) -> Result<ProtocolCommand, ProtocolError> {
    let rest = url
        .strip_prefix(PROTOCOL)
        .ok_or_else(|| ProtocolError::InvalidProtocol {
            url: url.to_string(),
        })?;
    let rest: String = rest.chars().filter(|c| *c != '/').collect();

    let (head, raw_args) = rest.split_once('?').unwrap_or((rest.as_str(), ""));

    let mut names = head.split('.');
    let domain = names.next().unwrap_or_default();
    let action = names.next().unwrap_or_default();

    Ok(ProtocolCommand::new(
        domain,
        action,
        raw_args,
        parse_query(raw_args),
    ))
}

/// Parses a flat `key=value&key=value` query string.
///
/// Keys and values are percent-decoded. A `+` stays a `+`, so base64 values
/// survive without escaping. Repeated keys keep the last value. Pairs with
/// an empty key are skipped.
fn parse_query(query: &str) -> HashMap<String, String> {
    let mut args = HashMap::new();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key);
        if key.is_empty() {
            continue;
        }
        args.insert(key, decode_component(value));
    }

    args
}

fn decode_component(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_domain_action_and_args() {
        let command = parse_protocol_url("bfemulator://Bot.OPEN?path=abc&secret=xyz")
            .expect("valid url");
        assert_eq!(command.domain(), "bot");
        assert_eq!(command.action(), "open");
        assert_eq!(command.raw_args(), "path=abc&secret=xyz");
        assert_eq!(command.arg("path"), Some("abc"));
        assert_eq!(command.arg("secret"), Some("xyz"));
        assert_eq!(command.args().len(), 2);
    }

    #[test]
    fn rejects_other_schemes() {
        for url in [
            "http://bot.open?path=abc",
            "bfemulator:/bot.open",
            "BFEMULATOR://bot.open",
            "",
            " bfemulator://bot.open",
        ] {
            assert_eq!(
                parse_protocol_url(url),
                Err(ProtocolError::InvalidProtocol {
                    url: url.to_string()
                }),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn missing_query_yields_empty_args() {
        let command = parse_protocol_url("bfemulator://bot.open").expect("valid url");
        assert_eq!(command.domain(), "bot");
        assert_eq!(command.action(), "open");
        assert_eq!(command.raw_args(), "");
        assert!(command.args().is_empty());
    }

    #[test]
    fn strips_path_separators() {
        let command = parse_protocol_url("bfemulator://livechat.open/?botUrl=aHR0cA%3D%3D")
            .expect("valid url");
        assert_eq!(command.domain(), "livechat");
        assert_eq!(command.action(), "open");
        assert_eq!(command.arg("botUrl"), Some("aHR0cA=="));
    }

    #[test]
    fn missing_action_is_empty() {
        let command = parse_protocol_url("bfemulator://transcript").expect("valid url");
        assert_eq!(command.domain(), "transcript");
        assert_eq!(command.action(), "");

        let command = parse_protocol_url("bfemulator://").expect("valid url");
        assert_eq!(command.domain(), "");
        assert_eq!(command.action(), "");
    }

    #[test]
    fn repeated_keys_keep_last_value() {
        let command = parse_protocol_url("bfemulator://bot.open?path=first&path=second")
            .expect("valid url");
        assert_eq!(command.arg("path"), Some("second"));
    }

    #[test]
    fn plus_signs_are_preserved() {
        let command =
            parse_protocol_url("bfemulator://bot.open?path=ab+c/d==").expect("valid url");
        assert_eq!(command.arg("path"), Some("ab+cd=="));
    }

    #[test]
    fn keys_without_values_are_empty() {
        let command =
            parse_protocol_url("bfemulator://bot.open?flag&=orphan&&x=1").expect("valid url");
        assert_eq!(command.arg("flag"), Some(""));
        assert_eq!(command.arg("x"), Some("1"));
        assert_eq!(command.args().len(), 2);
    }

    #[test]
    fn only_first_question_mark_splits() {
        let command = parse_protocol_url("bfemulator://transcript.open?url=a?b").expect("valid url");
        assert_eq!(command.raw_args(), "url=a?b");
        assert_eq!(command.arg("url"), Some("a?b"));
    }
}
