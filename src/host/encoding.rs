use base64::engine::GeneralPurpose;
use base64::prelude::*;
use tracing::debug;

const ENGINES: [&GeneralPurpose; 4] = [
    &BASE64_STANDARD,
    &BASE64_STANDARD_NO_PAD,
    &BASE64_URL_SAFE,
    &BASE64_URL_SAFE_NO_PAD,
];

/// Decodes a base64 deep-link argument into text.
///
/// The standard alphabet is tried first, then the URL-safe one, each with
/// and without padding. Decoded bytes are converted lossily to UTF-8. A
/// value none of them accept is returned unchanged.
pub fn decode_base64(encoded: &str) -> String {
    let trimmed = encoded.trim();
    for engine in ENGINES {
        if let Ok(bytes) = engine.decode(trimmed) {
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }

    debug!("Argument is not valid base64, passing it through as-is");
    encoded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::prelude::*;

    #[test]
    fn decodes_standard_alphabet() {
        let encoded = BASE64_STANDARD.encode("http://localhost:3978/api/messages");
        assert_eq!(decode_base64(&encoded), "http://localhost:3978/api/messages");
    }

    #[test]
    fn decodes_url_safe_without_padding() {
        let encoded = BASE64_URL_SAFE_NO_PAD.encode("??>>");
        assert!(encoded.contains('_') || encoded.contains('-'));
        assert_eq!(decode_base64(&encoded), "??>>");
    }

    #[test]
    fn malformed_input_passes_through() {
        assert_eq!(decode_base64("not base64!"), "not base64!");
    }

    #[test]
    fn empty_input_decodes_to_empty() {
        assert_eq!(decode_base64(""), "");
    }
}
