//! JSON codec for the page config sidecar.
//!
//! On-disk layout:
//! ```text
//! {
//!     "pages": {
//!         "menu.html": {
//!             "active": true,
//!             "order": 1
//!         }
//!     }
//! }
//! ```
//! UTF-8, four-space indent, keys in sorted order, no trailing newline.  The
//! indent is cosmetic; any valid JSON with this shape decodes.  A missing or
//! `null` `pages` key decodes as an empty config, unknown keys are ignored.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::domain::config::PageConfig;

const INDENT: &[u8] = b"    ";

/// Errors that can occur while encoding or decoding the sidecar.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a valid page config document.
    #[error("malformed page config: {0}")]
    Decode(#[source] serde_json::Error),

    /// The config could not be serialized.
    #[error("failed to encode page config: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Serializes `config` into the sidecar layout.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_config(config: &PageConfig) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(64 + config.len() * 64);
    let mut ser =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    config.serialize(&mut ser).map_err(CodecError::Encode)?;
    Ok(out)
}

/// Parses sidecar bytes into a [`PageConfig`].
///
/// No repair is attempted: anything that does not parse is an error.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON, an empty input, or
/// fields of the wrong type.
pub fn decode_config(bytes: &[u8]) -> Result<PageConfig, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::PageStatus;

    #[test]
    fn test_encode_empty_config_has_pages_key() {
        let bytes = encode_config(&PageConfig::new()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n    \"pages\": {}\n}");
    }

    #[test]
    fn test_encode_uses_four_space_indent_and_field_order() {
        let mut cfg = PageConfig::new();
        cfg.pages.insert(
            "a.html".into(),
            PageStatus {
                active: true,
                order: 1,
            },
        );

        let text = String::from_utf8(encode_config(&cfg).unwrap()).unwrap();

        let expected = "{\n    \"pages\": {\n        \"a.html\": {\n            \"active\": true,\n            \"order\": 1\n        }\n    }\n}";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_encode_sorts_keys() {
        let mut cfg = PageConfig::new();
        for name in ["zeta.html", "alpha.html", "mid.html"] {
            cfg.pages.insert(name.into(), PageStatus::default());
        }

        let text = String::from_utf8(encode_config(&cfg).unwrap()).unwrap();

        let alpha = text.find("alpha.html").unwrap();
        let mid = text.find("mid.html").unwrap();
        let zeta = text.find("zeta.html").unwrap();
        assert!(alpha < mid && mid < zeta);
    }

    #[test]
    fn test_decode_compact_json() {
        let cfg = decode_config(br#"{"pages":{"b.html":{"active":false,"order":3}}}"#).unwrap();
        assert_eq!(
            cfg.get("b.html"),
            Some(&PageStatus {
                active: false,
                order: 3
            })
        );
    }

    #[test]
    fn test_decode_missing_or_null_pages_is_empty() {
        assert!(decode_config(b"{}").unwrap().is_empty());
        assert!(decode_config(br#"{"pages": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let cfg = decode_config(br#"{"pages":{},"version":2}"#).unwrap();
        assert!(cfg.is_empty());
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(matches!(decode_config(b""), Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_truncated_json() {
        let result = decode_config(br#"{"pages":{"a.html":{"active":tr"#);
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_wrong_field_type() {
        let result = decode_config(br#"{"pages":{"a.html":{"active":"yes","order":1}}}"#);
        assert!(result.is_err());
    }
}
