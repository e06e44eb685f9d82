//! Proxy envelope module
//!
//! Classifies upstream payloads from the raw Content-Type header and
//! shapes the single JSON value the proxy endpoint returns per fetch.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use serde_json::Value;

/// Maximum characters of raw text echoed back on a parse failure
const RAW_PREVIEW_CHARS: usize = 1000;

/// Binary payloads are always inlined under this MIME type, regardless of
/// the upstream subtype
const DATA_URI_PREFIX: &str = "data:video/mp4;base64,";

/// Payload classification, decided once per fetch and never revisited
/// mid-stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Binary,
    Textual,
}

impl PayloadKind {
    /// Classify from the raw Content-Type header value
    ///
    /// Case-sensitive substring match: anything containing `video` or
    /// `octet-stream` is binary, everything else (including a missing
    /// header) is textual.
    pub fn classify(content_type: &str) -> Self {
        if content_type.contains("video") || content_type.contains("octet-stream") {
            Self::Binary
        } else {
            Self::Textual
        }
    }
}

/// The single JSON value returned for a proxied fetch outcome
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Envelope {
    /// Binary payload inlined as a base64 data URI
    Video { video_url: String },
    /// Upstream JSON passed through verbatim
    Json(Value),
    /// Upstream body that failed to parse as JSON; still a 200 outcome
    InvalidJson {
        error: String,
        raw: String,
        #[serde(rename = "statusCode")]
        status_code: u16,
    },
}

impl Envelope {
    /// Encode a fully buffered binary payload as a data URI
    ///
    /// Must only be called once the upstream stream has completed; the
    /// payload is the concatenation of every received chunk.
    pub fn video(payload: &[u8]) -> Self {
        Self::Video {
            video_url: format!("{DATA_URI_PREFIX}{}", BASE64.encode(payload)),
        }
    }

    /// Interpret a textual payload
    ///
    /// Malformed JSON is downgraded to a diagnostic envelope carrying the
    /// first `RAW_PREVIEW_CHARS` characters and the upstream status; it is
    /// never an error.
    pub fn from_text(text: &str, upstream_status: u16) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::InvalidJson {
                error: "Invalid JSON response".to_string(),
                raw: text.chars().take(RAW_PREVIEW_CHARS).collect(),
                status_code: upstream_status,
            },
        }
    }

    pub const fn is_parse_failure(&self) -> bool {
        matches!(self, Self::InvalidJson { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_binary() {
        assert_eq!(PayloadKind::classify("video/mp4"), PayloadKind::Binary);
        assert_eq!(PayloadKind::classify("video/webm"), PayloadKind::Binary);
        assert_eq!(
            PayloadKind::classify("application/octet-stream"),
            PayloadKind::Binary
        );
        assert_eq!(
            PayloadKind::classify("binary/octet-stream; charset=binary"),
            PayloadKind::Binary
        );
    }

    #[test]
    fn test_classify_textual() {
        assert_eq!(
            PayloadKind::classify("application/json"),
            PayloadKind::Textual
        );
        assert_eq!(
            PayloadKind::classify("text/html; charset=utf-8"),
            PayloadKind::Textual
        );
        assert_eq!(PayloadKind::classify(""), PayloadKind::Textual);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        // The raw header value is matched as-is
        assert_eq!(PayloadKind::classify("VIDEO/MP4"), PayloadKind::Textual);
        assert_eq!(
            PayloadKind::classify("application/OCTET-STREAM"),
            PayloadKind::Textual
        );
    }

    #[test]
    fn test_video_round_trip() {
        let payload: Vec<u8> = (0u8..=255).cycle().take(1021).collect();
        let Envelope::Video { video_url } = Envelope::video(&payload) else {
            panic!("expected video envelope");
        };
        let encoded = video_url
            .strip_prefix("data:video/mp4;base64,")
            .expect("data URI prefix");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_video_mime_is_fixed() {
        let Envelope::Video { video_url } = Envelope::video(b"\x00\x01") else {
            panic!("expected video envelope");
        };
        // Upstream subtype never leaks into the data URI
        assert!(video_url.starts_with("data:video/mp4;base64,"));
    }

    #[test]
    fn test_json_passthrough_verbatim() {
        let body = r#"{"code":0,"data":{"play":"https://cdn.example/v.mp4","id":42}}"#;
        let envelope = Envelope::from_text(body, 200);
        assert_eq!(
            envelope,
            Envelope::Json(json!({
                "code": 0,
                "data": { "play": "https://cdn.example/v.mp4", "id": 42 }
            }))
        );
        // Serialized form equals the parsed upstream value, no renaming
        let serialized = serde_json::to_value(&envelope).unwrap();
        assert_eq!(serialized, serde_json::from_str::<Value>(body).unwrap());
    }

    #[test]
    fn test_parse_failure_shape() {
        let envelope = Envelope::from_text("<html>not json</html>", 502);
        assert!(envelope.is_parse_failure());
        let serialized = serde_json::to_value(&envelope).unwrap();
        assert_eq!(serialized["error"], "Invalid JSON response");
        assert_eq!(serialized["raw"], "<html>not json</html>");
        assert_eq!(serialized["statusCode"], 502);
    }

    #[test]
    fn test_parse_failure_truncates_raw() {
        let text = "x".repeat(5000);
        let Envelope::InvalidJson { raw, .. } = Envelope::from_text(&text, 200) else {
            panic!("expected parse failure");
        };
        assert_eq!(raw.len(), 1000);
    }

    #[test]
    fn test_truncation_counts_characters() {
        // Multibyte input: 1000 characters, not 1000 bytes
        let text = "é".repeat(2000);
        let Envelope::InvalidJson { raw, .. } = Envelope::from_text(&text, 200) else {
            panic!("expected parse failure");
        };
        assert_eq!(raw.chars().count(), 1000);
    }
}
