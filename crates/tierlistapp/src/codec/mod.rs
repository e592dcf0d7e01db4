//! # Share Codec
//!
//! Both modes' assignments plus the active mode travel as a short URL-safe
//! token:
//!
//! ```text
//! SharePayload JSON  ->  compress  ->  base64url (no padding)
//! {"m":"items","i":{"S":["E2","E1"]}}
//! ```
//!
//! The payload omits empty tiers, and omits a mode entirely when all of its
//! tiers are empty. Decoding reverses every step; a failure at any step is a
//! [`TierError::Decode`] and nothing is applied. Inside a well-formed payload
//! shapes are coerced: a missing or unknown `m` means items, a tier that is
//! not a list of ids is empty, unknown keys are ignored.
//!
//! Decoded state is not sanitized here. Callers run
//! [`AssignmentStore::sanitize`] against their catalog before using it.

use crate::error::{Result, TierError};
use crate::model::{Assignment, CategoryMode, PrunedTiers};
use crate::store::AssignmentStore;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use serde_json::Value;

pub mod compress;

pub use compress::{Compressor, GzipCompressor, NoopCompressor};

/// Fragment parameter carrying the token: `#s=<token>`.
pub const SHARE_KEY: &str = "s";

#[derive(Serialize)]
struct SharePayload<'a> {
    m: CategoryMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    i: Option<PrunedTiers<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    p: Option<PrunedTiers<'a>>,
}

impl<'a> SharePayload<'a> {
    fn new(store: &'a AssignmentStore, mode: CategoryMode) -> Self {
        let part = |m: CategoryMode| {
            let a = store.get(m);
            (!a.is_empty()).then(|| a.pruned())
        };
        Self {
            m: mode,
            i: part(CategoryMode::Items),
            p: part(CategoryMode::Powers),
        }
    }
}

/// State recovered from a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub mode: CategoryMode,
    pub store: AssignmentStore,
}

#[derive(Debug, Clone, Default)]
pub struct Codec<C: Compressor> {
    compressor: C,
}

impl<C: Compressor> Codec<C> {
    pub fn new(compressor: C) -> Self {
        Self { compressor }
    }

    pub fn encode(&self, store: &AssignmentStore, mode: CategoryMode) -> Result<String> {
        let json = serde_json::to_string(&SharePayload::new(store, mode))?;
        let packed = self.compressor.compress(json.as_bytes())?;
        Ok(URL_SAFE_NO_PAD.encode(packed))
    }

    pub fn decode(&self, token: &str) -> Result<Decoded> {
        let packed = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| TierError::Decode(format!("invalid share token: {}", e)))?;
        let bytes = self.compressor.decompress(&packed)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| TierError::Decode(format!("share payload is not UTF-8: {}", e)))?;
        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| TierError::Decode(format!("malformed share payload: {}", e)))?;
        if !payload.is_object() {
            return Err(TierError::Decode("share payload is not an object".to_string()));
        }

        let mode = payload
            .get("m")
            .and_then(Value::as_str)
            .and_then(|m| m.parse().ok())
            .unwrap_or_default();
        let part = |key: &str| payload.get(key).map(Assignment::from_value).unwrap_or_default();
        Ok(Decoded {
            mode,
            store: AssignmentStore::from_parts(part("i"), part("p")),
        })
    }
}

fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Finds the share token in a URL or bare fragment.
///
/// The key must follow `#`, `&` or `?`; the token is the longest run of
/// base64url characters after `s=`.
pub fn extract_token(url: &str) -> Option<&str> {
    let bytes = url.as_bytes();
    let key = SHARE_KEY.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if !matches!(b, b'#' | b'&' | b'?') {
            continue;
        }
        let rest = &bytes[i + 1..];
        if !(rest.starts_with(key) && rest.get(key.len()) == Some(&b'=')) {
            continue;
        }
        let start = i + 1 + key.len() + 1;
        let len = bytes[start..].iter().take_while(|b| is_token_char(**b)).count();
        if len > 0 {
            return Some(&url[start..start + len]);
        }
    }
    None
}

/// `base` with its fragment replaced by `#s=<token>`.
pub fn share_url(base: &str, token: &str) -> String {
    let without_fragment = base.split('#').next().unwrap_or(base);
    format!("{}#{}={}", without_fragment, SHARE_KEY, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tier;
    use std::collections::HashSet;

    fn gzip() -> Codec<GzipCompressor> {
        Codec::new(GzipCompressor)
    }

    fn token_for(json: &str) -> String {
        let packed = GzipCompressor.compress(json.as_bytes()).unwrap();
        URL_SAFE_NO_PAD.encode(packed)
    }

    fn sample_store() -> AssignmentStore {
        AssignmentStore::from_parts(
            Assignment::new()
                .with_tier(Tier::S, ["E2", "E1"])
                .with_tier(Tier::D, ["E3"]),
            Assignment::new().with_tier(Tier::B, ["P1", "P2"]),
        )
    }

    #[test]
    fn test_round_trip_with_gzip() {
        let codec = gzip();
        let store = sample_store();
        let token = codec.encode(&store, CategoryMode::Powers).unwrap();
        assert!(token.bytes().all(is_token_char));

        let decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded.mode, CategoryMode::Powers);
        assert_eq!(decoded.store, store);
    }

    #[test]
    fn test_round_trip_without_compression() {
        let codec = Codec::new(NoopCompressor);
        let store = sample_store();
        let token = codec.encode(&store, CategoryMode::Items).unwrap();
        let raw = URL_SAFE_NO_PAD.decode(&token).unwrap();
        assert_eq!(
            String::from_utf8(raw).unwrap(),
            r#"{"m":"items","i":{"S":["E2","E1"],"D":["E3"]},"p":{"B":["P1","P2"]}}"#
        );
        assert_eq!(codec.decode(&token).unwrap().store, store);
    }

    #[test]
    fn test_empty_modes_are_omitted() {
        let codec = Codec::new(NoopCompressor);
        let token = codec.encode(&AssignmentStore::new(), CategoryMode::Items).unwrap();
        let raw = URL_SAFE_NO_PAD.decode(&token).unwrap();
        assert_eq!(raw, br#"{"m":"items"}"#);
    }

    #[test]
    fn test_corrupted_token_is_decode_error() {
        let codec = gzip();
        let token = codec.encode(&sample_store(), CategoryMode::Items).unwrap();

        for bad in [
            &token[..token.len() / 2],
            "!!not*base64!!",
            "AAAA",
            "",
        ] {
            let err = codec.decode(bad).unwrap_err();
            assert!(matches!(err, TierError::Decode(_)), "{:?} -> {:?}", bad, err);
        }
    }

    #[test]
    fn test_non_object_payload_is_decode_error() {
        let err = gzip().decode(&token_for("[1,2,3]")).unwrap_err();
        assert!(matches!(err, TierError::Decode(_)));
    }

    #[test]
    fn test_shape_coercion() {
        let token = token_for(r#"{"i":{"S":"oops","A":["x"]},"p":42,"extra":true}"#);
        let decoded = gzip().decode(&token).unwrap();
        assert_eq!(decoded.mode, CategoryMode::Items);
        let items = decoded.store.get(CategoryMode::Items);
        assert!(items.tier(Tier::S).is_empty());
        assert_eq!(items.tier(Tier::A), ["x"]);
        assert!(decoded.store.get(CategoryMode::Powers).is_empty());
    }

    #[test]
    fn test_place_encode_decode_sanitize_scenario() {
        let mut store = AssignmentStore::new();
        store
            .replace(CategoryMode::Items, Tier::S, vec!["E1".into()])
            .unwrap();
        store
            .replace(CategoryMode::Items, Tier::S, vec!["E2".into(), "E1".into()])
            .unwrap();

        let codec = gzip();
        let token = codec.encode(&store, CategoryMode::Items).unwrap();
        let mut decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded.store, store);

        let catalog: HashSet<String> = ["E1".to_string()].into_iter().collect();
        decoded.store.sanitize(CategoryMode::Items, &catalog);
        assert_eq!(decoded.store.get(CategoryMode::Items).tier(Tier::S), ["E1"]);
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token("https://x.test/#s=abc_-9"), Some("abc_-9"));
        assert_eq!(extract_token("#s=abc"), Some("abc"));
        assert_eq!(extract_token("https://x.test/?q=1&s=tok#frag"), Some("tok"));
        assert_eq!(extract_token("https://x.test/#foo=1&s=tok.rest"), Some("tok"));
        assert_eq!(extract_token("https://x.test/#xs=abc"), None);
        assert_eq!(extract_token("https://x.test/#s="), None);
        assert_eq!(extract_token("s=abc"), None);
    }

    #[test]
    fn test_share_url_replaces_fragment() {
        assert_eq!(
            share_url("https://x.test/list?v=2#old", "tok"),
            "https://x.test/list?v=2#s=tok"
        );
        assert_eq!(share_url("https://x.test/", "tok"), "https://x.test/#s=tok");
    }
}
