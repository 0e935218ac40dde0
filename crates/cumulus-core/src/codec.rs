//! Cache entry codec.
//!
//! Entries are stored as field-tagged JSON so operators can inspect objects
//! in the bucket directly. Absent expiration fields are omitted from the
//! payload, and a decoder treats missing fields as "not set".

use crate::entry::CacheEntry;
use crate::error::{Error, Result};

/// Content type declared on stored objects.
pub const CONTENT_TYPE: &str = "application/json";

/// Serialize an entry to the object body.
pub fn serialize(entry: &CacheEntry) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(entry)?)
}

/// Deserialize an object body back into an entry.
pub fn deserialize(bytes: &[u8]) -> Result<CacheEntry> {
    serde_json::from_slice(bytes).map_err(|e| Error::Format(e.to_string()))
}

/// Serde helper encoding the opaque payload as a base64 string, keeping the
/// stored JSON readable instead of a byte-array dump.
pub mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryOptions;
    use chrono::{Duration as ChronoDuration, Utc};
    use std::time::Duration;

    #[test]
    fn test_roundtrip_with_both_expirations() {
        let now = Utc::now();
        let options = EntryOptions {
            absolute_expiration: Some(now + ChronoDuration::minutes(10)),
            sliding_expiration: Some(Duration::from_secs(30)),
        };
        let entry = CacheEntry::new(b"hello world".to_vec(), &options, now);

        let bytes = serialize(&entry).expect("serialize");
        let parsed = deserialize(&bytes).expect("deserialize");

        assert_eq!(entry, parsed);
    }

    #[test]
    fn test_roundtrip_without_expirations() {
        let entry = CacheEntry::new(vec![], &EntryOptions::none(), Utc::now());

        let bytes = serialize(&entry).expect("serialize");
        let parsed = deserialize(&bytes).expect("deserialize");

        assert_eq!(entry, parsed);
        assert!(parsed.absolute_expiration.is_none());
        assert!(parsed.sliding_expiration.is_none());
    }

    #[test]
    fn test_absent_fields_are_omitted_from_payload() {
        let entry = CacheEntry::new(b"v".to_vec(), &EntryOptions::none(), Utc::now());
        let json = String::from_utf8(serialize(&entry).unwrap()).unwrap();

        assert!(!json.contains("absolute_expiration"));
        assert!(!json.contains("sliding_expiration"));
    }

    #[test]
    fn test_missing_fields_decode_as_not_set() {
        let json = br#"{"value":"aGk=","created_at":"2026-01-01T00:00:00Z"}"#;
        let entry = deserialize(json).expect("deserialize");

        assert_eq!(entry.value, b"hi");
        assert!(entry.absolute_expiration.is_none());
        assert!(entry.sliding_expiration.is_none());
    }

    #[test]
    fn test_garbage_fails_with_format_error() {
        let err = deserialize(b"not json at all").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_value_is_stored_as_base64_text() {
        let entry = CacheEntry::new(b"hi".to_vec(), &EntryOptions::none(), Utc::now());
        let json = String::from_utf8(serialize(&entry).unwrap()).unwrap();
        assert!(json.contains("\"aGk=\""));
    }
}
