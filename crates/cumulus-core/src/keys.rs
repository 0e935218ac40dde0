//! Cache key encoding.

use base64::{Engine, engine::general_purpose::URL_SAFE};

/// Map an arbitrary cache key to an object-store-safe name.
///
/// URL-safe base64 over the key's UTF-8 bytes, with the `=` padding swapped
/// for `.` since some stores reject `=` in path-like object names. The
/// mapping is deterministic and injective; it is never decoded.
pub fn encode_key(key: &str) -> String {
    URL_SAFE.encode(key.as_bytes()).replace('=', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_encode_is_deterministic() {
        assert_eq!(encode_key("session:42"), encode_key("session:42"));
    }

    #[test]
    fn test_distinct_keys_never_collide() {
        let keys = [
            "a", "b", "ab", "a/b", "a_b", "a-b", "a b", "a+b=", "", "aa", "a\n",
            "日本語", "ключ", "key with spaces and / slashes",
        ];
        let encoded: HashSet<String> = keys.iter().map(|k| encode_key(k)).collect();
        assert_eq!(encoded.len(), keys.len());
    }

    #[test]
    fn test_output_charset_is_object_safe() {
        for key in ["hello/world?x=1&y=2", "päivä", "a\tb\0c"] {
            let name = encode_key(key);
            assert!(
                name.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'),
                "unsafe character in {name:?}"
            );
        }
    }

    #[test]
    fn test_padding_is_dots_not_equals() {
        // One-byte input pads with two characters.
        assert_eq!(encode_key("a"), "YQ..");
        assert!(!encode_key("ab").contains('='));
    }
}
