//! JSON response decoding.
//!
//! The API answers with three shapes: a single object, an array of objects,
//! or an object whose values are objects keyed by ID (bulk lookups). Failures
//! carry the target type name, the payload length and a short payload prefix.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::{QuipError, Result};

/// Decodes a single JSON object.
pub fn decode_object<T: DeserializeOwned>(bytes: &[u8], prefix_len: usize) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|err| decode_error::<T>(bytes, prefix_len, err))
}

/// Decodes a JSON array of objects.
pub fn decode_array<T: DeserializeOwned>(bytes: &[u8], prefix_len: usize) -> Result<Vec<T>> {
    serde_json::from_slice(bytes).map_err(|err| decode_error::<Vec<T>>(bytes, prefix_len, err))
}

/// Decodes a JSON object of objects keyed by ID and flattens its values.
///
/// The order of the returned entities is unspecified.
pub fn decode_keyed<T: DeserializeOwned>(bytes: &[u8], prefix_len: usize) -> Result<Vec<T>> {
    serde_json::from_slice::<HashMap<String, T>>(bytes)
        .map(|map| map.into_values().collect())
        .map_err(|err| decode_error::<HashMap<String, T>>(bytes, prefix_len, err))
}

fn decode_error<T>(bytes: &[u8], prefix_len: usize, source: serde_json::Error) -> QuipError {
    let end = bytes.len().min(prefix_len);
    QuipError::Decode {
        type_name: std::any::type_name::<T>(),
        len: bytes.len(),
        prefix: String::from_utf8_lossy(&bytes[..end]).into_owned(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{decode_array, decode_keyed, decode_object};
    use crate::{types::Thread, QuipError, User};

    fn thread_json() -> serde_json::Value {
        json!({
            "expanded_user_ids": ["u1", "u2"],
            "user_ids": ["u1"],
            "shared_folder_ids": ["f1"],
            "html": "<p>Hello</p>",
            "thread": {
                "id": "t1",
                "author_id": "u1",
                "thread_class": "document",
                "created_usec": 1_500_000_000_000_000i64,
                "updated_usec": 1_500_000_000_000_123i64,
                "title": "Roadmap",
                "link": "https://quip.com/t1",
                "type": "document",
                "sharing": { "company_id": "c1", "company_mode": "edit" }
            }
        })
    }

    #[test]
    fn thread_round_trip_keeps_renamed_fields() {
        let original = thread_json();
        let bytes = serde_json::to_vec(&original).expect("must encode");
        let thread: Thread = decode_object(&bytes, 20).expect("must decode");

        assert_eq!(thread.thread.author_id, "u1");
        assert_eq!(thread.thread.created_usec, 1_500_000_000_000_000);
        assert_eq!(thread.thread.kind, "document");
        assert_eq!(thread.thread.sharing.company_mode, "edit");

        let encoded = serde_json::to_value(&thread).expect("must re-encode");
        assert_eq!(encoded, original);
    }

    #[test]
    fn keyed_collection_yields_every_entity() {
        let body = json!({
            "b": { "id": "b", "name": "Bea" },
            "a": { "id": "a", "name": "Al" }
        });
        let bytes = serde_json::to_vec(&body).expect("must encode");
        let mut users: Vec<User> = decode_keyed(&bytes, 20).expect("must decode");
        users.sort_by(|left, right| left.id.cmp(&right.id));

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Al");
        assert_eq!(users[1].name, "Bea");
    }

    #[test]
    fn array_decodes_in_order() {
        let bytes = br#"[{"id":"1","name":"One"},{"id":"2","name":"Two"}]"#;
        let users: Vec<User> = decode_array(bytes, 20).expect("must decode");
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].id, "2");
    }

    #[test]
    fn decode_error_reports_truncated_prefix() {
        let bytes = b"<html><body>Service temporarily unavailable</body></html>";
        let err = decode_object::<User>(bytes, 20).expect_err("must fail");
        match err {
            QuipError::Decode {
                type_name,
                len,
                prefix,
                ..
            } => {
                assert!(type_name.ends_with("User"));
                assert_eq!(len, bytes.len());
                assert_eq!(prefix, "<html><body>Service ");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn decode_error_prefix_is_bounded_by_payload() {
        let err = decode_array::<User>(b"{}", 20).expect_err("must fail");
        match err {
            QuipError::Decode { len, prefix, .. } => {
                assert_eq!(len, 2);
                assert_eq!(prefix, "{}");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn keyed_rejects_array_payload() {
        let err = decode_keyed::<User>(b"[]", 20).expect_err("must fail");
        assert!(matches!(err, QuipError::Decode { .. }));
    }
}
