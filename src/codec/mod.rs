//! Body codec abstraction.
//!
//! The client never calls a serializer directly; it goes through a [`Codec`]
//! so the wire format can be swapped for tests or alternative encodings.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Codec error types.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CodecError {
    /// The value could not be serialized.
    #[error("{message}")]
    Encode {
        /// Error message.
        message: String,
    },

    /// The bytes do not match the target type.
    #[error("{message}")]
    Decode {
        /// Error message.
        message: String,
    },
}

/// Converts typed values to and from raw body bytes.
pub trait Codec: Send + Sync {
    /// Serializes a value into body bytes.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Deserializes body bytes into a value of type `T`.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Creates a new JSON codec.
    pub fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode {
            message: e.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_json_codec_encodes_struct() {
        #[derive(Serialize)]
        struct Todo {
            title: &'static str,
            done: bool,
        }

        let bytes = JsonCodec
            .encode(&Todo {
                title: "write tests",
                done: false,
            })
            .unwrap();
        assert_eq!(bytes, br#"{"title":"write tests","done":false}"#);
    }

    #[test]
    fn test_json_codec_decode_mismatch() {
        let result: Result<Vec<String>, _> = JsonCodec.decode(br#""Success""#);
        assert!(matches!(result, Err(CodecError::Decode { .. })));
    }

    #[test]
    fn test_json_codec_decode_empty_body() {
        let result: Result<String, _> = JsonCodec.decode(b"");
        assert!(result.is_err());
    }

    #[test]
    fn test_json_codec_rejects_non_string_map_keys() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], "value");
        let result = JsonCodec.encode(&map);
        assert!(matches!(result, Err(CodecError::Encode { .. })));
    }
}
