//! Snapshot encode/decode layer.
//!
//! The "absent or malformed blob hydrates to the initial state" contract
//! lives here, in exactly one place, so every store treats broken
//! persistence the same way.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Encode a snapshot as a JSON blob.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Decode a snapshot blob, falling back to `initial` when the blob is
/// absent or does not parse.
pub fn decode_or<T: DeserializeOwned>(key: &str, bytes: Option<&[u8]>, initial: T) -> T {
    match bytes {
        Some(raw) => match serde_json::from_slice(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    key = key,
                    blob_len = raw.len(),
                    error = %e,
                    "Malformed snapshot, hydrating initial state"
                );
                initial
            }
        },
        None => initial,
    }
}

/// Decode a snapshot blob, falling back to `T::default()`.
pub fn decode_or_default<T: DeserializeOwned + Default>(key: &str, bytes: Option<&[u8]>) -> T {
    decode_or(key, bytes, T::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        count: u32,
        label: String,
    }

    #[test]
    fn test_round_trip() {
        let sample = Sample {
            count: 7,
            label: "seven".to_string(),
        };
        let blob = encode(&sample).unwrap();
        let back: Sample = decode_or_default("sample", Some(&blob));
        assert_eq!(back, sample);
    }

    #[test]
    fn test_absent_blob_yields_initial() {
        let back: Sample = decode_or_default("sample", None);
        assert_eq!(back, Sample::default());
    }

    #[test]
    fn test_malformed_blob_yields_initial() {
        let back: Sample = decode_or_default("sample", Some(b"{not json"));
        assert_eq!(back, Sample::default());

        // Valid JSON of the wrong shape is also malformed
        let back: Sample = decode_or_default("sample", Some(b"[1, 2, 3]"));
        assert_eq!(back, Sample::default());
    }
}
