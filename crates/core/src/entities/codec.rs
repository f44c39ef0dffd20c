//! JSON encode/decode helpers for stored blobs.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors that can occur when encoding or decoding stored values.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The stored value is not a JSON array where one was expected.
    #[error("stored value is not a JSON array")]
    NotAnArray,
    /// A single-record blob could not be parsed at all.
    #[error("stored record is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
    /// A strict decode found malformed elements it is not allowed to drop.
    #[error("stored array has {skipped} malformed record(s)")]
    LossyArray {
        /// How many elements failed to parse.
        skipped: usize,
    },
    /// Encoding failed (should not happen for our plain-data types).
    #[error("failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result of decoding a collection blob with repair.
#[derive(Debug)]
pub struct Decoded<T> {
    /// The records that parsed cleanly, in stored order.
    pub records: Vec<T>,
    /// How many array elements were dropped as malformed.
    pub skipped: usize,
}

impl<T> Decoded<T> {
    /// Whether any records were dropped during decoding.
    #[must_use]
    pub const fn is_lossy(&self) -> bool {
        self.skipped > 0
    }
}

/// Decode a JSON array blob, dropping (and counting) malformed elements.
///
/// The blob itself must be an array; anything else is corruption the caller
/// has to deal with explicitly.
///
/// # Errors
///
/// Returns [`CodecError::NotAnArray`] if the blob is valid JSON but not an
/// array, or [`CodecError::Malformed`] if it is not JSON at all.
pub fn decode_array<T: DeserializeOwned>(raw: &str) -> Result<Decoded<T>, CodecError> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(serde_json::Value::Array(values)) => values,
        Ok(_) => return Err(CodecError::NotAnArray),
        Err(e) => return Err(CodecError::Malformed(e)),
    };

    let mut records = Vec::with_capacity(values.len());
    let mut skipped = 0;
    for value in values {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(_) => skipped += 1,
        }
    }

    Ok(Decoded { records, skipped })
}

/// Decode a JSON array blob, refusing to drop anything.
///
/// For collections where losing a record on the next rewrite would destroy
/// data (order histories), a malformed element is corruption, not noise.
///
/// # Errors
///
/// Returns [`CodecError::LossyArray`] if any element fails to parse, plus
/// the errors of [`decode_array`].
pub fn decode_array_strict<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, CodecError> {
    let decoded = decode_array(raw)?;
    if decoded.is_lossy() {
        return Err(CodecError::LossyArray {
            skipped: decoded.skipped,
        });
    }
    Ok(decoded.records)
}

/// Decode a single-record blob.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] if the blob does not parse as `T`.
pub fn decode_record<T: DeserializeOwned>(raw: &str) -> Result<T, CodecError> {
    serde_json::from_str(raw).map_err(CodecError::Malformed)
}

/// Encode any serializable value to its stored JSON form.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(CodecError::Encode)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Rec {
        id: String,
        n: u32,
    }

    #[test]
    fn test_decode_clean_array() {
        let decoded: Decoded<Rec> =
            decode_array(r#"[{"id":"a","n":1},{"id":"b","n":2}]"#).unwrap();
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.skipped, 0);
        assert!(!decoded.is_lossy());
    }

    #[test]
    fn test_decode_drops_malformed_elements() {
        let decoded: Decoded<Rec> =
            decode_array(r#"[{"id":"a","n":1},{"bogus":true},42]"#).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.skipped, 2);
        assert!(decoded.is_lossy());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(matches!(
            decode_array::<Rec>(r#"{"id":"a","n":1}"#),
            Err(CodecError::NotAnArray)
        ));
        assert!(matches!(
            decode_array::<Rec>("definitely not json"),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn test_strict_decode_refuses_lossy_arrays() {
        let ok: Vec<Rec> = decode_array_strict(r#"[{"id":"a","n":1}]"#).unwrap();
        assert_eq!(ok.len(), 1);

        assert!(matches!(
            decode_array_strict::<Rec>(r#"[{"id":"a","n":1},{"bogus":true}]"#),
            Err(CodecError::LossyArray { skipped: 1 })
        ));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let rec = Rec {
            id: "a".to_owned(),
            n: 7,
        };
        let raw = encode(&rec).unwrap();
        let back: Rec = decode_record(&raw).unwrap();
        assert_eq!(back, rec);
    }
}
