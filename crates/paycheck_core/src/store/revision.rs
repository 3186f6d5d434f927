//! Revision marker generation.
//!
//! Markers have the form `<generation>-<digest>`: the generation grows by one
//! on every write of the same id and the digest is derived from the stored
//! body, so two writes never share a marker and no clock is consulted.

use crate::model::Document;
use crate::store::StoreResult;
use sha2::{Digest, Sha256};

const DIGEST_HEX_LEN: usize = 32;

/// Output of stamping a document for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamped {
    pub rev: String,
    /// Serialized document including the new `_rev`.
    pub body: String,
}

/// Assigns the next revision to a copy of `doc` and serializes it.
///
/// `previous` is the marker currently stored for the same id, if any.
/// Markers in a foreign format, or at the last representable generation,
/// restart the generation at 1.
pub fn stamp<T: Document>(doc: &T, previous: Option<&str>) -> StoreResult<Stamped> {
    let mut copy = doc.clone();
    copy.set_rev(None);
    let unrevisioned = serde_json::to_string(&copy)?;

    let generation = previous
        .and_then(parse_generation)
        .and_then(|gen| gen.checked_add(1))
        .unwrap_or(1);
    let rev = format!("{generation}-{}", digest_hex(&unrevisioned));

    copy.set_rev(Some(rev.clone()));
    let body = serde_json::to_string(&copy)?;
    Ok(Stamped { rev, body })
}

/// Extracts the generation from a marker produced by [`stamp`].
pub fn parse_generation(rev: &str) -> Option<u64> {
    let (generation, digest) = rev.split_once('-')?;
    let well_formed = digest.len() == DIGEST_HEX_LEN
        && digest.bytes().all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f'));
    if !well_formed {
        return None;
    }
    generation.parse().ok()
}

fn digest_hex(body: &str) -> String {
    let digest = Sha256::digest(body.as_bytes());
    hex::encode(&digest[..DIGEST_HEX_LEN / 2])
}

#[cfg(test)]
mod tests {
    use super::{parse_generation, stamp};
    use crate::model::paycheck::PaycheckDoc;

    #[test]
    fn first_write_starts_at_generation_one() {
        let doc = PaycheckDoc::new("2024-01-01", "2024-01-01", 5000.0);
        let stamped = stamp(&doc, None).unwrap();
        assert_eq!(parse_generation(&stamped.rev), Some(1));
        assert!(stamped.body.contains(&format!("\"_rev\":\"{}\"", stamped.rev)));
    }

    #[test]
    fn generation_increments_even_for_identical_content() {
        let doc = PaycheckDoc::new("a", "2024-01-01", 10.0);
        let first = stamp(&doc, None).unwrap();
        let second = stamp(&doc, Some(&first.rev)).unwrap();
        assert_eq!(parse_generation(&second.rev), Some(2));
        assert_ne!(first.rev, second.rev);
    }

    #[test]
    fn incoming_rev_does_not_affect_digest() {
        let mut doc = PaycheckDoc::new("a", "2024-01-01", 10.0);
        let plain = stamp(&doc, None).unwrap();
        doc.rev = Some("stale".to_string());
        assert_eq!(stamp(&doc, None).unwrap().rev, plain.rev);
    }

    #[test]
    fn legacy_timestamp_revs_are_not_generations() {
        assert_eq!(parse_generation("2024-01-01T10:00:00.000Z"), None);
        assert_eq!(parse_generation("garbage"), None);
    }

    #[test]
    fn exhausted_generation_restarts_instead_of_overflowing() {
        let doc = PaycheckDoc::new("x", "d", 2.0);
        let exhausted = format!("{}-{}", u64::MAX, "0".repeat(32));
        assert_eq!(parse_generation(&exhausted), Some(u64::MAX));

        let stamped = stamp(&doc, Some(&exhausted)).unwrap();
        assert_eq!(parse_generation(&stamped.rev), Some(1));
        assert_ne!(stamped.rev, exhausted);
    }

    #[test]
    fn digest_is_lowercase_hex_of_fixed_width() {
        let stamped = stamp(&PaycheckDoc::new("a", "d", 1.0), None).unwrap();
        let (_, digest) = stamped.rev.split_once('-').unwrap();
        assert_eq!(digest.len(), 32);
        assert!(digest.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    }
}
