//! Point identifier derivation from recorder-issued uuid tokens.
//!
//! The recorder hands out base64-encoded 16-byte identifiers (URL-safe
//! alphabet, often with the trailing padding dropped). The canonical point
//! id is the UUID spelled by the first 16 decoded bytes, so re-ingesting a
//! record overwrites its point instead of duplicating it.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use tracing::warn;
use uuid::Uuid;

/// Derives the canonical point id for a recorder uuid token.
///
/// Strips trailing `=` padding, re-pads to a multiple of four characters,
/// decodes with the URL-safe alphabet and reads the first 16 bytes as a
/// UUID. A token that fails any of those steps falls back to a freshly
/// minted random UUID. The fallback is logged, since two ingestion runs
/// over such a record will not collide on id and therefore duplicate the
/// point.
pub fn point_id_for(token: &str) -> String {
    match decode_uuid(token) {
        Ok(id) => id.to_string(),
        Err(reason) => {
            let id = Uuid::new_v4();
            warn!(
                token,
                %reason,
                fallback_id = %id,
                "uuid token failed to decode, using random point id"
            );
            id.to_string()
        }
    }
}

fn decode_uuid(token: &str) -> Result<Uuid, String> {
    let stripped = token.trim_end_matches('=');
    let mut padded = stripped.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let bytes = URL_SAFE
        .decode(padded.as_bytes())
        .map_err(|e| e.to_string())?;
    if bytes.len() < 16 {
        return Err(format!("decoded {} bytes, need at least 16", bytes.len()));
    }

    Uuid::from_slice(&bytes[..16]).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // base64url("0123456789abcdef")
    const TOKEN: &str = "MDEyMzQ1Njc4OWFiY2RlZg==";
    const EXPECTED: &str = "30313233-3435-3637-3839-616263646566";

    #[test]
    fn valid_token_decodes_to_canonical_uuid() {
        assert_eq!(point_id_for(TOKEN), EXPECTED);
    }

    #[test]
    fn valid_token_is_deterministic() {
        assert_eq!(point_id_for(TOKEN), point_id_for(TOKEN));
    }

    #[test]
    fn unpadded_token_decodes_the_same() {
        assert_eq!(point_id_for("MDEyMzQ1Njc4OWFiY2RlZg"), EXPECTED);
    }

    #[test]
    fn longer_payload_uses_first_16_bytes() {
        // base64url("0123456789abcdefXY")
        assert_eq!(point_id_for("MDEyMzQ1Njc4OWFiY2RlZlhZ"), EXPECTED);
    }

    #[test]
    fn garbage_yields_a_valid_but_unstable_uuid() {
        let a = point_id_for("!!!");
        let b = point_id_for("!!!");
        assert!(Uuid::parse_str(&a).is_ok());
        assert!(Uuid::parse_str(&b).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn short_payload_falls_back() {
        // base64url("short") decodes to 5 bytes.
        let id = point_id_for("c2hvcnQ");
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, EXPECTED);
    }
}
