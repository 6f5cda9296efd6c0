//! Compact serialization: `<header>.<payload>.<signature>` in base64url

use crate::claims::Claims;
use crate::error::{JwtError, JwtResult};
use crate::header::Header;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Base64 URL-safe encoding without padding (RFC 7515)
#[inline]
pub(crate) fn encode_segment(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

fn decode_segment(segment: &[u8], what: &str) -> JwtResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwtError::malformed(format!("{what} encoding: {e}")))
}

/// A token split into its segments, header decoded.
pub(crate) struct Compact<'a> {
    pub(crate) header: Header,
    /// Signing input exactly as received: header segment, '.', payload segment
    pub(crate) signed: &'a [u8],
    payload: &'a [u8],
    pub(crate) signature: Vec<u8>,
}

impl<'a> Compact<'a> {
    pub(crate) fn parse(token: &'a [u8]) -> JwtResult<Self> {
        let first = token.iter().position(|&b| b == b'.');
        let last = token.iter().rposition(|&b| b == b'.');
        let (first, last) = match (first, last) {
            (Some(first), Some(last)) if first != last => (first, last),
            _ => return Err(JwtError::malformed("expected 3 segments")),
        };
        let payload = &token[first + 1..last];
        if payload.contains(&b'.') {
            return Err(JwtError::malformed("expected 3 segments"));
        }

        let header_json = decode_segment(&token[..first], "header")?;
        let header: Header = serde_json::from_slice(&header_json)
            .map_err(|e| JwtError::malformed(format!("header JSON: {e}")))?;
        let signature = decode_segment(&token[last + 1..], "signature")?;

        Ok(Self {
            header,
            signed: &token[..last],
            payload,
            signature,
        })
    }

    /// Decode the payload segment. Only called once the signature checks out.
    pub(crate) fn claims(&self) -> JwtResult<Claims> {
        let json = decode_segment(self.payload, "payload")?;
        serde_json::from_slice(&json).map_err(|e| JwtError::malformed(format!("claims JSON: {e}")))
    }
}
