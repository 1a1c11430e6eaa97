use crate::error::WebhookError;
use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Header names carrying the payload signature, checked in order.
pub const SIGNATURE_HEADERS: &[&str] = &["x-polar-signature", "polar-signature", "x-signature"];

const SIGNATURE_PREFIX: &str = "sha256=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCheck {
    Verified,
    SkippedNoSecret,
    SkippedNoHeader,
}

pub fn signature_from_headers(headers: &HeaderMap) -> Option<String> {
    SIGNATURE_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

/// Hex-encoded HMAC-SHA256 of `payload` under `secret`.
pub fn compute_signature(secret: &[u8], payload: &[u8]) -> anyhow::Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| anyhow::anyhow!("invalid hmac key: {e}"))?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a hex signature, with or without a `sha256=` prefix.
pub fn verify_signature(secret: &[u8], payload: &[u8], signature: &str) -> bool {
    let hex_sig = signature
        .strip_prefix(SIGNATURE_PREFIX)
        .unwrap_or(signature);
    let Ok(provided) = hex::decode(hex_sig) else {
        tracing::debug!("webhook signature is not valid hex");
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload);
    let expected = mac.finalize().into_bytes();

    if expected.len() != provided.len() {
        return false;
    }
    expected.as_slice().ct_eq(&provided).into()
}

/// Verifies the request when both a secret and a signature header are present.
pub fn check_request(
    secret: Option<&str>,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<SignatureCheck, WebhookError> {
    let Some(secret) = secret else {
        return Ok(SignatureCheck::SkippedNoSecret);
    };
    let Some(signature) = signature_from_headers(headers) else {
        return Ok(SignatureCheck::SkippedNoHeader);
    };

    if verify_signature(secret.as_bytes(), body, &signature) {
        Ok(SignatureCheck::Verified)
    } else {
        Err(WebhookError::SignatureInvalid)
    }
}
