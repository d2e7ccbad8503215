//! Slack request signing, version `v0`.
//!
//! Slack signs every callback with HMAC-SHA256 over `v0:{timestamp}:{body}`
//! using the app's signing secret and sends the hex digest, prefixed with
//! `v0=`, in `X-Slack-Signature`. Requests older than five minutes are
//! refused so a captured callback cannot be replayed later.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";
pub const SIGNATURE_VERSION: &str = "v0";
pub const MAX_TIMESTAMP_SKEW_SECS: u64 = 60 * 5;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("missing Slack signature headers")]
    MissingHeaders,

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("request timestamp too old: {timestamp} ({skew}s away from now)")]
    Expired { timestamp: i64, skew: u64 },

    #[error("signing secret not configured")]
    SecretNotConfigured,

    #[error("signature mismatch")]
    Mismatch,
}

#[derive(Clone)]
pub struct SignatureVerifier {
    secret: String,
    max_skew_secs: u64,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("configured", &self.is_configured())
            .field("max_skew_secs", &self.max_skew_secs)
            .finish()
    }
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            max_skew_secs: MAX_TIMESTAMP_SKEW_SECS,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }

    /// `now` is unix seconds.
    pub fn verify(
        &self,
        timestamp: Option<&str>,
        signature: Option<&str>,
        body: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        let (Some(timestamp), Some(signature)) = (timestamp, signature) else {
            return Err(SignatureError::MissingHeaders);
        };

        let parsed: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| SignatureError::InvalidTimestamp(timestamp.to_string()))?;
        // abs_diff cannot overflow on hostile timestamps such as i64::MIN.
        let skew = now.abs_diff(parsed);
        if skew > self.max_skew_secs {
            return Err(SignatureError::Expired {
                timestamp: parsed,
                skew,
            });
        }

        if self.secret.is_empty() {
            return Err(SignatureError::SecretNotConfigured);
        }

        let digest = signature
            .strip_prefix("v0=")
            .and_then(|hex_digest| hex::decode(hex_digest).ok())
            .ok_or(SignatureError::Mismatch)?;

        let mac = self.mac(timestamp, body)?;
        mac.verify_slice(&digest).map_err(|_| SignatureError::Mismatch)
    }

    fn mac(&self, timestamp: &str, body: &[u8]) -> Result<HmacSha256, SignatureError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| SignatureError::SecretNotConfigured)?;
        mac.update(SIGNATURE_VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        Ok(mac)
    }
}

/// Value Slack would put in `X-Slack-Signature` for this request.
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(format!("{}:{}:", SIGNATURE_VERSION, timestamp).as_bytes());
    mac.update(body);
    format!("{}={}", SIGNATURE_VERSION, hex::encode(mac.finalize().into_bytes()))
}
