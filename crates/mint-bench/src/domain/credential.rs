//! # Credential Handle
//!
//! The signing key is held in a wrapper that never prints its value and is
//! zeroed on drop. It reaches the external tool only as an encrypted
//! keystore (see [`super::keystore`]), never through argv or a plain
//! environment variable, so it does not show up in process listings, logs
//! or result files.

use std::env;
use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::BenchError;

/// Environment variable the driver reads the signing key from.
pub const PRIVATE_KEY_ENV: &str = "MINT_BENCH_PRIVATE_KEY";

/// Redacting handle for a raw secp256k1 private key.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Wrap a hex-encoded 32-byte key, with or without `0x` prefix.
    pub fn new(raw: impl Into<String>) -> Result<Self, BenchError> {
        let mut raw = raw.into();
        let parsed = {
            let trimmed = raw.trim();
            let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
            Self::parse_digits(digits)
        };
        raw.zeroize();
        parsed
    }

    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    fn parse_digits(digits: &str) -> Result<Self, BenchError> {
        if digits.len() != 64 {
            return Err(BenchError::InvalidCredential(format!(
                "expected 64 hex digits, got {}",
                digits.len()
            )));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| BenchError::InvalidCredential("key is not valid hex".to_string()))?;
        Ok(Self(bytes))
    }

    /// Load the key from [`PRIVATE_KEY_ENV`].
    pub fn from_env() -> Result<Self, BenchError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the key from a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BenchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(PRIVATE_KEY_ENV) {
            Some(raw) if !raw.trim().is_empty() => Self::new(raw),
            _ => Err(BenchError::MissingCredential {
                var: PRIVATE_KEY_ENV.to_string(),
            }),
        }
    }

    /// Raw key bytes, for sealing into a keystore.
    pub(crate) fn secret_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `0x`-prefixed hex of the key. Test doubles only.
    pub(crate) fn expose_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}
