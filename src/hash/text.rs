//! Text hashing operations
//!
//! The operations behind the hash tool: one digest, every digest, and
//! verification against an expected hex string. `TextHasher` carries the
//! input size limit; the free functions run without one.

use super::integrity::{encode_hex, Hasher};
use super::keyed::{hmac_bytes, HmacOutput};
use crate::config::{HashAlgorithm, ToolConfig};
use crate::error::{HashToolError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use subtle::ConstantTimeEq;
use tracing::{debug, trace};

/// Every algorithm's digest of one input
pub type AllHashes = BTreeMap<HashAlgorithm, String>;

/// Options for a single digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HashOptions {
    /// Algorithm to apply
    pub algorithm: HashAlgorithm,
    /// Emit uppercase hex
    pub uppercase: bool,
}

impl HashOptions {
    /// Options for `algorithm`, lowercase output
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            uppercase: false,
        }
    }

    /// Set the output case
    pub fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }
}

/// Hashes text subject to an optional input size limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextHasher {
    max_input_bytes: Option<u64>,
}

impl TextHasher {
    /// Create a hasher that rejects inputs above `max_input_bytes`
    pub fn new(max_input_bytes: Option<u64>) -> Self {
        Self { max_input_bytes }
    }

    /// Create a hasher with no input limit
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Create a hasher from runtime configuration
    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(config.max_input_bytes)
    }

    /// Configured input limit
    pub fn max_input_bytes(&self) -> Option<u64> {
        self.max_input_bytes
    }

    fn check_size(&self, data: &[u8]) -> Result<()> {
        match self.max_input_bytes {
            Some(limit) if data.len() as u64 > limit => Err(HashToolError::InputTooLarge {
                size: data.len() as u64,
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Digest `text` with one algorithm
    pub fn generate(&self, text: &str, options: &HashOptions) -> Result<String> {
        self.check_size(text.as_bytes())?;

        let mut hasher = Hasher::new(options.algorithm);
        hasher.update(text.as_bytes());
        let digest = hasher.finalize(options.uppercase);

        trace!(algorithm = %options.algorithm, len = text.len(), "generated digest");
        Ok(digest)
    }

    /// Digest `text` with every algorithm in parallel
    pub fn generate_all(&self, text: &str, uppercase: bool) -> Result<AllHashes> {
        self.check_size(text.as_bytes())?;

        let hashes: AllHashes = HashAlgorithm::ALL
            .par_iter()
            .map(|&algorithm| {
                let mut hasher = Hasher::new(algorithm);
                hasher.update(text.as_bytes());
                (algorithm, hasher.finalize(uppercase))
            })
            .collect();

        debug!(count = hashes.len(), len = text.len(), "generated all digests");
        Ok(hashes)
    }

    /// Compare a fresh digest of `text` against `expected`
    ///
    /// `expected` is trimmed and compared without regard to case. Any
    /// non-empty string that differs from the digest is a mismatch, whether
    /// it has the wrong length or characters outside `[0-9a-f]`. Only an
    /// empty expected value is an error.
    pub fn verify(&self, text: &str, expected: &str, algorithm: HashAlgorithm) -> Result<bool> {
        let expected = normalize_expected(expected)?;
        let actual = self.generate(text, &HashOptions::new(algorithm))?;

        if actual.len() != expected.len() {
            debug!(
                algorithm = %algorithm,
                expected_len = expected.len(),
                actual_len = actual.len(),
                "digest length mismatch"
            );
            return Ok(false);
        }

        Ok(actual.as_bytes().ct_eq(expected.as_bytes()).into())
    }

    /// Keyed digest of `text`
    pub fn hmac(&self, text: &str, key: &str, options: &HashOptions) -> Result<HmacOutput> {
        self.check_size(text.as_bytes())?;
        if key.is_empty() {
            return Err(HashToolError::EmptyKey);
        }

        let bytes = hmac_bytes(options.algorithm, key.as_bytes(), text.as_bytes())?;
        Ok(HmacOutput::new(
            options.algorithm,
            encode_hex(&bytes, options.uppercase),
            text.len() as u64,
        ))
    }
}

fn normalize_expected(expected: &str) -> Result<String> {
    let trimmed = expected.trim();
    if trimmed.is_empty() {
        return Err(HashToolError::malformed("expected digest is empty"));
    }
    if let Some(bad) = trimmed.chars().find(|c| !c.is_ascii_hexdigit()) {
        debug!(character = ?bad, "expected digest is not hex");
    }
    Ok(trimmed.to_ascii_lowercase())
}

/// Digest `text` with one algorithm
pub fn generate_hash(text: &str, options: &HashOptions) -> Result<String> {
    TextHasher::unbounded().generate(text, options)
}

/// Digest `text` with every algorithm
pub fn generate_all_hashes(text: &str, uppercase: bool) -> Result<AllHashes> {
    TextHasher::unbounded().generate_all(text, uppercase)
}

/// Check `text` against an expected hex digest
pub fn verify_text_hash(text: &str, expected: &str, algorithm: HashAlgorithm) -> Result<bool> {
    TextHasher::unbounded().verify(text, expected, algorithm)
}

/// HMAC of `text` under `key`
pub fn generate_hmac(text: &str, key: &str, options: &HashOptions) -> Result<HmacOutput> {
    TextHasher::unbounded().hmac(text, key, options)
}
