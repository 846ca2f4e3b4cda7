//! Hash tool controller
//!
//! Holds the tool's state (input, algorithm, outputs, verification,
//! copied flag) and turns user actions into calls on the hashing engine.

mod session;
mod state;

pub use session::*;
pub use state::*;

use crate::clipboard::{Clipboard, CopyIndicator};
use crate::config::{HashAlgorithm, ToolConfig};
use crate::hash::{AllHashes, HashOptions, TextHasher};
use tracing::{debug, error, warn};

/// State holder behind the hash tool
///
/// Hashing failures are logged and leave the state untouched. Failed
/// verifications are recorded as `Verification::Failed`.
pub struct HashToolController<C: Clipboard> {
    input: String,
    algorithm: HashAlgorithm,
    uppercase: bool,
    expected_hash: String,
    hmac_key: String,
    output: Option<String>,
    all_hashes: Option<AllHashes>,
    verification: Verification,
    hasher: TextHasher,
    clipboard: C,
    indicator: CopyIndicator,
}

impl<C: Clipboard> HashToolController<C> {
    /// Create a controller with default configuration
    pub fn new(clipboard: C) -> Self {
        Self::with_config(&ToolConfig::default(), clipboard)
    }

    /// Create a controller from runtime configuration
    pub fn with_config(config: &ToolConfig, clipboard: C) -> Self {
        Self {
            input: String::new(),
            algorithm: config.default_algorithm,
            uppercase: config.uppercase,
            expected_hash: String::new(),
            hmac_key: String::new(),
            output: None,
            all_hashes: None,
            verification: Verification::NotRun,
            hasher: TextHasher::from_config(config),
            clipboard,
            indicator: CopyIndicator::new(config.copy_reset_delay),
        }
    }

    /// Replace the input text
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Select the algorithm
    pub fn set_algorithm(&mut self, algorithm: HashAlgorithm) {
        self.algorithm = algorithm;
    }

    /// Toggle uppercase output
    pub fn set_uppercase(&mut self, uppercase: bool) {
        self.uppercase = uppercase;
    }

    /// Digest to verify against
    pub fn set_expected_hash(&mut self, expected: impl Into<String>) {
        self.expected_hash = expected.into();
    }

    /// Key for HMAC mode
    pub fn set_hmac_key(&mut self, key: impl Into<String>) {
        self.hmac_key = key.into();
    }

    /// Current input text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Selected algorithm
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Whether output is uppercase
    pub fn uppercase(&self) -> bool {
        self.uppercase
    }

    /// Latest single digest
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Latest all-algorithms result
    pub fn all_hashes(&self) -> Option<&AllHashes> {
        self.all_hashes.as_ref()
    }

    /// Latest verification outcome
    pub fn verification(&self) -> &Verification {
        &self.verification
    }

    /// Whether something was copied within the reset delay
    pub fn is_copied(&self) -> bool {
        self.indicator.is_copied()
    }

    /// Clipboard in use
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    fn options(&self) -> HashOptions {
        HashOptions::new(self.algorithm).with_uppercase(self.uppercase)
    }

    /// Hash the input with the selected algorithm
    ///
    /// Does nothing when the input is empty.
    pub fn generate(&mut self) -> Option<&str> {
        if self.input.is_empty() {
            return None;
        }

        match self.hasher.generate(&self.input, &self.options()) {
            Ok(digest) => {
                debug!(algorithm = %self.algorithm, "hash generated");
                self.output = Some(digest);
                self.output.as_deref()
            }
            Err(e) => {
                error!(algorithm = %self.algorithm, "error generating hash: {}", e);
                None
            }
        }
    }

    /// Hash the input with every algorithm
    ///
    /// Does nothing when the input is empty.
    pub fn generate_all(&mut self) -> Option<&AllHashes> {
        if self.input.is_empty() {
            return None;
        }

        match self.hasher.generate_all(&self.input, self.uppercase) {
            Ok(hashes) => {
                self.all_hashes = Some(hashes);
                self.all_hashes.as_ref()
            }
            Err(e) => {
                error!("error generating all hashes: {}", e);
                None
            }
        }
    }

    /// Compare the input's digest with the expected hash
    ///
    /// Does nothing unless both the input and the expected hash are set.
    pub fn verify(&mut self) -> &Verification {
        if self.input.is_empty() || self.expected_hash.is_empty() {
            return &self.verification;
        }

        self.verification = match self.hasher.verify(&self.input, &self.expected_hash, self.algorithm) {
            Ok(true) => Verification::Match,
            Ok(false) => Verification::Mismatch,
            Err(e) => {
                warn!(algorithm = %self.algorithm, "error verifying hash: {}", e);
                Verification::Failed(e.to_string())
            }
        };
        debug!(algorithm = %self.algorithm, result = ?self.verification, "hash verified");
        &self.verification
    }

    /// HMAC of the input under the configured key, stored as the output
    ///
    /// Does nothing unless both the input and the key are set.
    pub fn generate_hmac(&mut self) -> Option<&str> {
        if self.input.is_empty() || self.hmac_key.is_empty() {
            return None;
        }

        match self.hasher.hmac(&self.input, &self.hmac_key, &self.options()) {
            Ok(mac) => {
                self.output = Some(mac.hex);
                self.output.as_deref()
            }
            Err(e) => {
                error!(algorithm = %self.algorithm, "error generating HMAC: {}", e);
                None
            }
        }
    }

    /// Write `text` to the clipboard and light the copied indicator
    ///
    /// Clipboard failures are logged and otherwise ignored.
    pub async fn copy(&mut self, text: &str) -> bool {
        match self.clipboard.write_text(text).await {
            Ok(()) => {
                self.indicator.mark_copied();
                true
            }
            Err(e) => {
                debug!(backend = self.clipboard.name(), "clipboard write failed: {}", e);
                false
            }
        }
    }

    /// Copy the current single digest, if there is one
    pub async fn copy_output(&mut self) -> bool {
        match self.output.clone() {
            Some(output) => self.copy(&output).await,
            None => false,
        }
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            input_len: self.input.len(),
            algorithm: self.algorithm,
            uppercase: self.uppercase,
            expected_hash: (!self.expected_hash.is_empty()).then(|| self.expected_hash.clone()),
            hmac_key_set: !self.hmac_key.is_empty(),
            output: self.output.clone(),
            all_hashes: self.all_hashes.clone(),
            verified: self.verification.as_bool(),
            verification_error: self.verification.error().map(str::to_string),
            copied: self.is_copied(),
        }
    }
}
