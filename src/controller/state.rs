//! Controller state types

use crate::config::HashAlgorithm;
use crate::hash::AllHashes;
use serde::{Deserialize, Serialize};

/// Outcome of the last verification
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum Verification {
    /// Nothing verified yet
    #[default]
    NotRun,
    /// Digest matched
    Match,
    /// Digest did not match
    Mismatch,
    /// Digest could not be computed or the expected value was malformed
    Failed(String),
}

impl Verification {
    /// Tri-state view: `None` until run, `Some(false)` for mismatches and failures
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::NotRun => None,
            Self::Match => Some(true),
            Self::Mismatch | Self::Failed(_) => Some(false),
        }
    }

    /// Failure reason, if verification failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for Verification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRun => write!(f, "not verified"),
            Self::Match => write!(f, "MATCH"),
            Self::Mismatch => write!(f, "MISMATCH"),
            Self::Failed(reason) => write!(f, "FAILED ({})", reason),
        }
    }
}

/// Point-in-time copy of the controller state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    /// Input length in bytes
    pub input_len: usize,
    /// Selected algorithm
    pub algorithm: HashAlgorithm,
    /// Uppercase output
    pub uppercase: bool,
    /// Digest to verify against
    pub expected_hash: Option<String>,
    /// Whether an HMAC key is set
    pub hmac_key_set: bool,
    /// Latest single digest
    pub output: Option<String>,
    /// Latest all-algorithms result
    pub all_hashes: Option<AllHashes>,
    /// Verification tri-state
    pub verified: Option<bool>,
    /// Why verification failed
    pub verification_error: Option<String>,
    /// Copied indicator
    pub copied: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tri_state() {
        assert_eq!(Verification::NotRun.as_bool(), None);
        assert_eq!(Verification::Match.as_bool(), Some(true));
        assert_eq!(Verification::Mismatch.as_bool(), Some(false));
        assert_eq!(Verification::Failed("bad".into()).as_bool(), Some(false));
        assert_eq!(Verification::Failed("bad".into()).error(), Some("bad"));
        assert_eq!(Verification::Mismatch.error(), None);
    }
}
