//! # TextHash - Text Hash Generator
//!
//! TextHash computes digests of text, compares text against an expected
//! digest, and copies results to the clipboard. It backs the `texthash`
//! command-line tool and can be embedded as a library.
//!
//! ## Features
//!
//! - **Algorithms**: MD5, SHA-1, SHA-2, SHA-3, BLAKE3, xxHash
//! - **All at once**: every algorithm in parallel
//! - **Verification**: case-insensitive, constant-time comparison
//! - **HMAC**: keyed digests over the MD5, SHA-1, SHA-2 and SHA-3 families
//! - **Clipboard**: external programs or OSC 52, with a self-resetting
//!   "copied" indicator
//!
//! ## Quick Start
//!
//! ```
//! use texthash::hash::{generate_hash, verify_text_hash, HashOptions};
//! use texthash::HashAlgorithm;
//!
//! let digest = generate_hash("hello", &HashOptions::new(HashAlgorithm::Sha256)).unwrap();
//! assert_eq!(digest, "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824");
//! assert!(verify_text_hash("hello", &digest, HashAlgorithm::Sha256).unwrap());
//! ```
//!
//! ## Controller
//!
//! ```no_run
//! use texthash::clipboard::MemoryClipboard;
//! use texthash::controller::HashToolController;
//!
//! # async fn demo() {
//! let mut tool = HashToolController::new(MemoryClipboard::new());
//! tool.set_input("hello");
//! tool.generate();
//! tool.copy_output().await;
//! assert!(tool.is_copied());
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod hash;
pub mod input;

// Re-export commonly used types
pub use config::{HashAlgorithm, ToolConfig};
pub use controller::{HashToolController, Verification};
pub use error::{HashToolError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use texthash::prelude::*;
    //! ```

    pub use crate::clipboard::{Clipboard, CopyIndicator, MemoryClipboard};
    pub use crate::config::{HashAlgorithm, ToolConfig, ALGORITHM_GROUPS};
    pub use crate::controller::{HashToolController, Verification};
    pub use crate::error::{HashToolError, Result};
    pub use crate::hash::{
        generate_all_hashes, generate_hash, generate_hmac, verify_text_hash, HashOptions, TextHasher,
    };
}
