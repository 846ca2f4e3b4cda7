//! Hash computation and verification module
//!
//! Provides digests of text with MD5, SHA-1, SHA-2, SHA-3, BLAKE3 and
//! xxHash, verification against expected digests, and HMAC.

mod integrity;
mod keyed;
mod text;

pub use integrity::*;
pub use keyed::*;
pub use text::*;
