//! HMAC over the RustCrypto digests

use crate::config::HashAlgorithm;
use crate::error::{HashToolError, Result};
use hmac::digest::core_api::BlockSizeUser;
use hmac::digest::Digest;
use hmac::{Mac, SimpleHmac};
use serde::{Deserialize, Serialize};

/// Keyed digest result as hex string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmacOutput {
    /// Underlying hash algorithm
    pub algorithm: HashAlgorithm,
    /// MAC value as hex string
    pub hex: String,
    /// Message size in bytes
    pub input_len: u64,
}

impl HmacOutput {
    /// Create a new HMAC output
    pub fn new(algorithm: HashAlgorithm, hex: String, input_len: u64) -> Self {
        Self { algorithm, hex, input_len }
    }
}

impl std::fmt::Display for HmacOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex)
    }
}

fn mac<D>(key: &[u8], data: &[u8]) -> Result<Vec<u8>>
where
    D: Digest + BlockSizeUser,
{
    let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(key)
        .map_err(|e| HashToolError::config(format!("HMAC key rejected: {}", e)))?;
    Mac::update(&mut mac, data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Raw HMAC bytes for `algorithm`
///
/// BLAKE3 and the xxHash family have no HMAC construction.
pub fn hmac_bytes(algorithm: HashAlgorithm, key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    match algorithm {
        HashAlgorithm::Md5 => mac::<md5::Md5>(key, data),
        HashAlgorithm::Sha1 => mac::<sha1::Sha1>(key, data),
        HashAlgorithm::Sha224 => mac::<sha2::Sha224>(key, data),
        HashAlgorithm::Sha256 => mac::<sha2::Sha256>(key, data),
        HashAlgorithm::Sha384 => mac::<sha2::Sha384>(key, data),
        HashAlgorithm::Sha512 => mac::<sha2::Sha512>(key, data),
        HashAlgorithm::Sha3_256 => mac::<sha3::Sha3_256>(key, data),
        HashAlgorithm::Sha3_384 => mac::<sha3::Sha3_384>(key, data),
        HashAlgorithm::Sha3_512 => mac::<sha3::Sha3_512>(key, data),
        HashAlgorithm::Blake3 | HashAlgorithm::XxHash64 | HashAlgorithm::XxHash3 => {
            Err(HashToolError::HmacUnsupported(algorithm))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 2104 / RFC 4231 test case 2
    const KEY: &[u8] = b"Jefe";
    const DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn test_rfc_vectors() {
        let sha256 = hmac_bytes(HashAlgorithm::Sha256, KEY, DATA).unwrap();
        assert_eq!(
            hex::encode(sha256),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );

        let md5 = hmac_bytes(HashAlgorithm::Md5, KEY, DATA).unwrap();
        assert_eq!(hex::encode(md5), "750c783e6ab0b503eaa86e310a5db738");
    }

    #[test]
    fn test_output_sizes() {
        for algorithm in HashAlgorithm::ALL.into_iter().filter(|a| a.supports_hmac()) {
            let bytes = hmac_bytes(algorithm, KEY, DATA).unwrap();
            assert_eq!(bytes.len(), algorithm.output_size(), "{}", algorithm);
        }
    }

    #[test]
    fn test_unsupported_algorithms() {
        for algorithm in HashAlgorithm::ALL.into_iter().filter(|a| !a.supports_hmac()) {
            let err = hmac_bytes(algorithm, KEY, DATA).unwrap_err();
            assert!(matches!(err, HashToolError::HmacUnsupported(a) if a == algorithm));
        }
    }
}
