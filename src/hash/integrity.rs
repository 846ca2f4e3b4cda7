//! Streaming digests over every supported algorithm
//!
//! `Hasher` wraps the RustCrypto digests, BLAKE3 and xxHash behind one
//! enum so callers can feed data in chunks and pick the algorithm at runtime.

use crate::config::HashAlgorithm;
use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::time::{Duration, Instant};

/// Digest result as hex string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestOutput {
    /// The hash algorithm used
    pub algorithm: HashAlgorithm,
    /// Hash value as hex string
    pub hex: String,
    /// Input size in bytes
    pub input_len: u64,
}

impl DigestOutput {
    /// Create a new digest output
    pub fn new(algorithm: HashAlgorithm, hex: String, input_len: u64) -> Self {
        Self { algorithm, hex, input_len }
    }

    /// Same algorithm and same digest, ignoring hex case
    pub fn matches(&self, other: &DigestOutput) -> bool {
        self.algorithm == other.algorithm && self.hex.eq_ignore_ascii_case(&other.hex)
    }
}

impl std::fmt::Display for DigestOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex)
    }
}

/// Unified hasher that supports all algorithms
pub enum Hasher {
    /// MD5
    Md5(md5::Md5),
    /// SHA-1
    Sha1(sha1::Sha1),
    /// SHA-224
    Sha224(sha2::Sha224),
    /// SHA-256
    Sha256(sha2::Sha256),
    /// SHA-384
    Sha384(sha2::Sha384),
    /// SHA-512
    Sha512(sha2::Sha512),
    /// SHA3-256
    Sha3_256(sha3::Sha3_256),
    /// SHA3-384
    Sha3_384(sha3::Sha3_384),
    /// SHA3-512
    Sha3_512(sha3::Sha3_512),
    /// BLAKE3
    Blake3(blake3::Hasher),
    /// XXHash64
    XxHash64(xxhash_rust::xxh64::Xxh64),
    /// XXHash3 128-bit
    XxHash3(xxhash_rust::xxh3::Xxh3),
}

impl Hasher {
    /// Create a new hasher for the given algorithm
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Self::Md5(md5::Md5::new()),
            HashAlgorithm::Sha1 => Self::Sha1(sha1::Sha1::new()),
            HashAlgorithm::Sha224 => Self::Sha224(sha2::Sha224::new()),
            HashAlgorithm::Sha256 => Self::Sha256(sha2::Sha256::new()),
            HashAlgorithm::Sha384 => Self::Sha384(sha2::Sha384::new()),
            HashAlgorithm::Sha512 => Self::Sha512(sha2::Sha512::new()),
            HashAlgorithm::Sha3_256 => Self::Sha3_256(sha3::Sha3_256::new()),
            HashAlgorithm::Sha3_384 => Self::Sha3_384(sha3::Sha3_384::new()),
            HashAlgorithm::Sha3_512 => Self::Sha3_512(sha3::Sha3_512::new()),
            HashAlgorithm::Blake3 => Self::Blake3(blake3::Hasher::new()),
            HashAlgorithm::XxHash64 => Self::XxHash64(xxhash_rust::xxh64::Xxh64::new(0)),
            HashAlgorithm::XxHash3 => Self::XxHash3(xxhash_rust::xxh3::Xxh3::new()),
        }
    }

    /// Get the algorithm this hasher uses
    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Md5(_) => HashAlgorithm::Md5,
            Self::Sha1(_) => HashAlgorithm::Sha1,
            Self::Sha224(_) => HashAlgorithm::Sha224,
            Self::Sha256(_) => HashAlgorithm::Sha256,
            Self::Sha384(_) => HashAlgorithm::Sha384,
            Self::Sha512(_) => HashAlgorithm::Sha512,
            Self::Sha3_256(_) => HashAlgorithm::Sha3_256,
            Self::Sha3_384(_) => HashAlgorithm::Sha3_384,
            Self::Sha3_512(_) => HashAlgorithm::Sha3_512,
            Self::Blake3(_) => HashAlgorithm::Blake3,
            Self::XxHash64(_) => HashAlgorithm::XxHash64,
            Self::XxHash3(_) => HashAlgorithm::XxHash3,
        }
    }

    /// Update the hasher with more data
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => h.update(data),
            Self::Sha1(h) => h.update(data),
            Self::Sha224(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha384(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
            Self::Sha3_256(h) => h.update(data),
            Self::Sha3_384(h) => h.update(data),
            Self::Sha3_512(h) => h.update(data),
            Self::Blake3(h) => {
                h.update(data);
            }
            Self::XxHash64(h) => h.update(data),
            Self::XxHash3(h) => h.update(data),
        }
    }

    /// Finalize and get the raw digest bytes
    ///
    /// xxHash values are emitted big-endian so their hex form matches the
    /// canonical `xxhsum` output.
    pub fn finalize_bytes(self) -> Vec<u8> {
        match self {
            Self::Md5(h) => h.finalize().to_vec(),
            Self::Sha1(h) => h.finalize().to_vec(),
            Self::Sha224(h) => h.finalize().to_vec(),
            Self::Sha256(h) => h.finalize().to_vec(),
            Self::Sha384(h) => h.finalize().to_vec(),
            Self::Sha512(h) => h.finalize().to_vec(),
            Self::Sha3_256(h) => h.finalize().to_vec(),
            Self::Sha3_384(h) => h.finalize().to_vec(),
            Self::Sha3_512(h) => h.finalize().to_vec(),
            Self::Blake3(h) => h.finalize().as_bytes().to_vec(),
            Self::XxHash64(h) => h.digest().to_be_bytes().to_vec(),
            Self::XxHash3(h) => h.digest128().to_be_bytes().to_vec(),
        }
    }

    /// Finalize and get the hash as hex string
    pub fn finalize(self, uppercase: bool) -> String {
        encode_hex(&self.finalize_bytes(), uppercase)
    }
}

/// Hex-encode a digest in the requested case
pub fn encode_hex(bytes: &[u8], uppercase: bool) -> String {
    if uppercase {
        hex::encode_upper(bytes)
    } else {
        hex::encode(bytes)
    }
}

/// Compute a digest of data in memory
pub fn digest_bytes(data: &[u8], algorithm: HashAlgorithm, uppercase: bool) -> DigestOutput {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    DigestOutput::new(algorithm, hasher.finalize(uppercase), data.len() as u64)
}

/// Streaming hasher that also counts the bytes it has seen
pub struct StreamingHasher {
    hasher: Hasher,
    bytes_processed: u64,
}

impl StreamingHasher {
    /// Create a new streaming hasher
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            hasher: Hasher::new(algorithm),
            bytes_processed: 0,
        }
    }

    /// Process a chunk of data
    pub fn process(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.bytes_processed += data.len() as u64;
    }

    /// Get bytes processed so far
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_processed
    }

    /// Finalize and get the result
    pub fn finalize(self, uppercase: bool) -> DigestOutput {
        let algorithm = self.hasher.algorithm();
        DigestOutput::new(algorithm, self.hasher.finalize(uppercase), self.bytes_processed)
    }
}

/// One row of a benchmark run
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSample {
    /// Algorithm measured
    pub algorithm: HashAlgorithm,
    /// Mean time per pass
    pub duration: Duration,
    /// Throughput in MiB/s
    pub throughput_mibps: f64,
}

/// Benchmark hash algorithms, fastest first
pub fn benchmark_algorithms(data_size: usize) -> Vec<BenchmarkSample> {
    let data: Vec<u8> = (0..data_size).map(|i| (i % 256) as u8).collect();
    let mut results = Vec::with_capacity(HashAlgorithm::ALL.len());

    for algorithm in HashAlgorithm::ALL {
        let start = Instant::now();
        let iterations = 10;

        for _ in 0..iterations {
            digest_bytes(&data, algorithm, false);
        }

        let duration = start.elapsed() / iterations;
        let secs = duration.as_secs_f64().max(f64::EPSILON);
        let throughput_mibps = (data_size as f64) / secs / (1024.0 * 1024.0);

        results.push(BenchmarkSample {
            algorithm,
            duration,
            throughput_mibps,
        });
    }

    results.sort_by(|a, b| a.duration.cmp(&b.duration));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_of(data: &[u8], algorithm: HashAlgorithm) -> String {
        digest_bytes(data, algorithm, false).hex
    }

    #[test]
    fn test_known_answers() {
        assert_eq!(hex_of(b"hello", HashAlgorithm::Md5), "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(
            hex_of(b"hello", HashAlgorithm::Sha1),
            "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
        );
        assert_eq!(
            hex_of(b"hello", HashAlgorithm::Sha256),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(
            hex_of(b"", HashAlgorithm::Sha512),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
        assert_eq!(
            hex_of(b"", HashAlgorithm::Sha3_256),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(
            hex_of(b"", HashAlgorithm::Blake3),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
        assert_eq!(hex_of(b"", HashAlgorithm::XxHash64), "ef46db3751d8e999");
    }

    #[test]
    fn test_output_lengths() {
        for algorithm in HashAlgorithm::ALL {
            let output = digest_bytes(b"Hello, World!", algorithm, false);
            assert_eq!(output.hex.len(), algorithm.hex_len(), "{}", algorithm);
            assert_eq!(output.input_len, 13);
        }
    }

    #[test]
    fn test_uppercase_encoding() {
        let lower = digest_bytes(b"hello", HashAlgorithm::Sha256, false);
        let upper = digest_bytes(b"hello", HashAlgorithm::Sha256, true);
        assert_eq!(upper.hex, lower.hex.to_uppercase());
        assert!(lower.matches(&upper));
    }

    #[test]
    fn test_streaming_hasher() {
        for algorithm in HashAlgorithm::ALL {
            let mut hasher = StreamingHasher::new(algorithm);
            hasher.process(b"Hello, ");
            hasher.process(b"World!");
            assert_eq!(hasher.bytes_processed(), 13);

            let result = hasher.finalize(false);
            let direct = digest_bytes(b"Hello, World!", algorithm, false);
            assert_eq!(result, direct);
        }
    }

    #[test]
    fn test_benchmark_covers_all() {
        let results = benchmark_algorithms(4096);
        assert_eq!(results.len(), HashAlgorithm::ALL.len());
        assert!(results.windows(2).all(|w| w[0].duration <= w[1].duration));
    }
}
