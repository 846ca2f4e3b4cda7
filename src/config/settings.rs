//! Configuration settings for TextHash
//!
//! Defines the CLI arguments, the algorithm catalogue with its display
//! grouping, and the runtime configuration derived from both.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// TextHash - generate and verify text digests
#[derive(Parser, Debug, Clone)]
#[command(name = "texthash")]
#[command(author = "TextHash Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate, compare and copy text hashes")]
#[command(long_about = r#"
TextHash computes digests of text with MD5, SHA-1, SHA-2, SHA-3, BLAKE3
and xxHash, verifies a text against an expected digest, and copies results
to the clipboard.

Examples:
  texthash hash hello                         # SHA-256 of "hello"
  texthash hash hello -a md5 --uppercase      # Uppercase MD5
  echo -n hello | texthash all                # Every algorithm
  texthash verify hello --expected 2cf24d...  # Compare against a digest
  texthash hmac "message" --key secret        # HMAC-SHA-256
  texthash interactive                        # Line-driven session
"#)]
pub struct CliArgs {
    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Clipboard backend used by --copy and :copy
    #[arg(long, value_enum, default_value = "auto", env = "TEXTHASH_CLIPBOARD", global = true)]
    pub clipboard: ClipboardBackend,

    /// How long the "copied" indicator stays on (e.g., 2s, 500ms)
    #[arg(long, default_value = "2s", value_name = "DURATION", global = true)]
    pub copy_reset_delay: String,

    /// Maximum input size (e.g., 16M, 0 = unlimited)
    #[arg(long, default_value = "16M", value_name = "SIZE", global = true)]
    pub max_input: String,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Where a command reads its text from
#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Text to hash (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file instead
    #[arg(short = 'f', long, value_name = "PATH", conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Hash text with one algorithm
    #[command(name = "hash")]
    Hash {
        /// Text source
        #[command(flatten)]
        input: InputArgs,
        /// Hash algorithm
        #[arg(short, long, default_value = "sha256", value_parser = AlgorithmParser)]
        algorithm: HashAlgorithm,
        /// Emit uppercase hex
        #[arg(short, long)]
        uppercase: bool,
        /// Copy the digest to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Hash text with every algorithm
    #[command(name = "all")]
    All {
        /// Text source
        #[command(flatten)]
        input: InputArgs,
        /// Emit uppercase hex
        #[arg(short, long)]
        uppercase: bool,
    },

    /// Check text against an expected digest
    #[command(name = "verify")]
    Verify {
        /// Text source
        #[command(flatten)]
        input: InputArgs,
        /// Expected digest in hex
        #[arg(short, long, value_name = "HASH")]
        expected: String,
        /// Hash algorithm
        #[arg(short, long, default_value = "sha256", value_parser = AlgorithmParser)]
        algorithm: HashAlgorithm,
    },

    /// Keyed digest (HMAC)
    #[command(name = "hmac")]
    Hmac {
        /// Text source
        #[command(flatten)]
        input: InputArgs,
        /// Secret key
        #[arg(short, long, env = "TEXTHASH_HMAC_KEY", hide_env_values = true)]
        key: String,
        /// Hash algorithm
        #[arg(short, long, default_value = "sha256", value_parser = AlgorithmParser)]
        algorithm: HashAlgorithm,
        /// Emit uppercase hex
        #[arg(short, long)]
        uppercase: bool,
    },

    /// List supported algorithms by group
    #[command(name = "algorithms")]
    Algorithms,

    /// Interactive session (type text, use :help for commands)
    #[command(name = "interactive")]
    Interactive {
        /// Initial algorithm
        #[arg(short, long, default_value = "sha256", value_parser = AlgorithmParser)]
        algorithm: HashAlgorithm,
        /// Start with uppercase output
        #[arg(short, long)]
        uppercase: bool,
    },

    /// Measure algorithm throughput
    #[command(name = "benchmark")]
    Benchmark {
        /// Amount of synthetic data to hash
        #[arg(long, default_value = "10M")]
        size: String,
    },
}

/// Hash algorithm identifiers
#[derive(
    ValueEnum, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum HashAlgorithm {
    /// MD5 - broken, checksums only
    #[value(name = "md5")]
    #[serde(rename = "md5")]
    Md5,
    /// SHA-1 - broken, legacy interop only
    #[value(name = "sha1")]
    #[serde(rename = "sha1")]
    Sha1,
    /// SHA-224
    #[value(name = "sha224")]
    #[serde(rename = "sha224")]
    Sha224,
    /// SHA-256 - standard cryptographic hash
    #[default]
    #[value(name = "sha256")]
    #[serde(rename = "sha256")]
    Sha256,
    /// SHA-384
    #[value(name = "sha384")]
    #[serde(rename = "sha384")]
    Sha384,
    /// SHA-512
    #[value(name = "sha512")]
    #[serde(rename = "sha512")]
    Sha512,
    /// SHA3-256
    #[value(name = "sha3-256")]
    #[serde(rename = "sha3-256")]
    Sha3_256,
    /// SHA3-384
    #[value(name = "sha3-384")]
    #[serde(rename = "sha3-384")]
    Sha3_384,
    /// SHA3-512
    #[value(name = "sha3-512")]
    #[serde(rename = "sha3-512")]
    Sha3_512,
    /// BLAKE3 - fast and cryptographically secure
    #[value(name = "blake3")]
    #[serde(rename = "blake3")]
    Blake3,
    /// XXHash64 - fast, non-cryptographic (64-bit)
    #[value(name = "xxhash64")]
    #[serde(rename = "xxhash64")]
    XxHash64,
    /// XXHash3 - ultra fast, non-cryptographic (128-bit)
    #[value(name = "xxhash3")]
    #[serde(rename = "xxhash3")]
    XxHash3,
}

impl HashAlgorithm {
    /// Every algorithm, in declaration order
    pub const ALL: [HashAlgorithm; 12] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Blake3,
        Self::XxHash64,
        Self::XxHash3,
    ];

    /// Get the output size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 | Self::Sha3_256 | Self::Blake3 => 32,
            Self::Sha384 | Self::Sha3_384 => 48,
            Self::Sha512 | Self::Sha3_512 => 64,
            Self::XxHash64 => 8,
            Self::XxHash3 => 16,
        }
    }

    /// Length of the hex digest
    pub fn hex_len(&self) -> usize {
        self.output_size() * 2
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake3 => "BLAKE3",
            Self::XxHash64 => "XXH64",
            Self::XxHash3 => "XXH3-128",
        }
    }

    /// Name accepted on the command line
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha3_256 => "sha3-256",
            Self::Sha3_384 => "sha3-384",
            Self::Sha3_512 => "sha3-512",
            Self::Blake3 => "blake3",
            Self::XxHash64 => "xxhash64",
            Self::XxHash3 => "xxhash3",
        }
    }

    /// Display group this algorithm belongs to
    pub fn group(&self) -> AlgorithmGroup {
        match self {
            Self::Md5 | Self::Sha1 => AlgorithmGroup::Legacy,
            Self::Sha224 | Self::Sha256 | Self::Sha384 | Self::Sha512 => AlgorithmGroup::Sha2,
            Self::Sha3_256 | Self::Sha3_384 | Self::Sha3_512 => AlgorithmGroup::Sha3,
            Self::Blake3 => AlgorithmGroup::Modern,
            Self::XxHash64 | Self::XxHash3 => AlgorithmGroup::NonCryptographic,
        }
    }

    /// Whether an HMAC construction exists for this algorithm
    pub fn supports_hmac(&self) -> bool {
        !matches!(self, Self::Blake3 | Self::XxHash64 | Self::XxHash3)
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = crate::error::HashToolError;

    /// Accepts `sha3-256`, `SHA3-256`, `sha3_256`, `SHA256`, `sha-256`, `xxh3-128`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        HashAlgorithm::ALL
            .into_iter()
            .find(|algo| {
                normalize_name(algo.cli_name()) == wanted || normalize_name(algo.name()) == wanted
            })
            .ok_or_else(|| crate::error::HashToolError::UnknownAlgorithm(s.trim().to_string()))
    }
}

// SHA3 keeps its separator so "sha3-256" never collides with "sha-256",
// and "sha384" is never read as SHA3 with a truncated suffix.
fn normalize_name(s: &str) -> String {
    let lower = s.trim().to_ascii_lowercase().replace('_', "-");
    if let Some(rest) = lower.strip_prefix("sha3-") {
        return format!("sha3:{}", rest);
    }
    lower.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Command-line parser for `-a/--algorithm`
///
/// Accepts everything `HashAlgorithm::from_str` does while still listing
/// the canonical names in `--help`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlgorithmParser;

impl clap::builder::TypedValueParser for AlgorithmParser {
    type Value = HashAlgorithm;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let text = value.to_str().ok_or_else(|| {
            clap::Error::new(clap::error::ErrorKind::InvalidUtf8).with_cmd(cmd)
        })?;

        text.parse().map_err(|e: crate::error::HashToolError| {
            let flag = arg.map(|a| a.to_string()).unwrap_or_else(|| "--algorithm".to_string());
            clap::Error::raw(
                clap::error::ErrorKind::InvalidValue,
                format!("invalid value '{}' for '{}': {}\n", text, flag, e),
            )
            .with_cmd(cmd)
        })
    }

    fn possible_values(
        &self,
    ) -> Option<Box<dyn Iterator<Item = clap::builder::PossibleValue> + '_>> {
        Some(Box::new(
            HashAlgorithm::value_variants()
                .iter()
                .filter_map(ValueEnum::to_possible_value),
        ))
    }
}

/// Display category for algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmGroup {
    /// Broken algorithms kept for compatibility
    Legacy,
    /// SHA-2 family
    Sha2,
    /// SHA-3 family
    Sha3,
    /// Modern fast cryptographic hashes
    Modern,
    /// Checksums with no security guarantees
    NonCryptographic,
}

impl AlgorithmGroup {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Legacy => "Legacy",
            Self::Sha2 => "SHA-2",
            Self::Sha3 => "SHA-3",
            Self::Modern => "Modern",
            Self::NonCryptographic => "Non-cryptographic",
        }
    }
}

/// Algorithms grouped for display, in presentation order
pub static ALGORITHM_GROUPS: &[(AlgorithmGroup, &[HashAlgorithm])] = &[
    (AlgorithmGroup::Legacy, &[HashAlgorithm::Md5, HashAlgorithm::Sha1]),
    (
        AlgorithmGroup::Sha2,
        &[
            HashAlgorithm::Sha224,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ],
    ),
    (
        AlgorithmGroup::Sha3,
        &[HashAlgorithm::Sha3_256, HashAlgorithm::Sha3_384, HashAlgorithm::Sha3_512],
    ),
    (AlgorithmGroup::Modern, &[HashAlgorithm::Blake3]),
    (
        AlgorithmGroup::NonCryptographic,
        &[HashAlgorithm::XxHash64, HashAlgorithm::XxHash3],
    ),
];

/// Output format for reports
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Clipboard backend selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    /// External clipboard program, falling back to OSC 52
    #[default]
    Auto,
    /// External clipboard program only (pbcopy, wl-copy, xclip, ...)
    Command,
    /// OSC 52 terminal escape sequence
    Osc52,
    /// In-process buffer (nothing leaves the process)
    Memory,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Algorithm selected when none is given
    pub default_algorithm: HashAlgorithm,
    /// Emit uppercase hex
    pub uppercase: bool,
    /// How long the copied indicator stays on
    pub copy_reset_delay: Duration,
    /// Largest accepted input in bytes
    pub max_input_bytes: Option<u64>,
    /// Clipboard backend
    pub clipboard: ClipboardBackend,
    /// Output format
    pub output_format: OutputFormat,
}

/// Default delay before the copied indicator resets
pub const DEFAULT_COPY_RESET_DELAY: Duration = Duration::from_secs(2);

/// Default input size limit (16 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            default_algorithm: HashAlgorithm::Sha256,
            uppercase: false,
            copy_reset_delay: DEFAULT_COPY_RESET_DELAY,
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            clipboard: ClipboardBackend::Auto,
            output_format: OutputFormat::Text,
        }
    }
}

impl ToolConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        let mut config = Self::default();

        config.copy_reset_delay = parse_delay(&args.copy_reset_delay)
            .map_err(|e| format!("Invalid copy reset delay: {}", e))?;

        let max_input = parse_size(&args.max_input).map_err(|e| format!("Invalid max input: {}", e))?;
        config.max_input_bytes = if max_input == 0 { None } else { Some(max_input) };

        config.clipboard = args.clipboard;
        config.output_format = args.format;

        match &args.command {
            Commands::Hash { algorithm, uppercase, .. }
            | Commands::Hmac { algorithm, uppercase, .. }
            | Commands::Interactive { algorithm, uppercase } => {
                config.default_algorithm = *algorithm;
                config.uppercase = *uppercase;
            }
            Commands::Verify { algorithm, .. } => config.default_algorithm = *algorithm,
            Commands::All { uppercase, .. } => config.uppercase = *uppercase,
            Commands::Algorithms | Commands::Benchmark { .. } => {}
        }

        Ok(config)
    }
}

/// Parse human-readable size string to bytes
pub fn parse_size(size: &str) -> Result<u64, String> {
    let size = size.trim().to_uppercase();

    if size.is_empty() {
        return Err("Empty size string".to_string());
    }

    let (num_str, multiplier) = if size.ends_with("GB") || size.ends_with('G') {
        (size.trim_end_matches(['G', 'B']), 1024u64 * 1024 * 1024)
    } else if size.ends_with("MB") || size.ends_with('M') {
        (size.trim_end_matches(['M', 'B']), 1024u64 * 1024)
    } else if size.ends_with("KB") || size.ends_with('K') {
        (size.trim_end_matches(['K', 'B']), 1024u64)
    } else if size.ends_with('B') {
        (size.trim_end_matches('B'), 1u64)
    } else {
        // Assume bytes if no suffix
        (size.as_str(), 1u64)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: {}", num_str))?;

    if num < 0.0 {
        return Err(format!("Negative size: {}", num_str));
    }

    Ok((num * multiplier as f64) as u64)
}

/// Parse a humantime duration (`2s`, `500ms`, `1m 30s`)
pub fn parse_delay(delay: &str) -> Result<Duration, String> {
    humantime::parse_duration(delay.trim()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1024").unwrap(), 1024);
        assert_eq!(parse_size("1K").unwrap(), 1024);
        assert_eq!(parse_size("1KB").unwrap(), 1024);
        assert_eq!(parse_size("16M").unwrap(), 16 * 1024 * 1024);
        assert_eq!(parse_size("1.5K").unwrap(), 1536);
        assert!(parse_size("").is_err());
        assert!(parse_size("lots").is_err());
    }

    #[test]
    fn test_parse_delay() {
        assert_eq!(parse_delay("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_delay("500ms").unwrap(), Duration::from_millis(500));
        assert!(parse_delay("soon").is_err());
    }

    #[test]
    fn test_algorithm_aliases() {
        assert_eq!("SHA256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("sha-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("SHA-1".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert_eq!("sha3_256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha3_256);
        assert_eq!("SHA3-512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha3_512);
        assert_eq!("xxh3-128".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::XxHash3);
        assert_eq!(" blake3 ".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Blake3);
        assert_eq!("sha384".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha384);
        assert!("sha3-84".parse::<HashAlgorithm>().is_err());
        assert!("sha3-999".parse::<HashAlgorithm>().is_err());
        assert!("crc32".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_groups_cover_every_algorithm_once() {
        for algo in HashAlgorithm::ALL {
            let hits: Vec<_> = ALGORITHM_GROUPS
                .iter()
                .filter(|(_, members)| members.contains(&algo))
                .collect();
            assert_eq!(hits.len(), 1, "{} grouped {} times", algo, hits.len());
            assert_eq!(hits[0].0, algo.group());
        }
    }

    #[test]
    fn test_hash_algorithm() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Sha256);
        assert_eq!(HashAlgorithm::Sha256.hex_len(), 64);
        assert_eq!(HashAlgorithm::Md5.output_size(), 16);
        assert_eq!(HashAlgorithm::XxHash3.name(), "XXH3-128");
        assert!(HashAlgorithm::Sha3_384.supports_hmac());
        assert!(!HashAlgorithm::Blake3.supports_hmac());
    }

    #[test]
    fn test_config_from_cli() {
        let args = CliArgs::parse_from([
            "texthash",
            "--copy-reset-delay",
            "750ms",
            "--max-input",
            "0",
            "hash",
            "hello",
            "-a",
            "SHA512",
            "-u",
        ]);
        let config = ToolConfig::from_cli(&args).unwrap();
        assert_eq!(config.default_algorithm, HashAlgorithm::Sha512);
        assert!(config.uppercase);
        assert_eq!(config.copy_reset_delay, Duration::from_millis(750));
        assert_eq!(config.max_input_bytes, None);
    }

    #[test]
    fn test_algorithm_flag_accepts_aliases() {
        for (flag, expected) in [
            ("SHA-256", HashAlgorithm::Sha256),
            ("sha-256", HashAlgorithm::Sha256),
            ("sha3_512", HashAlgorithm::Sha3_512),
            ("XXH3-128", HashAlgorithm::XxHash3),
            ("md5", HashAlgorithm::Md5),
        ] {
            let args = CliArgs::parse_from(["texthash", "hash", "hello", "-a", flag]);
            let config = ToolConfig::from_cli(&args).unwrap();
            assert_eq!(config.default_algorithm, expected, "{}", flag);
        }

        let args = CliArgs::parse_from([
            "texthash",
            "verify",
            "hello",
            "-e",
            "ab",
            "--algorithm",
            "SHA3-384",
        ]);
        let config = ToolConfig::from_cli(&args).unwrap();
        assert_eq!(config.default_algorithm, HashAlgorithm::Sha3_384);

        let err = CliArgs::try_parse_from(["texthash", "hash", "hello", "-a", "whirlpool"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_config_rejects_bad_delay() {
        let args = CliArgs::parse_from(["texthash", "--copy-reset-delay", "later", "algorithms"]);
        assert!(ToolConfig::from_cli(&args).is_err());
    }
}
