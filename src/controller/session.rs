//! Line-driven interactive session over the controller
//!
//! Plain lines become the input text and are hashed right away. Lines
//! starting with `:` are commands; `::` escapes a leading colon.

use super::HashToolController;
use crate::clipboard::Clipboard;
use crate::config::{HashAlgorithm, ALGORITHM_GROUPS};

/// Help text for `:help`
pub const SESSION_HELP: &str = "\
Type text to hash it. Commands:
  :algo NAME      select algorithm (sha256, md5, sha3-512, ...)
  :upper on|off   uppercase output
  :expect HASH    digest to verify against
  :verify         verify the current text
  :all            hash with every algorithm
  :key KEY        set the HMAC key
  :hmac           HMAC of the current text
  :copy           copy the current digest
  :state          show controller state as JSON
  :help           this text
  :quit           leave
Start a line with :: to hash text that begins with a colon.";

/// One parsed session line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// New input text, hashed immediately
    Text(String),
    /// Select algorithm
    Algorithm(HashAlgorithm),
    /// Uppercase on/off
    Uppercase(bool),
    /// Expected digest
    Expect(String),
    /// Run verification
    Verify,
    /// Hash with every algorithm
    All,
    /// Set HMAC key
    Key(String),
    /// Run HMAC
    Hmac,
    /// Copy the current digest
    Copy,
    /// Dump state
    State,
    /// Show help
    Help,
    /// Leave the session
    Quit,
}

impl SessionCommand {
    /// Parse one input line
    pub fn parse(line: &str) -> Result<Self, String> {
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Text(line.to_string()));
        };
        if command.starts_with(':') {
            return Ok(Self::Text(command.to_string()));
        }

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command.trim(), ""),
        };

        let require = |what: &str| {
            if arg.is_empty() {
                Err(format!(":{} needs {}", name, what))
            } else {
                Ok(arg.to_string())
            }
        };

        match name {
            "algo" | "a" => {
                let algo = require("an algorithm name")?;
                algo.parse().map(Self::Algorithm).map_err(|e| e.to_string())
            }
            "upper" | "u" => match arg {
                "on" | "true" | "1" | "" => Ok(Self::Uppercase(true)),
                "off" | "false" | "0" => Ok(Self::Uppercase(false)),
                other => Err(format!(":upper expects on or off, got {:?}", other)),
            },
            "expect" | "e" => require("a digest").map(Self::Expect),
            "verify" | "v" => Ok(Self::Verify),
            "all" => Ok(Self::All),
            "key" | "k" => require("a key").map(Self::Key),
            "hmac" => Ok(Self::Hmac),
            "copy" | "c" => Ok(Self::Copy),
            "state" | "s" => Ok(Self::State),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command :{} (try :help)", other)),
        }
    }
}

/// What the session should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    /// Print these lines and keep going
    Lines(Vec<String>),
    /// Leave the session
    Quit,
}

impl SessionReply {
    fn line(text: impl Into<String>) -> Self {
        Self::Lines(vec![text.into()])
    }
}

/// Apply one command to the controller
pub async fn apply<C: Clipboard>(
    controller: &mut HashToolController<C>,
    command: SessionCommand,
) -> SessionReply {
    match command {
        SessionCommand::Text(text) => {
            controller.set_input(text);
            match controller.generate() {
                Some(digest) => SessionReply::line(digest),
                None => SessionReply::Lines(Vec::new()),
            }
        }
        SessionCommand::Algorithm(algorithm) => {
            controller.set_algorithm(algorithm);
            SessionReply::line(format!("algorithm: {}", algorithm))
        }
        SessionCommand::Uppercase(on) => {
            controller.set_uppercase(on);
            SessionReply::line(format!("uppercase: {}", if on { "on" } else { "off" }))
        }
        SessionCommand::Expect(hash) => {
            controller.set_expected_hash(hash);
            SessionReply::line("expected digest set")
        }
        SessionCommand::Verify => SessionReply::line(controller.verify().to_string()),
        SessionCommand::All => match controller.generate_all() {
            Some(hashes) => {
                let mut lines = Vec::with_capacity(hashes.len());
                for (_, members) in ALGORITHM_GROUPS {
                    for algorithm in members.iter() {
                        if let Some(digest) = hashes.get(algorithm) {
                            lines.push(format!("{:<9} {}", algorithm.name(), digest));
                        }
                    }
                }
                SessionReply::Lines(lines)
            }
            None => SessionReply::Lines(Vec::new()),
        },
        SessionCommand::Key(key) => {
            controller.set_hmac_key(key);
            SessionReply::line("HMAC key set")
        }
        SessionCommand::Hmac => match controller.generate_hmac() {
            Some(mac) => SessionReply::line(mac),
            None => SessionReply::Lines(Vec::new()),
        },
        SessionCommand::Copy => {
            if controller.copy_output().await {
                SessionReply::line("copied")
            } else {
                SessionReply::line("nothing copied")
            }
        }
        SessionCommand::State => match serde_json::to_string_pretty(&controller.snapshot()) {
            Ok(json) => SessionReply::line(json),
            Err(e) => SessionReply::line(format!("state unavailable: {}", e)),
        },
        SessionCommand::Help => SessionReply::line(SESSION_HELP),
        SessionCommand::Quit => SessionReply::Quit,
    }
}
