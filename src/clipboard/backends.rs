//! Clipboard backends
//!
//! - `MemoryClipboard` keeps the text in process
//! - `CommandClipboard` pipes it into pbcopy, wl-copy, xclip, xsel or clip.exe
//! - `Osc52Clipboard` asks the terminal to set the clipboard via OSC 52,
//!   written to stderr so stdout stays clean for digests and JSON

use super::Clipboard;
use crate::config::ClipboardBackend;
use crate::error::{HashToolError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::process::Stdio;
use std::sync::{Mutex, PoisonError};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tracing::debug;

/// In-process clipboard
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, if any
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Known clipboard programs, in probe order
const CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// Clipboard backed by an external program reading stdin
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Use an explicit program and arguments
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Find the first known clipboard program on `PATH`
    pub fn detect() -> Option<Self> {
        let path = std::env::var_os("PATH")?;
        let dirs: Vec<_> = std::env::split_paths(&path).collect();

        CLIPBOARD_PROGRAMS
            .iter()
            .find(|(program, _)| dirs.iter().any(|dir| dir.join(program).is_file()))
            .map(|(program, args)| Self::new(*program, args))
    }

    /// Program this clipboard runs
    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HashToolError::clipboard(format!("failed to start {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| HashToolError::clipboard(format!("{}: {}", self.program, e)))?;
            // Closing stdin lets the program finish
            drop(stdin);
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| HashToolError::clipboard(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(HashToolError::clipboard(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        debug!(program = %self.program, bytes = text.len(), "clipboard written");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

/// Clipboard that emits an OSC 52 escape sequence
pub struct Osc52Clipboard<W = tokio::io::Stderr> {
    writer: tokio::sync::Mutex<W>,
}

impl Osc52Clipboard<tokio::io::Stderr> {
    /// Write the escape sequence to stderr
    ///
    /// The terminal still sees it, but piped stdout never does.
    pub fn stderr() -> Self {
        Self::with_writer(tokio::io::stderr())
    }
}

impl<W> Osc52Clipboard<W> {
    /// Write the escape sequence to `writer`
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer: tokio::sync::Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// OSC 52 sequence that sets the system clipboard to `text`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

#[async_trait]
impl<W> Clipboard for Osc52Clipboard<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(osc52_sequence(text).as_bytes())
            .await
            .map_err(|e| HashToolError::clipboard(format!("osc52: {}", e)))?;
        writer
            .flush()
            .await
            .map_err(|e| HashToolError::clipboard(format!("osc52: {}", e)))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "osc52"
    }
}

/// Build the clipboard selected in configuration
pub fn from_backend(backend: ClipboardBackend) -> Result<Box<dyn Clipboard>> {
    let clipboard: Box<dyn Clipboard> = match backend {
        ClipboardBackend::Auto => match CommandClipboard::detect() {
            Some(command) => Box::new(command),
            None => Box::new(Osc52Clipboard::stderr()),
        },
        ClipboardBackend::Command => Box::new(
            CommandClipboard::detect()
                .ok_or_else(|| HashToolError::clipboard("no clipboard program found on PATH"))?,
        ),
        ClipboardBackend::Osc52 => Box::new(Osc52Clipboard::stderr()),
        ClipboardBackend::Memory => Box::new(MemoryClipboard::new()),
    };

    debug!(backend = clipboard.name(), "clipboard selected");
    Ok(clipboard)
}
