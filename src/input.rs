//! Reading the text to hash
//!
//! Text comes from a command-line argument, a file, or stdin. Files and
//! stdin are read with the size limit applied before the whole input is
//! held in memory.

use crate::config::InputArgs;
use crate::error::{HashToolError, IoResultExt, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Resolve `args` to the text it names
pub fn read_input(args: &InputArgs, limit: Option<u64>) -> Result<String> {
    if let Some(text) = &args.text {
        check_limit(text.len() as u64, limit)?;
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        return read_file(path, limit);
    }

    debug!("reading input from stdin");
    read_limited(std::io::stdin().lock(), limit).map_err(|e| match e {
        HashToolError::Io { source, .. } => HashToolError::io("<stdin>", source),
        other => other,
    })
}

/// Read a UTF-8 text file subject to `limit`
pub fn read_file(path: &Path, limit: Option<u64>) -> Result<String> {
    let file = File::open(path).with_path(path)?;
    let size = file.metadata().with_path(path)?.len();
    check_limit(size, limit)?;

    read_limited(file, limit).map_err(|e| match e {
        HashToolError::Io { source, .. } => HashToolError::io(path, source),
        other => other,
    })
}

fn read_limited<R: Read>(mut reader: R, limit: Option<u64>) -> Result<String> {
    let mut bytes = Vec::new();
    match limit {
        Some(limit) => {
            // One byte past the limit is enough to know it was exceeded.
            // It may split a multi-byte character, so decode after the check.
            let read = reader.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
            check_limit(read as u64, Some(limit))?;
        }
        None => {
            reader.read_to_end(&mut bytes)?;
        }
    }

    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

fn check_limit(size: u64, limit: Option<u64>) -> Result<()> {
    match limit {
        Some(limit) if size > limit => Err(HashToolError::InputTooLarge { size, limit }),
        _ => Ok(()),
    }
}
