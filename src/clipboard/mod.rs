//! Clipboard access
//!
//! A write-only text clipboard behind an async trait, the concrete
//! backends, and the indicator that tracks a recent copy.

mod backends;
mod indicator;

pub use backends::*;
pub use indicator::*;

use crate::error::Result;
use async_trait::async_trait;

/// Write-only text clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`
    async fn write_text(&self, text: &str) -> Result<()>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<C: Clipboard + ?Sized> Clipboard for Box<C> {
    async fn write_text(&self, text: &str) -> Result<()> {
        (**self).write_text(text).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
