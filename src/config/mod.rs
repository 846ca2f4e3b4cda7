//! Configuration module for TextHash
//!
//! Provides configuration management including CLI arguments,
//! the algorithm catalogue and runtime settings.

mod settings;

pub use settings::*;
