//! Toolverse Core — shared error taxonomy and process configuration.

pub mod config;
pub mod error;

pub use config::ToolverseConfig;
pub use error::{Error, Result};
