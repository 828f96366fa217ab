//! polysay - spoken sample phrases with automatic language detection
//!
//! An interactive terminal demo: pick one of the built-in phrases, and the
//! application identifies its language and speaks it aloud through a
//! text-to-speech engine, with simple rate and pitch controls.

pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod identify;
pub mod phrases;
pub mod speech;
pub mod term;

pub use error::{PolysayError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "polysay";
