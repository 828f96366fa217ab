//! Speech synthesis system

pub mod backends;
pub mod engine;

pub use engine::{create_engine, LanguageSupport, SpeakOutcome, SpeechEngine};
