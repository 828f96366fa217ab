//! Speech engine abstraction
//!
//! Provides a unified interface for text-to-speech across backends. The
//! dispatch policy drives these methods and never touches a concrete
//! engine directly.

use crate::identify::LanguageTag;
use crate::{PolysayError, Result};
use log::{info, warn};

/// Result of configuring the engine for a language
///
/// Engines report three states, but the dispatch policy only ever branches
/// two ways: a language either works or it triggers the fallback. The
/// trichotomy stays in the type and collapses through [`usable`].
///
/// [`usable`]: LanguageSupport::usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSupport {
    /// A voice for the language is selected and ready
    Supported,
    /// The engine has no voice for the language
    Unsupported,
    /// The engine knows the language but its data isn't installed, or the
    /// voice inventory can't be read at all
    MissingData,
}

impl LanguageSupport {
    /// Can synthesis proceed with this language?
    pub fn usable(self) -> bool {
        matches!(self, LanguageSupport::Supported)
    }
}

/// Result of handing an utterance to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// The engine queued the utterance
    Accepted,
    /// The engine refused the utterance at dispatch time
    Rejected,
}

/// Speech engine trait
///
/// All backends implement this to provide text-to-speech. Language
/// switching is part of the contract because the whole application is
/// about speaking text in whatever language it turns out to be.
pub trait SpeechEngine: Send {
    /// Configure the engine to speak the given language
    fn set_language(&mut self, tag: &LanguageTag) -> Result<LanguageSupport>;

    /// Queue an utterance; `flush` discards anything already queued
    fn speak(&mut self, text: &str, flush: bool) -> Result<SpeakOutcome>;

    /// Silence the current utterance
    fn stop(&mut self) -> Result<()>;

    /// Is an utterance currently being spoken?
    fn is_speaking(&mut self) -> bool;

    /// Speech rate as a multiplier over the engine's normal rate
    fn set_rate(&mut self, factor: f32) -> Result<()>;

    /// Pitch as a multiplier over the engine's normal pitch
    fn set_pitch(&mut self, factor: f32) -> Result<()>;

    /// Languages the engine can speak, for display
    fn available_languages(&mut self) -> Result<Vec<LanguageTag>>;
}

/// Create a speech engine for the configured backend
///
/// `auto` tries the native platform engine first, then espeak-ng. When no
/// backend comes up, the placeholder engine is installed instead of
/// aborting startup: the menu stays usable and each speech control reports
/// the problem when actually used.
pub fn create_engine(backend: &str) -> Box<dyn SpeechEngine> {
    use super::backends::espeak::EspeakEngine;
    use super::backends::native::NativeEngine;

    let try_native = backend == "auto" || backend == "native";
    let try_espeak = backend == "auto" || backend == "espeak";

    if !try_native && !try_espeak {
        warn!("Unknown speech backend '{}', using auto selection", backend);
        return create_engine("auto");
    }

    if try_native {
        info!("Trying native TTS backend...");
        match NativeEngine::new() {
            Ok(engine) => {
                info!("Initialized native TTS backend");
                return Box::new(engine);
            }
            Err(e) => {
                info!("Native TTS backend unavailable: {}", e);
            }
        }
    }

    if try_espeak {
        info!("Trying espeak-ng backend...");
        match EspeakEngine::new() {
            Ok(engine) => {
                info!("Initialized espeak-ng backend");
                return Box::new(engine);
            }
            Err(e) => {
                info!("espeak-ng backend unavailable: {}", e);
            }
        }
    }

    warn!("No speech backend available; speech controls will fail on use");
    Box::new(UninitEngine)
}

/// Placeholder engine used when no backend initialized
///
/// Every operation fails lazily with the same error, so the rest of the
/// application keeps working without sprinkling engine-presence checks.
pub struct UninitEngine;

impl UninitEngine {
    fn err() -> PolysayError {
        PolysayError::Speech("speech engine not initialized".to_string())
    }
}

impl SpeechEngine for UninitEngine {
    fn set_language(&mut self, _tag: &LanguageTag) -> Result<LanguageSupport> {
        Err(Self::err())
    }

    fn speak(&mut self, _text: &str, _flush: bool) -> Result<SpeakOutcome> {
        Err(Self::err())
    }

    fn stop(&mut self) -> Result<()> {
        Err(Self::err())
    }

    fn is_speaking(&mut self) -> bool {
        false
    }

    fn set_rate(&mut self, _factor: f32) -> Result<()> {
        Err(Self::err())
    }

    fn set_pitch(&mut self, _factor: f32) -> Result<()> {
        Err(Self::err())
    }

    fn available_languages(&mut self) -> Result<Vec<LanguageTag>> {
        Err(Self::err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_collapses_the_trichotomy() {
        assert!(LanguageSupport::Supported.usable());
        assert!(!LanguageSupport::Unsupported.usable());
        assert!(!LanguageSupport::MissingData.usable());
    }

    #[test]
    fn test_uninit_engine_fails_lazily() {
        let mut engine = UninitEngine;
        assert!(engine.set_language(&LanguageTag::new("en")).is_err());
        assert!(engine.speak("hello", true).is_err());
        assert!(engine.stop().is_err());
        assert!(engine.available_languages().is_err());
        assert!(!engine.is_speaking());
    }

    #[test]
    fn test_create_engine_unknown_backend_falls_back() {
        // Must not panic or loop; worst case is the placeholder engine
        let _engine = create_engine("bogus");
    }
}
