//! Speech dispatch policy
//!
//! The one piece of real decision logic in the application: given a piece
//! of text, pick a language the engine can actually speak and hand the
//! utterance over, walking a ranked candidate list when the best guess is
//! rejected.

use crate::identify::{LanguageIdentifier, LanguageTag};
use crate::speech::{SpeakOutcome, SpeechEngine};
use crate::Result;
use log::{debug, warn};

/// Terminal outcome of one speak action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// The engine accepted an utterance
    Success,
    /// The fallback ended on a language the engine can't speak
    LanguageUnavailable,
    /// Identification failed or no candidate was accepted
    SynthesisFailed,
}

/// Sink for user-visible transient notices
///
/// The terminal front end prints these; tests capture them.
pub trait NoticeSink: Send {
    fn notify(&mut self, message: &str);
}

/// Drives identification and synthesis for one utterance at a time
///
/// Owns the identifier and the engine so the front end only ever touches
/// one handle for everything speech-related.
pub struct SpeechDispatcher {
    identifier: Box<dyn LanguageIdentifier>,
    engine: Box<dyn SpeechEngine>,
    notices: Box<dyn NoticeSink>,
}

impl SpeechDispatcher {
    pub fn new(
        identifier: Box<dyn LanguageIdentifier>,
        engine: Box<dyn SpeechEngine>,
        notices: Box<dyn NoticeSink>,
    ) -> Self {
        Self {
            identifier,
            engine,
            notices,
        }
    }

    /// Speak `text`, choosing the language automatically
    ///
    /// The identifier's best guess is tried first; when it is undetermined,
    /// unsupported, or rejected at dispatch, the ranked candidate list is
    /// walked in order until the engine accepts an utterance.
    pub fn speak(&mut self, text: &str) -> Result<SynthesisOutcome> {
        // A new action always silences the previous utterance first
        if self.engine.is_speaking() {
            self.engine.stop()?;
        }

        match self.identifier.identify_language(text) {
            Ok(tag) if tag.is_undetermined() => {
                // An undetermined answer is handled exactly like an
                // unsupported language: the guess can't be verified, so
                // the engine isn't even asked
                debug!("Identification returned undetermined");
            }
            Ok(tag) => {
                debug!("Identified language {}", tag);
                if self.engine.set_language(&tag)?.usable() {
                    match self.engine.speak(text, true)? {
                        SpeakOutcome::Accepted => return Ok(SynthesisOutcome::Success),
                        SpeakOutcome::Rejected => {
                            debug!("Utterance rejected for {}", tag);
                        }
                    }
                } else {
                    debug!("Language {} not usable", tag);
                }
            }
            Err(e) => {
                debug!("Identification failed: {}", e);
            }
        }

        self.speak_from_candidates(text)
    }

    /// Fallback path: walk the ranked candidate list
    fn speak_from_candidates(&mut self, text: &str) -> Result<SynthesisOutcome> {
        let candidates = match self.identifier.identify_possible_languages(text) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Candidate identification failed: {}", e);
                self.notices.notify("language identification failed");
                return Ok(SynthesisOutcome::SynthesisFailed);
            }
        };

        debug!(
            "Trying {} candidate language(s): {:?}",
            candidates.len(),
            candidates.iter().map(|c| c.tag.as_str()).collect::<Vec<_>>()
        );

        let mut outcome = SynthesisOutcome::SynthesisFailed;
        let last = candidates.len().saturating_sub(1);

        for (i, candidate) in candidates.iter().enumerate() {
            if !self.engine.set_language(&candidate.tag)?.usable() {
                debug!(
                    "Candidate {} (confidence {:.2}) not usable",
                    candidate.tag, candidate.confidence
                );
                // Only the last candidate surfaces a notice; earlier ones
                // fail silently. Kept bug-for-bug from the original.
                if i == last {
                    self.notices
                        .notify(&format!("language not supported: {}", candidate.tag));
                    outcome = SynthesisOutcome::LanguageUnavailable;
                }
                continue;
            }

            match self.engine.speak(text, true)? {
                SpeakOutcome::Accepted => {
                    debug!("Spoke with candidate {}", candidate.tag);
                    return Ok(SynthesisOutcome::Success);
                }
                SpeakOutcome::Rejected => {
                    debug!("Utterance rejected for candidate {}", candidate.tag);
                }
            }
        }

        Ok(outcome)
    }

    /// Silence any current utterance
    pub fn stop(&mut self) -> Result<()> {
        self.engine.stop()
    }

    /// Apply a rate multiplier to the engine
    pub fn set_rate(&mut self, factor: f32) -> Result<()> {
        self.engine.set_rate(factor)
    }

    /// Apply a pitch multiplier to the engine
    pub fn set_pitch(&mut self, factor: f32) -> Result<()> {
        self.engine.set_pitch(factor)
    }

    /// Languages the engine reports as speakable
    pub fn available_languages(&mut self) -> Result<Vec<LanguageTag>> {
        self.engine.available_languages()
    }
}
