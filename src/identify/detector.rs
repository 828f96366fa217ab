//! whatlang-backed language identification
//!
//! whatlang reports ISO 639-3 codes while speech engines key their voices
//! off BCP-47 primary subtags, so detection results pass through a small
//! code table on the way out.

use super::{LanguageGuess, LanguageIdentifier, LanguageTag};
use crate::{PolysayError, Result};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use whatlang::{Detector, Lang};

/// ISO 639-3 to BCP-47 primary subtag, for the languages whatlang reports.
/// Codes missing from the table pass through unchanged.
static ISO639_3_TO_BCP47: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("afr", "af"),
        ("ara", "ar"),
        ("aze", "az"),
        ("bel", "be"),
        ("ben", "bn"),
        ("bul", "bg"),
        ("cat", "ca"),
        ("ces", "cs"),
        ("cmn", "zh"),
        ("dan", "da"),
        ("deu", "de"),
        ("ell", "el"),
        ("eng", "en"),
        ("epo", "eo"),
        ("est", "et"),
        ("fin", "fi"),
        ("fra", "fr"),
        ("guj", "gu"),
        ("heb", "he"),
        ("hin", "hi"),
        ("hrv", "hr"),
        ("hun", "hu"),
        ("hye", "hy"),
        ("ind", "id"),
        ("ita", "it"),
        ("jpn", "ja"),
        ("kan", "kn"),
        ("kat", "ka"),
        ("khm", "km"),
        ("kor", "ko"),
        ("lav", "lv"),
        ("lit", "lt"),
        ("mal", "ml"),
        ("mar", "mr"),
        ("mya", "my"),
        ("nld", "nl"),
        ("nob", "nb"),
        ("pan", "pa"),
        ("pes", "fa"),
        ("pol", "pl"),
        ("por", "pt"),
        ("ron", "ro"),
        ("rus", "ru"),
        ("slk", "sk"),
        ("spa", "es"),
        ("srp", "sr"),
        ("swe", "sv"),
        ("tam", "ta"),
        ("tel", "te"),
        ("tgl", "tl"),
        ("tha", "th"),
        ("tur", "tr"),
        ("ukr", "uk"),
        ("urd", "ur"),
        ("vie", "vi"),
        ("zul", "zu"),
    ])
});

/// Convert a whatlang language to a speakable tag
fn lang_to_tag(lang: Lang) -> LanguageTag {
    let code = lang.code();
    let tag = ISO639_3_TO_BCP47.get(code).copied().unwrap_or(code);
    LanguageTag::new(tag)
}

/// Language identifier backed by whatlang
pub struct WhatlangIdentifier {
    /// Below this confidence the single-guess operation reports `und`
    confidence_threshold: f64,

    /// Cap on the ranked candidate list
    max_candidates: usize,
}

impl WhatlangIdentifier {
    pub fn new(confidence_threshold: f64, max_candidates: usize) -> Self {
        Self {
            confidence_threshold,
            max_candidates: max_candidates.max(1),
        }
    }
}

impl Default for WhatlangIdentifier {
    fn default() -> Self {
        Self::new(0.5, 3)
    }
}

impl LanguageIdentifier for WhatlangIdentifier {
    fn identify_language(&self, text: &str) -> Result<LanguageTag> {
        match whatlang::detect(text) {
            Some(info) if info.confidence() >= self.confidence_threshold => {
                let tag = lang_to_tag(info.lang());
                debug!(
                    "Identified {} (confidence {:.2})",
                    tag,
                    info.confidence()
                );
                Ok(tag)
            }
            Some(info) => {
                debug!(
                    "Confidence {:.2} for {} below threshold, reporting undetermined",
                    info.confidence(),
                    info.lang().code()
                );
                Ok(LanguageTag::undetermined())
            }
            None => {
                debug!("No detectable language, reporting undetermined");
                Ok(LanguageTag::undetermined())
            }
        }
    }

    fn identify_possible_languages(&self, text: &str) -> Result<Vec<LanguageGuess>> {
        // whatlang only exposes a best guess, so the ranked list is built
        // by re-running detection with prior answers denylisted
        let mut guesses: Vec<LanguageGuess> = Vec::new();
        let mut excluded: Vec<Lang> = Vec::new();

        while guesses.len() < self.max_candidates {
            let info = if excluded.is_empty() {
                whatlang::detect(text)
            } else {
                Detector::with_denylist(excluded.clone()).detect(text)
            };

            match info {
                Some(info) => {
                    excluded.push(info.lang());
                    guesses.push(LanguageGuess {
                        tag: lang_to_tag(info.lang()),
                        confidence: info.confidence(),
                    });
                }
                None => break,
            }
        }

        if guesses.is_empty() {
            return Err(PolysayError::Identify(
                "no candidate languages for text".to_string(),
            ));
        }

        debug!(
            "Candidates: {:?}",
            guesses.iter().map(|g| g.tag.as_str()).collect::<Vec<_>>()
        );
        Ok(guesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping() {
        assert_eq!(lang_to_tag(Lang::Fra).as_str(), "fr");
        assert_eq!(lang_to_tag(Lang::Cmn).as_str(), "zh");
        assert_eq!(lang_to_tag(Lang::Jpn).as_str(), "ja");
    }

    #[test]
    fn test_identifies_script_unambiguous_text() {
        // Kana makes Japanese unambiguous for whatlang
        let identifier = WhatlangIdentifier::default();
        let tag = identifier
            .identify_language("こんにちは、中国。私は中国が好きです。")
            .expect("identification should not error");
        assert_eq!(tag.as_str(), "ja");
    }

    #[test]
    fn test_empty_text_is_undetermined() {
        let identifier = WhatlangIdentifier::default();
        let tag = identifier
            .identify_language("")
            .expect("identification should not error");
        assert!(tag.is_undetermined());
    }

    #[test]
    fn test_threshold_forces_undetermined() {
        // Confidence tops out at 1.0, so a threshold above that always
        // yields the sentinel no matter what the text is
        let identifier = WhatlangIdentifier::new(1.01, 3);
        let tag = identifier
            .identify_language("The quick brown fox jumps over the lazy dog.")
            .expect("identification should not error");
        assert!(tag.is_undetermined());
    }

    #[test]
    fn test_candidates_are_distinct_and_capped() {
        let identifier = WhatlangIdentifier::new(0.5, 3);
        let guesses = identifier
            .identify_possible_languages(
                "The quick brown fox jumps over the lazy dog. \
                 This sentence is definitely written in the English language.",
            )
            .expect("candidate identification should succeed");

        assert!(!guesses.is_empty());
        assert!(guesses.len() <= 3);
        assert_eq!(guesses[0].tag.as_str(), "en");

        let mut tags: Vec<&str> = guesses.iter().map(|g| g.tag.as_str()).collect();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), guesses.len(), "candidates must be distinct");
    }

    #[test]
    fn test_no_candidates_is_an_error() {
        let identifier = WhatlangIdentifier::default();
        assert!(identifier.identify_possible_languages("").is_err());
    }
}
