//! Language identification
//!
//! The dispatch policy treats the identifier as a black box behind the
//! [`LanguageIdentifier`] trait: a single best guess, and a ranked list of
//! candidates for the fallback path. The default backend sits on whatlang.

pub mod detector;

pub use detector::WhatlangIdentifier;

use crate::Result;
use std::fmt;

/// A BCP-47 style language tag ("en", "zh", "pt-br")
///
/// Tags are stored lowercased. The literal tag `und` is the undetermined
/// sentinel: identification succeeded but produced no usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// The sentinel tag for text whose language could not be determined
    pub const UNDETERMINED: &'static str = "und";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().to_ascii_lowercase())
    }

    pub fn undetermined() -> Self {
        Self(Self::UNDETERMINED.to_string())
    }

    pub fn is_undetermined(&self) -> bool {
        self.0 == Self::UNDETERMINED
    }

    /// Primary language subtag ("pt" for "pt-br")
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One ranked language guess
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageGuess {
    pub tag: LanguageTag,

    /// Confidence in the range 0.0 to 1.0
    pub confidence: f64,
}

/// Language identification backend
///
/// Both operations are fallible; the dispatch policy recovers from errors
/// by advancing its fallback rather than treating them as fatal.
pub trait LanguageIdentifier: Send {
    /// Best single guess for the language of `text`
    ///
    /// Returns the `und` sentinel when the text can't be classified with
    /// enough confidence.
    fn identify_language(&self, text: &str) -> Result<LanguageTag>;

    /// Ranked candidate languages for `text`, best first
    fn identify_possible_languages(&self, text: &str) -> Result<Vec<LanguageGuess>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_normalization() {
        assert_eq!(LanguageTag::new("PT-BR").as_str(), "pt-br");
        assert_eq!(LanguageTag::new("pt-br").primary(), "pt");
        assert_eq!(LanguageTag::new("fr").primary(), "fr");
    }

    #[test]
    fn test_undetermined_sentinel() {
        assert!(LanguageTag::undetermined().is_undetermined());
        assert!(LanguageTag::new("und").is_undetermined());
        assert!(!LanguageTag::new("en").is_undetermined());
    }
}
