//! Built-in sample phrases and speech parameter choices

/// One selectable sample phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// Display label (language name)
    pub label: &'static str,

    /// Language the phrase is known to be written in
    ///
    /// Display only - dispatch always runs its own identification and
    /// never consults this field.
    pub tag: &'static str,

    /// The text submitted for synthesis
    pub content: &'static str,
}

/// The fixed phrase catalog presented in the menu
pub const PHRASES: &[Phrase] = &[
    Phrase {
        label: "Chinese",
        tag: "zh",
        content: "你好，中国。我爱中国。",
    },
    Phrase {
        label: "English",
        tag: "en",
        content: "Hello, China. I love China.",
    },
    Phrase {
        label: "Portuguese",
        tag: "pt",
        content: "Olá, China. Adoro a China.",
    },
    Phrase {
        label: "French",
        tag: "fr",
        content: "Bonjour, la Chine. J'aime la Chine.",
    },
    Phrase {
        label: "Spanish",
        tag: "es",
        content: "Hola, china. Me encanta china.",
    },
    Phrase {
        label: "Japanese",
        tag: "ja",
        content: "こんにちは、中国。私は中国が好きです。",
    },
    Phrase {
        label: "Russian",
        tag: "ru",
        content: "Здравствуйте, Китай.  Я люблю Китай.",
    },
    Phrase {
        label: "German",
        tag: "de",
        content: "Hallo, China. Ich liebe China.",
    },
];

/// Speech rate multipliers offered in the menu
///
/// Rate has no firm upper bound; engines clamp what they can't do.
pub const RATE_CHOICES: &[f32] = &[0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 3.0];

/// Index of the default rate (1.0x)
pub const DEFAULT_RATE_IDX: usize = 2;

/// Pitch multipliers offered in the menu
///
/// Engines accept pitch in roughly the 0.5 to 2.0 range.
pub const PITCH_CHOICES: &[f32] = &[0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Index of the default pitch (1.0x)
pub const DEFAULT_PITCH_IDX: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(PHRASES.len(), 8);

        for phrase in PHRASES {
            assert!(!phrase.label.is_empty());
            assert!(!phrase.content.is_empty());
            // Known tags are bare primary subtags
            assert!(phrase.tag.len() == 2, "unexpected tag {}", phrase.tag);
        }
    }

    #[test]
    fn test_defaults_are_normal_speed_and_pitch() {
        assert_eq!(RATE_CHOICES[DEFAULT_RATE_IDX], 1.0);
        assert_eq!(PITCH_CHOICES[DEFAULT_PITCH_IDX], 1.0);
    }

    #[test]
    fn test_choices_are_sorted() {
        let mut sorted = RATE_CHOICES.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(sorted, RATE_CHOICES);

        let mut sorted = PITCH_CHOICES.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(sorted, PITCH_CHOICES);
    }
}
