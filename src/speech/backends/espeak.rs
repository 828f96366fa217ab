//! espeak-ng subprocess backend
//!
//! Fallback engine for hosts without a platform TTS service. Each
//! utterance spawns one espeak-ng process; flushing kills the previous
//! one. Language support comes straight from `espeak-ng --voices`.
//!
//! Dependencies:
//! - espeak-ng (install with: sudo apt install espeak-ng)

use crate::identify::LanguageTag;
use crate::speech::{LanguageSupport, SpeakOutcome, SpeechEngine};
use crate::{PolysayError, Result};
use log::{debug, error, warn};
use std::process::{Child, Command, Stdio};

/// espeak default speed in words per minute
const NORMAL_WPM: f32 = 175.0;

/// espeak accepts speeds between these bounds
const MIN_WPM: f32 = 80.0;
const MAX_WPM: f32 = 450.0;

/// espeak pitch runs 0-99 with 50 as the default
const NORMAL_PITCH: f32 = 50.0;
const MAX_PITCH: f32 = 99.0;

/// espeak-ng backend
pub struct EspeakEngine {
    /// Currently running espeak-ng process
    current_process: Option<Child>,

    /// Voice language tags parsed from `espeak-ng --voices`
    languages: Vec<LanguageTag>,

    /// Selected voice tag
    voice: String,

    /// Rate multiplier applied when spawning
    rate: f32,

    /// Pitch multiplier applied when spawning
    pitch: f32,

    /// Path to espeak-ng
    espeak_path: String,
}

impl EspeakEngine {
    /// Create a new espeak-ng engine
    ///
    /// Verifies espeak-ng is installed and reads its voice inventory
    pub fn new() -> Result<Self> {
        debug!("Creating espeak-ng backend");

        let espeak_path = Self::find_espeak()?;
        debug!("Found espeak-ng at: {}", espeak_path);

        let languages = Self::load_languages(&espeak_path);
        debug!("espeak-ng offers {} voice languages", languages.len());

        Ok(Self {
            current_process: None,
            languages,
            voice: "en".to_string(),
            rate: 1.0,
            pitch: 1.0,
            espeak_path,
        })
    }

    /// Find espeak-ng executable
    fn find_espeak() -> Result<String> {
        let paths = vec!["espeak-ng", "/usr/bin/espeak-ng"];

        for path in paths {
            if let Ok(status) = Command::new(path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                if status.success() {
                    return Ok(path.to_string());
                }
            }
        }

        Err(PolysayError::Speech(
            "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
        ))
    }

    /// Read the voice inventory from `espeak-ng --voices`
    fn load_languages(espeak_path: &str) -> Vec<LanguageTag> {
        let output = match Command::new(espeak_path).arg("--voices").output() {
            Ok(output) if output.status.success() => output,
            _ => {
                warn!("Could not read espeak-ng voice list");
                return Vec::new();
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_voice_list(&stdout)
    }

    /// Parse `espeak-ng --voices` output into language tags
    ///
    /// A header line, then one voice per line with the language tag in the
    /// second column:
    ///
    /// ```text
    /// Pty Language       Age/Gender VoiceName         File          Other Languages
    ///  5  af              --/M      Afrikaans         gmw/af
    ///  5  fr-fr           --/M      French_(France)   roa/fr
    /// ```
    fn parse_voice_list(listing: &str) -> Vec<LanguageTag> {
        let mut tags: Vec<LanguageTag> = Vec::new();

        for line in listing.lines().skip(1) {
            let mut cols = line.split_whitespace();
            let _pty = cols.next();
            if let Some(lang) = cols.next() {
                let tag = LanguageTag::new(lang);
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }

        tags
    }

    /// Convert a rate multiplier to espeak speed in wpm
    fn rate_to_wpm(factor: f32) -> u16 {
        (NORMAL_WPM * factor).round().clamp(MIN_WPM, MAX_WPM) as u16
    }

    /// Convert a pitch multiplier to espeak pitch (0-99)
    fn pitch_to_espeak(factor: f32) -> u8 {
        (NORMAL_PITCH * factor).round().clamp(0.0, MAX_PITCH) as u8
    }

    /// Kill any running speech process
    fn cancel_process(&mut self) {
        if let Some(mut child) = self.current_process.take() {
            debug!("Killing espeak-ng process");
            match child.kill() {
                Ok(_) => {
                    let _ = child.wait(); // Clean up zombie
                }
                Err(e) => {
                    debug!("Failed to kill espeak-ng process: {}", e);
                }
            }
        }
    }
}

impl SpeechEngine for EspeakEngine {
    fn set_language(&mut self, tag: &LanguageTag) -> Result<LanguageSupport> {
        if self.languages.is_empty() {
            return Ok(LanguageSupport::MissingData);
        }

        let primary = tag.primary();
        let found = self.languages.iter().find(|lang| lang.primary() == primary);

        match found {
            Some(lang) => {
                debug!("Selecting espeak voice {}", lang);
                self.voice = lang.as_str().to_string();
                Ok(LanguageSupport::Supported)
            }
            None => {
                debug!("No espeak voice for language {}", tag);
                Ok(LanguageSupport::Unsupported)
            }
        }
    }

    fn speak(&mut self, text: &str, flush: bool) -> Result<SpeakOutcome> {
        if text.is_empty() {
            return Ok(SpeakOutcome::Accepted);
        }

        if flush {
            self.cancel_process();
        } else if self.is_speaking() {
            // One-shot processes can't queue; refuse instead of overlapping
            return Ok(SpeakOutcome::Rejected);
        }

        let mut cmd = Command::new(&self.espeak_path);
        cmd.arg("-v").arg(&self.voice);
        cmd.arg("-s").arg(Self::rate_to_wpm(self.rate).to_string());
        cmd.arg("-p").arg(Self::pitch_to_espeak(self.pitch).to_string());
        cmd.arg(text);
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        debug!("Speaking via espeak-ng: {}", text);
        match cmd.spawn() {
            Ok(child) => {
                self.current_process = Some(child);
                Ok(SpeakOutcome::Accepted)
            }
            Err(e) => {
                error!("Failed to spawn espeak-ng: {}", e);
                Ok(SpeakOutcome::Rejected)
            }
        }
    }

    fn stop(&mut self) -> Result<()> {
        debug!("Stopping speech");
        self.cancel_process();
        Ok(())
    }

    fn is_speaking(&mut self) -> bool {
        match self.current_process.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(Some(_)) => {
                    self.current_process = None;
                    false
                }
                Ok(None) => true,
                Err(_) => false,
            },
            None => false,
        }
    }

    fn set_rate(&mut self, factor: f32) -> Result<()> {
        debug!("Setting rate to {}x", factor);
        self.rate = factor;
        Ok(())
    }

    fn set_pitch(&mut self, factor: f32) -> Result<()> {
        debug!("Setting pitch to {}x", factor);
        self.pitch = factor;
        Ok(())
    }

    fn available_languages(&mut self) -> Result<Vec<LanguageTag>> {
        Ok(self.languages.clone())
    }
}

impl Drop for EspeakEngine {
    fn drop(&mut self) {
        debug!("Shutting down espeak-ng backend");
        self.cancel_process();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_conversion() {
        assert_eq!(EspeakEngine::rate_to_wpm(1.0), 175); // Normal
        assert_eq!(EspeakEngine::rate_to_wpm(0.5), 88);
        assert_eq!(EspeakEngine::rate_to_wpm(3.0), 450); // Clamped
        assert_eq!(EspeakEngine::rate_to_wpm(0.1), 80); // Clamped
    }

    #[test]
    fn test_pitch_conversion() {
        assert_eq!(EspeakEngine::pitch_to_espeak(1.0), 50); // Normal
        assert_eq!(EspeakEngine::pitch_to_espeak(0.5), 25);
        assert_eq!(EspeakEngine::pitch_to_espeak(2.0), 99); // Clamped
    }

    #[test]
    fn test_voice_list_parsing() {
        let listing = "\
Pty Language       Age/Gender VoiceName         File          Other Languages
 5  af              --/M      Afrikaans         gmw/af
 5  fr-fr           --/M      French_(France)   roa/fr
 7  fr-fr           --/M      french-mbrola-1   mb/mb-fr1
 5  ru              --/M      Russian           zle/ru
";
        let tags = EspeakEngine::parse_voice_list(listing);

        assert_eq!(tags.len(), 3); // fr-fr deduplicated
        assert!(tags.iter().any(|t| t.as_str() == "af"));
        assert!(tags.iter().any(|t| t.as_str() == "fr-fr"));
        assert!(tags.iter().any(|t| t.as_str() == "ru"));
        assert!(tags.iter().any(|t| t.primary() == "fr"));
    }

    #[test]
    fn test_create_espeak_engine() {
        match EspeakEngine::new() {
            Ok(_) => println!("espeak-ng backend available"),
            Err(e) => println!("espeak-ng backend not available: {}", e),
        }
    }
}
