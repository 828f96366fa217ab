//! Interactive terminal front end
//!
//! Renders the phrase menu and routes single keypresses into the dispatch
//! policy. All output goes through [`print_line`] because the terminal is
//! in raw mode and needs explicit carriage returns.

use crate::config::Config;
use crate::dispatch::{NoticeSink, SpeechDispatcher, SynthesisOutcome};
use crate::identify::WhatlangIdentifier;
use crate::phrases::{
    Phrase, DEFAULT_PITCH_IDX, DEFAULT_RATE_IDX, PHRASES, PITCH_CHOICES, RATE_CHOICES,
};
use crate::speech::create_engine;
use log::{info, warn};
use std::cmp::Ordering;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Print one line while the terminal is in raw mode
pub fn print_line(text: &str) {
    print!("{}\r\n", text);
    let _ = io::stdout().flush();
}

/// Notice sink that prints to the terminal
struct TerminalNotice;

impl NoticeSink for TerminalNotice {
    fn notify(&mut self, message: &str) {
        print_line(&format!("notice: {}", message));
    }
}

/// What the key handler wants the caller to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Keep reading keys
    Continue,
    /// Exit the application
    Quit,
}

/// The interactive application
pub struct App {
    dispatcher: SpeechDispatcher,
    phrases: &'static [Phrase],
    rate_idx: usize,
    pitch_idx: usize,
}

impl App {
    /// Build the app from configuration
    ///
    /// Engine initialization failure does not abort: a placeholder engine
    /// is installed and speech controls report the problem when used.
    pub fn new(config: &Config) -> Self {
        let identifier =
            WhatlangIdentifier::new(config.confidence_threshold(), config.max_candidates());
        let engine = create_engine(&config.backend());

        let mut dispatcher =
            SpeechDispatcher::new(Box::new(identifier), engine, Box::new(TerminalNotice));

        let rate_idx = closest_choice(RATE_CHOICES, config.rate(), DEFAULT_RATE_IDX);
        let pitch_idx = closest_choice(PITCH_CHOICES, config.pitch(), DEFAULT_PITCH_IDX);

        if let Err(e) = dispatcher.set_rate(RATE_CHOICES[rate_idx]) {
            warn!("Could not apply startup rate: {}", e);
        }
        if let Err(e) = dispatcher.set_pitch(PITCH_CHOICES[pitch_idx]) {
            warn!("Could not apply startup pitch: {}", e);
        }

        Self {
            dispatcher,
            phrases: PHRASES,
            rate_idx,
            pitch_idx,
        }
    }

    /// Print the language inventory and the menu
    pub fn show_welcome(&mut self) {
        print_line(&format!("{} {}", crate::APP_NAME, crate::VERSION));
        self.show_languages();
        print_line("");
        self.show_menu();
    }

    /// Print the phrase menu and key help
    pub fn show_menu(&self) {
        let width = self
            .phrases
            .iter()
            .map(|p| UnicodeWidthStr::width(p.label))
            .max()
            .unwrap_or(0);

        for (i, phrase) in self.phrases.iter().enumerate() {
            let pad = width - UnicodeWidthStr::width(phrase.label);
            print_line(&format!(
                "  {}. {}{}  [{}]  {}",
                i + 1,
                phrase.label,
                " ".repeat(pad),
                phrase.tag,
                phrase.content
            ));
        }
        print_line("");
        print_line(&format!(
            "  [ / ] rate (now {}x)   {{ / }} pitch (now {}x)",
            RATE_CHOICES[self.rate_idx], PITCH_CHOICES[self.pitch_idx]
        ));
        print_line("  l languages   s stop   h menu   q quit");
    }

    /// Handle one keypress
    pub fn handle_key(&mut self, key: u8) -> KeyAction {
        match key {
            b'1'..=b'9' => {
                let phrases = self.phrases;
                if let Some(phrase) = phrases.get((key - b'1') as usize) {
                    self.speak_phrase(phrase);
                }
                KeyAction::Continue
            }
            b']' => {
                self.step_rate(1);
                KeyAction::Continue
            }
            b'[' => {
                self.step_rate(-1);
                KeyAction::Continue
            }
            b'}' => {
                self.step_pitch(1);
                KeyAction::Continue
            }
            b'{' => {
                self.step_pitch(-1);
                KeyAction::Continue
            }
            b'l' => {
                self.show_languages();
                KeyAction::Continue
            }
            b's' => {
                if let Err(e) = self.dispatcher.stop() {
                    print_line(&format!("error: {}", e));
                }
                KeyAction::Continue
            }
            b'h' => {
                self.show_menu();
                KeyAction::Continue
            }
            // q or Ctrl-C
            b'q' | 0x03 => KeyAction::Quit,
            _ => KeyAction::Continue,
        }
    }

    /// Stop speech on the way out
    pub fn shutdown(&mut self) {
        if let Err(e) = self.dispatcher.stop() {
            info!("Stop on shutdown failed: {}", e);
        }
    }

    fn speak_phrase(&mut self, phrase: &Phrase) {
        print_line(&format!("Speaking ({}): {}", phrase.label, phrase.content));
        match self.dispatcher.speak(phrase.content) {
            Ok(SynthesisOutcome::Success) => {}
            Ok(SynthesisOutcome::LanguageUnavailable) => {
                info!("No speakable language found for {}", phrase.label);
            }
            Ok(SynthesisOutcome::SynthesisFailed) => {
                info!("Synthesis failed for {}", phrase.label);
            }
            Err(e) => print_line(&format!("error: {}", e)),
        }
    }

    fn step_rate(&mut self, delta: isize) {
        let idx = step_index(self.rate_idx, delta, RATE_CHOICES.len());
        if idx != self.rate_idx {
            match self.dispatcher.set_rate(RATE_CHOICES[idx]) {
                Ok(()) => self.rate_idx = idx,
                Err(e) => {
                    print_line(&format!("error: {}", e));
                    return;
                }
            }
        }
        print_line(&format!("rate: {}x", RATE_CHOICES[self.rate_idx]));
    }

    fn step_pitch(&mut self, delta: isize) {
        let idx = step_index(self.pitch_idx, delta, PITCH_CHOICES.len());
        if idx != self.pitch_idx {
            match self.dispatcher.set_pitch(PITCH_CHOICES[idx]) {
                Ok(()) => self.pitch_idx = idx,
                Err(e) => {
                    print_line(&format!("error: {}", e));
                    return;
                }
            }
        }
        print_line(&format!("pitch: {}x", PITCH_CHOICES[self.pitch_idx]));
    }

    fn show_languages(&mut self) {
        match self.dispatcher.available_languages() {
            Ok(languages) => {
                let list: Vec<&str> = languages.iter().map(|l| l.as_str()).collect();
                print_line(&format!("Speakable languages: {}", list.join(", ")));
            }
            Err(e) => {
                // Startup degrades instead of aborting; the engine will
                // keep reporting this on each use
                print_line(&format!("Speech engine unavailable: {}", e));
            }
        }
    }
}

/// Step an index through a choice list, clamped at both ends
fn step_index(idx: usize, delta: isize, len: usize) -> usize {
    let next = idx as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

/// Index of the choice closest to a configured value
fn closest_choice(choices: &[f32], value: f32, default_idx: usize) -> usize {
    choices
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (**a - value).abs();
            let db = (**b - value).abs();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(default_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_index_clamps() {
        assert_eq!(step_index(0, -1, 7), 0);
        assert_eq!(step_index(0, 1, 7), 1);
        assert_eq!(step_index(6, 1, 7), 6);
        assert_eq!(step_index(3, -1, 7), 2);
    }

    #[test]
    fn test_closest_choice() {
        assert_eq!(closest_choice(RATE_CHOICES, 1.0, DEFAULT_RATE_IDX), 2);
        assert_eq!(closest_choice(RATE_CHOICES, 0.4, DEFAULT_RATE_IDX), 0);
        assert_eq!(closest_choice(RATE_CHOICES, 10.0, DEFAULT_RATE_IDX), 6);
        assert_eq!(closest_choice(RATE_CHOICES, 1.3, DEFAULT_RATE_IDX), 3);
    }
}
