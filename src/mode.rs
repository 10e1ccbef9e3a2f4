use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::session::{CompletionPolicy, SessionConfig, StartPolicy};

/// Sentence used by the quick test on the home screen
pub const QUICK_TEXT: &str = "The quick brown fox jumps over the lazy dog near the river bank.";

pub const TIMED_FALLBACK_TEXT: &str = "The quick brown fox jumps over the lazy dog. This sentence contains all letters of the alphabet. Typing regularly improves your speed and accuracy. Practice makes perfect in the world of typing tests.";

pub const EASY_FALLBACK_WORDS: [&str; 10] = [
    "time", "word", "hand", "blue", "fast", "keep", "line", "play", "read", "type",
];

const HARD_DEFAULT_WORDS: [&str; 15] = [
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "near", "river", "bank",
    "with", "speed", "and", "grace",
];

pub const CODE_FALLBACK_SNIPPET: &str = "fn main() {\n    let words = vec![\"hello\", \"world\"];\n    println!(\"{}\", words.join(\" \"));\n}";

pub const TIMED_DURATIONS: [u64; 4] = [15, 30, 60, 90];
pub const HARD_WORD_COUNTS: [usize; 3] = [5, 10, 15];

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Quick,
    Alphabet,
    Words,
    Hard,
    Code,
    Timed,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Quick,
        Mode::Alphabet,
        Mode::Words,
        Mode::Hard,
        Mode::Code,
        Mode::Timed,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Mode::Quick => "Quick Test",
            Mode::Alphabet => "Easy: Alphabet",
            Mode::Words => "Easy: Words",
            Mode::Hard => "Hard Mode",
            Mode::Code => "Code Mode",
            Mode::Timed => "Time Based",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mode::Quick => "one sentence, press space to begin",
            Mode::Alphabet => "the 26 letters, in order or shuffled",
            Mode::Words => "ten short words",
            Mode::Hard => "random words and no backspace",
            Mode::Code => "a random code snippet",
            Mode::Timed => "type as much as you can before the clock runs out",
        }
    }

    pub fn route(&self) -> &'static str {
        match self {
            Mode::Quick => "/quick",
            Mode::Alphabet => "/easy/alphabet",
            Mode::Words => "/easy/words",
            Mode::Hard => "/hard",
            Mode::Code => "/code",
            Mode::Timed => "/time-base",
        }
    }

    pub fn session_config(&self, opts: &ModeOptions) -> SessionConfig {
        let base = SessionConfig::default();
        match self {
            Mode::Quick => SessionConfig {
                start: StartPolicy::Explicit,
                ..base
            },
            Mode::Alphabet | Mode::Words => base,
            Mode::Hard => SessionConfig {
                allow_shrink: false,
                ..base
            },
            Mode::Code => SessionConfig {
                character_limit: false,
                ..base
            },
            Mode::Timed => SessionConfig {
                completion: CompletionPolicy::TimeExpired {
                    secs: opts.timed_secs,
                },
                ..base
            },
        }
    }

    /// Text used when the real source fails or comes back empty
    pub fn fallback_text(&self, opts: &ModeOptions) -> String {
        match self {
            Mode::Quick => QUICK_TEXT.to_string(),
            Mode::Alphabet => ('a'..='z').collect(),
            Mode::Words => EASY_FALLBACK_WORDS.join(" "),
            Mode::Hard => hard_default_words(opts.hard_words).join(" "),
            Mode::Code => CODE_FALLBACK_SNIPPET.to_string(),
            Mode::Timed => TIMED_FALLBACK_TEXT.to_string(),
        }
    }

    /// Label and value of the option Up/Down cycles through, if any
    pub fn option_label(&self, opts: &ModeOptions) -> Option<String> {
        match self {
            Mode::Hard => Some(format!("{} words", opts.hard_words)),
            Mode::Timed => Some(format!("{} seconds", opts.timed_secs)),
            Mode::Alphabet => Some(if opts.shuffle_alphabet {
                "shuffled".to_string()
            } else {
                "in order".to_string()
            }),
            _ => None,
        }
    }
}

/// User-tunable parameters of the modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeOptions {
    pub timed_secs: u64,
    pub hard_words: usize,
    pub easy_words: usize,
    pub easy_word_length: usize,
    pub shuffle_alphabet: bool,
}

impl Default for ModeOptions {
    fn default() -> Self {
        Self {
            timed_secs: 30,
            hard_words: 15,
            easy_words: 10,
            easy_word_length: 4,
            shuffle_alphabet: false,
        }
    }
}

impl ModeOptions {
    /// Words to request for a timed test; longer tests need more text
    pub fn timed_word_count(&self) -> usize {
        match self.timed_secs {
            0..=30 => 100,
            31..=60 => 150,
            _ => 200,
        }
    }

    /// Step the option belonging to `mode`. Returns true if anything changed.
    pub fn cycle(&mut self, mode: Mode, forward: bool) -> bool {
        match mode {
            Mode::Timed => {
                self.timed_secs = step(&TIMED_DURATIONS, self.timed_secs, forward);
                true
            }
            Mode::Hard => {
                self.hard_words = step(&HARD_WORD_COUNTS, self.hard_words, forward);
                true
            }
            Mode::Alphabet => {
                self.shuffle_alphabet = !self.shuffle_alphabet;
                true
            }
            _ => false,
        }
    }
}

fn step<T: Copy + PartialEq>(choices: &[T], current: T, forward: bool) -> T {
    let len = choices.len();
    let idx = choices.iter().position(|c| *c == current);
    let next = match (idx, forward) {
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
        (None, _) => 0,
    };
    choices[next]
}

/// Built-in words for hard mode when the word service is unreachable
pub fn hard_default_words(count: usize) -> Vec<&'static str> {
    let mut words: Vec<&'static str> = match count {
        5 => HARD_DEFAULT_WORDS[1..6].to_vec(),
        10 => HARD_DEFAULT_WORDS[..10].to_vec(),
        _ => HARD_DEFAULT_WORDS.to_vec(),
    };
    // counts outside the presets cycle through the list
    if count > 0 && words.len() != count {
        words = HARD_DEFAULT_WORDS.iter().cycle().take(count).copied().collect();
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_mode_disallows_backspace() {
        let cfg = Mode::Hard.session_config(&ModeOptions::default());
        assert!(!cfg.allow_shrink);
        assert!(cfg.character_limit);
    }

    #[test]
    fn quick_mode_requires_explicit_start() {
        let cfg = Mode::Quick.session_config(&ModeOptions::default());
        assert_eq!(cfg.start, StartPolicy::Explicit);
    }

    #[test]
    fn code_mode_is_unbounded() {
        let cfg = Mode::Code.session_config(&ModeOptions::default());
        assert!(!cfg.character_limit);
    }

    #[test]
    fn timed_mode_uses_duration_option() {
        let opts = ModeOptions {
            timed_secs: 60,
            ..ModeOptions::default()
        };
        let cfg = Mode::Timed.session_config(&opts);
        assert_eq!(cfg.time_limit(), Some(60));
    }

    #[test]
    fn timed_word_count_scales_with_duration() {
        let mut opts = ModeOptions::default();
        for (secs, words) in [(15, 100), (30, 100), (60, 150), (90, 200)] {
            opts.timed_secs = secs;
            assert_eq!(opts.timed_word_count(), words);
        }
    }

    #[test]
    fn hard_defaults_match_presets() {
        assert_eq!(
            hard_default_words(5),
            vec!["quick", "brown", "fox", "jumps", "over"]
        );
        assert_eq!(hard_default_words(10).len(), 10);
        assert_eq!(hard_default_words(15).len(), 15);
        assert_eq!(hard_default_words(20).len(), 20);
    }

    #[test]
    fn fallbacks_are_never_empty() {
        let opts = ModeOptions::default();
        for mode in Mode::ALL {
            assert!(!mode.fallback_text(&opts).trim().is_empty(), "{mode}");
        }
        assert_eq!(
            Mode::Alphabet.fallback_text(&opts),
            "abcdefghijklmnopqrstuvwxyz"
        );
    }

    #[test]
    fn cycling_wraps_around() {
        let mut opts = ModeOptions::default();
        opts.timed_secs = 90;
        assert!(opts.cycle(Mode::Timed, true));
        assert_eq!(opts.timed_secs, 15);
        assert!(opts.cycle(Mode::Timed, false));
        assert_eq!(opts.timed_secs, 90);

        opts.hard_words = 5;
        opts.cycle(Mode::Hard, false);
        assert_eq!(opts.hard_words, 15);

        assert!(!opts.cycle(Mode::Code, true));
    }

    #[test]
    fn mode_display_is_lowercase() {
        assert_eq!(Mode::Timed.to_string(), "timed");
        assert_eq!(Mode::Quick.route(), "/quick");
    }
}
