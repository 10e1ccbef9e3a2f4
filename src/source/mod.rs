pub mod local;
pub mod remote;

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::SourceError;
use crate::mode::{Mode, ModeOptions};

pub use local::{AlphabetSource, BundledWords, FixedText};
pub use remote::{CodeSnippetSource, WordApiSource};

pub const DEFAULT_WORD_API_URL: &str = "https://random-word-api.vercel.app/api";
pub const DEFAULT_CODE_API_URL: &str = "https://random-code-utkarsh.vercel.app/random-code";

/// Provider of reference text for a session
pub trait TextSource: Send {
    fn fetch(&self) -> Result<String, SourceError>;

    /// Substituted whenever `fetch` fails or returns nothing
    fn fallback(&self) -> &str;

    /// Whether `fetch` may block on the network
    fn is_remote(&self) -> bool {
        false
    }
}

/// Fetch from `source`, falling back to its constant on failure or blank text.
pub fn load_text(source: &dyn TextSource) -> String {
    match source.fetch() {
        Ok(text) if !text.trim().is_empty() => {
            debug!(chars = text.chars().count(), "reference text loaded");
            text
        }
        Ok(_) => {
            warn!("text source returned nothing, using fallback");
            source.fallback().to_string()
        }
        Err(err) => {
            warn!(error = %err, "text source failed, using fallback");
            source.fallback().to_string()
        }
    }
}

/// Where remote text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoints {
    pub word_api_url: String,
    pub code_api_url: String,
    pub timeout: Duration,
}

impl Default for RemoteEndpoints {
    fn default() -> Self {
        Self {
            word_api_url: DEFAULT_WORD_API_URL.to_string(),
            code_api_url: DEFAULT_CODE_API_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Pick the text source for a mode. `remote == None` keeps everything offline.
pub fn source_for(
    mode: Mode,
    opts: &ModeOptions,
    remote: Option<&RemoteEndpoints>,
) -> Box<dyn TextSource> {
    let fallback = mode.fallback_text(opts);
    match (mode, remote) {
        (Mode::Quick, _) => Box::new(FixedText::new(fallback)),
        (Mode::Alphabet, _) => Box::new(AlphabetSource::new(opts.shuffle_alphabet)),
        (Mode::Words, Some(r)) => Box::new(WordApiSource::new(
            r,
            opts.easy_words,
            Some(opts.easy_word_length),
            fallback,
        )),
        (Mode::Words, None) => Box::new(BundledWords::new(
            opts.easy_words,
            Some(opts.easy_word_length),
            fallback,
        )),
        (Mode::Hard, Some(r)) => Box::new(WordApiSource::new(r, opts.hard_words, None, fallback)),
        (Mode::Hard, None) => Box::new(BundledWords::new(opts.hard_words, None, fallback)),
        (Mode::Timed, Some(r)) => Box::new(WordApiSource::new(
            r,
            opts.timed_word_count(),
            None,
            fallback,
        )),
        (Mode::Timed, None) => Box::new(BundledWords::new(opts.timed_word_count(), None, fallback)),
        (Mode::Code, Some(r)) => Box::new(CodeSnippetSource::new(r, fallback)),
        // no bundled snippets; the fallback is the only offline code
        (Mode::Code, None) => Box::new(FixedText::new(fallback)),
    }
}
