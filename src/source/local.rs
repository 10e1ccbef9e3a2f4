use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::error::SourceError;

use super::TextSource;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub words: Vec<String>,
}

impl WordList {
    pub fn english() -> Result<Self, SourceError> {
        Self::load("english.json")
    }

    fn load(file_name: &str) -> Result<Self, SourceError> {
        let contents = LANG_DIR
            .get_file(file_name)
            .and_then(|f| f.contents_utf8())
            .ok_or(SourceError::Empty)?;
        Ok(serde_json::from_str(contents)?)
    }
}

/// A constant string
#[derive(Debug, Clone)]
pub struct FixedText {
    text: String,
}

impl FixedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextSource for FixedText {
    fn fetch(&self) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }

    fn fallback(&self) -> &str {
        &self.text
    }
}

/// The letters a..z with no separators
#[derive(Debug, Clone)]
pub struct AlphabetSource {
    shuffle: bool,
    ordered: String,
}

impl AlphabetSource {
    pub fn new(shuffle: bool) -> Self {
        Self {
            shuffle,
            ordered: ('a'..='z').collect(),
        }
    }
}

impl TextSource for AlphabetSource {
    fn fetch(&self) -> Result<String, SourceError> {
        if !self.shuffle {
            return Ok(self.ordered.clone());
        }
        let mut letters: Vec<char> = self.ordered.chars().collect();
        letters.shuffle(&mut rand::thread_rng());
        Ok(letters.into_iter().collect())
    }

    fn fallback(&self) -> &str {
        &self.ordered
    }
}

/// Random words from the word list compiled into the binary
#[derive(Debug, Clone)]
pub struct BundledWords {
    count: usize,
    length: Option<usize>,
    fallback: String,
}

impl BundledWords {
    pub fn new(count: usize, length: Option<usize>, fallback: impl Into<String>) -> Self {
        Self {
            count,
            length,
            fallback: fallback.into(),
        }
    }
}

impl TextSource for BundledWords {
    fn fetch(&self) -> Result<String, SourceError> {
        let list = WordList::english()?;
        let pool: Vec<&String> = list
            .words
            .iter()
            .filter(|w| self.length.map_or(true, |len| w.chars().count() == len))
            .collect();
        if pool.is_empty() {
            return Err(SourceError::Empty);
        }

        // repeats are fine; timed tests ask for more words than the list holds
        let mut rng = rand::thread_rng();
        let words: Vec<&str> = (0..self.count)
            .filter_map(|_| pool.choose(&mut rng).map(|w| w.as_str()))
            .collect();
        Ok(words.join(" "))
    }

    fn fallback(&self) -> &str {
        &self.fallback
    }
}
