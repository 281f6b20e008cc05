use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

pub const WORD_LENGTH: usize = 5;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    #[error("word must be exactly 5 letters, got {0}")]
    InvalidLength(usize),

    #[error("word must contain only ASCII letters: {0:?}")]
    InvalidCharacters(String),
}

#[derive(Error, Debug)]
pub enum WordbankError {
    #[error("failed to read word bank: {0}")]
    Io(#[from] io::Error),

    #[error("word bank contains no valid 5-letter words")]
    Empty,

    #[error("'{0}' is not in the word bank")]
    UnknownWord(String),
}

/// A validated five-letter word, always stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(String);

impl Word {
    /// Parse a word, lowercasing it.
    ///
    /// # Errors
    /// Returns `WordError` if the text is not exactly five ASCII letters.
    pub fn parse(text: &str) -> Result<Self, WordError> {
        let len = text.chars().count();
        if len != WORD_LENGTH {
            return Err(WordError::InvalidLength(len));
        }
        if !text.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(WordError::InvalidCharacters(text.to_string()));
        }
        Ok(Self(text.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The fixed list of words that may be guessed and drawn as targets.
///
/// Order is the load order; duplicates are dropped on load.
#[derive(Debug, Clone)]
pub struct Wordbank {
    words: Vec<Word>,
    index: HashSet<Word>,
}

impl Wordbank {
    /// Build a wordbank from already-validated words.
    ///
    /// # Errors
    /// Returns `WordbankError::Empty` if no words are given.
    pub fn from_words<I: IntoIterator<Item = Word>>(words: I) -> Result<Self, WordbankError> {
        let mut index = HashSet::new();
        let words: Vec<Word> = words
            .into_iter()
            .filter(|word| index.insert(word.clone()))
            .collect();
        if words.is_empty() {
            return Err(WordbankError::Empty);
        }
        Ok(Self { words, index })
    }

    /// The word list compiled into the binary.
    ///
    /// # Errors
    /// Only fails if the embedded list is empty.
    pub fn embedded() -> Result<Self, WordbankError> {
        load_wordbank_from_str(EMBEDDED_WORDBANK)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        Word::parse(word).is_ok_and(|w| self.index.contains(&w))
    }

    /// Look up a word, returning the bank's copy.
    ///
    /// # Errors
    /// Returns `WordbankError::UnknownWord` if the word is not in the bank.
    pub fn get(&self, word: &str) -> Result<&Word, WordbankError> {
        Word::parse(word)
            .ok()
            .and_then(|w| self.index.get(&w))
            .ok_or_else(|| WordbankError::UnknownWord(word.to_string()))
    }

    /// Draw one word uniformly at random.
    pub fn random_word<R: Rng>(&self, rng: &mut R) -> &Word {
        &self.words[rng.random_range(0..self.words.len())]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

fn parse_line(line: &str) -> Option<Word> {
    Word::parse(line.trim()).ok()
}

/// Load a wordbank from newline-delimited text, skipping invalid lines.
///
/// # Errors
/// Returns `WordbankError::Empty` if no line holds a valid word.
pub fn load_wordbank_from_str(data: &str) -> Result<Wordbank, WordbankError> {
    Wordbank::from_words(data.lines().filter_map(parse_line))
}

/// Load a wordbank from a newline-delimited file, skipping invalid lines.
///
/// # Errors
/// Returns `WordbankError::Io` if the file cannot be read and
/// `WordbankError::Empty` if it holds no valid words.
pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Wordbank, WordbankError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = parse_line(&line?) {
            words.push(word);
        }
    }
    Wordbank::from_words(words)
}
