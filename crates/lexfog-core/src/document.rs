//! Tagged document model.
//!
//! A [`TaggedDocument`] is what the morphological tagger hands back: paragraphs
//! of sentences of tokens, each word carrying one or more lexical readings.
//! The engine only ever borrows it.

use serde::{Deserialize, Serialize};

/// A tagged document: paragraphs in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedDocument {
    /// Paragraphs in document order. Some may have no sentences.
    pub paragraphs: Vec<Paragraph>,
}

impl TaggedDocument {
    /// Create a document from its paragraphs.
    pub const fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Total number of sentences across all paragraphs.
    pub fn sentence_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.sentences.len()).sum()
    }
}

/// A paragraph: an ordered run of sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Sentences in order.
    pub sentences: Vec<Sentence>,
}

impl Paragraph {
    /// Create a paragraph from its sentences.
    pub const fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// Whether the paragraph holds no sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// A sentence as segmented by the tagger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Tokens in order, including no-space markers.
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Create a sentence from its tokens.
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Iterate over the word tokens only.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.tokens.iter().filter_map(Token::as_word)
    }

    /// Number of word tokens (punctuation included, markers excluded).
    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

/// One element of a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    /// A word or punctuation mark with its readings.
    Word(Word),
    /// The next token is written without a preceding space.
    NoSpace,
}

impl Token {
    /// Returns the word if this token is one.
    pub const fn as_word(&self) -> Option<&Word> {
        match self {
            Self::Word(word) => Some(word),
            Self::NoSpace => None,
        }
    }
}

impl From<Word> for Token {
    fn from(word: Word) -> Self {
        Self::Word(word)
    }
}

/// A word with its surface form and at least one lexical reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWord", into = "RawWord")]
pub struct Word {
    orth: String,
    primary: Reading,
    alternatives: Vec<Reading>,
}

impl Word {
    /// Create a word with a single reading.
    pub fn new(orth: impl Into<String>, reading: Reading) -> Self {
        Self {
            orth: orth.into(),
            primary: reading,
            alternatives: Vec::new(),
        }
    }

    /// Create a word from an ordered list of readings.
    ///
    /// Returns `None` when `readings` is empty.
    pub fn with_readings(orth: impl Into<String>, readings: Vec<Reading>) -> Option<Self> {
        let mut readings = readings.into_iter();
        let primary = readings.next()?;
        Some(Self {
            orth: orth.into(),
            primary,
            alternatives: readings.collect(),
        })
    }

    /// Surface form as it appears in the text.
    pub fn orth(&self) -> &str {
        &self.orth
    }

    /// The first reading, used for counting.
    pub const fn primary(&self) -> &Reading {
        &self.primary
    }

    /// All readings, primary first.
    pub fn readings(&self) -> impl Iterator<Item = &Reading> {
        std::iter::once(&self.primary).chain(self.alternatives.iter())
    }

    /// Whether the surface form starts with an uppercase letter.
    pub fn is_capitalized(&self) -> bool {
        self.orth.chars().next().is_some_and(char::is_uppercase)
    }

    /// Length of the surface form in characters.
    pub fn char_len(&self) -> usize {
        self.orth.chars().count()
    }
}

/// Serialized shape of a [`Word`]; readings must be non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawWord {
    orth: String,
    readings: Vec<Reading>,
}

impl TryFrom<RawWord> for Word {
    type Error = String;

    fn try_from(raw: RawWord) -> Result<Self, Self::Error> {
        if raw.orth.is_empty() {
            return Err("word has an empty surface form".to_string());
        }
        let orth = raw.orth.clone();
        Self::with_readings(raw.orth, raw.readings)
            .ok_or_else(|| format!("word {orth:?} has no readings"))
    }
}

impl From<Word> for RawWord {
    fn from(word: Word) -> Self {
        let mut readings = Vec::with_capacity(1 + word.alternatives.len());
        readings.push(word.primary);
        readings.extend(word.alternatives);
        Self {
            orth: word.orth,
            readings,
        }
    }
}

/// One lexical interpretation of a word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reading {
    /// Lemma (dictionary base form).
    pub base: String,
    /// Colon-delimited grammatical tag, e.g. `subst:sg:nom:f`.
    pub tag: String,
}

impl Reading {
    /// Create a reading.
    pub fn new(base: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            tag: tag.into(),
        }
    }

    /// The coarse part-of-speech class: the tag's first segment.
    pub fn coarse_class(&self) -> &str {
        self.tag.split(':').next().unwrap_or_default()
    }
}
