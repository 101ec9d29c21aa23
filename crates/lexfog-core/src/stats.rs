//! Document statistics.
//!
//! One traversal of a [`TaggedDocument`] gathers every counter the indices
//! need, the set of hard surface forms, the long-sentence count and a layout
//! of borrowed words that the HTML annotator renders from afterwards.

use std::collections::HashSet;

use crate::config::ScoringOptions;
use crate::document::{Sentence, TaggedDocument, Token, Word};
use crate::error::{ScoringError, ScoringResult};
use crate::syllables::SyllableOracle;

/// Coarse classes excluded from the word count and Fog checks.
pub const FOG_IGNORED_CLASSES: &[&str] = &["interp"];

/// Coarse classes excluded from Pisarek checks.
pub const PISAREK_IGNORED_CLASSES: &[&str] = &["interp", "num", "numcol"];

/// Raw counters gathered from a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Paragraphs with at least one sentence.
    pub paragraph_count: usize,
    /// All sentences.
    pub sentence_count: usize,
    /// Words outside the Fog-ignored classes.
    pub word_count: usize,
    /// Sentences with more word tokens than the long-sentence limit.
    pub long_sentence_count: usize,
    /// Words whose lemma is syllable-hard (Fog filter).
    pub fog_base_hard: usize,
    /// Words whose surface form is syllable-hard (Fog filter).
    pub fog_orth_hard: usize,
    /// Words whose lemma is syllable-hard (Pisarek filter).
    pub pisarek_base_hard: usize,
    /// Words whose surface form is syllable-hard (Pisarek filter).
    pub pisarek_orth_hard: usize,
    /// Words longer than the LIX character limit, unfiltered.
    pub lix_hard: usize,
}

/// A word placed in a sentence, with its spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedWord<'a> {
    /// The word itself.
    pub word: &'a Word,
    /// Written without a preceding space.
    pub glued: bool,
}

/// Words of one sentence, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceLayout<'a> {
    /// Words in order.
    pub words: Vec<PlacedWord<'a>>,
    /// Whether the sentence exceeds the long-sentence limit.
    pub is_long: bool,
}

/// Sentences of one paragraph, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphLayout<'a> {
    /// Sentences in order.
    pub sentences: Vec<SentenceLayout<'a>>,
}

/// Everything a single pass over the document produces.
#[derive(Debug, Clone)]
pub struct DocumentStats<'a> {
    /// Raw counters.
    pub counters: Counters,
    /// Distinct surface forms flagged hard by any criterion.
    pub hard_words: HashSet<&'a str>,
    /// Borrowed layout for the annotator.
    pub layout: Vec<ParagraphLayout<'a>>,
}

impl DocumentStats<'_> {
    /// Number of distinct hard surface forms.
    pub fn hard_word_count(&self) -> usize {
        self.hard_words.len()
    }
}

/// Heuristic proper-name test.
///
/// Sentence-initial capitals say nothing, so position 0 never counts.
pub fn is_proper_name(pos: usize, word: &Word) -> bool {
    pos > 0 && word.is_capitalized()
}

/// Walks a document once and collects [`DocumentStats`].
pub struct StatsCollector<'o> {
    oracle: &'o dyn SyllableOracle,
    options: &'o ScoringOptions,
}

impl<'o> StatsCollector<'o> {
    /// Create a collector using `oracle` for syllable counts.
    pub fn new(oracle: &'o dyn SyllableOracle, options: &'o ScoringOptions) -> Self {
        Self { oracle, options }
    }

    /// Collect statistics for `document`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::EmptyDocument`] when the document has no
    /// sentences or no words outside the Fog-ignored classes.
    #[tracing::instrument(skip_all, fields(paragraphs = document.paragraphs.len()))]
    pub fn collect<'a>(&self, document: &'a TaggedDocument) -> ScoringResult<DocumentStats<'a>> {
        let mut stats = DocumentStats {
            counters: Counters::default(),
            hard_words: HashSet::new(),
            layout: Vec::with_capacity(document.paragraphs.len()),
        };

        for paragraph in &document.paragraphs {
            if !paragraph.is_empty() {
                stats.counters.paragraph_count += 1;
            }
            let mut layout = ParagraphLayout {
                sentences: Vec::with_capacity(paragraph.sentences.len()),
            };
            for sentence in &paragraph.sentences {
                stats.counters.sentence_count += 1;
                layout.sentences.push(self.visit_sentence(sentence, &mut stats));
            }
            stats.layout.push(layout);
        }

        let counters = &stats.counters;
        if counters.sentence_count == 0 || counters.word_count == 0 {
            tracing::debug!(
                sentences = counters.sentence_count,
                words = counters.word_count,
                "nothing to score"
            );
            return Err(ScoringError::EmptyDocument);
        }

        tracing::debug!(
            sentences = counters.sentence_count,
            words = counters.word_count,
            hard_words = stats.hard_words.len(),
            "statistics collected"
        );
        Ok(stats)
    }

    fn visit_sentence<'a>(
        &self,
        sentence: &'a Sentence,
        stats: &mut DocumentStats<'a>,
    ) -> SentenceLayout<'a> {
        let mut layout = SentenceLayout::default();
        let mut glue_next = false;

        for (pos, token) in sentence.tokens.iter().enumerate() {
            let word = match token {
                Token::NoSpace => {
                    glue_next = true;
                    continue;
                }
                Token::Word(word) => word,
            };
            self.visit_word(pos, word, stats);
            layout.words.push(PlacedWord {
                word,
                glued: glue_next,
            });
            glue_next = false;
        }

        if layout.words.len() > self.options.long_sentence_words {
            layout.is_long = true;
            stats.counters.long_sentence_count += 1;
        }
        layout
    }

    fn visit_word<'a>(&self, pos: usize, word: &'a Word, stats: &mut DocumentStats<'a>) {
        let class = word.primary().coarse_class();
        let counters = &mut stats.counters;

        let fog_eligible = !FOG_IGNORED_CLASSES.contains(&class);
        let pisarek_eligible =
            !PISAREK_IGNORED_CLASSES.contains(&class) && !is_proper_name(pos, word);

        if fog_eligible || pisarek_eligible {
            let orth_hard = self.is_hard(word.orth());
            let base_hard = self.is_hard(&word.primary().base);

            if fog_eligible {
                counters.word_count += 1;
                if orth_hard {
                    counters.fog_orth_hard += 1;
                }
                if base_hard {
                    counters.fog_base_hard += 1;
                }
            }
            if pisarek_eligible {
                if orth_hard {
                    counters.pisarek_orth_hard += 1;
                }
                if base_hard {
                    counters.pisarek_base_hard += 1;
                }
            }
            if orth_hard {
                stats.hard_words.insert(word.orth());
            }
        }

        // LIX length test ignores the class filters on purpose: long
        // punctuation tokens count too.
        if word.char_len() > self.options.long_word_chars {
            counters.lix_hard += 1;
            stats.hard_words.insert(word.orth());
        }
    }

    fn is_hard(&self, text: &str) -> bool {
        self.oracle.count_syllables(text, self.options.language) >= self.options.hard_word_syllables
    }
}
