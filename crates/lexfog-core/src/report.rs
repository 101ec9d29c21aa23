//! The readability report.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::indices::{Indices, percentage};
use crate::interpret::{Interpretations, Verdict, readability_points};
use crate::scales::Interpretation;
use crate::stats::DocumentStats;

/// An index value with the message of the band it falls into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IndexValue {
    /// Value rounded to two decimals.
    pub value: f64,
    /// Band message.
    pub interpretation: String,
}

impl IndexValue {
    fn new(value: f64, interpretation: Interpretation) -> Self {
        Self {
            value,
            interpretation: interpretation.message,
        }
    }
}

/// Lemma and surface-form variants of one index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IndexVariants {
    /// Computed over base forms.
    pub base: IndexValue,
    /// Computed over surface forms.
    pub orth: IndexValue,
}

/// Both Pisarek indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PisarekReport {
    /// Linear formula.
    pub linear: IndexVariants,
    /// Nonlinear formula.
    pub nonlinear: IndexVariants,
}

/// Full result of scoring one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Paragraphs with at least one sentence.
    pub paragraph_count: usize,
    /// Number of sentences.
    pub sentence_count: usize,
    /// Sentences over the long-sentence limit.
    pub long_sentence_count: usize,
    /// Words, punctuation excluded.
    pub word_count: usize,
    /// Words per sentence, rounded up.
    pub average_sentence_length: usize,
    /// Distinct hard surface forms.
    pub hard_word_count: usize,
    /// `hard_word_count / word_count`, in percent.
    pub hard_word_percentage: f64,
    /// `long_sentence_count / sentence_count`, in percent.
    pub long_sentence_percentage: f64,
    /// Fog index.
    pub fog: IndexVariants,
    /// Pisarek indices.
    pub pisarek: PisarekReport,
    /// LIX.
    pub lix: IndexValue,
    /// General grade as `"k/N"`.
    pub readability_score: String,
    /// General verdict message.
    pub interpretation: String,
    /// Points left under the readability ceiling; may be negative.
    pub readability_points: i64,
}

impl ReadabilityReport {
    /// Assemble the report from collected statistics and computed indices.
    pub fn assemble(stats: &DocumentStats<'_>, indices: &Indices) -> Self {
        let counters = &stats.counters;
        let interpretations = Interpretations::of(indices);
        let verdict = Verdict::from_grades(&interpretations.orth_grades());
        let hard_word_count = stats.hard_word_count();

        Self {
            paragraph_count: counters.paragraph_count,
            sentence_count: counters.sentence_count,
            long_sentence_count: counters.long_sentence_count,
            word_count: counters.word_count,
            average_sentence_length: indices.rounded_sentence_length(),
            hard_word_count,
            hard_word_percentage: percentage(hard_word_count, counters.word_count),
            long_sentence_percentage: percentage(
                counters.long_sentence_count,
                counters.sentence_count,
            ),
            fog: IndexVariants {
                base: IndexValue::new(indices.fog_base, interpretations.fog_base),
                orth: IndexValue::new(indices.fog_orth, interpretations.fog_orth),
            },
            pisarek: PisarekReport {
                linear: IndexVariants {
                    base: IndexValue::new(
                        indices.pisarek_linear_base,
                        interpretations.pisarek_linear_base,
                    ),
                    orth: IndexValue::new(
                        indices.pisarek_linear_orth,
                        interpretations.pisarek_linear_orth,
                    ),
                },
                nonlinear: IndexVariants {
                    base: IndexValue::new(
                        indices.pisarek_nonlinear_base,
                        interpretations.pisarek_nonlinear_base,
                    ),
                    orth: IndexValue::new(
                        indices.pisarek_nonlinear_orth,
                        interpretations.pisarek_nonlinear_orth,
                    ),
                },
            },
            lix: IndexValue::new(indices.lix, interpretations.lix),
            readability_score: verdict.score(),
            interpretation: verdict.message.to_string(),
            readability_points: readability_points(indices),
        }
    }
}
