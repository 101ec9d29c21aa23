//! Readability index formulas.
//!
//! ```text
//! ASL            = words / sentences
//! phw(hard)      = 100 * hard / words
//! FOG            = 0.4 * (ASL + phw)
//! Pisarek linear = 1/3 * ASL + 1/3 * phw + 1
//! Pisarek nonlin = sqrt(ASL² + phw²) / 2
//! LIX            = ASL + 100 * long / words
//! ```
//!
//! Every published value is rounded to two decimals, ties to even.

use crate::stats::Counters;

/// Round to two decimal places, ties to even.
///
/// Rounds the exact decimal expansion of `value`; scaling by 100 first would
/// round twice and move values such as `9.525000000000000355` the wrong way.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Percentage `part / whole * 100`, rounded to two decimals.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

/// Average sentence length, unrounded.
pub fn average_sentence_length(word_count: usize, sentence_count: usize) -> f64 {
    word_count as f64 / sentence_count as f64
}

/// Percentage of hard words, unrounded.
pub fn hard_word_share(hard: usize, word_count: usize) -> f64 {
    100.0 * hard as f64 / word_count as f64
}

/// Fog index, unrounded.
pub fn fog(asl: f64, phw: f64) -> f64 {
    0.4 * (asl + phw)
}

/// Linear Pisarek index, unrounded.
pub fn pisarek_linear(asl: f64, phw: f64) -> f64 {
    // Operation order matters: `x / 3.0` and `1/3 * x` can land on opposite
    // sides of a rounding tie.
    1.0 / 3.0 * asl + 1.0 / 3.0 * phw + 1.0
}

/// Nonlinear Pisarek index, unrounded.
pub fn pisarek_nonlinear(asl: f64, phw: f64) -> f64 {
    asl.hypot(phw) / 2.0
}

/// LIX, unrounded.
pub fn lix(asl: f64, long_words: usize, word_count: usize) -> f64 {
    asl + hard_word_share(long_words, word_count)
}

/// The seven index values of a document plus its sentence length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indices {
    /// Unrounded average sentence length.
    pub asl: f64,
    /// Fog over lemmas.
    pub fog_base: f64,
    /// Fog over surface forms.
    pub fog_orth: f64,
    /// Linear Pisarek over lemmas.
    pub pisarek_linear_base: f64,
    /// Linear Pisarek over surface forms.
    pub pisarek_linear_orth: f64,
    /// Nonlinear Pisarek over lemmas.
    pub pisarek_nonlinear_base: f64,
    /// Nonlinear Pisarek over surface forms.
    pub pisarek_nonlinear_orth: f64,
    /// LIX.
    pub lix: f64,
}

impl Indices {
    /// Compute all indices from raw counters.
    ///
    /// Callers must ensure `word_count` and `sentence_count` are non-zero;
    /// [`StatsCollector`](crate::stats::StatsCollector) guarantees it.
    pub fn compute(counters: &Counters) -> Self {
        let words = counters.word_count;
        let asl = average_sentence_length(words, counters.sentence_count);
        let fog_phw_base = hard_word_share(counters.fog_base_hard, words);
        let fog_phw_orth = hard_word_share(counters.fog_orth_hard, words);
        let pisarek_phw_base = hard_word_share(counters.pisarek_base_hard, words);
        let pisarek_phw_orth = hard_word_share(counters.pisarek_orth_hard, words);

        Self {
            asl,
            fog_base: round2(fog(asl, fog_phw_base)),
            fog_orth: round2(fog(asl, fog_phw_orth)),
            pisarek_linear_base: round2(pisarek_linear(asl, pisarek_phw_base)),
            pisarek_linear_orth: round2(pisarek_linear(asl, pisarek_phw_orth)),
            pisarek_nonlinear_base: round2(pisarek_nonlinear(asl, pisarek_phw_base)),
            pisarek_nonlinear_orth: round2(pisarek_nonlinear(asl, pisarek_phw_orth)),
            lix: round2(lix(asl, counters.lix_hard, words)),
        }
    }

    /// Reported average sentence length: `ceil(ASL)`.
    pub fn rounded_sentence_length(&self) -> usize {
        self.asl.ceil() as usize
    }

    /// Sum of the four surface-form indices that feed the verdict.
    pub fn orth_sum(&self) -> f64 {
        self.fog_orth + self.pisarek_linear_orth + self.pisarek_nonlinear_orth + self.lix
    }
}
