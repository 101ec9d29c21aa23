//! The readability scoring engine.
//!
//! [`Engine::score`] runs the whole computation for one tagged document:
//!
//! 1. [`StatsCollector`] walks the document once, gathering counters, the
//!    hard-word set and a render layout.
//! 2. [`Indices::compute`] turns the counters into Fog, Pisarek and LIX.
//! 3. [`ReadabilityReport::assemble`] classifies every index and aggregates
//!    the verdict.
//! 4. [`html::annotate`] renders the layout with hard words and long
//!    sentences marked.
//!
//! The document is only borrowed; scoring the same document twice yields the
//! same report and markup.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ScoringOptions;
use crate::document::TaggedDocument;
use crate::error::ScoringResult;
use crate::html;
use crate::indices::Indices;
use crate::report::ReadabilityReport;
use crate::stats::StatsCollector;
use crate::syllables::SyllableOracle;

/// Report plus annotated markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Analysis {
    /// Scores and verdict.
    pub report: ReadabilityReport,
    /// Sanitized HTML with hard words and long sentences marked.
    pub html: String,
}

/// Scores tagged documents with a given syllable oracle.
#[derive(Clone, Copy)]
pub struct Engine<'o> {
    oracle: &'o dyn SyllableOracle,
    options: ScoringOptions,
}

impl std::fmt::Debug for Engine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'o> Engine<'o> {
    /// Engine with default thresholds.
    pub fn new(oracle: &'o dyn SyllableOracle) -> Self {
        Self {
            oracle,
            options: ScoringOptions::default(),
        }
    }

    /// Replace the scoring thresholds.
    #[must_use]
    pub fn with_options(mut self, options: ScoringOptions) -> Self {
        self.options = options;
        self
    }

    /// Current thresholds.
    pub const fn options(&self) -> &ScoringOptions {
        &self.options
    }

    /// Score `document`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::EmptyDocument`](crate::error::ScoringError::EmptyDocument)
    /// when there is nothing to score.
    #[tracing::instrument(skip_all, fields(language = %self.options.language))]
    pub fn score(&self, document: &TaggedDocument) -> ScoringResult<Analysis> {
        let stats = StatsCollector::new(self.oracle, &self.options).collect(document)?;
        let indices = Indices::compute(&stats.counters);
        let report = ReadabilityReport::assemble(&stats, &indices);
        let html = html::annotate(&stats);

        tracing::info!(
            score = %report.readability_score,
            points = report.readability_points,
            "document scored"
        );
        Ok(Analysis { report, html })
    }
}
