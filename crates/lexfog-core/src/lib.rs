//! Core library for lexfog.
//!
//! Scores morphologically tagged text with the Fog, Pisarek (linear and
//! nonlinear) and LIX readability indices, and renders the text as HTML with
//! hard words and long sentences marked.
//!
//! # Modules
//!
//! - [`document`] - Tagged document model
//! - [`ccl`] - Reading tagger output (CCL XML, JSON)
//! - [`premorph`] - Writing tagger input
//! - [`syllables`] - Syllable counting
//! - [`stats`], [`indices`], [`scales`], [`interpret`] - The scoring steps
//! - [`html`] - Annotated markup
//! - [`report`], [`readability`] - The report and the engine producing it
//! - [`pipeline`] - Conversion and tagging collaborators
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use lexfog_core::{Engine, VowelGroupOracle, ccl};
//!
//! let xml = std::fs::read_to_string("tagged.xml").unwrap();
//! let document = ccl::parse_ccl(&xml).unwrap();
//! let analysis = Engine::new(&VowelGroupOracle::new()).score(&document).unwrap();
//!
//! println!("{} {}", analysis.report.readability_score, analysis.report.interpretation);
//! ```
#![deny(unsafe_code)]

pub mod ccl;
pub mod config;
pub mod document;
pub mod error;
pub mod html;
pub mod indices;
pub mod interpret;
pub mod pipeline;
pub mod premorph;
pub mod readability;
pub mod report;
pub mod scales;
pub mod stats;
pub mod syllables;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use ccl::DocumentFormat;
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel, ScoringOptions};
pub use document::{Paragraph, Reading, Sentence, TaggedDocument, Token, Word};
pub use error::{
    ConfigError, ConfigResult, DocumentError, DocumentResult, PipelineError, PipelineResult,
    ScoringError, ScoringResult,
};
pub use readability::{Analysis, Engine};
pub use report::ReadabilityReport;
pub use syllables::{Language, SyllableOracle, VowelGroupOracle};
