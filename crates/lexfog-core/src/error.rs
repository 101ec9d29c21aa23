//! Error types for lexfog-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while scoring a tagged document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// The document has no sentences, or no words left after filtering.
    #[error("document has no scorable sentences or words")]
    EmptyDocument,
}

/// Result type alias using [`ScoringError`].
pub type ScoringResult<T> = Result<T, ScoringError>;

/// Errors raised while reading a tagged document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The tagger output is not well-formed XML.
    #[error("malformed tagger output at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the reader.
        position: u64,
        /// Reader error description.
        message: String,
    },

    /// A `tok` element has no `orth` text.
    #[error("token {index} in sentence {sentence} has no surface form")]
    MissingOrth {
        /// 1-based sentence number within the document.
        sentence: usize,
        /// 0-based token index within the sentence.
        index: usize,
    },

    /// A `tok` element has no complete `lex` reading.
    #[error("token {orth:?} in sentence {sentence} has no lexical reading")]
    MissingReading {
        /// 1-based sentence number within the document.
        sentence: usize,
        /// Surface form of the offending token.
        orth: String,
    },

    /// The input contains no document at all.
    #[error("tagger output is empty")]
    Empty,

    /// JSON input could not be decoded.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`DocumentError`].
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised at the boundary with the conversion and tagging services.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The uploaded file is in a format the converter does not handle.
    #[error("unsupported input format {format:?}; accepted formats: {accepted}")]
    UnsupportedInputFormat {
        /// The format that was rejected.
        format: String,
        /// Comma-separated list of accepted formats.
        accepted: String,
    },

    /// The tagger returned nothing usable.
    #[error("tagger returned no usable document")]
    TaggingUnavailable,

    /// The tagged document could not be read.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The tagged document could not be scored.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Result type alias using [`PipelineError`].
pub type PipelineResult<T> = Result<T, PipelineError>;
