//! From an uploaded document to a scored analysis.
//!
//! Converting rich formats and tagging are done by external services; this
//! module only fixes their interfaces and wires them together:
//!
//! ```text
//! SourceDocument --DocumentConverter--> paragraphs --compose_premorph--> premorph XML
//!   --Tagger--> CCL XML --parse_ccl--> TaggedDocument --Engine::score--> Analysis
//! ```

use camino::Utf8PathBuf;

use crate::ccl::parse_ccl;
use crate::error::{DocumentError, PipelineError, PipelineResult};
use crate::premorph::{compose_premorph, split_paragraphs};
use crate::readability::{Analysis, Engine};

/// A document as submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDocument {
    /// Text pasted directly.
    Text(String),
    /// An uploaded file.
    File {
        /// Original file name; its extension selects the format.
        name: Utf8PathBuf,
        /// Raw file contents.
        bytes: Vec<u8>,
    },
}

impl SourceDocument {
    /// Lowercased extension of an uploaded file, if any.
    pub fn extension(&self) -> Option<String> {
        match self {
            Self::Text(_) => None,
            Self::File { name, .. } => name.extension().map(str::to_ascii_lowercase),
        }
    }
}

/// Turns a submitted document into plain-text paragraphs.
pub trait DocumentConverter {
    /// Convert `source`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UnsupportedInputFormat`] when the format is not handled.
    fn convert(&self, source: &SourceDocument) -> PipelineResult<Vec<String>>;
}

/// Morphological tagger: premorph XML in, CCL XML out.
pub trait Tagger {
    /// Tag `premorph_xml`.
    ///
    /// # Errors
    ///
    /// Implementations report transport failures as
    /// [`PipelineError::TaggingUnavailable`].
    fn tag(&self, premorph_xml: &str) -> PipelineResult<String>;
}

impl<C: DocumentConverter + ?Sized> DocumentConverter for &C {
    fn convert(&self, source: &SourceDocument) -> PipelineResult<Vec<String>> {
        (**self).convert(source)
    }
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tag(&self, premorph_xml: &str) -> PipelineResult<String> {
        (**self).tag(premorph_xml)
    }
}

/// Converter for plain text, the one format handled locally.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextConverter;

impl PlainTextConverter {
    /// Extensions accepted for uploaded files.
    pub const ACCEPTED: &'static [&'static str] = &["txt"];

    fn reject(format: impl Into<String>) -> PipelineError {
        PipelineError::UnsupportedInputFormat {
            format: format.into(),
            accepted: Self::ACCEPTED.join(", "),
        }
    }
}

impl DocumentConverter for PlainTextConverter {
    fn convert(&self, source: &SourceDocument) -> PipelineResult<Vec<String>> {
        match source {
            SourceDocument::Text(text) => Ok(split_paragraphs(text)),
            SourceDocument::File { name, bytes } => {
                if let Some(ext) = source.extension()
                    && !Self::ACCEPTED.contains(&ext.as_str())
                {
                    return Err(Self::reject(ext));
                }
                let text = std::str::from_utf8(bytes).map_err(|_| {
                    tracing::debug!(file = %name, "upload is not valid UTF-8");
                    Self::reject("binary")
                })?;
                Ok(split_paragraphs(text))
            }
        }
    }
}

/// Runs conversion, tagging and scoring for one document at a time.
#[derive(Debug)]
pub struct Pipeline<'o, C, T> {
    converter: C,
    tagger: T,
    engine: Engine<'o>,
}

impl<'o, C: DocumentConverter, T: Tagger> Pipeline<'o, C, T> {
    /// Wire the collaborators together.
    pub const fn new(converter: C, tagger: T, engine: Engine<'o>) -> Self {
        Self {
            converter,
            tagger,
            engine,
        }
    }

    /// Analyze one submitted document.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::UnsupportedInputFormat`] from the converter.
    /// - [`PipelineError::TaggingUnavailable`] when the tagger fails or returns
    ///   nothing readable.
    /// - [`PipelineError::Document`] for structurally broken tagger output.
    /// - [`PipelineError::Scoring`] when nothing is left to score.
    #[tracing::instrument(skip_all, fields(ext = ?source.extension()))]
    pub fn analyze(&self, source: &SourceDocument) -> PipelineResult<Analysis> {
        let paragraphs = self.converter.convert(source)?;
        tracing::debug!(paragraphs = paragraphs.len(), "document converted");

        let premorph = compose_premorph(&paragraphs);
        let tagged = self.tagger.tag(&premorph)?;
        if tagged.trim().is_empty() {
            tracing::warn!("tagger returned an empty response");
            return Err(PipelineError::TaggingUnavailable);
        }

        let document = parse_ccl(&tagged).map_err(|err| match err {
            DocumentError::Empty | DocumentError::Xml { .. } => {
                tracing::warn!(error = %err, "tagger response is not CCL");
                PipelineError::TaggingUnavailable
            }
            other => PipelineError::Document(other),
        })?;

        Ok(self.engine.score(&document)?)
    }
}
