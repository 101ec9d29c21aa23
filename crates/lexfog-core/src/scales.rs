//! Difficulty scales for the readability indices.
//!
//! Each index family has an ordered table of half-open bands `[lower, upper)`
//! starting at zero; the last band is unbounded. Looking a value up yields a
//! human-readable message and a normalized grade in `[0, 1)`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ceiling used to turn the summed orth indices into "points remaining".
pub const MAX_READABILITY_POINTS: f64 = 110.0;

/// Number of indices that feed the general verdict.
pub const TOTAL_ORTH_INDICES: usize = 4;

/// One band of a difficulty scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Exclusive upper bound; `f64::INFINITY` for the last band.
    pub upper: f64,
    /// Message describing texts in this band.
    pub message: &'static str,
}

impl Band {
    const fn new(lower: f64, upper: f64, message: &'static str) -> Self {
        Self {
            lower,
            upper,
            message,
        }
    }

    /// Whether `value` falls inside `[lower, upper)`.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value < self.upper
    }
}

/// An ordered, contiguous list of bands covering `[0, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyScale {
    bands: &'static [Band],
}

/// Result of placing a value on a scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Interpretation {
    /// Message of the matching band.
    pub message: String,
    /// `band_index / band_count`, a severity signal in `[0, 1)`.
    pub grade: f64,
}

impl DifficultyScale {
    /// Wrap a static band table.
    pub const fn new(bands: &'static [Band]) -> Self {
        Self { bands }
    }

    /// The bands in ascending order.
    pub const fn bands(&self) -> &'static [Band] {
        self.bands
    }

    /// Index of the band `value` falls into.
    ///
    /// Total: values below the first bound land in the first band, values
    /// past every bound (and NaN) in the last one.
    pub fn band_index(&self, value: f64) -> usize {
        self.bands
            .iter()
            .position(|band| value < band.upper)
            .unwrap_or_else(|| self.bands.len().saturating_sub(1))
    }

    /// Classify `value`.
    pub fn interpret(&self, value: f64) -> Interpretation {
        let index = self.band_index(value);
        let message = self.bands.get(index).map_or("", |band| band.message);
        Interpretation {
            message: message.to_string(),
            grade: index as f64 / self.bands.len().max(1) as f64,
        }
    }
}

/// The index families that have their own scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFamily {
    /// Gunning-Fog style index.
    Fog,
    /// Pisarek linear and nonlinear indices.
    Pisarek,
    /// Björnsson's LIX.
    Lix,
}

impl IndexFamily {
    /// The scale used to interpret this family's values.
    pub const fn scale(self) -> DifficultyScale {
        match self {
            Self::Fog => FOG_SCALE,
            Self::Pisarek => PISAREK_SCALE,
            Self::Lix => LIX_SCALE,
        }
    }

    /// Classify a value of this family.
    pub fn interpret(self, value: f64) -> Interpretation {
        self.scale().interpret(value)
    }
}

/// Fog: approximate years of schooling needed.
pub const FOG_SCALE: DifficultyScale = DifficultyScale::new(FOG_BANDS);

const FOG_BANDS: &[Band] = &[
    Band::new(0.0, 7.0, "very easy text, understandable for primary school pupils"),
    Band::new(7.0, 10.0, "easy text, understandable for lower secondary school pupils"),
    Band::new(10.0, 13.0, "fairly difficult text, understandable for upper secondary school pupils"),
    Band::new(13.0, 16.0, "difficult text, understandable for university students"),
    Band::new(16.0, 18.0, "very difficult text, understandable for university graduates"),
    Band::new(18.0, f64::INFINITY, "extremely difficult text, understandable for specialists"),
];

/// Pisarek: both the linear and the nonlinear variant.
pub const PISAREK_SCALE: DifficultyScale = DifficultyScale::new(PISAREK_BANDS);

const PISAREK_BANDS: &[Band] = &[
    Band::new(0.0, 7.0, "very easy text"),
    Band::new(7.0, 10.0, "easy text"),
    Band::new(10.0, 13.0, "fairly difficult text"),
    Band::new(13.0, 16.0, "difficult text"),
    Band::new(16.0, f64::INFINITY, "very difficult text"),
];

/// LIX: average sentence length plus share of long words.
pub const LIX_SCALE: DifficultyScale = DifficultyScale::new(LIX_BANDS);

const LIX_BANDS: &[Band] = &[
    Band::new(0.0, 25.0, "very easy text, typical of children's books"),
    Band::new(25.0, 35.0, "easy text, typical of fiction"),
    Band::new(35.0, 45.0, "average text, typical of the press"),
    Band::new(45.0, 55.0, "difficult text, typical of specialist literature"),
    Band::new(55.0, f64::INFINITY, "very difficult text, typical of official documents"),
];

/// Messages of the general verdict, from easiest to hardest.
pub const GENERAL_SCALE_MESSAGES: [&str; 6] = [
    "The text is very easy to read.",
    "The text is easy to read.",
    "The text is fairly easy to read.",
    "The text is fairly difficult to read.",
    "The text is difficult to read.",
    "The text is very difficult to read.",
];
