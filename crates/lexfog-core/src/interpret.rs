//! General verdict.
//!
//! The grades of the four surface-form indices are averaged and scaled onto
//! [`GENERAL_SCALE_MESSAGES`]; base-form indices are reported but never
//! aggregated.

use crate::indices::Indices;
use crate::scales::{
    GENERAL_SCALE_MESSAGES, IndexFamily, Interpretation, MAX_READABILITY_POINTS,
    TOTAL_ORTH_INDICES,
};

/// Interpretations of all seven indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretations {
    /// Fog over lemmas.
    pub fog_base: Interpretation,
    /// Fog over surface forms.
    pub fog_orth: Interpretation,
    /// Linear Pisarek over lemmas.
    pub pisarek_linear_base: Interpretation,
    /// Linear Pisarek over surface forms.
    pub pisarek_linear_orth: Interpretation,
    /// Nonlinear Pisarek over lemmas.
    pub pisarek_nonlinear_base: Interpretation,
    /// Nonlinear Pisarek over surface forms.
    pub pisarek_nonlinear_orth: Interpretation,
    /// LIX.
    pub lix: Interpretation,
}

impl Interpretations {
    /// Place every index on its family's scale.
    pub fn of(indices: &Indices) -> Self {
        Self {
            fog_base: IndexFamily::Fog.interpret(indices.fog_base),
            fog_orth: IndexFamily::Fog.interpret(indices.fog_orth),
            pisarek_linear_base: IndexFamily::Pisarek.interpret(indices.pisarek_linear_base),
            pisarek_linear_orth: IndexFamily::Pisarek.interpret(indices.pisarek_linear_orth),
            pisarek_nonlinear_base: IndexFamily::Pisarek.interpret(indices.pisarek_nonlinear_base),
            pisarek_nonlinear_orth: IndexFamily::Pisarek.interpret(indices.pisarek_nonlinear_orth),
            lix: IndexFamily::Lix.interpret(indices.lix),
        }
    }

    /// Grades of the indices that feed the verdict.
    pub fn orth_grades(&self) -> [f64; TOTAL_ORTH_INDICES] {
        [
            self.fog_orth.grade,
            self.pisarek_linear_orth.grade,
            self.pisarek_nonlinear_orth.grade,
            self.lix.grade,
        ]
    }
}

/// The aggregated verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// 0-based index into [`GENERAL_SCALE_MESSAGES`].
    pub level: usize,
    /// Verdict message.
    pub message: &'static str,
}

impl Verdict {
    /// Average the grades and scale them onto the general messages.
    pub fn from_grades(grades: &[f64; TOTAL_ORTH_INDICES]) -> Self {
        let levels = GENERAL_SCALE_MESSAGES.len();
        let mean = grades.iter().sum::<f64>() / TOTAL_ORTH_INDICES as f64;
        let scaled = (mean * levels as f64).round_ties_even();
        // grades are in [0, 1), but a scale with many bands could still round up to `levels`
        let level = if scaled.is_finite() && scaled > 0.0 {
            (scaled as usize).min(levels - 1)
        } else {
            0
        };
        Self {
            level,
            message: GENERAL_SCALE_MESSAGES[level],
        }
    }

    /// `"k/N"`, with `k` 1-based.
    pub fn score(&self) -> String {
        format!("{}/{}", self.level + 1, GENERAL_SCALE_MESSAGES.len())
    }
}

/// `ceil(MAX_READABILITY_POINTS - sum of the surface-form indices)`.
pub fn readability_points(indices: &Indices) -> i64 {
    (MAX_READABILITY_POINTS - indices.orth_sum()).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(fog: f64, linear: f64, nonlinear: f64, lix: f64) -> Indices {
        Indices {
            asl: 5.0,
            fog_base: fog,
            fog_orth: fog,
            pisarek_linear_base: linear,
            pisarek_linear_orth: linear,
            pisarek_nonlinear_base: nonlinear,
            pisarek_nonlinear_orth: nonlinear,
            lix,
        }
    }

    #[test]
    fn easiest_text_gets_first_level() {
        let verdict = Verdict::from_grades(&[0.0; 4]);
        assert_eq!(verdict.level, 0);
        assert_eq!(verdict.score(), "1/6");
        assert_eq!(verdict.message, GENERAL_SCALE_MESSAGES[0]);
    }

    #[test]
    fn hardest_bands_stay_in_range() {
        let i = indices(100.0, 100.0, 100.0, 100.0);
        let verdict = Verdict::from_grades(&Interpretations::of(&i).orth_grades());
        // (5/6 + 4/5 + 4/5 + 4/5) / 4 * 6 = 4.85 -> 5
        assert_eq!(verdict.level, 5);
        assert_eq!(verdict.score(), "6/6");
    }

    #[test]
    fn level_rounds_half_to_even() {
        // mean 0.25 * 6 = 1.5 -> 2
        assert_eq!(Verdict::from_grades(&[0.25; 4]).level, 2);
        // mean 0.75 * 6 = 4.5 -> 4
        assert_eq!(Verdict::from_grades(&[0.75; 4]).level, 4);
    }

    #[test]
    fn degenerate_grades_clamp() {
        assert_eq!(Verdict::from_grades(&[1.0; 4]).level, 5);
        assert_eq!(Verdict::from_grades(&[f64::NAN; 4]).level, 0);
    }

    #[test]
    fn worked_example_verdict() {
        let i = indices(10.0, 9.33, 10.31, 5.0);
        let interp = Interpretations::of(&i);
        // fog 10.0 -> band 2/6, linear 9.33 -> 1/5, nonlinear 10.31 -> 2/5, lix 5.0 -> 0/5
        let grades = interp.orth_grades();
        assert!((grades[0] - 2.0 / 6.0).abs() < 1e-12);
        assert!((grades[1] - 1.0 / 5.0).abs() < 1e-12);
        assert!((grades[2] - 2.0 / 5.0).abs() < 1e-12);
        assert_eq!(grades[3], 0.0);
        // mean 0.2333 * 6 = 1.4 -> 1
        assert_eq!(Verdict::from_grades(&grades).score(), "2/6");
        // 110 - 34.64 = 75.36 -> 76
        assert_eq!(readability_points(&i), 76);
    }

    #[test]
    fn points_go_negative_for_extreme_text() {
        let i = indices(40.0, 30.0, 30.0, 80.0);
        assert_eq!(readability_points(&i), -70);
    }
}
