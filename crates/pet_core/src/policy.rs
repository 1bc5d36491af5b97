//! The confidence policy: one raw model score in, one display verdict out.
//!
//! The model emits a single dog-likelihood in `[0, 1]` (0 = certainly cat,
//! 1 = certainly dog). Bands are checked in order; the first match wins:
//!
//! * `score > 0.96` is a dog, confidence `score * 100`
//! * `score < 0.01` is a cat, confidence `(1 - score) * 100`
//! * `0.1 <= score <= 0.9` is neither, confidence `max(score, 1 - score) * 100`
//! * everything else (`[0.01, 0.1)` and `(0.9, 0.96]`) is uncertain, same
//!   confidence formula as the mid band
//!
//! Note that the boundaries `0.96` and `0.01` themselves fall through to
//! `Uncertain`: the dog and cat comparisons are strict.

use serde::{Deserialize, Serialize};

use crate::error::PetError;

/// Scores strictly above this are called a dog outright.
pub const DOG_THRESHOLD: f32 = 0.96;
/// Scores strictly below this are called a cat outright.
pub const CAT_THRESHOLD: f32 = 0.01;
/// Inclusive lower edge of the "not a pet" mid band.
pub const NOT_PET_MIN: f32 = 0.1;
/// Inclusive upper edge of the "not a pet" mid band.
pub const NOT_PET_MAX: f32 = 0.9;

/// Display label attached to one classified image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Dog,
    Cat,
    NotPet,
    Uncertain,
}

impl Label {
    /// Card headline shown above the confidence figure.
    pub fn headline(self) -> &'static str {
        match self {
            Label::Dog => "🐶 It's a Dog!",
            Label::Cat => "🐱 It's a Cat!",
            Label::NotPet => "🚫 Not a Cat or Dog!",
            Label::Uncertain => "🤔 Uncertain Result",
        }
    }

    /// One-sentence explanation shown under the confidence figure.
    pub fn message(self) -> &'static str {
        match self {
            Label::Dog => "Woof! This adorable pup has been detected with high confidence.",
            Label::Cat => "Meow! This cute kitty has been identified with high confidence.",
            Label::NotPet => {
                "This doesn't appear to be a cat or dog. Please upload a clear photo \
                 of a cat or dog for accurate classification!"
            }
            Label::Uncertain => "The image might be unclear. Try uploading a clearer photo!",
        }
    }
}

/// Outcome of classifying one inference score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub label: Label,
    /// Percentage in `(0, 100]`.
    pub confidence_percent: f32,
    pub message: &'static str,
}

impl Verdict {
    /// Confidence formatted the way the UI shows it, one decimal place.
    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.confidence_percent)
    }
}

/// Maps a dog-likelihood score to a display verdict.
///
/// Rejects NaN and anything outside `[0, 1]` instead of guessing.
pub fn classify(score: f32) -> Result<Verdict, PetError> {
    if !(0.0..=1.0).contains(&score) {
        return Err(PetError::InvalidScore { score });
    }
    let (label, confidence_percent) = if score > DOG_THRESHOLD {
        (Label::Dog, score * 100.0)
    } else if score < CAT_THRESHOLD {
        (Label::Cat, (1.0 - score) * 100.0)
    } else if (NOT_PET_MIN..=NOT_PET_MAX).contains(&score) {
        (Label::NotPet, score.max(1.0 - score) * 100.0)
    } else {
        (Label::Uncertain, score.max(1.0 - score) * 100.0)
    };
    Ok(Verdict {
        label,
        confidence_percent,
        message: label.message(),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn confident_dog() {
        let verdict = classify(0.98).unwrap();
        assert_eq!(verdict.label, Label::Dog);
        assert_abs_diff_eq!(verdict.confidence_percent, 98.0, epsilon = 1e-4);
        assert_eq!(verdict.confidence_display(), "98.0%");
    }

    #[test]
    fn confident_cat() {
        let verdict = classify(0.004).unwrap();
        assert_eq!(verdict.label, Label::Cat);
        assert_abs_diff_eq!(verdict.confidence_percent, 99.6, epsilon = 1e-4);
    }

    #[test]
    fn band_edges_stay_uncertain() {
        assert_eq!(classify(0.96).unwrap().label, Label::Uncertain);
        assert_eq!(classify(0.01).unwrap().label, Label::Uncertain);
    }

    #[test]
    fn mid_band_is_not_a_pet() {
        assert_eq!(classify(0.1).unwrap().label, Label::NotPet);
        assert_eq!(classify(0.9).unwrap().label, Label::NotPet);
        assert_eq!(classify(0.5).unwrap().label, Label::NotPet);
    }

    #[test]
    fn nan_is_rejected() {
        assert!(matches!(
            classify(f32::NAN),
            Err(PetError::InvalidScore { .. })
        ));
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(matches!(
            classify(1.2),
            Err(PetError::InvalidScore { .. })
        ));
        assert!(matches!(
            classify(-0.2),
            Err(PetError::InvalidScore { .. })
        ));
    }

    #[test]
    fn verdict_carries_the_label_message() {
        let verdict = classify(0.5).unwrap();
        assert_eq!(verdict.message, Label::NotPet.message());
    }
}
