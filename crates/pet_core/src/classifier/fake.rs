//! Deterministic stand-in classifier for tests and model-less demo runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::classifier::Classifier;
use crate::error::PetError;
use crate::preprocess::PixelTensor;

/// Classifier used when no model artifact is available.
///
/// Scores can be scripted up front; once the script runs out, the score is
/// derived from the pixel data so the same image keeps the same verdict.
pub struct FakeClassifier {
    scripted: Mutex<VecDeque<f32>>,
}

impl FakeClassifier {
    pub fn new() -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
        }
    }

    /// Queues scores to be returned by the next `predict` calls, in order.
    pub fn with_scores<I: IntoIterator<Item = f32>>(scores: I) -> Self {
        Self {
            scripted: Mutex::new(scores.into_iter().collect()),
        }
    }

    /// FNV-style fold over the pixel bytes, mapped into `[0, 1)`.
    fn derive(tensor: &PixelTensor) -> f32 {
        let mut hash: u32 = 2_166_136_261;
        for &value in tensor.as_slice() {
            hash ^= (value * 255.0) as u8 as u32;
            hash = hash.wrapping_mul(16_777_619);
        }
        (hash % 10_000) as f32 / 10_000.0
    }
}

impl Default for FakeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for FakeClassifier {
    fn predict(&self, tensor: &PixelTensor) -> Result<f32, PetError> {
        if let Some(score) = self.scripted.lock().ok().and_then(|mut q| q.pop_front()) {
            return Ok(score);
        }
        Ok(Self::derive(tensor))
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;
    use crate::preprocess::INPUT_SIZE;

    fn tensor(fill: u8) -> PixelTensor {
        let img = RgbImage::from_pixel(INPUT_SIZE, INPUT_SIZE, Rgb([fill, fill, fill]));
        PixelTensor::from_rgb(&img)
    }

    #[test]
    fn scripted_scores_come_back_in_order() {
        let fake = FakeClassifier::with_scores([0.97, 0.005, 0.5]);
        let t = tensor(100);
        assert_eq!(fake.predict(&t).unwrap(), 0.97);
        assert_eq!(fake.predict(&t).unwrap(), 0.005);
        assert_eq!(fake.predict(&t).unwrap(), 0.5);
    }

    #[test]
    fn derived_score_is_stable_per_image() {
        let fake = FakeClassifier::new();
        let t = tensor(42);
        let first = fake.predict(&t).unwrap();
        let second = fake.predict(&t).unwrap();
        assert_eq!(first, second);
        assert!((0.0..1.0).contains(&first));
    }

    #[test]
    fn different_images_generally_score_differently() {
        let fake = FakeClassifier::new();
        let a = fake.predict(&tensor(1)).unwrap();
        let b = fake.predict(&tensor(200)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn falls_back_to_derived_after_script_is_drained() {
        let fake = FakeClassifier::with_scores([0.3]);
        let t = tensor(9);
        assert_eq!(fake.predict(&t).unwrap(), 0.3);
        let derived = fake.predict(&t).unwrap();
        assert_eq!(derived, FakeClassifier::derive(&t));
    }
}
