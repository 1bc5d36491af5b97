//! Image intake: decode an upload, resize it and normalize it into the
//! fixed-shape tensor the model consumes.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

use crate::error::PetError;

/// Edge length of the square model input.
pub const INPUT_SIZE: u32 = 256;
/// RGB.
pub const CHANNELS: usize = 3;

/// Returns true when the path carries an accepted image extension.
///
/// Matching is on the extension only (case-insensitive); decoding still
/// validates the actual bytes later.
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png"),
        None => false,
    }
}

/// Model input in NHWC layout (`[1, 256, 256, 3]`), channel values scaled
/// from bytes to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelTensor {
    data: Vec<f32>,
}

impl PixelTensor {
    /// Tensor shape as the model expects it: batch, height, width, channels.
    pub const SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, CHANNELS];

    /// Flattens an already-resized RGB image into the tensor layout.
    pub fn from_rgb(img: &RgbImage) -> Self {
        debug_assert_eq!(img.dimensions(), (INPUT_SIZE, INPUT_SIZE));
        let (width, height) = img.dimensions();
        let mut data = Vec::with_capacity((width * height) as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                let pixel = img.get_pixel(x, y);
                data.push(normalize_channel(pixel[0]));
                data.push(normalize_channel(pixel[1]));
                data.push(normalize_channel(pixel[2]));
            }
        }
        Self { data }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// An upload ready for analysis: the original pixels for preview plus the
/// normalized model input.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Full-resolution RGB copy of the upload.
    pub preview: RgbImage,
    pub tensor: PixelTensor,
}

/// Prepares an image file picked from disk.
pub fn prepare_file(path: &Path) -> Result<PreparedImage, PetError> {
    if !is_supported_image(path) {
        return Err(PetError::UnsupportedImage(path.display().to_string()));
    }
    let img = image::open(path)?;
    Ok(prepare(img))
}

/// Prepares in-memory upload bytes (drag and drop). `name` is only used for
/// the extension check and error reporting.
pub fn prepare_bytes(name: &str, bytes: &[u8]) -> Result<PreparedImage, PetError> {
    if !is_supported_image(Path::new(name)) {
        return Err(PetError::UnsupportedImage(name.to_string()));
    }
    let img = image::load_from_memory(bytes)?;
    Ok(prepare(img))
}

fn prepare(img: DynamicImage) -> PreparedImage {
    let preview = img.to_rgb8();
    // Stretch to the square input; aspect ratio is not preserved.
    let resized = img
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
        .to_rgb8();
    PreparedImage {
        preview,
        tensor: PixelTensor::from_rgb(&resized),
    }
}

fn normalize_channel(value: u8) -> f32 {
    value as f32 / 255.0
}
