//! Leaf image preprocessing
//!
//! Decodes an upload, resizes it so the shorter edge is 256 pixels and
//! lays the pixels out as CHW floats in `[0, 1]`.

use image::{imageops::FilterType, DynamicImage, RgbImage};

use super::ModelError;

/// Target length of the shorter edge
pub const SHORT_EDGE: u32 = 256;

/// Combined downsampling factor of the network (four 4x4 max pools)
const TOTAL_POOLING: u32 = 4 * 4 * 4 * 4;

/// A decoded image ready for the network
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    /// Pixel data, channel-major: `[3 * height * width]`
    pub data: Vec<f32>,
    pub height: usize,
    pub width: usize,
}

impl ImageTensor {
    /// Shape with a leading batch dimension of one
    pub fn shape(&self) -> [usize; 4] {
        [1, 3, self.height, self.width]
    }
}

/// Output size of a shorter-edge resize, truncating the longer edge
pub fn resized_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width <= height {
        let long = (SHORT_EDGE as u64 * height as u64 / width as u64) as u32;
        (SHORT_EDGE, long)
    } else {
        let long = (SHORT_EDGE as u64 * width as u64 / height as u64) as u32;
        (long, SHORT_EDGE)
    }
}

/// Whether the network's final feature map is exactly one cell for this edge
fn pools_to_single_cell(edge: u32) -> bool {
    edge / TOTAL_POOLING == 1
}

/// Decode raw bytes into an RGB image
pub fn decode(bytes: &[u8]) -> Result<RgbImage, ModelError> {
    let image = image::load_from_memory(bytes).map_err(|e| ModelError::Decode(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ModelError::Decode("image has no pixels".to_string()));
    }
    Ok(image.to_rgb8())
}

/// Resize and convert a decoded image into network input
pub fn to_tensor(image: RgbImage) -> Result<ImageTensor, ModelError> {
    let (width, height) = resized_dimensions(image.width(), image.height());
    if !pools_to_single_cell(width) || !pools_to_single_cell(height) {
        return Err(ModelError::UnsupportedShape { width, height });
    }

    let resized = DynamicImage::ImageRgb8(image)
        .resize_exact(width, height, FilterType::Triangle)
        .to_rgb8();

    let (width, height) = (width as usize, height as usize);
    let plane = width * height;
    let mut data = vec![0.0f32; 3 * plane];
    for (x, y, pixel) in resized.enumerate_pixels() {
        let offset = y as usize * width + x as usize;
        for channel in 0..3 {
            data[channel * plane + offset] = pixel[channel] as f32 / 255.0;
        }
    }

    Ok(ImageTensor {
        data,
        height,
        width,
    })
}

/// Full pipeline from uploaded bytes to network input
pub fn prepare(bytes: &[u8]) -> Result<ImageTensor, ModelError> {
    to_tensor(decode(bytes)?)
}
