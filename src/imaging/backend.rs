//! Pixel access trait and shared types.
//!
//! The engine never decodes or owns pixels. It reads them through
//! [`PixelSource`], which only has to answer two questions: how big is the
//! image, and what is the 8-bit luma of a given rectangle.
//!
//! The production implementation is `image::DynamicImage`. Tests use small
//! in-memory sources, including ones that fail on purpose.

use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Region {x},{y} {width}x{height} is outside the {bounds_width}x{bounds_height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        bounds_width: u32,
        bounds_height: u32,
    },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn short_edge(self) -> u32 {
        self.width.min(self.height)
    }

    pub fn is_portrait(self) -> bool {
        self.height > self.width
    }
}

/// Read-only access to a decoded source image.
///
/// `Sync` so one decoded image can back renders on several workers.
pub trait PixelSource: Sync {
    fn dimensions(&self) -> Dimensions;

    /// Row-major 8-bit luma of the rectangle, `width * height` bytes.
    ///
    /// The rectangle is already clipped by the caller; implementations should
    /// still reject anything outside their bounds.
    fn luma_region(&self, x: u32, y: u32, width: u32, height: u32)
    -> Result<Vec<u8>, BackendError>;
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    fn luma_region(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, BackendError> {
        let fits = |start: u32, len: u32, bound: u32| start.checked_add(len).is_some_and(|end| end <= bound);
        if !fits(x, width, self.width()) || !fits(y, height, self.height()) {
            return Err(BackendError::OutOfBounds {
                x,
                y,
                width,
                height,
                bounds_width: self.width(),
                bounds_height: self.height(),
            });
        }
        Ok(self.crop_imm(x, y, width, height).to_luma8().into_raw())
    }
}
