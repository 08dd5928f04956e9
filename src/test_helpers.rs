//! Shared test utilities for the simple-frame test suite.
//!
//! Provides synthetic images with known luma statistics, a sample shooting
//! record, and an in-memory asset source that records lookups.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let img = solid_image(4000, 3000, 51); // avg luma 0.2, variance 0
//! let record = sony_record();
//! let assets = MockAssets::with(&[("brands/sony.png", 400, 100)]);
//! ```

use crate::imaging::{AssetInfo, AssetSource, BackendError};
use crate::metadata::ShootingRecord;
use image::{DynamicImage, GrayImage, Luma};
use std::sync::Mutex;

// =========================================================================
// Images
// =========================================================================

/// Uniform grey image: avg luma `value / 255`, variance 0.
pub fn solid_image(width: u32, height: u32, value: u8) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
}

/// Rows alternating between `even` and `odd` luma.
///
/// With a width divisible by 4 every row is sampled, so the variance is
/// `((odd - even) / 2)^2`.
pub fn striped_image(width: u32, height: u32, even: u8, odd: u8) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_fn(width, height, |_, y| {
        Luma([if y % 2 == 0 { even } else { odd }])
    }))
}

// =========================================================================
// Metadata
// =========================================================================

pub fn sony_record() -> ShootingRecord {
    ShootingRecord {
        make: "SONY".into(),
        model: "ILCE-7RM5".into(),
        lens_model: "FE 24-70mm F2.8 GM".into(),
        focal_length: "35mm".into(),
        f_number: "f/2.8".into(),
        exposure_time: "1/250".into(),
        iso_speed: "400".into(),
        date_taken: None,
    }
}

// =========================================================================
// Assets
// =========================================================================

/// In-memory asset source. Unknown paths fail like a missing file.
#[derive(Default)]
pub struct MockAssets {
    entries: Vec<(String, u32, u32)>,
    pub lookups: Mutex<Vec<String>>,
}

impl MockAssets {
    pub fn with(entries: &[(&str, u32, u32)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(p, w, h)| (p.to_string(), *w, *h))
                .collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn looked_up(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl AssetSource for MockAssets {
    fn lookup(&self, path: &str) -> Result<AssetInfo, BackendError> {
        self.lookups.lock().unwrap().push(path.to_string());
        self.entries
            .iter()
            .find(|(p, _, _)| p == path)
            .map(|(p, w, h)| AssetInfo {
                path: p.clone(),
                width: *w,
                height: *h,
            })
            .ok_or_else(|| {
                BackendError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    path.to_string(),
                ))
            })
    }
}
