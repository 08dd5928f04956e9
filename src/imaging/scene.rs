//! Scene analysis: brightness and busyness of a region of the source.
//!
//! The compositor samples the bottom band of the photo to decide text
//! polarity and whether a legibility panel is needed. Sampling is coarse
//! (every 4th luma byte of the clipped region) and never fails: any pixel
//! access error yields [`SceneStats::FALLBACK`].

use super::backend::{Dimensions, PixelSource};
use serde::Serialize;
use tracing::debug;

/// Every Nth byte of the flattened luma buffer is sampled.
pub const SAMPLE_STEP: usize = 4;

/// Brightness and contrast of a sampled region.
///
/// `avg_luma` is in [0, 1]; `variance` is the population variance of the
/// raw 0-255 luma values, in [0, 65025].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneStats {
    pub avg_luma: f64,
    pub variance: f64,
}

impl SceneStats {
    /// Mid-grey, flat. Returned when pixels cannot be read.
    pub const FALLBACK: SceneStats = SceneStats {
        avg_luma: 0.5,
        variance: 0.0,
    };

    /// Returned when the clipped region is empty.
    pub const EMPTY: SceneStats = SceneStats {
        avg_luma: 0.0,
        variance: 0.0,
    };
}

/// Region of the source image, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Full-width band covering the bottom `fraction` of the image.
    pub fn bottom_band(image: Dimensions, fraction: f64) -> Self {
        let h = image.height as f64;
        Self::new(0.0, h * (1.0 - fraction), image.width as f64, h * fraction)
    }

    fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Measure average luma and luma variance of `region`.
///
/// The region is clipped to the image with integer truncation. An empty
/// clip gives [`SceneStats::EMPTY`]; a read failure gives
/// [`SceneStats::FALLBACK`].
pub fn analyze_region(source: &dyn PixelSource, region: Region) -> SceneStats {
    if !region.is_finite() {
        debug!(?region, "non-finite sample region");
        return SceneStats::FALLBACK;
    }

    let bounds = source.dimensions();
    let x = region.x.max(0.0).trunc();
    let y = region.y.max(0.0).trunc();
    let width = (bounds.width as f64 - x).min(region.width).trunc();
    let height = (bounds.height as f64 - y).min(region.height).trunc();

    if width <= 0.0 || height <= 0.0 {
        return SceneStats::EMPTY;
    }

    match source.luma_region(x as u32, y as u32, width as u32, height as u32) {
        Ok(luma) => stats_from_luma(&luma),
        Err(e) => {
            debug!(error = %e, "scene sampling failed, using neutral stats");
            SceneStats::FALLBACK
        }
    }
}

/// Mean and population variance over every [`SAMPLE_STEP`]th byte.
pub fn stats_from_luma(luma: &[u8]) -> SceneStats {
    let mut count = 0u64;
    let mut sum = 0u64;
    let mut sum_sq = 0u64;
    for &v in luma.iter().step_by(SAMPLE_STEP) {
        let v = v as u64;
        count += 1;
        sum += v;
        sum_sq += v * v;
    }

    if count == 0 {
        return SceneStats::EMPTY;
    }

    let n = count as f64;
    let mean = sum as f64 / n;
    let variance = (sum_sq as f64 / n - mean * mean).max(0.0);
    SceneStats {
        avg_luma: mean / 255.0,
        variance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::BackendError;
    use std::sync::Mutex;

    /// In-memory source with a fixed luma value, recording the regions it
    /// was asked for.
    struct FlatSource {
        dims: Dimensions,
        value: u8,
        requests: Mutex<Vec<(u32, u32, u32, u32)>>,
    }

    impl FlatSource {
        fn new(width: u32, height: u32, value: u8) -> Self {
            Self {
                dims: Dimensions::new(width, height),
                value,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl PixelSource for FlatSource {
        fn dimensions(&self) -> Dimensions {
            self.dims
        }

        fn luma_region(
            &self,
            x: u32,
            y: u32,
            width: u32,
            height: u32,
        ) -> Result<Vec<u8>, BackendError> {
            self.requests.lock().unwrap().push((x, y, width, height));
            Ok(vec![self.value; (width * height) as usize])
        }
    }

    struct BrokenSource;

    impl PixelSource for BrokenSource {
        fn dimensions(&self) -> Dimensions {
            Dimensions::new(100, 100)
        }

        fn luma_region(&self, _: u32, _: u32, _: u32, _: u32) -> Result<Vec<u8>, BackendError> {
            Err(BackendError::ProcessingFailed("decoder gone".into()))
        }
    }

    // =========================================================================
    // stats_from_luma
    // =========================================================================

    #[test]
    fn uniform_buffer_has_zero_variance() {
        let stats = stats_from_luma(&[51; 64]);
        assert!((stats.avg_luma - 0.2).abs() < 1e-9);
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn only_every_fourth_byte_is_sampled() {
        // Sampled bytes are all 0; the 255s in between are skipped.
        let buf: Vec<u8> = (0..32).map(|i| if i % 4 == 0 { 0 } else { 255 }).collect();
        assert_eq!(stats_from_luma(&buf), SceneStats::EMPTY);
    }

    #[test]
    fn half_black_half_white_variance() {
        // Samples alternate 0 and 255: mean 127.5, variance 127.5^2.
        let buf: Vec<u8> = (0..64)
            .map(|i| if (i / 4) % 2 == 0 { 0 } else { 255 })
            .collect();
        let stats = stats_from_luma(&buf);
        assert!((stats.avg_luma - 0.5).abs() < 1e-9);
        assert!((stats.variance - 16256.25).abs() < 1e-6);
    }

    #[test]
    fn empty_buffer_is_empty_stats() {
        assert_eq!(stats_from_luma(&[]), SceneStats::EMPTY);
    }

    // =========================================================================
    // analyze_region
    // =========================================================================

    #[test]
    fn region_is_clipped_with_truncation() {
        let src = FlatSource::new(100, 80, 255);
        let stats = analyze_region(&src, Region::new(10.7, 60.9, 500.0, 500.0));
        assert!((stats.avg_luma - 1.0).abs() < 1e-9);
        assert_eq!(src.requests.lock().unwrap()[0], (10, 60, 90, 20));
    }

    #[test]
    fn negative_origin_clamps_to_zero() {
        let src = FlatSource::new(50, 50, 0);
        analyze_region(&src, Region::new(-20.0, -5.0, 10.0, 10.0));
        assert_eq!(src.requests.lock().unwrap()[0], (0, 0, 10, 10));
    }

    #[test]
    fn empty_clip_returns_zero_stats_without_reading() {
        let src = FlatSource::new(50, 50, 200);
        let stats = analyze_region(&src, Region::new(60.0, 0.0, 10.0, 10.0));
        assert_eq!(stats, SceneStats::EMPTY);
        assert!(src.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn read_failure_returns_fallback() {
        let stats = analyze_region(&BrokenSource, Region::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(stats, SceneStats::FALLBACK);
    }

    #[test]
    fn non_finite_region_returns_fallback() {
        let src = FlatSource::new(50, 50, 0);
        let stats = analyze_region(&src, Region::new(f64::NAN, 0.0, 10.0, 10.0));
        assert_eq!(stats, SceneStats::FALLBACK);
    }

    #[test]
    fn bottom_band_covers_last_fifteen_percent() {
        let band = Region::bottom_band(Dimensions::new(4000, 3000), 0.15);
        assert_eq!(band.x, 0.0);
        assert!((band.y - 2550.0).abs() < 1e-6);
        assert_eq!(band.width, 4000.0);
        assert!((band.height - 450.0).abs() < 1e-6);
    }

    #[test]
    fn works_on_dynamic_image() {
        let img = image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
            40,
            40,
            image::Luma([204]),
        ));
        let stats = analyze_region(&img, Region::bottom_band(img.dimensions(), 0.15));
        assert!((stats.avg_luma - 0.8).abs() < 1e-9);
        assert_eq!(stats.variance, 0.0);
    }
}
