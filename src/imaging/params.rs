//! Parameter types for frame layout.
//!
//! These structs describe *what* frame to build, not *how* to draw it. They
//! are the interface between templates and user edits on one side and the
//! pure geometry in [`calculations`](super::calculations) on the other.
//!
//! ## Types
//!
//! - [`Margins`]: Border thickness on each side, in source-image pixels.
//! - [`Overrides`]: Live numeric settings for one render. Seeded from a
//!   template and scaled to the image by [`Overrides::from_template`].
//! - [`ResolvedGeometry`]: Final margins, border size and image placement.

use super::backend::Dimensions;
use super::calculations::resolution_factor;
use crate::template::Template;
use serde::{Deserialize, Serialize};

/// Border thickness on each side of the photo.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(
            self.top * factor,
            self.bottom * factor,
            self.left * factor,
            self.right * factor,
        )
    }

    pub(crate) fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("top margin", self.top),
            ("bottom margin", self.bottom),
            ("left margin", self.left),
            ("right margin", self.right),
        ]
    }
}

/// Numeric settings for one render.
///
/// Pixel quantities are in source-image pixels. `scale_percent` is the
/// image's share of the frame in scale-priority mode (100 = no automatic
/// border).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overrides {
    pub scale_percent: f64,
    pub margins: Margins,
    pub corner_radius: f64,
    pub shadow_size: f64,
    pub text_spacing: f64,
    pub logo_offset: f64,
}

impl Overrides {
    /// Template values scaled by the image's resolution factor.
    ///
    /// `scale_percent` is a ratio and is copied unscaled.
    pub fn from_template(template: &Template, image: Dimensions) -> Self {
        let factor = resolution_factor(
            image.width as f64,
            image.height as f64,
            template.reference_short_edge,
        );
        Self {
            scale_percent: template.scale_percent,
            margins: template.margins.scaled(factor),
            corner_radius: template.corner_radius * factor,
            shadow_size: template.shadow_size * factor,
            text_spacing: template.text_spacing * factor,
            logo_offset: template.logo_offset * factor,
        }
    }
}

/// Final frame geometry for one image.
///
/// The image sits at `(image_x, image_y)` = `(left, top)` inside a border of
/// `border_width x border_height`. The canvas is the border size truncated
/// to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedGeometry {
    pub image_width: f64,
    pub image_height: f64,
    pub margins: Margins,
    pub border_width: f64,
    pub border_height: f64,
}

impl ResolvedGeometry {
    pub fn new(image: Dimensions, margins: Margins) -> Self {
        let image_width = image.width as f64;
        let image_height = image.height as f64;
        Self {
            image_width,
            image_height,
            margins,
            border_width: image_width + margins.left + margins.right,
            border_height: image_height + margins.top + margins.bottom,
        }
    }

    pub fn image_x(&self) -> f64 {
        self.margins.left
    }

    pub fn image_y(&self) -> f64 {
        self.margins.top
    }

    /// Canvas size in whole pixels (truncated).
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.border_width as u32, self.border_height as u32)
    }

    pub fn is_portrait(&self) -> bool {
        self.image_height > self.image_width
    }
}
