//! Pure calculation functions for frame geometry and text sizing.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use super::params::{Margins, Overrides, ResolvedGeometry};
use crate::template::{LayoutMode, MarginFloors, Template};
use thiserror::Error;

pub const MIN_RESOLUTION_FACTOR: f64 = 0.1;
pub const MAX_RESOLUTION_FACTOR: f64 = 10.0;

/// Brand letters, as a share of border height.
const BRAND_LETTER_RATIO: f64 = 0.02;
/// Brand-top parameter line, as a share of the border's short edge.
const CAPTION_RATIO: f64 = 0.018;
/// Two-line layout, first line, as a share of the border's short edge.
const SIGNATURE_RATIO: f64 = 0.025;
const SIGNATURE_DETAIL_SCALE: f64 = 0.75;
const SIGNATURE_LINE_GAP_RATIO: f64 = 0.005;
/// Brand-mark height for templates without a `logo_base_height`.
const MARK_HEIGHT_RATIO: f64 = 0.025;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("image has no area ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("scale must be a finite percentage above zero, got {0}")]
    InvalidScale(f64),
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidLength { field: &'static str, value: f64 },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("frame for a {width}x{height} image does not fit a canvas")]
    CanvasOverflow { width: u32, height: u32 },
}

/// Scale factor mapping template pixels to this image's pixels.
///
/// `min(width, height) / reference_short_edge`, clamped to
/// [[`MIN_RESOLUTION_FACTOR`], [`MAX_RESOLUTION_FACTOR`]]. A reference of 0
/// (or anything not positive and finite) disables adaptation.
///
/// # Examples
/// ```
/// # use simple_frame::imaging::resolution_factor;
/// assert_eq!(resolution_factor(6000.0, 4000.0, 2000.0), 2.0);
/// assert_eq!(resolution_factor(6000.0, 4000.0, 0.0), 1.0);
/// assert_eq!(resolution_factor(100.0, 100.0, 3000.0), 0.1);
/// ```
pub fn resolution_factor(width: f64, height: f64, reference_short_edge: f64) -> f64 {
    if !(reference_short_edge.is_finite() && reference_short_edge > 0.0) {
        return 1.0;
    }
    (width.min(height) / reference_short_edge).clamp(MIN_RESOLUTION_FACTOR, MAX_RESOLUTION_FACTOR)
}

/// Compute margins and border size for `image` framed by `template`.
///
/// In margin-priority mode the override margins are used as-is. Otherwise
/// the frame is sized so the image takes `scale_percent` of the border
/// height, and each override margin acts as a minimum. Template floors are
/// applied last.
pub fn resolve_geometry(
    image: Dimensions,
    template: &Template,
    overrides: &Overrides,
    margin_priority: bool,
) -> Result<ResolvedGeometry, GeometryError> {
    validate_inputs(image, overrides)?;

    let margins = if margin_priority {
        overrides.margins
    } else {
        let h = image.height as f64;
        let base = (h / (overrides.scale_percent / 100.0) - h) / 2.0;
        let o = overrides.margins;
        Margins::new(
            base.max(o.top).max(0.0),
            base.max(o.bottom).max(0.0),
            base.max(o.left).max(0.0),
            base.max(o.right).max(0.0),
        )
    };

    let margins = match &template.floors {
        Some(floors) => apply_floors(image, template, margins, floors),
        None => margins,
    };

    let geometry = ResolvedGeometry::new(image, margins);
    if !(geometry.border_width.is_finite()
        && geometry.border_height.is_finite()
        && geometry.border_width <= u32::MAX as f64
        && geometry.border_height <= u32::MAX as f64)
    {
        return Err(GeometryError::CanvasOverflow {
            width: image.width,
            height: image.height,
        });
    }
    Ok(geometry)
}

fn validate_inputs(image: Dimensions, overrides: &Overrides) -> Result<(), GeometryError> {
    if image.width == 0 || image.height == 0 {
        return Err(GeometryError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }
    let scale = overrides.scale_percent;
    if !(scale.is_finite() && scale > 0.0) {
        return Err(GeometryError::InvalidScale(scale));
    }

    let lengths = overrides.margins.named().into_iter().chain([
        ("corner radius", overrides.corner_radius),
        ("shadow size", overrides.shadow_size),
        ("text spacing", overrides.text_spacing),
    ]);
    for (field, value) in lengths {
        if !(value.is_finite() && value >= 0.0) {
            return Err(GeometryError::InvalidLength { field, value });
        }
    }

    if !overrides.logo_offset.is_finite() {
        return Err(GeometryError::NonFinite {
            field: "logo offset",
            value: overrides.logo_offset,
        });
    }
    Ok(())
}

/// Raise margins to the template's minimums.
///
/// Logo height and font size come from the provisional canvas; paddings are
/// template pixels and scale with the image.
fn apply_floors(
    image: Dimensions,
    template: &Template,
    margins: Margins,
    floors: &MarginFloors,
) -> Margins {
    let provisional = ResolvedGeometry::new(image, margins);
    let (w, h) = (provisional.border_width, provisional.border_height);
    let factor = resolution_factor(
        image.width as f64,
        image.height as f64,
        template.reference_short_edge,
    );
    let logo = brand_mark_height(template, w, h);
    let font = parameter_font_size(template.layout, w, h);

    let mut out = margins;
    if let Some(padding) = floors.top_padding {
        out.top = out.top.max(2.0 * logo + padding * factor);
    }
    if let Some(padding) = floors.bottom_padding {
        out.bottom = out.bottom.max(2.5 * font + padding * factor);
    }
    if floors.sides {
        out.left = out.left.max(2.0 * font);
        out.right = out.right.max(2.0 * font);
    }
    out
}

/// Height of the brand mark on a border of the given size.
pub fn brand_mark_height(template: &Template, border_width: f64, border_height: f64) -> f64 {
    match template.logo_base_height {
        Some(base) => {
            base * resolution_factor(border_width, border_height, template.reference_short_edge)
        }
        None => border_height * MARK_HEIGHT_RATIO,
    }
}

pub fn brand_letter_size(border_height: f64) -> f64 {
    border_height * BRAND_LETTER_RATIO
}

pub fn caption_font_size(border_width: f64, border_height: f64) -> f64 {
    border_width.min(border_height) * CAPTION_RATIO
}

/// Font size of the first (brand + model) line of the two-line layout.
pub fn signature_font_size(border_width: f64, border_height: f64) -> f64 {
    border_width.min(border_height) * SIGNATURE_RATIO
}

/// Font size of the second (lens + exposure) line of the two-line layout.
pub fn signature_detail_size(border_width: f64, border_height: f64) -> f64 {
    signature_font_size(border_width, border_height) * SIGNATURE_DETAIL_SCALE
}

pub fn signature_line_gap(border_height: f64) -> f64 {
    border_height * SIGNATURE_LINE_GAP_RATIO
}

/// Size of the text that carries shooting parameters in `layout`.
pub fn parameter_font_size(layout: LayoutMode, border_width: f64, border_height: f64) -> f64 {
    match layout {
        LayoutMode::TwoLinesBottomCentered => signature_detail_size(border_width, border_height),
        LayoutMode::BrandTopExifBottom | LayoutMode::BrandBottomCentered => {
            caption_font_size(border_width, border_height)
        }
    }
}
