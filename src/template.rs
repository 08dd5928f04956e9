//! Built-in frame templates.
//!
//! A template is an immutable bundle of frame settings: how much border,
//! where the brand goes, what text is drawn and how it adapts to the photo.
//! The catalog is fixed at compile time and addressed by name or index.
//!
//! Pixel values are authored against `reference_short_edge`; the request
//! scales them to each image (see [`Overrides::from_template`]).
//!
//! | Template | Layout | Sizing |
//! |---|---|---|
//! | `classic` | brand top, parameters bottom | 85% scale |
//! | `gallery` | brand top, parameters bottom | 90% scale, rounded + shadow, floors |
//! | `hasselblad-watermark` | mark bottom-centred | margins, forced Hasselblad mark |
//! | `signature` | two lines bottom-centred | margins, floors |
//! | `overlay-signature` | two lines over the photo | no border |
//!
//! [`Overrides::from_template`]: crate::imaging::Overrides::from_template

use crate::imaging::Margins;
use serde::Serialize;

/// Where the brand and parameter text go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Brand centred in the top band, parameter line centred in the bottom band.
    BrandTopExifBottom,
    /// Brand alone, centred near the bottom edge.
    BrandBottomCentered,
    /// Brand + model over lens + exposure, centred near the bottom edge.
    TwoLinesBottomCentered,
}

impl LayoutMode {
    pub fn label(self) -> &'static str {
        match self {
            LayoutMode::BrandTopExifBottom => "brand-top",
            LayoutMode::BrandBottomCentered => "brand-bottom",
            LayoutMode::TwoLinesBottomCentered => "two-lines",
        }
    }
}

/// A brand mark in two polarities.
///
/// `light` is drawn on dark backgrounds, `dark` on bright ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkAssets {
    pub light: &'static str,
    pub dark: &'static str,
}

/// Text used when neither an override nor the metadata has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextDefaults {
    pub make: &'static str,
    pub model: &'static str,
    pub lens: &'static str,
    pub focal_length: &'static str,
    pub aperture: &'static str,
    pub shutter: &'static str,
    pub iso: &'static str,
}

impl TextDefaults {
    pub const EMPTY: TextDefaults = TextDefaults {
        make: "",
        model: "",
        lens: "",
        focal_length: "",
        aperture: "",
        shutter: "",
        iso: "",
    };
}

/// Minimum margins that keep text and marks from touching the photo.
///
/// Paddings are template pixels. `None` disables that floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginFloors {
    /// top >= 2 x mark height + padding
    pub top_padding: Option<f64>,
    /// bottom >= 2.5 x parameter font size + padding
    pub bottom_padding: Option<f64>,
    /// left/right >= 2 x parameter font size
    pub sides: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub scale_percent: f64,
    pub margins: Margins,
    pub corner_radius: f64,
    pub shadow_size: f64,
    pub text_spacing: f64,
    pub logo_offset: f64,
    pub layout: LayoutMode,
    pub margin_priority: bool,
    /// Drawn instead of any brand detected from the metadata.
    pub forced_mark: Option<MarkAssets>,
    pub smart_adaptation: bool,
    pub defaults: TextDefaults,
    /// Short edge the pixel values were authored for. 0 disables scaling.
    pub reference_short_edge: f64,
    /// Mark height in reference pixels, scaled by the border's short edge.
    pub logo_base_height: Option<f64>,
    pub floors: Option<MarginFloors>,
}

pub const HASSELBLAD_MARK: MarkAssets = MarkAssets {
    light: "brands/hasselblad_white.png",
    dark: "brands/hasselblad.png",
};

static CATALOG: [Template; 5] = [
    Template {
        name: "classic",
        description: "White border, brand on top, shooting parameters below",
        scale_percent: 85.0,
        margins: Margins::uniform(0.0),
        corner_radius: 0.0,
        shadow_size: 0.0,
        text_spacing: 10.0,
        logo_offset: 0.0,
        layout: LayoutMode::BrandTopExifBottom,
        margin_priority: false,
        forced_mark: None,
        smart_adaptation: false,
        defaults: TextDefaults::EMPTY,
        reference_short_edge: 0.0,
        logo_base_height: None,
        floors: None,
    },
    Template {
        name: "gallery",
        description: "Rounded print with a soft shadow on a wide mat",
        scale_percent: 90.0,
        margins: Margins::new(120.0, 120.0, 60.0, 60.0),
        corner_radius: 24.0,
        shadow_size: 40.0,
        text_spacing: 12.0,
        logo_offset: 0.0,
        layout: LayoutMode::BrandTopExifBottom,
        margin_priority: false,
        forced_mark: None,
        smart_adaptation: false,
        defaults: TextDefaults::EMPTY,
        reference_short_edge: 3000.0,
        logo_base_height: None,
        floors: Some(MarginFloors {
            top_padding: Some(40.0),
            bottom_padding: Some(40.0),
            sides: true,
        }),
    },
    Template {
        name: "hasselblad-watermark",
        description: "Hasselblad mark centred near the bottom edge",
        scale_percent: 100.0,
        margins: Margins::new(0.0, 0.0, 0.0, 0.0),
        corner_radius: 0.0,
        shadow_size: 0.0,
        text_spacing: 0.0,
        logo_offset: 120.0,
        layout: LayoutMode::BrandBottomCentered,
        margin_priority: true,
        forced_mark: Some(HASSELBLAD_MARK),
        smart_adaptation: true,
        defaults: TextDefaults {
            make: "HASSELBLAD",
            ..TextDefaults::EMPTY
        },
        reference_short_edge: 3000.0,
        logo_base_height: Some(32.0),
        floors: None,
    },
    Template {
        name: "signature",
        description: "Brand and model over lens and exposure, on a bottom strip",
        scale_percent: 100.0,
        margins: Margins::new(80.0, 320.0, 80.0, 80.0),
        corner_radius: 0.0,
        shadow_size: 0.0,
        text_spacing: 0.0,
        logo_offset: 0.0,
        layout: LayoutMode::TwoLinesBottomCentered,
        margin_priority: true,
        forced_mark: None,
        smart_adaptation: true,
        defaults: TextDefaults::EMPTY,
        reference_short_edge: 3000.0,
        logo_base_height: None,
        floors: Some(MarginFloors {
            top_padding: None,
            bottom_padding: Some(60.0),
            sides: false,
        }),
    },
    Template {
        name: "overlay-signature",
        description: "Two-line signature drawn over the photo, no border",
        scale_percent: 100.0,
        margins: Margins::uniform(0.0),
        corner_radius: 0.0,
        shadow_size: 0.0,
        text_spacing: 0.0,
        logo_offset: -150.0,
        layout: LayoutMode::TwoLinesBottomCentered,
        margin_priority: true,
        forced_mark: None,
        smart_adaptation: true,
        defaults: TextDefaults::EMPTY,
        reference_short_edge: 3000.0,
        logo_base_height: None,
        floors: None,
    },
];

/// All built-in templates, in display order.
pub fn catalog() -> &'static [Template] {
    &CATALOG
}

/// Look up a template by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// Look up a template by zero-based catalog position.
pub fn by_index(index: usize) -> Option<&'static Template> {
    CATALOG.get(index)
}
