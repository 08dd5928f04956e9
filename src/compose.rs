//! Compositor: one request in, an ordered layer list out.
//!
//! ## Layer order
//!
//! 1. White fill over the whole canvas
//! 2. The photo at `(left, top)`, rounded and optionally shadowed
//! 3. Legibility panel, when smart adaptation asks for one
//! 4. Brand element: a mark image, or letter-spaced text when no mark
//!    resolves
//! 5. Text lines
//!
//! Layers are descriptions. Glyph shaping, blurs and pixel blending belong
//! to whatever rasterizes them; this module only decides what goes where.
//!
//! ## Brand element
//!
//! Exactly one per frame (none in the two-line layout, which spells the
//! brand in its first line). Candidates, in order: the template's forced
//! mark, the detected brand's mark, then letters. A missing or corrupt
//! asset moves on to the next candidate.
//!
//! ## Smart adaptation
//!
//! When enabled, the bottom band of the photo is sampled with
//! [`analyze_region`]:
//!
//! | Layout | Condition | Effect |
//! |---|---|---|
//! | Brand bottom | luma > `bright_luma` | dark mark variant, black letters |
//! | Two lines | bottom margin < `compact_margin`, luma < `dark_luma` | light text |
//! | Two lines | bottom margin < `compact_margin`, variance > `busy_variance` | panel + glow |

use crate::brand::{MarkVariant, RecognizedBrand};
use crate::config::EngineConfig;
use crate::imaging::{
    AssetInfo, AssetSource, GeometryError, Region, ResolvedGeometry, SceneStats, analyze_region,
    brand_letter_size, brand_mark_height, caption_font_size, resolve_geometry,
    signature_detail_size, signature_font_size, signature_line_gap,
};
use crate::request::{CompositionRequest, TextField};
use crate::template::LayoutMode;
use crate::types::{Color, Rect};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

/// Shown when no make resolves from overrides, metadata or template.
pub const FALLBACK_BRAND: &str = "CAMERA";

const PARAMETER_TEXT: Color = Color::rgb(50, 50, 50);
const SIGNATURE_TEXT: Color = Color::rgb(30, 30, 30);
const SIGNATURE_DETAIL_TEXT: Color = Color::rgb(80, 80, 80);
const SIGNATURE_DETAIL_ON_DARK: Color = Color::rgb(220, 220, 220);

const SHADOW_DIRECTION_DEG: f64 = 315.0;
const SHADOW_OPACITY: f64 = 0.4;

const PANEL_OPACITY: f64 = 0.3;
const PANEL_CORNER_RADIUS: f64 = 10.0;
const PANEL_BLUR_RADIUS: f64 = 20.0;
const PANEL_PADDING_X: f64 = 20.0;
const PANEL_PADDING_Y: f64 = 10.0;
const GLOW_BLUR_PRIMARY: f64 = 10.0;
const GLOW_BLUR_DETAIL: f64 = 8.0;

/// Average advance of a glyph, as a share of font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;
/// Line box height, as a share of font size.
const LINE_HEIGHT_RATIO: f64 = 1.2;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
}

// =============================================================================
// Layer model
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Which edge of a text line `Anchor::y` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

/// Lines are always centred horizontally on `center_x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anchor {
    pub center_x: f64,
    pub y: f64,
    pub vertical: VerticalAnchor,
}

/// A run of text in one style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub family: String,
    pub weight: FontWeight,
    pub size: f64,
    pub color: Color,
    /// Extra horizontal space after this block.
    pub gap_after: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Glow {
    pub color: Color,
    pub blur_radius: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub blocks: Vec<TextBlock>,
    pub anchor: Anchor,
    pub glow: Option<Glow>,
}

impl TextLine {
    /// Concatenated block text.
    pub fn text(&self) -> String {
        self.blocks.iter().map(|b| b.text.as_str()).collect()
    }

    /// Approximate rendered width; real metrics belong to the rasterizer.
    pub fn estimated_width(&self) -> f64 {
        self.blocks
            .iter()
            .map(|b| b.text.chars().count() as f64 * b.size * GLYPH_WIDTH_RATIO + b.gap_after)
            .sum()
    }

    /// Height of the tallest block's line box.
    pub fn line_height(&self) -> f64 {
        self.blocks
            .iter()
            .map(|b| b.size * LINE_HEIGHT_RATIO)
            .fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DropShadow {
    pub color: Color,
    pub direction_deg: f64,
    pub depth: f64,
    pub blur_radius: f64,
    pub opacity: f64,
}

/// Translucent, blurred, rounded rectangle behind text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Panel {
    pub rect: Rect,
    pub color: Color,
    pub opacity: f64,
    pub corner_radius: f64,
    pub blur_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Fill {
        rect: Rect,
        color: Color,
    },
    Photo {
        rect: Rect,
        corner_radius: f64,
        shadow: Option<DropShadow>,
    },
    Panel(Panel),
    Mark {
        asset: String,
        rect: Rect,
    },
    Text(TextLine),
}

impl Layer {
    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Fill { .. } => "fill",
            Layer::Photo { .. } => "photo",
            Layer::Panel(_) => "panel",
            Layer::Mark { .. } => "mark",
            Layer::Text(_) => "text",
        }
    }
}

/// A finished frame description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub template: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub geometry: ResolvedGeometry,
    /// Bottom-band stats, when smart adaptation sampled the photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneStats>,
    pub layers: Vec<Layer>,
}

impl Composition {
    /// SHA-256 of the serialized layer list.
    ///
    /// Identical requests give identical fingerprints, so this doubles as a
    /// render cache key.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(&self.layers)?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }

    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Text(line) => Some(line),
            _ => None,
        })
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Build the layer list for one request.
///
/// Fails only when the geometry is invalid. Unreadable pixels and missing
/// brand marks degrade to neutral stats and letters.
#[tracing::instrument(skip_all, fields(template = request.template.name))]
pub fn compose(
    request: &CompositionRequest<'_>,
    assets: &dyn AssetSource,
    config: &EngineConfig,
) -> Result<Composition, ComposeError> {
    let geometry = resolve_geometry(
        request.image_dimensions(),
        request.template,
        &request.overrides,
        request.margin_priority,
    )?;
    let (canvas_width, canvas_height) = geometry.canvas_size();

    let mut frame = Frame {
        request,
        assets,
        config,
        geometry,
        scene: None,
        layers: Vec::new(),
    };
    frame.push_background();
    frame.push_photo();
    match request.template.layout {
        LayoutMode::BrandTopExifBottom => frame.brand_top_exif_bottom(),
        LayoutMode::BrandBottomCentered => frame.brand_bottom_centered(),
        LayoutMode::TwoLinesBottomCentered => frame.two_lines_bottom_centered(),
    }

    debug!(
        canvas_width,
        canvas_height,
        layers = frame.layers.len(),
        "composed frame"
    );
    Ok(Composition {
        template: request.template.name.to_string(),
        canvas_width,
        canvas_height,
        geometry,
        scene: frame.scene,
        layers: frame.layers,
    })
}

/// Display name for the brand: the recognized brand's name, else the make
/// in uppercase, else [`FALLBACK_BRAND`].
pub fn brand_label(request: &CompositionRequest<'_>) -> (String, Option<RecognizedBrand>) {
    let make = request.field(TextField::Make);
    match RecognizedBrand::detect(&make) {
        Some(brand) => (brand.label().to_string(), Some(brand)),
        None if make.is_empty() => (FALLBACK_BRAND.to_string(), None),
        None => (make.to_uppercase(), None),
    }
}

/// ISO text with an `ISO` prefix, unless empty or already prefixed.
pub fn iso_label(iso: &str) -> String {
    if iso.is_empty() || iso.starts_with("ISO") {
        iso.to_string()
    } else {
        format!("ISO{iso}")
    }
}

enum BrandElement {
    Mark(AssetInfo),
    Letters(String),
}

struct Frame<'r, 'a> {
    request: &'r CompositionRequest<'a>,
    assets: &'r dyn AssetSource,
    config: &'r EngineConfig,
    geometry: ResolvedGeometry,
    scene: Option<SceneStats>,
    layers: Vec<Layer>,
}

impl Frame<'_, '_> {
    fn width(&self) -> f64 {
        self.geometry.border_width
    }

    fn height(&self) -> f64 {
        self.geometry.border_height
    }

    fn push_background(&mut self) {
        self.layers.push(Layer::Fill {
            rect: Rect::new(0.0, 0.0, self.width(), self.height()),
            color: Color::WHITE,
        });
    }

    fn push_photo(&mut self) {
        let o = &self.request.overrides;
        let shadow = (o.shadow_size > 0.0).then(|| DropShadow {
            color: Color::BLACK,
            direction_deg: SHADOW_DIRECTION_DEG,
            depth: o.shadow_size / 2.0,
            blur_radius: o.shadow_size,
            opacity: SHADOW_OPACITY,
        });
        let g = &self.geometry;
        self.layers.push(Layer::Photo {
            rect: Rect::new(g.image_x(), g.image_y(), g.image_width, g.image_height),
            corner_radius: o.corner_radius,
            shadow,
        });
    }

    /// Bottom-band stats of the source. Sampled once per frame.
    fn sample_bottom_band(&mut self) -> SceneStats {
        if let Some(stats) = self.scene {
            return stats;
        }
        let band = Region::bottom_band(
            self.request.image_dimensions(),
            self.config.adaptation.sample_band,
        );
        let stats = analyze_region(self.request.source, band);
        debug!(avg_luma = stats.avg_luma, variance = stats.variance, "sampled bottom band");
        self.scene = Some(stats);
        stats
    }

    fn choose_brand(&self, variant: MarkVariant) -> BrandElement {
        let (label, recognized) = brand_label(self.request);
        let candidates = self
            .request
            .template
            .forced_mark
            .into_iter()
            .chain(recognized.map(RecognizedBrand::assets))
            .map(|assets| assets.variant(variant));

        for path in candidates {
            match self.assets.lookup(path) {
                Ok(info) if info.width > 0 && info.height > 0 => return BrandElement::Mark(info),
                Ok(_) => debug!(asset = path, "brand mark has no pixels"),
                Err(e) => debug!(asset = path, error = %e, "brand mark unavailable"),
            }
        }
        BrandElement::Letters(label)
    }

    /// One bold block per character, `text_spacing` apart.
    fn letter_line(&self, label: &str, color: Color, anchor: Anchor) -> TextLine {
        let size = brand_letter_size(self.height());
        let spacing = self.request.overrides.text_spacing;
        let chars: Vec<char> = label.to_uppercase().chars().collect();
        let last = chars.len().saturating_sub(1);
        let blocks = chars
            .iter()
            .enumerate()
            .map(|(i, c)| TextBlock {
                text: c.to_string(),
                family: self.config.fonts.brand.clone(),
                weight: FontWeight::Bold,
                size,
                color,
                gap_after: if i < last { spacing } else { 0.0 },
            })
            .collect();
        TextLine {
            blocks,
            anchor,
            glow: None,
        }
    }

    fn mark_size(&self, info: &AssetInfo) -> (f64, f64) {
        let height = brand_mark_height(self.request.template, self.width(), self.height());
        (height * info.aspect_ratio(), height)
    }

    // -------------------------------------------------------------------------
    // Layouts
    // -------------------------------------------------------------------------

    fn brand_top_exif_bottom(&mut self) {
        let (w, h) = (self.width(), self.height());
        let top = self.geometry.margins.top;
        let bottom = self.geometry.margins.bottom;

        match self.choose_brand(MarkVariant::Dark) {
            BrandElement::Mark(info) => {
                let (mw, mh) = self.mark_size(&info);
                self.layers.push(Layer::Mark {
                    rect: Rect::new((w - mw) / 2.0, (top - mh) / 2.0, mw, mh),
                    asset: info.path,
                });
            }
            BrandElement::Letters(label) => {
                let anchor = Anchor {
                    center_x: w / 2.0,
                    y: top / 2.0,
                    vertical: VerticalAnchor::Center,
                };
                let line = self.letter_line(&label, Color::BLACK, anchor);
                self.layers.push(Layer::Text(line));
            }
        }

        let r = self.request;
        let text = format!(
            "FL {}   Aperture {}   Shutter {}   {}",
            r.field(TextField::FocalLength),
            r.field(TextField::Aperture),
            r.field(TextField::Shutter),
            iso_label(&r.field(TextField::Iso)),
        );
        self.layers.push(Layer::Text(TextLine {
            blocks: vec![TextBlock {
                text,
                family: self.config.fonts.caption.clone(),
                weight: FontWeight::Normal,
                size: caption_font_size(w, h),
                color: PARAMETER_TEXT,
                gap_after: 0.0,
            }],
            anchor: Anchor {
                center_x: w / 2.0,
                y: h - bottom / 2.0,
                vertical: VerticalAnchor::Center,
            },
            glow: None,
        }));
    }

    fn brand_bottom_centered(&mut self) {
        let (w, h) = (self.width(), self.height());
        let coefficient = if self.geometry.is_portrait() { 1.6 } else { 1.3 };
        let offset = self.geometry.margins.bottom * coefficient + self.request.overrides.logo_offset;
        let baseline = h - offset;

        let (variant, color) = if self.request.smart_adaptation
            && self.sample_bottom_band().avg_luma > self.config.adaptation.bright_luma
        {
            debug!("bright bottom band, using dark mark");
            (MarkVariant::Dark, Color::BLACK)
        } else {
            (MarkVariant::Light, Color::WHITE)
        };

        match self.choose_brand(variant) {
            BrandElement::Mark(info) => {
                let (mw, mh) = self.mark_size(&info);
                self.layers.push(Layer::Mark {
                    rect: Rect::bottom_centered(w / 2.0, baseline, mw, mh),
                    asset: info.path,
                });
            }
            BrandElement::Letters(label) => {
                let anchor = Anchor {
                    center_x: w / 2.0,
                    y: baseline,
                    vertical: VerticalAnchor::Bottom,
                };
                let line = self.letter_line(&label, color, anchor);
                self.layers.push(Layer::Text(line));
            }
        }
    }

    fn two_lines_bottom_centered(&mut self) {
        let (w, h) = (self.width(), self.height());
        let cfg = &self.config.adaptation;
        let (dark_luma, busy_variance, compact_margin) =
            (cfg.dark_luma, cfg.busy_variance, cfg.compact_margin);

        let mut primary = SIGNATURE_TEXT;
        let mut detail = SIGNATURE_DETAIL_TEXT;
        let mut busy = false;
        if self.request.smart_adaptation {
            if self.geometry.margins.bottom < compact_margin {
                let stats = self.sample_bottom_band();
                if stats.avg_luma < dark_luma {
                    primary = Color::WHITE;
                    detail = SIGNATURE_DETAIL_ON_DARK;
                }
                busy = stats.variance > busy_variance;
            } else {
                debug!(
                    bottom_margin = self.geometry.margins.bottom,
                    "bottom margin wide enough, no adaptation"
                );
            }
        }
        let contrast = primary.opposite_polarity();
        let glow = |blur_radius| {
            busy.then_some(Glow {
                color: contrast,
                blur_radius,
                opacity: 1.0,
            })
        };

        let (brand, _) = brand_label(self.request);
        let r = self.request;
        let family = &self.config.fonts.signature;
        let size = signature_font_size(w, h);
        let detail_size = signature_detail_size(w, h);

        let mut first = vec![TextBlock {
            text: format!("{brand} "),
            family: family.clone(),
            weight: FontWeight::Bold,
            size,
            color: primary,
            gap_after: 0.0,
        }];
        let model = r.field(TextField::Model);
        if !model.is_empty() {
            first.push(TextBlock {
                text: model,
                family: family.clone(),
                weight: FontWeight::Normal,
                size,
                color: primary,
                gap_after: 0.0,
            });
        }

        let details: Vec<String> = [
            r.field(TextField::Lens),
            r.field(TextField::FocalLength),
            r.field(TextField::Aperture),
            r.field(TextField::Shutter),
            iso_label(&r.field(TextField::Iso)),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

        let base = h - (self.geometry.margins.bottom * 0.3 - r.overrides.logo_offset);
        let padding_y = if busy { PANEL_PADDING_Y } else { 0.0 };
        let center_x = w / 2.0;
        let mut cursor = base - padding_y;

        let second = (!details.is_empty()).then(|| TextLine {
            blocks: vec![TextBlock {
                text: details.join("  "),
                family: family.clone(),
                weight: FontWeight::Normal,
                size: detail_size,
                color: detail,
                gap_after: 0.0,
            }],
            anchor: Anchor {
                center_x,
                y: cursor,
                vertical: VerticalAnchor::Bottom,
            },
            glow: glow(GLOW_BLUR_DETAIL),
        });
        if let Some(line) = &second {
            cursor -= line.line_height() + signature_line_gap(h);
        }

        let first = TextLine {
            blocks: first,
            anchor: Anchor {
                center_x,
                y: cursor,
                vertical: VerticalAnchor::Bottom,
            },
            glow: glow(GLOW_BLUR_PRIMARY),
        };

        if busy {
            let widest = second
                .iter()
                .chain(std::iter::once(&first))
                .map(TextLine::estimated_width)
                .fold(0.0, f64::max);
            let top = cursor - first.line_height() - PANEL_PADDING_Y;
            let width = widest + 2.0 * PANEL_PADDING_X;
            debug!(variance = self.scene.map(|s| s.variance), "busy bottom band, adding panel");
            self.layers.push(Layer::Panel(Panel {
                rect: Rect::new(center_x - width / 2.0, top, width, base - top),
                color: contrast,
                opacity: PANEL_OPACITY,
                corner_radius: PANEL_CORNER_RADIUS,
                blur_radius: PANEL_BLUR_RADIUS,
            }));
        }

        self.layers.push(Layer::Text(first));
        if let Some(line) = second {
            self.layers.push(Layer::Text(line));
        }
    }
}
