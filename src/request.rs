//! Per-render input.
//!
//! A [`CompositionRequest`] bundles everything one render needs: the
//! decoded image, its shooting record, the chosen template and the user's
//! edits. It is built fresh for every render and consumed by reference, so
//! concurrent renders never share mutable state.

use crate::imaging::{Dimensions, Overrides, PixelSource};
use crate::metadata::{ShootingRecord, resolve};
use crate::template::Template;
use serde::{Deserialize, Serialize};

/// User-entered text that replaces metadata. Blank fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextOverrides {
    pub make: String,
    pub model: String,
    pub lens: String,
    pub focal_length: String,
    pub aperture: String,
    pub shutter: String,
    pub iso: String,
}

/// A text slot on the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Make,
    Model,
    Lens,
    FocalLength,
    Aperture,
    Shutter,
    Iso,
}

impl TextField {
    fn pick<'a>(self, text: &'a TextOverrides, record: &'a ShootingRecord, template: &'a Template) -> [&'a str; 3] {
        let d = &template.defaults;
        match self {
            TextField::Make => [&text.make, &record.make, d.make],
            TextField::Model => [&text.model, &record.model, d.model],
            TextField::Lens => [&text.lens, &record.lens_model, d.lens],
            TextField::FocalLength => [&text.focal_length, &record.focal_length, d.focal_length],
            TextField::Aperture => [&text.aperture, &record.f_number, d.aperture],
            TextField::Shutter => [&text.shutter, &record.exposure_time, d.shutter],
            TextField::Iso => [&text.iso, &record.iso_speed, d.iso],
        }
    }
}

pub struct CompositionRequest<'a> {
    pub source: &'a dyn PixelSource,
    pub record: &'a ShootingRecord,
    pub template: &'a Template,
    pub text: TextOverrides,
    pub overrides: Overrides,
    pub margin_priority: bool,
    pub smart_adaptation: bool,
}

impl<'a> CompositionRequest<'a> {
    /// A request with no user edits: template toggles, and template pixel
    /// values scaled to the source image.
    pub fn new(
        source: &'a dyn PixelSource,
        record: &'a ShootingRecord,
        template: &'a Template,
    ) -> Self {
        Self {
            source,
            record,
            template,
            text: TextOverrides::default(),
            overrides: Overrides::from_template(template, source.dimensions()),
            margin_priority: template.margin_priority,
            smart_adaptation: template.smart_adaptation,
        }
    }

    pub fn with_text(self, text: TextOverrides) -> Self {
        Self { text, ..self }
    }

    pub fn with_overrides(self, overrides: Overrides) -> Self {
        Self { overrides, ..self }
    }

    pub fn with_margin_priority(self, margin_priority: bool) -> Self {
        Self {
            margin_priority,
            ..self
        }
    }

    pub fn with_smart_adaptation(self, smart_adaptation: bool) -> Self {
        Self {
            smart_adaptation,
            ..self
        }
    }

    pub fn image_dimensions(&self) -> Dimensions {
        self.source.dimensions()
    }

    /// Resolve a text slot: override, then metadata, then template default.
    /// Empty when none has a value.
    pub fn field(&self, field: TextField) -> String {
        let sources = field.pick(&self.text, self.record, self.template).map(Some);
        resolve(&sources).unwrap_or_default()
    }
}
