//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The header line names
//! what was looked at (the shot, the template, the frame); details follow as
//! indented context lines.
//!
//! # Output Format
//!
//! ## Inspect
//!
//! ```text
//! Shot → DSC01234.jpg
//!     Camera: SONY ILCE-7RM5
//!     Lens: FE 24-70mm F2.8 GM
//!     Exposure: 35mm  f/2.8  1/250  ISO400
//!     Taken: 2024-05-17 18:42:07
//! ```
//!
//! ## Templates
//!
//! ```text
//! 001 classic (brand-top)
//!     White border, brand on top, shooting parameters below
//!     Sizing: 85% scale
//! ```
//!
//! ## Compose
//!
//! ```text
//! classic → 4529x3529
//!     Margins: top 264.7, bottom 264.7, left 264.7, right 264.7
//!     001 fill 4529x3529
//!     002 photo 4000x3000 at (264.7, 264.7)
//!     003 text "SONY"
//!     004 text "FL 35mm   Aperture f/2.8   Shutter 1/250   ISO400"
//!     Fingerprint: 6f1c…
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::compose::{Composition, Layer};
use crate::metadata::ShootingRecord;
use crate::template::Template;
use std::path::Path;

const MISSING: &str = "-";

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Join non-empty parts, or [`MISSING`] when all are empty.
fn join_present(parts: &[&str], sep: &str) -> String {
    let present: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    if present.is_empty() {
        MISSING.to_string()
    } else {
        present.join(sep)
    }
}

fn or_missing(value: &str) -> &str {
    if value.is_empty() { MISSING } else { value }
}

/// Truncate to `max` characters, appending "..." if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn px(value: f64) -> String {
    format!("{value:.1}")
}

// ============================================================================
// Inspect
// ============================================================================

pub fn format_record(record: &ShootingRecord, source: &Path) -> Vec<String> {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    let iso = crate::compose::iso_label(&record.iso_speed);

    let mut lines = vec![format!("Shot → {name}")];
    lines.push(format!(
        "{}Camera: {}",
        indent(1),
        join_present(&[record.make.as_str(), record.model.as_str()], " ")
    ));
    lines.push(format!("{}Lens: {}", indent(1), or_missing(&record.lens_model)));
    lines.push(format!(
        "{}Exposure: {}",
        indent(1),
        join_present(&[
            record.focal_length.as_str(),
            record.f_number.as_str(),
            record.exposure_time.as_str(),
            iso.as_str(),
        ], "  ")
    ));
    if let Some(taken) = record.date_taken {
        lines.push(format!("{}Taken: {}", indent(1), taken));
    }
    lines
}

pub fn print_record(record: &ShootingRecord, source: &Path) {
    for line in format_record(record, source) {
        println!("{}", line);
    }
}

// ============================================================================
// Templates
// ============================================================================

pub fn format_templates(templates: &[Template]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, t) in templates.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            t.name,
            t.layout.label()
        ));
        lines.push(format!("{}{}", indent(1), t.description));

        let mut sizing = vec![if t.margin_priority {
            "fixed margins".to_string()
        } else {
            format!("{}% scale", t.scale_percent)
        }];
        if t.reference_short_edge > 0.0 {
            sizing.push(format!("authored at {}px", t.reference_short_edge));
        }
        if t.smart_adaptation {
            sizing.push("adaptive".to_string());
        }
        if t.floors.is_some() {
            sizing.push("floors".to_string());
        }
        lines.push(format!("{}Sizing: {}", indent(1), sizing.join(", ")));
    }
    lines
}

pub fn print_templates(templates: &[Template]) {
    for line in format_templates(templates) {
        println!("{}", line);
    }
}

// ============================================================================
// Compose
// ============================================================================

fn layer_line(index: usize, layer: &Layer) -> String {
    let detail = match layer {
        Layer::Fill { rect, color } => {
            format!("{}x{} {}", px(rect.width), px(rect.height), color.to_hex())
        }
        Layer::Photo {
            rect,
            corner_radius,
            shadow,
        } => {
            let mut s = format!(
                "{}x{} at ({}, {})",
                rect.width,
                rect.height,
                px(rect.x),
                px(rect.y)
            );
            if *corner_radius > 0.0 {
                s.push_str(&format!(", radius {}", px(*corner_radius)));
            }
            if let Some(shadow) = shadow {
                s.push_str(&format!(", shadow {}", px(shadow.blur_radius)));
            }
            s
        }
        Layer::Panel(panel) => format!(
            "{}x{} at ({}, {}) {}",
            px(panel.rect.width),
            px(panel.rect.height),
            px(panel.rect.x),
            px(panel.rect.y),
            panel.color.to_hex()
        ),
        Layer::Mark { asset, rect } => format!(
            "{} {}x{} at ({}, {})",
            asset,
            px(rect.width),
            px(rect.height),
            px(rect.x),
            px(rect.y)
        ),
        Layer::Text(line) => format!("\"{}\"", truncate(&line.text(), 60)),
    };
    format!("{} {} {}", format_index(index), layer.kind(), detail)
}

pub fn format_composition(composition: &Composition, fingerprint: &str) -> Vec<String> {
    let g = &composition.geometry;
    let mut lines = vec![format!(
        "{} → {}x{}",
        composition.template, composition.canvas_width, composition.canvas_height
    )];
    lines.push(format!(
        "{}Margins: top {}, bottom {}, left {}, right {}",
        indent(1),
        px(g.margins.top),
        px(g.margins.bottom),
        px(g.margins.left),
        px(g.margins.right)
    ));
    if let Some(scene) = composition.scene {
        lines.push(format!(
            "{}Scene: luma {:.2}, variance {:.1}",
            indent(1),
            scene.avg_luma,
            scene.variance
        ));
    }
    for (i, layer) in composition.layers.iter().enumerate() {
        lines.push(format!("{}{}", indent(1), layer_line(i + 1, layer)));
    }
    lines.push(format!("{}Fingerprint: {}", indent(1), fingerprint));
    lines
}

pub fn print_composition(composition: &Composition, fingerprint: &str) {
    for line in format_composition(composition, fingerprint) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::config::EngineConfig;
    use crate::imaging::NoAssets;
    use crate::request::CompositionRequest;
    use crate::template;
    use crate::test_helpers::{solid_image, sony_record};
    use chrono::NaiveDate;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn truncate_long_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }

    // =========================================================================
    // Inspect
    // =========================================================================

    #[test]
    fn record_output() {
        let mut record = sony_record();
        record.date_taken = NaiveDate::from_ymd_opt(2024, 5, 17)
            .and_then(|d| d.and_hms_opt(18, 42, 7));
        let lines = format_record(&record, Path::new("/photos/DSC01234.jpg"));
        assert_eq!(
            lines,
            [
                "Shot → DSC01234.jpg",
                "    Camera: SONY ILCE-7RM5",
                "    Lens: FE 24-70mm F2.8 GM",
                "    Exposure: 35mm  f/2.8  1/250  ISO400",
                "    Taken: 2024-05-17 18:42:07",
            ]
        );
    }

    #[test]
    fn empty_record_shows_placeholders() {
        let lines = format_record(&ShootingRecord::default(), Path::new("x.png"));
        assert_eq!(
            lines,
            [
                "Shot → x.png",
                "    Camera: -",
                "    Lens: -",
                "    Exposure: -",
            ]
        );
    }

    // =========================================================================
    // Templates
    // =========================================================================

    #[test]
    fn templates_output_lists_catalog() {
        let lines = format_templates(template::catalog());
        assert_eq!(lines[0], "001 classic (brand-top)");
        assert_eq!(lines[2], "    Sizing: 85% scale");
        assert_eq!(lines.len(), template::catalog().len() * 3);
        assert!(lines.iter().any(|l| l.contains("hasselblad-watermark (brand-bottom)")));
        assert!(lines.iter().any(|l| l.contains("fixed margins, authored at 3000px, adaptive")));
    }

    // =========================================================================
    // Compose
    // =========================================================================

    #[test]
    fn composition_output() {
        let img = solid_image(4000, 3000, 128);
        let record = sony_record();
        let req = CompositionRequest::new(&img, &record, template::find("classic").unwrap());
        let c = compose(&req, &NoAssets, &EngineConfig::default()).unwrap();

        let lines = format_composition(&c, "abc123");
        assert_eq!(lines[0], "classic → 4529x3529");
        assert_eq!(
            lines[1],
            "    Margins: top 264.7, bottom 264.7, left 264.7, right 264.7"
        );
        assert_eq!(lines[2], "    001 fill 4529.4x3529.4 #ffffff");
        assert_eq!(lines[3], "    002 photo 4000x3000 at (264.7, 264.7)");
        assert_eq!(lines[4], "    003 text \"SONY\"");
        assert_eq!(lines.last().unwrap(), "    Fingerprint: abc123");
    }
}
