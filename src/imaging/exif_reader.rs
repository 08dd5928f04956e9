//! Raw tag extraction with `kamadak-exif`.
//!
//! Reads every EXIF field from an image container (JPEG, TIFF, PNG, WebP,
//! HEIF) into a [`RawTagSet`], plus any XMP packet found in the file bytes
//! as an auxiliary map. Interpretation is left to
//! [`metadata::normalize`](crate::metadata::normalize).

use super::xmp_parser;
use crate::metadata::{RawTag, RawTagSet, RawValue, ShootingRecord, normalize};
use exif::{Context, Exif, Field, In, Reader, Value};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("EXIF error: {0}")]
    Exif(#[from] exif::Error),
}

/// Read all raw tags from a file.
pub fn read_raw_tags(path: &Path) -> Result<RawTagSet, MetadataError> {
    let bytes = std::fs::read(path)?;
    read_raw_tags_from_bytes(&bytes)
}

/// Read all raw tags from an in-memory image file.
pub fn read_raw_tags_from_bytes(bytes: &[u8]) -> Result<RawTagSet, MetadataError> {
    let exif = Reader::new().read_from_container(&mut Cursor::new(bytes))?;

    let tags = exif
        .fields()
        .map(|field| RawTag {
            block: block_name(field).to_string(),
            name: field.tag.to_string(),
            value: raw_value(&field.value),
            description: Some(describe(field, &exif)),
        })
        .collect();

    let aux = xmp_parser::find_packet(bytes)
        .map(xmp_parser::parse_properties)
        .filter(|props| !props.is_empty())
        .into_iter()
        .collect();

    Ok(RawTagSet { tags, aux })
}

/// Read and normalize a file's shooting parameters.
///
/// Never fails: an unreadable file or one without EXIF yields an empty
/// record, and the frame is built without metadata.
pub fn read_shooting_record(path: &Path) -> ShootingRecord {
    match read_raw_tags(path) {
        Ok(tags) => {
            debug!(path = %path.display(), tags = tags.tags.len(), "read metadata");
            normalize(&tags)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "metadata unreadable, using empty record");
            ShootingRecord::default()
        }
    }
}

#[allow(unreachable_patterns)]
fn block_name(field: &Field) -> &'static str {
    if field.ifd_num == In::THUMBNAIL {
        return "Thumbnail";
    }
    match field.tag.context() {
        Context::Tiff => "IFD0",
        Context::Exif => "Exif",
        Context::Gps => "GPS",
        Context::Interop => "Interop",
        _ => "Other",
    }
}

fn raw_value(value: &Value) -> Option<RawValue> {
    let number = |n: f64| Some(RawValue::Number(n));
    match value {
        Value::Ascii(parts) => parts.first().map(|b| RawValue::Text(ascii_text(b))),
        Value::Rational(v) => v.first().map(|r| RawValue::Rational {
            num: r.num as i64,
            den: r.denom as i64,
        }),
        Value::SRational(v) => v.first().map(|r| RawValue::Rational {
            num: r.num as i64,
            den: r.denom as i64,
        }),
        Value::Byte(v) => v.first().and_then(|n| number(*n as f64)),
        Value::Short(v) => v.first().and_then(|n| number(*n as f64)),
        Value::Long(v) => v.first().and_then(|n| number(*n as f64)),
        Value::SByte(v) => v.first().and_then(|n| number(*n as f64)),
        Value::SShort(v) => v.first().and_then(|n| number(*n as f64)),
        Value::SLong(v) => v.first().and_then(|n| number(*n as f64)),
        Value::Float(v) => v.first().and_then(|n| number(*n as f64)),
        Value::Double(v) => v.first().and_then(|n| number(*n)),
        _ => None,
    }
}

/// The library's display string. ASCII values are taken as-is, without
/// the quotes `display_value` adds.
fn describe(field: &Field, exif: &Exif) -> String {
    match &field.value {
        Value::Ascii(parts) => parts
            .iter()
            .map(|p| ascii_text(p))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        _ => field.display_value().with_unit(exif).to_string(),
    }
}

fn ascii_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}
