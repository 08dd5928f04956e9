//! Shooting metadata normalization.
//!
//! The tag-reading layer ([`imaging::exif_reader`](crate::imaging::exif_reader))
//! produces a [`RawTagSet`]: every tag it found, in file order, with a typed raw
//! value and the library's human-readable description. This module turns that
//! heterogeneous bag into a [`ShootingRecord`] of display strings.
//!
//! ## Field formatting
//!
//! | Field | Numeric value available | Otherwise |
//! |---|---|---|
//! | Aperture | `f/2.8` (one decimal) | description verbatim |
//! | Exposure | `1/100` below one second, `2.5` above | description verbatim |
//! | Focal length | `35mm` | description verbatim |
//! | ISO | `400` | description verbatim |
//!
//! ## Lens disambiguation
//!
//! Cameras and editing tools write the lens name to several places at once:
//! the EXIF `LensModel` tag, maker-specific `Lens`/`LensType` tags, the XMP
//! `aux:Lens` and `exifEX:LensModel` properties, and the purely numeric
//! `LensSpecification`. They frequently disagree: one says
//! `FE 24-70mm F2.8 GM`, another just `24-70mm f/2.8`. Every candidate is
//! scored by [`score_lens_candidate`] and the highest score wins, ties going
//! to the candidate seen first.
//!
//! ## Make/model cleanup
//!
//! Many bodies repeat the maker in the model string (`SONY` / `SONY ILCE-7RM5`).
//! When the model starts with the make (case-insensitive), the prefix is
//! stripped: the frame prints the brand separately.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A raw tag value as handed over by the tag-reading library.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Rational { num: i64, den: i64 },
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl RawValue {
    /// Numeric view of the value. Zero denominators and non-finite numbers
    /// count as unavailable.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Rational { num, den } if *den != 0 => Some(*num as f64 / *den as f64),
            RawValue::Rational { .. } => None,
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Number(_) => None,
            RawValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            RawValue::DateTime(_) => None,
        }
    }
}

/// One tag from one metadata block (`IFD0`, `Exif`, a maker note, …).
#[derive(Debug, Clone, PartialEq)]
pub struct RawTag {
    pub block: String,
    pub name: String,
    pub value: Option<RawValue>,
    /// Human-readable rendering provided by the reading library.
    pub description: Option<String>,
}

impl RawTag {
    pub fn new(block: &str, name: &str, value: RawValue) -> Self {
        Self {
            block: block.to_string(),
            name: name.to_string(),
            value: Some(value),
            description: None,
        }
    }

    /// A tag known only through its description.
    pub fn described(block: &str, name: &str, description: &str) -> Self {
        Self {
            block: block.to_string(),
            name: name.to_string(),
            value: None,
            description: Some(description.to_string()),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Display text: the description, or the raw value when it is text.
    /// Blank strings count as absent.
    pub fn text(&self) -> Option<&str> {
        let from_value = match &self.value {
            Some(RawValue::Text(s)) => Some(s.as_str()),
            _ => None,
        };
        self.description
            .as_deref()
            .or(from_value)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Namespaced key/value pairs from an auxiliary descriptive block (XMP).
pub type AuxMap = Vec<(String, String)>;

/// Everything the tag reader found for one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTagSet {
    pub tags: Vec<RawTag>,
    pub aux: Vec<AuxMap>,
}

impl RawTagSet {
    /// First tag (in file order) mapping to the given canonical field.
    fn find(&self, field: Field) -> Option<&RawTag> {
        self.tags
            .iter()
            .find(|t| field.aliases().contains(&canonical_name(&t.name).as_str()))
    }
}

/// Canonical record fields that map directly onto a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Make,
    Model,
    LensModel,
    FNumber,
    ExposureTime,
    FocalLength,
    Iso,
    DateTaken,
}

impl Field {
    /// Tag names (after [`canonical_name`]) that carry this field.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Make => &["make"],
            Field::Model => &["model"],
            Field::LensModel => &["lensmodel"],
            Field::FNumber => &["fnumber"],
            Field::ExposureTime => &["exposuretime"],
            Field::FocalLength => &["focallength"],
            Field::Iso => &[
                "photographicsensitivity",
                "isospeedratings",
                "isospeed",
                "iso",
            ],
            Field::DateTaken => &["datetimeoriginal"],
        }
    }
}

/// Lowercase ASCII alphanumerics only: `"F-Number"` and `"FNumber"` both
/// become `"fnumber"`.
fn canonical_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Canonical shooting parameters for one image, as display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootingRecord {
    pub make: String,
    pub model: String,
    pub lens_model: String,
    pub focal_length: String,
    pub f_number: String,
    pub exposure_time: String,
    pub iso_speed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<NaiveDateTime>,
}

/// Build a [`ShootingRecord`] from a raw tag set.
pub fn normalize(tags: &RawTagSet) -> ShootingRecord {
    let make = text_of(tags, Field::Make);
    let model = strip_make_prefix(&make, &text_of(tags, Field::Model));

    ShootingRecord {
        lens_model: choose_best_lens(&collect_lens_candidates(tags)),
        focal_length: numeric_or_text(tags, Field::FocalLength, format_focal_length),
        f_number: numeric_or_text(tags, Field::FNumber, format_aperture),
        exposure_time: numeric_or_text(tags, Field::ExposureTime, format_exposure),
        iso_speed: numeric_or_text(tags, Field::Iso, format_iso),
        date_taken: date_taken(tags),
        make,
        model,
    }
}

fn text_of(tags: &RawTagSet, field: Field) -> String {
    tags.find(field)
        .and_then(RawTag::text)
        .unwrap_or_default()
        .to_string()
}

fn numeric_or_text(tags: &RawTagSet, field: Field, format: fn(f64) -> String) -> String {
    let Some(tag) = tags.find(field) else {
        return String::new();
    };
    match tag.value.as_ref().and_then(RawValue::as_f64) {
        Some(v) => format(v),
        None => tag.text().unwrap_or_default().to_string(),
    }
}

const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

fn date_taken(tags: &RawTagSet) -> Option<NaiveDateTime> {
    let tag = tags.find(Field::DateTaken)?;
    if let Some(RawValue::DateTime(dt)) = &tag.value {
        return Some(*dt);
    }
    NaiveDateTime::parse_from_str(tag.text()?, EXIF_DATE_FORMAT).ok()
}

// ============================================================================
// Numeric formatting
// ============================================================================

/// `2.8` → `f/2.8`, `4.0` → `f/4.0`.
pub fn format_aperture(f: f64) -> String {
    format!("f/{f:.1}")
}

/// Sub-second exposures become a reciprocal (`0.01` → `1/100`), anything else
/// is printed with up to five decimals (`2.5` → `2.5`, `30.0` → `30`).
pub fn format_exposure(t: f64) -> String {
    if t > 0.0 && t < 1.0 {
        format!("1/{}", (1.0 / t).round_ties_even())
    } else {
        format_trimmed(t, 5)
    }
}

/// `35.0` → `35mm`, `24.5` → `24.5mm`.
pub fn format_focal_length(fl: f64) -> String {
    format!("{fl}mm")
}

pub fn format_iso(iso: f64) -> String {
    format!("{}", iso.round())
}

/// Fixed decimals with trailing zeros (and a dangling point) removed.
fn format_trimmed(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// ============================================================================
// Make / model
// ============================================================================

/// Strip a leading make from the model (`SONY` + `SONY ILCE-7RM5` → `ILCE-7RM5`).
pub fn strip_make_prefix(make: &str, model: &str) -> String {
    if make.is_empty() {
        return model.to_string();
    }
    match model.get(..make.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(make) => model[make.len()..].trim().to_string(),
        _ => model.to_string(),
    }
}

// ============================================================================
// Lens disambiguation
// ============================================================================

/// One possible lens name and the field it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensCandidate {
    pub text: String,
    pub source: String,
}

impl LensCandidate {
    pub fn new(text: &str, source: &str) -> Self {
        Self {
            text: text.to_string(),
            source: source.to_string(),
        }
    }
}

/// Brand and mount tokens that mark a "real" lens name.
const LENS_BRAND_TOKENS: &[&str] = &[
    "FE", "GM", "OSS", "ZA", "NIKKOR", "RF", "EF", "L", "APO", "DG", "DN", "ART", "XCD", "HC",
    "HCD", "ZEISS", "TAMRON", "SIGMA", "SAMYANG", "VOIGT", "SUMMILUX", "SUMMICRON", "Noct",
    "G-Master", "G Master",
];

/// Gather candidates in priority-neutral, first-seen order: the mapped lens
/// model, then every tag whose name mentions "Lens", then auxiliary keys.
pub fn collect_lens_candidates(tags: &RawTagSet) -> Vec<LensCandidate> {
    let mut candidates = Vec::new();

    if let Some(direct) = tags.find(Field::LensModel).and_then(RawTag::text) {
        candidates.push(LensCandidate::new(direct, "Lens Model"));
    }

    for tag in &tags.tags {
        if !contains_ci(&tag.name, "Lens") {
            continue;
        }
        if let Some(text) = tag.text() {
            candidates.push(LensCandidate::new(text, &tag.name));
        }
    }

    for map in &tags.aux {
        for (key, value) in map {
            if contains_ci(key, "Lens") && !value.trim().is_empty() {
                candidates.push(LensCandidate::new(value.trim(), key));
            }
        }
    }

    candidates
}

/// Pick the highest-scoring candidate; the first one wins ties.
pub fn choose_best_lens(candidates: &[LensCandidate]) -> String {
    let mut best: Option<(&LensCandidate, i32)> = None;
    for candidate in candidates {
        let score = score_lens_candidate(&candidate.text, &candidate.source);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }
    best.map(|(c, _)| c.text.clone()).unwrap_or_default()
}

/// Additive score for one (text, source field) pair.
///
/// These weights were tuned against real camera files. Do not rebalance.
pub fn score_lens_candidate(text: &str, source: &str) -> i32 {
    let mut score = 0;

    if source.eq_ignore_ascii_case("Lens") {
        score += 5;
    }
    if source.eq_ignore_ascii_case("Lens Model") || source.eq_ignore_ascii_case("LensModel") {
        score += 4;
    }
    if contains_ci(source, "aux:Lens") {
        score += 6;
    }
    if contains_ci(source, "exifEX:LensModel") {
        score += 5;
    }
    if contains_ci(source, "LensType") || contains_ci(source, "Lens Type") {
        score += 2;
    }
    if contains_ci(source, "Specification") || contains_ci(source, "Spec") {
        score -= 4;
    }
    if is_bare_lens_spec(text) {
        score -= 3;
    }
    if LENS_BRAND_TOKENS.iter().any(|t| contains_ci(text, t)) {
        score += 3;
    }
    if has_letter_run(text) {
        score += 1;
    }

    score
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Two or more consecutive ASCII letters.
fn has_letter_run(text: &str) -> bool {
    text.as_bytes()
        .windows(2)
        .any(|w| w[0].is_ascii_alphabetic() && w[1].is_ascii_alphabetic())
}

/// True when the text is nothing but a focal range and an aperture, e.g.
/// `24-70mm f/2.8`, `50 mm F1.4`, `16-35mm f4`.
///
/// Shape: `NN[-NN]mm f[/]N[.N]`, one to three digits per focal value, a single
/// leading aperture digit, whitespace allowed around the pieces.
pub fn is_bare_lens_spec(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    let mut s = Cursor::new(lower.as_bytes());

    s.skip_ws();
    if !s.digits(1, 3) {
        return false;
    }
    let before_range = s.pos;
    s.skip_ws();
    if s.eat(b'-') {
        s.skip_ws();
        if !s.digits(1, 3) {
            return false;
        }
    } else {
        s.pos = before_range;
    }
    s.skip_ws();
    if !(s.eat(b'm') && s.eat(b'm')) {
        return false;
    }
    if s.skip_ws() == 0 || !s.eat(b'f') {
        return false;
    }
    s.eat(b'/');
    s.skip_ws();
    if !s.digits(1, 1) {
        return false;
    }
    if s.eat(b'.') && !s.digits(1, usize::MAX) {
        return false;
    }
    s.skip_ws();
    s.at_end()
}

/// Byte cursor for the lens-spec matcher.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Consume `min..=max` digits. Fails if fewer than `min` are present or
    /// another digit follows the `max`-th.
    fn digits(&mut self, min: usize, max: usize) -> bool {
        let start = self.pos;
        while self.pos - start < max && self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let n = self.pos - start;
        n >= min && !self.peek().is_some_and(|b| b.is_ascii_digit())
    }

    fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }
}

// ============================================================================
// Field resolution
// ============================================================================

/// Resolve a display field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-blank value:
///
/// ```text
/// focal: resolve(&[override_text, record.focal_length, template_default])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sony_tags() -> RawTagSet {
        RawTagSet {
            tags: vec![
                RawTag::new("IFD0", "Make", RawValue::Text("SONY".into())),
                RawTag::new("IFD0", "Model", RawValue::Text("SONY ILCE-7RM5".into())),
                RawTag::new("Exif", "FNumber", RawValue::Rational { num: 28, den: 10 }),
                RawTag::new("Exif", "ExposureTime", RawValue::Rational { num: 1, den: 100 }),
                RawTag::new("Exif", "PhotographicSensitivity", RawValue::Number(400.0)),
                RawTag::new("Exif", "FocalLength", RawValue::Rational { num: 350, den: 10 }),
                RawTag::new(
                    "Exif",
                    "DateTimeOriginal",
                    RawValue::Text("2024:05:17 18:42:07".into()),
                ),
                RawTag::new("Exif", "LensModel", RawValue::Text("FE 24-70mm F2.8 GM".into())),
            ],
            aux: Vec::new(),
        }
    }

    // =========================================================================
    // normalize() tests
    // =========================================================================

    #[test]
    fn normalize_formats_all_fields() {
        let record = normalize(&sony_tags());
        assert_eq!(record.make, "SONY");
        assert_eq!(record.model, "ILCE-7RM5");
        assert_eq!(record.f_number, "f/2.8");
        assert_eq!(record.exposure_time, "1/100");
        assert_eq!(record.iso_speed, "400");
        assert_eq!(record.focal_length, "35mm");
        assert_eq!(record.lens_model, "FE 24-70mm F2.8 GM");
        assert_eq!(
            record.date_taken.map(|d| d.to_string()).as_deref(),
            Some("2024-05-17 18:42:07")
        );
    }

    #[test]
    fn normalize_empty_set_is_empty_record() {
        assert_eq!(normalize(&RawTagSet::default()), ShootingRecord::default());
    }

    #[test]
    fn normalize_falls_back_to_description() {
        let tags = RawTagSet {
            tags: vec![
                RawTag::described("Exif", "Exposure Time", "1/250 sec"),
                RawTag::described("Exif", "F-Number", "f/5.6"),
                RawTag::new("Exif", "Focal Length", RawValue::Rational { num: 1, den: 0 })
                    .with_description("50 mm"),
            ],
            aux: Vec::new(),
        };
        let record = normalize(&tags);
        assert_eq!(record.exposure_time, "1/250 sec");
        assert_eq!(record.f_number, "f/5.6");
        assert_eq!(record.focal_length, "50 mm");
    }

    #[test]
    fn normalize_keeps_empty_make_empty() {
        let tags = RawTagSet {
            tags: vec![RawTag::new("IFD0", "Model", RawValue::Text("X100V".into()))],
            aux: Vec::new(),
        };
        let record = normalize(&tags);
        assert_eq!(record.make, "");
        assert_eq!(record.model, "X100V");
    }

    #[test]
    fn normalize_unparseable_date_is_none() {
        let tags = RawTagSet {
            tags: vec![RawTag::described("Exif", "DateTimeOriginal", "yesterday")],
            aux: Vec::new(),
        };
        assert_eq!(normalize(&tags).date_taken, None);
    }

    #[test]
    fn raw_value_zero_denominator_is_unavailable() {
        assert_eq!(RawValue::Rational { num: 1, den: 0 }.as_f64(), None);
        assert_eq!(RawValue::Number(f64::NAN).as_f64(), None);
        assert_eq!(RawValue::Text(" 2.8 ".into()).as_f64(), Some(2.8));
    }

    // =========================================================================
    // Formatting tests
    // =========================================================================

    #[test]
    fn exposure_fraction_below_one_second() {
        assert_eq!(format_exposure(1.0 / 100.0), "1/100");
        assert_eq!(format_exposure(1.0 / 3.0), "1/3");
        assert_eq!(format_exposure(0.004), "1/250");
    }

    #[test]
    fn exposure_decimal_at_or_above_one_second() {
        assert_eq!(format_exposure(2.5), "2.5");
        assert_eq!(format_exposure(1.0), "1");
        assert_eq!(format_exposure(30.0), "30");
        assert_eq!(format_exposure(1.333333333), "1.33333");
    }

    #[test]
    fn exposure_zero_is_not_a_fraction() {
        assert_eq!(format_exposure(0.0), "0");
    }

    #[test]
    fn aperture_one_decimal() {
        assert_eq!(format_aperture(2.8), "f/2.8");
        assert_eq!(format_aperture(4.0), "f/4.0");
        assert_eq!(format_aperture(1.44), "f/1.4");
    }

    #[test]
    fn focal_length_shortest_form() {
        assert_eq!(format_focal_length(35.0), "35mm");
        assert_eq!(format_focal_length(24.5), "24.5mm");
    }

    // =========================================================================
    // strip_make_prefix() tests
    // =========================================================================

    #[test]
    fn strip_make_prefix_removes_brand() {
        assert_eq!(strip_make_prefix("SONY", "SONY ILCE-7RM5"), "ILCE-7RM5");
    }

    #[test]
    fn strip_make_prefix_is_case_insensitive() {
        assert_eq!(strip_make_prefix("Canon", "CANON EOS R5"), "EOS R5");
    }

    #[test]
    fn strip_make_prefix_leaves_unrelated_model() {
        assert_eq!(
            strip_make_prefix("NIKON CORPORATION", "NIKON Z 8"),
            "NIKON Z 8"
        );
        assert_eq!(strip_make_prefix("", "X2D 100C"), "X2D 100C");
    }

    // =========================================================================
    // Lens disambiguation tests
    // =========================================================================

    #[test]
    fn lens_brand_name_beats_bare_specification() {
        let candidates = vec![
            LensCandidate::new("24-70mm f/2.8", "LensSpecification"),
            LensCandidate::new("FE 24-70mm F2.8 GM", "Lens Model"),
        ];
        assert_eq!(choose_best_lens(&candidates), "FE 24-70mm F2.8 GM");
    }

    #[test]
    fn lens_scores_match_weights() {
        assert_eq!(score_lens_candidate("24-70mm f/2.8", "LensSpecification"), -6);
        assert_eq!(score_lens_candidate("FE 24-70mm F2.8 GM", "Lens Model"), 8);
        assert_eq!(score_lens_candidate("XCD 90V", "aux:Lens"), 10);
        assert_eq!(score_lens_candidate("XCD 90V", "Xmp.aux:LensID"), 10);
    }

    #[test]
    fn lens_tie_goes_to_first_seen() {
        let candidates = vec![
            LensCandidate::new("RF24-105mm F4 L IS USM", "LensModel"),
            LensCandidate::new("RF24-105mm F4L", "LensModel"),
        ];
        assert_eq!(choose_best_lens(&candidates), "RF24-105mm F4 L IS USM");
    }

    #[test]
    fn lens_empty_candidates_is_empty() {
        assert_eq!(choose_best_lens(&[]), "");
    }

    #[test]
    fn lens_xmp_aux_outranks_exif() {
        let tags = RawTagSet {
            tags: vec![RawTag::new("Exif", "LensModel", RawValue::Text("----".into()))],
            aux: vec![vec![("aux:Lens".into(), "XF23mmF1.4 R".into())]],
        };
        assert_eq!(normalize(&tags).lens_model, "XF23mmF1.4 R");
    }

    #[test]
    fn lens_candidates_in_first_seen_order() {
        let tags = RawTagSet {
            tags: vec![
                RawTag::described("Exif", "Lens Specification", "24-70mm f/2.8"),
                RawTag::new("Exif", "LensModel", RawValue::Text("FE 24-70mm F2.8 GM".into())),
                RawTag::described("Exif", "Focal Length", "35 mm"),
            ],
            aux: vec![vec![("exifEX:LensModel".into(), "  ".into())]],
        };
        let sources: Vec<String> = collect_lens_candidates(&tags)
            .into_iter()
            .map(|c| c.source)
            .collect();
        assert_eq!(sources, vec!["Lens Model", "Lens Specification", "LensModel"]);
    }

    #[test]
    fn bare_lens_spec_shapes() {
        assert!(is_bare_lens_spec("24-70mm f/2.8"));
        assert!(is_bare_lens_spec(" 50 mm F1.4 "));
        assert!(is_bare_lens_spec("16 - 35mm f4"));
        assert!(is_bare_lens_spec("100-400MM F/5.6"));
    }

    #[test]
    fn bare_lens_spec_rejects_names() {
        assert!(!is_bare_lens_spec("FE 24-70mm F2.8 GM"));
        assert!(!is_bare_lens_spec("70-200mm f/11"));
        assert!(!is_bare_lens_spec("1000mm f/8"));
        assert!(!is_bare_lens_spec("24-70mmf/2.8"));
        assert!(!is_bare_lens_spec("24-mm f/2.8"));
        assert!(!is_bare_lens_spec(""));
    }

    // =========================================================================
    // resolve() tests
    // =========================================================================

    #[test]
    fn resolve_picks_first_non_blank() {
        assert_eq!(
            resolve(&[None, Some("  "), Some("35mm"), Some("50mm")]),
            Some("35mm".to_string())
        );
    }

    #[test]
    fn resolve_returns_none_when_all_blank() {
        assert_eq!(resolve(&[None, Some("")]), None);
        assert_eq!(resolve(&[]), None);
    }

    #[test]
    fn resolve_trims_whitespace() {
        assert_eq!(resolve(&[Some("  f/2.8  ")]), Some("f/2.8".to_string()));
    }
}
