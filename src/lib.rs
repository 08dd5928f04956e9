//! # Simple Frame
//!
//! Lays out photo frames: a border around the photo with the camera brand
//! and the shooting parameters, sized to the photo's resolution and adapted
//! to how bright and busy the photo is. The engine does not draw. It returns
//! an ordered layer list that a rasterizer paints back to front.
//!
//! # Architecture: One-Way Pipeline
//!
//! ```text
//! raw tags  ──→ metadata::normalize ──→ ShootingRecord ─┐
//! pixels    ──→ imaging::analyze_region ──→ SceneStats ─┤
//! template + overrides ──→ imaging::resolve_geometry ───┼──→ compose ──→ Composition
//! asset lookup ─────────────────────────────────────────┘
//! ```
//!
//! Every stage is a function of its inputs. A [`request::CompositionRequest`]
//! borrows the decoded image read-only, so renders of different requests can
//! run on parallel workers, and repeating a request yields a bit-identical
//! layer list (see [`compose::Composition::fingerprint`]).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Raw EXIF/XMP tags → display-ready [`metadata::ShootingRecord`], including lens-name scoring |
//! | [`imaging`] | Pixel access, scene statistics, frame geometry, EXIF reading, brand asset lookup |
//! | [`template`] | Built-in template catalog and layout modes |
//! | [`brand`] | Recognized camera brands and their light/dark mark assets |
//! | [`request`] | Per-render input: image, record, template, user overrides |
//! | [`compose`] | Builds the layer list for a request |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Colors and rectangles shared by layers and geometry |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Layers, Not Pixels
//!
//! Text shaping, blurs and alpha blending depend on fonts and GPU paths the
//! engine has no business owning. Emitting a serializable layer list keeps
//! the layout logic testable with plain assertions and lets any renderer
//! consume it.
//!
//! ## Resolution-Adaptive Templates
//!
//! Templates are authored against a reference short edge (3000px for most).
//! Pixel values scale with the photo, clamped to 0.1×–10×, so a 24MP and a
//! 100MP file get frames that look the same.
//!
//! ## Degrade, Don't Fail
//!
//! Unreadable metadata gives an empty record, unreadable pixels give neutral
//! scene stats, and a missing brand mark falls back to spelled-out letters.
//! Only impossible geometry is an error.

pub mod brand;
pub mod compose;
pub mod config;
pub mod imaging;
pub mod metadata;
pub mod output;
pub mod request;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
