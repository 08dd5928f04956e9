//! Image-side collaborators and frame geometry.
//!
//! | Concern | Crate / function |
//! |---|---|
//! | **Pixel access** | [`PixelSource`], implemented for `image::DynamicImage` |
//! | **EXIF tags** | `kamadak-exif` via [`exif_reader`] |
//! | **XMP properties** | custom byte scanner ([`xmp_parser`]) |
//! | **Scene stats** | [`analyze_region`]: luma mean + variance |
//! | **Brand marks** | [`AssetSource`], [`FsAssets`] over `image` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for frame geometry and text sizes (unit testable)
//! - **Parameters**: Margins, overrides and the resolved geometry
//! - **Backend**: [`PixelSource`] trait + shared error type
//! - **Scene**: Region sampling for smart adaptation

pub mod assets;
pub mod backend;
mod calculations;
pub mod exif_reader;
mod params;
pub mod scene;
pub(crate) mod xmp_parser;

pub use assets::{AssetInfo, AssetSource, FsAssets, NoAssets};
pub use backend::{BackendError, Dimensions, PixelSource};
pub use calculations::{
    GeometryError, brand_letter_size, brand_mark_height, caption_font_size, parameter_font_size,
    resolution_factor, resolve_geometry, signature_detail_size, signature_font_size,
    signature_line_gap,
};
pub use exif_reader::{MetadataError, read_shooting_record};
pub use params::{Margins, Overrides, ResolvedGeometry};
pub use scene::{Region, SceneStats, analyze_region};
