//! Camera brands with a bundled mark.
//!
//! Detection is a case-insensitive substring match on the make, checked in
//! declaration order, so "HASSELBLAD" wins over anything it might contain.

use crate::template::MarkAssets;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecognizedBrand {
    Hasselblad,
    Sony,
    Nikon,
    Canon,
    Fujifilm,
    Leica,
}

/// Which polarity of a mark to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkVariant {
    /// For dark backgrounds.
    Light,
    /// For bright backgrounds.
    Dark,
}

impl RecognizedBrand {
    const ALL: [RecognizedBrand; 6] = [
        RecognizedBrand::Hasselblad,
        RecognizedBrand::Sony,
        RecognizedBrand::Nikon,
        RecognizedBrand::Canon,
        RecognizedBrand::Fujifilm,
        RecognizedBrand::Leica,
    ];

    pub fn detect(make: &str) -> Option<Self> {
        let make = make.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|brand| make.contains(brand.match_token()))
    }

    fn match_token(self) -> &'static str {
        match self {
            RecognizedBrand::Fujifilm => "FUJI",
            other => other.label(),
        }
    }

    /// Uppercase display name.
    pub fn label(self) -> &'static str {
        match self {
            RecognizedBrand::Hasselblad => "HASSELBLAD",
            RecognizedBrand::Sony => "SONY",
            RecognizedBrand::Nikon => "NIKON",
            RecognizedBrand::Canon => "CANON",
            RecognizedBrand::Fujifilm => "FUJIFILM",
            RecognizedBrand::Leica => "LEICA",
        }
    }

    pub fn assets(self) -> MarkAssets {
        match self {
            RecognizedBrand::Hasselblad => crate::template::HASSELBLAD_MARK,
            RecognizedBrand::Sony => MarkAssets {
                light: "brands/sony_white.png",
                dark: "brands/sony.png",
            },
            RecognizedBrand::Nikon => MarkAssets {
                light: "brands/nikon_white.png",
                dark: "brands/nikon.png",
            },
            RecognizedBrand::Canon => MarkAssets {
                light: "brands/canon_white.png",
                dark: "brands/canon.png",
            },
            RecognizedBrand::Fujifilm => MarkAssets {
                light: "brands/fujifilm_white.png",
                dark: "brands/fujifilm.png",
            },
            RecognizedBrand::Leica => MarkAssets {
                light: "brands/leica_white.png",
                dark: "brands/leica.png",
            },
        }
    }
}

impl MarkAssets {
    pub fn variant(&self, variant: MarkVariant) -> &'static str {
        match variant {
            MarkVariant::Light => self.light,
            MarkVariant::Dark => self.dark,
        }
    }
}
