//! Reference sticker colors keyed by face label

use super::conversion::{ColorConverter, HslColor, RgbSample};
use super::label::FaceLabel;
use crate::constants::stickers;
use serde::Serialize;

/// Expected appearance of one face color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceColor {
    pub label: FaceLabel,
    /// Human-readable sticker color, used for display only
    pub display_name: &'static str,
    pub hsl: HslColor,
}

/// Six reference colors, one per label, stored in canonical order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTable {
    entries: [ReferenceColor; 6],
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReferenceTable {
    /// Standard sticker palette converted to HSL
    pub fn standard() -> Self {
        let converter = ColorConverter::new();
        let entry = |label, display_name, rgb: [u8; 3]| ReferenceColor {
            label,
            display_name,
            hsl: converter.rgb_to_hsl(RgbSample::from(rgb)),
        };

        Self {
            entries: [
                entry(FaceLabel::U, "white", stickers::WHITE),
                entry(FaceLabel::R, "red", stickers::RED),
                entry(FaceLabel::F, "green", stickers::GREEN),
                entry(FaceLabel::D, "yellow", stickers::YELLOW),
                entry(FaceLabel::L, "orange", stickers::ORANGE),
                entry(FaceLabel::B, "blue", stickers::BLUE),
            ],
        }
    }

    /// Build a table from an HSL value per label, in canonical order
    pub fn from_hsl(colors: [HslColor; 6]) -> Self {
        let standard = Self::standard();
        let mut entries = standard.entries;
        for (entry, hsl) in entries.iter_mut().zip(colors) {
            entry.hsl = hsl;
        }
        Self { entries }
    }

    pub fn get(&self, label: FaceLabel) -> &ReferenceColor {
        &self.entries[label.index()]
    }

    /// Entries in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceColor> {
        self.entries.iter()
    }

    /// New table with `f` applied to every entry's HSL value
    pub fn map_hsl(&self, f: impl Fn(HslColor) -> HslColor) -> Self {
        let mut entries = self.entries.clone();
        for entry in entries.iter_mut() {
            entry.hsl = f(entry.hsl);
        }
        Self { entries }
    }
}
