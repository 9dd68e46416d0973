//! Paper settings: background pattern and color.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Background pattern drawn beneath the ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperType {
    #[default]
    Blank,
    Ruled,
    Grid,
    Dot,
    Isometric,
}

impl PaperType {
    /// Get display name for this paper type.
    pub fn name(self) -> &'static str {
        match self {
            PaperType::Blank => "Blank",
            PaperType::Ruled => "Ruled",
            PaperType::Grid => "Grid",
            PaperType::Dot => "Dot",
            PaperType::Isometric => "Isometric",
        }
    }
}

/// Paper tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperColor {
    #[default]
    White,
    Yellow,
    Dark,
    Cream,
}

impl PaperColor {
    /// Fill color for the whole canvas.
    pub fn background(self) -> Color {
        match self {
            PaperColor::White => Color::from_rgba8(0xff, 0xff, 0xff, 0xff),
            PaperColor::Yellow => Color::from_rgba8(0xff, 0xf9, 0xc4, 0xff),
            PaperColor::Dark => Color::from_rgba8(0x1e, 0x1e, 0x24, 0xff),
            PaperColor::Cream => Color::from_rgba8(0xfd, 0xf6, 0xe3, 0xff),
        }
    }

    /// Color of the ruled/grid/dot pattern on this paper.
    pub fn pattern(self) -> Color {
        match self {
            PaperColor::White => Color::from_rgba8(0xd0, 0xd7, 0xe2, 0xff),
            PaperColor::Yellow => Color::from_rgba8(0xe6, 0xd8, 0x8a, 0xff),
            PaperColor::Dark => Color::from_rgba8(0x3a, 0x3a, 0x46, 0xff),
            PaperColor::Cream => Color::from_rgba8(0xe3, 0xd5, 0xb8, 0xff),
        }
    }
}

/// Persisted paper configuration of a drawing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperSettings {
    #[serde(default)]
    pub paper_type: PaperType,
    #[serde(default)]
    pub paper_color: PaperColor,
}

impl PaperSettings {
    pub fn new(paper_type: PaperType, paper_color: PaperColor) -> Self {
        Self {
            paper_type,
            paper_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PaperSettings::default();
        assert_eq!(settings.paper_type, PaperType::Blank);
        assert_eq!(settings.paper_color, PaperColor::White);
    }

    #[test]
    fn test_pattern_differs_from_background() {
        for color in [
            PaperColor::White,
            PaperColor::Yellow,
            PaperColor::Dark,
            PaperColor::Cream,
        ] {
            let bg = color.background().to_rgba8();
            let fg = color.pattern().to_rgba8();
            assert_ne!((bg.r, bg.g, bg.b), (fg.r, fg.g, fg.b));
        }
    }

    #[test]
    fn test_serde_names() {
        let settings = PaperSettings::new(PaperType::Isometric, PaperColor::Dark);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"paperType":"isometric","paperColor":"dark"}"#);
    }
}
