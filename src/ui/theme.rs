use anyhow::{anyhow, Result};
use ratatui::style::Color;

use crate::models::TagColor;

/// The two cosmetic palettes. Switching only changes colors, never data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl ThemeKind {
    pub fn toggle(self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeKind::Light => "Light",
            ThemeKind::Dark => "Dark",
        }
    }

    pub(crate) fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeKind::Light),
            "dark" => Ok(ThemeKind::Dark),
            other => Err(anyhow!("expected `light` or `dark`, got `{other}`")),
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeKind::Light => Palette {
                background: Color::Rgb(255, 247, 237),
                text: Color::Rgb(31, 41, 55),
                muted: Color::Rgb(75, 85, 99),
                accent: Color::Rgb(234, 88, 12),
                border: Color::Rgb(209, 213, 219),
                selection: Color::Rgb(202, 138, 4),
                fun_fact: Color::Rgb(107, 114, 128),
                danger: Color::Rgb(255, 77, 79),
            },
            ThemeKind::Dark => Palette {
                background: Color::Rgb(17, 24, 39),
                text: Color::Rgb(243, 244, 246),
                muted: Color::Rgb(209, 213, 219),
                accent: Color::Rgb(250, 204, 21),
                border: Color::Rgb(55, 65, 81),
                selection: Color::Rgb(253, 224, 71),
                fun_fact: Color::Rgb(156, 163, 175),
                danger: Color::Rgb(255, 77, 79),
            },
        }
    }
}

/// Colors a view needs for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
    pub fun_fact: Color,
    /// Endangered marker.
    pub danger: Color,
}

/// Terminal color for a species badge.
pub(crate) fn tag_color(tag: TagColor) -> Color {
    match tag {
        TagColor::Blue => Color::Blue,
        TagColor::Green => Color::Green,
        TagColor::Orange => Color::Rgb(250, 140, 22),
        TagColor::Purple => Color::Rgb(114, 46, 209),
        TagColor::Red => Color::Red,
        TagColor::Cyan => Color::Cyan,
        TagColor::Gold => Color::Rgb(250, 173, 20),
        TagColor::Magenta => Color::Magenta,
        TagColor::Lime => Color::Rgb(160, 217, 17),
        TagColor::Pink => Color::Rgb(235, 47, 150),
        TagColor::Default => Color::Gray,
    }
}
