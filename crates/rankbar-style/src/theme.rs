#![forbid(unsafe_code)]

//! Theme names, adaptive colors and the chart palette.
//!
//! # Example
//! ```
//! use rankbar_render::Rgba;
//! use rankbar_style::theme::{ChartTheme, ThemeName};
//!
//! let palette = ChartTheme::default().resolve(ThemeName::Light);
//! assert_eq!(palette.row_background, Rgba::WHITE);
//! ```

use std::fmt;

use rankbar_render::Rgba;

/// An adaptive color that can change based on light/dark mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdaptiveColor {
    /// A fixed color that doesn't change with mode.
    Fixed(Rgba),
    /// A color that adapts to light/dark mode.
    Adaptive { light: Rgba, dark: Rgba },
}

impl AdaptiveColor {
    #[inline]
    pub const fn fixed(color: Rgba) -> Self {
        Self::Fixed(color)
    }

    #[inline]
    pub const fn adaptive(light: Rgba, dark: Rgba) -> Self {
        Self::Adaptive { light, dark }
    }

    /// Resolve the color for the given mode.
    #[inline]
    pub const fn resolve(&self, is_dark: bool) -> Rgba {
        match self {
            Self::Fixed(c) => *c,
            Self::Adaptive { light, dark } => {
                if is_dark {
                    *dark
                } else {
                    *light
                }
            }
        }
    }

    #[inline]
    pub const fn is_adaptive(&self) -> bool {
        matches!(self, Self::Adaptive { .. })
    }
}

impl From<Rgba> for AdaptiveColor {
    fn from(color: Rgba) -> Self {
        Self::Fixed(color)
    }
}

/// Named chart themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeName {
    /// `hdesign-light`.
    #[default]
    Light,
    /// `hdesign-dark`.
    Dark,
}

impl ThemeName {
    /// Parse a theme name. Anything other than `hdesign-dark` (or `dark`)
    /// falls back to the light theme.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "hdesign-dark" | "dark" => Self::Dark,
            _ => Self::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "hdesign-light",
            Self::Dark => "hdesign-dark",
        }
    }

    #[inline]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ThemeName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ThemeName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ThemeName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Semantic color slots used by the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTheme {
    // Rows
    pub row_background: AdaptiveColor,
    /// Name column text.
    pub name_text: AdaptiveColor,
    /// Amount and percent columns.
    pub value_text: AdaptiveColor,
    /// Text drawn on the rank badge.
    pub rank_text: AdaptiveColor,
    /// Track behind the progress bar.
    pub progress_track: AdaptiveColor,

    // Header
    pub header_background: AdaptiveColor,
    pub header_text: AdaptiveColor,

    // Tooltip
    pub tooltip_background: AdaptiveColor,
    pub tooltip_text: AdaptiveColor,
    pub tooltip_border: AdaptiveColor,

    // Scrollbar
    /// Rounded backdrop behind the track.
    pub scrollbar_background: AdaptiveColor,
    pub scrollbar_track: AdaptiveColor,
    pub scrollbar_thumb: AdaptiveColor,
    pub scrollbar_thumb_hover: AdaptiveColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::hdesign()
    }
}

impl ChartTheme {
    /// The `hdesign` palette pair.
    pub const fn hdesign() -> Self {
        Self {
            row_background: AdaptiveColor::adaptive(Rgba::WHITE, Rgba::rgb(0x2d, 0x2d, 0x2d)),
            name_text: AdaptiveColor::adaptive(
                Rgba::rgb(0x33, 0x33, 0x33),
                Rgba::rgb(0xe0, 0xe0, 0xe0),
            ),
            value_text: AdaptiveColor::adaptive(Rgba::rgb(0x2d, 0x2d, 0x2d), Rgba::WHITE),
            rank_text: AdaptiveColor::fixed(Rgba::WHITE),
            progress_track: AdaptiveColor::adaptive(
                Rgba::rgb(0xf0, 0xf0, 0xf0),
                Rgba::rgb(0x44, 0x44, 0x44),
            ),

            header_background: AdaptiveColor::adaptive(
                Rgba::rgb(0xf5, 0xf6, 0xfa),
                Rgba::rgb(0x2d, 0x2d, 0x2d),
            ),
            header_text: AdaptiveColor::adaptive(
                Rgba::rgb(0x33, 0x33, 0x33),
                Rgba::rgb(0xe0, 0xe0, 0xe0),
            ),

            tooltip_background: AdaptiveColor::adaptive(Rgba::WHITE, Rgba::rgb(0x3d, 0x3d, 0x3d)),
            tooltip_text: AdaptiveColor::adaptive(Rgba::rgb(0x33, 0x33, 0x33), Rgba::WHITE),
            tooltip_border: AdaptiveColor::adaptive(
                Rgba::rgb(0xe5, 0xe6, 0xeb),
                Rgba::rgb(0x55, 0x55, 0x55),
            ),

            scrollbar_background: AdaptiveColor::fixed(Rgba::rgb(0xf0, 0xf0, 0xf0)),
            scrollbar_track: AdaptiveColor::fixed(Rgba::rgb(0xe0, 0xe0, 0xe0)),
            scrollbar_thumb: AdaptiveColor::fixed(Rgba::rgb(0x99, 0x99, 0x99)),
            scrollbar_thumb_hover: AdaptiveColor::fixed(Rgba::rgb(0x66, 0x66, 0x66)),
        }
    }

    /// Flatten every slot for the given theme.
    #[must_use]
    pub const fn resolve(&self, name: ThemeName) -> Palette {
        let d = name.is_dark();
        Palette {
            is_dark: d,
            row_background: self.row_background.resolve(d),
            name_text: self.name_text.resolve(d),
            value_text: self.value_text.resolve(d),
            rank_text: self.rank_text.resolve(d),
            progress_track: self.progress_track.resolve(d),
            header_background: self.header_background.resolve(d),
            header_text: self.header_text.resolve(d),
            tooltip_background: self.tooltip_background.resolve(d),
            tooltip_text: self.tooltip_text.resolve(d),
            tooltip_border: self.tooltip_border.resolve(d),
            scrollbar_background: self.scrollbar_background.resolve(d),
            scrollbar_track: self.scrollbar_track.resolve(d),
            scrollbar_thumb: self.scrollbar_thumb.resolve(d),
            scrollbar_thumb_hover: self.scrollbar_thumb_hover.resolve(d),
        }
    }
}

/// A [`ChartTheme`] with every slot resolved for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub is_dark: bool,
    pub row_background: Rgba,
    pub name_text: Rgba,
    pub value_text: Rgba,
    pub rank_text: Rgba,
    pub progress_track: Rgba,
    pub header_background: Rgba,
    pub header_text: Rgba,
    pub tooltip_background: Rgba,
    pub tooltip_text: Rgba,
    pub tooltip_border: Rgba,
    pub scrollbar_background: Rgba,
    pub scrollbar_track: Rgba,
    pub scrollbar_thumb: Rgba,
    pub scrollbar_thumb_hover: Rgba,
}

impl Palette {
    /// Resolve the built-in chart theme.
    pub const fn for_theme(name: ThemeName) -> Self {
        ChartTheme::hdesign().resolve(name)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(ThemeName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_color_resolves_by_mode() {
        let c = AdaptiveColor::adaptive(Rgba::WHITE, Rgba::BLACK);
        assert_eq!(c.resolve(false), Rgba::WHITE);
        assert_eq!(c.resolve(true), Rgba::BLACK);
        assert!(c.is_adaptive());
        assert!(!AdaptiveColor::from(Rgba::WHITE).is_adaptive());
    }

    #[test]
    fn theme_names_parse_leniently() {
        assert_eq!(ThemeName::parse("hdesign-light"), ThemeName::Light);
        assert_eq!(ThemeName::parse("hdesign-dark"), ThemeName::Dark);
        assert_eq!(ThemeName::parse("  HDESIGN-DARK "), ThemeName::Dark);
        assert_eq!(ThemeName::parse("solarized"), ThemeName::Light);
        assert_eq!(ThemeName::from(""), ThemeName::Light);
    }

    #[test]
    fn theme_name_display_round_trips() {
        for name in [ThemeName::Light, ThemeName::Dark] {
            assert_eq!(ThemeName::parse(&name.to_string()), name);
        }
    }

    #[test]
    fn light_palette_values() {
        let p = Palette::for_theme(ThemeName::Light);
        assert!(!p.is_dark);
        assert_eq!(p.row_background, Rgba::WHITE);
        assert_eq!(p.name_text, Rgba::rgb(0x33, 0x33, 0x33));
        assert_eq!(p.header_background, Rgba::rgb(0xf5, 0xf6, 0xfa));
        assert_eq!(p.progress_track, Rgba::rgb(0xf0, 0xf0, 0xf0));
    }

    #[test]
    fn dark_palette_values() {
        let p = Palette::for_theme(ThemeName::Dark);
        assert!(p.is_dark);
        assert_eq!(p.row_background, Rgba::rgb(0x2d, 0x2d, 0x2d));
        assert_eq!(p.value_text, Rgba::WHITE);
        assert_eq!(p.tooltip_background, Rgba::rgb(0x3d, 0x3d, 0x3d));
        assert_eq!(p.tooltip_border, Rgba::rgb(0x55, 0x55, 0x55));
    }

    #[test]
    fn scrollbar_colors_do_not_adapt() {
        let light = Palette::for_theme(ThemeName::Light);
        let dark = Palette::for_theme(ThemeName::Dark);
        assert_eq!(light.scrollbar_thumb, dark.scrollbar_thumb);
        assert_eq!(light.scrollbar_thumb_hover, Rgba::rgb(0x66, 0x66, 0x66));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn theme_name_serde() {
        let name: ThemeName = serde_json::from_str("\"hdesign-dark\"").unwrap();
        assert_eq!(name, ThemeName::Dark);
        assert_eq!(serde_json::to_string(&ThemeName::Light).unwrap(), "\"hdesign-light\"");
    }
}
