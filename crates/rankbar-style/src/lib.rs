#![forbid(unsafe_code)]

//! Palettes for the ranked bar chart.
//!
//! Colors are declared once as [`AdaptiveColor`] pairs and flattened into a
//! [`Palette`] for the active [`ThemeName`].
//!
//! ```
//! use rankbar_style::{Palette, ThemeName};
//!
//! let dark = Palette::for_theme(ThemeName::parse("hdesign-dark"));
//! assert!(dark.is_dark);
//! ```

pub mod rank;
pub mod theme;

pub use rank::rank_color;
pub use theme::{AdaptiveColor, ChartTheme, Palette, ThemeName};
