#![forbid(unsafe_code)]

//! Windowed ranked horizontal bar chart.
//!
//! This crate is the public surface: it re-exports the types of the inner
//! crates, adds chart options, the amount sort, and [`HorizontalChart`],
//! and offers a prelude for day-to-day usage.

use std::fmt;

pub mod chart;
pub mod options;
pub mod sort;

pub use chart::HorizontalChart;
pub use options::{ChartOptions, ChartOptionsPatch, SortOrder};
pub use sort::sort_by_amount;

// --- Core re-exports -------------------------------------------------------

pub use rankbar_core::event::{
    Modifiers, PointerButton, PointerEvent, PointerEventKind,
};
pub use rankbar_core::geometry::{Point, Rect, Size};

// --- Render re-exports -----------------------------------------------------

pub use rankbar_render::svg::SvgExporter;
pub use rankbar_render::{ColorParseError, HitRegion, NodeId, Rgba, Scene};

// --- Style re-exports ------------------------------------------------------

pub use rankbar_style::{Palette, ThemeName};

// --- Layout re-exports -----------------------------------------------------

pub use rankbar_layout::{ColumnLayout, LayoutError, calc_column_x};

// --- Widget re-exports -----------------------------------------------------

pub use rankbar_widgets::{
    BarRowFactory, CachePolicy, DragPhase, PointerResult, RowContext, RowFactory, RowRecord,
    ScrollController, ScrollError, TooltipPayload, WindowError, WindowedList,
    WindowedListConfig,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for chart operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The chart surface is empty or not finite.
    InvalidSize { width: f64, height: f64 },
    /// Column offsets could not be computed.
    Layout(LayoutError),
    /// The windowed list rejected its configuration.
    Window(WindowError),
    /// The scroll viewport is degenerate.
    Scroll(ScrollError),
    /// A color option could not be parsed.
    Color(ColorParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "invalid chart size {width}x{height}")
            }
            Self::Layout(err) => write!(f, "{err}"),
            Self::Window(err) => write!(f, "{err}"),
            Self::Scroll(err) => write!(f, "{err}"),
            Self::Color(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSize { .. } => None,
            Self::Layout(err) => Some(err),
            Self::Window(err) => Some(err),
            Self::Scroll(err) => Some(err),
            Self::Color(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<WindowError> for Error {
    fn from(err: WindowError) -> Self {
        Self::Window(err)
    }
}

impl From<ScrollError> for Error {
    fn from(err: ScrollError) -> Self {
        Self::Scroll(err)
    }
}

impl From<ColorParseError> for Error {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}

/// Standard result type for rankbar APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CachePolicy, ChartOptions, ChartOptionsPatch, Error, HorizontalChart, PointerEvent,
        PointerResult, Result, RowRecord, Rgba, SortOrder, ThemeName, TooltipPayload,
    };

    pub use crate::{core, layout, render, style, widgets};
}

pub use rankbar_core as core;
pub use rankbar_layout as layout;
pub use rankbar_render as render;
pub use rankbar_style as style;
pub use rankbar_widgets as widgets;
