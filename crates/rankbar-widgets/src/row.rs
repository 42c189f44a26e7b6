#![forbid(unsafe_code)]

//! Row records and the row factory.
//!
//! The windowed list never draws rows itself: it hands each record to a
//! [`RowFactory`] and mounts whatever detached subtree comes back. The
//! default factory, [`BarRowFactory`], draws the ranked bar row:
//!
//! ```text
//! [#] name.......      amount   percent%
//! [=========================            ]
//! ```

use std::borrow::Cow;

use rankbar_core::clamp;
use rankbar_core::geometry::Rect;
use rankbar_render::scene::{FontWeight, RectShape, TextAnchor, TextShape};
use rankbar_render::{HitData, HitRegion, NodeId, Rgba, Scene};
use rankbar_style::{Palette, rank_color};

use crate::pointer::{ROW_BAR_HIT_ID, ROW_NAME_HIT_ID, ROWS_HIT_ID};
use crate::text::{NAME_MAX_CHARS, ellipsize};

/// Default progress bar fill.
pub const DEFAULT_BAR_COLOR: Rgba = Rgba::rgba(0x19, 0x77, 0xfb, 0xff);

/// Extra content shown in a tooltip.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TooltipPayload {
    pub content: String,
    /// Image reference drawn before the content.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub icon: Option<String>,
    /// Unit appended after the content.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub unit: Option<String>,
}

impl TooltipPayload {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            icon: None,
            unit: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Content followed by the unit, if any.
    pub fn label(&self) -> Cow<'_, str> {
        match &self.unit {
            Some(unit) if !unit.is_empty() => Cow::Owned(format!("{} {unit}", self.content)),
            _ => Cow::Borrowed(&self.content),
        }
    }
}

/// One data item rendered as a ranked bar.
///
/// With the `serde` feature the tooltip fields (`content`, `icon`, `unit`)
/// sit next to the record fields, matching the flat JSON shape:
///
/// ```json
/// { "name": "North", "amount": 120, "percent": 40, "content": "12 stores" }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub amount: f64,
    /// Share in `[0, 100]`; out-of-range values are clamped when drawn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub percent: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub color: Option<Rgba>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub tooltip: Option<TooltipPayload>,
}

impl RowRecord {
    pub fn new(name: impl Into<String>, amount: f64, percent: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            percent,
            color: None,
            tooltip: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipPayload) -> Self {
        self.tooltip = Some(tooltip);
        self
    }
}

/// Everything a factory needs to build one row.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub record: &'a RowRecord,
    /// Zero-based position in the dataset; the rank is `index + 1`.
    pub index: usize,
    pub row_width: f64,
    pub row_height: f64,
    /// Column start offsets shared with the header.
    pub columns: &'a [f64],
    pub palette: &'a Palette,
    /// Bar fill for records without their own color.
    pub default_color: Rgba,
}

/// Builds the scene subtree for one row.
///
/// Implementations return a *detached* node positioned at
/// `(0, index * row_height)`; the caller mounts it. Building the same index
/// twice within one cache lifetime must produce an equivalent row.
pub trait RowFactory {
    fn build_row(&self, scene: &mut Scene, ctx: &RowContext<'_>) -> NodeId;
}

impl<F> RowFactory for F
where
    F: Fn(&mut Scene, &RowContext<'_>) -> NodeId,
{
    fn build_row(&self, scene: &mut Scene, ctx: &RowContext<'_>) -> NodeId {
        self(scene, ctx)
    }
}

/// Row metrics derived from the row size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    pub padding: f64,
    /// Baseline of the name, amount and percent text.
    pub baseline: f64,
    pub badge_size: f64,
    pub badge_radius: f64,
    /// How far the badge sits above the text baseline.
    pub rank_offset: f64,
    pub text_size: f64,
    pub rank_size: f64,
    pub name_x: f64,
    pub progress_y: f64,
    pub progress_width: f64,
    pub progress_height: f64,
    pub progress_radius: f64,
}

impl RowGeometry {
    pub const PADDING: f64 = 24.0;
    pub const MIN_PROGRESS_HEIGHT: f64 = 6.0;

    pub fn new(row_width: f64, row_height: f64) -> Self {
        let h = row_height;
        let badge_size = h * 0.33;
        Self {
            padding: Self::PADDING,
            baseline: h * 0.4,
            badge_size,
            badge_radius: badge_size * 0.3,
            rank_offset: h * 0.15,
            text_size: h * 0.27,
            rank_size: h * 0.2,
            name_x: Self::PADDING + badge_size + h * 0.08,
            progress_y: h * 0.55,
            progress_width: (row_width - 2.0 * Self::PADDING).max(0.0),
            progress_height: (h * 0.25).max(Self::MIN_PROGRESS_HEIGHT),
            progress_radius: 8.0,
        }
    }

    /// Filled width for a percentage, clamped to the track.
    pub fn bar_width(&self, percent: f64) -> f64 {
        self.progress_width * clamp(percent, 0.0, 100.0) / 100.0
    }
}

/// The ranked bar row: badge, name, amount, percent and progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRowFactory {
    /// Names with more graphemes than this are ellipsized and get a tooltip.
    pub name_max_chars: usize,
}

impl Default for BarRowFactory {
    fn default() -> Self {
        Self {
            name_max_chars: NAME_MAX_CHARS,
        }
    }
}

impl BarRowFactory {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name_max_chars(mut self, max: usize) -> Self {
        self.name_max_chars = max;
        self
    }
}

impl RowFactory for BarRowFactory {
    fn build_row(&self, scene: &mut Scene, ctx: &RowContext<'_>) -> NodeId {
        let g = RowGeometry::new(ctx.row_width, ctx.row_height);
        let palette = ctx.palette;
        let record = ctx.record;
        let rank = ctx.index + 1;
        let data = ctx.index as HitData;
        let column = |i: usize| ctx.columns.get(i).copied().unwrap_or(g.padding);

        let row = scene.create_group();
        scene.set_label(row, "row");
        scene.set_translate(row, 0.0, ctx.index as f64 * ctx.row_height);
        scene.set_hit(row, ROWS_HIT_ID, HitRegion::Content, data);

        scene.add_rect(
            row,
            RectShape::new(
                Rect::from_size(ctx.row_width, ctx.row_height),
                palette.row_background,
            ),
        );

        // Rank badge
        let badge_x = column(0);
        scene.add_rect(
            row,
            RectShape::new(
                Rect::new(
                    badge_x,
                    g.baseline - g.badge_size / 2.0 - g.rank_offset,
                    g.badge_size,
                    g.badge_size,
                ),
                rank_color(rank),
            )
            .with_radius(g.badge_radius),
        );
        scene.add_text(
            row,
            TextShape::new(
                badge_x + g.badge_size / 2.0,
                g.baseline - g.rank_offset / 2.0,
                rank.to_string(),
                g.rank_size,
                palette.rank_text,
            )
            .bold()
            .with_anchor(TextAnchor::Middle),
        );

        let shown = ellipsize(&record.name, self.name_max_chars);
        let truncated = matches!(shown, Cow::Owned(_));
        let name = scene.add_text(
            row,
            TextShape::new(g.name_x, g.baseline, shown, g.text_size, palette.name_text)
                .with_weight(FontWeight::Medium),
        );
        if truncated {
            scene.set_hit(name, ROW_NAME_HIT_ID, HitRegion::Tooltip, data);
        }

        scene.add_text(
            row,
            TextShape::new(
                column(1),
                g.baseline,
                record.amount.to_string(),
                g.text_size,
                palette.value_text,
            )
            .bold(),
        );
        scene.add_text(
            row,
            TextShape::new(
                column(2),
                g.baseline,
                format!("{}%", record.percent),
                g.text_size,
                palette.value_text,
            )
            .bold(),
        );

        let track = Rect::new(g.padding, g.progress_y, g.progress_width, g.progress_height);
        scene.add_rect(
            row,
            RectShape::new(track, palette.progress_track).with_radius(g.progress_radius),
        );
        let bar = scene.add_rect(
            row,
            RectShape::new(
                Rect::new(
                    track.x,
                    track.y,
                    g.bar_width(record.percent),
                    track.height,
                ),
                record.color.unwrap_or(ctx.default_color),
            )
            .with_radius(g.progress_radius),
        );
        if record.tooltip.is_some() {
            scene.set_hit(bar, ROW_BAR_HIT_ID, HitRegion::Tooltip, data);
        }

        row
    }
}
