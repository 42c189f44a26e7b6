#![forbid(unsafe_code)]

//! Column header strip drawn above the scroll area.

use rankbar_core::geometry::Rect;
use rankbar_render::scene::{RectShape, TextShape};
use rankbar_render::{HitRegion, NodeId, Scene};
use rankbar_style::Palette;

use crate::pointer::HEADER_HIT_ID;

/// Default column titles (name, amount, contribution).
pub const DEFAULT_HEADER: [&str; 3] = ["名称", "金额", "贡献度"];

/// Default header height.
pub const DEFAULT_HEADER_HEIGHT: f64 = 40.0;

/// Header row: one label per column, drawn at the column offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRow {
    labels: Vec<String>,
    height: f64,
}

impl Default for HeaderRow {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER)
    }
}

impl HeaderRow {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            height: DEFAULT_HEADER_HEIGHT,
        }
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn height_value(&self) -> f64 {
        self.height
    }

    /// Label font size: 40% of the header height, never below 12.
    pub fn font_size(&self) -> f64 {
        (self.height * 0.4).max(12.0)
    }

    /// Baseline of the labels, relative to the header top.
    pub fn baseline(&self) -> f64 {
        self.height * 0.65
    }

    /// Draw the header under `parent` and return its group.
    ///
    /// Labels pair with `columns` in order; labels without a column are
    /// dropped and columns without a label stay empty.
    pub fn render(
        &self,
        scene: &mut Scene,
        parent: NodeId,
        width: f64,
        columns: &[f64],
        palette: &Palette,
    ) -> NodeId {
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "HeaderRow",
            w = width,
            h = self.height,
            labels = self.labels.len()
        )
        .entered();

        let group = scene.add_group(parent);
        scene.set_label(group, "header");
        scene.set_hit(group, HEADER_HIT_ID, HitRegion::Header, 0);

        scene.add_rect(
            group,
            RectShape::new(
                Rect::new(0.0, 0.0, width, self.height),
                palette.header_background,
            ),
        );

        let text = scene.add_group(group);
        scene.set_translate(text, 0.0, self.baseline());
        let size = self.font_size();
        for (label, &x) in self.labels.iter().zip(columns) {
            scene.add_text(
                text,
                TextShape::new(x, 0.0, label.clone(), size, palette.header_text).bold(),
            );
        }
        if self.labels.len() > columns.len() {
            tracing::debug!(
                labels = self.labels.len(),
                columns = columns.len(),
                "extra header labels dropped"
            );
        }
        group
    }
}
