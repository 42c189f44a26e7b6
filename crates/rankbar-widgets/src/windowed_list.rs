#![forbid(unsafe_code)]

//! Windowed row list.
//!
//! Maps a continuous scroll offset to the half-open range of rows that must
//! exist in the scene, and materializes missing rows through a
//! [`RowFactory`]. Materialized rows are cached by index and mounted under a
//! single container group, translated below the header.
//!
//! # Invariants
//!
//! 1. `start = min(row_count, max(0, floor(scroll_y / row_height)))`.
//! 2. `end = min(row_count, start + visible_count)`, so `start <= end`.
//! 3. An unchanged range is a no-op: nothing is built or removed.
//! 4. Rows are built in ascending index order, at most once per cache
//!    lifetime under [`CachePolicy::Unbounded`].
//! 5. `visible_count = ceil(view_height / row_height) + buffer_rows`, fixed
//!    at construction.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use rankbar_layout::{ColumnLayout, LayoutError};
use rankbar_render::{NodeId, Rgba, Scene};
use rankbar_style::Palette;
use tracing::{debug, trace};

use crate::row::{DEFAULT_BAR_COLOR, RowContext, RowFactory, RowRecord};

/// Rows materialized beyond the visible area.
pub const BUFFER_ROWS: usize = 4;

/// What happens to rows that leave the visible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CachePolicy {
    /// Rows stay mounted until the list is dropped.
    #[default]
    Unbounded,
    /// Rows further than `margin` rows from the visible range are removed
    /// from the scene and rebuilt on demand.
    Bounded { margin: usize },
}

/// Errors raised when building a [`WindowedList`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowError {
    /// Row height is zero, negative or not finite.
    InvalidRowHeight(f64),
    /// View height is negative or not finite.
    InvalidViewHeight(f64),
    /// The column layout could not be computed for the container width.
    Layout(LayoutError),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRowHeight(h) => write!(f, "row height must be positive, got {h}"),
            Self::InvalidViewHeight(h) => write!(f, "view height must be non-negative, got {h}"),
            Self::Layout(e) => write!(f, "row layout failed: {e}"),
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LayoutError> for WindowError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

/// Configuration for a [`WindowedList`].
#[derive(Debug, Clone)]
pub struct WindowedListConfig {
    pub data: Arc<[RowRecord]>,
    pub container_width: f64,
    pub row_height: f64,
    /// The container is translated down by this much.
    pub header_height: f64,
    /// Height of the scrollable viewport (surface height minus header).
    pub view_height: f64,
    pub palette: Palette,
    pub default_color: Rgba,
    pub buffer_rows: usize,
    pub cache_policy: CachePolicy,
}

impl Default for WindowedListConfig {
    fn default() -> Self {
        Self {
            data: Arc::from(Vec::new()),
            container_width: 0.0,
            row_height: 60.0,
            header_height: 40.0,
            view_height: 0.0,
            palette: Palette::default(),
            default_color: DEFAULT_BAR_COLOR,
            buffer_rows: BUFFER_ROWS,
            cache_policy: CachePolicy::Unbounded,
        }
    }
}

impl WindowedListConfig {
    /// Start from the defaults with the given dataset.
    pub fn new(data: impl Into<Arc<[RowRecord]>>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn container_width(mut self, width: f64) -> Self {
        self.container_width = width;
        self
    }

    #[must_use]
    pub fn row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    #[must_use]
    pub fn header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    #[must_use]
    pub fn view_height(mut self, height: f64) -> Self {
        self.view_height = height;
        self
    }

    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn default_color(mut self, color: Rgba) -> Self {
        self.default_color = color;
        self
    }

    #[must_use]
    pub fn buffer_rows(mut self, rows: usize) -> Self {
        self.buffer_rows = rows;
        self
    }

    #[must_use]
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }
}

/// Lazily materialized list of rows.
pub struct WindowedList {
    config: WindowedListConfig,
    factory: Box<dyn RowFactory>,
    container: NodeId,
    columns: Vec<f64>,
    cache: BTreeMap<usize, NodeId>,
    range: Range<usize>,
    visible_count: usize,
    materialized: u64,
}

impl fmt::Debug for WindowedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowedList")
            .field("rows", &self.config.data.len())
            .field("range", &self.range)
            .field("visible_count", &self.visible_count)
            .field("cached", &self.cache.len())
            .field("materialized", &self.materialized)
            .finish()
    }
}

impl WindowedList {
    /// Create the (detached) row container and size the window.
    ///
    /// Nothing is materialized until the first
    /// [`update_visible_range`](Self::update_visible_range).
    pub fn new(
        scene: &mut Scene,
        config: WindowedListConfig,
        factory: impl RowFactory + 'static,
    ) -> Result<Self, WindowError> {
        let row_height = config.row_height;
        if !(row_height.is_finite() && row_height > 0.0) {
            return Err(WindowError::InvalidRowHeight(row_height));
        }
        if !(config.view_height.is_finite() && config.view_height >= 0.0) {
            return Err(WindowError::InvalidViewHeight(config.view_height));
        }
        let columns = ColumnLayout::ranked_row().offsets(config.container_width)?;

        let visible_count = (config.view_height / row_height).ceil() as usize + config.buffer_rows;

        let container = scene.create_group();
        scene.set_label(container, "rows");
        scene.set_translate(container, 0.0, config.header_height);

        debug!(
            rows = config.data.len(),
            row_height,
            visible_count,
            "windowed list created"
        );

        Ok(Self {
            config,
            factory: Box::new(factory),
            container,
            columns,
            cache: BTreeMap::new(),
            range: 0..0,
            visible_count,
            materialized: 0,
        })
    }

    /// Recompute the visible range for `scroll_y` and materialize new rows.
    ///
    /// Returns `true` when the range changed.
    pub fn update_visible_range(&mut self, scene: &mut Scene, scroll_y: f64) -> bool {
        let next = self.range_for(scroll_y);
        if next == self.range {
            return false;
        }
        debug!(
            start = next.start,
            end = next.end,
            previous_start = self.range.start,
            previous_end = self.range.end,
            "visible range changed"
        );
        self.range = next;
        self.materialize(scene);
        if let CachePolicy::Bounded { margin } = self.config.cache_policy {
            self.evict(scene, margin);
        }
        true
    }

    /// The range [`update_visible_range`](Self::update_visible_range) would
    /// select for `scroll_y`, without touching the scene.
    pub fn range_for(&self, scroll_y: f64) -> Range<usize> {
        let rows = self.row_count();
        let scroll_y = if scroll_y.is_finite() { scroll_y } else { 0.0 };
        // Float-to-int casts saturate.
        let start = ((scroll_y / self.config.row_height).floor().max(0.0) as usize).min(rows);
        let end = start.saturating_add(self.visible_count).min(rows);
        start..end
    }

    fn materialize(&mut self, scene: &mut Scene) {
        let Self {
            config,
            factory,
            container,
            columns,
            cache,
            range,
            materialized,
            ..
        } = self;

        for index in range.clone() {
            if cache.contains_key(&index) {
                continue;
            }
            let ctx = RowContext {
                record: &config.data[index],
                index,
                row_width: config.container_width,
                row_height: config.row_height,
                columns: columns.as_slice(),
                palette: &config.palette,
                default_color: config.default_color,
            };
            let row = factory.build_row(scene, &ctx);
            scene.append_child(*container, row);
            cache.insert(index, row);
            *materialized += 1;
            trace!(index, "row materialized");
        }
    }

    fn evict(&mut self, scene: &mut Scene, margin: usize) {
        let keep = self.range.start.saturating_sub(margin)..self.range.end.saturating_add(margin);
        let before = self.cache.len();
        self.cache.retain(|index, node| {
            let keep_it = keep.contains(index);
            if !keep_it {
                scene.remove(*node);
            }
            keep_it
        });
        let evicted = before - self.cache.len();
        if evicted > 0 {
            debug!(evicted, cached = self.cache.len(), "rows evicted");
        }
    }

    /// Group holding every materialized row.
    #[inline]
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// `row_count * row_height`.
    #[inline]
    pub fn total_height(&self) -> f64 {
        self.row_count() as f64 * self.config.row_height
    }

    #[inline]
    pub fn visible_range(&self) -> Range<usize> {
        self.range.clone()
    }

    #[inline]
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.config.data.len()
    }

    #[inline]
    pub fn row_height(&self) -> f64 {
        self.config.row_height
    }

    /// Column offsets shared with the header.
    #[inline]
    pub fn columns(&self) -> &[f64] {
        &self.columns
    }

    #[inline]
    pub fn data(&self) -> &Arc<[RowRecord]> {
        &self.config.data
    }

    pub fn record(&self, index: usize) -> Option<&RowRecord> {
        self.config.data.get(index)
    }

    /// Number of rows currently mounted.
    #[inline]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Scene node of a mounted row.
    pub fn cached_row(&self, index: usize) -> Option<NodeId> {
        self.cache.get(&index).copied()
    }

    /// How many times the factory has been invoked.
    #[inline]
    pub fn materialized_count(&self) -> u64 {
        self.materialized
    }

    #[inline]
    pub fn cache_policy(&self) -> CachePolicy {
        self.config.cache_policy
    }
}
