#![forbid(unsafe_code)]

//! Scroll controller: the authoritative scroll offset, the scrollbar, and
//! the drag state machine.
//!
//! The controller owns the [`WindowedList`] and builds the scroll area:
//!
//! ```text
//! scroll-area
//! ├── viewport        clip (0, header, width - track, view_height)
//! │   └── content     translate(0, -scroll_y)
//! │       └── rows    translate(0, header)
//! ├── scrollbar background
//! ├── track
//! └── thumb
//! ```
//!
//! Three input channels write the offset: wheel, thumb drag and track
//! click. Every accepted write moves the content group, updates the
//! list's visible range, then repositions the thumb.
//!
//! # Invariants
//!
//! 1. `0 <= scroll_y <= max_scroll_y`, `max_scroll_y = max(0, content - view)`.
//! 2. `thumb_height = min(view, max(min_thumb, view / content * view))`.
//! 3. `thumb_max_y = max(0, view - thumb_height - 2 * inset)`.
//! 4. `thumb_y = scroll_y / max_scroll_y * thumb_max_y` (0 when nothing scrolls).
//! 5. With `max_scroll_y == 0` the scrollbar is hidden and input is ignored.

use std::fmt;

use rankbar_core::clamp;
use rankbar_core::event::{PointerButton, PointerEvent, PointerEventKind};
use rankbar_core::geometry::Rect;
use rankbar_render::scene::RectShape;
use rankbar_render::{HitData, HitId, HitRegion, NodeId, Rgba, Scene};
use rankbar_style::Palette;
use tracing::{debug, trace};

use crate::pointer::{PointerResult, SCROLLBAR_HIT_ID};
use crate::windowed_list::WindowedList;

/// Hit data for the scrollbar track.
pub const SCROLLBAR_PART_TRACK: HitData = 0;
/// Hit data for the scrollbar thumb.
pub const SCROLLBAR_PART_THUMB: HitData = 1;

/// Scrollbar dimensions and colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarMetrics {
    /// Gap between the track and the viewport edges.
    pub inset: f64,
    pub track_width: f64,
    pub min_thumb_height: f64,
    pub background_radius: f64,
    pub track_radius: f64,
    pub background: Rgba,
    pub track: Rgba,
    pub thumb: Rgba,
    pub thumb_hover: Rgba,
}

impl Default for ScrollbarMetrics {
    fn default() -> Self {
        Self::geometry_only().colors_from(&Palette::default())
    }
}

impl ScrollbarMetrics {
    pub const DEFAULT_INSET: f64 = 4.0;
    pub const DEFAULT_TRACK_WIDTH: f64 = 12.0;
    pub const DEFAULT_MIN_THUMB: f64 = 30.0;

    const fn geometry_only() -> Self {
        Self {
            inset: Self::DEFAULT_INSET,
            track_width: Self::DEFAULT_TRACK_WIDTH,
            min_thumb_height: Self::DEFAULT_MIN_THUMB,
            background_radius: 6.0,
            track_radius: 4.0,
            background: Rgba::TRANSPARENT,
            track: Rgba::TRANSPARENT,
            thumb: Rgba::TRANSPARENT,
            thumb_hover: Rgba::TRANSPARENT,
        }
    }

    /// Take the scrollbar colors from a palette.
    #[must_use]
    pub fn colors_from(mut self, palette: &Palette) -> Self {
        self.background = palette.scrollbar_background;
        self.track = palette.scrollbar_track;
        self.thumb = palette.scrollbar_thumb;
        self.thumb_hover = palette.scrollbar_thumb_hover;
        self
    }

    #[must_use]
    pub fn inset(mut self, inset: f64) -> Self {
        self.inset = inset;
        self
    }

    #[must_use]
    pub fn track_width(mut self, width: f64) -> Self {
        self.track_width = width;
        self
    }

    #[must_use]
    pub fn min_thumb_height(mut self, height: f64) -> Self {
        self.min_thumb_height = height;
        self
    }
}

/// Errors raised when building a [`ScrollController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollError {
    /// The view height (`height - header_height`) is not positive, or a
    /// dimension is not finite.
    InvalidViewport {
        width: f64,
        height: f64,
        header_height: f64,
    },
}

impl fmt::Display for ScrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewport {
                width,
                height,
                header_height,
            } => write!(
                f,
                "invalid viewport: {width}x{height} with header height {header_height}"
            ),
        }
    }
}

impl std::error::Error for ScrollError {}

/// Thumb drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// The thumb holds pointer capture: every move and release is routed
    /// to the controller regardless of what lies under the pointer.
    Dragging {
        /// Pointer `y` of the last processed event.
        last_pointer_y: f64,
        /// Thumb offset when the drag started.
        origin_thumb_y: f64,
    },
}

#[derive(Debug, Clone, Copy)]
struct ScrollbarNodes {
    scroll_area: NodeId,
    viewport: NodeId,
    content: NodeId,
    background: NodeId,
    track: NodeId,
    thumb: NodeId,
}

/// Owns the scroll offset, the scrollbar and the windowed list.
#[derive(Debug)]
pub struct ScrollController {
    list: WindowedList,
    metrics: ScrollbarMetrics,
    nodes: ScrollbarNodes,
    width: f64,
    header_height: f64,
    view_height: f64,
    content_height: f64,
    scroll_y: f64,
    max_scroll_y: f64,
    thumb_height: f64,
    thumb_max_y: f64,
    thumb_y: f64,
    phase: DragPhase,
    thumb_hovered: bool,
}

impl ScrollController {
    /// Build the scroll area under the scene root with default metrics.
    pub fn new(
        scene: &mut Scene,
        list: WindowedList,
        width: f64,
        height: f64,
        header_height: f64,
    ) -> Result<Self, ScrollError> {
        Self::with_metrics(
            scene,
            list,
            width,
            height,
            header_height,
            ScrollbarMetrics::default(),
        )
    }

    /// Build the scroll area under the scene root.
    ///
    /// Materializes the first window, mounts the list container, sizes the
    /// thumb from the list's content height and hides the scrollbar when
    /// nothing overflows.
    pub fn with_metrics(
        scene: &mut Scene,
        mut list: WindowedList,
        width: f64,
        height: f64,
        header_height: f64,
        metrics: ScrollbarMetrics,
    ) -> Result<Self, ScrollError> {
        let view_height = height - header_height;
        let finite = width.is_finite() && height.is_finite() && header_height.is_finite();
        if !finite || view_height <= 0.0 {
            tracing::warn!(width, height, header_height, "invalid scroll viewport");
            return Err(ScrollError::InvalidViewport {
                width,
                height,
                header_height,
            });
        }

        let _span = tracing::debug_span!(
            "widget_render",
            widget = "ScrollController",
            w = width,
            h = height,
            rows = list.row_count()
        )
        .entered();

        list.update_visible_range(scene, 0.0);

        let root = scene.root();
        let scroll_area = scene.add_group(root);
        scene.set_label(scroll_area, "scroll-area");

        let viewport = scene.add_group(scroll_area);
        scene.set_label(viewport, "viewport");
        scene.set_clip(
            viewport,
            Some(Rect::new(
                0.0,
                header_height,
                (width - metrics.track_width).max(0.0),
                view_height,
            )),
        );

        let content = scene.add_group(viewport);
        scene.set_label(content, "content");
        scene.append_child(content, list.container());

        let m = &metrics;
        let background = scene.add_rect(
            scroll_area,
            RectShape::new(
                Rect::new(
                    width - m.track_width - m.inset,
                    header_height,
                    m.track_width + m.inset,
                    view_height,
                ),
                m.background,
            )
            .with_radius(m.background_radius),
        );
        scene.set_label(background, "scrollbar");

        let bar_x = width - m.track_width - m.inset / 2.0;
        let track = scene.add_rect(
            scroll_area,
            RectShape::new(
                Rect::new(
                    bar_x,
                    header_height + m.inset,
                    m.track_width,
                    (view_height - 2.0 * m.inset).max(0.0),
                ),
                m.track,
            )
            .with_radius(m.track_radius),
        );
        scene.set_label(track, "scrollbar-track");
        scene.set_hit(track, SCROLLBAR_HIT_ID, HitRegion::Scrollbar, SCROLLBAR_PART_TRACK);

        let thumb = scene.add_rect(
            scroll_area,
            RectShape::new(
                Rect::new(bar_x, header_height + m.inset, m.track_width, 0.0),
                m.thumb,
            )
            .with_radius(m.track_radius),
        );
        scene.set_label(thumb, "scrollbar-thumb");
        scene.set_hit(thumb, SCROLLBAR_HIT_ID, HitRegion::Scrollbar, SCROLLBAR_PART_THUMB);

        let mut controller = Self {
            list,
            metrics,
            nodes: ScrollbarNodes {
                scroll_area,
                viewport,
                content,
                background,
                track,
                thumb,
            },
            width,
            header_height,
            view_height,
            content_height: 0.0,
            scroll_y: 0.0,
            max_scroll_y: 0.0,
            thumb_height: 0.0,
            thumb_max_y: 0.0,
            thumb_y: 0.0,
            phase: DragPhase::Idle,
            thumb_hovered: false,
        };
        controller.sync_content_height(scene);
        Ok(controller)
    }

    /// Re-derive the scroll range and thumb size from the list's content
    /// height.
    pub fn sync_content_height(&mut self, scene: &mut Scene) {
        self.content_height = self.list.total_height();
        self.max_scroll_y = (self.content_height - self.view_height).max(0.0);
        self.scroll_y = clamp(self.scroll_y, 0.0, self.max_scroll_y);

        let scrollable = self.max_scroll_y > 0.0;
        for node in [self.nodes.background, self.nodes.track, self.nodes.thumb] {
            scene.set_visible(node, scrollable);
        }

        if !scrollable {
            self.thumb_height = self.view_height;
            self.thumb_max_y = 0.0;
            self.thumb_y = 0.0;
            if let Some(thumb) = scene.rect_mut(self.nodes.thumb) {
                thumb.bounds.height = self.thumb_height;
            }
            debug!(
                content_height = self.content_height,
                view_height = self.view_height,
                "content fits, scrollbar hidden"
            );
            return;
        }

        let proportional = self.view_height / self.content_height * self.view_height;
        self.thumb_height = proportional
            .max(self.metrics.min_thumb_height)
            .min(self.view_height);
        self.thumb_max_y =
            (self.view_height - self.thumb_height - 2.0 * self.metrics.inset).max(0.0);
        if let Some(thumb) = scene.rect_mut(self.nodes.thumb) {
            thumb.bounds.height = self.thumb_height;
        }
        debug!(
            content_height = self.content_height,
            max_scroll_y = self.max_scroll_y,
            thumb_height = self.thumb_height,
            "scrollbar sized"
        );
        self.update_view(scene);
    }

    fn update_view(&mut self, scene: &mut Scene) {
        scene.set_translate(self.nodes.content, 0.0, -self.scroll_y);
        self.list.update_visible_range(scene, self.scroll_y);
        self.thumb_y = if self.max_scroll_y > 0.0 {
            self.scroll_y / self.max_scroll_y * self.thumb_max_y
        } else {
            0.0
        };
        let top = self.track_top() + self.thumb_y;
        if let Some(thumb) = scene.rect_mut(self.nodes.thumb) {
            thumb.bounds.y = top;
        }
    }

    fn set_scroll(&mut self, scene: &mut Scene, scroll_y: f64, source: &'static str) {
        let next = if scroll_y.is_finite() {
            clamp(scroll_y, 0.0, self.max_scroll_y)
        } else {
            self.scroll_y
        };
        trace!(from = self.scroll_y, to = next, source, "scroll");
        self.scroll_y = next;
        self.update_view(scene);
    }

    /// Scroll to an absolute offset, clamped to `[0, max_scroll_y]`.
    pub fn scroll_to(&mut self, scene: &mut Scene, scroll_y: f64) {
        self.set_scroll(scene, scroll_y, "api");
    }

    /// Wheel channel: `scroll_y + delta_y`, clamped.
    pub fn scroll_by(&mut self, scene: &mut Scene, delta_y: f64) -> PointerResult {
        if !self.is_scrollable() {
            return PointerResult::Ignored;
        }
        self.set_scroll(scene, self.scroll_y + delta_y, "wheel");
        PointerResult::Scrolled
    }

    /// Track-click channel: jump to the offset proportional to where the
    /// track was hit.
    pub fn click_track(&mut self, scene: &mut Scene, pointer_y: f64) -> PointerResult {
        if !self.is_scrollable() {
            return PointerResult::Ignored;
        }
        let track_height = self.track_height();
        let ratio = if track_height > 0.0 {
            clamp((pointer_y - self.track_top()) / track_height, 0.0, 1.0)
        } else {
            0.0
        };
        self.set_scroll(scene, ratio * self.max_scroll_y, "track");
        PointerResult::Scrolled
    }

    /// `Idle -> Dragging`: capture the pointer.
    pub fn begin_drag(&mut self, pointer_y: f64) -> PointerResult {
        if !self.is_scrollable() {
            return PointerResult::Ignored;
        }
        self.enter(DragPhase::Dragging {
            last_pointer_y: pointer_y,
            origin_thumb_y: self.thumb_y,
        });
        PointerResult::DragStarted
    }

    /// `Dragging -> Dragging`: move the thumb by the pointer delta and
    /// derive the offset from the thumb position.
    pub fn drag_to(&mut self, scene: &mut Scene, pointer_y: f64) -> PointerResult {
        let DragPhase::Dragging {
            last_pointer_y,
            origin_thumb_y,
        } = self.phase
        else {
            return PointerResult::Ignored;
        };
        let delta = pointer_y - last_pointer_y;
        self.phase = DragPhase::Dragging {
            last_pointer_y: pointer_y,
            origin_thumb_y,
        };

        // Relative to the current thumb; wheel or track input may have moved
        // it mid-drag.
        let thumb_y = clamp(self.thumb_y + delta, 0.0, self.thumb_max_y);
        let scroll_y = if self.thumb_max_y > 0.0 {
            thumb_y / self.thumb_max_y * self.max_scroll_y
        } else {
            0.0
        };
        self.set_scroll(scene, scroll_y, "drag");
        PointerResult::Scrolled
    }

    /// `Dragging -> Idle`: release the pointer.
    pub fn end_drag(&mut self) -> PointerResult {
        if !self.is_dragging() {
            return PointerResult::Ignored;
        }
        self.enter(DragPhase::Idle);
        PointerResult::DragEnded
    }

    fn enter(&mut self, next: DragPhase) {
        match (self.phase, next) {
            (DragPhase::Idle, DragPhase::Dragging { last_pointer_y, .. }) => {
                debug!(pointer_y = last_pointer_y, thumb_y = self.thumb_y, "pointer captured");
            }
            (DragPhase::Dragging { origin_thumb_y, .. }, DragPhase::Idle) => {
                debug!(from = origin_thumb_y, to = self.thumb_y, "pointer released");
            }
            _ => {}
        }
        self.phase = next;
    }

    /// Route a pointer event.
    ///
    /// `hit` is the scene hit test at the event position. While a drag is
    /// active, moves and releases are handled wherever they land.
    pub fn handle_pointer(
        &mut self,
        scene: &mut Scene,
        event: &PointerEvent,
        hit: Option<(HitId, HitRegion, HitData)>,
    ) -> PointerResult {
        let part = match hit {
            Some((id, HitRegion::Scrollbar, part)) if id == SCROLLBAR_HIT_ID => Some(part),
            _ => None,
        };

        match event.kind {
            PointerEventKind::Wheel { delta_y } => self.scroll_by(scene, delta_y),
            PointerEventKind::Down(PointerButton::Primary)
                if part == Some(SCROLLBAR_PART_THUMB) =>
            {
                self.begin_drag(event.y)
            }
            PointerEventKind::Moved if self.is_dragging() => self.drag_to(scene, event.y),
            PointerEventKind::Moved => {
                self.set_thumb_hover(scene, part == Some(SCROLLBAR_PART_THUMB))
            }
            PointerEventKind::Up(PointerButton::Primary) => self.end_drag(),
            PointerEventKind::Click(PointerButton::Primary)
                if part == Some(SCROLLBAR_PART_TRACK) =>
            {
                self.click_track(scene, event.y)
            }
            PointerEventKind::Leave if !self.is_dragging() => self.set_thumb_hover(scene, false),
            _ => PointerResult::Ignored,
        }
    }

    fn set_thumb_hover(&mut self, scene: &mut Scene, hovered: bool) -> PointerResult {
        if hovered == self.thumb_hovered {
            return PointerResult::Ignored;
        }
        self.thumb_hovered = hovered;
        let fill = if hovered {
            self.metrics.thumb_hover
        } else {
            self.metrics.thumb
        };
        if let Some(thumb) = scene.rect_mut(self.nodes.thumb) {
            thumb.fill = fill;
        }
        PointerResult::HoverChanged
    }

    /// Top of the track in scene coordinates.
    #[inline]
    pub fn track_top(&self) -> f64 {
        self.header_height + self.metrics.inset
    }

    #[inline]
    pub fn track_height(&self) -> f64 {
        (self.view_height - 2.0 * self.metrics.inset).max(0.0)
    }

    #[inline]
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    #[inline]
    pub fn max_scroll_y(&self) -> f64 {
        self.max_scroll_y
    }

    #[inline]
    pub fn view_height(&self) -> f64 {
        self.view_height
    }

    #[inline]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    #[inline]
    pub fn thumb_height(&self) -> f64 {
        self.thumb_height
    }

    /// Thumb offset within the track, in `[0, thumb_max_y]`.
    #[inline]
    pub fn thumb_y(&self) -> f64 {
        self.thumb_y
    }

    #[inline]
    pub fn thumb_max_y(&self) -> f64 {
        self.thumb_max_y
    }

    /// Thumb rectangle in scene coordinates.
    pub fn thumb_rect(&self) -> Rect {
        Rect::new(
            self.width - self.metrics.track_width - self.metrics.inset / 2.0,
            self.track_top() + self.thumb_y,
            self.metrics.track_width,
            self.thumb_height,
        )
    }

    /// Track rectangle in scene coordinates.
    pub fn track_rect(&self) -> Rect {
        Rect::new(
            self.width - self.metrics.track_width - self.metrics.inset / 2.0,
            self.track_top(),
            self.metrics.track_width,
            self.track_height(),
        )
    }

    #[inline]
    pub fn is_scrollable(&self) -> bool {
        self.max_scroll_y > 0.0
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Whether pointer events should be routed here regardless of hit.
    #[inline]
    pub fn captures_pointer(&self) -> bool {
        self.is_dragging()
    }

    #[inline]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    #[inline]
    pub fn is_thumb_hovered(&self) -> bool {
        self.thumb_hovered
    }

    #[inline]
    pub fn metrics(&self) -> &ScrollbarMetrics {
        &self.metrics
    }

    #[inline]
    pub fn list(&self) -> &WindowedList {
        &self.list
    }

    /// Group holding the clipped viewport and the scrollbar.
    #[inline]
    pub fn scroll_area(&self) -> NodeId {
        self.nodes.scroll_area
    }

    /// Group clipped to the viewport.
    #[inline]
    pub fn viewport(&self) -> NodeId {
        self.nodes.viewport
    }

    /// Group translated by `-scroll_y`.
    #[inline]
    pub fn content(&self) -> NodeId {
        self.nodes.content
    }

    #[inline]
    pub fn thumb(&self) -> NodeId {
        self.nodes.thumb
    }

    #[inline]
    pub fn track(&self) -> NodeId {
        self.nodes.track
    }

    #[inline]
    pub fn background(&self) -> NodeId {
        self.nodes.background
    }
}
