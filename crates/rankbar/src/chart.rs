#![forbid(unsafe_code)]

//! The horizontal ranked bar chart.
//!
//! [`HorizontalChart`] owns the scene and, once rendered, one scroll
//! controller (which owns the windowed list), one header and one tooltip.
//! The host forwards pointer events to [`HorizontalChart::handle_pointer`];
//! everything else is driven by option updates.
//!
//! Scene layout after [`render`](HorizontalChart::render):
//!
//! ```text
//! root
//! ├── scroll-area   (viewport, content, rows, scrollbar)
//! ├── header
//! └── tooltip
//! ```

use std::fmt;
use std::sync::Arc;

use rankbar_core::event::{PointerEvent, PointerEventKind};
use rankbar_core::geometry::Size;
use rankbar_render::svg::SvgExporter;
use rankbar_render::{HitData, HitId, HitRegion, NodeId, Scene};
use rankbar_style::Palette;
use rankbar_widgets::pointer::{ROW_BAR_HIT_ID, ROW_NAME_HIT_ID};
use rankbar_widgets::{
    BarRowFactory, HeaderRow, PointerResult, RowRecord, ScrollController, TooltipPayload,
    TooltipService, WindowedList, WindowedListConfig,
};
use tracing::{debug, info};

use crate::options::{ChartOptions, ChartOptionsPatch};
use crate::sort::sort_by_amount;
use crate::{Error, Result};

type ReadyCallback = Box<dyn FnMut(&HorizontalChart)>;

/// Widgets built by one render pass.
#[derive(Debug)]
struct Mounted {
    controller: ScrollController,
    tooltip: TooltipService,
    header: NodeId,
    palette: Palette,
}

/// Windowed ranked bar chart.
///
/// ```
/// use rankbar::prelude::*;
///
/// let rows = (0..1000)
///     .map(|i| RowRecord::new(format!("store {i}"), i as f64, 0.1))
///     .collect();
/// let mut chart = HorizontalChart::init(700.0, 560.0)?;
/// chart.set_simple_options(ChartOptionsPatch::new().data(rows).sort(Some(SortOrder::Desc)));
/// chart.render()?;
///
/// let controller = chart.controller().unwrap();
/// assert_eq!(controller.list().visible_range(), 0..13);
/// assert_eq!(controller.list().record(0).unwrap().amount, 999.0);
/// # Ok::<(), rankbar::Error>(())
/// ```
pub struct HorizontalChart {
    size: Size,
    options: ChartOptions,
    scene: Scene,
    mounted: Option<Mounted>,
    on_ready: Option<ReadyCallback>,
    renders: u64,
}

impl fmt::Debug for HorizontalChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HorizontalChart")
            .field("size", &self.size)
            .field("options", &self.options)
            .field("rendered", &self.mounted.is_some())
            .field("renders", &self.renders)
            .finish_non_exhaustive()
    }
}

impl HorizontalChart {
    /// Create an empty chart surface of `width` x `height`.
    pub fn init(width: f64, height: f64) -> Result<Self> {
        let size = Size::new(width, height);
        if !size.is_valid() || width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidSize { width, height });
        }
        debug!(width, height, "chart initialized");
        Ok(Self {
            size,
            options: ChartOptions::default(),
            scene: Scene::new(width, height),
            mounted: None,
            on_ready: None,
            renders: 0,
        })
    }

    /// Merge `patch` into the current options. Nothing is redrawn until
    /// [`render`](Self::render).
    pub fn set_simple_options(&mut self, patch: ChartOptionsPatch) -> &mut Self {
        self.options.merge(patch);
        self
    }

    /// Replace the options wholesale.
    pub fn set_options(&mut self, options: ChartOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Register a callback invoked at the end of every successful render.
    pub fn on_render_ready(&mut self, callback: impl FnMut(&HorizontalChart) + 'static) {
        self.on_ready = Some(Box::new(callback));
    }

    /// Sort the data (when a sort order is set) and rebuild the scroll
    /// area, header and tooltip from scratch.
    pub fn render(&mut self) -> Result<()> {
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "HorizontalChart",
            w = self.size.width,
            h = self.size.height,
            rows = self.options.data.len()
        )
        .entered();

        self.uninstall();

        if let Some(order) = self.options.sort {
            let data = std::mem::take(&mut self.options.data);
            self.options.data = sort_by_amount(data, order);
        }

        let palette = Palette::for_theme(self.options.theme);
        let header_height = self.options.header_height;
        let data: Arc<[RowRecord]> = self.options.data.clone().into();
        let config = WindowedListConfig::new(data)
            .container_width(self.size.width)
            .row_height(self.options.row_height)
            .header_height(header_height)
            .view_height((self.size.height - header_height).max(0.0))
            .palette(palette)
            .default_color(self.options.color)
            .cache_policy(self.options.cache_policy);

        let list = WindowedList::new(&mut self.scene, config, BarRowFactory::default())?;
        let columns = list.columns().to_vec();
        let container = list.container();
        let controller = match ScrollController::new(
            &mut self.scene,
            list,
            self.size.width,
            self.size.height,
            header_height,
        ) {
            Ok(controller) => controller,
            Err(err) => {
                self.scene.remove(container);
                return Err(err.into());
            }
        };

        let root = self.scene.root();
        let header = HeaderRow::new(self.options.header.iter().cloned())
            .height(header_height)
            .render(&mut self.scene, root, self.size.width, &columns, &palette);
        let tooltip = TooltipService::new(&mut self.scene, root, self.size, &palette);

        self.mounted = Some(Mounted {
            controller,
            tooltip,
            header,
            palette,
        });
        self.renders += 1;
        info!(
            rows = self.options.data.len(),
            theme = self.options.theme.as_str(),
            "chart rendered"
        );

        if let Some(mut callback) = self.on_ready.take() {
            callback(self);
            if self.on_ready.is_none() {
                self.on_ready = Some(callback);
            }
        }
        Ok(())
    }

    /// Sort the current data in place without rebuilding.
    pub fn sort_data(&mut self) {
        if let Some(order) = self.options.sort {
            let data = std::mem::take(&mut self.options.data);
            self.options.data = sort_by_amount(data, order);
        }
    }

    /// Merge `patch` and render again.
    pub fn refresh(&mut self, patch: ChartOptionsPatch) -> Result<()> {
        self.set_simple_options(patch);
        self.render()
    }

    /// Replace the dataset and render again.
    pub fn refresh_data(&mut self, data: Vec<RowRecord>) -> Result<()> {
        self.options.data = data;
        self.render()
    }

    /// Remove everything drawn by the last render. Options and the ready
    /// callback are kept.
    pub fn uninstall(&mut self) {
        let root = self.scene.root();
        self.scene.clear_children(root);
        if self.mounted.take().is_some() {
            debug!("chart uninstalled");
        }
    }

    /// Tear the chart down.
    pub fn destroy(mut self) {
        self.uninstall();
        self.on_ready = None;
        debug!(renders = self.renders, "chart destroyed");
    }

    /// Route a pointer event to the scroll controller and the tooltip.
    ///
    /// While the thumb is dragged, the controller receives every event and
    /// the tooltip stays hidden.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> PointerResult {
        let Some(mounted) = self.mounted.as_mut() else {
            return PointerResult::Ignored;
        };
        let hit = match event.kind {
            PointerEventKind::Leave => None,
            _ => self.scene.hit_test(event.position()),
        };

        let result = mounted
            .controller
            .handle_pointer(&mut self.scene, event, hit);
        if mounted.controller.captures_pointer() || result == PointerResult::DragStarted {
            mounted.tooltip.hide(&mut self.scene);
            return result;
        }

        match event.kind {
            PointerEventKind::Moved => {
                let tip = match tooltip_for(mounted.controller.list(), hit) {
                    Some(payload) => {
                        let was_visible = mounted.tooltip.is_visible();
                        mounted
                            .tooltip
                            .show(&mut self.scene, &payload, event.position());
                        (!was_visible).then_some(PointerResult::TooltipShown)
                    }
                    None => mounted
                        .tooltip
                        .hide(&mut self.scene)
                        .then_some(PointerResult::TooltipHidden),
                };
                if result.is_handled() {
                    result
                } else {
                    tip.unwrap_or(PointerResult::Ignored)
                }
            }
            PointerEventKind::Leave => {
                let hidden = mounted.tooltip.hide(&mut self.scene);
                if result.is_handled() {
                    result
                } else if hidden {
                    PointerResult::TooltipHidden
                } else {
                    PointerResult::Ignored
                }
            }
            _ => result,
        }
    }

    /// Scroll to an absolute offset. Ignored before the first render.
    pub fn scroll_to(&mut self, scroll_y: f64) {
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.controller.scroll_to(&mut self.scene, scroll_y);
        }
    }

    /// Export the current scene as an SVG document.
    pub fn to_svg(&self) -> String {
        let background = self.mounted.as_ref().map(|m| m.palette.row_background);
        SvgExporter {
            background,
            ..SvgExporter::default()
        }
        .export(&self.scene)
    }

    #[inline]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn is_rendered(&self) -> bool {
        self.mounted.is_some()
    }

    /// Number of completed renders.
    #[inline]
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn controller(&self) -> Option<&ScrollController> {
        self.mounted.as_ref().map(|m| &m.controller)
    }

    pub fn tooltip(&self) -> Option<&TooltipService> {
        self.mounted.as_ref().map(|m| &m.tooltip)
    }

    /// Header group of the current render.
    pub fn header(&self) -> Option<NodeId> {
        self.mounted.as_ref().map(|m| m.header)
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.mounted.as_ref().map(|m| &m.palette)
    }
}

/// Tooltip content for a hovered row part.
fn tooltip_for(
    list: &WindowedList,
    hit: Option<(HitId, HitRegion, HitData)>,
) -> Option<TooltipPayload> {
    let (id, region, data) = hit?;
    if region != HitRegion::Tooltip {
        return None;
    }
    let record = list.record(usize::try_from(data).ok()?)?;
    if id == ROW_NAME_HIT_ID {
        Some(TooltipPayload::new(record.name.clone()))
    } else if id == ROW_BAR_HIT_ID {
        record.tooltip.clone()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn records(n: usize) -> Vec<RowRecord> {
        (0..n)
            .map(|i| RowRecord::new(format!("row {i}"), i as f64, 1.0))
            .collect()
    }

    fn rendered(n: usize) -> HorizontalChart {
        let mut chart = HorizontalChart::init(700.0, 560.0).unwrap();
        chart.set_simple_options(ChartOptionsPatch::new().data(records(n)));
        chart.render().unwrap();
        chart
    }

    #[test]
    fn init_rejects_bad_sizes() {
        for (w, h) in [(0.0, 100.0), (100.0, -1.0), (f64::NAN, 100.0)] {
            let err = HorizontalChart::init(w, h).unwrap_err();
            assert!(matches!(err, Error::InvalidSize { .. }));
        }
    }

    #[test]
    fn render_builds_layers_in_order() {
        let chart = rendered(100);
        let scene = chart.scene();
        let layers = scene.children(scene.root());
        assert_eq!(layers.len(), 3);
        assert_eq!(scene.get(layers[0]).and_then(|n| n.label()), Some("scroll-area"));
        assert_eq!(scene.get(layers[1]).and_then(|n| n.label()), Some("header"));
        assert_eq!(scene.get(layers[2]).and_then(|n| n.label()), Some("tooltip"));
    }

    #[test]
    fn rerender_replaces_scene() {
        let mut chart = rendered(100);
        let nodes = chart.scene().node_count();
        chart.render().unwrap();
        assert_eq!(chart.scene().node_count(), nodes);
        assert_eq!(chart.render_count(), 2);
    }

    #[test]
    fn uninstall_clears_scene_keeps_options() {
        let mut chart = rendered(10);
        chart.uninstall();
        assert!(!chart.is_rendered());
        assert_eq!(chart.scene().node_count(), 1);
        assert_eq!(chart.options().data.len(), 10);
        assert_eq!(
            chart.handle_pointer(&PointerEvent::wheel(10.0, 100.0, 50.0)),
            PointerResult::Ignored
        );
    }

    #[test]
    fn ready_callback_runs_after_each_render() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut chart = HorizontalChart::init(700.0, 560.0).unwrap();
        chart.on_render_ready(move |chart| {
            assert!(chart.is_rendered());
            seen.set(seen.get() + 1);
        });
        chart.render().unwrap();
        chart.refresh_data(records(5)).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn render_error_leaves_chart_uninstalled() {
        let mut chart = rendered(10);
        let err = chart
            .refresh(ChartOptionsPatch::new().row_height(0.0))
            .unwrap_err();
        assert!(matches!(err, Error::Window(_)));
        assert!(!chart.is_rendered());

        let err = chart
            .refresh(ChartOptionsPatch::new().row_height(60.0).header_height(560.0))
            .unwrap_err();
        assert!(matches!(err, Error::Scroll(_)));
    }

    #[test]
    fn name_hover_shows_full_name() {
        let mut chart = HorizontalChart::init(700.0, 560.0).unwrap();
        chart.set_simple_options(
            ChartOptionsPatch::new().data(vec![RowRecord::new("a very long store name", 1.0, 1.0)]),
        );
        chart.render().unwrap();

        // Name text of row 0: x starts at 24 + badge + gap, baseline at
        // header + 0.4 * 60.
        let event = PointerEvent::moved(60.0, 40.0 + 20.0);
        assert_eq!(chart.handle_pointer(&event), PointerResult::TooltipShown);
        let tooltip = chart.tooltip().unwrap();
        assert_eq!(
            tooltip.payload().map(|p| p.content.as_str()),
            Some("a very long store name")
        );

        let away = PointerEvent::moved(650.0, 500.0);
        assert_eq!(chart.handle_pointer(&away), PointerResult::TooltipHidden);
        assert!(!chart.tooltip().unwrap().is_visible());
    }

    #[test]
    fn short_names_have_no_tooltip() {
        let mut chart = rendered(1);
        let event = PointerEvent::moved(60.0, 60.0);
        assert_eq!(chart.handle_pointer(&event), PointerResult::Ignored);
        assert!(!chart.tooltip().unwrap().is_visible());
    }

    #[test]
    fn wheel_routes_to_controller() {
        let mut chart = rendered(100);
        let result = chart.handle_pointer(&PointerEvent::wheel(100.0, 100.0, 600.0));
        assert_eq!(result, PointerResult::Scrolled);
        let controller = chart.controller().unwrap();
        assert_eq!(controller.scroll_y(), 600.0);
        assert_eq!(controller.list().visible_range(), 10..23);
    }

    #[test]
    fn svg_contains_header_labels() {
        let chart = rendered(3);
        let svg = chart.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("名称"));
        assert!(svg.contains("row 0"));
    }
}
