#![forbid(unsafe_code)]

//! Floating tooltip that follows the pointer.
//!
//! One [`TooltipService`] belongs to one chart. It owns a hidden group in
//! the scene and repositions it on every pointer move while shown. The box
//! sits 10 units right of and below the pointer, and flips to the other side
//! on each axis where it would cross the surface edge.

use rankbar_core::geometry::{Point, Rect, Size};
use rankbar_render::scene::{ImageShape, RectShape, TextShape};
use rankbar_render::{NodeId, Scene};
use rankbar_style::Palette;
use tracing::trace;

use crate::row::TooltipPayload;
use crate::text::text_width;

/// Tooltip box styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipStyle {
    pub padding_x: f64,
    pub padding_y: f64,
    pub font_size: f64,
    pub line_height: f64,
    pub radius: f64,
    pub icon_size: f64,
    pub icon_gap: f64,
    /// Distance between the pointer and the nearest box corner.
    pub offset: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            padding_x: 12.0,
            padding_y: 8.0,
            font_size: 15.0,
            line_height: 1.6,
            radius: 6.0,
            icon_size: 16.0,
            icon_gap: 6.0,
            offset: 10.0,
        }
    }
}

impl TooltipStyle {
    /// Box size needed for `payload`.
    pub fn measure(&self, payload: &TooltipPayload) -> Size {
        let icon = if payload.icon.is_some() {
            self.icon_size + self.icon_gap
        } else {
            0.0
        };
        let text = text_width(&payload.label(), self.font_size);
        Size::new(
            2.0 * self.padding_x + icon + text,
            2.0 * self.padding_y + self.font_size * self.line_height,
        )
    }
}

/// Place a box of `size` near `pointer`, flipping away from the far edges
/// of `surface`.
pub fn place(pointer: Point, size: Size, surface: Size, offset: f64) -> Point {
    let mut left = pointer.x + offset;
    let mut top = pointer.y + offset;
    if left + size.width >= surface.width {
        left = pointer.x - size.width - offset;
    }
    if top + size.height >= surface.height {
        top = pointer.y - size.height - offset;
    }
    Point::new(left.max(0.0), top.max(0.0))
}

#[derive(Debug, Clone, Copy)]
struct TooltipNodes {
    group: NodeId,
    background: NodeId,
    icon: NodeId,
    text: NodeId,
}

/// Per-chart tooltip.
#[derive(Debug)]
pub struct TooltipService {
    nodes: TooltipNodes,
    style: TooltipStyle,
    surface: Size,
    size: Size,
    position: Point,
    payload: Option<TooltipPayload>,
}

impl TooltipService {
    /// Create the hidden tooltip group under `parent`. Add it last so it
    /// draws above the rest of the chart.
    pub fn new(scene: &mut Scene, parent: NodeId, surface: Size, palette: &Palette) -> Self {
        Self::with_style(scene, parent, surface, palette, TooltipStyle::default())
    }

    pub fn with_style(
        scene: &mut Scene,
        parent: NodeId,
        surface: Size,
        palette: &Palette,
        style: TooltipStyle,
    ) -> Self {
        let group = scene.add_group(parent);
        scene.set_label(group, "tooltip");
        scene.set_visible(group, false);

        let background = scene.add_rect(
            group,
            RectShape::new(Rect::default(), palette.tooltip_background)
                .with_radius(style.radius)
                .with_stroke(palette.tooltip_border),
        );
        let icon = scene.add_image(
            group,
            ImageShape::new(
                Rect::new(
                    style.padding_x,
                    (2.0 * style.padding_y + style.font_size * style.line_height
                        - style.icon_size)
                        / 2.0,
                    style.icon_size,
                    style.icon_size,
                ),
                String::new(),
            ),
        );
        scene.set_visible(icon, false);
        let baseline = style.padding_y + style.font_size * style.line_height * 0.75;
        let text = scene.add_text(
            group,
            TextShape::new(
                style.padding_x,
                baseline,
                String::new(),
                style.font_size,
                palette.tooltip_text,
            )
            .bold(),
        );

        Self {
            nodes: TooltipNodes {
                group,
                background,
                icon,
                text,
            },
            style,
            surface,
            size: Size::default(),
            position: Point::default(),
            payload: None,
        }
    }

    /// Fill the box with `payload` and show it next to `pointer`.
    pub fn show(&mut self, scene: &mut Scene, payload: &TooltipPayload, pointer: Point) {
        if self.payload.as_ref() != Some(payload) {
            self.size = self.style.measure(payload);
            let has_icon = payload.icon.is_some();
            if let Some(bg) = scene.rect_mut(self.nodes.background) {
                bg.bounds = Rect::new(0.0, 0.0, self.size.width, self.size.height);
            }
            if let Some(image) = scene.image_mut(self.nodes.icon) {
                image.href = payload.icon.clone().unwrap_or_default();
            }
            scene.set_visible(self.nodes.icon, has_icon);
            let text_x = if has_icon {
                self.style.padding_x + self.style.icon_size + self.style.icon_gap
            } else {
                self.style.padding_x
            };
            if let Some(text) = scene.text_mut(self.nodes.text) {
                text.origin.x = text_x;
                text.content = payload.label().into_owned();
            }
            self.payload = Some(payload.clone());
            trace!(content = %payload.content, "tooltip content set");
        }
        scene.set_visible(self.nodes.group, true);
        self.follow(scene, pointer);
    }

    /// Move a visible tooltip to track `pointer`.
    pub fn follow(&mut self, scene: &mut Scene, pointer: Point) {
        if !self.is_visible() {
            return;
        }
        self.position = place(pointer, self.size, self.surface, self.style.offset);
        scene.set_translate(self.nodes.group, self.position.x, self.position.y);
    }

    /// Hide the tooltip. Returns `false` if it was already hidden.
    pub fn hide(&mut self, scene: &mut Scene) -> bool {
        if self.payload.take().is_none() {
            return false;
        }
        scene.set_visible(self.nodes.group, false);
        true
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.payload.is_some()
    }

    /// Top-left corner of the box in scene coordinates.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn payload(&self) -> Option<&TooltipPayload> {
        self.payload.as_ref()
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.nodes.group
    }

    #[inline]
    pub fn style(&self) -> &TooltipStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankbar_render::scene::Shape;

    const SURFACE: Size = Size::new(700.0, 400.0);

    fn service() -> (Scene, TooltipService) {
        let mut scene = Scene::new(SURFACE.width, SURFACE.height);
        let root = scene.root();
        let tip = TooltipService::new(&mut scene, root, SURFACE, &Palette::default());
        (scene, tip)
    }

    #[test]
    fn starts_hidden() {
        let (scene, tip) = service();
        assert!(!tip.is_visible());
        assert!(!scene.is_visible(tip.node()));
        assert_eq!(tip.payload(), None);
    }

    #[test]
    fn measure_with_and_without_icon() {
        let style = TooltipStyle::default();
        let plain = style.measure(&TooltipPayload::new("ab"));
        assert_eq!(plain.height, 16.0 + 24.0);
        let expected = 24.0 + text_width("ab", 15.0);
        assert!((plain.width - expected).abs() < 1e-9);

        let iconic = style.measure(&TooltipPayload::new("ab").with_icon("i.png"));
        assert!((iconic.width - plain.width - 22.0).abs() < 1e-9);
    }

    #[test]
    fn placement_flips_near_edges() {
        let size = Size::new(100.0, 40.0);
        assert_eq!(place(Point::new(50.0, 50.0), size, SURFACE, 10.0), Point::new(60.0, 60.0));
        // Right edge: 650 + 10 + 100 >= 700.
        assert_eq!(
            place(Point::new(650.0, 50.0), size, SURFACE, 10.0),
            Point::new(540.0, 60.0)
        );
        // Bottom edge: 380 + 10 + 40 >= 400.
        assert_eq!(
            place(Point::new(50.0, 380.0), size, SURFACE, 10.0),
            Point::new(60.0, 330.0)
        );
        // Never pushed past the top-left corner.
        let huge = Size::new(1000.0, 1000.0);
        assert_eq!(place(Point::new(5.0, 5.0), huge, SURFACE, 10.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn show_follow_hide() {
        let (mut scene, mut tip) = service();
        let payload = TooltipPayload::new("12 stores").with_unit("pcs");
        tip.show(&mut scene, &payload, Point::new(100.0, 100.0));
        assert!(tip.is_visible());
        assert!(scene.is_visible(tip.node()));
        assert_eq!(tip.position(), Point::new(110.0, 110.0));
        assert_eq!(scene.translate_of(tip.node()), Some(Point::new(110.0, 110.0)));

        tip.follow(&mut scene, Point::new(200.0, 150.0));
        assert_eq!(tip.position(), Point::new(210.0, 160.0));

        let text = scene.children(tip.node())[2];
        match scene.get(text).map(|n| n.shape()) {
            Some(Shape::Text(t)) => assert_eq!(t.content, "12 stores pcs"),
            other => panic!("unexpected shape {other:?}"),
        }

        assert!(tip.hide(&mut scene));
        assert!(!scene.is_visible(tip.node()));
        assert!(!tip.hide(&mut scene));

        // Hidden tooltips ignore moves.
        tip.follow(&mut scene, Point::new(10.0, 10.0));
        assert_eq!(tip.position(), Point::new(210.0, 160.0));
    }

    #[test]
    fn icon_shown_only_with_payload_icon() {
        let (mut scene, mut tip) = service();
        let icon = scene.children(tip.node())[1];

        tip.show(
            &mut scene,
            &TooltipPayload::new("x").with_icon("logo.png"),
            Point::new(0.0, 0.0),
        );
        assert!(scene.is_visible(icon));
        match scene.get(icon).map(|n| n.shape()) {
            Some(Shape::Image(image)) => {
                assert_eq!(image.href, "logo.png");
                assert_eq!(image.bounds.width, 16.0);
            }
            other => panic!("unexpected shape {other:?}"),
        }

        tip.show(&mut scene, &TooltipPayload::new("y"), Point::new(0.0, 0.0));
        assert!(!scene.is_visible(icon));
    }
}
