#![forbid(unsafe_code)]

//! Retained scene graph.
//!
//! A [`Scene`] is a tree of nodes stored in a generational arena. Each node
//! carries a translation, an optional clip rectangle (in the node's own
//! coordinate space, after its translation), a visibility flag and an
//! optional hit tag. Leaves are rectangles or text runs; everything else is
//! a group.
//!
//! Node handles are [`NodeId`] values. Removing a node bumps the slot's
//! generation, so stale handles are rejected instead of aliasing a newer
//! node that reused the slot.
//!
//! # Hit testing
//!
//! [`Scene::hit_test`] walks the tree topmost-first (reverse child order).
//! The first visible shape under the pointer absorbs the hit. If that shape
//! carries no hit tag, the tag of its nearest tagged ancestor is reported,
//! which lets a row group tag all of its children at once.

use rankbar_core::geometry::{Point, Rect};
use smallvec::SmallVec;

use crate::color::Rgba;

/// Identifier for an interactive node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data attached to a hit tag (row index, scrollbar part, ...).
pub type HitData = u64;

/// Regions within a widget for pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Main content area (list rows).
    Content,
    /// Scrollbar track or thumb.
    Scrollbar,
    /// Drag target.
    Handle,
    /// Column header.
    Header,
    /// Element that shows a tooltip on hover.
    Tooltip,
    /// Custom region tag.
    Custom(u8),
}

/// Handle to a node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Arena slot index. Only meaningful together with the generation.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }
}

/// Horizontal alignment of a text run relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// SVG `text-anchor` keyword.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    /// CSS weight 500.
    Medium,
    Bold,
}

impl FontWeight {
    /// SVG `font-weight` value, or `None` for the default weight.
    pub const fn as_svg(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Medium => Some("500"),
            Self::Bold => Some("bold"),
        }
    }
}

/// A filled, optionally rounded rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub bounds: Rect,
    /// Corner radius (SVG `rx`).
    pub radius: f64,
    pub fill: Rgba,
    pub stroke: Option<Rgba>,
}

impl RectShape {
    /// A square-cornered rectangle without stroke.
    pub const fn new(bounds: Rect, fill: Rgba) -> Self {
        Self {
            bounds,
            radius: 0.0,
            fill,
            stroke: None,
        }
    }

    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke: Rgba) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// A single line of text positioned at its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    /// Anchor point: `x` per [`TextAnchor`], `y` is the baseline.
    pub origin: Point,
    pub content: String,
    pub font_size: f64,
    pub weight: FontWeight,
    pub fill: Rgba,
    pub anchor: TextAnchor,
}

impl TextShape {
    /// Average advance of one character relative to the font size.
    pub const AVERAGE_ADVANCE: f64 = 0.6;

    pub fn new(x: f64, y: f64, content: impl Into<String>, font_size: f64, fill: Rgba) -> Self {
        Self {
            origin: Point::new(x, y),
            content: content.into(),
            font_size,
            weight: FontWeight::Normal,
            fill,
            anchor: TextAnchor::Start,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Approximate extent of the run, without font metrics.
    pub fn approx_bounds(&self) -> Rect {
        let width = self.content.chars().count() as f64 * self.font_size * Self::AVERAGE_ADVANCE;
        let left = match self.anchor {
            TextAnchor::Start => self.origin.x,
            TextAnchor::Middle => self.origin.x - width / 2.0,
            TextAnchor::End => self.origin.x - width,
        };
        Rect::new(
            left,
            self.origin.y - self.font_size * 0.8,
            width,
            self.font_size,
        )
    }
}

/// An external image reference drawn into `bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageShape {
    pub bounds: Rect,
    pub href: String,
}

impl ImageShape {
    pub fn new(bounds: Rect, href: impl Into<String>) -> Self {
        Self {
            bounds,
            href: href.into(),
        }
    }
}

/// What a node draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Group,
    Rect(RectShape),
    Text(TextShape),
    Image(ImageShape),
}

impl Shape {
    /// Local bounds of a leaf shape. Groups have none of their own.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Group => None,
            Self::Rect(rect) => Some(rect.bounds),
            Self::Text(text) => Some(text.approx_bounds()),
            Self::Image(image) => Some(image.bounds),
        }
    }
}

/// A scene node.
#[derive(Debug, Clone)]
pub struct Node {
    shape: Shape,
    translate: Point,
    clip: Option<Rect>,
    visible: bool,
    hit: Option<(HitId, HitRegion, HitData)>,
    label: Option<String>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    fn new(shape: Shape) -> Self {
        Self {
            shape,
            translate: Point::default(),
            clip: None,
            visible: true,
            hit: None,
            label: None,
            parent: None,
            children: SmallVec::new(),
        }
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn translate(&self) -> Point {
        self.translate
    }

    #[inline]
    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn hit(&self) -> Option<(HitId, HitRegion, HitData)> {
        self.hit
    }

    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

enum Probe {
    Miss,
    Covered,
    Hit((HitId, HitRegion, HitData)),
}

/// The retained drawing surface.
#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    height: f64,
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    root: NodeId,
}

impl Scene {
    /// Create a scene with an empty root group.
    pub fn new(width: f64, height: f64) -> Self {
        let mut scene = Self {
            width,
            height,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            root: NodeId {
                index: 0,
                generation: 0,
            },
        };
        scene.root = scene.create(Shape::Group);
        scene
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the root and detached nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.live
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Create a detached node.
    pub fn create(&mut self, shape: Shape) -> NodeId {
        self.live += 1;
        let node = Node::new(shape);
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    pub fn create_group(&mut self) -> NodeId {
        self.create(Shape::Group)
    }

    pub fn create_rect(&mut self, rect: RectShape) -> NodeId {
        self.create(Shape::Rect(rect))
    }

    pub fn create_text(&mut self, text: TextShape) -> NodeId {
        self.create(Shape::Text(text))
    }

    pub fn create_image(&mut self, image: ImageShape) -> NodeId {
        self.create(Shape::Image(image))
    }

    /// Append `child` as the last (topmost) child of `parent`.
    ///
    /// The child is first detached from its current parent. Returns `false`
    /// without changing anything if either handle is stale, if `child` is the
    /// root, or if the move would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if child == self.root || !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Create a group under `parent`.
    ///
    /// If `parent` is stale the group stays detached.
    pub fn add_group(&mut self, parent: NodeId) -> NodeId {
        let id = self.create_group();
        self.append_child(parent, id);
        id
    }

    /// Create a rectangle under `parent`.
    pub fn add_rect(&mut self, parent: NodeId, rect: RectShape) -> NodeId {
        let id = self.create_rect(rect);
        self.append_child(parent, id);
        id
    }

    /// Create a text run under `parent`.
    pub fn add_text(&mut self, parent: NodeId, text: TextShape) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    /// Create an image under `parent`.
    pub fn add_image(&mut self, parent: NodeId, image: ImageShape) -> NodeId {
        let id = self.create_image(image);
        self.append_child(parent, id);
        id
    }

    /// Unlink `id` from its parent. The subtree stays alive.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get(id).and_then(Node::parent) else {
            return;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Remove `id` and its whole subtree. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }
        self.detach(id);
        self.free_subtree(id);
        true
    }

    /// Remove every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        for child in children {
            self.free_subtree(child);
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index as usize)
                .filter(|slot| slot.generation == current.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                self.live -= 1;
            }
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.get(id).and_then(Node::parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Whether `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(id) && self.is_ancestor_or_self(self.root, id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    pub fn set_translate(&mut self, id: NodeId, x: f64, y: f64) {
        if let Some(node) = self.get_mut(id) {
            node.translate = Point::new(x, y);
        }
    }

    pub fn translate_of(&self, id: NodeId) -> Option<Point> {
        self.get(id).map(Node::translate)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.get_mut(id) {
            node.visible = visible;
        }
    }

    /// Whether the node's own visibility flag is set.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_visible)
    }

    /// Set the clip rectangle, expressed in the node's translated space.
    pub fn set_clip(&mut self, id: NodeId, clip: Option<Rect>) {
        if let Some(node) = self.get_mut(id) {
            node.clip = clip;
        }
    }

    pub fn set_hit(&mut self, id: NodeId, hit_id: HitId, region: HitRegion, data: HitData) {
        if let Some(node) = self.get_mut(id) {
            node.hit = Some((hit_id, region, data));
        }
    }

    pub fn clear_hit(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.hit = None;
        }
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        if let Some(node) = self.get_mut(id) {
            node.label = Some(label.into());
        }
    }

    pub fn rect_mut(&mut self, id: NodeId) -> Option<&mut RectShape> {
        match &mut self.get_mut(id)?.shape {
            Shape::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut TextShape> {
        match &mut self.get_mut(id)?.shape {
            Shape::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn image_mut(&mut self, id: NodeId) -> Option<&mut ImageShape> {
        match &mut self.get_mut(id)?.shape {
            Shape::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Sum of the translations of `id` and all its ancestors.
    pub fn world_origin(&self, id: NodeId) -> Option<Point> {
        let mut node = self.get(id)?;
        let mut origin = node.translate;
        while let Some(parent) = node.parent {
            node = self.get(parent)?;
            origin = origin.offset(node.translate.x, node.translate.y);
        }
        Some(origin)
    }

    /// Bounds of `id` in scene coordinates, ignoring clips.
    ///
    /// Groups report the union of their visible descendants.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.get(id)?;
        let origin = self.world_origin(id)?;
        let local = self.local_bounds(node)?;
        Some(local.translate(origin.x - node.translate.x, origin.y - node.translate.y))
    }

    /// Bounds in the parent's coordinate space.
    fn local_bounds(&self, node: &Node) -> Option<Rect> {
        let own = match &node.shape {
            Shape::Group => node
                .children
                .iter()
                .filter_map(|c| self.get(*c))
                .filter(|c| c.visible)
                .filter_map(|c| self.local_bounds(c))
                .reduce(union),
            leaf => leaf.bounds(),
        }?;
        Some(own.translate(node.translate.x, node.translate.y))
    }

    /// Find the topmost hit tag under `point` (scene coordinates).
    pub fn hit_test(&self, point: Point) -> Option<(HitId, HitRegion, HitData)> {
        match self.probe(self.root, point) {
            Probe::Hit(hit) => Some(hit),
            Probe::Miss | Probe::Covered => None,
        }
    }

    fn probe(&self, id: NodeId, point: Point) -> Probe {
        let Some(node) = self.get(id) else {
            return Probe::Miss;
        };
        if !node.visible {
            return Probe::Miss;
        }
        let local = point.offset(-node.translate.x, -node.translate.y);
        if node.clip.is_some_and(|clip| !clip.contains(local)) {
            return Probe::Miss;
        }

        let inner = match node.shape.bounds() {
            Some(bounds) if bounds.contains(local) => Probe::Covered,
            Some(_) => Probe::Miss,
            None => node
                .children
                .iter()
                .rev()
                .map(|child| self.probe(*child, local))
                .find(|probe| !matches!(probe, Probe::Miss))
                .unwrap_or(Probe::Miss),
        };

        match (inner, node.hit) {
            (Probe::Covered, Some(hit)) => Probe::Hit(hit),
            (probe, _) => probe,
        }
    }
}

fn union(a: Rect, b: Rect) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    Rect::new(x, y, a.right().max(b.right()) - x, a.bottom().max(b.bottom()) - y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red(bounds: Rect) -> RectShape {
        RectShape::new(bounds, Rgba::rgb(255, 0, 0))
    }

    #[test]
    fn new_scene_has_root_only() {
        let scene = Scene::new(100.0, 50.0);
        assert_eq!(scene.node_count(), 1);
        assert!(scene.is_attached(scene.root()));
        assert_eq!(scene.width(), 100.0);
        assert_eq!(scene.height(), 50.0);
    }

    #[test]
    fn add_and_remove_subtree() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let group = scene.add_group(root);
        scene.add_rect(group, red(Rect::new(0.0, 0.0, 10.0, 10.0)));
        scene.add_text(group, TextShape::new(0.0, 10.0, "hi", 12.0, Rgba::BLACK));
        assert_eq!(scene.node_count(), 4);
        assert_eq!(scene.children(root), &[group]);

        assert!(scene.remove(group));
        assert_eq!(scene.node_count(), 1);
        assert!(scene.children(root).is_empty());
        assert!(!scene.contains(group));
    }

    #[test]
    fn stale_handles_are_rejected_after_slot_reuse() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let old = scene.add_group(root);
        scene.remove(old);
        let new = scene.add_group(root);
        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(scene.get(old).is_none());
        scene.set_translate(old, 5.0, 5.0);
        assert_eq!(scene.translate_of(new), Some(Point::default()));
    }

    #[test]
    fn root_cannot_be_removed_or_reparented() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let group = scene.add_group(root);
        assert!(!scene.remove(root));
        assert!(!scene.append_child(group, root));
    }

    #[test]
    fn append_rejects_cycles() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let a = scene.add_group(root);
        let b = scene.add_group(a);
        assert!(!scene.append_child(b, a));
        assert!(!scene.append_child(a, a));
        assert_eq!(scene.get(a).and_then(Node::parent), Some(root));
    }

    #[test]
    fn append_moves_between_parents() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let a = scene.add_group(root);
        let b = scene.add_group(root);
        let leaf = scene.add_rect(a, red(Rect::from_size(1.0, 1.0)));
        assert!(scene.append_child(b, leaf));
        assert!(scene.children(a).is_empty());
        assert_eq!(scene.children(b), &[leaf]);
    }

    #[test]
    fn detached_nodes_are_not_attached() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let group = scene.create_group();
        assert!(scene.contains(group));
        assert!(!scene.is_attached(group));
        scene.append_child(root, group);
        assert!(scene.is_attached(group));
        scene.detach(group);
        assert!(!scene.is_attached(group));
    }

    #[test]
    fn clear_children_frees_descendants() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let list = scene.add_group(root);
        for i in 0..5 {
            let row = scene.add_group(list);
            scene.add_rect(row, red(Rect::new(0.0, f64::from(i), 1.0, 1.0)));
        }
        assert_eq!(scene.node_count(), 12);
        scene.clear_children(list);
        assert_eq!(scene.node_count(), 2);
        assert!(scene.children(list).is_empty());
    }

    #[test]
    fn world_origin_accumulates_translations() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let outer = scene.add_group(root);
        scene.set_translate(outer, 0.0, 40.0);
        let inner = scene.add_group(outer);
        scene.set_translate(inner, 5.0, 60.0);
        assert_eq!(scene.world_origin(inner), Some(Point::new(5.0, 100.0)));
    }

    #[test]
    fn world_bounds_of_group_unions_children() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let group = scene.add_group(root);
        scene.set_translate(group, 10.0, 10.0);
        scene.add_rect(group, red(Rect::new(0.0, 0.0, 5.0, 5.0)));
        scene.add_rect(group, red(Rect::new(20.0, 10.0, 5.0, 5.0)));
        assert_eq!(
            scene.world_bounds(group),
            Some(Rect::new(10.0, 10.0, 25.0, 15.0))
        );
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let below = scene.add_rect(root, red(Rect::new(0.0, 0.0, 50.0, 50.0)));
        scene.set_hit(below, HitId::new(1), HitRegion::Content, 1);
        let above = scene.add_rect(root, red(Rect::new(25.0, 25.0, 50.0, 50.0)));
        scene.set_hit(above, HitId::new(2), HitRegion::Scrollbar, 2);

        assert_eq!(
            scene.hit_test(Point::new(10.0, 10.0)),
            Some((HitId::new(1), HitRegion::Content, 1))
        );
        assert_eq!(
            scene.hit_test(Point::new(30.0, 30.0)),
            Some((HitId::new(2), HitRegion::Scrollbar, 2))
        );
        assert_eq!(scene.hit_test(Point::new(90.0, 10.0)), None);
    }

    #[test]
    fn untagged_shape_blocks_lower_siblings() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let below = scene.add_rect(root, red(Rect::from_size(50.0, 50.0)));
        scene.set_hit(below, HitId::new(1), HitRegion::Content, 0);
        scene.add_rect(root, red(Rect::from_size(10.0, 10.0)));
        assert_eq!(scene.hit_test(Point::new(5.0, 5.0)), None);
        assert!(scene.hit_test(Point::new(20.0, 20.0)).is_some());
    }

    #[test]
    fn group_tag_bubbles_from_children() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let row = scene.add_group(root);
        scene.set_translate(row, 0.0, 60.0);
        scene.set_hit(row, HitId::new(7), HitRegion::Content, 3);
        scene.add_rect(row, red(Rect::from_size(100.0, 60.0)));
        assert_eq!(
            scene.hit_test(Point::new(50.0, 70.0)),
            Some((HitId::new(7), HitRegion::Content, 3))
        );
        assert_eq!(scene.hit_test(Point::new(50.0, 30.0)), None);
    }

    #[test]
    fn hidden_and_clipped_nodes_do_not_hit() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let area = scene.add_group(root);
        scene.set_clip(area, Some(Rect::new(0.0, 40.0, 100.0, 60.0)));
        let rect = scene.add_rect(area, red(Rect::from_size(100.0, 100.0)));
        scene.set_hit(rect, HitId::new(1), HitRegion::Content, 0);

        assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), None);
        assert!(scene.hit_test(Point::new(10.0, 50.0)).is_some());

        scene.set_visible(rect, false);
        assert!(!scene.is_visible(rect));
        assert_eq!(scene.hit_test(Point::new(10.0, 50.0)), None);
    }

    #[test]
    fn text_bounds_follow_anchor() {
        let text = TextShape::new(100.0, 20.0, "abcd", 10.0, Rgba::BLACK);
        assert_eq!(text.approx_bounds().x, 100.0);
        let middle = text.clone().with_anchor(TextAnchor::Middle);
        assert!((middle.approx_bounds().x - 88.0).abs() < 1e-9);
        let end = text.with_anchor(TextAnchor::End);
        assert!((end.approx_bounds().right() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn shape_mutators_check_kind() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let rect = scene.add_rect(root, red(Rect::from_size(1.0, 1.0)));
        assert!(scene.text_mut(rect).is_none());
        if let Some(shape) = scene.rect_mut(rect) {
            shape.fill = Rgba::WHITE;
        }
        assert!(matches!(
            scene.get(rect).map(Node::shape),
            Some(Shape::Rect(RectShape { fill: Rgba::WHITE, .. }))
        ));
    }
}
