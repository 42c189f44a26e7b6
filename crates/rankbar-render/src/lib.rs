#![forbid(unsafe_code)]

//! Render kernel: colors, the retained scene graph, hit testing, and SVG
//! export.
//!
//! The scene is the drawing surface every rankbar widget writes into. It
//! mirrors a small subset of SVG: groups with a translation, an optional clip
//! rectangle and a visibility flag, plus rectangle and text leaves.
//!
//! ```
//! use rankbar_core::geometry::Rect;
//! use rankbar_render::color::Rgba;
//! use rankbar_render::scene::{RectShape, Scene};
//! use rankbar_render::svg::SvgExporter;
//!
//! let mut scene = Scene::new(200.0, 100.0);
//! let root = scene.root();
//! let group = scene.add_group(root);
//! scene.set_translate(group, 0.0, 40.0);
//! scene.add_rect(group, RectShape::new(Rect::new(0.0, 0.0, 50.0, 10.0), Rgba::rgb(255, 0, 0)));
//!
//! let svg = SvgExporter::default().export(&scene);
//! assert!(svg.contains("translate(0,40)"));
//! ```

pub mod color;
pub mod scene;
pub mod svg;

pub use color::{ColorParseError, Rgba};
pub use scene::{HitData, HitId, HitRegion, NodeId, Scene};
