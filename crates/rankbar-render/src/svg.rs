#![forbid(unsafe_code)]

//! SVG export for a [`Scene`].
//!
//! Groups become `<g>` elements with a `transform="translate(x,y)"`, clip
//! rectangles become inline `<clipPath>` definitions, and hidden nodes are
//! written with `display="none"` so the document mirrors the scene exactly.

use std::fmt::{self, Write};

use crate::color::Rgba;
use crate::scene::{NodeId, Scene, Shape};

/// Configuration for SVG export.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    /// Font family applied to the whole document.
    pub font_family: String,
    /// Optional background fill behind everything.
    pub background: Option<Rgba>,
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".into(),
            background: None,
        }
    }
}

impl SvgExporter {
    /// Export a scene to an SVG string.
    pub fn export(&self, scene: &Scene) -> String {
        let mut out = String::with_capacity(scene.node_count() * 96);
        // Writing into a String cannot fail.
        let _ = self.export_to(scene, &mut out);
        out
    }

    /// Export a scene into any [`fmt::Write`] sink.
    pub fn export_to<W: Write>(&self, scene: &Scene, out: &mut W) -> fmt::Result {
        let (w, h) = (Num(scene.width()), Num(scene.height()));
        write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\" font-family=\""
        )?;
        escape_into(out, &self.font_family)?;
        out.write_str("\">")?;

        if let Some(bg) = self.background {
            write!(out, "<rect width=\"{w}\" height=\"{h}\"")?;
            write_fill(out, bg)?;
            out.write_str("/>")?;
        }

        let mut clips = 0usize;
        write_node(scene, scene.root(), out, &mut clips)?;
        out.write_str("</svg>")
    }
}

fn write_node<W: Write>(scene: &Scene, id: NodeId, out: &mut W, clips: &mut usize) -> fmt::Result {
    let Some(node) = scene.get(id) else {
        return Ok(());
    };

    let clip_ref = match node.clip() {
        Some(clip) => {
            *clips += 1;
            write!(
                out,
                "<clipPath id=\"clip-{}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath>",
                clips,
                Num(clip.x),
                Num(clip.y),
                Num(clip.width),
                Num(clip.height)
            )?;
            Some(*clips)
        }
        None => None,
    };

    let tag = match node.shape() {
        Shape::Group => "g",
        Shape::Rect(_) => "rect",
        Shape::Text(_) => "text",
        Shape::Image(_) => "image",
    };
    write!(out, "<{tag}")?;
    if let Some(label) = node.label() {
        out.write_str(" class=\"")?;
        escape_into(out, label)?;
        out.write_char('"')?;
    }
    let t = node.translate();
    if t.x != 0.0 || t.y != 0.0 {
        write!(out, " transform=\"translate({},{})\"", Num(t.x), Num(t.y))?;
    }
    if let Some(n) = clip_ref {
        write!(out, " clip-path=\"url(#clip-{n})\"")?;
    }
    if !node.is_visible() {
        out.write_str(" display=\"none\"")?;
    }

    match node.shape() {
        Shape::Group => {
            out.write_char('>')?;
            for child in node.children() {
                write_node(scene, *child, out, clips)?;
            }
            out.write_str("</g>")
        }
        Shape::Rect(rect) => {
            let b = rect.bounds;
            write!(
                out,
                " x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                Num(b.x),
                Num(b.y),
                Num(b.width.max(0.0)),
                Num(b.height.max(0.0))
            )?;
            if rect.radius > 0.0 {
                write!(out, " rx=\"{}\"", Num(rect.radius))?;
            }
            write_fill(out, rect.fill)?;
            if let Some(stroke) = rect.stroke {
                write!(out, " stroke=\"{}\"", stroke.to_hex_rgb())?;
            }
            out.write_str("/>")
        }
        Shape::Image(image) => {
            let b = image.bounds;
            write!(
                out,
                " x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" href=\"",
                Num(b.x),
                Num(b.y),
                Num(b.width.max(0.0)),
                Num(b.height.max(0.0))
            )?;
            escape_into(out, &image.href)?;
            out.write_str("\"/>")
        }
        Shape::Text(text) => {
            write!(
                out,
                " x=\"{}\" y=\"{}\" font-size=\"{}\"",
                Num(text.origin.x),
                Num(text.origin.y),
                Num(text.font_size)
            )?;
            if let Some(weight) = text.weight.as_svg() {
                write!(out, " font-weight=\"{weight}\"")?;
            }
            if text.anchor != Default::default() {
                write!(out, " text-anchor=\"{}\"", text.anchor.as_str())?;
            }
            write_fill(out, text.fill)?;
            out.write_char('>')?;
            escape_into(out, &text.content)?;
            out.write_str("</text>")
        }
    }
}

fn write_fill<W: Write>(out: &mut W, color: Rgba) -> fmt::Result {
    write!(out, " fill=\"{}\"", color.to_hex_rgb())?;
    if !color.is_opaque() {
        write!(out, " fill-opacity=\"{}\"", Num(color.opacity()))?;
    }
    Ok(())
}

fn escape_into<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    for c in s.chars() {
        match c {
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '&' => out.write_str("&amp;")?,
            '"' => out.write_str("&quot;")?,
            _ => out.write_char(c)?,
        }
    }
    Ok(())
}

/// Coordinate formatter: three decimals at most, no `-0`.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = (self.0 * 1000.0).round() / 1000.0;
        if v == 0.0 || !v.is_finite() {
            f.write_str("0")
        } else {
            write!(f, "{v}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ImageShape, RectShape, TextAnchor, TextShape};
    use rankbar_core::geometry::Rect;

    #[test]
    fn empty_scene_has_svg_root() {
        let svg = SvgExporter::default().export(&Scene::new(300.0, 200.0));
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"300\" height=\"200\""));
        assert!(svg.contains("viewBox=\"0 0 300 200\""));
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn background_rect_written_first() {
        let exporter = SvgExporter {
            background: Some(Rgba::WHITE),
            ..SvgExporter::default()
        };
        let svg = exporter.export(&Scene::new(10.0, 10.0));
        assert!(svg.contains("<rect width=\"10\" height=\"10\" fill=\"#ffffff\"/>"));
    }

    #[test]
    fn rect_attributes() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        scene.add_rect(
            root,
            RectShape::new(Rect::new(1.5, 2.0, 12.0, 30.0), Rgba::rgb(0x99, 0x99, 0x99))
                .with_radius(4.0)
                .with_stroke(Rgba::rgb(0xe5, 0xe6, 0xeb)),
        );
        let svg = SvgExporter::default().export(&scene);
        assert!(svg.contains(
            "<rect x=\"1.5\" y=\"2\" width=\"12\" height=\"30\" rx=\"4\" fill=\"#999999\" stroke=\"#e5e6eb\"/>"
        ));
    }

    #[test]
    fn translucent_fill_gets_opacity() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        scene.add_rect(
            root,
            RectShape::new(Rect::from_size(1.0, 1.0), Rgba::rgba(0x19, 0x77, 0xfb, 0x80)),
        );
        let svg = SvgExporter::default().export(&scene);
        assert!(svg.contains("fill=\"#1977fb\" fill-opacity=\"0.502\""));
    }

    #[test]
    fn text_is_escaped_and_styled() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        scene.add_text(
            root,
            TextShape::new(50.0, 20.0, "a<b & \"c\"", 16.0, Rgba::BLACK)
                .bold()
                .with_anchor(TextAnchor::Middle),
        );
        let svg = SvgExporter::default().export(&scene);
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains(">a&lt;b &amp; &quot;c&quot;</text>"));
    }

    #[test]
    fn clip_and_hidden_groups() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let area = scene.add_group(root);
        scene.set_label(area, "scroll-area");
        scene.set_clip(area, Some(Rect::new(0.0, 40.0, 88.0, 60.0)));
        let bar = scene.add_group(root);
        scene.set_visible(bar, false);

        let svg = SvgExporter::default().export(&scene);
        assert!(svg.contains(
            "<clipPath id=\"clip-1\"><rect x=\"0\" y=\"40\" width=\"88\" height=\"60\"/></clipPath>"
        ));
        assert!(svg.contains("<g class=\"scroll-area\" clip-path=\"url(#clip-1)\">"));
        assert!(svg.contains("<g display=\"none\">"));
    }

    #[test]
    fn image_href_is_escaped() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        scene.add_image(
            root,
            ImageShape::new(Rect::from_size(16.0, 16.0), "icon.png?a=1&b=2"),
        );
        let svg = SvgExporter::default().export(&scene);
        assert!(svg.contains(
            "<image x=\"0\" y=\"0\" width=\"16\" height=\"16\" href=\"icon.png?a=1&amp;b=2\"/>"
        ));
    }

    #[test]
    fn negative_zero_is_normalized() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let g = scene.add_group(root);
        scene.set_translate(g, -0.0001, 12.0);
        let svg = SvgExporter::default().export(&scene);
        assert!(svg.contains("translate(0,12)"));
    }
}
