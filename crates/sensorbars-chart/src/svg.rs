//! SVG document writer.
//!
//! Serializes a [`Scene`] into a standalone `<svg>` document, one element
//! per primitive. Coordinates are written at 2-decimal precision.

use crate::primitive::{FontWeight, Primitive, Scene, TextAnchor, TextBaseline};
use std::fmt::Write;

/// Write the scene as a standalone SVG document.
pub fn write_svg(scene: &Scene) -> String {
    let mut out = String::with_capacity(scene.primitives.len() * 96 + 128);
    write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.0} {:.0}" width="100%" height="100%">"#,
        scene.width, scene.height
    )
    .unwrap();

    for primitive in &scene.primitives {
        out.push('\n');
        match primitive {
            Primitive::Line(l) => {
                write!(
                    out,
                    r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}""#,
                    l.x1, l.y1, l.x2, l.y2, l.stroke, l.stroke_width
                )
                .unwrap();
                if let Some(dash) = &l.dash {
                    write!(out, r#" stroke-dasharray="{dash}""#).unwrap();
                }
                out.push_str(" />");
            }
            Primitive::Rect(r) => {
                write!(
                    out,
                    r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" />"#,
                    r.x, r.y, r.width, r.height, r.fill
                )
                .unwrap();
            }
            Primitive::Text(t) => {
                write!(
                    out,
                    r#"  <text x="{:.2}" y="{:.2}" font-size="{}" fill="{}""#,
                    t.x, t.y, t.font_size, t.fill
                )
                .unwrap();
                match t.anchor {
                    TextAnchor::Start => {}
                    TextAnchor::Middle => out.push_str(r#" text-anchor="middle""#),
                    TextAnchor::End => out.push_str(r#" text-anchor="end""#),
                }
                if t.baseline == TextBaseline::Middle {
                    out.push_str(r#" dominant-baseline="middle""#);
                }
                if t.weight == FontWeight::Bold {
                    out.push_str(r#" font-weight="bold""#);
                }
                if let Some(degrees) = t.rotate {
                    write!(
                        out,
                        r#" transform="rotate({degrees}, {:.2}, {:.2})""#,
                        t.x, t.y
                    )
                    .unwrap();
                }
                write!(out, ">{}</text>", escape(&t.content)).unwrap();
            }
        }
    }

    out.push_str("\n</svg>\n");
    out
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{LineShape, RectShape, TextShape};

    fn scene(primitives: Vec<Primitive>) -> Scene {
        Scene {
            width: 300.0,
            height: 200.0,
            primitives,
            hit_regions: Vec::new(),
        }
    }

    #[test]
    fn test_document_frame() {
        let svg = write_svg(&scene(Vec::new()));
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 300 200""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_line_element() {
        let svg = write_svg(&scene(vec![Primitive::Line(
            LineShape::new(0.0, 10.0, 100.0, 10.0, "#999")
                .stroke_width(1.0)
                .dash("3,2"),
        )]));
        assert!(svg.contains(r#"<line x1="0.00" y1="10.00" x2="100.00" y2="10.00""#));
        assert!(svg.contains(r#"stroke-dasharray="3,2""#));
    }

    #[test]
    fn test_rect_element() {
        let svg = write_svg(&scene(vec![Primitive::Rect(RectShape::new(
            10.0, 20.0, 30.0, 40.0, "#4a6",
        ))]));
        assert!(svg.contains(
            r##"<rect x="10.00" y="20.00" width="30.00" height="40.00" fill="#4a6" />"##
        ));
    }

    #[test]
    fn test_text_attributes() {
        let svg = write_svg(&scene(vec![Primitive::Text(
            TextShape::new(150.0, 20.0, "Power", 18.0, "#000")
                .anchor(crate::TextAnchor::Middle)
                .bold(),
        )]));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains(">Power</text>"));
    }

    #[test]
    fn test_text_rotation() {
        let svg = write_svg(&scene(vec![Primitive::Text(
            TextShape::new(10.0, 100.0, "W", 20.0, "#666").rotate(-90.0),
        )]));
        assert!(svg.contains(r#"transform="rotate(-90, 10.00, 100.00)""#));
    }

    #[test]
    fn test_text_escaping() {
        let svg = write_svg(&scene(vec![Primitive::Text(TextShape::new(
            0.0,
            0.0,
            "a < b & c",
            10.0,
            "#000",
        ))]));
        assert!(svg.contains(">a &lt; b &amp; c</text>"));
    }
}
