//! Vector export.

use sketchpad_core::color::SerializableColor;
use sketchpad_core::document::SketchDocument;
use sketchpad_core::stroke::Stroke;
use sketchpad_core::tools::ToolKind;
use std::fmt::Write;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const MARKER_FILTER_ID: &str = "marker-blur";

/// Serialize a document as a standalone SVG image.
///
/// Dots become circles of radius `thickness / 2`; every other stroke becomes
/// its smoothed polyline, with the tool's opacity and dash pattern. Marker
/// strokes get a 1px gaussian blur.
pub fn export_svg(document: &SketchDocument) -> String {
    let (w, h) = (document.width, document.height);
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );

    if document.strokes.iter().any(|s| s.tool == ToolKind::Marker) {
        let _ = writeln!(
            out,
            r#"<defs><filter id="{MARKER_FILTER_ID}"><feGaussianBlur stdDeviation="1"/></filter></defs>"#
        );
    }

    let (background, background_opacity) = split_alpha(document.background_color, 1.0);
    let _ = writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{background}"{}/>"#,
        opacity_attr("fill-opacity", background_opacity)
    );

    for stroke in &document.strokes {
        write_stroke(&mut out, stroke);
    }

    out.push_str("</svg>\n");
    out
}

fn write_stroke(out: &mut String, stroke: &Stroke) {
    let [first, ..] = stroke.points.as_slice() else {
        return;
    };

    if stroke.is_dot() {
        let (fill, opacity) = split_alpha(stroke.color, 1.0);
        let _ = writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}"{}/>"#,
            first.x,
            first.y,
            stroke.thickness / 2.0,
            opacity_attr("fill-opacity", opacity)
        );
        return;
    }

    let style = stroke.tool.style();
    let smoothed = stroke.smoothed_points();
    let mut data = String::new();
    for (i, point) in smoothed.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            data.push(' ');
        }
        let _ = write!(data, "{command} {} {}", point.x, point.y);
    }

    let (color, opacity) = split_alpha(stroke.color, style.opacity);
    let mut attrs = format!(
        r#"d="{data}" stroke="{color}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" fill="none""#,
        stroke.thickness
    );
    attrs.push_str(&opacity_attr("opacity", opacity));
    if let Some([dash, gap]) = style.dash {
        let _ = write!(attrs, r#" stroke-dasharray="{dash} {gap}""#);
    }
    if stroke.tool == ToolKind::Marker {
        let _ = write!(attrs, r#" filter="url(#{MARKER_FILTER_ID})""#);
    }
    let _ = writeln!(out, "<path {attrs}/>");
}

/// Opaque hex color plus the combined opacity of the color alpha and `opacity`.
fn split_alpha(color: SerializableColor, opacity: f64) -> (String, f64) {
    let opaque = SerializableColor::rgb(color.r, color.g, color.b);
    (opaque.to_hex(), opacity * color.alpha())
}

fn opacity_attr(name: &str, opacity: f64) -> String {
    if opacity >= 1.0 {
        String::new()
    } else {
        format!(r#" {name}="{}""#, (opacity * 1000.0).round() / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn document(strokes: Vec<Stroke>) -> SketchDocument {
        SketchDocument::new(800.0, 600.0, SerializableColor::rgb(0xfc, 0xfc, 0xfa))
            .with_strokes(strokes)
    }

    fn line(tool: ToolKind) -> Stroke {
        Stroke::from_points(
            tool,
            SerializableColor::rgb(0xff, 0x3b, 0x30),
            4.0,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(20.0, 5.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_header_and_background() {
        let svg = export_svg(&document(vec![]));
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600" viewBox="0 0 800 600">"#
        ));
        assert!(svg.contains(r##"<rect width="100%" height="100%" fill="#fcfcfa"/>"##));
        assert!(!svg.contains("<defs>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_dot_becomes_circle() {
        let dot = Stroke::new(ToolKind::Pen, SerializableColor::black(), 6.0, Point::new(5.0, 7.0));
        let svg = export_svg(&document(vec![dot]));
        assert!(svg.contains(r##"<circle cx="5" cy="7" r="3" fill="#000000"/>"##));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_path_uses_smoothed_points() {
        let stroke = line(ToolKind::Pen);
        let svg = export_svg(&document(vec![stroke.clone()]));
        let segments = svg.matches(" L ").count();
        assert_eq!(segments, stroke.smoothed_points().len() - 1);
        assert!(svg.contains(r##"stroke="#ff3b30""##));
        assert!(svg.contains(r#"stroke-width="4""#));
        assert!(svg.contains(r#"opacity="0.7""#));
        assert!(svg.contains(r#"stroke-linecap="round""#));
    }

    #[test]
    fn test_tool_effects() {
        let svg = export_svg(&document(vec![line(ToolKind::Pencil)]));
        assert!(svg.contains(r#"stroke-dasharray="0.5 2""#));
        assert!(svg.contains(r#"opacity="0.6""#));

        let svg = export_svg(&document(vec![line(ToolKind::Marker)]));
        assert!(svg.contains(r#"<feGaussianBlur stdDeviation="1"/>"#));
        assert!(svg.contains(r#"filter="url(#marker-blur)""#));
        assert!(svg.contains(r#"opacity="0.3""#));

        let svg = export_svg(&document(vec![line(ToolKind::Eraser)]));
        assert!(!svg.contains("opacity="));
        assert!(!svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_export_is_deterministic() {
        let doc = document(vec![line(ToolKind::Pencil), line(ToolKind::Marker)]);
        assert_eq!(export_svg(&doc), export_svg(&doc));
    }
}
