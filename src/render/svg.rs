use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use super::palette::{BOUNDARY_STROKE, MARKER_FILL, SECTION_STROKE, section_color};
use crate::capture::sort_around_centroid;
use crate::domain::{BoundaryPolygon, GeoPoint, SampledPoint, Section};
use crate::geometry::{CanvasProjection, NormalizedPoint};

/// Canvas limits for a rendered section map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub max_width: f64,
    pub max_height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            max_width: 360.0,
            max_height: 480.0,
        }
    }
}

const MARKER_RADIUS: f64 = 4.0;

/// Draw boundary, section wedges and sampled points as an SVG document
///
/// Everything shares the boundary's canvas projection. A boundary with fewer
/// than 3 finite readings renders as an empty zero-sized document.
pub fn render_section_map(
    boundary: &BoundaryPolygon,
    sections: &[Section],
    points: &[SampledPoint],
    canvas: CanvasSize,
) -> String {
    let Some(projection) =
        CanvasProjection::fit(&boundary.vertices, canvas.max_width, canvas.max_height)
    else {
        return empty_document();
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.1}" height="{h:.1}" viewBox="0 0 {w:.3} {h:.3}">"#,
        w = projection.width(),
        h = projection.height()
    );

    for section in sections {
        let corners: Vec<NormalizedPoint> =
            section.corners().iter().map(|p| projection.project(p)).collect();
        let _ = writeln!(
            svg,
            r#"  <polygon class="section" data-index="{}" points="{}" fill="{}" stroke="{}" stroke-width="1"/>"#,
            section.index,
            point_list(&corners),
            section_color(section.color_tag),
            SECTION_STROKE
        );
    }

    let readings: Vec<GeoPoint> = boundary
        .vertices
        .iter()
        .copied()
        .filter(GeoPoint::is_finite)
        .collect();
    let outline: Vec<NormalizedPoint> = sort_around_centroid(&readings)
        .iter()
        .map(|p| projection.project(p))
        .collect();
    let _ = writeln!(
        svg,
        r#"  <polygon class="boundary" points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        point_list(&outline),
        BOUNDARY_STROKE
    );

    for point in points {
        let at = projection.project(&point.position());
        let _ = writeln!(
            svg,
            r#"  <circle class="marker" cx="{:.3}" cy="{:.3}" r="{}" fill="{}"/>"#,
            at.x, at.y, MARKER_RADIUS, MARKER_FILL
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.3}" y="{:.3}" font-size="10">{}</text>"#,
            at.x + MARKER_RADIUS + 2.0,
            at.y - MARKER_RADIUS,
            escape(&point.label)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write a rendered map to disk
pub fn write_svg(path: &Path, svg: &str) -> Result<()> {
    std::fs::write(path, svg)
        .with_context(|| format!("Failed to write SVG file: {}", path.display()))
}

fn empty_document() -> String {
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="0" height="0"></svg>"#.to_string() + "\n"
}

fn point_list(points: &[NormalizedPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{:.3},{:.3}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::partition;

    fn paddock() -> BoundaryPolygon {
        BoundaryPolygon::new(vec![
            GeoPoint::new(-27.50, 153.00),
            GeoPoint::new(-27.50, 153.02),
            GeoPoint::new(-27.49, 153.02),
            GeoPoint::new(-27.49, 153.00),
        ])
    }

    #[test]
    fn test_render_counts_elements() {
        let boundary = paddock();
        let sections = partition(&boundary, 4).unwrap();
        let points: Vec<SampledPoint> = sections
            .iter()
            .map(|s| SampledPoint::new(s.centroid, s.index))
            .collect();

        let svg = render_section_map(&boundary, &sections, &points, CanvasSize::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches(r#"class="section""#).count(), 4);
        assert_eq!(svg.matches(r#"class="boundary""#).count(), 1);
        assert_eq!(svg.matches(r#"class="marker""#).count(), 4);
        assert!(svg.contains("Section 4 Point"));
        assert!(svg.contains(section_color(3)));
    }

    #[test]
    fn test_outline_follows_angular_order() {
        let south_west = GeoPoint::new(-27.50, 153.00);
        let south_east = GeoPoint::new(-27.50, 153.02);
        let north_east = GeoPoint::new(-27.49, 153.02);
        let north_west = GeoPoint::new(-27.49, 153.00);
        let crossed = BoundaryPolygon::new(vec![south_west, north_east, south_east, north_west]);

        let svg = render_section_map(&crossed, &[], &[], CanvasSize::default());

        let canvas = CanvasSize::default();
        let projection =
            CanvasProjection::fit(&crossed.vertices, canvas.max_width, canvas.max_height).unwrap();
        let expected: Vec<NormalizedPoint> = [south_west, south_east, north_east, north_west]
            .iter()
            .map(|p| projection.project(p))
            .collect();
        let outline = svg
            .lines()
            .find(|line| line.contains(r#"class="boundary""#))
            .unwrap();
        assert!(outline.contains(&format!(r#"points="{}""#, point_list(&expected))));

        let ordered = render_section_map(&paddock(), &[], &[], CanvasSize::default());
        assert_eq!(svg, ordered);
    }

    #[test]
    fn test_render_too_few_points() {
        let boundary = BoundaryPolygon::new(vec![GeoPoint::new(0.0, 0.0)]);
        let svg = render_section_map(&boundary, &[], &[], CanvasSize::default());
        assert!(svg.contains(r#"width="0""#));
        assert!(!svg.contains("polygon"));
    }

    #[test]
    fn test_write_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        write_svg(&path, "<svg></svg>").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<svg></svg>");
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape("A & <B>"), "A &amp; &lt;B&gt;");
    }
}
