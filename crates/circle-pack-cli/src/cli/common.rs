//! Common utilities shared across CLI commands.

use resvg::usvg;
use tiny_skia::Pixmap;

use circle_pack::Placement;

use super::config::{RenderStyle, Units};

/// Output format for a placement.
#[derive(Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Svg,
    Json,
}

const MM_PER_INCH: f64 = 25.4;

/// Convert millimeters to pixels at `dpi`, rounded to 3 decimals.
pub fn mm_to_pixels(mm: f64, dpi: f64) -> f64 {
    ((mm * dpi) / MM_PER_INCH * 1000.0).round() / 1000.0
}

/// Convert pixels at `dpi` back to millimeters.
pub fn pixels_to_mm(pixels: f64, dpi: f64) -> f64 {
    pixels * MM_PER_INCH / dpi
}

/// Parse a diameter list: one number per line.
///
/// Lines that are not numbers are skipped silently (headers, comments,
/// blank lines). Numbers that are not positive are skipped with a warning.
pub fn parse_diameters(content: &str) -> Vec<f64> {
    let mut diameters = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let Ok(value) = line.trim().parse::<f64>() else {
            continue;
        };
        if !value.is_finite() || value <= 0.0 {
            eprintln!("Warning: ignoring diameter {} on line {}", value, line_no + 1);
            continue;
        }
        diameters.push(value);
    }
    diameters
}

/// Radii for the packer: halved diameters, largest first.
pub fn radii_from_diameters(diameters: &[f64]) -> Vec<f64> {
    let mut radii: Vec<f64> = diameters.iter().map(|d| d / 2.0).collect();
    radii.sort_by(|a, b| b.total_cmp(a));
    radii
}

/// Pixels per input unit.
pub fn pixels_per_unit(units: Units, dpi: f64) -> f64 {
    match units {
        Units::Mm => mm_to_pixels(1.0, dpi),
        Units::Px => 1.0,
    }
}

/// A rendered placement with its raster size.
pub struct RenderedSvg {
    pub svg: String,
    pub width_px: u32,
    pub height_px: u32,
}

/// Render a placement as SVG.
///
/// Placed circles use the `placed` stroke, the circles the enclosing circle
/// rests on use `support`, and the enclosing circle itself `enclosing`.
/// The viewBox is in input units, the width/height in pixels.
pub fn placement_to_svg(placement: &Placement, style: &RenderStyle, scale: f64) -> RenderedSvg {
    let bound = placement.enclosing.circle;
    let extent = bound.radius + style.padding;
    let min_x = bound.center_x - extent;
    let min_y = bound.center_y - extent;
    let size = extent * 2.0;

    let width_px = (size * scale).ceil().max(1.0) as u32;
    let height_px = width_px;
    let stroke = style.stroke_width / scale;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{:.3} {:.3} {:.3} {:.3}">
<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="{}"/>
<g fill="none" stroke-width="{:.4}">
"#,
        width_px, height_px,
        min_x, min_y, size, size,
        min_x, min_y, size, size, style.background,
        stroke
    ));

    for (i, circle) in placement.circles.iter().enumerate() {
        let color = if placement.enclosing.support.contains(&i) {
            &style.support
        } else {
            &style.placed
        };
        svg.push_str(&format!(
            "  <circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\" stroke=\"{}\"/>\n",
            circle.center_x, circle.center_y, circle.radius, color
        ));
    }

    svg.push_str(&format!(
        "  <circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\" stroke=\"{}\"/>\n",
        bound.center_x, bound.center_y, bound.radius, style.enclosing
    ));
    svg.push_str("</g>\n</svg>\n");

    RenderedSvg { svg, width_px, height_px }
}

/// Rasterise rendered SVG and write it as PNG.
pub fn write_png(rendered: &RenderedSvg, path: &str) -> Result<(), String> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(&rendered.svg, &options)
        .map_err(|e| format!("Failed to parse generated SVG: {}", e))?;

    let mut pixmap = Pixmap::new(rendered.width_px, rendered.height_px)
        .ok_or_else(|| format!("Cannot create a {}x{} image", rendered.width_px, rendered.height_px))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.save_png(path).map_err(|e| format!("Failed to write {}: {}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversion() {
        assert_eq!(mm_to_pixels(25.4, 96.0), 96.0);
        assert_eq!(mm_to_pixels(10.0, 96.0), 37.795);
        assert!((pixels_to_mm(96.0, 96.0) - 25.4).abs() < 1e-12);
    }

    #[test]
    fn diameters_skip_junk() {
        let content = "40\nheader\n\n12.5\n-3\n0\n  7  \nNaN\n";
        assert_eq!(parse_diameters(content), vec![40.0, 12.5, 7.0]);
    }

    #[test]
    fn radii_are_sorted_descending() {
        assert_eq!(radii_from_diameters(&[4.0, 10.0, 6.0]), vec![5.0, 3.0, 2.0]);
    }

    #[test]
    fn svg_marks_support_and_enclosing() {
        let placement = circle_pack::place_greedy(&[10.0, 10.0, 1.0]).unwrap();
        let style = RenderStyle::default();
        let rendered = placement_to_svg(&placement, &style, 1.0);

        assert!(rendered.svg.starts_with("<?xml"));
        assert_eq!(rendered.svg.matches("<circle").count(), 4);
        assert_eq!(rendered.svg.matches(&format!("stroke=\"{}\"", style.support)).count(), 2);
        assert_eq!(rendered.svg.matches(&format!("stroke=\"{}\"", style.enclosing)).count(), 1);
        assert!(rendered.width_px >= 40);
        assert_eq!(rendered.width_px, rendered.height_px);
    }
}
