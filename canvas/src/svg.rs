//! Static SVG export of a diagram, for use outside the browser.
//!
//! The output mirrors what the WebGL renderer draws at the default camera:
//! a background, every segment as one path, and a dot per point.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use crate::camera::Point;
use crate::config::Rgb;
use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_SVG_MARGIN, DEFAULT_SVG_SIZE};
use crate::geometry::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Width and height of the square image, in pixels.
    pub size: u32,
    pub foreground: Rgb,
    pub background: Rgb,
    /// Gap between the circle and the image edge, in pixels. A margin of
    /// half the size or more collapses the diagram to the center.
    pub margin: f64,
    /// Radius of each point's dot, in pixels.
    pub point_radius: f64,
    pub stroke_width: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SVG_SIZE,
            foreground: DEFAULT_FOREGROUND.into(),
            background: DEFAULT_BACKGROUND.into(),
            margin: DEFAULT_SVG_MARGIN,
            point_radius: 1.0,
            stroke_width: 0.5,
        }
    }
}

/// Render `geometry` as a standalone SVG document.
#[must_use]
pub fn render_svg(geometry: &Geometry, options: &SvgOptions) -> String {
    let size = f64::from(options.size.max(1));
    let half = size * 0.5;
    let scale = (half - options.margin).max(0.0);
    // SVG is y-down.
    let to_image = |p: Point| (half + p.x * scale, half - p.y * scale);

    let fg = options.foreground.to_hex();
    let bg = options.background.to_hex();
    let positions = geometry.positions();

    let mut out = String::with_capacity(positions.len() * 64 + 256);
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">\n"
    ));
    out.push_str(&format!("<rect width=\"100%\" height=\"100%\" fill=\"{bg}\"/>\n"));

    let mut path = String::new();
    for seg in geometry.segments().into_iter().filter(|s| !s.is_degenerate()) {
        let (x0, y0) = to_image(positions[seg.start as usize]);
        let (x1, y1) = to_image(positions[seg.end as usize]);
        path.push_str(&format!("M{x0:.3} {y0:.3}L{x1:.3} {y1:.3}"));
    }
    if !path.is_empty() {
        out.push_str(&format!(
            "<path d=\"{path}\" stroke=\"{fg}\" stroke-width=\"{}\" fill=\"none\"/>\n",
            options.stroke_width
        ));
    }

    out.push_str(&format!("<g fill=\"{fg}\">\n"));
    for &p in positions {
        let (x, y) = to_image(p);
        out.push_str(&format!("<circle cx=\"{x:.3}\" cy=\"{y:.3}\" r=\"{}\"/>\n", options.point_radius));
    }
    out.push_str("</g>\n</svg>\n");
    out
}
