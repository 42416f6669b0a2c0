//! Birth chart rendering.
//!
//! Produces a self-contained SVG wheel: twelve 30-degree sectors with sign
//! labels, planet glyphs at their ecliptic longitudes and an ascendant
//! marker. String building only, no drawing dependency.

use std::fmt::Write as _;

use crate::models::{NatalChart, ALL_SIGNS};

const SIZE: f64 = 600.0;
const CENTER: f64 = SIZE / 2.0;
const OUTER_RADIUS: f64 = 280.0;
const INNER_RADIUS: f64 = 220.0;
const LABEL_RADIUS: f64 = 250.0;
const PLANET_RADIUS: f64 = 180.0;

/// Point on a circle of given radius for an ecliptic longitude.
///
/// 0 Aries sits at the left (the traditional ascendant position) and
/// longitude increases counterclockwise; SVG's y axis points down, hence
/// the negated sine.
fn wheel_point(longitude_deg: f64, radius: f64) -> (f64, f64) {
    let theta = (180.0 - longitude_deg).to_radians();
    (
        CENTER + radius * theta.cos(),
        CENTER - radius * theta.sin(),
    )
}

/// Render a natal chart as an SVG document.
pub fn render_chart_svg(chart: &NatalChart) -> String {
    let mut svg = String::with_capacity(8 * 1024);
    let _ = write!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{SIZE}" height="{SIZE}" viewBox="0 0 {SIZE} {SIZE}">"##
    );
    let _ = write!(
        svg,
        r##"<rect width="{SIZE}" height="{SIZE}" fill="#fdfaf4"/>"##
    );
    let _ = write!(
        svg,
        r##"<circle cx="{CENTER}" cy="{CENTER}" r="{OUTER_RADIUS}" fill="none" stroke="#444" stroke-width="2"/>"##
    );
    let _ = write!(
        svg,
        r##"<circle cx="{CENTER}" cy="{CENTER}" r="{INNER_RADIUS}" fill="none" stroke="#444" stroke-width="1"/>"##
    );

    // Sector boundaries every 30 degrees.
    for i in 0..12 {
        let boundary = f64::from(i) * 30.0;
        let (x1, y1) = wheel_point(boundary, INNER_RADIUS);
        let (x2, y2) = wheel_point(boundary, OUTER_RADIUS);
        let _ = write!(
            svg,
            r##"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="#444" stroke-width="1"/>"##
        );
    }

    // Sign labels at sector midpoints.
    for (i, sign) in ALL_SIGNS.iter().enumerate() {
        let mid = (i as f64) * 30.0 + 15.0;
        let (x, y) = wheel_point(mid, LABEL_RADIUS);
        let _ = write!(
            svg,
            r##"<text x="{x:.1}" y="{y:.1}" font-size="14" text-anchor="middle" dominant-baseline="middle" fill="#333">{}</text>"##,
            sign.name()
        );
    }

    // Planet glyphs.
    for (body, longitude) in &chart.positions {
        let (x, y) = wheel_point(*longitude, PLANET_RADIUS);
        let _ = write!(
            svg,
            r##"<text x="{x:.1}" y="{y:.1}" font-size="22" text-anchor="middle" dominant-baseline="middle" fill="#1a237e">{}</text>"##,
            body.glyph()
        );
        let _ = write!(
            svg,
            r##"<text x="{x:.1}" y="{:.1}" font-size="10" text-anchor="middle" fill="#666">{:.1}&#176;</text>"##,
            y + 18.0,
            longitude
        );
    }

    // Ascendant marker from the inner circle out past the rim.
    let (ax1, ay1) = wheel_point(chart.ascendant, INNER_RADIUS - 30.0);
    let (ax2, ay2) = wheel_point(chart.ascendant, OUTER_RADIUS + 10.0);
    let _ = write!(
        svg,
        r##"<line x1="{ax1:.1}" y1="{ay1:.1}" x2="{ax2:.1}" y2="{ay2:.1}" stroke="#b71c1c" stroke-width="2"/>"##
    );
    let (alx, aly) = wheel_point(chart.ascendant, OUTER_RADIUS + 24.0);
    let _ = write!(
        svg,
        r##"<text x="{alx:.1}" y="{aly:.1}" font-size="14" text-anchor="middle" dominant-baseline="middle" fill="#b71c1c">Asc</text>"##
    );

    svg.push_str("</svg>");
    svg
}
