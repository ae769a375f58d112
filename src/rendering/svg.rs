//! SVG markup rendering.
//!
//! Pure string building: a square root element, one full-size background
//! rect, then one rect per painted cell in grid order.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::{Identicon, RawOptions};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Resolve `options` and render the icon as SVG markup.
pub fn create_svg(options: &RawOptions) -> String {
    render_svg(&Identicon::generate(options))
}

/// Render an already generated icon as SVG markup.
pub fn render_svg(icon: &Identicon) -> String {
    let side = icon.options.dimension();
    let mut out = String::with_capacity(160 + icon.grid.len() * 80);

    out.push_str(&format!(
        r#"<svg xmlns="{ns}" width="{side}" height="{side}" viewBox="0 0 {side} {side}">"#,
        ns = SVG_NS,
        side = side
    ));
    out.push_str(&format!(
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        escape_attr(&icon.options.bgcolor)
    ));
    for rect in icon.cell_rects() {
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            rect.x,
            rect.y,
            rect.side,
            rect.side,
            escape_attr(rect.color)
        ));
    }
    out.push_str("</svg>");
    out
}

/// Resolve `options` and return the SVG as a base64 `data:` URI.
pub fn svg_data_uri(options: &RawOptions) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(create_svg(options)))
}

// Resolved colors never need this, but deserialized icons can carry anything.
fn escape_attr(value: &str) -> std::borrow::Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"']) {
        return value.into();
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped.into()
}
