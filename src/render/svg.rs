use std::fmt::Write as _;

use crate::foundation::core::{BezPath, Line, Point, Rgb8, Vec2};

/// Text anchoring relative to the `x` coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Stroke/fill attributes shared by all shapes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub fill: Option<Rgb8>,
    pub fill_opacity: Option<f64>,
    pub stroke: Option<Rgb8>,
    pub stroke_width: Option<f64>,
    pub stroke_opacity: Option<f64>,
    pub opacity: Option<f64>,
    /// Space separated class names, kept for styling by downstream consumers.
    pub class: Option<&'static str>,
}

impl Style {
    pub fn fill(color: Rgb8) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn stroke(color: Rgb8, width: f64) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_stroke_opacity(mut self, opacity: f64) -> Self {
        self.stroke_opacity = Some(opacity);
        self
    }

    fn write_attrs(&self, out: &mut String) {
        if let Some(c) = self.class {
            let _ = write!(out, r#" class="{}""#, escape(c));
        }
        match self.fill {
            Some(c) => {
                let _ = write!(out, r#" fill="{}""#, c.to_hex());
            }
            None => out.push_str(r#" fill="none""#),
        }
        if let Some(v) = self.fill_opacity {
            let _ = write!(out, r#" fill-opacity="{}""#, num(v));
        }
        if let Some(c) = self.stroke {
            let _ = write!(out, r#" stroke="{}""#, c.to_hex());
        }
        if let Some(v) = self.stroke_width {
            let _ = write!(out, r#" stroke-width="{}""#, num(v));
        }
        if let Some(v) = self.stroke_opacity {
            let _ = write!(out, r#" stroke-opacity="{}""#, num(v));
        }
        if let Some(v) = self.opacity {
            let _ = write!(out, r#" opacity="{}""#, num(v));
        }
    }
}

/// One drawable SVG node.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Line {
        line: Line,
        style: Style,
    },
    Polygon {
        points: Vec<Point>,
        style: Style,
    },
    Path {
        path: BezPath,
        style: Style,
    },
    Circle {
        center: Point,
        radius: f64,
        style: Style,
    },
    Rect {
        origin: Point,
        size: Vec2,
        rx: f64,
        style: Style,
    },
    Text {
        pos: Point,
        text: String,
        anchor: Anchor,
        size: f64,
        bold: bool,
        style: Style,
    },
    Group {
        offset: Vec2,
        children: Vec<Element>,
    },
}

impl Element {
    fn write(&self, out: &mut String, indent: usize) {
        let pad = "  ".repeat(indent);
        out.push_str(&pad);
        match self {
            Self::Line { line, style } => {
                let _ = write!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                    num(line.p0.x),
                    num(line.p0.y),
                    num(line.p1.x),
                    num(line.p1.y)
                );
                style.write_attrs(out);
                out.push_str("/>\n");
            }
            Self::Polygon { points, style } => {
                let pts: Vec<String> = points
                    .iter()
                    .map(|p| format!("{},{}", num(p.x), num(p.y)))
                    .collect();
                let _ = write!(out, r#"<polygon points="{}""#, pts.join(" "));
                style.write_attrs(out);
                out.push_str("/>\n");
            }
            Self::Path { path, style } => {
                let _ = write!(out, r#"<path d="{}""#, path.to_svg());
                style.write_attrs(out);
                out.push_str(r#" stroke-linecap="round" stroke-linejoin="round"/>"#);
                out.push('\n');
            }
            Self::Circle {
                center,
                radius,
                style,
            } => {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}""#,
                    num(center.x),
                    num(center.y),
                    num(*radius)
                );
                style.write_attrs(out);
                out.push_str("/>\n");
            }
            Self::Rect {
                origin,
                size,
                rx,
                style,
            } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}""#,
                    num(origin.x),
                    num(origin.y),
                    num(size.x),
                    num(size.y),
                    num(*rx)
                );
                style.write_attrs(out);
                out.push_str("/>\n");
            }
            Self::Text {
                pos,
                text,
                anchor,
                size,
                bold,
                style,
            } => {
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" text-anchor="{}" font-family="sans-serif" font-size="{}""#,
                    num(pos.x),
                    num(pos.y),
                    anchor.as_str(),
                    num(*size)
                );
                if *bold {
                    out.push_str(r#" font-weight="bold""#);
                }
                style.write_attrs(out);
                let _ = writeln!(out, ">{}</text>", escape(text));
            }
            Self::Group { offset, children } => {
                let _ = writeln!(
                    out,
                    r#"<g transform="translate({},{})">"#,
                    num(offset.x),
                    num(offset.y)
                );
                for c in children {
                    c.write(out, indent + 1);
                }
                out.push_str(&pad);
                out.push_str("</g>\n");
            }
        }
    }

    /// Number of leaf nodes, groups excluded.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Group { children, .. } => children.iter().map(Element::leaf_count).sum(),
            _ => 1,
        }
    }
}

/// Standalone SVG document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    pub background: Option<Rgb8>,
    /// Opacity of the background fill, 0..=1.
    pub background_opacity: f64,
    pub children: Vec<Element>,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            background_opacity: 1.0,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, el: Element) {
        self.children.push(el);
    }

    pub fn to_svg_string(&self) -> String {
        let mut out = String::with_capacity(4096);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        if let Some(bg) = self.background {
            let _ = write!(
                out,
                r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}""#,
                self.width,
                self.height,
                bg.to_hex()
            );
            if self.background_opacity < 1.0 {
                let _ = write!(out, r#" fill-opacity="{}""#, num(self.background_opacity));
            }
            out.push_str("/>\n");
        }
        for c in &self.children {
            c.write(&mut out, 1);
        }
        out.push_str("</svg>\n");
        out
    }
}

/// Shortest decimal form with at most two fractional digits.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
