use crate::{
    dataset::catalog::Catalog,
    foundation::core::{ChartConfig, Line, Point, Rgb8, Vec2},
    foundation::error::TernResult,
    geometry::ternary::{Axis, Triangle},
    render::curve::basis_spline,
    render::svg::{Anchor, Document, Element, Style},
    render::tooltip::Tooltip,
    select::frame::Frame,
    view::state::ViewState,
};

const GRID: Rgb8 = Rgb8::new(0xe2, 0xe8, 0xf0);
const EDGE: Rgb8 = Rgb8::new(0x94, 0xa3, 0xb8);
const STRONG: Rgb8 = Rgb8::new(0x47, 0x55, 0x69);
const MUTED: Rgb8 = Rgb8::new(0x64, 0x74, 0x8b);
const INK: Rgb8 = Rgb8::new(0x1e, 0x29, 0x3b);
const WHITE: Rgb8 = Rgb8::new(0xff, 0xff, 0xff);

const TRAIL_WIDTH: f64 = 2.0;
const TRAIL_OPACITY: f64 = 0.6;
const TRAIL_DIMMED_OPACITY: f64 = 0.15;
const HOVER_GROW: f64 = 2.0;
const ARROW_LENGTH_FACTOR: f64 = 0.6;
const ARROW_OFFSET: f64 = 30.0;

/// Builds the SVG document for a frame.
pub struct Scene<'a> {
    config: &'a ChartConfig,
    catalog: &'a Catalog,
    triangle: Triangle,
}

impl<'a> Scene<'a> {
    pub fn new(config: &'a ChartConfig, catalog: &'a Catalog) -> TernResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            triangle: Triangle::from_width(config.inner_width()),
        })
    }

    /// Plot-space triangle used for projection; pass it to [`crate::select_frame`].
    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    /// Compose the full chart: axes, trails, markers, hover layers, title and legend.
    #[tracing::instrument(skip_all, fields(year = frame.year.0, entries = frame.entries.len()))]
    pub fn build(&self, frame: &Frame, view: &ViewState) -> Document {
        let cfg = self.config;
        let mut doc = Document::new(cfg.canvas.width, cfg.canvas.height);
        let [r, g, b, a] = cfg.background_rgba;
        doc.background = Some(Rgb8::new(r, g, b));
        doc.background_opacity = f64::from(a) / 255.0;

        let mut plot = Vec::new();
        if let Some(axis) = view.highlight {
            self.push_bands(&mut plot, axis);
        }
        self.push_axes(&mut plot, frame, view.highlight);
        self.push_trails(&mut plot, frame, view);
        self.push_points(&mut plot, frame, view);
        if let Some(hovered) = view.hovered.as_deref() {
            self.push_tooltip(&mut plot, frame, hovered);
        }
        doc.push(Element::Group {
            offset: cfg.origin(),
            children: plot,
        });

        self.push_title(&mut doc, frame);
        self.push_legend(&mut doc, view);
        doc
    }

    fn push_bands(&self, out: &mut Vec<Element>, axis: Axis) {
        for band in self.triangle.highlight_bands(axis) {
            out.push(Element::Polygon {
                points: band.corners.to_vec(),
                style: Style::fill(Rgb8::BLACK)
                    .with_opacity(band.opacity)
                    .with_class("highlight-band"),
            });
        }
    }

    fn push_axes(&self, out: &mut Vec<Element>, frame: &Frame, highlight: Option<Axis>) {
        let tri = &self.triangle;
        let on = |axis: Axis| highlight == Some(axis);

        for axis in Axis::ALL {
            let color = if on(axis) { EDGE } else { GRID };
            for line in tri.grid_lines(axis) {
                out.push(Element::Line {
                    line,
                    style: Style::stroke(color, 1.0).with_class("grid-line"),
                });
            }
        }

        for axis in [Axis::Bio, Axis::Foss, Axis::Elec] {
            let (color, width) = if on(axis) { (STRONG, 2.5) } else { (EDGE, 1.5) };
            out.push(Element::Line {
                line: tri.edge(axis),
                style: Style::stroke(color, width).with_class("axis-edge"),
            });
        }

        for axis in Axis::ALL {
            let (dx, dy, anchor) = match axis {
                Axis::Bio => (-12.0, 4.0, Anchor::End),
                Axis::Foss => (12.0, 4.0, Anchor::Start),
                Axis::Elec => (0.0, -10.0, Anchor::Middle),
            };
            let fill = if on(axis) { STRONG } else { MUTED };
            for tick in tri.ticks(axis) {
                out.push(text(
                    tick.pos + Vec2::new(dx, dy),
                    tick.pct.to_string(),
                    anchor,
                    11.0,
                    fill,
                ));
            }
        }

        self.push_range_labels(out, highlight);

        for axis in Axis::ALL {
            let corner = tri.corner(axis);
            let (offset, anchor) = match axis {
                Axis::Bio => (Vec2::new(-20.0, -20.0), Anchor::End),
                Axis::Elec => (Vec2::new(20.0, -20.0), Anchor::Start),
                Axis::Foss => (Vec2::new(0.0, 40.0), Anchor::Middle),
            };
            out.push(Element::Text {
                pos: corner + offset,
                text: frame.mode.corner_label(axis).to_string(),
                anchor,
                size: 14.0,
                bold: true,
                style: Style::fill(if on(axis) { INK } else { STRONG }).with_class("axis-label"),
            });
        }
    }

    fn push_range_labels(&self, out: &mut Vec<Element>, highlight: Option<Axis>) {
        let tri = &self.triangle;
        let fill = |axis: Axis| if highlight == Some(axis) { STRONG } else { EDGE };
        let w = tri.width();

        let labels = [
            (Axis::Elec, tri.bio + Vec2::new(55.0, -45.0), Anchor::Start, "Low electrons"),
            (Axis::Elec, tri.elec + Vec2::new(-55.0, -45.0), Anchor::End, "High electrons"),
            (Axis::Bio, tri.bio + Vec2::new(-5.0, 90.0), Anchor::End, "High bio"),
            (Axis::Foss, tri.elec + Vec2::new(-5.0, 90.0), Anchor::Start, "Low fossil"),
            (Axis::Bio, tri.foss + Vec2::new(-120.0, -60.0), Anchor::Middle, "Low bio"),
            (Axis::Foss, tri.foss + Vec2::new(120.0, -60.0), Anchor::Middle, "High fossil"),
        ];
        for (axis, pos, anchor, label) in labels {
            out.push(text(pos, label.to_string(), anchor, 11.0, fill(axis)));
        }

        // electrons grow to the right along the top edge
        let y = tri.bio.y - ARROW_OFFSET;
        let x0 = tri.bio.x + w * (1.0 - ARROW_LENGTH_FACTOR) / 2.0;
        let x1 = tri.bio.x + w * (1.0 + ARROW_LENGTH_FACTOR) / 2.0;
        push_arrow(out, Line::new((x0, y), (x1, y)), fill(Axis::Elec));

        let t0 = (1.0 - ARROW_LENGTH_FACTOR) / 2.0;
        let t1 = 1.0 - t0;
        let angle = std::f64::consts::FRAC_PI_3;

        // bio grows toward its corner along the left edge
        let bio = tri.edge(Axis::Bio);
        let shift = Vec2::new(-angle.sin() * ARROW_OFFSET - 50.0, -angle.cos() * ARROW_OFFSET + 10.0);
        push_arrow(
            out,
            Line::new(bio.p0.lerp(bio.p1, 1.0 - t0) + shift, bio.p0.lerp(bio.p1, 1.0 - t1) + shift),
            fill(Axis::Bio),
        );

        // fossil grows toward the bottom apex along the right edge
        let foss = tri.edge(Axis::Foss);
        let shift = Vec2::new(angle.sin() * ARROW_OFFSET + 50.0, -angle.cos() * ARROW_OFFSET + 10.0);
        push_arrow(
            out,
            Line::new(foss.p0.lerp(foss.p1, t0) + shift, foss.p0.lerp(foss.p1, t1) + shift),
            fill(Axis::Foss),
        );
    }

    fn push_trails(&self, out: &mut Vec<Element>, frame: &Frame, view: &ViewState) {
        let opacity = if view.hovered.is_some() {
            TRAIL_DIMMED_OPACITY
        } else {
            TRAIL_OPACITY
        };
        for name in self.catalog.display_order(frame.entries.iter().map(|e| e.entity.as_str())) {
            let Some(entry) = frame.entry(name) else {
                continue;
            };
            if !entry.has_drawable_trail() {
                continue;
            }
            out.push(Element::Path {
                path: basis_spline(&entry.trail),
                style: Style::stroke(self.catalog.color(name), TRAIL_WIDTH)
                    .with_stroke_opacity(opacity)
                    .with_class("year-trail"),
            });
        }
    }

    fn push_points(&self, out: &mut Vec<Element>, frame: &Frame, view: &ViewState) {
        for name in self.catalog.display_order(frame.entries.iter().map(|e| e.entity.as_str())) {
            let Some(point) = frame.entry(name).and_then(|e| e.point.as_ref()) else {
                continue;
            };
            let grow = if view.hovered.as_deref() == Some(name) {
                HOVER_GROW
            } else {
                0.0
            };
            out.push(Element::Circle {
                center: point.pos,
                radius: self.config.point_radius + grow,
                style: Style {
                    fill: Some(self.catalog.color(name)),
                    stroke: Some(WHITE),
                    stroke_width: Some(2.0),
                    class: Some("country-point"),
                    ..Style::default()
                },
            });
        }
    }

    fn push_tooltip(&self, out: &mut Vec<Element>, frame: &Frame, hovered: &str) {
        let Some(point) = frame.entry(hovered).and_then(|e| e.point.as_ref()) else {
            return;
        };
        let lines = Tooltip::for_point(hovered, point, frame.mode).lines();
        let line_h = 16.0;
        let width = 220.0;
        let height = line_h * lines.len() as f64 + 12.0;
        let origin = point.pos + Vec2::new(12.0, 12.0);
        out.push(Element::Rect {
            origin,
            size: Vec2::new(width, height),
            rx: 6.0,
            style: Style {
                fill: Some(WHITE),
                fill_opacity: Some(0.95),
                stroke: Some(GRID),
                stroke_width: Some(1.0),
                class: Some("tooltip"),
                ..Style::default()
            },
        });
        for (i, line) in lines.into_iter().enumerate() {
            out.push(Element::Text {
                pos: origin + Vec2::new(10.0, line_h * (i as f64 + 1.0)),
                text: line,
                anchor: Anchor::Start,
                size: 12.0,
                bold: i == 0,
                style: Style::fill(INK),
            });
        }
    }

    fn push_title(&self, doc: &mut Document, frame: &Frame) {
        let title = format!(
            "{} energy mix ({} \u{2013} {})",
            frame.mode.labels().title,
            frame.mode.first_year(),
            frame.year
        );
        doc.push(Element::Text {
            pos: Point::new(20.0, 28.0),
            text: title,
            anchor: Anchor::Start,
            size: 18.0,
            bold: true,
            style: Style::fill(INK),
        });
        let right = f64::from(self.config.canvas.width) - 20.0;
        doc.push(Element::Text {
            pos: Point::new(right, 28.0),
            text: frame.year.to_string(),
            anchor: Anchor::End,
            size: 24.0,
            bold: true,
            style: Style::fill(STRONG),
        });
    }

    fn push_legend(&self, doc: &mut Document, view: &ViewState) {
        let names: Vec<&str> = self
            .catalog
            .display_order(view.selection.iter().map(String::as_str))
            .into_iter()
            .filter(|n| self.catalog.get(n).is_some())
            .collect();
        if names.is_empty() {
            return;
        }

        let max_x = f64::from(self.config.canvas.width) - 20.0;
        let row_h = 18.0;
        let mut cursor = Point::new(20.0, f64::from(self.config.canvas.height) - 22.0);
        let mut items = Vec::with_capacity(names.len() * 2);
        for name in names {
            // rough glyph width for 12px sans-serif
            let item_w = 16.0 + 6.5 * name.chars().count() as f64 + 14.0;
            if cursor.x + item_w > max_x && cursor.x > 20.0 {
                cursor = Point::new(20.0, cursor.y + row_h);
            }
            items.push(Element::Circle {
                center: cursor + Vec2::new(5.0, -4.0),
                radius: 5.0,
                style: Style::fill(self.catalog.color(name)).with_class("legend-dot"),
            });
            items.push(Element::Text {
                pos: cursor + Vec2::new(16.0, 0.0),
                text: name.to_string(),
                anchor: Anchor::Start,
                size: 12.0,
                bold: false,
                style: Style::fill(STRONG),
            });
            cursor.x += item_w;
        }
        doc.push(Element::Group {
            offset: Vec2::ZERO,
            children: items,
        });
    }
}

fn text(pos: Point, s: String, anchor: Anchor, size: f64, fill: Rgb8) -> Element {
    Element::Text {
        pos,
        text: s,
        anchor,
        size,
        bold: false,
        style: Style::fill(fill),
    }
}

fn push_arrow(out: &mut Vec<Element>, line: Line, color: Rgb8) {
    let dir = line.p1 - line.p0;
    let len = dir.hypot();
    if len == 0.0 {
        return;
    }
    let u = dir / len;
    let n = Vec2::new(-u.y, u.x);
    let base = line.p1 - u * 9.0;
    out.push(Element::Line {
        line: Line::new(line.p0, base),
        style: Style::stroke(color, 1.0).with_class("axis-arrow"),
    });
    out.push(Element::Polygon {
        points: vec![line.p1, base + n * 3.5, base - n * 3.5],
        style: Style::fill(color).with_class("axis-arrow"),
    });
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
