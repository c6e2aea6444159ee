use crate::{
    foundation::core::Point,
    select::frame::{Frame, PlotPoint},
    view::mode::EnergyMode,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Hover card content for one plotted point.
pub struct Tooltip {
    pub title: String,
    /// `(label, value)` rows, electricity first.
    pub rows: Vec<(String, String)>,
    pub source: Option<String>,
}

impl Tooltip {
    pub fn for_point(entity: &str, point: &PlotPoint, mode: EnergyMode) -> Self {
        let l = mode.labels();
        let pct = |v: f64| format!("{:.1}%", v * 100.0);
        let mut rows = vec![
            (l.row_elec.to_string(), pct(point.weights.elec)),
            (l.row_foss.to_string(), pct(point.weights.foss)),
            (l.row_bio.to_string(), pct(point.weights.bio)),
        ];
        if let Some(total) = point.total {
            rows.push((
                l.row_total.to_string(),
                format!("{} {}", group_thousands(total), l.unit),
            ));
        }
        Self {
            title: format!("{entity} ({})", point.year),
            rows,
            source: point.source.clone(),
        }
    }

    /// Lines in display order, source last.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(self.title.clone());
        out.extend(self.rows.iter().map(|(k, v)| format!("{k}: {v}")));
        if let Some(src) = &self.source {
            out.push(format!("Source: {src}"));
        }
        out
    }
}

/// Entity whose marker is closest to `pos` and no further than `radius`.
pub fn hit_test<'a>(frame: &'a Frame, pos: Point, radius: f64) -> Option<&'a str> {
    frame
        .points()
        .map(|(name, p)| (name, p.pos.distance(pos)))
        .filter(|(_, d)| *d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
}

/// `12345.678` -> `12,345.68`.
fn group_thousands(v: f64) -> String {
    let s = format!("{:.2}", v.abs());
    let (int, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && (int != "0" || !frac.is_empty()) { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tooltip.rs"]
mod tests;
