use crate::{
    dataset::catalog::Catalog,
    dataset::model::{Dataset, EntitySeries},
    foundation::core::{Point, Year},
    geometry::ternary::{Triangle, Weights},
    select::smooth::Smoothing,
    view::mode::EnergyMode,
    view::state::ViewState,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Visible content of one chart frame.
pub struct Frame {
    /// Display year the frame was selected for.
    pub year: Year,
    pub mode: EnergyMode,
    pub smoothing: Smoothing,
    /// One entry per selected entity that has something to draw. [`select_frame`] yields them
    /// alphabetically; [`Frame::into_display_order`] reorders them for presentation.
    pub entries: Vec<FrameEntry>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// What one entity contributes to a frame.
pub struct FrameEntry {
    pub entity: String,
    /// Current marker; absent when no record at or before the display year carries the mode.
    pub point: Option<PlotPoint>,
    /// Historical path up to the display year, in plot coordinates.
    pub trail: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A positioned data point.
pub struct PlotPoint {
    /// Year of the record actually shown (latest year at or before the display year).
    pub year: Year,
    pub weights: Weights,
    pub pos: Point,
    /// Absolute total of the record (Mtoe or TWh depending on mode).
    pub total: Option<f64>,
    pub source: Option<String>,
}

impl Frame {
    /// Regions first, then countries, then uncatalogued entities; alphabetical within each.
    pub fn into_display_order(mut self, catalog: &Catalog) -> Self {
        self.entries
            .sort_by(|a, b| catalog.display_cmp(&a.entity, &b.entity));
        self
    }

    pub fn entry(&self, entity: &str) -> Option<&FrameEntry> {
        self.entries.iter().find(|e| e.entity == entity)
    }

    /// Entries that carry a current marker.
    pub fn points(&self) -> impl Iterator<Item = (&str, &PlotPoint)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.point.as_ref().map(|p| (e.entity.as_str(), p)))
    }
}

impl FrameEntry {
    /// Trails need at least two points to be drawn.
    pub fn has_drawable_trail(&self) -> bool {
        self.trail.len() > 1
    }
}

/// Largest year in ascending `years` that is `<= target`.
pub fn select_year(years: &[Year], target: Year) -> Option<Year> {
    let idx = years.partition_point(|y| *y <= target);
    idx.checked_sub(1).map(|i| years[i])
}

/// Select the markers and trails of every selected entity for `view`.
///
/// Entities without data, without a year at or before the display year, or whose selected
/// year lacks the current mode produce no marker. Nothing here fails.
#[tracing::instrument(skip(dataset, view, triangle), fields(year = view.year.0, mode = view.mode.as_str()))]
pub fn select_frame(dataset: &Dataset, view: &ViewState, triangle: &Triangle) -> Frame {
    let mut entries = Vec::with_capacity(view.selection.len());
    for name in &view.selection {
        let Some(series) = dataset.entity(name) else {
            tracing::debug!(entity = name.as_str(), "no data for entity");
            continue;
        };
        let entry = select_entry(name, series, view, triangle);
        if entry.point.is_none() && entry.trail.is_empty() {
            continue;
        }
        entries.push(entry);
    }

    Frame {
        year: view.year,
        mode: view.mode,
        smoothing: view.smoothing,
        entries,
    }
}

fn select_entry(
    name: &str,
    series: &EntitySeries,
    view: &ViewState,
    triangle: &Triangle,
) -> FrameEntry {
    let mode_series = series.mode_series(view.mode);
    let raw: Vec<Weights> = mode_series.iter().map(|(_, r)| r.weights()).collect();

    let years: Vec<Year> = series.years().collect();
    let point = match select_year(&years, view.year) {
        None => {
            tracing::debug!(entity = name, "display year precedes all data");
            None
        }
        Some(year) => {
            let idx = mode_series.binary_search_by(|(y, _)| y.cmp(&year)).ok();
            match idx {
                None => {
                    tracing::debug!(entity = name, year = year.0, "selected year lacks mode data");
                    None
                }
                Some(i) => view.smoothing.apply(&raw, i).map(|weights| {
                    let rec = mode_series[i].1;
                    PlotPoint {
                        year,
                        weights,
                        pos: triangle.project(weights),
                        total: rec.total(),
                        source: rec.source().map(str::to_string),
                    }
                }),
            }
        }
    };

    let first = view.mode.first_year();
    let trail = mode_series
        .iter()
        .enumerate()
        .take_while(|(_, (y, _))| *y <= view.year)
        .filter(|(_, (y, _))| *y >= first)
        .filter_map(|(i, _)| view.smoothing.apply(&raw, i))
        .map(|w| triangle.project(w))
        .collect();

    FrameEntry {
        entity: name.to_string(),
        point,
        trail,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/frame.rs"]
mod tests;
