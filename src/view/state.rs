use std::collections::BTreeSet;

use crate::{
    dataset::catalog::Catalog,
    foundation::core::Year,
    geometry::ternary::Axis,
    select::smooth::Smoothing,
    view::mode::{EnergyMode, LAST_YEAR},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Everything a frame depends on besides the dataset.
///
/// Transitions consume the state and return the next one, so a rendered frame always sees a
/// single consistent snapshot.
pub struct ViewState {
    pub year: Year,
    pub mode: EnergyMode,
    #[serde(default)]
    pub smoothing: Smoothing,
    /// Displayed entities. Ordering for display comes from [`Catalog::display_order`].
    pub selection: BTreeSet<String>,
    /// Axis whose bands are shown (hovered edge or corner label).
    #[serde(default)]
    pub highlight: Option<Axis>,
    /// Entity whose point is hovered.
    #[serde(default)]
    pub hovered: Option<String>,
}

impl ViewState {
    /// Initial view: last year, final energy, annual points, the catalog's default selection.
    pub fn initial(catalog: &Catalog) -> Self {
        Self {
            year: LAST_YEAR,
            mode: EnergyMode::default(),
            smoothing: Smoothing::default(),
            selection: catalog.default_selection().iter().cloned().collect(),
            highlight: None,
            hovered: None,
        }
    }

    /// Move to `year`, clamped to the current mode's range.
    pub fn with_year(mut self, year: Year) -> Self {
        self.year = self.mode.year_range().clamp(year);
        self
    }

    /// Switch the field family the axes read. The year is raised to the mode's first year if
    /// needed; the dataset itself is never touched.
    pub fn with_mode(mut self, mode: EnergyMode) -> Self {
        self.mode = mode;
        let first = mode.first_year();
        if self.year < first {
            self.year = first;
        }
        self
    }

    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_selection<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_highlight(mut self, axis: Option<Axis>) -> Self {
        self.highlight = axis;
        self
    }

    pub fn with_hovered(mut self, entity: Option<String>) -> Self {
        self.hovered = entity;
        self
    }

    /// Add `name` if absent, remove it otherwise.
    pub fn toggle(mut self, name: &str) -> Self {
        if !self.selection.remove(name) {
            self.selection.insert(name.to_string());
        }
        self
    }

    /// Clear the selection when every catalog entity is selected, select all of them otherwise.
    pub fn toggle_all(mut self, catalog: &Catalog) -> Self {
        if self.selection.len() == catalog.len() {
            self.selection.clear();
        } else {
            self.selection = catalog.names().into_iter().map(str::to_string).collect();
        }
        self
    }

    /// One playback step: next year, wrapping from the last year to the mode's first year.
    pub fn advance(mut self) -> Self {
        let range = self.mode.year_range();
        self.year = if self.year >= range.end {
            range.start
        } else {
            Year(self.year.0 + 1)
        };
        self
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.contains(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/state.rs"]
mod tests;
