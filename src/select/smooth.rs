use crate::geometry::ternary::Weights;

/// Number of yearly points averaged by the trailing filter, the current one included.
pub const SMOOTHING_WINDOW: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Whether points are shown per year or as a trailing mean.
pub enum Smoothing {
    #[default]
    Annual,
    Smoothed,
}

impl Smoothing {
    pub fn from_flag(smoothed: bool) -> Self {
        if smoothed { Self::Smoothed } else { Self::Annual }
    }

    pub fn is_smoothed(self) -> bool {
        self == Self::Smoothed
    }

    /// Value at `index` of `series` under this filter, `None` if `index` is out of range.
    pub fn apply(self, series: &[Weights], index: usize) -> Option<Weights> {
        match self {
            Self::Annual => series.get(index).copied(),
            Self::Smoothed => trailing_mean(series, index, SMOOTHING_WINDOW),
        }
    }
}

/// Component-wise mean of the `window` points ending at `index`, clamped at the series start.
pub fn trailing_mean(series: &[Weights], index: usize, window: usize) -> Option<Weights> {
    if index >= series.len() || window == 0 {
        return None;
    }
    let start = (index + 1).saturating_sub(window);
    Weights::mean(&series[start..=index])
}

#[cfg(test)]
#[path = "../../tests/unit/select/smooth.rs"]
mod tests;
