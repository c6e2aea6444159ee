use std::str::FromStr;

use crate::{
    foundation::core::{Year, YearRange},
    foundation::error::{TernError, TernResult},
    geometry::ternary::Axis,
};

/// Earliest year of the consumption series.
pub const CONSUMPTION_FIRST_YEAR: Year = Year(1900);
/// Earliest year of the power generation series.
pub const POWER_FIRST_YEAR: Year = Year(1985);
/// Last year covered by the data.
pub const LAST_YEAR: Year = Year(2023);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which accounting the three chart axes read.
pub enum EnergyMode {
    /// Final energy: bio / electrons / fossil.
    #[default]
    Final,
    /// Useful energy: bio / electrons / fossil after conversion losses.
    Useful,
    /// Power generation: other / wind & solar / fossil.
    Power,
}

/// Text shown for one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ModeLabels {
    /// Corner labels.
    pub corner_bio: &'static str,
    pub corner_elec: &'static str,
    pub corner_foss: &'static str,
    /// Tooltip row labels.
    pub row_bio: &'static str,
    pub row_elec: &'static str,
    pub row_foss: &'static str,
    pub row_total: &'static str,
    /// Unit of the absolute total.
    pub unit: &'static str,
    /// Header text.
    pub title: &'static str,
}

const CONSUMPTION_LABELS: ModeLabels = ModeLabels {
    corner_bio: "Bio & other",
    corner_elec: "Electrons",
    corner_foss: "Fossil",
    row_bio: "Bio and other",
    row_elec: "Electricity",
    row_foss: "Fossil Fuels",
    row_total: "Total",
    unit: "Mtoe",
    title: "Final",
};

impl EnergyMode {
    pub const ALL: [EnergyMode; 3] = [EnergyMode::Final, EnergyMode::Useful, EnergyMode::Power];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Final => "final",
            Self::Useful => "useful",
            Self::Power => "power",
        }
    }

    pub fn first_year(self) -> Year {
        match self {
            Self::Final | Self::Useful => CONSUMPTION_FIRST_YEAR,
            Self::Power => POWER_FIRST_YEAR,
        }
    }

    /// Years the slider may take in this mode.
    pub fn year_range(self) -> YearRange {
        YearRange {
            start: self.first_year(),
            end: LAST_YEAR,
        }
    }

    pub fn labels(self) -> ModeLabels {
        match self {
            Self::Final => CONSUMPTION_LABELS,
            Self::Useful => ModeLabels {
                title: "Useful",
                ..CONSUMPTION_LABELS
            },
            Self::Power => ModeLabels {
                corner_bio: "Other",
                corner_elec: "Wind & Solar",
                corner_foss: "Fossil",
                row_bio: "Other (Hydro/Bio/Nuc)",
                row_elec: "Wind & Solar",
                row_foss: "Fossil Fuels",
                row_total: "Total Generation",
                unit: "TWh",
                title: "Power",
            },
        }
    }

    pub fn corner_label(self, axis: Axis) -> &'static str {
        let l = self.labels();
        match axis {
            Axis::Bio => l.corner_bio,
            Axis::Elec => l.corner_elec,
            Axis::Foss => l.corner_foss,
        }
    }
}

impl FromStr for EnergyMode {
    type Err = TernError;

    fn from_str(s: &str) -> TernResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "final" => Ok(Self::Final),
            "useful" => Ok(Self::Useful),
            "power" => Ok(Self::Power),
            other => Err(TernError::validation(format!("unknown energy mode '{other}'"))),
        }
    }
}

impl std::fmt::Display for EnergyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/mode.rs"]
mod tests;
