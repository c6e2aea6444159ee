use std::collections::BTreeMap;

use crate::{
    foundation::core::Year,
    foundation::error::TernError,
    geometry::ternary::Weights,
    view::mode::EnergyMode,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawDataset", into = "RawDataset")]
/// Immutable energy-mix table keyed by entity and year.
///
/// Deserializes from the nested JSON layout `{ entity: { "year": { mode: record } } }`.
pub struct Dataset {
    entities: BTreeMap<String, EntitySeries>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// All yearly records of one entity, ascending by year.
pub struct EntitySeries {
    records: BTreeMap<Year, YearRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawYearRecord")]
/// Per-mode breakdowns available for one entity in one year.
pub struct YearRecord {
    /// Final energy consumption shares.
    #[serde(rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_energy: Option<ConsumptionRecord>,
    /// Useful energy shares (final energy weighted by conversion efficiency).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub useful: Option<ConsumptionRecord>,
    /// Power generation shares.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<PowerRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Bio / electrons / fossil breakdown used by the final and useful modes.
pub struct ConsumptionRecord {
    pub bio_pct: f64,
    pub electrons_pct: f64,
    pub fossil_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electrons: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fossil: Option<f64>,
    /// Absolute total in Mtoe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Other / wind-solar / fossil breakdown used by the power mode.
pub struct PowerRecord {
    pub other_pct: f64,
    pub wind_solar_pct: f64,
    pub fossil_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_solar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fossil: Option<f64>,
    /// Absolute total generation in TWh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Borrowed view of the record that a mode reads.
pub enum ModeRecord<'a> {
    Consumption(&'a ConsumptionRecord),
    Power(&'a PowerRecord),
}

impl<'a> ModeRecord<'a> {
    /// Chart weights (bio-like, electric-like, fossil) as fractions.
    pub fn weights(self) -> Weights {
        match self {
            Self::Consumption(r) => Weights::from_pct(r.bio_pct, r.electrons_pct, r.fossil_pct),
            Self::Power(r) => Weights::from_pct(r.other_pct, r.wind_solar_pct, r.fossil_pct),
        }
    }

    pub fn total(self) -> Option<f64> {
        match self {
            Self::Consumption(r) => r.total,
            Self::Power(r) => r.total,
        }
    }

    pub fn source(self) -> Option<&'a str> {
        match self {
            Self::Consumption(r) => r.source.as_deref(),
            Self::Power(r) => r.source.as_deref(),
        }
    }

    /// Sum of the three percentage fields. Not expected to be exactly 100.
    pub fn sum_pct(self) -> f64 {
        self.weights().sum() * 100.0
    }
}

impl YearRecord {
    /// Record read by `mode`, if this year carries one.
    pub fn mode(&self, mode: EnergyMode) -> Option<ModeRecord<'_>> {
        match mode {
            EnergyMode::Final => self.final_energy.as_ref().map(ModeRecord::Consumption),
            EnergyMode::Useful => self.useful.as_ref().map(ModeRecord::Consumption),
            EnergyMode::Power => self.power.as_ref().map(ModeRecord::Power),
        }
    }
}

impl EntitySeries {
    pub fn from_records(records: BTreeMap<Year, YearRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, year: Year) -> Option<&YearRecord> {
        self.records.get(&year)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.records.keys().copied()
    }

    /// `(year, record)` pairs in ascending order of year.
    pub fn iter(&self) -> impl Iterator<Item = (Year, &YearRecord)> + '_ {
        self.records.iter().map(|(y, r)| (*y, r))
    }

    /// Every year that carries data for `mode`, ascending.
    pub fn mode_series(&self, mode: EnergyMode) -> Vec<(Year, ModeRecord<'_>)> {
        self.iter()
            .filter_map(|(y, r)| r.mode(mode).map(|m| (y, m)))
            .collect()
    }
}

impl Dataset {
    pub fn from_entities(entities: BTreeMap<String, EntitySeries>) -> Self {
        Self { entities }
    }

    pub fn entity(&self, name: &str) -> Option<&EntitySeries> {
        self.entities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Entity names in lexical order.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Smallest and largest year present across all entities.
    pub fn year_bounds(&self) -> Option<(Year, Year)> {
        let mut years = self.entities.values().flat_map(|s| s.years());
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }
}

// Wire layout. Year keys are JSON strings and mode payloads may be partial or empty.

type RawDataset = BTreeMap<String, BTreeMap<String, YearRecord>>;

impl TryFrom<RawDataset> for Dataset {
    type Error = TernError;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        let mut entities = BTreeMap::new();
        for (name, years) in raw {
            let mut records = BTreeMap::new();
            for (key, record) in years {
                let year: i32 = key.trim().parse().map_err(|_| {
                    TernError::dataset(format!("entity '{name}': year key '{key}' is not an integer"))
                })?;
                records.insert(Year(year), record);
            }
            entities.insert(name, EntitySeries { records });
        }
        Ok(Self { entities })
    }
}

impl From<Dataset> for RawDataset {
    fn from(ds: Dataset) -> Self {
        ds.entities
            .into_iter()
            .map(|(name, series)| {
                let years = series
                    .records
                    .into_iter()
                    .map(|(y, r)| (y.0.to_string(), r))
                    .collect();
                (name, years)
            })
            .collect()
    }
}

#[derive(serde::Deserialize)]
struct RawYearRecord {
    #[serde(rename = "final", default)]
    final_energy: Option<RawFields>,
    #[serde(default)]
    useful: Option<RawFields>,
    #[serde(default)]
    power: Option<RawFields>,
}

#[derive(Default, serde::Deserialize)]
struct RawFields {
    #[serde(default)]
    bio_pct: Option<serde_json::Value>,
    #[serde(default)]
    electrons_pct: Option<serde_json::Value>,
    #[serde(default)]
    other_pct: Option<serde_json::Value>,
    #[serde(default)]
    wind_solar_pct: Option<serde_json::Value>,
    #[serde(default)]
    fossil_pct: Option<serde_json::Value>,
    #[serde(default)]
    bio: Option<serde_json::Value>,
    #[serde(default)]
    electrons: Option<serde_json::Value>,
    #[serde(default)]
    other: Option<serde_json::Value>,
    #[serde(default)]
    wind_solar: Option<serde_json::Value>,
    #[serde(default)]
    fossil: Option<serde_json::Value>,
    #[serde(default)]
    total: Option<serde_json::Value>,
    #[serde(default)]
    source: Option<serde_json::Value>,
}

/// Numbers pass through, numeric strings are parsed, anything else reads as `None`.
fn lenient_number(v: Option<&serde_json::Value>) -> Option<f64> {
    match v? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}

fn lenient_pct(v: Option<&serde_json::Value>) -> f64 {
    lenient_number(v).unwrap_or(0.0)
}

fn lenient_source(v: Option<serde_json::Value>) -> Option<String> {
    match v? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl RawFields {
    fn into_consumption(self) -> Option<ConsumptionRecord> {
        if self.bio_pct.is_none() && self.electrons_pct.is_none() && self.fossil_pct.is_none() {
            return None;
        }
        Some(ConsumptionRecord {
            bio_pct: lenient_pct(self.bio_pct.as_ref()),
            electrons_pct: lenient_pct(self.electrons_pct.as_ref()),
            fossil_pct: lenient_pct(self.fossil_pct.as_ref()),
            bio: lenient_number(self.bio.as_ref()),
            electrons: lenient_number(self.electrons.as_ref()),
            fossil: lenient_number(self.fossil.as_ref()),
            total: lenient_number(self.total.as_ref()),
            source: lenient_source(self.source),
        })
    }

    fn into_power(self) -> Option<PowerRecord> {
        if self.other_pct.is_none() && self.wind_solar_pct.is_none() && self.fossil_pct.is_none() {
            return None;
        }
        Some(PowerRecord {
            other_pct: lenient_pct(self.other_pct.as_ref()),
            wind_solar_pct: lenient_pct(self.wind_solar_pct.as_ref()),
            fossil_pct: lenient_pct(self.fossil_pct.as_ref()),
            other: lenient_number(self.other.as_ref()),
            wind_solar: lenient_number(self.wind_solar.as_ref()),
            fossil: lenient_number(self.fossil.as_ref()),
            total: lenient_number(self.total.as_ref()),
            source: lenient_source(self.source),
        })
    }
}

impl From<RawYearRecord> for YearRecord {
    fn from(raw: RawYearRecord) -> Self {
        Self {
            final_energy: raw.final_energy.and_then(RawFields::into_consumption),
            useful: raw.useful.and_then(RawFields::into_consumption),
            power: raw.power.and_then(RawFields::into_power),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/model.rs"]
mod tests;
