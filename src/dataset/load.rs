use std::{fs::File, io::BufReader, io::Read, path::Path};

use anyhow::Context as _;

use crate::{
    dataset::model::Dataset,
    foundation::error::{TernError, TernResult},
    view::mode::EnergyMode,
};

/// Records whose percentages stray further than this from 100 are reported at debug level.
const SUM_TOLERANCE_PCT: f64 = 1.0;

/// Parse a dataset from a JSON string.
pub fn dataset_from_json_str(json: &str) -> TernResult<Dataset> {
    let ds: Dataset =
        serde_json::from_str(json).map_err(|e| TernError::serde(format!("dataset json: {e}")))?;
    report(&ds);
    Ok(ds)
}

/// Parse a dataset from any reader producing JSON.
pub fn dataset_from_reader(reader: impl Read) -> TernResult<Dataset> {
    let ds: Dataset = serde_json::from_reader(reader)
        .map_err(|e| TernError::serde(format!("dataset json: {e}")))?;
    report(&ds);
    Ok(ds)
}

/// Read and parse the dataset file once.
#[tracing::instrument]
pub fn load_dataset(path: &Path) -> TernResult<Dataset> {
    let f = File::open(path).with_context(|| format!("open dataset '{}'", path.display()))?;
    dataset_from_reader(BufReader::new(f))
}

fn report(ds: &Dataset) {
    let bounds = ds.year_bounds();
    tracing::info!(
        entities = ds.len(),
        first_year = bounds.map(|b| b.0.0),
        last_year = bounds.map(|b| b.1.0),
        "dataset loaded"
    );

    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    for name in ds.entity_names() {
        let Some(series) = ds.entity(name) else {
            continue;
        };
        for mode in EnergyMode::ALL {
            for (year, rec) in series.mode_series(mode) {
                let sum = rec.sum_pct();
                if (sum - 100.0).abs() > SUM_TOLERANCE_PCT {
                    tracing::debug!(
                        entity = name,
                        year = year.0,
                        mode = mode.as_str(),
                        sum,
                        "percentages do not sum to 100"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/load.rs"]
mod tests;
