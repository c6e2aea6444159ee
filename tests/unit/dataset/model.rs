use super::*;

const SAMPLE: &str = r#"{
    "Germany": {
        "1990": {
            "final": {"bio_pct": 5.0, "electrons_pct": 18.0, "fossil_pct": 77.0, "total": 230.5, "source": "IEA"},
            "useful": {"bio_pct": 3.0, "electrons_pct": 30.0, "fossil_pct": 67.0},
            "power": {}
        },
        "1995": {
            "final": {"bio_pct": "6.5", "electrons_pct": null, "fossil_pct": 75.0},
            "power": {"other_pct": 40.0, "wind_solar_pct": 1.0, "fossil_pct": 59.0, "total": 530.0, "source": "Ember"}
        }
    },
    "World": {
        "2000": {"final": {"bio_pct": 12.0, "electrons_pct": 16.0, "fossil_pct": 72.0}}
    }
}"#;

fn sample() -> Dataset {
    serde_json::from_str(SAMPLE).unwrap()
}

#[test]
fn nested_json_loads_into_typed_table() {
    let ds = sample();
    assert_eq!(ds.len(), 2);
    let de = ds.entity("Germany").unwrap();
    assert_eq!(de.years().collect::<Vec<_>>(), [Year(1990), Year(1995)]);
    assert_eq!(ds.year_bounds(), Some((Year(1990), Year(2000))));
}

#[test]
fn empty_mode_object_reads_as_absent() {
    let ds = sample();
    let rec = ds.entity("Germany").unwrap().get(Year(1990)).unwrap();
    assert!(rec.power.is_none());
    assert!(rec.mode(EnergyMode::Power).is_none());
    assert!(rec.mode(EnergyMode::Final).is_some());
}

#[test]
fn malformed_percentages_default_to_zero() {
    let ds = sample();
    let rec = ds.entity("Germany").unwrap().get(Year(1995)).unwrap();
    let fin = rec.final_energy.as_ref().unwrap();
    assert_eq!(fin.bio_pct, 6.5);
    assert_eq!(fin.electrons_pct, 0.0);
    assert_eq!(fin.fossil_pct, 75.0);
    assert!(fin.total.is_none());
    assert!(rec.useful.is_none());
}

#[test]
fn mode_selects_field_family() {
    let ds = sample();
    let rec = ds.entity("Germany").unwrap().get(Year(1995)).unwrap();
    let power = rec.mode(EnergyMode::Power).unwrap();
    assert_eq!(power.weights(), Weights::new(0.40, 0.01, 0.59));
    assert_eq!(power.total(), Some(530.0));
    assert_eq!(power.source(), Some("Ember"));

    let fin = rec.mode(EnergyMode::Final).unwrap();
    assert_eq!(fin.weights(), Weights::new(0.065, 0.0, 0.75));
    assert!((fin.sum_pct() - 81.5).abs() < 1e-9);
}

#[test]
fn mode_series_skips_years_without_mode() {
    let ds = sample();
    let de = ds.entity("Germany").unwrap();
    let power: Vec<Year> = de.mode_series(EnergyMode::Power).iter().map(|(y, _)| *y).collect();
    assert_eq!(power, [Year(1995)]);
    assert_eq!(de.mode_series(EnergyMode::Final).len(), 2);
    assert_eq!(de.mode_series(EnergyMode::Useful).len(), 1);
}

#[test]
fn non_integer_year_key_is_rejected() {
    let err = serde_json::from_str::<Dataset>(r#"{"X": {"19x0": {}}}"#).unwrap_err();
    assert!(err.to_string().contains("19x0"));
}

#[test]
fn serialization_keeps_year_keys_as_strings() {
    let ds = sample();
    let v = serde_json::to_value(&ds).unwrap();
    assert!(v["Germany"]["1990"]["final"]["bio_pct"].is_number());
    assert!(v["Germany"]["1990"].get("power").is_none());
    let back: Dataset = serde_json::from_value(v).unwrap();
    assert_eq!(back, ds);
}
