use super::*;

#[test]
fn power_starts_later_than_consumption() {
    assert_eq!(EnergyMode::Final.first_year(), Year(1900));
    assert_eq!(EnergyMode::Useful.first_year(), Year(1900));
    assert_eq!(EnergyMode::Power.first_year(), Year(1985));
    assert_eq!(EnergyMode::Power.year_range().end, LAST_YEAR);
}

#[test]
fn labels_switch_with_mode() {
    assert_eq!(EnergyMode::Final.corner_label(Axis::Bio), "Bio & other");
    assert_eq!(EnergyMode::Power.corner_label(Axis::Bio), "Other");
    assert_eq!(EnergyMode::Power.corner_label(Axis::Elec), "Wind & Solar");
    assert_eq!(EnergyMode::Useful.labels().title, "Useful");
    assert_eq!(EnergyMode::Useful.labels().unit, "Mtoe");
    assert_eq!(EnergyMode::Power.labels().unit, "TWh");
}

#[test]
fn names_parse_and_display() {
    for mode in EnergyMode::ALL {
        assert_eq!(mode.to_string().parse::<EnergyMode>().unwrap(), mode);
    }
    assert_eq!("POWER".parse::<EnergyMode>().unwrap(), EnergyMode::Power);
    assert!("primary".parse::<EnergyMode>().is_err());
}
