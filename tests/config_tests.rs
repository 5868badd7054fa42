use std::time::Duration;

use broadside::{
    class_name, parse_level, MatchConfig, ShipId, DEFAULT_THINKING_DELAY, FLEET, FLEET_SIZES,
    TOTAL_SHIP_CELLS,
};
use log::LevelFilter;

#[test]
fn test_fleet_tables_agree() {
    let lengths: Vec<_> = FLEET.iter().map(|class| class.length()).collect();
    assert_eq!(lengths, FLEET_SIZES);
    assert_eq!(FLEET_SIZES.iter().sum::<usize>(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_ship_names() {
    assert_eq!(class_name(ShipId(1)), Some("Carrier"));
    assert_eq!(class_name(ShipId(5)), Some("Destroyer"));
    assert_eq!(class_name(ShipId(0)), None);
    assert_eq!(class_name(ShipId(6)), None);
    assert_eq!(ShipId(2).to_string(), "Battleship (#2)");
    assert_eq!(ShipId(9).to_string(), "ship #9");
}

#[test]
fn test_default_config() {
    let config = MatchConfig::default();
    assert_eq!(config.thinking_delay, DEFAULT_THINKING_DELAY);
    assert_eq!(config.thinking_delay, Duration::from_millis(1000));
    assert_eq!(config.seed, None);
}

#[test]
fn test_parse_level() {
    assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
    assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
    assert_eq!(parse_level("off"), Some(LevelFilter::Off));
    assert_eq!(parse_level("loud"), None);
}
