//! Unit tests for temperature reads

use crate::common::{assert_float_eq, create_initialized_driver, create_mock_driver_with};
use mpu925x::Config;

#[test]
fn test_temperature_zero_is_21_degrees() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_temperature_data(0);

    assert_float_eq(driver.read_temperature().unwrap(), 21.0, 1e-6);
}

#[test]
fn test_temperature_conversion() {
    let (mut driver, bus) = create_initialized_driver();

    bus.set_temperature_data(3339); // ~ +10 °C
    assert_float_eq(driver.read_temperature().unwrap(), 31.0, 0.01);

    bus.set_temperature_data(-3339); // ~ -10 °C
    assert_float_eq(driver.read_temperature().unwrap(), 11.0, 0.01);
}

#[test]
fn test_temperature_raw() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_temperature_data(-1234);

    assert_eq!(driver.read_temperature_raw().unwrap(), -1234);
    assert_eq!(driver.sensor_data().temperature_raw, -1234);
}

#[test]
fn test_room_temperature_offset_from_config() {
    let config = Config {
        room_temperature_offset: 100.0,
        ..Config::default()
    };
    let (mut driver, bus, _) = create_mock_driver_with(config);
    driver.init(false).unwrap();
    bus.set_temperature_data(100);

    assert_float_eq(driver.read_temperature().unwrap(), 21.0, 1e-6);
}

#[test]
fn test_set_room_temperature_offset() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_temperature_data(434);

    driver.set_room_temperature_offset(100.0);

    assert_float_eq(driver.settings().thermometer.room_temperature_offset, 100.0, 1e-6);
    assert_float_eq(driver.read_temperature().unwrap(), 22.0, 0.01);
}

#[test]
fn test_conversion_uses_stored_sensitivity() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_temperature_data(1000);
    let thermometer = driver.settings().thermometer;

    let celsius = driver.read_temperature().unwrap();

    assert_float_eq(thermometer.lsb, 333.87, 1e-6);
    assert_float_eq(
        celsius,
        mpu925x::sensors::thermometer::to_celsius(
            1000,
            thermometer.lsb,
            thermometer.room_temperature_offset,
        ),
        1e-6,
    );
}
