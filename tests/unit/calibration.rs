//! Unit tests for accelerometer offset cancellation

use crate::common::{BusOp, create_initialized_driver, create_mock_driver_with};
use mpu925x::{AccelScale, Config, Error, Orientation};

#[test]
fn test_accelerometer_bias_read() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_factory_bias([5000, -3000, 1200]);

    assert_eq!(driver.accelerometer_bias().unwrap(), [5000, -3000, 1200]);
    assert_eq!(
        bus.operations(),
        vec![BusOp::Read {
            address: 0x68,
            register: 0x77,
            len: 8,
        }]
    );
}

#[test]
fn test_offset_subtracted_from_factory_bias() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_factory_bias([5000, -3000, 1200]);
    bus.set_accel_data(160, -96, 16704);

    let offset = driver.accelerometer_offset(100).unwrap();

    assert_eq!(offset, [4980, -2988, 1160]);
    // Computing alone writes nothing
    assert_eq!(bus.get_register_i16(0x77), 5000);
}

#[test]
fn test_cancellation_writes_bias_registers() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_factory_bias([5000, -3000, 1200]);
    bus.set_accel_data(160, -96, 16704);

    let offset = driver.accelerometer_offset_cancellation(50).unwrap();

    assert_eq!(offset, [4980, -2988, 1160]);
    assert_eq!(bus.get_register_i16(0x77), 4980);
    assert_eq!(bus.get_register_i16(0x7A), -2988);
    assert_eq!(bus.get_register_i16(0x7D), 1160);

    let corrected = driver.read_acceleration_raw().unwrap();
    assert_eq!(corrected.to_array(), [0, 0, 16384]);
}

#[test]
fn test_cancellation_is_idempotent() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_factory_bias([5000, -3000, 1200]);
    bus.set_accel_data(160, -96, 16704);

    let first = driver.accelerometer_offset_cancellation(20).unwrap();
    let second = driver.accelerometer_offset_cancellation(20).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_reserved_bit_preserved() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_factory_bias([101, 0, 0]);
    bus.set_accel_data(16, 0, 16384);

    let offset = driver.accelerometer_offset_cancellation(10).unwrap();

    assert_eq!(offset[0], 99);
    assert_eq!(bus.get_register(0x78) & 1, 1);
}

#[test]
fn test_averages_noisy_samples() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_factory_bias([0, 0, 0]);
    bus.set_accel_sequence(vec![
        [150, -90, 16700],
        [170, -102, 16708],
    ]);

    let offset = driver.accelerometer_offset(10).unwrap();

    assert_eq!(offset, [-20, 12, -40]);
}

#[test]
fn test_other_orientation_and_scale() {
    let config = Config {
        orientation: Orientation::XPlus,
        accelerometer_scale: AccelScale::G16,
        ..Config::default()
    };
    let (mut driver, bus, _) = create_mock_driver_with(config);
    driver.init(false).unwrap();
    // Gravity reads -1 g on X, 6 LSB high
    bus.set_accel_data(-2042, 0, 0);

    let offset = driver.accelerometer_offset(10).unwrap();

    assert_eq!(offset, [-6, 0, 0]);
}

#[test]
fn test_zero_samples_rejected() {
    let (mut driver, bus) = create_initialized_driver();

    assert!(matches!(
        driver.accelerometer_offset_cancellation(0),
        Err(Error::InvalidConfig)
    ));
    assert!(bus.operations().is_empty());
}

#[test]
fn test_set_accelerometer_offset() {
    let (mut driver, bus) = create_initialized_driver();

    driver.set_accelerometer_offset([-2, 300, -4000]).unwrap();

    assert_eq!(bus.get_register_i16(0x77), -2);
    assert_eq!(bus.get_register_i16(0x7A), 300);
    assert_eq!(bus.get_register_i16(0x7D), -4000);
    assert_eq!(bus.operations().len(), 3);
}

#[test]
fn test_longest_sample_run() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_factory_bias([5000, -3000, 1200]);
    bus.set_accel_sequence(vec![[160, -96, 16703], [160, -96, 16705]]);

    let offset = driver.accelerometer_offset(u16::MAX).unwrap();

    assert_eq!(offset, [4980, -2988, 1160]);
}
