//! Unit tests for the two-chip initialization sequence

use crate::common::{AK8963, BusOp, assert_float_eq, create_mock_driver_with};
use mpu925x::{Config, Error, MagBitMode, MagMode};

#[test]
fn test_init_success_mpu9255() {
    let (mut driver, _bus, _) = create_mock_driver_with(Config::default());

    driver.init(false).unwrap();

    assert_eq!(driver.settings().general.address, 0x68);
    assert_eq!(driver.read_who_am_i().unwrap(), 0x73);
}

#[test]
fn test_init_success_mpu9250() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());
    bus.set_who_am_i(0x71);

    assert!(driver.init(false).is_ok());
}

#[test]
fn test_init_ad0_high_uses_alternative_address() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());
    bus.set_primary_address(0x69);

    driver.init(true).unwrap();

    assert_eq!(driver.settings().general.address, 0x69);
    assert!(!bus.touched(0x68));
}

#[test]
fn test_init_wrong_ad0_fails_on_bus() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());
    bus.set_primary_address(0x69);

    let result = driver.init(false);
    assert!(matches!(result, Err(Error::Bus(_))));
}

#[test]
fn test_init_primary_identity_mismatch() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());
    bus.set_who_am_i(0x70);

    let result = driver.init(false);

    assert!(matches!(result, Err(Error::PrimaryIdentityMismatch(0x70))));
    // The magnetometer must not be touched once the primary chip is rejected
    assert!(!bus.touched(AK8963));
}

#[test]
fn test_init_auxiliary_identity_mismatch() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());
    bus.set_mag_wia(0x00);

    let result = driver.init(false);

    assert!(matches!(result, Err(Error::AuxiliaryIdentityMismatch(0x00))));
}

#[test]
fn test_init_enables_bypass_and_disables_master() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());
    bus.set_register(0x6A, 0x20); // I2C_MST_EN left on by a previous user

    driver.init(false).unwrap();

    assert_eq!(bus.get_register(0x37), 1 << 1);
    assert_eq!(bus.get_register(0x6A) & (1 << 5), 0);
}

#[test]
fn test_init_resets_primary_first() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());

    driver.init(false).unwrap();

    let first = bus.operations().into_iter().next().unwrap();
    assert_eq!(
        first,
        BusOp::Write {
            address: 0x68,
            register: 0x6B,
            data: vec![0x80],
        }
    );
}

#[test]
fn test_init_applies_configured_defaults() {
    let config = Config {
        accelerometer_scale: mpu925x::AccelScale::G8,
        gyroscope_scale: mpu925x::GyroScale::Dps1000,
        ..Config::default()
    };
    let (mut driver, bus, _) = create_mock_driver_with(config);

    driver.init(false).unwrap();

    assert_eq!(bus.get_register(0x1C), 2 << 3);
    assert_eq!(bus.get_register(0x1B), 2 << 3);
    assert_eq!(bus.get_register(0x6B) & 0b111, 1); // Auto-select PLL
    assert_float_eq(driver.settings().accelerometer.lsb, 4096.0, 1e-6);
    assert_float_eq(driver.settings().gyroscope.lsb, 32.8, 1e-6);
}

#[test]
fn test_init_reads_sensitivity_adjustment() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());
    bus.set_fuse_rom([176, 128, 96]);

    driver.init(false).unwrap();

    let coefficient = driver.settings().magnetometer.coefficient;
    assert_float_eq(coefficient[0], 1.1875, 1e-6);
    assert_float_eq(coefficient[1], 1.0, 1e-6);
    assert_float_eq(coefficient[2], 0.875, 1e-6);
}

#[test]
fn test_init_leaves_magnetometer_in_continuous_16_bit() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());

    driver.init(false).unwrap();

    assert_eq!(bus.get_mag_register(0x0A), 0x16);
    assert_eq!(driver.settings().magnetometer.measurement_mode, MagMode::Continuous2);
    assert_eq!(driver.settings().magnetometer.bit_mode, MagBitMode::Bits16);
}

#[test]
fn test_init_fuse_rom_sequence() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());

    driver.init(false).unwrap();

    // CNTL1 writes in order: power-down, fuse ROM, power-down, continuous 2, 16-bit
    let cntl1_writes: Vec<u8> = bus
        .operations()
        .into_iter()
        .filter_map(|op| match op {
            BusOp::Write {
                address: AK8963,
                register: 0x0A,
                data,
            } => Some(data[0]),
            _ => None,
        })
        .collect();
    assert_eq!(cntl1_writes, vec![0x00, 0x0F, 0x00, 0x06, 0x16]);

    // The fuse ROM is read while in fuse ROM access mode
    assert_eq!(bus.read_count(AK8963, 0x10), 1);
}

#[test]
fn test_init_settle_delays() {
    let (mut driver, _bus, delay) = create_mock_driver_with(Config::default());

    driver.init(false).unwrap();

    // Two resets plus five magnetometer mode changes at 100 ms each
    assert_eq!(delay.total_ms(), 700);
}

#[test]
fn test_init_custom_settle_delays() {
    let config = Config {
        reset_delay_ms: 50,
        mode_change_delay_ms: 10,
        ..Config::default()
    };
    let (mut driver, _bus, delay) = create_mock_driver_with(config);

    driver.init(false).unwrap();

    assert_eq!(delay.total_ms(), 2 * 50 + 5 * 10);
}

#[test]
fn test_init_can_be_retried() {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());
    bus.set_mag_wia(0x00);
    assert!(driver.init(false).is_err());

    bus.set_mag_wia(0x48);
    assert!(driver.init(false).is_ok());
}
