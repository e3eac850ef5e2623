//! Test utilities and helper functions

use crate::common::mock_bus::MockBus;
use mpu925x::{Config, Mpu925x};
use std::cell::Cell;
use std::rc::Rc;

/// Mock delay implementation for testing
///
/// Does not sleep. Clones share the running total of requested milliseconds so
/// tests can check settle times.
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    total_ms: Rc<Cell<u64>>,
}

impl MockDelay {
    /// Total milliseconds requested so far
    pub fn total_ms(&self) -> u64 {
        self.total_ms.get()
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms.set(self.total_ms.get() + u64::from(ns) / 1_000_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.total_ms.set(self.total_ms.get() + u64::from(us) / 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms.set(self.total_ms.get() + u64::from(ms));
    }
}

/// Driver type used throughout the tests
pub type TestDriver = Mpu925x<MockBus, MockDelay>;

/// Create a driver with the given configuration, not yet initialized
/// Returns (driver, bus, delay) where bus and delay share state with the driver
pub fn create_mock_driver_with(config: Config) -> (TestDriver, MockBus, MockDelay) {
    let bus = MockBus::new();
    let delay = MockDelay::default();
    let driver = Mpu925x::new(bus.clone(), delay.clone(), config);
    (driver, bus, delay)
}

/// Create a driver with default configuration and run `init(false)`
pub fn create_initialized_driver() -> (TestDriver, MockBus) {
    let (mut driver, bus, _) = create_mock_driver_with(Config::default());
    driver.init(false).expect("Failed to initialize mock driver");
    bus.clear_operations();
    (driver, bus)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}
