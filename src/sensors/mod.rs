//! Sensor modules for the MPU-925x
//!
//! This module provides types, enums, and unit conversion tables for each sensor
//! in the package:
//! - Accelerometer (3-axis)
//! - Gyroscope (3-axis)
//! - Magnetometer (3-axis, AK8963)
//! - Thermometer (die temperature)
//!
//! All bus operations are performed through methods on `Mpu925x`.

pub mod accelerometer;
pub mod gyroscope;
pub mod magnetometer;
pub mod thermometer;

// Re-export main types
pub use accelerometer::{AccelData, AccelDataG, AccelDlpf, AccelScale};
pub use gyroscope::{GyroData, GyroDataDps, GyroDataRps, GyroDlpf, GyroScale};
pub use magnetometer::{MagBitMode, MagData, MagDataUT, MagMode};
