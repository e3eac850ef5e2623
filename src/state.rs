//! In-memory device state
//!
//! [`Settings`] mirrors what has been programmed into both chips, together with
//! the conversion divisors derived from it. [`SensorData`] keeps the last value
//! read from every channel. Both are owned by `Mpu925x` and only change after
//! the bus transactions backing them succeed.

use crate::MPU925X_BASE_ADDRESS;
use crate::config::{Config, Orientation};
use crate::sensors::magnetometer::MagBitMode;
use crate::sensors::thermometer::TEMPERATURE_SENSITIVITY;
use crate::sensors::{
    AccelData, AccelDataG, AccelScale, GyroData, GyroDataDps, GyroScale, MagData, MagDataUT,
    MagMode,
};

/// Bus and mounting settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GeneralSettings {
    /// Resolved 7-bit address of the primary chip
    pub address: u8,
    /// Gravity direction used by accelerometer offset cancellation
    pub orientation: Orientation,
}

/// Accelerometer settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelerometerSettings {
    /// Full-scale range
    pub scale: AccelScale,
    /// LSB per g for `scale`
    pub lsb: f32,
}

/// Gyroscope settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroscopeSettings {
    /// Full-scale range
    pub scale: GyroScale,
    /// LSB per °/s for `scale`
    pub lsb: f32,
}

/// Magnetometer settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagnetometerSettings {
    /// Measurement mode
    pub measurement_mode: MagMode,
    /// Output resolution
    pub bit_mode: MagBitMode,
    /// µT per LSB for `bit_mode`
    pub lsb: f32,
    /// Fuse ROM sensitivity adjustment per axis, read once during init
    pub coefficient: [f32; 3],
}

/// Thermometer settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermometerSettings {
    /// LSB per °C
    pub lsb: f32,
    /// Raw output at 21 °C
    pub room_temperature_offset: f32,
}

/// Current settings of both chips, grouped per subsystem
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Bus and mounting settings
    pub general: GeneralSettings,
    /// Accelerometer settings
    pub accelerometer: AccelerometerSettings,
    /// Gyroscope settings
    pub gyroscope: GyroscopeSettings,
    /// Magnetometer settings
    pub magnetometer: MagnetometerSettings,
    /// Thermometer settings
    pub thermometer: ThermometerSettings,
}

impl Settings {
    /// Settings as they stand before `init`
    ///
    /// Divisors already match the configured scales so conversions never run
    /// against zero.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            general: GeneralSettings {
                address: MPU925X_BASE_ADDRESS,
                orientation: config.orientation,
            },
            accelerometer: AccelerometerSettings {
                scale: config.accelerometer_scale,
                lsb: config.accelerometer_scale.sensitivity(),
            },
            gyroscope: GyroscopeSettings {
                scale: config.gyroscope_scale,
                lsb: config.gyroscope_scale.sensitivity(),
            },
            magnetometer: MagnetometerSettings {
                measurement_mode: config.magnetometer_mode,
                bit_mode: config.magnetometer_bit_mode,
                lsb: config.magnetometer_bit_mode.resolution(),
                coefficient: [1.0; 3],
            },
            thermometer: ThermometerSettings {
                lsb: TEMPERATURE_SENSITIVITY,
                room_temperature_offset: config.room_temperature_offset,
            },
        }
    }
}

/// Last readings of every channel, raw and converted
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorData {
    /// Raw acceleration
    pub acceleration_raw: AccelData,
    /// Acceleration in g
    pub acceleration: AccelDataG,
    /// Raw rotation rate
    pub rotation_raw: GyroData,
    /// Rotation rate in °/s
    pub rotation: GyroDataDps,
    /// Raw magnetic field
    pub magnetic_field_raw: MagData,
    /// Magnetic field in µT
    pub magnetic_field: MagDataUT,
    /// Raw temperature
    pub temperature_raw: i16,
    /// Temperature in °C
    pub temperature: f32,
}
