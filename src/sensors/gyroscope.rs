//! Gyroscope sensor types and configuration
//!
//! Provides types, enums, and utility functions for the MPU-925x's 3-axis gyroscope.

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroScale {
    /// ±250°/s range
    Dps250 = 0,
    /// ±500°/s range
    Dps500 = 1,
    /// ±1000°/s range
    Dps1000 = 2,
    /// ±2000°/s range
    Dps2000 = 3,
}

impl GyroScale {
    /// Get the sensitivity in LSB/(°/s)
    ///
    /// This is used to convert raw sensor values to physical units.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps250 => 131.0, // LSB/(°/s)
            Self::Dps500 => 65.5,  // LSB/(°/s)
            Self::Dps1000 => 32.8, // LSB/(°/s)
            Self::Dps2000 => 16.4, // LSB/(°/s)
        }
    }

    /// Value of the `GYRO_FS_SEL` field (bits [4:3] of `GYRO_CONFIG`)
    #[must_use]
    pub const fn fs_sel(self) -> u8 {
        self as u8
    }
}

/// Gyroscope Digital Low Pass Filter (DLPF) configuration
///
/// The two bypass settings are selected through `FCHOICE_B` in `GYRO_CONFIG`;
/// all others keep `FCHOICE_B = 0b00` and pick a `DLPF_CFG` value in `CONFIG`.
/// The same filter applies to the temperature sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroDlpf {
    /// DLPF bypassed, 8800 Hz bandwidth, 32 kHz sampling
    Bypass8800,
    /// DLPF bypassed, 3600 Hz bandwidth, 32 kHz sampling
    Bypass3600,
    /// 250 Hz bandwidth, 8 kHz sampling
    Hz250,
    /// 184 Hz bandwidth
    Hz184,
    /// 92 Hz bandwidth
    Hz92,
    /// 41 Hz bandwidth
    Hz41,
    /// 20 Hz bandwidth
    Hz20,
    /// 10 Hz bandwidth
    Hz10,
    /// 5 Hz bandwidth
    Hz5,
    /// 3600 Hz bandwidth, 8 kHz sampling
    Hz3600,
}

impl GyroDlpf {
    /// Value of the `FCHOICE_B` field (bits [1:0] of `GYRO_CONFIG`)
    #[must_use]
    pub const fn fchoice_b(self) -> u8 {
        match self {
            Self::Bypass8800 => 0b01,
            Self::Bypass3600 => 0b10,
            _ => 0b00,
        }
    }

    /// Value of the `DLPF_CFG` field (bits [2:0] of `CONFIG`)
    ///
    /// Ignored by the chip while one of the bypass settings is active.
    #[must_use]
    pub const fn dlpf_cfg(self) -> u8 {
        match self {
            Self::Bypass8800 | Self::Bypass3600 | Self::Hz250 => 0,
            Self::Hz184 => 1,
            Self::Hz92 => 2,
            Self::Hz41 => 3,
            Self::Hz20 => 4,
            Self::Hz10 => 5,
            Self::Hz5 => 6,
            Self::Hz3600 => 7,
        }
    }
}

/// Gyroscope data (raw 16-bit values)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

impl GyroData {
    /// Decode the big-endian `GYRO_XOUT_H..GYRO_ZOUT_L` burst
    #[must_use]
    pub const fn from_be_bytes(buffer: [u8; 6]) -> Self {
        Self {
            x: i16::from_be_bytes([buffer[0], buffer[1]]),
            y: i16::from_be_bytes([buffer[2], buffer[3]]),
            z: i16::from_be_bytes([buffer[4], buffer[5]]),
        }
    }

    /// Axes as an array, X first
    #[must_use]
    pub const fn to_array(self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw` - Raw axis values
    /// * `sensitivity` - Sensitivity in LSB/(°/s) (from `GyroScale::sensitivity()`)
    #[must_use]
    pub fn from_raw(raw: GyroData, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw.x) / sensitivity,
            y: f32::from(raw.y) / sensitivity,
            z: f32::from(raw.z) / sensitivity,
        }
    }

    /// Convert to radians per second
    #[must_use]
    pub fn to_radians_per_sec(&self) -> GyroDataRps {
        const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
        GyroDataRps {
            x: self.x * DEG_TO_RAD,
            y: self.y * DEG_TO_RAD,
            z: self.z * DEG_TO_RAD,
        }
    }

    /// Get the magnitude of the rotation rate vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Gyroscope data in radians per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataRps {
    /// X-axis rotation rate in rad/s
    pub x: f32,
    /// Y-axis rotation rate in rad/s
    pub y: f32,
    /// Z-axis rotation rate in rad/s
    pub z: f32,
}
