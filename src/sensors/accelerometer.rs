//! Accelerometer sensor types and configuration
//!
//! Provides the full-scale table, filter settings and data types for the
//! MPU-925x's 3-axis accelerometer.

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelScale {
    /// ±2g range (most sensitive, least range)
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    G16 = 3,
}

impl AccelScale {
    /// Get the sensitivity in LSB/g (Least Significant Bit per g)
    ///
    /// This is used to convert raw sensor values to physical units.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::G2 => 16384.0, // LSB/g
            Self::G4 => 8192.0,  // LSB/g
            Self::G8 => 4096.0,  // LSB/g
            Self::G16 => 2048.0, // LSB/g
        }
    }

    /// Value of the `ACCEL_FS_SEL` field (bits [4:3] of `ACCEL_CONFIG`)
    #[must_use]
    pub const fn fs_sel(self) -> u8 {
        self as u8
    }
}

/// Accelerometer Digital Low Pass Filter (DLPF) configuration
///
/// Every filtered setting runs at a 1 kHz internal rate; `Bypass1130` skips the
/// filter and samples at 4 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelDlpf {
    /// DLPF bypassed, 1130 Hz bandwidth
    Bypass1130,
    /// 460 Hz bandwidth
    Hz460,
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
}

impl AccelDlpf {
    /// Value of the `A_DLPFCFG` field (bits [2:0] of `ACCEL_CONFIG_2`)
    #[must_use]
    pub const fn a_dlpfcfg(self) -> u8 {
        match self {
            Self::Bypass1130 | Self::Hz460 => 0,
            Self::Hz184 => 1,
            Self::Hz92 => 2,
            Self::Hz41 => 3,
            Self::Hz20 => 4,
            Self::Hz10 => 5,
            Self::Hz5 => 6,
        }
    }

    /// Value of the `ACCEL_FCHOICE_B` bit (bit 3 of `ACCEL_CONFIG_2`)
    #[must_use]
    pub const fn fchoice_b(self) -> bool {
        matches!(self, Self::Bypass1130)
    }
}

/// Accelerometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl AccelData {
    /// Decode the big-endian `ACCEL_XOUT_H..ACCEL_ZOUT_L` burst
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

/// Accelerometer data in physical units (g-force)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelDataG {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw` - Raw axis values
    /// * `sensitivity` - Sensitivity in LSB/g (from `AccelScale::sensitivity()`)
    #[must_use]
    pub fn from_raw(raw: AccelData, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw.x) / sensitivity,
            y: f32::from(raw.y) / sensitivity,
            z: f32::from(raw.z) / sensitivity,
        }
    }

    /// Get the magnitude of the acceleration vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
