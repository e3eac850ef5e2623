//! Magnetometer sensor types and configuration
//!
//! Provides types, enums and conversion helpers for the AK8963 3-axis
//! magnetometer packaged with the MPU-925x.

/// Magnetometer operating mode (`MODE` field of `CNTL1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagMode {
    /// Power-down mode
    PowerDown = 0b0000,
    /// Single measurement mode
    Single = 0b0001,
    /// Continuous measurement mode 1 (8 Hz)
    Continuous1 = 0b0010,
    /// Continuous measurement mode 2 (100 Hz)
    Continuous2 = 0b0110,
    /// External trigger measurement mode
    ExternalTrigger = 0b0100,
    /// Self-test mode
    SelfTest = 0b1000,
    /// Fuse ROM access mode
    FuseRomAccess = 0b1111,
}

impl MagMode {
    /// Raw value of the `MODE` field
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Whether `ST1.DRDY` must be set before the measurement burst is read
    ///
    /// Continuous modes refresh the output registers on their own, single and
    /// self-test measurements complete once.
    #[must_use]
    pub const fn needs_data_ready_poll(self) -> bool {
        matches!(self, Self::Single | Self::SelfTest)
    }
}

/// Magnetometer output resolution (`BIT` field of `CNTL1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagBitMode {
    /// 14-bit output, 0.6 µT/LSB
    Bits14 = 0,
    /// 16-bit output, 0.15 µT/LSB
    Bits16 = 1,
}

impl MagBitMode {
    /// Get the resolution in µT/LSB
    ///
    /// Unlike the other sensors this is a multiplier, applied together with the
    /// fuse ROM sensitivity adjustment.
    #[must_use]
    pub const fn resolution(self) -> f32 {
        match self {
            Self::Bits14 => 4800.0 / 16383.0,
            Self::Bits16 => 4800.0 / 32767.0,
        }
    }

    /// Value of the `BIT` flag
    #[must_use]
    pub const fn is_16_bit(self) -> bool {
        matches!(self, Self::Bits16)
    }
}

/// Convert a fuse ROM `ASA` byte into a sensitivity adjustment coefficient
///
/// `Hadj = H * ((ASA - 128) * 0.5 / 128 + 1)`
#[must_use]
pub fn sensitivity_adjustment(asa: u8) -> f32 {
    (f32::from(asa) - 128.0) * 0.5 / 128.0 + 1.0
}

/// Magnetometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagData {
    /// X-axis magnetic field (raw)
    pub x: i16,
    /// Y-axis magnetic field (raw)
    pub y: i16,
    /// Z-axis magnetic field (raw)
    pub z: i16,
}

impl MagData {
    /// Decode the little-endian `HXL..HZH` burst
    #[must_use]
    pub const fn from_le_bytes(buffer: [u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([buffer[0], buffer[1]]),
            y: i16::from_le_bytes([buffer[2], buffer[3]]),
            z: i16::from_le_bytes([buffer[4], buffer[5]]),
        }
    }
}

/// Magnetometer data in microtesla (µT)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagDataUT {
    /// X-axis magnetic field in µT
    pub x: f32,
    /// Y-axis magnetic field in µT
    pub y: f32,
    /// Z-axis magnetic field in µT
    pub z: f32,
}

impl MagDataUT {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw` - Raw axis values
    /// * `resolution` - µT/LSB (from `MagBitMode::resolution()`)
    /// * `coefficient` - Per-axis fuse ROM sensitivity adjustment
    #[must_use]
    pub fn from_raw(raw: MagData, resolution: f32, coefficient: [f32; 3]) -> Self {
        Self {
            x: f32::from(raw.x) * resolution * coefficient[0],
            y: f32::from(raw.y) * resolution * coefficient[1],
            z: f32::from(raw.z) * resolution * coefficient[2],
        }
    }

    /// Get the magnitude of the magnetic field vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Heading in degrees (0-360) from the X/Y components, board held level
    #[must_use]
    pub fn heading(&self) -> f32 {
        let heading = libm::atan2f(self.y, self.x) * 180.0 / core::f32::consts::PI;
        if heading < 0.0 {
            heading + 360.0
        } else {
            heading
        }
    }
}
