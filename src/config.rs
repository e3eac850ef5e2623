//! Construction-time driver configuration
//!
//! [`Config`] holds the defaults that `Mpu925x::init` programs into both chips
//! and the settle delays the sequencer waits after resets and mode changes.

use crate::sensors::{AccelScale, GyroScale, MagBitMode, MagMode};

/// Direction gravity points to in the sensor frame while the board is at rest
///
/// Only used by accelerometer offset cancellation to tell which axis carries
/// the 1 g reading. A board lying flat, component side up, is `ZMinus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Gravity along +X
    XPlus,
    /// Gravity along -X
    XMinus,
    /// Gravity along +Y
    YPlus,
    /// Gravity along -Y
    YMinus,
    /// Gravity along +Z
    ZPlus,
    /// Gravity along -Z (board flat, face up)
    #[default]
    ZMinus,
}

impl Orientation {
    /// Axis index (0 = X, 1 = Y, 2 = Z) and sign of the gravity compensation
    ///
    /// The sign is applied to one g worth of LSB and added to the measured mean.
    #[must_use]
    pub const fn gravity_axis(self) -> (usize, f32) {
        match self {
            Self::XPlus => (0, 1.0),
            Self::XMinus => (0, -1.0),
            Self::YPlus => (1, 1.0),
            Self::YMinus => (1, -1.0),
            Self::ZPlus => (2, 1.0),
            Self::ZMinus => (2, -1.0),
        }
    }
}

/// Clock source selection (`CLKSEL` field of `PWR_MGMT_1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal 20 MHz oscillator
    Internal20MHz = 0,
    /// Auto-select the gyroscope PLL when ready, else the internal oscillator
    #[default]
    AutoSelectPll = 1,
}

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Gravity direction used by accelerometer offset cancellation
    pub orientation: Orientation,
    /// Accelerometer full-scale range applied during init
    pub accelerometer_scale: AccelScale,
    /// Gyroscope full-scale range applied during init
    pub gyroscope_scale: GyroScale,
    /// Clock source applied during init
    pub clock_source: ClockSource,
    /// Magnetometer mode entered at the end of init
    pub magnetometer_mode: MagMode,
    /// Magnetometer output resolution applied at the end of init
    pub magnetometer_bit_mode: MagBitMode,
    /// Raw temperature output at 21 °C
    pub room_temperature_offset: f32,
    /// Wait after a chip reset, in milliseconds
    pub reset_delay_ms: u32,
    /// Wait after a magnetometer mode or bit-mode change, in milliseconds
    pub mode_change_delay_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            orientation: Orientation::ZMinus,
            accelerometer_scale: AccelScale::G2,
            gyroscope_scale: GyroScale::Dps250,
            clock_source: ClockSource::AutoSelectPll,
            magnetometer_mode: MagMode::Continuous2,
            magnetometer_bit_mode: MagBitMode::Bits16,
            room_temperature_offset: 0.0,
            reset_delay_ms: 100,
            mode_change_delay_ms: 100,
        }
    }
}
