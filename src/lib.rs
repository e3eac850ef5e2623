#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod calibration;
pub mod config;
pub mod device;
pub mod interface;
pub mod registers;
pub mod sensors;
pub mod state;

// Re-export main types
pub use config::{ClockSource, Config, Orientation};
pub use device::Mpu925x;
pub use interface::ChipInterface;
pub use sensors::{
    AccelData, AccelDataG, AccelDlpf, AccelScale, GyroData, GyroDataDps, GyroDataRps, GyroDlpf,
    GyroScale, MagBitMode, MagData, MagDataUT, MagMode,
};
pub use state::{SensorData, Settings};

/// MPU-925x base I2C address (AD0 pin low)
///
/// The AD0 strap is OR'd into bit 0, so a high AD0 pin gives `0x69`.
pub const MPU925X_BASE_ADDRESS: u8 = 0x68;

/// AK8963 I2C address, fixed, reachable while the MPU-925x is in bypass mode
pub const AK8963_ADDRESS: u8 = 0x0C;

/// `WHO_AM_I` value of the MPU-9250
pub const MPU9250_WHO_AM_I: u8 = 0x71;

/// `WHO_AM_I` value of the MPU-9255
pub const MPU9255_WHO_AM_I: u8 = 0x73;

/// Expected value of the AK8963 `WIA` register
pub const AK8963_WIA_VALUE: u8 = 0x48;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid MPU-925x `WHO_AM_I` value (contains the actual value read)
    PrimaryIdentityMismatch(u8),
    /// Invalid AK8963 `WIA` value (contains the actual value read)
    AuxiliaryIdentityMismatch(u8),
    /// Invalid configuration parameter
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
