//! Hardware offset cancellation for the accelerometer and gyroscope
//!
//! Both routines sample the sensor while the board is at rest, average the
//! readings with an overflow-safe running mean and write a compensating value
//! into the chip's offset registers, so corrected data comes straight out of
//! the output registers afterwards.
//!
//! ## Register units
//! - Accelerometer bias (`XA_OFFSET_H..`) is always in ±16g LSB (2048 LSB/g) and
//!   holds a factory trim that the correction is subtracted from. Bit 0 of each
//!   bias register is reserved and must be preserved.
//! - Gyroscope offset (`XG_OFFSET_H..`) adds `offset * 4 / 2^FS_SEL` LSB to the
//!   output at the current full-scale range.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::Orientation;
use crate::device::Mpu925x;
use crate::registers::{XA_OFFSET_H, XG_OFFSET_H};
use crate::sensors::{AccelScale, GyroScale};
use crate::Error;

/// Accelerometer bias register sensitivity in LSB/g
const ACCEL_BIAS_SENSITIVITY: f32 = AccelScale::G16.sensitivity();

/// Bias register start addresses (X, Y, Z), three bytes apart
const ACCEL_BIAS_REGISTERS: [u8; 3] = [XA_OFFSET_H, XA_OFFSET_H + 3, XA_OFFSET_H + 6];

/// Offset register start addresses (X, Y, Z), two bytes apart
const GYRO_OFFSET_REGISTERS: [u8; 3] = [XG_OFFSET_H, XG_OFFSET_H + 2, XG_OFFSET_H + 4];

/// Incremental mean that never accumulates a sum
///
/// Each sample moves the mean by `(sample - mean) / n`. The state is kept in
/// `f64` so a full `u16` run of full-scale samples stays well below 1 LSB of
/// drift.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunningMean {
    mean: f64,
    count: u32,
}

impl RunningMean {
    /// Empty mean
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mean: 0.0,
            count: 0,
        }
    }

    /// Fold one sample into the mean
    pub fn push(&mut self, sample: f32) {
        self.count = self.count.saturating_add(1);
        self.mean += (f64::from(sample) - self.mean) / f64::from(self.count);
    }

    /// Current mean (0.0 before the first sample)
    #[must_use]
    // Means of i16 samples always fit in f32
    #[allow(clippy::cast_possible_truncation)]
    pub fn mean(&self) -> f32 {
        self.mean as f32
    }

    /// Number of samples folded in
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }
}

/// Round half away from zero and saturate into the `i16` range
// Clamped value is guaranteed to fit in i16
#[allow(clippy::cast_possible_truncation)]
fn round_to_i16(value: f32) -> i16 {
    libm::roundf(value).clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

/// Compute new accelerometer bias register values
///
/// # Arguments
///
/// * `mean` - Averaged raw output per axis at `scale`
/// * `bias` - Current bias register contents
/// * `scale` - Full-scale range the samples were taken at
/// * `orientation` - Gravity direction, its 1 g is removed from the mean
#[must_use]
pub fn accelerometer_offset_from_mean(
    mean: [f32; 3],
    bias: [i16; 3],
    scale: AccelScale,
    orientation: Orientation,
) -> [i16; 3] {
    let lsb = scale.sensitivity();
    let (axis, sign) = orientation.gravity_axis();

    let mut residual = mean;
    residual[axis] += sign * lsb;

    let divider = lsb / ACCEL_BIAS_SENSITIVITY;
    core::array::from_fn(|i| bias[i].wrapping_sub(round_to_i16(residual[i] / divider) & !1))
}

/// Compute a new gyroscope offset register value for one axis
///
/// # Arguments
///
/// * `mean` - Averaged raw output at `scale`
/// * `current` - Current offset register contents
/// * `scale` - Full-scale range the samples were taken at
#[must_use]
pub fn gyroscope_offset_from_mean(mean: f32, current: i16, scale: GyroScale) -> i16 {
    let correction = round_to_i16(-mean / 4.0 * f32::from(1u8 << scale.fs_sel()));
    current.saturating_add(correction)
}

impl<I2C, D, E> Mpu925x<I2C, D>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
{
    /// Read the accelerometer bias registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accelerometer_bias(&mut self) -> Result<[i16; 3], Error<E>> {
        // XA_OFFSET_H, XA_OFFSET_L, -, YA_OFFSET_H, YA_OFFSET_L, -, ZA_OFFSET_H, ZA_OFFSET_L
        let buffer = self.read_burst::<8>(self.settings().general.address, XA_OFFSET_H)?;
        Ok([0, 3, 6].map(|i| i16::from_be_bytes([buffer[i], buffer[i + 1]])))
    }

    /// Measure the accelerometer and compute compensating bias register values
    ///
    /// The board must rest still in the configured orientation. Nothing is
    /// written; see [`set_accelerometer_offset`](Self::set_accelerometer_offset).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `samples` is zero
    /// - Communication with the device fails
    pub fn accelerometer_offset(&mut self, samples: u16) -> Result<[i16; 3], Error<E>> {
        if samples == 0 {
            return Err(Error::InvalidConfig);
        }

        let mut means = [RunningMean::new(); 3];
        for _ in 0..samples {
            let raw = self.read_acceleration_raw()?;
            for (mean, value) in means.iter_mut().zip(raw.to_array()) {
                mean.push(f32::from(value));
            }
        }

        let bias = self.accelerometer_bias()?;
        let settings = self.settings();

        Ok(accelerometer_offset_from_mean(
            means.map(|mean| mean.mean()),
            bias,
            settings.accelerometer.scale,
            settings.general.orientation,
        ))
    }

    /// Write the accelerometer bias registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accelerometer_offset(&mut self, offset: [i16; 3]) -> Result<(), Error<E>> {
        for (register, value) in ACCEL_BIAS_REGISTERS.into_iter().zip(offset) {
            self.write_burst(register, &value.to_be_bytes())?;
        }
        Ok(())
    }

    /// Measure and cancel the accelerometer offset
    ///
    /// Returns the values written to the bias registers.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `samples` is zero
    /// - Communication with the device fails
    pub fn accelerometer_offset_cancellation(
        &mut self,
        samples: u16,
    ) -> Result<[i16; 3], Error<E>> {
        let offset = self.accelerometer_offset(samples)?;
        self.set_accelerometer_offset(offset)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Accelerometer bias set to [{}, {}, {}]",
            offset[0],
            offset[1],
            offset[2]
        );

        Ok(offset)
    }

    /// Read the gyroscope offset registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gyroscope_offset_registers(&mut self) -> Result<[i16; 3], Error<E>> {
        let buffer = self.read_burst::<6>(self.settings().general.address, XG_OFFSET_H)?;
        Ok([0, 2, 4].map(|i| i16::from_be_bytes([buffer[i], buffer[i + 1]])))
    }

    /// Measure the gyroscope and compute compensating offset register values
    ///
    /// Each axis is sampled on its own, `samples` reads per axis. The result
    /// builds on the offsets already programmed, so repeated runs converge.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `samples` is zero
    /// - Communication with the device fails
    pub fn gyroscope_offset(&mut self, samples: u16) -> Result<[i16; 3], Error<E>> {
        if samples == 0 {
            return Err(Error::InvalidConfig);
        }

        let current = self.gyroscope_offset_registers()?;
        let scale = self.settings().gyroscope.scale;

        let mut offset = [0i16; 3];
        for (axis, value) in offset.iter_mut().enumerate() {
            let mut mean = RunningMean::new();
            for _ in 0..samples {
                let raw = self.read_rotation_raw()?;
                mean.push(f32::from(raw.to_array()[axis]));
            }
            *value = gyroscope_offset_from_mean(mean.mean(), current[axis], scale);
        }

        Ok(offset)
    }

    /// Write the gyroscope offset registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyroscope_offset(&mut self, offset: [i16; 3]) -> Result<(), Error<E>> {
        for (register, value) in GYRO_OFFSET_REGISTERS.into_iter().zip(offset) {
            self.write_burst(register, &value.to_be_bytes())?;
        }
        Ok(())
    }

    /// Measure and cancel the gyroscope offset
    ///
    /// Returns the values written to the offset registers.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `samples` is zero
    /// - Communication with the device fails
    pub fn gyroscope_offset_cancellation(&mut self, samples: u16) -> Result<[i16; 3], Error<E>> {
        let offset = self.gyroscope_offset(samples)?;
        self.set_gyroscope_offset(offset)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Gyroscope offset set to [{}, {}, {}]",
            offset[0],
            offset[1],
            offset[2]
        );

        Ok(offset)
    }
}
