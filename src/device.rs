//! High-level driver API for the MPU-925x
//!
//! This module provides the initialization sequence for both chips of the
//! package, the four sensor read paths and the runtime configuration setters.
//! Every operation goes straight to the bus and returns once the transaction
//! (and any settle delay) has completed.

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{ClockSource, Config};
use crate::interface::ChipInterface;
use crate::registers::magnetometer::{Ak8963, ASAX, HXL};
use crate::registers::{ACCEL_XOUT_H, GYRO_XOUT_H, Mpu9250, TEMP_OUT_H};
use crate::sensors::magnetometer::sensitivity_adjustment;
use crate::sensors::thermometer::to_celsius;
use crate::sensors::{
    AccelData, AccelDataG, AccelDlpf, AccelScale, GyroData, GyroDataDps, GyroDlpf, GyroScale,
    MagBitMode, MagData, MagDataUT, MagMode,
};
use crate::state::{SensorData, Settings};
use crate::{
    AK8963_ADDRESS, AK8963_WIA_VALUE, Error, MPU925X_BASE_ADDRESS, MPU9250_WHO_AM_I,
    MPU9255_WHO_AM_I,
};

/// `HOFL` bit of `ST2`, the last byte of the magnetometer measurement burst
const ST2_HOFL: u8 = 1 << 3;

/// Main driver for the MPU-9250 / MPU-9255
///
/// Owns the I2C bus and the delay provider for its whole lifetime. The AK8963
/// is addressed directly on the same bus once `init()` has enabled bypass mode.
pub struct Mpu925x<I2C, D> {
    i2c: I2C,
    delay: D,
    config: Config,
    settings: Settings,
    sensor_data: SensorData,
}

impl<I2C, D, E> Mpu925x<I2C, D>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
{
    /// Create a new driver instance
    ///
    /// No bus traffic happens here. Call `init()` before anything else.
    ///
    /// # Arguments
    ///
    /// * `i2c` - The I2C bus both chips are connected to
    /// * `delay` - Delay provider used for reset and mode-change settle times
    /// * `config` - Defaults applied during `init()`
    pub fn new(i2c: I2C, delay: D, config: Config) -> Self {
        Self {
            i2c,
            delay,
            config,
            settings: Settings::from_config(&config),
            sensor_data: SensorData::default(),
        }
    }

    /// Initialize both chips
    ///
    /// Resets the MPU-925x, verifies its identity, enables bypass mode, applies
    /// the configured scales and clock source, then resets and verifies the
    /// AK8963, reads its fuse ROM sensitivity adjustment and starts the
    /// configured measurement mode.
    ///
    /// A failed init leaves both chips partially configured. Retry from the
    /// start rather than resuming.
    ///
    /// # Arguments
    ///
    /// * `ad0` - Level of the AD0 strap pin (selects `0x68` or `0x69`)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with either chip fails
    /// - `WHO_AM_I` is neither 0x71 nor 0x73 (the AK8963 is not touched then)
    /// - The AK8963 `WIA` register does not read 0x48
    pub fn init(&mut self, ad0: bool) -> Result<(), Error<E>> {
        self.settings.general.address = MPU925X_BASE_ADDRESS | u8::from(ad0);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "MPU-925x init at {=u8:#x}",
            self.settings.general.address
        );

        self.mpu().pwr_mgmt_1().write(|w| {
            w.set_h_reset(true);
        })?;
        self.delay.delay_ms(self.config.reset_delay_ms);

        let who_am_i = self.read_who_am_i()?;
        if !matches!(who_am_i, MPU9250_WHO_AM_I | MPU9255_WHO_AM_I) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unexpected WHO_AM_I {=u8:#x}", who_am_i);
            return Err(Error::PrimaryIdentityMismatch(who_am_i));
        }

        // Bypass and the internal I2C master are mutually exclusive
        self.mpu().int_pin_cfg().write(|w| {
            w.set_bypass_en(true);
        })?;
        self.mpu().user_ctrl().modify(|w| {
            w.set_i_2_c_mst_en(false);
        })?;

        let Config {
            accelerometer_scale,
            gyroscope_scale,
            clock_source,
            magnetometer_mode,
            magnetometer_bit_mode,
            ..
        } = self.config;

        self.set_accelerometer_scale(accelerometer_scale)?;
        self.set_gyroscope_scale(gyroscope_scale)?;
        self.set_clock_source(clock_source)?;

        self.ak().cntl_2().write(|w| {
            w.set_srst(true);
        })?;
        self.delay.delay_ms(self.config.reset_delay_ms);

        let wia = self.read_magnetometer_id()?;
        if wia != AK8963_WIA_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unexpected AK8963 WIA {=u8:#x}", wia);
            return Err(Error::AuxiliaryIdentityMismatch(wia));
        }

        self.read_sensitivity_adjustment()?;

        self.set_magnetometer_measurement_mode(magnetometer_mode)?;
        self.set_magnetometer_bit_mode(magnetometer_bit_mode)?;

        #[cfg(feature = "defmt")]
        defmt::info!("MPU-925x init complete");

        Ok(())
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0x71 for an MPU-9250 or 0x73 for an MPU-9255
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<E>> {
        let reg = self.mpu().who_am_i().read()?;
        Ok(reg.who_am_i())
    }

    /// Read the AK8963 `WIA` register
    ///
    /// Should return 0x48. Only reachable once bypass mode is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_magnetometer_id(&mut self) -> Result<u8, Error<E>> {
        let reg = self.ak().wia().read()?;
        Ok(reg.device_id())
    }

    // ==================== SENSOR READS ====================

    /// Read raw accelerometer data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_acceleration_raw(&mut self) -> Result<AccelData, Error<E>> {
        // Read all 6 bytes at once to prevent torn reads
        let buffer = self.read_burst::<6>(self.settings.general.address, ACCEL_XOUT_H)?;
        let raw = AccelData::from_be_bytes(buffer);
        self.sensor_data.acceleration_raw = raw;
        Ok(raw)
    }

    /// Read accelerometer data in g
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_acceleration(&mut self) -> Result<AccelDataG, Error<E>> {
        let raw = self.read_acceleration_raw()?;
        let data = AccelDataG::from_raw(raw, self.settings.accelerometer.lsb);
        self.sensor_data.acceleration = data;
        Ok(data)
    }

    /// Read raw gyroscope data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_rotation_raw(&mut self) -> Result<GyroData, Error<E>> {
        let buffer = self.read_burst::<6>(self.settings.general.address, GYRO_XOUT_H)?;
        let raw = GyroData::from_be_bytes(buffer);
        self.sensor_data.rotation_raw = raw;
        Ok(raw)
    }

    /// Read gyroscope data in °/s
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_rotation(&mut self) -> Result<GyroDataDps, Error<E>> {
        let raw = self.read_rotation_raw()?;
        let data = GyroDataDps::from_raw(raw, self.settings.gyroscope.lsb);
        self.sensor_data.rotation = data;
        Ok(data)
    }

    /// Read raw magnetometer data
    ///
    /// In single-measurement and self-test mode `ST1.DRDY` is checked first.
    /// A sample that is not ready yet, or that reports magnetic overflow in
    /// `ST2`, is dropped and the previous raw value is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_magnetic_field_raw(&mut self) -> Result<MagData, Error<E>> {
        if let Some(raw) = self.fetch_magnetic_field()? {
            self.sensor_data.magnetic_field_raw = raw;
        }
        Ok(self.sensor_data.magnetic_field_raw)
    }

    /// Read magnetometer data in µT, sensitivity adjustment applied
    ///
    /// Dropped samples (see [`read_magnetic_field_raw`](Self::read_magnetic_field_raw))
    /// leave both stored values untouched and return the previous µT value.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_magnetic_field(&mut self) -> Result<MagDataUT, Error<E>> {
        if let Some(raw) = self.fetch_magnetic_field()? {
            self.sensor_data.magnetic_field_raw = raw;
            self.sensor_data.magnetic_field = MagDataUT::from_raw(
                raw,
                self.settings.magnetometer.lsb,
                self.settings.magnetometer.coefficient,
            );
        }
        Ok(self.sensor_data.magnetic_field)
    }

    /// Check `ST1.DRDY` on the AK8963
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn magnetometer_data_ready(&mut self) -> Result<bool, Error<E>> {
        let st1 = self.ak().st_1().read()?;
        Ok(st1.drdy())
    }

    /// Read raw temperature
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature_raw(&mut self) -> Result<i16, Error<E>> {
        let buffer = self.read_burst::<2>(self.settings.general.address, TEMP_OUT_H)?;
        let raw = i16::from_be_bytes(buffer);
        self.sensor_data.temperature_raw = raw;
        Ok(raw)
    }

    /// Read temperature in degrees Celsius
    ///
    /// `°C = (TEMP_OUT - room_temperature_offset) / lsb + 21`, with the divisor
    /// taken from `settings().thermometer.lsb` (333.87 LSB/°C)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_temperature_raw()?;
        let celsius = to_celsius(
            raw,
            self.settings.thermometer.lsb,
            self.settings.thermometer.room_temperature_offset,
        );
        self.sensor_data.temperature = celsius;
        Ok(celsius)
    }

    /// Read every channel in raw form
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. Channels read
    /// before the failure keep their new values.
    pub fn read_all_raw(&mut self) -> Result<SensorData, Error<E>> {
        self.read_acceleration_raw()?;
        self.read_rotation_raw()?;
        self.read_magnetic_field_raw()?;
        self.read_temperature_raw()?;
        Ok(self.sensor_data)
    }

    /// Read every channel and convert to physical units
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. Channels read
    /// before the failure keep their new values.
    pub fn read_all(&mut self) -> Result<SensorData, Error<E>> {
        self.read_acceleration()?;
        self.read_rotation()?;
        self.read_magnetic_field()?;
        self.read_temperature()?;
        Ok(self.sensor_data)
    }

    // ==================== CONFIGURATION ====================

    /// Set the sample rate divider
    ///
    /// Sample rate = internal rate / (1 + `divider`), effective while the gyroscope
    /// DLPF is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sample_rate_divider(&mut self, divider: u8) -> Result<(), Error<E>> {
        self.mpu().smplrt_div().write(|w| {
            w.set_smplrt_div(divider);
        })?;
        Ok(())
    }

    /// Set clock source
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_clock_source(&mut self, source: ClockSource) -> Result<(), Error<E>> {
        self.mpu().pwr_mgmt_1().modify(|w| {
            w.set_clksel(source as u8);
        })?;
        Ok(())
    }

    /// Set the accelerometer full-scale range
    ///
    /// Updates `ACCEL_FS_SEL` and the stored LSB/g divisor together.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The stored
    /// settings are left unchanged in that case.
    pub fn set_accelerometer_scale(&mut self, scale: AccelScale) -> Result<(), Error<E>> {
        self.mpu().accel_config().modify(|w| {
            w.set_accel_fs_sel(scale.fs_sel());
        })?;

        self.settings.accelerometer.scale = scale;
        self.settings.accelerometer.lsb = scale.sensitivity();

        #[cfg(feature = "defmt")]
        defmt::debug!("Accelerometer scale set to {}", scale);

        Ok(())
    }

    /// Set the accelerometer digital low pass filter
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accelerometer_dlpf(&mut self, dlpf: AccelDlpf) -> Result<(), Error<E>> {
        self.mpu().accel_config_2().modify(|w| {
            w.set_accel_fchoice_b(dlpf.fchoice_b());
            w.set_a_dlpfcfg(dlpf.a_dlpfcfg());
        })?;
        Ok(())
    }

    /// Set the gyroscope full-scale range
    ///
    /// Updates `GYRO_FS_SEL` and the stored LSB/(°/s) divisor together.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The stored
    /// settings are left unchanged in that case.
    pub fn set_gyroscope_scale(&mut self, scale: GyroScale) -> Result<(), Error<E>> {
        self.mpu().gyro_config().modify(|w| {
            w.set_gyro_fs_sel(scale.fs_sel());
        })?;

        self.settings.gyroscope.scale = scale;
        self.settings.gyroscope.lsb = scale.sensitivity();

        #[cfg(feature = "defmt")]
        defmt::debug!("Gyroscope scale set to {}", scale);

        Ok(())
    }

    /// Set the gyroscope (and temperature) digital low pass filter
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyroscope_dlpf(&mut self, dlpf: GyroDlpf) -> Result<(), Error<E>> {
        self.mpu().gyro_config().modify(|w| {
            w.set_fchoice_b(dlpf.fchoice_b());
        })?;
        self.mpu().configuration().modify(|w| {
            w.set_dlpf_cfg(dlpf.dlpf_cfg());
        })?;
        Ok(())
    }

    /// Set the magnetometer measurement mode
    ///
    /// Blocks for the configured mode-change delay after the write.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_magnetometer_measurement_mode(&mut self, mode: MagMode) -> Result<(), Error<E>> {
        self.write_magnetometer_mode(mode)?;
        self.settings.magnetometer.measurement_mode = mode;

        #[cfg(feature = "defmt")]
        defmt::debug!("Magnetometer mode set to {}", mode);

        Ok(())
    }

    /// Set the magnetometer output resolution
    ///
    /// Blocks for the configured mode-change delay after the write.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The stored
    /// settings are left unchanged in that case.
    pub fn set_magnetometer_bit_mode(&mut self, bit_mode: MagBitMode) -> Result<(), Error<E>> {
        self.ak().cntl_1().modify(|w| {
            w.set_bit_mode(bit_mode.is_16_bit());
        })?;
        self.delay.delay_ms(self.config.mode_change_delay_ms);

        self.settings.magnetometer.bit_mode = bit_mode;
        self.settings.magnetometer.lsb = bit_mode.resolution();

        #[cfg(feature = "defmt")]
        defmt::debug!("Magnetometer bit mode set to {}", bit_mode);

        Ok(())
    }

    /// Set the raw temperature output that corresponds to 21 °C
    pub fn set_room_temperature_offset(&mut self, offset: f32) {
        self.settings.thermometer.room_temperature_offset = offset;
    }

    // ==================== STATE ====================

    /// Current settings of both chips
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Last values read from every channel
    pub const fn sensor_data(&self) -> &SensorData {
        &self.sensor_data
    }

    /// Consume the driver and return the bus and delay provider
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    // ==================== INTERNALS ====================

    /// Register view of the MPU-925x at the resolved address
    fn mpu(&mut self) -> Mpu9250<ChipInterface<'_, I2C>> {
        Mpu9250::new(ChipInterface::new(
            &mut self.i2c,
            self.settings.general.address,
        ))
    }

    /// Register view of the AK8963
    fn ak(&mut self) -> Ak8963<ChipInterface<'_, I2C>> {
        Ak8963::new(ChipInterface::new(&mut self.i2c, AK8963_ADDRESS))
    }

    /// Read `N` consecutive registers of the chip at `address`
    pub(crate) fn read_burst<const N: usize>(
        &mut self,
        address: u8,
        register: u8,
    ) -> Result<[u8; N], Error<E>> {
        let mut buffer = [0u8; N];
        #[allow(clippy::cast_possible_truncation)]
        let size_bits = (N * 8) as u32;
        ChipInterface::new(&mut self.i2c, address).read_register(
            register,
            size_bits,
            &mut buffer,
        )?;
        Ok(buffer)
    }

    /// Write consecutive registers of the MPU-925x starting at `register`
    pub(crate) fn write_burst(&mut self, register: u8, data: &[u8]) -> Result<(), Error<E>> {
        #[allow(clippy::cast_possible_truncation)]
        let size_bits = (data.len() * 8) as u32;
        ChipInterface::new(&mut self.i2c, self.settings.general.address).write_register(
            register,
            size_bits,
            data,
        )?;
        Ok(())
    }

    /// Read one magnetometer sample, `None` if it has to be dropped
    fn fetch_magnetic_field(&mut self) -> Result<Option<MagData>, Error<E>> {
        if self
            .settings
            .magnetometer
            .measurement_mode
            .needs_data_ready_poll()
            && !self.magnetometer_data_ready()?
        {
            #[cfg(feature = "defmt")]
            defmt::debug!("Magnetometer data not ready, keeping previous sample");
            return Ok(None);
        }

        // HXL..HZH followed by ST2; reading ST2 ends the measurement cycle
        let buffer = self.read_burst::<7>(AK8963_ADDRESS, HXL)?;
        if buffer[6] & ST2_HOFL != 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("Magnetometer overflow, keeping previous sample");
            return Ok(None);
        }

        Ok(Some(MagData::from_le_bytes([
            buffer[0], buffer[1], buffer[2], buffer[3], buffer[4], buffer[5],
        ])))
    }

    /// Write `CNTL1.MODE` and wait for the AK8963 to settle
    fn write_magnetometer_mode(&mut self, mode: MagMode) -> Result<(), Error<E>> {
        self.ak().cntl_1().modify(|w| {
            w.set_mode(mode.bits());
        })?;
        self.delay.delay_ms(self.config.mode_change_delay_ms);
        Ok(())
    }

    /// Load the per-axis sensitivity adjustment from the AK8963 fuse ROM
    ///
    /// The fuse ROM is only readable from power-down through fuse ROM access
    /// mode; the chip is left in power-down afterwards.
    fn read_sensitivity_adjustment(&mut self) -> Result<(), Error<E>> {
        self.write_magnetometer_mode(MagMode::PowerDown)?;
        self.write_magnetometer_mode(MagMode::FuseRomAccess)?;

        let asa = self.read_burst::<3>(AK8963_ADDRESS, ASAX)?;

        self.write_magnetometer_mode(MagMode::PowerDown)?;
        self.settings.magnetometer.measurement_mode = MagMode::PowerDown;

        let coefficient = asa.map(sensitivity_adjustment);
        self.settings.magnetometer.coefficient = coefficient;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "AK8963 sensitivity adjustment: {} {} {}",
            coefficient[0],
            coefficient[1],
            coefficient[2]
        );

        Ok(())
    }
}
