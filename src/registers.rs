//! Register definitions for the MPU-9250 / MPU-9255
//!
//! The package exposes two independent register maps:
//! - **MPU-925x** (accelerometer, gyroscope, thermometer) at `0x68 | AD0`, big-endian sensor outputs
//! - **AK8963** (magnetometer) at `0x0C`, little-endian sensor outputs, reachable once the
//!   primary chip is in bypass mode
//!
//! Single-byte configuration registers are declared through `device-driver` so every
//! field update is a typed read-modify-write. Multi-byte bursts (sensor outputs,
//! offset registers, fuse ROM) are accessed through the raw start addresses below.

/// `XG_OFFSET_H` - Gyroscope X offset, high byte (Y at 0x15, Z at 0x17)
pub const XG_OFFSET_H: u8 = 0x13;

/// `ACCEL_XOUT_H` - First byte of the 6-byte accelerometer output burst
pub const ACCEL_XOUT_H: u8 = 0x3B;

/// `TEMP_OUT_H` - First byte of the 2-byte temperature output burst
pub const TEMP_OUT_H: u8 = 0x41;

/// `GYRO_XOUT_H` - First byte of the 6-byte gyroscope output burst
pub const GYRO_XOUT_H: u8 = 0x43;

/// `XA_OFFSET_H` - Accelerometer X bias, high byte (Y at 0x7A, Z at 0x7D)
///
/// The three bias pairs are spaced three bytes apart, so an 8-byte burst from
/// this address covers all of them.
pub const XA_OFFSET_H: u8 = 0x77;

device_driver::create_device!(
    device_name: Mpu9250,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// SMPLRT_DIV - Sample Rate Divider (0x19)
        /// Sample rate = internal rate / (1 + divider), only effective while the DLPF is in use
        register SmplrtDiv {
            const ADDRESS = 0x19;
            const SIZE_BITS = 8;

            /// Sample rate divider
            smplrt_div: uint = 0..8,
        },

        /// CONFIG - Configuration (0x1A)
        register Configuration {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Gyroscope and temperature DLPF configuration
            dlpf_cfg: uint = 0..3,
            /// FSYNC pin sampling
            ext_sync_set: uint = 3..6,
            /// FIFO mode: stop writing when full
            fifo_mode: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// GYRO_CONFIG - Gyroscope Configuration (0x1B)
        register GyroConfig {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            /// Inverted DLPF bypass select (0b00 enables the DLPF)
            fchoice_b: uint = 0..2,
            reserved_2: uint = 2..3,
            /// Full-scale select (0=±250, 1=±500, 2=±1000, 3=±2000 dps)
            gyro_fs_sel: uint = 3..5,
            /// Z-axis self-test
            zg_st: bool = 5,
            /// Y-axis self-test
            yg_st: bool = 6,
            /// X-axis self-test
            xg_st: bool = 7,
        },

        /// ACCEL_CONFIG - Accelerometer Configuration (0x1C)
        register AccelConfig {
            const ADDRESS = 0x1C;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full-scale select (0=±2g, 1=±4g, 2=±8g, 3=±16g)
            accel_fs_sel: uint = 3..5,
            /// Z-axis self-test
            az_st_en: bool = 5,
            /// Y-axis self-test
            ay_st_en: bool = 6,
            /// X-axis self-test
            ax_st_en: bool = 7,
        },

        /// ACCEL_CONFIG_2 - Accelerometer Configuration 2 (0x1D)
        register AccelConfig2 {
            const ADDRESS = 0x1D;
            const SIZE_BITS = 8;

            /// Accelerometer DLPF configuration
            a_dlpfcfg: uint = 0..3,
            /// Inverted DLPF bypass select (true bypasses the DLPF, 1.13 kHz bandwidth)
            accel_fchoice_b: bool = 3,
            reserved_7_4: uint = 4..8,
        },

        /// INT_PIN_CFG - Interrupt Pin / Bypass Configuration (0x37)
        register IntPinCfg {
            const ADDRESS = 0x37;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Route the auxiliary I2C bus straight to the host bus
            bypass_en: bool = 1,
            /// FSYNC as interrupt
            fsync_int_mode_en: bool = 2,
            /// FSYNC active low
            actl_fsync: bool = 3,
            /// Clear interrupt status on any read
            int_anyrd_2clear: bool = 4,
            /// Latch INT pin until cleared
            latch_int_en: bool = 5,
            /// INT pin open drain
            open: bool = 6,
            /// INT pin active low
            actl: bool = 7,
        },

        /// USER_CTRL - User Control (0x6A)
        register UserCtrl {
            const ADDRESS = 0x6A;
            const SIZE_BITS = 8;

            /// Reset all signal paths
            sig_cond_rst: bool = 0,
            /// I2C master reset
            i2c_mst_rst: bool = 1,
            /// FIFO reset
            fifo_rst: bool = 2,
            reserved_3: uint = 3..4,
            /// Disable I2C slave interface (SPI only)
            i2c_if_dis: bool = 4,
            /// I2C master enable (mutually exclusive with bypass)
            i2c_mst_en: bool = 5,
            /// FIFO enable
            fifo_en: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// PWR_MGMT_1 - Power Management 1 (0x6B)
        register PwrMgmt1 {
            const ADDRESS = 0x6B;
            const SIZE_BITS = 8;

            /// Clock source select (0=internal 20MHz, 1=auto select PLL)
            clksel: uint = 0..3,
            /// Power down internal PTAT voltage generator
            pd_ptat: bool = 3,
            /// Gyro standby
            gyro_standby: bool = 4,
            /// Cycle mode
            cycle: bool = 5,
            /// Sleep mode enable
            sleep: bool = 6,
            /// Reset internal registers to default values
            h_reset: bool = 7,
        },

        /// WHO_AM_I - Device ID Register (0x75)
        /// Expected value: 0x71 (MPU-9250) or 0x73 (MPU-9255)
        register WhoAmI {
            const ADDRESS = 0x75;
            const SIZE_BITS = 8;

            /// Device ID
            who_am_i: uint = 0..8,
        }
    }
);

/// AK8963 magnetometer register definitions
///
/// The AK8963 sits behind the MPU-925x auxiliary I2C bus. With bypass enabled
/// it answers at its own address and uses little-endian output registers.
pub mod magnetometer {
    /// `HXL` - First byte of the 7-byte measurement burst (`HXL..HZH`, `ST2`)
    pub const HXL: u8 = 0x03;

    /// `ASAX` - First of the three fuse ROM sensitivity adjustment bytes
    pub const ASAX: u8 = 0x10;

    device_driver::create_device!(
        device_name: Ak8963,
        dsl: {
            config {
                type RegisterAddressType = u8;
                type DefaultByteOrder = LE;
            }

            /// WIA - Device ID (AK8963, 0x00)
            /// Expected value: 0x48
            register Wia {
                const ADDRESS = 0x00;
                const SIZE_BITS = 8;

                /// Device ID (should read 0x48)
                device_id: uint = 0..8,
            },

            /// ST1 - Status 1 (AK8963, 0x02)
            register St1 {
                const ADDRESS = 0x02;
                const SIZE_BITS = 8;

                /// Data ready
                drdy: bool = 0,
                /// Data overrun
                dor: bool = 1,
                reserved_7_2: uint = 2..8,
            },

            /// ST2 - Status 2 (AK8963, 0x09)
            register St2 {
                const ADDRESS = 0x09;
                const SIZE_BITS = 8;

                reserved_2_0: uint = 0..3,
                /// Magnetic sensor overflow
                hofl: bool = 3,
                /// Output bit setting mirror (true = 16-bit)
                bitm: bool = 4,
                reserved_7_5: uint = 5..8,
            },

            /// CNTL1 - Control 1 (AK8963, 0x0A)
            register Cntl1 {
                const ADDRESS = 0x0A;
                const SIZE_BITS = 8;

                /// Operation mode:
                /// 0b0000 = Power-down
                /// 0b0001 = Single measurement
                /// 0b0010 = Continuous 8Hz
                /// 0b0110 = Continuous 100Hz
                /// 0b0100 = External trigger
                /// 0b1000 = Self-test
                /// 0b1111 = Fuse ROM access
                mode: uint = 0..4,
                /// Output bit setting (false = 14-bit, true = 16-bit)
                bit_mode: bool = 4,
                reserved_7_5: uint = 5..8,
            },

            /// CNTL2 - Control 2 (AK8963, 0x0B)
            register Cntl2 {
                const ADDRESS = 0x0B;
                const SIZE_BITS = 8;

                /// Soft reset
                srst: bool = 0,
                reserved_7_1: uint = 1..8,
            }
        }
    );
}
