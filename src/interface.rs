//! Bus interface for the MPU-925x package
//!
//! Both chips share one I2C bus. [`ChipInterface`] binds the bus to a single
//! slave address so the `device-driver` register API of each chip is routed to
//! the right physical target.

use device_driver::RegisterInterface;

/// Largest register burst written in one transaction
const MAX_WRITE_LEN: usize = 8;

/// I2C register interface for one chip of the package
///
/// Borrows the bus for the duration of a register operation. The driver builds
/// one per access, so the same bus serves the primary chip and the AK8963.
pub struct ChipInterface<'a, I2C> {
    i2c: &'a mut I2C,
    address: u8,
}

impl<'a, I2C> ChipInterface<'a, I2C> {
    /// Bind the bus to the chip answering at `address`
    pub const fn new(i2c: &'a mut I2C, address: u8) -> Self {
        Self { i2c, address }
    }
}

impl<I2C, E> RegisterInterface for ChipInterface<'_, I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        debug_assert!(
            write_data.len() <= MAX_WRITE_LEN,
            "register burst longer than MAX_WRITE_LEN"
        );
        let mut buffer = [0u8; MAX_WRITE_LEN + 1];
        buffer[0] = address;
        let len = write_data.len().min(MAX_WRITE_LEN);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}
