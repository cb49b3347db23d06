//! Bus capabilities consumed by the device wrappers.

pub mod i2c;
#[cfg(test)]
pub(crate) mod mock_i2c_port;

pub use self::i2c::I2cInterface;

/// Minimal register access a transport must provide.
///
/// Every call blocks until the transfer completes or fails. Errors are
/// returned as-is; the driver never retries.
pub trait SensorInterface {
    type SensorError;

    /// Read the single byte held by `register`
    fn read_byte(
        &mut self,
        address: u8,
        register: u8,
    ) -> Result<u8, Self::SensorError>;

    /// Write `value` into `register`
    fn write_byte(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), Self::SensorError>;

    /// Burst read `buffer.len()` consecutive registers starting at
    /// `start_register`
    fn read_block(
        &mut self,
        address: u8,
        start_register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::SensorError>;
}

/// Async flavor of [`SensorInterface`]
#[cfg(feature = "async")]
pub trait AsyncSensorInterface {
    type SensorError;

    async fn read_byte(
        &mut self,
        address: u8,
        register: u8,
    ) -> Result<u8, Self::SensorError>;

    async fn write_byte(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), Self::SensorError>;

    async fn read_block(
        &mut self,
        address: u8,
        start_register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::SensorError>;
}
