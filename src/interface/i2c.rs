use super::SensorInterface;
#[cfg(feature = "async")]
use super::AsyncSensorInterface;

/// Register access over an embedded-hal I2C bus.
///
/// A register read is a single write-read transaction (register pointer,
/// repeated start, data); a register write is one `[register, value]` write.
pub struct I2cInterface<I2C> {
    i2c_port: I2C,
}

impl<I2C> I2cInterface<I2C> {
    pub fn new(i2c_port: I2C) -> Self {
        Self { i2c_port }
    }

    /// Returns the bus handed to [`I2cInterface::new`]
    pub fn free(self) -> I2C {
        self.i2c_port
    }

    #[cfg(test)]
    pub(crate) fn port_mut(&mut self) -> &mut I2C {
        &mut self.i2c_port
    }
}

impl<I2C> SensorInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type SensorError = I2C::Error;

    fn read_byte(
        &mut self,
        address: u8,
        register: u8,
    ) -> Result<u8, Self::SensorError> {
        let mut buf = [0u8; 1];
        self.i2c_port.write_read(address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), Self::SensorError> {
        self.i2c_port.write(address, &[register, value])
    }

    fn read_block(
        &mut self,
        address: u8,
        start_register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::SensorError> {
        self.i2c_port.write_read(address, &[start_register], buffer)
    }
}

#[cfg(feature = "async")]
impl<I2C> AsyncSensorInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    type SensorError = I2C::Error;

    async fn read_byte(
        &mut self,
        address: u8,
        register: u8,
    ) -> Result<u8, Self::SensorError> {
        let mut buf = [0u8; 1];
        self.i2c_port
            .write_read(address, &[register], &mut buf)
            .await?;
        Ok(buf[0])
    }

    async fn write_byte(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), Self::SensorError> {
        self.i2c_port.write(address, &[register, value]).await
    }

    async fn read_block(
        &mut self,
        address: u8,
        start_register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::SensorError> {
        self.i2c_port
            .write_read(address, &[start_register], buffer)
            .await
    }
}
