/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use crate::config::SensorConfig;
use crate::constants::*;
use crate::interface::AsyncSensorInterface;
use crate::measurement::RawMeasurement;
use crate::wrapper::{
    configure_writes, validate_address, validate_block, verify_chip_id,
};
use crate::Error;
#[cfg(feature = "defmt")]
use defmt::debug;
use embedded_hal_async::delay::DelayNs;

/// [`crate::Bme280`] for async buses.
///
/// Runs the same identify, reset, configure sequence. Other tasks may run
/// during the settle delay, but nothing else may use this bus address
/// until `new` returns.
pub struct Bme280Async<SI> {
    sensor_interface: SI,
    address: u8,
    config: SensorConfig,
    chip_id: u8,
}

impl<SI> Bme280Async<SI> {
    pub fn chip_id(&self) -> u8 {
        self.chip_id
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Returns previously consumed sensor interface.
    pub fn free(self) -> SI {
        self.sensor_interface
    }
}

impl<SI, SE> Bme280Async<SI>
where
    SI: AsyncSensorInterface<SensorError = SE>,
{
    pub async fn new(
        mut sensor_interface: SI,
        address: u8,
        config: SensorConfig,
        delay: &mut impl DelayNs,
    ) -> Result<Self, Error<SE>> {
        validate_address(address)?;

        let chip_id = sensor_interface
            .read_byte(address, REG_CHIP_ID)
            .await
            .map_err(Error::Comm)?;
        #[cfg(feature = "defmt")]
        debug!("chip id 0x{:X} at 0x{:X}", chip_id, address);
        verify_chip_id(chip_id)?;

        let mut device = Self {
            sensor_interface,
            address,
            config,
            chip_id,
        };
        device.reinit(delay).await?;
        Ok(device)
    }

    /// Reset, wait for the device to settle and write the stored configuration
    pub async fn reinit(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<(), Error<SE>> {
        #[cfg(feature = "defmt")]
        debug!("soft reset");
        self.write_register(REG_RESET, RESET_COMMAND).await?;
        delay.delay_ms(RESET_SETTLE_MS).await;

        for (register, value) in configure_writes(&self.config) {
            self.write_register(register, value).await?;
        }
        #[cfg(feature = "defmt")]
        debug!("configured {}", self.config);
        Ok(())
    }

    pub async fn read_register(
        &mut self,
        register: u8,
    ) -> Result<u8, Error<SE>> {
        self.sensor_interface
            .read_byte(self.address, register)
            .await
            .map_err(Error::Comm)
    }

    pub async fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Error<SE>> {
        self.sensor_interface
            .write_byte(self.address, register, value)
            .await
            .map_err(Error::Comm)
    }

    pub async fn read_block(
        &mut self,
        start_register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Error<SE>> {
        validate_block(start_register, buffer.len())?;
        self.sensor_interface
            .read_block(self.address, start_register, buffer)
            .await
            .map_err(Error::Comm)
    }

    pub async fn read_raw_measurement(
        &mut self,
    ) -> Result<RawMeasurement, Error<SE>> {
        let mut bytes = [0u8; MEASUREMENT_DATA_LEN];
        self.read_block(REG_MEASUREMENT_DATA, &mut bytes).await?;
        Ok(RawMeasurement::new(bytes))
    }
}
