/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use crate::config::{OperationMode, SensorConfig};
use crate::constants::*;
use crate::interface::SensorInterface;
use crate::measurement::{Measurement, RawMeasurement, Status};
use crate::{Error, ValidationError};
#[cfg(feature = "defmt")]
use defmt::{debug, trace};
use embedded_hal::delay::DelayNs;

/// A BME280 that has been identified, reset and configured.
///
/// The only way to obtain one is [`Bme280::new`], which runs the whole
/// power-on sequence; a failure anywhere in it drops the partially set up
/// device together with the bus.
pub struct Bme280<SI> {
    pub(crate) sensor_interface: SI,
    address: u8,
    /// copy of the configuration last written to the device
    config: SensorConfig,
    chip_id: u8,
}

impl<SI> Bme280<SI> {
    /// Value read from the chip id register during construction
    pub fn chip_id(&self) -> u8 {
        self.chip_id
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Configuration the device was last programmed with
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Returns previously consumed sensor interface.
    pub fn free(self) -> SI {
        self.sensor_interface
    }
}

impl<SI, SE> Bme280<SI>
where
    SI: SensorInterface<SensorError = SE>,
{
    /// Identify, reset and configure the sensor at `address`.
    ///
    /// `config` is copied; changing the caller's value afterwards has no
    /// effect on the device.
    pub fn new(
        mut sensor_interface: SI,
        address: u8,
        config: SensorConfig,
        delay: &mut impl DelayNs,
    ) -> Result<Self, Error<SE>> {
        validate_address(address)?;

        let chip_id = sensor_interface
            .read_byte(address, REG_CHIP_ID)
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
        device.soft_reset(delay)?;
        device.configure()?;
        Ok(device)
    }

    /// Repeat the reset and configure steps with the stored configuration
    pub fn reinit(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<(), Error<SE>> {
        self.soft_reset(delay)?;
        self.configure()
    }

    /// Program a new configuration without resetting the device.
    ///
    /// The device is put to sleep first since writes to `config` may be
    /// ignored in normal mode. The stored configuration only changes once
    /// all writes went through.
    pub fn apply_config(
        &mut self,
        config: SensorConfig,
    ) -> Result<(), Error<SE>> {
        let mut sleeping = self.config;
        sleeping.set_operation_mode(OperationMode::Sleep);
        self.write_register(
            REG_CTRL_MEAS,
            sleeping.build_ctrl_meas_register(),
        )?;
        // the device sleeps from here on, even if a later write fails
        self.config = sleeping;
        self.write_config(&config)?;
        self.config = config;
        Ok(())
    }

    /// Read back and decode the three control registers
    pub fn read_active_config(&mut self) -> Result<SensorConfig, Error<SE>> {
        let ctrl_hum = self.read_register(REG_CTRL_HUM)?;
        let ctrl_meas = self.read_register(REG_CTRL_MEAS)?;
        let config = self.read_register(REG_CONFIG)?;
        Ok(SensorConfig::from_registers(ctrl_hum, ctrl_meas, config)?)
    }

    pub fn status(&mut self) -> Result<Status, Error<SE>> {
        self.read_register(REG_STATUS).map(Status::from)
    }

    /// Start a single measurement cycle, returning to sleep when done.
    ///
    /// Oversampling settings come from the stored configuration.
    pub fn trigger_measurement(&mut self) -> Result<(), Error<SE>> {
        let mut forced = self.config;
        forced.set_operation_mode(OperationMode::Forced);
        self.write_register(REG_CTRL_MEAS, forced.build_ctrl_meas_register())
    }

    /// Burst read the uncompensated ADC block
    pub fn read_raw_measurement(
        &mut self,
    ) -> Result<RawMeasurement, Error<SE>> {
        let mut bytes = [0u8; MEASUREMENT_DATA_LEN];
        self.read_block(REG_MEASUREMENT_DATA, &mut bytes)?;
        Ok(RawMeasurement::new(bytes))
    }

    /// Compensated temperature, pressure and humidity.
    ///
    /// Always fails with [`Error::NotImplemented`] and does not touch the bus.
    // TODO read the trimming parameters (0x88..0xA1, 0xE1..0xE7) once after
    // reset, cache them on the device and compensate read_raw_measurement()
    pub fn read_measurement(&mut self) -> Result<Measurement, Error<SE>> {
        Err(Error::NotImplemented)
    }

    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<SE>> {
        let value = self
            .sensor_interface
            .read_byte(self.address, register)
            .map_err(Error::Comm)?;
        #[cfg(feature = "defmt")]
        trace!("r 0x{:X} -> 0x{:X}", register, value);
        Ok(value)
    }

    pub fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Error<SE>> {
        #[cfg(feature = "defmt")]
        trace!("w 0x{:X} <- 0x{:X}", register, value);
        self.sensor_interface
            .write_byte(self.address, register, value)
            .map_err(Error::Comm)
    }

    /// Fill `buffer` from consecutive registers starting at `start_register`
    pub fn read_block(
        &mut self,
        start_register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Error<SE>> {
        validate_block(start_register, buffer.len())?;
        self.sensor_interface
            .read_block(self.address, start_register, buffer)
            .map_err(Error::Comm)
    }

    /// Issue the reset command and wait for the device to come back
    fn soft_reset(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<(), Error<SE>> {
        #[cfg(feature = "defmt")]
        debug!("soft reset");
        self.write_register(REG_RESET, RESET_COMMAND)?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    fn configure(&mut self) -> Result<(), Error<SE>> {
        let config = self.config;
        self.write_config(&config)
    }

    fn write_config(&mut self, config: &SensorConfig) -> Result<(), Error<SE>> {
        for (register, value) in configure_writes(config) {
            self.write_register(register, value)?;
        }
        #[cfg(feature = "defmt")]
        debug!("configured {}", config);
        Ok(())
    }
}

/// Register writes that program `config`, in the order they must be issued.
///
/// ctrl_hum only takes effect after the following ctrl_meas write.
pub(crate) fn configure_writes(config: &SensorConfig) -> [(u8, u8); 3] {
    [
        (REG_CONFIG, config.build_config_register()),
        (REG_CTRL_HUM, config.build_ctrl_hum_register()),
        (REG_CTRL_MEAS, config.build_ctrl_meas_register()),
    ]
}

pub(crate) fn validate_address<E>(address: u8) -> Result<(), Error<E>> {
    if address > MAX_SEVEN_BIT_ADDRESS {
        return Err(Error::Validation(ValidationError::InvalidAddress(
            address,
        )));
    }
    Ok(())
}

pub(crate) fn validate_block<E>(start: u8, len: usize) -> Result<(), Error<E>> {
    if len == 0 {
        return Err(Error::Validation(ValidationError::EmptyBlockRead));
    }
    if start as usize + len > LAST_REGISTER as usize + 1 {
        return Err(Error::Validation(ValidationError::BlockOutOfRange {
            start,
            len,
        }));
    }
    Ok(())
}

pub(crate) fn verify_chip_id<E>(chip_id: u8) -> Result<(), Error<E>> {
    if chip_id != BME280_CHIP_ID {
        return Err(Error::InvalidChipId(chip_id));
    }
    Ok(())
}
