/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

#![no_std]
#![allow(async_fn_in_trait)]
extern crate embedded_hal;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
#[allow(dead_code)]
pub mod constants;
pub mod interface;
pub mod measurement;
pub mod wrapper;
#[cfg(feature = "async")]
pub mod wrapper_async;

pub use config::{
    IIRFilterCoefficient, InvalidCode, OperationMode, OversamplingMode,
    SensorConfig, SensorConfigPreset, StandbyInterval,
};
pub use wrapper::Bme280;
#[cfg(feature = "async")]
pub use wrapper_async::Bme280Async;

/// Errors in this crate
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<CommE> {
    /// Sensor communication error
    Comm(CommE),
    /// An argument was rejected before any bus access
    Validation(ValidationError),
    /// A raw code is not a member of the expected parameter set
    TypeMismatch(InvalidCode),
    /// The chip identifier register did not hold the BME280 id
    InvalidChipId(u8),
    /// Compensated measurements are not available
    NotImplemented,
}

impl<CommE> From<InvalidCode> for Error<CommE> {
    fn from(err: InvalidCode) -> Self {
        Error::TypeMismatch(err)
    }
}

/// Reasons an argument is refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// Not a 7-bit I2C address
    InvalidAddress(u8),
    /// A burst read of zero bytes
    EmptyBlockRead,
    /// The burst would run past the last register
    BlockOutOfRange { start: u8, len: usize },
}
