//! Raw measurement block, status flags and the compensation seam.

use crate::constants::{
    MEASUREMENT_DATA_LEN, STATUS_IM_UPDATE, STATUS_MEASURING,
};

/// Output of a channel whose oversampling is set to skipped
pub const SKIPPED_ADC_VALUE: u32 = 0x80000;

/// Uncompensated ADC output, burst-read from 0xF7.
///
/// Layout: `press_msb, press_lsb, press_xlsb, temp_msb, temp_lsb, temp_xlsb,
/// hum_msb`.
/// The xlsb bytes carry their 4 data bits in [7:4].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawMeasurement {
    pub bytes: [u8; MEASUREMENT_DATA_LEN],
}

impl RawMeasurement {
    pub const fn new(bytes: [u8; MEASUREMENT_DATA_LEN]) -> Self {
        Self { bytes }
    }

    /// 20-bit `adc_P`
    pub const fn adc_pressure(&self) -> u32 {
        Self::unpack_20_bit(self.bytes[0], self.bytes[1], self.bytes[2])
    }

    /// 20-bit `adc_T`
    pub const fn adc_temperature(&self) -> u32 {
        Self::unpack_20_bit(self.bytes[3], self.bytes[4], self.bytes[5])
    }

    pub const fn humidity_msb(&self) -> u8 {
        self.bytes[6]
    }

    const fn unpack_20_bit(msb: u8, lsb: u8, xlsb: u8) -> u32 {
        ((msb as u32) << 12) | ((lsb as u32) << 4) | ((xlsb as u32) >> 4)
    }
}

/// Compensated readings.
///
/// Producing these needs the factory trimming parameters, which this driver
/// does not read yet; see [`crate::Bme280::read_measurement`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// degrees Celsius
    pub temperature: f32,
    /// Pascal
    pub pressure: f32,
    /// %RH
    pub humidity: f32,
}

/// Decoded STATUS register (0xF3)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// A conversion is running
    pub measuring: bool,
    /// NVM data is being copied to the image registers
    pub im_update: bool,
}

impl From<u8> for Status {
    fn from(reg: u8) -> Self {
        Self {
            measuring: reg & STATUS_MEASURING != 0,
            im_update: reg & STATUS_IM_UPDATE != 0,
        }
    }
}
