/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Operating parameters of the sensor and their control register encoding.
//!
//! Every parameter set is closed: the discriminants are the codes from the
//! BME280 datasheet (section 5.4) and a raw integer only becomes a parameter
//! through `TryFrom<u8>`, which rejects anything outside the named set.

/// Which parameter set a rejected raw code was meant for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parameter {
    OperationMode,
    Oversampling,
    FilterCoefficient,
    StandbyInterval,
}

/// A raw code that is not a member of the expected parameter set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidCode {
    pub parameter: Parameter,
    pub code: u8,
}

impl InvalidCode {
    const fn new(parameter: Parameter, code: u8) -> Self {
        Self { parameter, code }
    }
}

/// Sensor mode, `mode[1:0]` of ctrl_meas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperationMode {
    /// No measurements, lowest power
    Sleep = 0x00,
    /// One measurement cycle, then back to sleep
    Forced = 0x01,
    /// Measure, wait the standby interval, repeat
    Normal = 0x03,
}

/// Samples averaged per measurement, used for `osrs_t`, `osrs_p` and `osrs_h`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OversamplingMode {
    /// Measurement skipped, output set to 0x80000
    Skipped = 0x00,
    X1 = 0x01,
    X2 = 0x02,
    X4 = 0x03,
    X8 = 0x04,
    X16 = 0x05,
}

/// IIR filter coefficient
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IIRFilterCoefficient {
    Off = 0x00,
    X2 = 0x01,
    X4 = 0x02,
    X8 = 0x03,
    X16 = 0x04,
}

/// Inactive duration between measurements in normal mode.
///
/// The codes are not ordered by duration: 10 ms and 20 ms sit at the end of
/// the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StandbyInterval {
    Ms0_5 = 0x00,
    Ms62_5 = 0x01,
    Ms125 = 0x02,
    Ms250 = 0x03,
    Ms500 = 0x04,
    Ms1000 = 0x05,
    Ms10 = 0x06,
    Ms20 = 0x07,
}

impl OperationMode {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl OversamplingMode {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Number of samples taken, zero when the channel is skipped
    pub const fn samples(self) -> u8 {
        match self {
            OversamplingMode::Skipped => 0,
            OversamplingMode::X1 => 1,
            OversamplingMode::X2 => 2,
            OversamplingMode::X4 => 4,
            OversamplingMode::X8 => 8,
            OversamplingMode::X16 => 16,
        }
    }
}

impl IIRFilterCoefficient {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl StandbyInterval {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn duration_us(self) -> u32 {
        match self {
            StandbyInterval::Ms0_5 => 500,
            StandbyInterval::Ms62_5 => 62_500,
            StandbyInterval::Ms125 => 125_000,
            StandbyInterval::Ms250 => 250_000,
            StandbyInterval::Ms500 => 500_000,
            StandbyInterval::Ms1000 => 1_000_000,
            StandbyInterval::Ms10 => 10_000,
            StandbyInterval::Ms20 => 20_000,
        }
    }
}

impl TryFrom<u8> for OperationMode {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(OperationMode::Sleep),
            0x01 => Ok(OperationMode::Forced),
            0x03 => Ok(OperationMode::Normal),
            _ => Err(InvalidCode::new(Parameter::OperationMode, code)),
        }
    }
}

impl TryFrom<u8> for OversamplingMode {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(OversamplingMode::Skipped),
            0x01 => Ok(OversamplingMode::X1),
            0x02 => Ok(OversamplingMode::X2),
            0x03 => Ok(OversamplingMode::X4),
            0x04 => Ok(OversamplingMode::X8),
            0x05 => Ok(OversamplingMode::X16),
            _ => Err(InvalidCode::new(Parameter::Oversampling, code)),
        }
    }
}

impl TryFrom<u8> for IIRFilterCoefficient {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(IIRFilterCoefficient::Off),
            0x01 => Ok(IIRFilterCoefficient::X2),
            0x02 => Ok(IIRFilterCoefficient::X4),
            0x03 => Ok(IIRFilterCoefficient::X8),
            0x04 => Ok(IIRFilterCoefficient::X16),
            _ => Err(InvalidCode::new(Parameter::FilterCoefficient, code)),
        }
    }
}

impl TryFrom<u8> for StandbyInterval {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(StandbyInterval::Ms0_5),
            0x01 => Ok(StandbyInterval::Ms62_5),
            0x02 => Ok(StandbyInterval::Ms125),
            0x03 => Ok(StandbyInterval::Ms250),
            0x04 => Ok(StandbyInterval::Ms500),
            0x05 => Ok(StandbyInterval::Ms1000),
            0x06 => Ok(StandbyInterval::Ms10),
            0x07 => Ok(StandbyInterval::Ms20),
            _ => Err(InvalidCode::new(Parameter::StandbyInterval, code)),
        }
    }
}

/// Recommended modes of operation, BME280 datasheet section 3.5.
///
/// | Preset            | Mode   | osrs_t | osrs_p  | osrs_h  | Filter |
/// |-------------------|--------|--------|---------|---------|--------|
/// | WeatherMonitoring | Forced | x1     | x1      | x1      | off    |
/// | HumiditySensing   | Forced | x1     | skipped | x1      | off    |
/// | IndoorNavigation  | Normal | x2     | x16     | x1      | x16    |
/// | Gaming            | Normal | x1     | x4      | skipped | x16    |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorConfigPreset {
    WeatherMonitoring,
    HumiditySensing,
    IndoorNavigation,
    Gaming,
}

/// The six operating parameters written to the control registers during
/// device initialization.
///
/// Every field always holds a member of its parameter set, so the `build_*`
/// encoders can never produce a reserved code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    operation_mode: OperationMode,
    temperature_oversampling: OversamplingMode,
    pressure_oversampling: OversamplingMode,
    humidity_oversampling: OversamplingMode,
    filter_coefficient: IIRFilterCoefficient,
    standby_interval: StandbyInterval,
}

impl SensorConfig {
    pub const fn new(
        operation_mode: OperationMode,
        temperature_oversampling: OversamplingMode,
        pressure_oversampling: OversamplingMode,
        humidity_oversampling: OversamplingMode,
        filter_coefficient: IIRFilterCoefficient,
        standby_interval: StandbyInterval,
    ) -> Self {
        Self {
            operation_mode,
            temperature_oversampling,
            pressure_oversampling,
            humidity_oversampling,
            filter_coefficient,
            standby_interval,
        }
    }

    /// Configuration for one of the datasheet use cases.
    ///
    /// `standby` only matters for the presets that run in normal mode.
    pub const fn from_preset(
        preset: SensorConfigPreset,
        standby: StandbyInterval,
    ) -> Self {
        match preset {
            SensorConfigPreset::WeatherMonitoring => Self::new(
                OperationMode::Forced,
                OversamplingMode::X1,
                OversamplingMode::X1,
                OversamplingMode::X1,
                IIRFilterCoefficient::Off,
                standby,
            ),
            SensorConfigPreset::HumiditySensing => Self::new(
                OperationMode::Forced,
                OversamplingMode::X1,
                OversamplingMode::Skipped,
                OversamplingMode::X1,
                IIRFilterCoefficient::Off,
                standby,
            ),
            SensorConfigPreset::IndoorNavigation => Self::new(
                OperationMode::Normal,
                OversamplingMode::X2,
                OversamplingMode::X16,
                OversamplingMode::X1,
                IIRFilterCoefficient::X16,
                standby,
            ),
            SensorConfigPreset::Gaming => Self::new(
                OperationMode::Normal,
                OversamplingMode::X1,
                OversamplingMode::X4,
                OversamplingMode::Skipped,
                IIRFilterCoefficient::X16,
                standby,
            ),
        }
    }

    /// Decode the values held by the three control registers.
    ///
    /// Inverse of the `build_*` encoders. Fails if any field holds a code
    /// that is reserved in the datasheet.
    pub fn from_registers(
        ctrl_hum: u8,
        ctrl_meas: u8,
        config: u8,
    ) -> Result<Self, InvalidCode> {
        Ok(Self {
            operation_mode: OperationMode::try_from(ctrl_meas & 0b11)?,
            temperature_oversampling: OversamplingMode::try_from(
                (ctrl_meas >> 5) & 0b111,
            )?,
            pressure_oversampling: OversamplingMode::try_from(
                (ctrl_meas >> 2) & 0b111,
            )?,
            humidity_oversampling: OversamplingMode::try_from(
                ctrl_hum & 0b111,
            )?,
            filter_coefficient: IIRFilterCoefficient::try_from(
                (config >> 1) & 0b111,
            )?,
            standby_interval: StandbyInterval::try_from((config >> 4) & 0b111)?,
        })
    }

    pub fn set_operation_mode(&mut self, mode: OperationMode) {
        self.operation_mode = mode;
    }

    pub fn set_temperature_oversampling(&mut self, mode: OversamplingMode) {
        self.temperature_oversampling = mode;
    }

    pub fn set_pressure_oversampling(&mut self, mode: OversamplingMode) {
        self.pressure_oversampling = mode;
    }

    pub fn set_humidity_oversampling(&mut self, mode: OversamplingMode) {
        self.humidity_oversampling = mode;
    }

    pub fn set_filter_coefficient(
        &mut self,
        coefficient: IIRFilterCoefficient,
    ) {
        self.filter_coefficient = coefficient;
    }

    pub fn set_standby_interval(&mut self, interval: StandbyInterval) {
        self.standby_interval = interval;
    }

    pub const fn operation_mode(&self) -> OperationMode {
        self.operation_mode
    }

    pub const fn temperature_oversampling(&self) -> OversamplingMode {
        self.temperature_oversampling
    }

    pub const fn pressure_oversampling(&self) -> OversamplingMode {
        self.pressure_oversampling
    }

    pub const fn humidity_oversampling(&self) -> OversamplingMode {
        self.humidity_oversampling
    }

    pub const fn filter_coefficient(&self) -> IIRFilterCoefficient {
        self.filter_coefficient
    }

    pub const fn standby_interval(&self) -> StandbyInterval {
        self.standby_interval
    }

    /// ctrl_meas (0xF4): mode in bits [1:0], `osrs_p` in [4:2],
    /// `osrs_t` in [7:5]
    pub const fn build_ctrl_meas_register(&self) -> u8 {
        self.operation_mode.code()
            | (self.pressure_oversampling.code() << 2)
            | (self.temperature_oversampling.code() << 5)
    }

    /// ctrl_hum (0xF2): `osrs_h` in bits [2:0], the rest reserved
    pub const fn build_ctrl_hum_register(&self) -> u8 {
        self.humidity_oversampling.code()
    }

    /// config (0xF5): filter in bits [3:1], standby in [6:4].
    /// Bit 0 enables the 3-wire SPI interface and is always cleared.
    pub const fn build_config_register(&self) -> u8 {
        let spi3w_en = 0;
        spi3w_en
            | (self.filter_coefficient.code() << 1)
            | (self.standby_interval.code() << 4)
    }

    /// Worst-case duration of one measurement cycle in microseconds
    /// (datasheet appendix 9.1).
    pub const fn max_measurement_time_us(&self) -> u32 {
        let temperature = self.temperature_oversampling.samples() as u32;
        let mut time_us = 1250 + 2300 * temperature;
        let pressure = self.pressure_oversampling.samples() as u32;
        if pressure > 0 {
            time_us += 2300 * pressure + 575;
        }
        let humidity = self.humidity_oversampling.samples() as u32;
        if humidity > 0 {
            time_us += 2300 * humidity + 575;
        }
        time_us
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::new(
            OperationMode::Normal,
            OversamplingMode::X2,
            OversamplingMode::X16,
            OversamplingMode::X1,
            IIRFilterCoefficient::X16,
            StandbyInterval::Ms125,
        )
    }
}
