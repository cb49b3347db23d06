// Register map, BME280 datasheet section 5.3 "Memory map"
pub const REG_CHIP_ID: u8 = 0xD0;
pub const REG_RESET: u8 = 0xE0;
pub const REG_CTRL_HUM: u8 = 0xF2;
pub const REG_STATUS: u8 = 0xF3;
pub const REG_CTRL_MEAS: u8 = 0xF4;
pub const REG_CONFIG: u8 = 0xF5;

// Burst start of the raw ADC block (press_msb .. hum_msb)
pub const REG_MEASUREMENT_DATA: u8 = 0xF7;
pub const MEASUREMENT_DATA_LEN: usize = 7;

// Writing this to REG_RESET runs the complete power-on-reset procedure
pub const RESET_COMMAND: u8 = 0xB6;
// The device does not answer until this much time has passed after a reset
pub const RESET_SETTLE_MS: u32 = 2;

// Value of REG_CHIP_ID on every BME280
pub const BME280_CHIP_ID: u8 = 0x60;

// SDO tied to GND / VDDIO
pub const ADDRESS_PRIMARY: u8 = 0x76;
pub const ADDRESS_SECONDARY: u8 = 0x77;
pub const MAX_SEVEN_BIT_ADDRESS: u8 = 0x7F;

// Highest register the auto-incrementing burst read may reach
pub const LAST_REGISTER: u8 = 0xFF;

// STATUS register bits
pub const STATUS_MEASURING: u8 = 1 << 3;
pub const STATUS_IM_UPDATE: u8 = 1 << 0;
