//! DPS310 Register Definitions
//!
//! Register map for the Infineon DPS310 digital barometric pressure sensor.
//! Result registers are 24-bit two's complement, big-endian.

// =============================================================================
// I2C Addresses
// =============================================================================

/// DPS310 default I2C address (SDO = HIGH or floating)
pub const DPS310_ADDR: u8 = 0x77;

/// DPS310 alternate I2C address (SDO = LOW)
pub const DPS310_ADDR_ALT: u8 = 0x76;

// =============================================================================
// Result Registers
// =============================================================================

/// Pressure result, byte 2 (MSB). Bytes 1 and 0 follow.
pub const PRS_B2: u8 = 0x00;

/// Temperature result, byte 2 (MSB). Bytes 1 and 0 follow.
pub const TMP_B2: u8 = 0x03;

// =============================================================================
// Configuration Registers
// =============================================================================

/// Pressure measurement rate (bits 6:4) and oversampling (bits 3:0)
pub const PRS_CFG: u8 = 0x06;

/// Temperature sensor select (bit 7), rate (bits 6:4), oversampling (bits 2:0)
pub const TMP_CFG: u8 = 0x07;

/// External (MEMS) temperature sensor select bit in TMP_CFG
pub const TMP_CFG_TMP_EXT: u8 = 0x80;

/// Measurement mode and status
pub const MEAS_CFG: u8 = 0x08;

/// Coefficients available flag in MEAS_CFG
pub const MEAS_CFG_COEF_RDY: u8 = 0x80;

/// Sensor initialization complete flag in MEAS_CFG
pub const MEAS_CFG_SENSOR_RDY: u8 = 0x40;

/// Temperature measurement ready flag in MEAS_CFG
pub const MEAS_CFG_TMP_RDY: u8 = 0x20;

/// Pressure measurement ready flag in MEAS_CFG
pub const MEAS_CFG_PRS_RDY: u8 = 0x10;

/// Measurement mode: idle
pub const MODE_IDLE: u8 = 0x00;

/// Measurement mode: one-shot pressure
pub const MODE_COMMAND_PRS: u8 = 0x01;

/// Measurement mode: one-shot temperature
pub const MODE_COMMAND_TMP: u8 = 0x02;

/// Measurement mode: continuous background pressure + temperature
pub const MODE_BACKGROUND_ALL: u8 = 0x07;

/// Interrupt and FIFO configuration
pub const CFG_REG: u8 = 0x09;

/// Pressure result bit shift, required for oversampling above 8x
pub const CFG_P_SHIFT: u8 = 0x04;

/// Temperature result bit shift, required for oversampling above 8x
pub const CFG_T_SHIFT: u8 = 0x08;

/// Soft reset and FIFO flush
pub const RESET: u8 = 0x0C;

/// Value written to RESET: FIFO flush plus soft reset
pub const RESET_VALUE: u8 = 0x89;

// =============================================================================
// Identification
// =============================================================================

/// Product and revision ID
pub const PROD_ID: u8 = 0x0D;

/// Expected product ID value
pub const PROD_ID_VALUE: u8 = 0x10;

// =============================================================================
// Calibration Coefficients
// =============================================================================

/// First calibration coefficient register
pub const COEF: u8 = 0x10;

/// Length of the packed coefficient block
pub const COEF_LEN: usize = 18;

/// Coefficient source register
pub const COEF_SRCE: u8 = 0x28;

/// Set when the coefficients were calibrated with the external sensor
pub const COEF_SRCE_EXT: u8 = 0x80;

// =============================================================================
// Timing
// =============================================================================

/// Delay after soft reset before the sensor responds (ms)
pub const RESET_DELAY_MS: u32 = 40;

/// Interval between MEAS_CFG readiness polls at startup (ms)
pub const READY_POLL_INTERVAL_MS: u32 = 5;

/// Interval between measurement-ready polls (ms)
pub const MEASUREMENT_POLL_INTERVAL_MS: u32 = 10;
