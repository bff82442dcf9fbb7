//! VCNL4010 Register Definitions
//!
//! Register map for the Vishay VCNL4010 proximity and ambient light
//! sensor. Result registers are 16-bit big-endian pairs.

// =============================================================================
// I2C Address (fixed)
// =============================================================================

/// VCNL4010 I2C address
pub const VCNL4010_ADDR: u8 = 0x13;

// =============================================================================
// Command Register (0x80)
// =============================================================================

/// Command / status register
pub const COMMAND: u8 = 0x80;

/// Config lock (read-only, always 1 once powered)
pub const CMD_CONFIG_LOCK: u8 = 0x80;

/// Ambient light data ready
pub const CMD_ALS_DATA_RDY: u8 = 0x40;

/// Proximity data ready
pub const CMD_PROX_DATA_RDY: u8 = 0x20;

/// Trigger one on-demand ambient light measurement
pub const CMD_ALS_OD: u8 = 0x10;

/// Trigger one on-demand proximity measurement
pub const CMD_PROX_OD: u8 = 0x08;

/// Enable periodic ambient light measurements (self-timed mode)
pub const CMD_ALS_EN: u8 = 0x04;

/// Enable periodic proximity measurements (self-timed mode)
pub const CMD_PROX_EN: u8 = 0x02;

/// Enable the self-timed state machine
pub const CMD_SELFTIMED_EN: u8 = 0x01;

// =============================================================================
// Identification
// =============================================================================

/// Product ID / revision register
pub const PRODUCT_ID: u8 = 0x81;

/// Product ID value in the high nibble
pub const PRODUCT_ID_VALUE: u8 = 0x20;

/// Mask for the product ID nibble
pub const PRODUCT_ID_MASK: u8 = 0xF0;

// =============================================================================
// Configuration Registers
// =============================================================================

/// Proximity measurement rate (self-timed mode)
pub const PROX_RATE: u8 = 0x82;

/// IR LED current: value × 10 mA, 20 max (200 mA)
pub const IR_LED_CURRENT: u8 = 0x83;

/// Maximum IR_LED_CURRENT register value
pub const IR_LED_CURRENT_MAX: u8 = 20;

/// Ambient light measurement parameters
pub const ALS_PARAM: u8 = 0x84;

/// ALS_PARAM: continuous conversion mode (bit 7)
pub const ALS_CONT_CONVERSION: u8 = 0x80;

/// ALS_PARAM: automatic offset compensation (bit 3)
pub const ALS_AUTO_OFFSET: u8 = 0x08;

// =============================================================================
// Result Registers (16-bit big-endian)
// =============================================================================

/// Ambient light result, high byte
pub const ALS_RESULT_H: u8 = 0x85;

/// Proximity result, high byte
pub const PROX_RESULT_H: u8 = 0x87;

// =============================================================================
// Interrupt Registers
// =============================================================================

/// Interrupt control (threshold selection and enables)
pub const INT_CTRL: u8 = 0x89;

/// Low threshold, high byte
pub const LOW_THRES_H: u8 = 0x8A;

/// High threshold, high byte
pub const HIGH_THRES_H: u8 = 0x8C;

/// Interrupt status (write 1 to clear)
pub const INT_STATUS: u8 = 0x8E;

/// INT_CTRL: interrupt when a threshold is exceeded
pub const INT_THRES_EN: u8 = 0x02;

/// All INT_STATUS flag bits
pub const INT_STATUS_ALL: u8 = 0x0F;

// =============================================================================
// Timing
// =============================================================================

/// Interval between on-demand data-ready polls (ms)
pub const ON_DEMAND_POLL_INTERVAL_MS: u32 = 1;
