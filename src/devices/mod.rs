//! Device Drivers
//!
//! One package per Click board chip, grouped by sensor family. Every
//! driver is written against the platform traits and carries its own
//! register map, configuration types, family error enum, and tests over
//! the mock platform.
//!
//! ## Families
//!
//! - `accel`: high-g accelerometers (ADXL372)
//! - `adc`: analog-to-digital converters (ADS1115)
//! - `baro`: barometric pressure sensors (DPS310)
//! - `ble`: Bluetooth Low Energy modules (RN4870)
//! - `digipot`: digital potentiometers (MCP4161)
//! - `gnss`: GNSS receivers (NMEA 0183)
//! - `imu`: inertial measurement units (BMI160)
//! - `nfc`: NFC controllers (PN7150)
//! - `proximity`: proximity and ambient light sensors (VCNL4010)
//! - `radio`: LoRaWAN modules (Mipot 32001409)

pub mod accel;
pub mod adc;
pub mod baro;
pub mod ble;
pub mod digipot;
pub mod gnss;
pub mod imu;
pub mod nfc;
pub mod proximity;
pub mod radio;
