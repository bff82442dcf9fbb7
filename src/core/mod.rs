//! Shared infrastructure for the driver collection
//!
//! Only the logging macro backends live here; everything else in the crate is
//! a self-contained driver package.

pub mod logging;
