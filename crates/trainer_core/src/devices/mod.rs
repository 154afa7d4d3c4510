//! Built-in device types.
//!
//! Each constructor returns a fresh device with parameters at their normal
//! starting values and the full fault catalog attached.

mod compressor;
mod fan;
mod pump;

pub use compressor::compressor;
pub use fan::fan;
pub use pump::pump;

pub const PUMP: &str = "Pump";
pub const FAN: &str = "Fan";
pub const COMPRESSOR: &str = "Compressor";
