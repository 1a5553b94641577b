//! Decoder for DL/T 698.45 cumulative energy register APDU values
//!
//! This library maps a 16 bit logical object number to its register
//! metadata, decodes the hex encoded value buffer returned by the meter
//! and renders scaled, labeled tariff band readings.

pub mod metering_698;

// Re-export common types for easier access
pub use metering_698::structs::{BandReading, DataType, ObjectAddress, ScalerUnit};
pub use metering_698::{EnergyObject, EnergyParseError, EnergyReport};
pub use metering_698::{BAND_LABELS, NO_DATA_PLACEHOLDER};
