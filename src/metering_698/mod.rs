use log::warn;
use serde::Serialize;
use thiserror::Error;

pub mod object_definitions;
pub mod parser;
pub mod structs;
pub mod utils;

use parser::HexCursor;
use structs::{BandReading, DataType, ObjectAddress, ScalerUnit};

/// Tariff band labels, fixed order: total, peak-high, peak, flat, valley.
pub const BAND_LABELS: [&str; 5] = ["总", "尖", "峰", "平", "谷"];

/// Placeholder shown whenever no reading is available.
pub const NO_DATA_PLACEHOLDER: &str = "暂无数据";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnergyParseError {
    #[error("descriptor not found: {0}")]
    DescriptorNotFound(String),
    #[error("malformed value buffer: {0}")]
    MalformedHex(String),
    #[error("unexpected data type {found:#04x}, expected one of: {expected}")]
    UnrecognizedDataType { found: u8, expected: String },
    #[error("tariff band index {0} is outside 0..=5")]
    InvalidBandIndex(u8),
}

/// One decoded cumulative energy register object.
///
/// Construction never fails: every decode error is caught at the
/// constructor boundary, recorded on the instance and logged, and the
/// reading set is left absent. Rendering a failed object falls back to
/// the no-data placeholder, so a malformed APDU never shows a partial
/// numeric value and never crashes the surrounding session.
pub struct EnergyObject {
    name: String,
    interface_class: u8,
    address: Option<ObjectAddress>,
    choice: Option<DataType>,
    scaler: ScalerUnit,
    readings: Option<Vec<String>>,
    failure: Option<EnergyParseError>,
}

impl EnergyObject {
    /// Decode one object from its 8 hex digit address (OAD) and the raw
    /// hex value buffer returned by the meter.
    ///
    /// Example: `EnergyObject::new("00100200", "0105060000000006...")`
    pub fn new(oad_hex: &str, value_hex: &str) -> Self {
        let mut object = EnergyObject {
            name: String::new(),
            interface_class: 0,
            address: None,
            choice: None,
            scaler: ScalerUnit::new(0, 0),
            readings: None,
            failure: None,
        };

        if let Err(err) = object.init(oad_hex, value_hex) {
            // All-or-nothing: a failed decode leaves no partial readings
            object.readings = None;
            object.record_failure(err);
        }
        object
    }

    fn init(&mut self, oad_hex: &str, value_hex: &str) -> Result<(), EnergyParseError> {
        let address = ObjectAddress::parse(oad_hex)?;
        self.address = Some(address);

        let descriptor = object_definitions::get_descriptor(address.logical_number)
            .ok_or_else(|| {
                EnergyParseError::DescriptorNotFound(format!(
                    "no energy register with logical number {:#06x}",
                    address.logical_number
                ))
            })?;

        self.name = descriptor.name.to_string();
        self.interface_class = descriptor.interface_class;
        self.choice = Some(descriptor.choice);
        // Instance-owned copy, the registry entry must stay untouched
        self.scaler = descriptor.scaler;

        // 0010 0200 = low precision (default), 0010 0400 = high precision.
        // Attribute 4 is a fixed override to -4, not a relative doubling.
        if address.attribute == 4 {
            self.scaler.exponent = -4;
        }

        let mut cursor = HexCursor::new(value_hex)?;
        self.readings = parser::decode_readings(&mut cursor, &address, &self.scaler)?;
        Ok(())
    }

    /* Recovery sink: record the failure for the caller instead of
       propagating it out of the constructor. */
    fn record_failure(&mut self, err: EnergyParseError) {
        warn!("energy object decode failed: {}", err);
        self.failure = Some(err);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interface_class(&self) -> u8 {
        self.interface_class
    }

    /// Declared wire data type of the register, if the lookup succeeded.
    pub fn choice(&self) -> Option<DataType> {
        self.choice
    }

    pub fn scaler(&self) -> ScalerUnit {
        self.scaler
    }

    /// The formatted readings, one per tariff band; `None` when the
    /// buffer carried the no-data marker or the decode failed.
    pub fn readings(&self) -> Option<&[String]> {
        self.readings.as_deref()
    }

    pub fn last_error(&self) -> Option<&EnergyParseError> {
        self.failure.as_ref()
    }

    fn band_index(&self) -> usize {
        self.address.map(|a| a.index as usize).unwrap_or(0)
    }

    /// Render the object for display.
    ///
    /// Aggregate objects list every decoded band on its own labeled line,
    /// single band objects render as one `name<band>: value` line, and
    /// anything without readings falls back to the placeholder.
    pub fn to_format_string(&self) -> String {
        let readings = match &self.readings {
            Some(readings) if !readings.is_empty() => readings,
            _ => return format!("{}: {}", self.name, NO_DATA_PLACEHOLDER),
        };

        let index = self.band_index();
        if index > 0 {
            return format!("{}{}: {}", self.name, BAND_LABELS[index - 1], readings[0]);
        }

        let mut out = String::from(&self.name);
        out.push('\n');
        for (label, value) in BAND_LABELS.iter().zip(readings.iter()) {
            out.push_str(label);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Structured summary for the JSON output mode.
    pub fn to_report(&self) -> EnergyReport {
        let readings = match (&self.readings, self.band_index()) {
            (Some(readings), 0) => BAND_LABELS
                .iter()
                .zip(readings.iter())
                .map(|(label, value)| BandReading {
                    band: label.to_string(),
                    value: value.clone(),
                })
                .collect(),
            (Some(readings), index) if !readings.is_empty() => vec![BandReading {
                band: BAND_LABELS[index - 1].to_string(),
                value: readings[0].clone(),
            }],
            _ => Vec::new(),
        };

        EnergyReport {
            name: self.name.clone(),
            interface_class: self.interface_class,
            readings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnergyReport {
    pub name: String,
    pub interface_class: u8,
    pub readings: Vec<BandReading>,
}
