use serde::Serialize;

use super::EnergyParseError;

/// Power-of-ten multiplier plus DL/T 698.45 unit code, applied to the raw
/// register integer to get a displayable quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalerUnit {
    pub exponent: i32,
    pub unit: u8,
}

impl ScalerUnit {
    pub fn new(exponent: i32, unit: u8) -> Self {
        Self { exponent, unit }
    }
}

/// The four data types the energy interface class carries on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    DoubleLong,         // 0x05, signed 32 bit
    DoubleLongUnsigned, // 0x06, unsigned 32 bit
    Long64,             // 0x14, signed 64 bit
    Long64Unsigned,     // 0x15, unsigned 64 bit
}

impl DataType {
    pub const ALL: [DataType; 4] = [
        DataType::DoubleLong,
        DataType::DoubleLongUnsigned,
        DataType::Long64,
        DataType::Long64Unsigned,
    ];

    pub fn from_tag(tag: u8) -> Option<Self> {
        DataType::ALL.iter().copied().find(|choice| choice.tag() == tag)
    }

    pub fn tag(&self) -> u8 {
        match self {
            DataType::DoubleLong => 0x05,
            DataType::DoubleLongUnsigned => 0x06,
            DataType::Long64 => 0x14,
            DataType::Long64Unsigned => 0x15,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            DataType::DoubleLong => "double-long",
            DataType::DoubleLongUnsigned => "double-long-unsigned",
            DataType::Long64 => "long64",
            DataType::Long64Unsigned => "long64-unsigned",
        }
    }
}

/// Object address (OAD) of a cumulative energy register.
///
/// Example format: "00100200"
/// - first 4 hex digits: logical object number (registry key)
/// - next 2: attribute (precision variant selector, 4 = high precision)
/// - last 2: tariff band index (0 = aggregate, 1..=5 = single band)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectAddress {
    pub logical_number: u16,
    pub attribute: u8,
    pub index: u8,
}

impl ObjectAddress {
    pub fn parse(oad_hex: &str) -> Result<Self, EnergyParseError> {
        if oad_hex.len() != 8 || !oad_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EnergyParseError::DescriptorNotFound(format!(
                "'{}' is not an 8 hex digit object address",
                oad_hex
            )));
        }

        // The slices below are safe, the address is all ASCII at this point
        let logical_number = u16::from_str_radix(&oad_hex[0..4], 16)
            .map_err(|e| EnergyParseError::DescriptorNotFound(format!(
                "object address '{}': {}", oad_hex, e
            )))?;
        let attribute = u8::from_str_radix(&oad_hex[4..6], 16)
            .map_err(|e| EnergyParseError::DescriptorNotFound(format!(
                "object address '{}': {}", oad_hex, e
            )))?;
        let index = u8::from_str_radix(&oad_hex[6..8], 16)
            .map_err(|e| EnergyParseError::DescriptorNotFound(format!(
                "object address '{}': {}", oad_hex, e
            )))?;

        Ok(Self {
            logical_number,
            attribute,
            index,
        })
    }
}

/// Static metadata of one distinguishable sub-register.
#[derive(Debug, Clone, Copy)]
pub struct ObjectDescriptor {
    pub name: &'static str,
    pub interface_class: u8,
    pub choice: DataType,
    pub scaler: ScalerUnit,
}

/// One decoded tariff band value, used by the JSON report output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandReading {
    pub band: String,
    pub value: String,
}
