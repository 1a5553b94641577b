use log::debug;

use super::structs::{DataType, ObjectAddress, ScalerUnit};
use super::utils;
use super::EnergyParseError;

/// Front-consuming cursor over an ASCII hex string.
///
/// Consumed digits are never re-read; running out of input is an error
/// value, not a panic, so a truncated APDU cannot take the session down.
pub struct HexCursor<'a> {
    data: &'a str,
    pos: usize,
}

impl<'a> HexCursor<'a> {
    pub fn new(data: &'a str) -> Result<Self, EnergyParseError> {
        if !data.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EnergyParseError::MalformedHex(format!(
                "value buffer '{}' contains non-hex characters",
                data
            )));
        }
        Ok(Self { data, pos: 0 })
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn peek(&self, n: usize) -> Result<&'a str, EnergyParseError> {
        if self.remaining() < n {
            return Err(EnergyParseError::MalformedHex(format!(
                "wanted {} hex digits at offset {}, only {} left",
                n,
                self.pos,
                self.remaining()
            )));
        }
        Ok(&self.data[self.pos..self.pos + n])
    }

    pub fn take(&mut self, n: usize) -> Result<&'a str, EnergyParseError> {
        let field = self.peek(n)?;
        self.pos += n;
        Ok(field)
    }
}

/// Decode the value buffer of one energy object into formatted readings.
///
/// `index == 0` frames the buffer as an array: one type marker byte
/// (`0x00` is the explicit no-data marker), one element count byte, then
/// the elements. `index` 1..=5 frames it as a single scalar field.
pub fn decode_readings(
    cursor: &mut HexCursor,
    address: &ObjectAddress,
    scaler: &ScalerUnit,
) -> Result<Option<Vec<String>>, EnergyParseError> {
    match address.index {
        0 => {
            let marker = cursor.take(2)?;
            if marker.eq_ignore_ascii_case("00") {
                debug!("object {:#06x}: explicit no-data marker", address.logical_number);
                return Ok(None);
            }

            let count = u8::from_str_radix(cursor.take(2)?, 16).map_err(|e| {
                EnergyParseError::MalformedHex(format!("array element count: {}", e))
            })?;
            debug!(
                "object {:#06x}: decoding {} tariff band readings",
                address.logical_number, count
            );

            let mut readings = Vec::with_capacity(count as usize);
            for _ in 0..count {
                readings.push(decode_scalar(cursor, address.attribute, scaler)?);
            }
            Ok(Some(readings))
        }
        1..=5 => Ok(Some(vec![decode_scalar(cursor, address.attribute, scaler)?])),
        other => Err(EnergyParseError::InvalidBandIndex(other)),
    }
}

/* One scalar field: 1 type tag byte, then the value at the tag's width. */
fn decode_scalar(
    cursor: &mut HexCursor,
    attribute: u8,
    scaler: &ScalerUnit,
) -> Result<String, EnergyParseError> {
    let tag = u8::from_str_radix(cursor.take(2)?, 16)
        .map_err(|e| EnergyParseError::MalformedHex(format!("data type tag: {}", e)))?;

    let data_type =
        DataType::from_tag(tag).ok_or_else(|| EnergyParseError::UnrecognizedDataType {
            found: tag,
            expected: expected_tags(attribute),
        })?;

    let value_hex = cursor.take(utils::data_byte_size(data_type) * 2)?;
    let value = match data_type {
        DataType::DoubleLong => utils::parse_signed_hex(value_hex, 4)? as i128,
        DataType::DoubleLongUnsigned => utils::parse_unsigned_hex(value_hex)? as i128,
        DataType::Long64 => utils::parse_signed_hex(value_hex, 8)? as i128,
        DataType::Long64Unsigned => utils::parse_unsigned_hex(value_hex)? as i128,
    };

    Ok(utils::format_scaled(value, scaler))
}

/* The high precision variant (attribute 4) reports 64 bit registers, the
   default variant the 32 bit ones. */
fn expected_tags(attribute: u8) -> String {
    let allowed: &[DataType] = if attribute == 4 {
        &[DataType::Long64, DataType::Long64Unsigned]
    } else {
        &[DataType::DoubleLong, DataType::DoubleLongUnsigned]
    };

    allowed
        .iter()
        .map(|choice| format!("{}({:#04x})", choice.wire_name(), choice.tag()))
        .collect::<Vec<_>>()
        .join(", ")
}
