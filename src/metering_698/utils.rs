use super::structs::{DataType, ScalerUnit};
use super::EnergyParseError;

/// Wire size in bytes of a value field with the given data type.
pub fn data_byte_size(data_type: DataType) -> usize {
    match data_type {
        DataType::DoubleLong | DataType::DoubleLongUnsigned => 4,
        DataType::Long64 | DataType::Long64Unsigned => 8,
    }
}

pub fn parse_unsigned_hex(hex: &str) -> Result<u64, EnergyParseError> {
    u64::from_str_radix(hex, 16).map_err(|e| {
        EnergyParseError::MalformedHex(format!("'{}' is not a hex integer: {}", hex, e))
    })
}

/* Two's complement at the wire width. The meter encodes negative values
   with the high bit set, so "FFFFFFFF" at 4 bytes is -1, not a parse error. */
pub fn parse_signed_hex(hex: &str, byte_width: usize) -> Result<i64, EnergyParseError> {
    let raw = parse_unsigned_hex(hex)?;
    let bits = byte_width as u32 * 8;
    if bits >= 64 {
        return Ok(raw as i64);
    }

    let sign_bit = 1u64 << (bits - 1);
    if raw & sign_bit != 0 {
        Ok((raw | !((1u64 << bits) - 1)) as i64)
    } else {
        Ok(raw as i64)
    }
}

/// Unit codes the energy interface class uses (DL/T 698.45 unit table).
pub fn unit_symbol(code: u8) -> Option<&'static str> {
    match code {
        33 => Some("kWh"),
        34 => Some("kVAh"),
        35 => Some("kvarh"),
        _ => None,
    }
}

/// Render `value * 10^exponent` with the unit suffix.
///
/// Pure decimal string arithmetic, no floating point, so the output is
/// lossless for the full 64 bit range and always shows exactly
/// `-exponent` decimal places for negative exponents.
pub fn format_scaled(value: i128, scaler: &ScalerUnit) -> String {
    let digits = value.unsigned_abs().to_string();

    let mut body = if scaler.exponent >= 0 {
        format!("{}{}", digits, "0".repeat(scaler.exponent as usize))
    } else {
        let places = (-scaler.exponent) as usize;
        let padded = if digits.len() <= places {
            // Keep one digit in front of the decimal point
            format!("{}{}", "0".repeat(places - digits.len() + 1), digits)
        } else {
            digits
        };
        let split = padded.len() - places;
        format!("{}.{}", &padded[..split], &padded[split..])
    };

    if value < 0 {
        body.insert(0, '-');
    }

    match unit_symbol(scaler.unit) {
        Some(symbol) => format!("{} {}", body, symbol),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_byte_size() {
        assert_eq!(data_byte_size(DataType::DoubleLong), 4);
        assert_eq!(data_byte_size(DataType::DoubleLongUnsigned), 4);
        assert_eq!(data_byte_size(DataType::Long64), 8);
        assert_eq!(data_byte_size(DataType::Long64Unsigned), 8);
    }

    #[test]
    fn test_parse_unsigned_hex() {
        assert_eq!(parse_unsigned_hex("00000000").unwrap(), 0);
        assert_eq!(parse_unsigned_hex("0000303A").unwrap(), 12346);
        assert_eq!(parse_unsigned_hex("FFFFFFFFFFFFFFFF").unwrap(), u64::MAX);
        assert!(parse_unsigned_hex("12g4").is_err());
    }

    #[test]
    fn test_parse_signed_hex() {
        assert_eq!(parse_signed_hex("FFFFFFFF", 4).unwrap(), -1);
        assert_eq!(parse_signed_hex("80000000", 4).unwrap(), i32::MIN as i64);
        assert_eq!(parse_signed_hex("7FFFFFFF", 4).unwrap(), i32::MAX as i64);
        assert_eq!(parse_signed_hex("FFFFFFFFFFFFFF9C", 8).unwrap(), -100);
        assert_eq!(parse_signed_hex("8000000000000000", 8).unwrap(), i64::MIN);
    }

    #[test]
    fn test_format_scaled_negative_exponent() {
        let kwh = ScalerUnit::new(-2, 33);
        assert_eq!(format_scaled(0, &kwh), "0.00 kWh");
        assert_eq!(format_scaled(1234, &kwh), "12.34 kWh");
        assert_eq!(format_scaled(5, &kwh), "0.05 kWh");
        assert_eq!(format_scaled(-5, &kwh), "-0.05 kWh");
        assert_eq!(format_scaled(-123456, &kwh), "-1234.56 kWh");

        let high_precision = ScalerUnit::new(-4, 33);
        assert_eq!(format_scaled(1234, &high_precision), "0.1234 kWh");
    }

    #[test]
    fn test_format_scaled_zero_and_positive_exponent() {
        assert_eq!(format_scaled(42, &ScalerUnit::new(0, 35)), "42 kvarh");
        assert_eq!(format_scaled(42, &ScalerUnit::new(3, 34)), "42000 kVAh");
    }

    #[test]
    fn test_format_scaled_unknown_unit() {
        assert_eq!(format_scaled(1234, &ScalerUnit::new(-2, 99)), "12.34");
    }

    #[test]
    fn test_format_scaled_is_lossless_at_the_extremes() {
        let kwh = ScalerUnit::new(-2, 33);
        assert_eq!(
            format_scaled(u64::MAX as i128, &kwh),
            "184467440737095516.15 kWh"
        );
        assert_eq!(
            format_scaled(i64::MIN as i128, &kwh),
            "-92233720368547758.08 kWh"
        );
    }
}
