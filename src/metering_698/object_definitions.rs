use lazy_static::lazy_static;
use std::collections::HashMap;

use super::structs::{DataType, ObjectDescriptor, ScalerUnit};

/// Cumulative energy registers of interface class 1 (DL/T 698.45 table 124).
///
/// Each group shares one scaler/unit and one declared wire data type and
/// holds newline separated rows of `objNo \t interface_class \t name`.
const ENERGY_REGISTERS: [(&str, ScalerUnit, DataType); 6] = [
    (
        "0000\t1\t组合有功电能",
        ScalerUnit { exponent: -2, unit: 33 },
        DataType::DoubleLong,
    ),
    (
        "0010\t1\t正向有功电能\n\
         0011\t1\tA相正向有功电能\n\
         0012\t1\tB相正向有功电能\n\
         0013\t1\tC相正向有功电能\n\
         0020\t1\t反向有功电能\n\
         0021\t1\tA相反向有功电能\n\
         0022\t1\tB相反向有功电能\n\
         0023\t1\tC相反向有功电能",
        ScalerUnit { exponent: -2, unit: 33 },
        DataType::DoubleLongUnsigned,
    ),
    (
        "0030\t1\t组合无功1电能\n\
         0031\t1\tA相组合无功1电能\n\
         0032\t1\tB相组合无功1电能\n\
         0033\t1\tC相组合无功1电能\n\
         0040\t1\t组合无功2电能\n\
         0041\t1\tA相组合无功2电能\n\
         0042\t1\tB相组合无功2电能\n\
         0043\t1\tC相组合无功2电能",
        ScalerUnit { exponent: -2, unit: 35 },
        DataType::DoubleLong,
    ),
    (
        "0050\t1\t第一象限无功电能\n\
         0051\t1\tA相第一象限无功电能\n\
         0052\t1\tB相第一象限无功电能\n\
         0053\t1\tC相第一象限无功电能\n\
         0060\t1\t第二象限无功电能\n\
         0061\t1\tA相第二象限无功电能\n\
         0062\t1\tB相第二象限无功电能\n\
         0063\t1\tC相第二象限无功电能\n\
         0070\t1\t第三象限无功电能\n\
         0071\t1\tA相第三象限无功电能\n\
         0072\t1\tB相第三象限无功电能\n\
         0073\t1\tC相第三象限无功电能\n\
         0080\t1\t第四象限无功电能\n\
         0081\t1\tA相第四象限无功电能\n\
         0082\t1\tB相第四象限无功电能\n\
         0083\t1\tC相第四象限无功电能",
        ScalerUnit { exponent: -2, unit: 35 },
        DataType::DoubleLongUnsigned,
    ),
    (
        "0090\t1\t正向视在电能\n\
         0091\t1\tA相正向视在电能\n\
         0092\t1\tB相正向视在电能\n\
         0093\t1\tC相正向视在电能\n\
         00A0\t1\t反向视在电能\n\
         00A1\t1\tA相反向视在电能\n\
         00A2\t1\tB相反向视在电能\n\
         00A3\t1\tC相反向视在电能",
        ScalerUnit { exponent: -2, unit: 34 },
        DataType::DoubleLongUnsigned,
    ),
    (
        "0110\t1\t正向有功基波总电能\n\
         0111\t1\tA相正向有功基波电能\n\
         0112\t1\tB相正向有功基波电能\n\
         0113\t1\tC相正向有功基波电能\n\
         0120\t1\t反向有功基波总电能\n\
         0121\t1\tA相反向有功基波电能\n\
         0122\t1\tB相反向有功基波电能\n\
         0123\t1\tC相反向有功基波电能\n\
         0210\t1\t正向有功谐波总电能\n\
         0211\t1\tA相正向有功谐波电能\n\
         0212\t1\tB相正向有功谐波电能\n\
         0213\t1\tC相正向有功谐波电能\n\
         0220\t1\t反向有功谐波总电能\n\
         0221\t1\tA相反向有功谐波电能\n\
         0222\t1\tB相反向有功谐波电能\n\
         0223\t1\tC相反向有功谐波电能\n\
         0300\t1\t铜损有功总电能补偿量\n\
         0301\t1\tA相铜损有功电能补偿量\n\
         0302\t1\tB相铜损有功电能补偿量\n\
         0303\t1\tC相铜损有功电能补偿量\n\
         0400\t1\t铁损有功总电能补偿量\n\
         0401\t1\tA相铁损有功电能补偿量\n\
         0402\t1\tB相铁损有功电能补偿量\n\
         0403\t1\tC相铁损有功电能补偿量\n\
         0500\t1\t关联总电能\n\
         0501\t1\tA相关联电能\n\
         0502\t1\tB相关联电能\n\
         0503\t1\tC相关联电能",
        ScalerUnit { exponent: -2, unit: 33 },
        DataType::DoubleLongUnsigned,
    ),
];

lazy_static! {
    static ref OBJECT_DEFINITIONS: HashMap<u16, ObjectDescriptor> = build_registry();
}

fn build_registry() -> HashMap<u16, ObjectDescriptor> {
    let mut registry = HashMap::new();

    for (rows, scaler, choice) in ENERGY_REGISTERS {
        for row in rows.lines() {
            let mut fields = row.trim_start().split('\t');
            let obj_no_field = fields
                .next()
                .expect("register row must start with the object number");
            let interface_class_field = fields
                .next()
                .expect("register row must carry an interface class");
            let name = fields.next().expect("register row must carry a name");

            let obj_no = u16::from_str_radix(obj_no_field, 16)
                .expect("register object number must be 4 hex digits");
            let interface_class: u8 = interface_class_field
                .parse()
                .expect("register interface class must be an integer");

            registry.insert(
                obj_no,
                ObjectDescriptor {
                    name,
                    interface_class,
                    choice,
                    scaler,
                },
            );
        }
    }

    registry
}

/// Exact match lookup; unknown logical numbers are reported to the caller
/// instead of mapping to a default descriptor.
pub fn get_descriptor(logical_number: u16) -> Option<&'static ObjectDescriptor> {
    OBJECT_DEFINITIONS.get(&logical_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_size() {
        assert_eq!(OBJECT_DEFINITIONS.len(), 69);
    }

    #[test]
    fn test_lookup_forward_active_energy() {
        let descriptor = get_descriptor(0x0010).unwrap();
        assert_eq!(descriptor.name, "正向有功电能");
        assert_eq!(descriptor.interface_class, 1);
        assert_eq!(descriptor.choice, DataType::DoubleLongUnsigned);
        assert_eq!(descriptor.scaler, ScalerUnit::new(-2, 33));
    }

    #[test]
    fn test_lookup_combined_active_energy() {
        // The combined register is the one signed double-long row
        let descriptor = get_descriptor(0x0000).unwrap();
        assert_eq!(descriptor.name, "组合有功电能");
        assert_eq!(descriptor.choice, DataType::DoubleLong);
    }

    #[test]
    fn test_lookup_per_group_scalers() {
        assert_eq!(get_descriptor(0x0033).unwrap().scaler.unit, 35);
        assert_eq!(get_descriptor(0x0071).unwrap().scaler.unit, 35);
        assert_eq!(get_descriptor(0x00A0).unwrap().scaler.unit, 34);
        assert_eq!(get_descriptor(0x0503).unwrap().scaler.unit, 33);
    }

    #[test]
    fn test_lookup_unknown_logical_number() {
        assert!(get_descriptor(0x9999).is_none());
        assert!(get_descriptor(0xFFFF).is_none());
    }

    #[test]
    fn test_every_row_is_well_formed() {
        for descriptor in OBJECT_DEFINITIONS.values() {
            assert!(!descriptor.name.is_empty());
            assert_eq!(descriptor.interface_class, 1);
            assert_eq!(descriptor.scaler.exponent, -2);
        }
    }
}
