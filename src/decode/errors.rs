use std::fmt;

use serde::{Serialize, Serializer};

use super::DecodeAnomaly;
use crate::snmp::RawValue;

/// Условие из hrPrinterDetectedErrorState
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCondition {
    LowPaper,
    NoPaper,
    LowToner,
    NoToner,
    DoorOpen,
    Jammed,
    Offline,
    ServiceRequested,
    InputTrayMissing,
    OutputTrayMissing,
    MarkerSupplyMissing,
    OutputNearFull,
    OutputFull,
    InputTrayEmpty,
    OverduePreventMaint,
    /// Бит, которого нет в RFC 3805; номер сохраняется
    Unrecognized(u32),
}

/// Порядок совпадает с номерами битов
const CONDITIONS: [ErrorCondition; 15] = [
    ErrorCondition::LowPaper,
    ErrorCondition::NoPaper,
    ErrorCondition::LowToner,
    ErrorCondition::NoToner,
    ErrorCondition::DoorOpen,
    ErrorCondition::Jammed,
    ErrorCondition::Offline,
    ErrorCondition::ServiceRequested,
    ErrorCondition::InputTrayMissing,
    ErrorCondition::OutputTrayMissing,
    ErrorCondition::MarkerSupplyMissing,
    ErrorCondition::OutputNearFull,
    ErrorCondition::OutputFull,
    ErrorCondition::InputTrayEmpty,
    ErrorCondition::OverduePreventMaint,
];

impl ErrorCondition {
    pub fn from_bit(bit: u32) -> Self {
        usize::try_from(bit)
            .ok()
            .and_then(|i| CONDITIONS.get(i).copied())
            .unwrap_or(ErrorCondition::Unrecognized(bit))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCondition::LowPaper => "low_paper",
            ErrorCondition::NoPaper => "no_paper",
            ErrorCondition::LowToner => "low_toner",
            ErrorCondition::NoToner => "no_toner",
            ErrorCondition::DoorOpen => "door_open",
            ErrorCondition::Jammed => "jammed",
            ErrorCondition::Offline => "offline",
            ErrorCondition::ServiceRequested => "service_requested",
            ErrorCondition::InputTrayMissing => "input_tray_missing",
            ErrorCondition::OutputTrayMissing => "output_tray_missing",
            ErrorCondition::MarkerSupplyMissing => "marker_supply_missing",
            ErrorCondition::OutputNearFull => "output_near_full",
            ErrorCondition::OutputFull => "output_full",
            ErrorCondition::InputTrayEmpty => "input_tray_empty",
            ErrorCondition::OverduePreventMaint => "overdue_prevent_maint",
            ErrorCondition::Unrecognized(_) => "unrecognized",
        }
    }
}

impl fmt::Display for ErrorCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCondition::Unrecognized(bit) => write!(f, "unrecognized (bit {bit})"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl Serialize for ErrorCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Только взведённые условия, по возрастанию номера бита
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorSet(Vec<ErrorCondition>);

impl ErrorSet {
    /// Бит 0 это старший бит первого байта (BITS в SNMP)
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut conditions = Vec::new();
        for (byte_index, byte) in bytes.iter().enumerate() {
            for offset in 0..8u32 {
                if byte & (0x80 >> offset) != 0 {
                    let bit = byte_index as u32 * 8 + offset;
                    conditions.push(ErrorCondition::from_bit(bit));
                }
            }
        }
        Self(conditions)
    }

    pub fn contains(&self, condition: ErrorCondition) -> bool {
        self.0.contains(&condition)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorCondition> {
        self.0.iter()
    }
}

pub fn error_set(raw: &RawValue) -> Result<ErrorSet, DecodeAnomaly> {
    match raw {
        RawValue::OctetString(bytes) => Ok(ErrorSet::from_bytes(bytes)),
        other => Err(DecodeAnomaly::wrong_type("OCTET STRING", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_set_bits_are_reported() {
        // lowToner (бит 2) и doorOpen (бит 4)
        let set = ErrorSet::from_bytes(&[0b0010_1000]);
        assert_eq!(
            set.iter().copied().collect::<Vec<_>>(),
            vec![ErrorCondition::LowToner, ErrorCondition::DoorOpen]
        );
        assert!(!set.contains(ErrorCondition::Jammed));
    }

    #[test]
    fn second_octet_and_unknown_bits() {
        // inputTrayEmpty (бит 13) и бит 15, которого нет в MIB
        let set = error_set(&RawValue::OctetString(vec![0x00, 0b0000_0101])).unwrap();
        assert_eq!(
            set.iter().copied().collect::<Vec<_>>(),
            vec![ErrorCondition::InputTrayEmpty, ErrorCondition::Unrecognized(15)]
        );
    }

    #[test]
    fn empty_buffer_means_no_errors() {
        assert!(error_set(&RawValue::OctetString(Vec::new())).unwrap().is_empty());
        assert!(error_set(&RawValue::Integer(0)).is_err());
    }

    #[test]
    fn serializes_as_names() {
        let set = ErrorSet::from_bytes(&[0b0100_0100]);
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"["no_paper","jammed"]"#
        );
    }
}
