//! Уровни и ёмкости расходников и лотков.
//!
//! Printer-MIB кодирует особые состояния отрицательными числами.
//! Они не означают «пусто» и не сливаются между собой.

use serde::{Serialize, Serializer};

use super::{DecodeAnomaly, integer};
use crate::snmp::RawValue;

/// Текущий уровень (prtMarkerSuppliesLevel, prtInputCurrentLevel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Точное значение; 0 значит пусто
    Known(u64),
    /// -1: ограничений нет
    Unrestricted,
    /// -2: уровень неизвестен
    Unknown,
    /// -3: что-то осталось, сколько именно неизвестно
    SomeRemaining,
}

impl Level {
    pub fn from_raw(value: i64) -> Result<Self, DecodeAnomaly> {
        match value {
            -1 => Ok(Level::Unrestricted),
            -2 => Ok(Level::Unknown),
            -3 => Ok(Level::SomeRemaining),
            v if v >= 0 => Ok(Level::Known(v.unsigned_abs())),
            value => Err(DecodeAnomaly::OutOfRange { value }),
        }
    }

    pub fn known(&self) -> Option<u64> {
        match self {
            Level::Known(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Known(_) => "known",
            Level::Unrestricted => "unrestricted",
            Level::Unknown => "unknown",
            Level::SomeRemaining => "some_remaining",
        }
    }
}

/// Известное значение пишется числом, особые состояния строкой
impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Level::Known(v) => serializer.serialize_u64(*v),
            other => serializer.serialize_str(other.as_str()),
        }
    }
}

/// Максимальная ёмкость (prtMarkerSuppliesMaxCapacity, prtInputMaxCapacity)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Всегда больше нуля
    Known(u64),
    /// -1: ограничений нет
    Unrestricted,
    /// 0 или -2: неприменимо либо неизвестно
    Unknown,
}

impl Capacity {
    pub fn from_raw(value: i64) -> Result<Self, DecodeAnomaly> {
        match value {
            -1 => Ok(Capacity::Unrestricted),
            0 | -2 => Ok(Capacity::Unknown),
            v if v > 0 => Ok(Capacity::Known(v.unsigned_abs())),
            value => Err(DecodeAnomaly::OutOfRange { value }),
        }
    }

    pub fn known(&self) -> Option<u64> {
        match self {
            Capacity::Known(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capacity::Known(_) => "known",
            Capacity::Unrestricted => "unrestricted",
            Capacity::Unknown => "unknown",
        }
    }
}

impl Serialize for Capacity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Capacity::Known(v) => serializer.serialize_u64(*v),
            other => serializer.serialize_str(other.as_str()),
        }
    }
}

pub fn level(raw: &RawValue) -> Result<Level, DecodeAnomaly> {
    Level::from_raw(integer(raw)?)
}

pub fn capacity(raw: &RawValue) -> Result<Capacity, DecodeAnomaly> {
    Capacity::from_raw(integer(raw)?)
}

/// Остаток в процентах, только когда известны и уровень, и ёмкость.
/// Целая часть, не больше 100.
pub fn percent_remaining(level: Option<Level>, capacity: Option<Capacity>) -> Option<u8> {
    let level = level?.known()?;
    let capacity = capacity?.known()?;

    let percent = (u128::from(level) * 100 / u128::from(capacity)).min(100);
    u8::try_from(percent).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_sentinels_stay_distinct() {
        assert_eq!(level(&RawValue::Integer(0)), Ok(Level::Known(0)));
        assert_eq!(level(&RawValue::Integer(-1)), Ok(Level::Unrestricted));
        assert_eq!(level(&RawValue::Integer(-2)), Ok(Level::Unknown));
        assert_eq!(level(&RawValue::Integer(-3)), Ok(Level::SomeRemaining));
        assert_ne!(Level::Unknown, Level::SomeRemaining);
        assert_ne!(Level::Known(0), Level::Unknown);
    }

    #[test]
    fn unexpected_negative_level_is_an_anomaly() {
        assert_eq!(
            level(&RawValue::Integer(-9)),
            Err(DecodeAnomaly::OutOfRange { value: -9 })
        );
    }

    #[test]
    fn zero_and_minus_two_capacity_are_unknown() {
        assert_eq!(capacity(&RawValue::Integer(0)), Ok(Capacity::Unknown));
        assert_eq!(capacity(&RawValue::Integer(-2)), Ok(Capacity::Unknown));
        assert_eq!(capacity(&RawValue::Integer(-1)), Ok(Capacity::Unrestricted));
        assert_eq!(capacity(&RawValue::Integer(500)), Ok(Capacity::Known(500)));
    }

    #[test]
    fn percentage_only_for_known_values() {
        let cap = Some(Capacity::Known(200));
        assert_eq!(percent_remaining(Some(Level::Known(50)), cap), Some(25));
        assert_eq!(percent_remaining(Some(Level::Known(0)), cap), Some(0));
        assert_eq!(percent_remaining(Some(Level::Known(999)), cap), Some(100));
        assert_eq!(percent_remaining(Some(Level::Known(3)), Some(Capacity::Known(7))), Some(42));
        assert_eq!(percent_remaining(Some(Level::SomeRemaining), cap), None);
        assert_eq!(percent_remaining(Some(Level::Unknown), cap), None);
        assert_eq!(percent_remaining(Some(Level::Known(10)), Some(Capacity::Unknown)), None);
        assert_eq!(percent_remaining(None, cap), None);
    }

    #[test]
    fn serialized_form_keeps_sentinels_readable() {
        assert_eq!(serde_json::to_string(&Level::Known(80)).unwrap(), "80");
        assert_eq!(serde_json::to_string(&Level::SomeRemaining).unwrap(), r#""some_remaining""#);
        assert_eq!(serde_json::to_string(&Capacity::Unknown).unwrap(), r#""unknown""#);
    }
}
