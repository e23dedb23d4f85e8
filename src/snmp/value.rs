use snmp2::{Oid, Value};

use super::session::VarbindBatch;

/// Значение varbind, отвязанное от буфера сессии
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Integer(i64),
    OctetString(Vec<u8>),
    ObjectId(String),
    IpAddress([u8; 4]),
    Counter32(u32),
    Unsigned32(u32),
    Timeticks(u32),
    Counter64(u64),
    Null,
    /// Тип, который движку не нужен; хранится отладочное представление
    Other(String),
}

impl RawValue {
    /// Конвертирует значение snmp2. Исключения
    /// noSuchObject / noSuchInstance / endOfMibView дают `None`.
    pub fn from_snmp(value: &Value<'_>) -> Option<Self> {
        let raw = match value {
            Value::Integer(v) => RawValue::Integer(*v),
            Value::OctetString(bytes) => RawValue::OctetString(bytes.to_vec()),
            Value::ObjectIdentifier(oid) => RawValue::ObjectId(oid.to_string()),
            Value::IpAddress(addr) => RawValue::IpAddress(*addr),
            Value::Counter32(v) => RawValue::Counter32(*v),
            Value::Unsigned32(v) => RawValue::Unsigned32(*v),
            Value::Timeticks(v) => RawValue::Timeticks(*v),
            Value::Counter64(v) => RawValue::Counter64(*v),
            Value::Null => RawValue::Null,
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView => return None,
            other => RawValue::Other(format!("{other:?}")),
        };
        Some(raw)
    }

    /// Целое из любого числового типа. Некоторые агенты отдают числа
    /// строкой, такие значения тоже принимаются.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawValue::Integer(v) => Some(*v),
            RawValue::Counter32(v) | RawValue::Unsigned32(v) | RawValue::Timeticks(v) => {
                Some(i64::from(*v))
            }
            RawValue::Counter64(v) => i64::try_from(*v).ok(),
            RawValue::OctetString(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RawValue::OctetString(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Короткое описание типа для логов
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Integer(_) => "INTEGER",
            RawValue::OctetString(_) => "OCTET STRING",
            RawValue::ObjectId(_) => "OBJECT IDENTIFIER",
            RawValue::IpAddress(_) => "IpAddress",
            RawValue::Counter32(_) => "Counter32",
            RawValue::Unsigned32(_) => "Unsigned32",
            RawValue::Timeticks(_) => "TimeTicks",
            RawValue::Counter64(_) => "Counter64",
            RawValue::Null => "NULL",
            RawValue::Other(_) => "other",
        }
    }
}

/// Копирует varbind'ы ответа, чтобы освободить буфер сессии
pub(crate) fn owned_varbinds<'a>(varbinds: impl Iterator<Item = (Oid<'a>, Value<'a>)>) -> VarbindBatch {
    varbinds
        .map(|(oid, value)| (oid.to_string(), RawValue::from_snmp(&value)))
        .collect()
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::OctetString(text.as_bytes().to_vec())
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Integer(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Integer(i64::from(v))
    }
}
