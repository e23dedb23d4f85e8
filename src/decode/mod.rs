//! Чистые функции: сырое значение SNMP -> типизированное поле.
//!
//! Декодер не паникует и не прерывает цикл. Неожиданная кодировка
//! возвращается как [`DecodeAnomaly`]; сборщик подставляет «unknown»
//! и пишет предупреждение.

use thiserror::Error;

pub mod color;
pub mod errors;
pub mod levels;
pub mod page_count;
pub mod status;
pub mod text;
pub mod vendor;

pub use color::resolve_color;
pub use errors::{ErrorCondition, ErrorSet};
pub use levels::{Capacity, Level, percent_remaining};
pub use page_count::{PageBreakdown, PageCount};
pub use status::{CoverStatus, SubUnitAvailability, TrayStatus};
pub use vendor::{IdentitySources, PrinterIdentity};

use crate::snmp::RawValue;

/// Значение пришло, но не в той форме, которую ожидает поле
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeAnomaly {
    #[error("ожидался {expected}, получен {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("значение {value} вне допустимого диапазона")]
    OutOfRange { value: i64 },

    #[error("неразборчивое значение: {0}")]
    Malformed(String),
}

impl DecodeAnomaly {
    pub(crate) fn wrong_type(expected: &'static str, raw: &RawValue) -> Self {
        DecodeAnomaly::WrongType {
            expected,
            actual: raw.type_name(),
        }
    }
}

/// Целое значение поля или аномалия
pub fn integer(raw: &RawValue) -> Result<i64, DecodeAnomaly> {
    raw.as_i64()
        .ok_or_else(|| DecodeAnomaly::wrong_type("INTEGER", raw))
}

/// Неотрицательный счётчик
pub fn counter(raw: &RawValue) -> Result<u64, DecodeAnomaly> {
    let value = integer(raw)?;
    u64::try_from(value).map_err(|_| DecodeAnomaly::OutOfRange { value })
}
