use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::catalog::Field;
use crate::snmp::{RawValue, RowIndex, SnmpError};

/// Сырые значения скаляров, прочитанные за цикл
pub type ScalarResult = BTreeMap<Field, RawValue>;

/// Результат walk одной колонки
#[derive(Debug, Clone, PartialEq)]
pub struct TableResult {
    pub field: Field,
    pub rows: Vec<(RowIndex, RawValue)>,
}

/// Строка таблицы, собранная из независимых walk колонок.
/// Колонки, в которых строки не оказалось, просто отсутствуют.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedRow {
    pub index: RowIndex,
    pub cells: BTreeMap<Field, RawValue>,
}

impl CorrelatedRow {
    pub fn get(&self, field: Field) -> Option<&RawValue> {
        self.cells.get(&field)
    }
}

/// Всё, что прочитано за цикл, до декодирования
#[derive(Debug, Clone, Default)]
pub struct RawReads {
    pub scalars: ScalarResult,
    pub columns: BTreeMap<Field, Vec<(RowIndex, RawValue)>>,
}

impl RawReads {
    pub fn scalar(&self, field: Field) -> Option<&RawValue> {
        self.scalars.get(&field)
    }

    pub fn column(&self, field: Field) -> &[(RowIndex, RawValue)] {
        self.columns.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn tables(&self, fields: &[Field]) -> Vec<TableResult> {
        fields
            .iter()
            .map(|field| TableResult {
                field: *field,
                rows: self.column(*field).to_vec(),
            })
            .collect()
    }
}

/// Состояния цикла опроса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Connecting,
    Reading,
    Aggregating,
    Complete,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Init => "init",
            Phase::Connecting => "connecting",
            Phase::Reading => "reading",
            Phase::Aggregating => "aggregating",
            Phase::Complete => "complete",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Отказ цикла целиком. Всё остальное портит только отдельное поле.
#[derive(Debug, Clone, Error)]
pub enum PollError {
    #[error("нет связи с {target}")]
    Connectivity {
        target: String,
        #[source]
        source: SnmpError,
    },

    #[error("{target}: учётные данные отклонены")]
    Auth {
        target: String,
        #[source]
        source: SnmpError,
    },

    #[error("{target}: некорректная цель опроса: {reason}")]
    InvalidEndpoint { target: String, reason: String },
}

impl PollError {
    /// Раскладывает ошибку открытия сессии
    pub fn from_connect(target: &str, err: SnmpError) -> Self {
        match err {
            SnmpError::Auth { .. } => PollError::Auth {
                target: target.to_string(),
                source: err,
            },
            SnmpError::Unsupported(reason) | SnmpError::InvalidOid(reason) => {
                PollError::InvalidEndpoint {
                    target: target.to_string(),
                    reason,
                }
            }
            other => PollError::Connectivity {
                target: target.to_string(),
                source: other,
            },
        }
    }

    pub fn target(&self) -> &str {
        match self {
            PollError::Connectivity { target, .. }
            | PollError::Auth { target, .. }
            | PollError::InvalidEndpoint { target, .. } => target,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Connectivity { .. } => "connectivity",
            PollError::Auth { .. } => "auth",
            PollError::InvalidEndpoint { .. } => "invalid_endpoint",
        }
    }
}
