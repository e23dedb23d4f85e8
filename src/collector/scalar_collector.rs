use tracing::debug;

use super::types::ScalarResult;
use crate::catalog::Field;
use crate::models::{FieldOutcome, FieldReport};
use crate::snmp::{RawValue, Session, SnmpError, SnmpSession};

/// Модуль для сбора скалярных SNMP значений
pub struct ScalarCollector;

impl ScalarCollector {
    /// Читает скаляры по очереди. Отказ одного поля не мешает остальным;
    /// прерывает только отказ аутентификации.
    pub async fn collect_scalars<S: SnmpSession>(
        session: &mut Session<S>,
        fields: &[Field],
        report: &mut FieldReport,
    ) -> Result<ScalarResult, SnmpError> {
        let mut values = ScalarResult::new();

        for field in fields {
            if let Some(value) = Self::collect_single_scalar(session, *field, report).await? {
                values.insert(*field, value);
            }
        }

        Ok(values)
    }

    /// Читает одно скалярное значение и записывает исход в отчёт
    pub async fn collect_single_scalar<S: SnmpSession>(
        session: &mut Session<S>,
        field: Field,
        report: &mut FieldReport,
    ) -> Result<Option<RawValue>, SnmpError> {
        match session.get(field.oid()).await {
            Ok(Some(value)) => {
                report.record(field, FieldOutcome::Read);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!(target = %session.target(), field = %field, "OID не поддерживается");
                report.record(field, FieldOutcome::Unsupported);
                Ok(None)
            }
            Err(err) if err.is_auth() => Err(err),
            Err(err) => {
                debug!(target = %session.target(), field = %field, error = %err, "поле не прочитано");
                report.record(field, FieldOutcome::Failed(err.to_string()));
                Ok(None)
            }
        }
    }
}
