use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Field;

/// Чем закончилось чтение одного логического поля
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FieldOutcome {
    Read,
    /// Устройство не знает этот OID; поле просто отсутствует
    Unsupported,
    /// Таймаут или ошибка транспорта при чтении поля
    Failed(String),
    /// Значение прочитано, но в неожиданной кодировке
    Anomaly(String),
}

impl FieldOutcome {
    fn severity(&self) -> u8 {
        match self {
            FieldOutcome::Read => 0,
            FieldOutcome::Unsupported => 1,
            FieldOutcome::Anomaly(_) => 2,
            FieldOutcome::Failed(_) => 3,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FieldOutcome::Read => "read",
            FieldOutcome::Unsupported => "unsupported",
            FieldOutcome::Failed(_) => "failed",
            FieldOutcome::Anomaly(_) => "anomaly",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            FieldOutcome::Failed(detail) | FieldOutcome::Anomaly(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Итог по каждому полю цикла опроса
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldReport(BTreeMap<Field, FieldOutcome>);

impl FieldReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Записывает исход. Для колонок таблиц исходов бывает несколько
    /// (по строке); остаётся самый тяжёлый.
    pub fn record(&mut self, field: Field, outcome: FieldOutcome) {
        match self.0.get(&field) {
            Some(existing) if existing.severity() >= outcome.severity() => {}
            _ => {
                self.0.insert(field, outcome);
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<&FieldOutcome> {
        self.0.get(&field)
    }

    pub fn is_read(&self, field: Field) -> bool {
        matches!(self.0.get(&field), Some(FieldOutcome::Read))
    }

    pub fn total(&self) -> usize {
        self.0.len()
    }

    pub fn successful(&self) -> usize {
        self.0
            .values()
            .filter(|o| matches!(o, FieldOutcome::Read))
            .count()
    }

    /// Поля, прочитанные не полностью
    pub fn problems(&self) -> impl Iterator<Item = (Field, &FieldOutcome)> {
        self.0
            .iter()
            .filter(|(_, outcome)| !matches!(outcome, FieldOutcome::Read))
            .map(|(field, outcome)| (*field, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_outcome_wins_per_field() {
        let mut report = FieldReport::new();
        report.record(Field::SupplyLevel, FieldOutcome::Read);
        report.record(Field::SupplyLevel, FieldOutcome::Anomaly("-9".into()));
        report.record(Field::SupplyLevel, FieldOutcome::Read);
        report.record(Field::SysUptime, FieldOutcome::Failed("timeout".into()));
        report.record(Field::SysName, FieldOutcome::Read);

        assert_eq!(report.get(Field::SupplyLevel), Some(&FieldOutcome::Anomaly("-9".into())));
        assert_eq!(report.total(), 3);
        assert_eq!(report.successful(), 1);
        assert_eq!(report.problems().count(), 2);
    }

    #[test]
    fn serializes_by_mib_name() {
        let mut report = FieldReport::new();
        report.record(Field::SysContact, FieldOutcome::Unsupported);
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"sysContact":{"status":"unsupported"}}"#
        );
    }
}
