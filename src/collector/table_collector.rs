use std::collections::BTreeMap;

use tracing::debug;

use super::types::{CorrelatedRow, TableResult};
use crate::catalog::Field;
use crate::models::{FieldOutcome, FieldReport};
use crate::snmp::{Session, SnmpError, SnmpSession};

/// Модуль для сбора табличных SNMP данных
pub struct TableCollector;

impl TableCollector {
    /// Обходит колонки одной таблицы. Каждая колонка обходится отдельно,
    /// отказ одной не мешает остальным.
    pub async fn collect_tables<S: SnmpSession>(
        session: &mut Session<S>,
        columns: &[Field],
        report: &mut FieldReport,
    ) -> Result<Vec<TableResult>, SnmpError> {
        let mut results = Vec::with_capacity(columns.len());

        for field in columns {
            results.push(Self::collect_single_table(session, *field, report).await?);
        }

        Ok(results)
    }

    /// Обходит одну колонку. Пустой обход значит, что у агента нет
    /// такой таблицы.
    pub async fn collect_single_table<S: SnmpSession>(
        session: &mut Session<S>,
        field: Field,
        report: &mut FieldReport,
    ) -> Result<TableResult, SnmpError> {
        let rows = match session.walk(field.oid()).await {
            Ok(rows) if rows.is_empty() => {
                debug!(target = %session.target(), field = %field, "колонка пуста");
                report.record(field, FieldOutcome::Unsupported);
                rows
            }
            Ok(rows) => {
                debug!(target = %session.target(), field = %field, rows = rows.len(), "колонка прочитана");
                report.record(field, FieldOutcome::Read);
                rows
            }
            Err(err) if err.is_auth() => return Err(err),
            Err(err) => {
                debug!(target = %session.target(), field = %field, error = %err, "колонка не прочитана");
                report.record(field, FieldOutcome::Failed(err.to_string()));
                Vec::new()
            }
        };

        Ok(TableResult { field, rows })
    }

    /// Склеивает колонки по индексу строки. Строка существует, если её
    /// индекс встретился хотя бы в одной колонке; отсутствующие ячейки
    /// остаются пустыми. Порядок строк по возрастанию индекса.
    pub fn correlate(tables: &[TableResult]) -> Vec<CorrelatedRow> {
        let mut rows: BTreeMap<_, CorrelatedRow> = BTreeMap::new();

        for table in tables {
            for (index, value) in &table.rows {
                rows.entry(index.clone())
                    .or_insert_with(|| CorrelatedRow {
                        index: index.clone(),
                        cells: BTreeMap::new(),
                    })
                    .cells
                    .insert(table.field, value.clone());
            }
        }

        rows.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snmp::{RawValue, RowIndex};

    fn column(field: Field, rows: Vec<(u64, RawValue)>) -> TableResult {
        TableResult {
            field,
            rows: rows
                .into_iter()
                .map(|(i, v)| (RowIndex::from(i), v))
                .collect(),
        }
    }

    #[test]
    fn rows_are_the_union_of_column_indices() {
        let tables = vec![
            column(
                Field::SupplyDescription,
                vec![(1, "Black".into()), (2, "Cyan".into())],
            ),
            column(Field::SupplyLevel, vec![(1, RawValue::Integer(80))]),
        ];

        let rows = TableCollector::correlate(&tables);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(Field::SupplyLevel), Some(&RawValue::Integer(80)));
        assert_eq!(rows[1].index, RowIndex::from(2));
        assert_eq!(rows[1].get(Field::SupplyLevel), None);
        assert_eq!(rows[1].get(Field::SupplyDescription), Some(&"Cyan".into()));
    }

    #[test]
    fn row_present_only_in_a_later_column_still_appears() {
        let tables = vec![
            column(Field::InputName, vec![(1, "Tray 1".into())]),
            column(Field::InputCurrentLevel, vec![(1, 250.into()), (3, 10.into())]),
        ];

        let indices: Vec<_> = TableCollector::correlate(&tables)
            .into_iter()
            .map(|row| row.index)
            .collect();

        assert_eq!(indices, vec![RowIndex::from(1), RowIndex::from(3)]);
    }

    #[test]
    fn empty_columns_give_no_rows() {
        let tables = vec![column(Field::CoverStatus, Vec::new())];
        assert!(TableCollector::correlate(&tables).is_empty());
    }
}
