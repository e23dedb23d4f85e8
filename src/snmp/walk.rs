use tracing::{debug, warn};

use super::oid::{RowIndex, parse_arcs};
use super::value::RawValue;

/// Что делать дальше после обработки очередного varbind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    Continue,
    Done,
}

/// Состояние одного walk: граница поддерева, защита от зацикливания
/// и лимит строк. Общее для GETNEXT (v1) и GETBULK (v2c/v3).
#[derive(Debug)]
pub struct WalkState {
    base: Vec<u64>,
    last: Option<Vec<u64>>,
    rows: Vec<(RowIndex, RawValue)>,
    max_rows: usize,
}

impl WalkState {
    pub fn new(base: Vec<u64>, max_rows: usize) -> Self {
        Self {
            base,
            last: None,
            rows: Vec::new(),
            max_rows,
        }
    }

    pub fn from_oid(base: &str, max_rows: usize) -> Result<Self, super::SnmpError> {
        Ok(Self::new(parse_arcs(base)?, max_rows))
    }

    /// Принимает varbind из ответа. `value == None` означает исключение
    /// (endOfMibView и т.п.) и завершает обход.
    pub fn accept(&mut self, oid: &str, value: Option<RawValue>) -> WalkStep {
        let Ok(arcs) = parse_arcs(oid) else {
            warn!(oid, "агент вернул нечитаемый OID, walk остановлен");
            return WalkStep::Done;
        };

        let Some(index) = RowIndex::under(&self.base, &arcs) else {
            return WalkStep::Done;
        };

        if let Some(last) = &self.last {
            if arcs <= *last {
                warn!(oid, "OID не возрастает, walk остановлен");
                return WalkStep::Done;
            }
        }

        let Some(value) = value else {
            return WalkStep::Done;
        };

        self.rows.push((index, value));
        self.last = Some(arcs);

        if self.rows.len() >= self.max_rows {
            debug!(max_rows = self.max_rows, "достигнут лимит строк walk");
            return WalkStep::Done;
        }

        WalkStep::Continue
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn into_rows(self) -> Vec<(RowIndex, RawValue)> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "1.3.6.1.2.1.43.11.1.1.9.1";

    #[test]
    fn stops_at_subtree_boundary() {
        let mut walk = WalkState::from_oid(BASE, 100).unwrap();
        assert_eq!(
            walk.accept("1.3.6.1.2.1.43.11.1.1.9.1.1", Some(RawValue::Integer(80))),
            WalkStep::Continue
        );
        assert_eq!(
            walk.accept("1.3.6.1.2.1.43.11.1.1.9.1.2", Some(RawValue::Integer(-3))),
            WalkStep::Continue
        );
        assert_eq!(
            walk.accept("1.3.6.1.2.1.43.12.1.1.4.1.1", Some(RawValue::from("black"))),
            WalkStep::Done
        );

        let rows = walk.into_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], (RowIndex::from(2), RawValue::Integer(-3)));
    }

    #[test]
    fn row_guard_limits_runaway_agents() {
        let mut walk = WalkState::from_oid(BASE, 3).unwrap();
        let mut steps = Vec::new();
        for i in 1..=10 {
            steps.push(walk.accept(&format!("{BASE}.{i}"), Some(RawValue::Integer(i))));
            if steps.last() == Some(&WalkStep::Done) {
                break;
            }
        }
        assert_eq!(walk.row_count(), 3);
        assert_eq!(steps.last(), Some(&WalkStep::Done));
    }

    #[test]
    fn non_increasing_oid_aborts_without_losing_rows() {
        let mut walk = WalkState::from_oid(BASE, 100).unwrap();
        walk.accept(&format!("{BASE}.5"), Some(RawValue::Integer(1)));
        assert_eq!(
            walk.accept(&format!("{BASE}.5"), Some(RawValue::Integer(1))),
            WalkStep::Done
        );
        assert_eq!(walk.into_rows().len(), 1);
    }

    #[test]
    fn end_of_mib_view_finishes() {
        let mut walk = WalkState::from_oid(BASE, 100).unwrap();
        assert_eq!(walk.accept(&format!("{BASE}.1"), None), WalkStep::Done);
        assert_eq!(walk.row_count(), 0);
    }
}
