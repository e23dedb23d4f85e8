use std::fmt;

use serde::{Serialize, Serializer};
use snmp2::Oid;

use super::SnmpError;

/// Разбирает OID в виде строки "1.3.6.1..." в числовые дуги
pub fn parse_arcs(s: &str) -> Result<Vec<u64>, SnmpError> {
    s.trim()
        .trim_start_matches('.')
        .split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| SnmpError::InvalidOid(s.to_string()))
}

pub fn parse_oid(s: &str) -> Result<Oid<'static>, SnmpError> {
    let parts = parse_arcs(s)?;
    Oid::from(&parts).map_err(|e| SnmpError::InvalidOid(format!("{s}: {e:?}")))
}

/// Суффикс строки таблицы: то, что идёт в OID после базы колонки
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowIndex(Vec<u64>);

impl RowIndex {
    pub fn new(parts: Vec<u64>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[u64] {
        &self.0
    }

    /// Индекс из одной дуги, как у большинства таблиц Printer-MIB
    pub fn as_single(&self) -> Option<u64> {
        match self.0.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    /// Возвращает суффикс `full` относительно `base`, если `full` лежит в поддереве `base`
    pub fn under(base: &[u64], full: &[u64]) -> Option<Self> {
        if full.len() > base.len() && full.starts_with(base) {
            Some(Self(full[base.len()..].to_vec()))
        } else {
            None
        }
    }
}

impl From<u64> for RowIndex {
    fn from(index: u64) -> Self {
        Self(vec![index])
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for RowIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_oids() {
        assert_eq!(parse_arcs("1.3.6.1.2.1.1.1.0").unwrap(), vec![1, 3, 6, 1, 2, 1, 1, 1, 0]);
        assert_eq!(parse_arcs(".1.3.6").unwrap(), vec![1, 3, 6]);
        assert!(matches!(parse_arcs("1.3.x"), Err(SnmpError::InvalidOid(_))));
    }

    #[test]
    fn row_index_is_suffix_under_base() {
        let base = [1, 3, 6, 1, 2, 1, 43, 11, 1, 1, 6, 1];
        let full = [1, 3, 6, 1, 2, 1, 43, 11, 1, 1, 6, 1, 3];
        assert_eq!(RowIndex::under(&base, &full), Some(RowIndex::from(3)));

        let sibling = [1, 3, 6, 1, 2, 1, 43, 11, 1, 1, 7, 1, 1];
        assert_eq!(RowIndex::under(&base, &sibling), None);
        assert_eq!(RowIndex::under(&base, &base), None);
    }

    #[test]
    fn multi_arc_indices_order_numerically() {
        let a = RowIndex::new(vec![1, 2]);
        let b = RowIndex::new(vec![1, 10]);
        assert!(a < b);
        assert_eq!(b.to_string(), "1.10");
        assert_eq!(b.as_single(), None);
    }
}
