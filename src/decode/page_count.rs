use serde::Serialize;

use super::{DecodeAnomaly, counter};
use crate::snmp::{RawValue, RowIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageBreakdown {
    pub color: u64,
    pub monochrome: u64,
}

/// Счётчики страниц из prtMarkerLifeCount.
///
/// Как производители раскладывают счётчики по маркерам, MIB не
/// определяет, поэтому разбивка угадывается по их количеству:
/// один счётчик это итог; два это цвет и ч/б; ровно три это итог,
/// цвет и ч/б; больше трёх: первый считается итогом, разбивки нет.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCount {
    pub total: u64,
    pub breakdown: Option<PageBreakdown>,
    /// Сырые счётчики по индексу маркера
    pub per_marker: Vec<(RowIndex, u64)>,
}

/// `None`, если таблица пустая. Счётчики с неверным типом пропускаются
/// и возвращаются как аномалии.
pub fn page_count(
    rows: &[(RowIndex, RawValue)],
) -> (Option<PageCount>, Vec<(RowIndex, DecodeAnomaly)>) {
    let mut per_marker = Vec::new();
    let mut anomalies = Vec::new();

    for (index, raw) in rows {
        match counter(raw) {
            Ok(count) => per_marker.push((index.clone(), count)),
            Err(anomaly) => anomalies.push((index.clone(), anomaly)),
        }
    }
    per_marker.sort_by(|a, b| a.0.cmp(&b.0));

    let counts: Vec<u64> = per_marker.iter().map(|(_, c)| *c).collect();
    let (total, breakdown) = match counts.as_slice() {
        [] => return (None, anomalies),
        [total] => (*total, None),
        [color, monochrome] => (
            color.saturating_add(*monochrome),
            Some(PageBreakdown {
                color: *color,
                monochrome: *monochrome,
            }),
        ),
        [total, color, monochrome] => (
            *total,
            Some(PageBreakdown {
                color: *color,
                monochrome: *monochrome,
            }),
        ),
        [total, ..] => (*total, None),
    };

    (
        Some(PageCount {
            total,
            breakdown,
            per_marker,
        }),
        anomalies,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[i64]) -> Vec<(RowIndex, RawValue)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (RowIndex::from(i as u64 + 1), RawValue::Integer(*v)))
            .collect()
    }

    #[test]
    fn single_counter_is_total() {
        let (count, _) = page_count(&rows(&[48_211]));
        let count = count.unwrap();
        assert_eq!(count.total, 48_211);
        assert_eq!(count.breakdown, None);
    }

    #[test]
    fn two_counters_are_color_and_mono() {
        let (count, _) = page_count(&rows(&[1_200, 3_400]));
        let count = count.unwrap();
        assert_eq!(count.total, 4_600);
        assert_eq!(
            count.breakdown,
            Some(PageBreakdown {
                color: 1_200,
                monochrome: 3_400
            })
        );
    }

    #[test]
    fn three_counters_are_total_color_mono() {
        let (count, _) = page_count(&rows(&[5_000, 1_000, 4_000]));
        let count = count.unwrap();
        assert_eq!(count.total, 5_000);
        assert_eq!(count.breakdown.unwrap().monochrome, 4_000);
    }

    #[test]
    fn many_counters_keep_only_total() {
        let (count, _) = page_count(&rows(&[9, 1, 2, 3]));
        let count = count.unwrap();
        assert_eq!(count.total, 9);
        assert_eq!(count.breakdown, None);
        assert_eq!(count.per_marker.len(), 4);
    }

    #[test]
    fn bad_counters_are_skipped() {
        let mut input = rows(&[700]);
        input.push((RowIndex::from(2), RawValue::from("n/a")));
        let (count, anomalies) = page_count(&input);
        assert_eq!(count.unwrap().total, 700);
        assert_eq!(anomalies.len(), 1);

        let (count, _) = page_count(&[]);
        assert!(count.is_none());
    }
}
