use std::time::Duration;

use super::{DecodeAnomaly, counter};
use crate::snmp::{RawValue, RowIndex};

/// Байты в текст: UTF-8, а если не вышло, Latin-1 (байт = символ)
fn bytes_to_string(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Убирает управляющие символы и символ замены, обрезает пробелы по краям
fn printable(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() && *c != char::REPLACEMENT_CHARACTER)
        .collect::<String>()
        .trim()
        .to_string()
}

/// DisplayString: описание, имя, серийный номер и т.п.
pub fn octet_text(raw: &RawValue) -> Result<String, DecodeAnomaly> {
    match raw {
        RawValue::OctetString(bytes) => Ok(printable(&bytes_to_string(bytes))),
        other => Err(DecodeAnomaly::wrong_type("OCTET STRING", other)),
    }
}

/// sysObjectID в точечной записи
pub fn object_id(raw: &RawValue) -> Result<String, DecodeAnomaly> {
    match raw {
        RawValue::ObjectId(oid) => Ok(oid.clone()),
        // некоторые агенты отдают OID строкой
        RawValue::OctetString(_) => octet_text(raw),
        other => Err(DecodeAnomaly::wrong_type("OBJECT IDENTIFIER", other)),
    }
}

/// Одна строка буфера консоли. Пустой буфер даёт пустую строку, не `None`.
pub fn display_text(raw: &RawValue) -> Result<String, DecodeAnomaly> {
    match raw {
        RawValue::OctetString(bytes) => Ok(printable(&bytes_to_string(bytes))),
        RawValue::Null => Ok(String::new()),
        other => Err(DecodeAnomaly::wrong_type("OCTET STRING", other)),
    }
}

/// Все строки консоли по порядку индексов, пустые строки пропускаются.
/// Строки, которые не удалось разобрать, возвращаются отдельно.
pub fn display_lines(rows: &[(RowIndex, RawValue)]) -> (String, Vec<(RowIndex, DecodeAnomaly)>) {
    let mut sorted: Vec<&(RowIndex, RawValue)> = rows.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let mut lines = Vec::new();
    let mut anomalies = Vec::new();
    for (index, raw) in sorted {
        match display_text(raw) {
            Ok(line) if line.is_empty() => {}
            Ok(line) => lines.push(line),
            Err(anomaly) => anomalies.push((index.clone(), anomaly)),
        }
    }

    (lines.join("\n"), anomalies)
}

/// sysUpTime: сотые доли секунды
pub fn uptime(raw: &RawValue) -> Result<Duration, DecodeAnomaly> {
    let ticks = match raw {
        RawValue::Timeticks(ticks) => u64::from(*ticks),
        other => counter(other)?,
    };
    Ok(Duration::from_millis(ticks.saturating_mul(10)))
}

/// ifPhysAddress в виде `aa:bb:cc:dd:ee:ff`. Пустое значение: адреса нет.
pub fn mac_address(raw: &RawValue) -> Result<Option<String>, DecodeAnomaly> {
    let bytes = match raw {
        RawValue::OctetString(bytes) => bytes,
        RawValue::Null => return Ok(None),
        other => return Err(DecodeAnomaly::wrong_type("OCTET STRING", other)),
    };

    if bytes.is_empty() {
        return Ok(None);
    }

    // Часть агентов отдаёт адрес текстом: "00:1B:A9:12:34:56" или "001BA9123456"
    let octets = match bytes.len() {
        6 => bytes.clone(),
        _ => parse_hex_text(bytes).unwrap_or_else(|| bytes.clone()),
    };

    if octets.iter().all(|b| *b == 0) {
        return Ok(None);
    }

    Ok(Some(
        octets
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":"),
    ))
}

fn parse_hex_text(bytes: &[u8]) -> Option<Vec<u8>> {
    let text = std::str::from_utf8(bytes).ok()?.trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    let digits: String = text
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | ' ' | '.'))
        .collect();

    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_strips_control_bytes() {
        let raw = RawValue::OctetString(b"\x00Ready\x07\r\n\x00\x00".to_vec());
        assert_eq!(display_text(&raw).unwrap(), "Ready");
    }

    #[test]
    fn empty_display_is_empty_string() {
        assert_eq!(display_text(&RawValue::OctetString(Vec::new())).unwrap(), "");
        assert_eq!(display_text(&RawValue::OctetString(vec![0, 0, 0])).unwrap(), "");
    }

    #[test]
    fn truncated_utf8_falls_back_to_latin1() {
        // "Bereit" + обрезанная последовательность UTF-8
        let raw = RawValue::OctetString(vec![b'B', b'e', b'r', b'e', b'i', b't', b' ', 0xC3]);
        assert_eq!(display_text(&raw).unwrap(), "Bereit \u{c3}");

        let raw = RawValue::OctetString("Папка".as_bytes().to_vec());
        assert_eq!(display_text(&raw).unwrap(), "Папка");
    }

    #[test]
    fn display_lines_join_in_index_order() {
        let rows = vec![
            (RowIndex::from(2), RawValue::from("Tray 2 empty")),
            (RowIndex::from(1), RawValue::from("Ready")),
            (RowIndex::from(3), RawValue::from("   ")),
            (RowIndex::from(4), RawValue::Integer(5)),
        ];
        let (text, anomalies) = display_lines(&rows);
        assert_eq!(text, "Ready\nTray 2 empty");
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].0, RowIndex::from(4));
    }

    #[test]
    fn uptime_is_in_hundredths() {
        assert_eq!(uptime(&RawValue::Timeticks(12_345)).unwrap(), Duration::from_millis(123_450));
        assert!(uptime(&RawValue::from("yesterday")).is_err());
    }

    #[test]
    fn mac_formats() {
        let raw = RawValue::OctetString(vec![0x00, 0x1b, 0xa9, 0x12, 0x34, 0x56]);
        assert_eq!(mac_address(&raw).unwrap().as_deref(), Some("00:1b:a9:12:34:56"));

        let raw = RawValue::from("00:1B:A9:12:34:56");
        assert_eq!(mac_address(&raw).unwrap().as_deref(), Some("00:1b:a9:12:34:56"));

        let raw = RawValue::from("0x001BA9123456");
        assert_eq!(mac_address(&raw).unwrap().as_deref(), Some("00:1b:a9:12:34:56"));

        assert_eq!(mac_address(&RawValue::OctetString(Vec::new())).unwrap(), None);
        assert_eq!(mac_address(&RawValue::OctetString(vec![0; 6])).unwrap(), None);
        assert!(mac_address(&RawValue::Integer(1)).is_err());
    }
}
