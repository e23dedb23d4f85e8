//! Производитель и модель по строкам из MIB-II.
//!
//! Это эвристика, а не реестр. Известные ограничения:
//! - поиск подстрок чувствителен к регистру, "hp" в нижнем регистре не найдётся;
//! - короткий маркер "HP" может встретиться внутри чужого текста
//!   (например, в названии модели другого вендора) и победит, потому что
//!   проверяется первым;
//! - поле `PID:` есть не у всех агентов; без него модель берётся из
//!   sysLocation/sysName, где часто лежит что угодно, кроме модели.

use serde::Serialize;

use crate::catalog::oids::ENTERPRISES;
use crate::catalog::vendors::DESCRIPTION_MARKERS;
use crate::catalog::Manufacturer;
use crate::snmp::parse_arcs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrinterIdentity {
    pub manufacturer: Manufacturer,
    pub model: String,
}

/// Источники для определения идентичности принтера
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySources<'a> {
    pub description: Option<&'a str>,
    pub object_id: Option<&'a str>,
    pub location: Option<&'a str>,
    pub name: Option<&'a str>,
    pub host: &'a str,
}

impl PrinterIdentity {
    pub fn resolve(sources: IdentitySources<'_>) -> Self {
        let manufacturer = match sources.description.map(manufacturer_from_description) {
            Some(found) if found != Manufacturer::Unknown => found,
            _ => sources
                .object_id
                .map(manufacturer_from_object_id)
                .unwrap_or(Manufacturer::Unknown),
        };

        let model = sources
            .description
            .and_then(model_from_description)
            .or_else(|| non_empty(sources.location))
            .or_else(|| non_empty(sources.name))
            .unwrap_or_else(|| sources.host.to_string());

        Self {
            manufacturer,
            model,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Значение поля `PID:` (соглашение PJL). Оканчивается на `;` или `,`.
pub fn model_from_description(description: &str) -> Option<String> {
    let (_, rest) = description.split_once("PID:")?;
    let value = rest
        .split([';', ','])
        .next()
        .unwrap_or_default()
        .trim();

    (!value.is_empty()).then(|| value.to_string())
}

/// Первое совпадение по порядку таблицы, с учётом регистра
pub fn manufacturer_from_description(description: &str) -> Manufacturer {
    DESCRIPTION_MARKERS
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| description.contains(m)))
        .map(|(_, manufacturer)| *manufacturer)
        .unwrap_or(Manufacturer::Unknown)
}

/// Номер предприятия из sysObjectID (1.3.6.1.4.1.N...)
pub fn manufacturer_from_object_id(object_id: &str) -> Manufacturer {
    let (Ok(arcs), Ok(prefix)) = (parse_arcs(object_id), parse_arcs(ENTERPRISES)) else {
        return Manufacturer::Unknown;
    };

    match arcs.strip_prefix(prefix.as_slice()) {
        Some([number, ..]) => Manufacturer::from_enterprise(*number),
        _ => Manufacturer::Unknown,
    }
}
