use std::fmt;

use serde::{Serialize, Serializer};

/// Производитель принтера, определённый эвристикой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Manufacturer {
    Hp,
    Canon,
    Epson,
    Brother,
    Lexmark,
    Samsung,
    Xerox,
    KonicaMinolta,
    Kyocera,
    Oki,
    Panasonic,
    Ricoh,
    Sharp,
    Unknown,
}

/// Подстроки для поиска в sysDescr. Порядок важен: побеждает первое совпадение,
/// HP и Hewlett-Packard проверяются вместе.
pub const DESCRIPTION_MARKERS: &[(&[&str], Manufacturer)] = &[
    (&["HP", "Hewlett-Packard"], Manufacturer::Hp),
    (&["Canon"], Manufacturer::Canon),
    (&["Epson", "EPSON"], Manufacturer::Epson),
    (&["Brother"], Manufacturer::Brother),
    (&["Lexmark"], Manufacturer::Lexmark),
    (&["Samsung"], Manufacturer::Samsung),
    (&["Xerox"], Manufacturer::Xerox),
    (&["Konica Minolta", "KONICA MINOLTA"], Manufacturer::KonicaMinolta),
    (&["Kyocera", "KYOCERA"], Manufacturer::Kyocera),
    (&["OKI"], Manufacturer::Oki),
    (&["Panasonic"], Manufacturer::Panasonic),
    (&["Ricoh", "RICOH"], Manufacturer::Ricoh),
    (&["Sharp", "SHARP"], Manufacturer::Sharp),
];

/// Private Enterprise Numbers из sysObjectID (1.3.6.1.4.1.N)
pub const ENTERPRISE_NUMBERS: &[(u64, Manufacturer)] = &[
    (11, Manufacturer::Hp),
    (1602, Manufacturer::Canon),
    (1248, Manufacturer::Epson),
    (2435, Manufacturer::Brother),
    (641, Manufacturer::Lexmark),
    (236, Manufacturer::Samsung),
    (253, Manufacturer::Xerox),
    (18334, Manufacturer::KonicaMinolta),
    (1347, Manufacturer::Kyocera),
    (2001, Manufacturer::Oki),
    (258, Manufacturer::Panasonic),
    (367, Manufacturer::Ricoh),
    (2385, Manufacturer::Sharp),
];

impl Manufacturer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Manufacturer::Hp => "HP",
            Manufacturer::Canon => "Canon",
            Manufacturer::Epson => "Epson",
            Manufacturer::Brother => "Brother",
            Manufacturer::Lexmark => "Lexmark",
            Manufacturer::Samsung => "Samsung",
            Manufacturer::Xerox => "Xerox",
            Manufacturer::KonicaMinolta => "Konica Minolta",
            Manufacturer::Kyocera => "Kyocera",
            Manufacturer::Oki => "OKI",
            Manufacturer::Panasonic => "Panasonic",
            Manufacturer::Ricoh => "Ricoh",
            Manufacturer::Sharp => "Sharp",
            Manufacturer::Unknown => "Unknown",
        }
    }

    pub fn from_enterprise(number: u64) -> Self {
        ENTERPRISE_NUMBERS
            .iter()
            .find(|(pen, _)| *pen == number)
            .map(|(_, manufacturer)| *manufacturer)
            .unwrap_or(Manufacturer::Unknown)
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Manufacturer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
