//! Таблицы перечислений Printer-MIB / Host Resources.
//!
//! Неизвестный код никогда не приводит к ошибке: он попадает в
//! запасной вариант, который хранит исходное число для логов.

use std::fmt;

use serde::{Serialize, Serializer};

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $code:literal => $variant:ident = $label:literal, )+
        }
        fallback $fallback:ident = $fallback_label:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            $fallback(i64),
        }

        impl $name {
            pub fn from_code(code: i64) -> Self {
                match code {
                    $( $code => Self::$variant, )+
                    other => Self::$fallback(other),
                }
            }

            pub fn code(&self) -> i64 {
                match self {
                    $( Self::$variant => $code, )+
                    Self::$fallback(raw) => *raw,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::$fallback(_) => $fallback_label,
                }
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, Self::$fallback(_))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    Self::$fallback(raw) => write!(f, "{} ({})", $fallback_label, raw),
                    other => f.write_str(other.as_str()),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

code_table! {
    /// hrDeviceStatus
    pub enum DeviceStatus {
        1 => Unknown = "unknown",
        2 => Running = "online",
        3 => Warning = "warning",
        4 => Testing = "testing",
        5 => Down = "down",
    }
    fallback Unrecognized = "unknown";
}

code_table! {
    /// hrPrinterStatus
    pub enum PrinterStatus {
        1 => Other = "other",
        2 => Unknown = "unknown",
        3 => Idle = "idle",
        4 => Printing = "printing",
        5 => Warmup = "warmup",
    }
    fallback Unrecognized = "other";
}

code_table! {
    /// Состояние тракта подачи бумаги
    pub enum DetectorStatus {
        0 => Unavailable = "unavailable",
        2 => On = "on",
        3 => Off = "off",
        4 => Jam = "jam",
        5 => NoPaper = "no_paper",
    }
    fallback Unrecognized = "unavailable";
}

code_table! {
    /// PrtMarkerSuppliesTypeTC
    pub enum SupplyType {
        1 => Other = "other",
        2 => Unknown = "unknown",
        3 => Toner = "toner",
        4 => WasteToner = "wasteToner",
        5 => Ink = "ink",
        6 => InkCartridge = "inkCartridge",
        7 => InkRibbon = "inkRibbon",
        8 => WasteInk = "wasteInk",
        9 => Opc = "opc",
        10 => Developer = "developer",
        11 => FuserOil = "fuserOil",
        12 => SolidWax = "solidWax",
        13 => RibbonWax = "ribbonWax",
        14 => WasteWax = "wasteWax",
        15 => Fuser = "fuser",
        16 => CoronaWire = "coronaWire",
        17 => FuserOilWick = "fuserOilWick",
        18 => CleanerUnit = "cleanerUnit",
        19 => FuserCleaningPad = "fuserCleaningPad",
        20 => TransferUnit = "transferUnit",
        21 => TonerCartridge = "tonerCartridge",
        22 => FuserOiler = "fuserOiler",
        23 => Water = "water",
        24 => WasteWater = "wasteWater",
        25 => GlueWaterAdditive = "glueWaterAdditive",
        26 => WastePaper = "wastePaper",
        27 => BindingSupply = "bindingSupply",
        28 => BandingSupply = "bandingSupply",
        29 => StitchingWire = "stitchingWire",
        30 => ShrinkWrap = "shrinkWrap",
        31 => PaperWrap = "paperWrap",
        32 => Staples = "staples",
        33 => Inserts = "inserts",
        34 => Covers = "covers",
    }
    fallback Unrecognized = "other";
}

impl SupplyType {
    /// Расходник, который наносит краситель (для него имеет смысл цвет)
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            SupplyType::Toner
                | SupplyType::TonerCartridge
                | SupplyType::Ink
                | SupplyType::InkCartridge
                | SupplyType::InkRibbon
                | SupplyType::SolidWax
                | SupplyType::RibbonWax
        )
    }
}

code_table! {
    /// PrtMarkerSuppliesClassTC
    pub enum SupplyClass {
        1 => Other = "other",
        2 => Unknown = "unknown",
        3 => Consumed = "consumed",
        4 => Filled = "filled",
    }
    fallback Unrecognized = "other";
}

code_table! {
    /// PrtMarkerSuppliesSupplyUnitTC
    pub enum SupplyUnit {
        1 => Other = "other",
        2 => Unknown = "unknown",
        3 => TenThousandthsOfInches = "tenThousandthsOfInches",
        4 => Micrometers = "micrometers",
        7 => Impressions = "impressions",
        8 => Sheets = "sheets",
        11 => Hours = "hours",
        12 => ThousandthsOfOunces = "thousandthsOfOunces",
        13 => TenthsOfGrams = "tenthsOfGrams",
        14 => HundredthsOfFluidOunces = "hundredthsOfFluidOunces",
        15 => TenthsOfMilliliters = "tenthsOfMilliliters",
        16 => Feet = "feet",
        17 => Meters = "meters",
        18 => Items = "items",
        19 => Percent = "percent",
    }
    fallback Unrecognized = "other";
}

code_table! {
    /// PrtInputTypeTC
    pub enum InputType {
        1 => Other = "other",
        2 => Unknown = "unknown",
        3 => RemovableTray = "sheetFeedAutoRemovableTray",
        4 => NonRemovableTray = "sheetFeedAutoNonRemovableTray",
        5 => ManualFeed = "sheetFeedManual",
        6 => ContinuousRoll = "continuousRoll",
        7 => ContinuousFanFold = "continuousFanFold",
    }
    fallback Unrecognized = "other";
}

code_table! {
    /// PrtCoverStatusTC
    pub enum CoverState {
        1 => Other = "other",
        2 => Unknown = "unknown",
        3 => Open = "open",
        4 => Closed = "closed",
        5 => InterlockOpen = "interlock_open",
        6 => InterlockClosed = "interlock_closed",
    }
    fallback Unrecognized = "unknown";
}

/// Цвет красителя после нормализации имени из prtMarkerColorantValue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkerColor {
    Black,
    Cyan,
    Magenta,
    Yellow,
    LightCyan,
    LightMagenta,
    LightBlack,
    Gray,
    Orange,
    Violet,
    Red,
    Green,
    Blue,
    Photo,
    /// Имя, которого нет в таблице; хранится как прислал агент
    Other(String),
}

/// Таблица нормализации: ключ уже без регистра, пробелов и дефисов
fn known_color(key: &str) -> Option<MarkerColor> {
    let color = match key {
        "black" => MarkerColor::Black,
        "cyan" => MarkerColor::Cyan,
        "magenta" => MarkerColor::Magenta,
        "yellow" => MarkerColor::Yellow,
        "lightcyan" => MarkerColor::LightCyan,
        "lightmagenta" => MarkerColor::LightMagenta,
        "lightblack" => MarkerColor::LightBlack,
        "gray" | "grey" => MarkerColor::Gray,
        "orange" => MarkerColor::Orange,
        "violet" => MarkerColor::Violet,
        "red" => MarkerColor::Red,
        "green" => MarkerColor::Green,
        "blue" => MarkerColor::Blue,
        "photo" => MarkerColor::Photo,
        _ => return None,
    };
    Some(color)
}

impl MarkerColor {
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        known_color(&key).unwrap_or_else(|| MarkerColor::Other(name.trim().to_string()))
    }

    pub fn display_name(&self) -> &str {
        match self {
            MarkerColor::Black => "Black",
            MarkerColor::Cyan => "Cyan",
            MarkerColor::Magenta => "Magenta",
            MarkerColor::Yellow => "Yellow",
            MarkerColor::LightCyan => "Light Cyan",
            MarkerColor::LightMagenta => "Light Magenta",
            MarkerColor::LightBlack => "Light Black",
            MarkerColor::Gray => "Gray",
            MarkerColor::Orange => "Orange",
            MarkerColor::Violet => "Violet",
            MarkerColor::Red => "Red",
            MarkerColor::Green => "Green",
            MarkerColor::Blue => "Blue",
            MarkerColor::Photo => "Photo",
            MarkerColor::Other(name) => name,
        }
    }

    /// RGB-подсказка для UI
    pub fn rgb(&self) -> Option<[u8; 3]> {
        let rgb = match self {
            MarkerColor::Black => [0, 0, 0],
            MarkerColor::Cyan => [0, 255, 255],
            MarkerColor::Magenta => [255, 0, 255],
            MarkerColor::Yellow => [255, 255, 0],
            MarkerColor::LightCyan => [128, 255, 255],
            MarkerColor::LightMagenta => [255, 128, 255],
            MarkerColor::LightBlack => [64, 64, 64],
            MarkerColor::Gray => [128, 128, 128],
            MarkerColor::Orange => [255, 165, 0],
            MarkerColor::Violet => [238, 130, 238],
            MarkerColor::Red => [255, 0, 0],
            MarkerColor::Green => [0, 128, 0],
            MarkerColor::Blue => [0, 0, 255],
            MarkerColor::Photo => [128, 128, 255],
            MarkerColor::Other(_) => return None,
        };
        Some(rgb)
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for MarkerColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}
