//! Статический каталог OID и таблиц перечислений. Только чтение,
//! общий для всех сессий.

use std::fmt;

use serde::{Serialize, Serializer};

pub mod enums;
pub mod oids;
pub mod vendors;

pub use enums::{
    CoverState, DetectorStatus, DeviceStatus, InputType, MarkerColor, PrinterStatus, SupplyClass,
    SupplyType, SupplyUnit,
};
pub use vendors::Manufacturer;

/// Как читается поле: GET одного экземпляра или walk колонки таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    Column,
}

/// Логическое поле снимка
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    SysDescr,
    SysObjectId,
    SysUptime,
    SysContact,
    SysName,
    SysLocation,
    DeviceDescription,
    DeviceStatus,
    DeviceErrors,
    PrinterStatus,
    DetectedErrorState,
    SerialNumber,
    MemorySize,
    HardwareAddress,
    PageCounters,
    SupplyDescription,
    SupplyColorantIndex,
    SupplyType,
    SupplyClass,
    SupplyUnit,
    SupplyMaxCapacity,
    SupplyLevel,
    ColorantValue,
    InputName,
    InputType,
    InputMediaName,
    InputMaxCapacity,
    InputCurrentLevel,
    InputStatus,
    CoverDescription,
    CoverStatus,
    DisplayBuffer,
}

impl Field {
    /// Скаляры в порядке чтения. sysDescr первым: им же проверяется связь.
    pub const SCALARS: &'static [Field] = &[
        Field::SysDescr,
        Field::SysObjectId,
        Field::SysUptime,
        Field::SysContact,
        Field::SysName,
        Field::SysLocation,
        Field::DeviceDescription,
        Field::DeviceStatus,
        Field::DeviceErrors,
        Field::PrinterStatus,
        Field::DetectedErrorState,
        Field::SerialNumber,
        Field::MemorySize,
        Field::HardwareAddress,
    ];

    pub const SUPPLY_COLUMNS: &'static [Field] = &[
        Field::SupplyDescription,
        Field::SupplyColorantIndex,
        Field::SupplyType,
        Field::SupplyClass,
        Field::SupplyUnit,
        Field::SupplyMaxCapacity,
        Field::SupplyLevel,
    ];

    pub const INPUT_COLUMNS: &'static [Field] = &[
        Field::InputName,
        Field::InputType,
        Field::InputMediaName,
        Field::InputMaxCapacity,
        Field::InputCurrentLevel,
        Field::InputStatus,
    ];

    pub const COVER_COLUMNS: &'static [Field] = &[Field::CoverDescription, Field::CoverStatus];

    pub fn oid(&self) -> &'static str {
        match self {
            Field::SysDescr => oids::SYS_DESCR,
            Field::SysObjectId => oids::SYS_OBJECT_ID,
            Field::SysUptime => oids::SYS_UPTIME,
            Field::SysContact => oids::SYS_CONTACT,
            Field::SysName => oids::SYS_NAME,
            Field::SysLocation => oids::SYS_LOCATION,
            Field::DeviceDescription => oids::HR_DEVICE_DESCR,
            Field::DeviceStatus => oids::HR_DEVICE_STATUS,
            Field::DeviceErrors => oids::HR_DEVICE_ERRORS,
            Field::PrinterStatus => oids::HR_PRINTER_STATUS,
            Field::DetectedErrorState => oids::HR_PRINTER_DETECTED_ERROR_STATE,
            Field::SerialNumber => oids::PRT_GENERAL_SERIAL_NUMBER,
            Field::MemorySize => oids::HR_MEMORY_SIZE,
            Field::HardwareAddress => oids::IF_PHYS_ADDRESS,
            Field::PageCounters => oids::PRT_MARKER_LIFE_COUNT,
            Field::SupplyDescription => oids::PRT_MARKER_SUPPLIES_DESCRIPTION,
            Field::SupplyColorantIndex => oids::PRT_MARKER_SUPPLIES_COLORANT_INDEX,
            Field::SupplyType => oids::PRT_MARKER_SUPPLIES_TYPE,
            Field::SupplyClass => oids::PRT_MARKER_SUPPLIES_CLASS,
            Field::SupplyUnit => oids::PRT_MARKER_SUPPLIES_SUPPLY_UNIT,
            Field::SupplyMaxCapacity => oids::PRT_MARKER_SUPPLIES_MAX_CAPACITY,
            Field::SupplyLevel => oids::PRT_MARKER_SUPPLIES_LEVEL,
            Field::ColorantValue => oids::PRT_MARKER_COLORANT_VALUE,
            Field::InputName => oids::PRT_INPUT_NAME,
            Field::InputType => oids::PRT_INPUT_TYPE,
            Field::InputMediaName => oids::PRT_INPUT_MEDIA_NAME,
            Field::InputMaxCapacity => oids::PRT_INPUT_MAX_CAPACITY,
            Field::InputCurrentLevel => oids::PRT_INPUT_CURRENT_LEVEL,
            Field::InputStatus => oids::PRT_INPUT_STATUS,
            Field::CoverDescription => oids::PRT_COVER_DESCRIPTION,
            Field::CoverStatus => oids::PRT_COVER_STATUS,
            Field::DisplayBuffer => oids::PRT_CONSOLE_DISPLAY_BUFFER_TEXT,
        }
    }

    pub fn kind(&self) -> FieldKind {
        if Self::SCALARS.contains(self) {
            FieldKind::Scalar
        } else {
            FieldKind::Column
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::SysDescr => "sysDescr",
            Field::SysObjectId => "sysObjectID",
            Field::SysUptime => "sysUpTime",
            Field::SysContact => "sysContact",
            Field::SysName => "sysName",
            Field::SysLocation => "sysLocation",
            Field::DeviceDescription => "hrDeviceDescr",
            Field::DeviceStatus => "hrDeviceStatus",
            Field::DeviceErrors => "hrDeviceErrors",
            Field::PrinterStatus => "hrPrinterStatus",
            Field::DetectedErrorState => "hrPrinterDetectedErrorState",
            Field::SerialNumber => "prtGeneralSerialNumber",
            Field::MemorySize => "hrMemorySize",
            Field::HardwareAddress => "ifPhysAddress",
            Field::PageCounters => "prtMarkerLifeCount",
            Field::SupplyDescription => "prtMarkerSuppliesDescription",
            Field::SupplyColorantIndex => "prtMarkerSuppliesColorantIndex",
            Field::SupplyType => "prtMarkerSuppliesType",
            Field::SupplyClass => "prtMarkerSuppliesClass",
            Field::SupplyUnit => "prtMarkerSuppliesSupplyUnit",
            Field::SupplyMaxCapacity => "prtMarkerSuppliesMaxCapacity",
            Field::SupplyLevel => "prtMarkerSuppliesLevel",
            Field::ColorantValue => "prtMarkerColorantValue",
            Field::InputName => "prtInputName",
            Field::InputType => "prtInputType",
            Field::InputMediaName => "prtInputMediaName",
            Field::InputMaxCapacity => "prtInputMaxCapacity",
            Field::InputCurrentLevel => "prtInputCurrentLevel",
            Field::InputStatus => "prtInputStatus",
            Field::CoverDescription => "prtCoverDescription",
            Field::CoverStatus => "prtCoverStatus",
            Field::DisplayBuffer => "prtConsoleDisplayBufferText",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
