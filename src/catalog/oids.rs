//! OID из RFC 1213 (MIB-II), RFC 2790 (Host Resources) и RFC 3805 (Printer-MIB).
//!
//! Табличные колонки заданы вместе с hrDeviceIndex принтера (`.1`),
//! поэтому суффикс строки при walk совпадает с индексом строки таблицы.

// System
pub const SYS_DESCR: &str = "1.3.6.1.2.1.1.1.0";
pub const SYS_OBJECT_ID: &str = "1.3.6.1.2.1.1.2.0";
pub const SYS_UPTIME: &str = "1.3.6.1.2.1.1.3.0";
pub const SYS_CONTACT: &str = "1.3.6.1.2.1.1.4.0";
pub const SYS_NAME: &str = "1.3.6.1.2.1.1.5.0";
pub const SYS_LOCATION: &str = "1.3.6.1.2.1.1.6.0";

// Host Resources: устройство и принтер
pub const HR_DEVICE_DESCR: &str = "1.3.6.1.2.1.25.3.2.1.3.1";
pub const HR_DEVICE_STATUS: &str = "1.3.6.1.2.1.25.3.2.1.5.1";
pub const HR_DEVICE_ERRORS: &str = "1.3.6.1.2.1.25.3.2.1.6.1";
pub const HR_PRINTER_STATUS: &str = "1.3.6.1.2.1.25.3.5.1.1.1";
pub const HR_PRINTER_DETECTED_ERROR_STATE: &str = "1.3.6.1.2.1.25.3.5.1.2.1";
pub const HR_MEMORY_SIZE: &str = "1.3.6.1.2.1.25.2.2.0";

// Интерфейсы
pub const IF_PHYS_ADDRESS: &str = "1.3.6.1.2.1.2.2.1.6.1";

// Printer-MIB: general
pub const PRT_GENERAL_SERIAL_NUMBER: &str = "1.3.6.1.2.1.43.5.1.1.17.1";

// prtCoverTable
pub const PRT_COVER_DESCRIPTION: &str = "1.3.6.1.2.1.43.6.1.1.2.1";
pub const PRT_COVER_STATUS: &str = "1.3.6.1.2.1.43.6.1.1.3.1";

// prtInputTable
pub const PRT_INPUT_TYPE: &str = "1.3.6.1.2.1.43.8.2.1.2.1";
pub const PRT_INPUT_MAX_CAPACITY: &str = "1.3.6.1.2.1.43.8.2.1.9.1";
pub const PRT_INPUT_CURRENT_LEVEL: &str = "1.3.6.1.2.1.43.8.2.1.10.1";
pub const PRT_INPUT_STATUS: &str = "1.3.6.1.2.1.43.8.2.1.11.1";
pub const PRT_INPUT_MEDIA_NAME: &str = "1.3.6.1.2.1.43.8.2.1.12.1";
pub const PRT_INPUT_NAME: &str = "1.3.6.1.2.1.43.8.2.1.13.1";

// prtMarkerTable
pub const PRT_MARKER_LIFE_COUNT: &str = "1.3.6.1.2.1.43.10.2.1.4.1";

// prtMarkerSuppliesTable
pub const PRT_MARKER_SUPPLIES_COLORANT_INDEX: &str = "1.3.6.1.2.1.43.11.1.1.3.1";
pub const PRT_MARKER_SUPPLIES_CLASS: &str = "1.3.6.1.2.1.43.11.1.1.4.1";
pub const PRT_MARKER_SUPPLIES_TYPE: &str = "1.3.6.1.2.1.43.11.1.1.5.1";
pub const PRT_MARKER_SUPPLIES_DESCRIPTION: &str = "1.3.6.1.2.1.43.11.1.1.6.1";
pub const PRT_MARKER_SUPPLIES_SUPPLY_UNIT: &str = "1.3.6.1.2.1.43.11.1.1.7.1";
pub const PRT_MARKER_SUPPLIES_MAX_CAPACITY: &str = "1.3.6.1.2.1.43.11.1.1.8.1";
pub const PRT_MARKER_SUPPLIES_LEVEL: &str = "1.3.6.1.2.1.43.11.1.1.9.1";

// prtMarkerColorantTable
pub const PRT_MARKER_COLORANT_VALUE: &str = "1.3.6.1.2.1.43.12.1.1.4.1";

// prtConsoleDisplayBufferTable
pub const PRT_CONSOLE_DISPLAY_BUFFER_TEXT: &str = "1.3.6.1.2.1.43.16.5.1.2.1";

// Корень enterprise-OID, по нему определяется вендор из sysObjectID
pub const ENTERPRISES: &str = "1.3.6.1.4.1";
