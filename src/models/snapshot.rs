use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::endpoint::SnmpVersion;
use super::report::FieldReport;
use crate::catalog::{
    CoverState, DetectorStatus, DeviceStatus, InputType, MarkerColor, PrinterStatus, SupplyClass,
    SupplyType, SupplyUnit,
};
use crate::decode::{Capacity, CoverStatus, ErrorSet, Level, PageCount, PrinterIdentity, TrayStatus};
use crate::snmp::RowIndex;

fn as_seconds<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(duration) => serializer.serialize_some(&duration.as_secs()),
        None => serializer.serialize_none(),
    }
}

/// Группа system из MIB-II. Каждое поле независимо может отсутствовать.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SystemInfo {
    pub description: Option<String>,
    pub object_id: Option<String>,
    #[serde(rename = "uptime_secs", serialize_with = "as_seconds")]
    pub uptime: Option<Duration>,
    pub contact: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceInfo {
    pub status: Option<DeviceStatus>,
    pub printer_status: Option<PrinterStatus>,
    pub description: Option<String>,
    /// hrDeviceErrors
    pub error_count: Option<u64>,
    pub detected_errors: Option<ErrorSet>,
    pub serial_number: Option<String>,
    pub page_count: Option<PageCount>,
    pub memory_kib: Option<u64>,
    pub mac_address: Option<String>,
}

/// Расходник: строка prtMarkerSuppliesTable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplyRecord {
    pub index: RowIndex,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<SupplyType>,
    pub class: Option<SupplyClass>,
    pub unit: Option<SupplyUnit>,
    pub max_capacity: Option<Capacity>,
    pub level: Option<Level>,
    pub percent_remaining: Option<u8>,
    pub color: Option<MarkerColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_rgb: Option<[u8; 3]>,
}

impl SupplyRecord {
    pub fn empty(index: RowIndex) -> Self {
        Self {
            index,
            description: None,
            kind: None,
            class: None,
            unit: None,
            max_capacity: None,
            level: None,
            percent_remaining: None,
            color: None,
            color_rgb: None,
        }
    }
}

/// Лоток подачи: строка prtInputTable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrayRecord {
    pub index: RowIndex,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<InputType>,
    pub media_name: Option<String>,
    pub max_capacity: Option<Capacity>,
    pub level: Option<Level>,
    pub percent_remaining: Option<u8>,
    pub status: Option<TrayStatus>,
}

impl TrayRecord {
    pub fn empty(index: RowIndex) -> Self {
        Self {
            index,
            description: None,
            kind: None,
            media_name: None,
            max_capacity: None,
            level: None,
            percent_remaining: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverRecord {
    pub index: RowIndex,
    pub description: Option<String>,
    pub state: Option<CoverState>,
}

/// Результат одного цикла опроса. Собирается целиком и после сборки
/// не меняется; следующий цикл создаёт новый снимок.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub host: String,
    pub target: String,
    pub snmp_version: SnmpVersion,
    pub collected_at: DateTime<Utc>,
    pub identity: PrinterIdentity,
    pub system: SystemInfo,
    pub device: DeviceInfo,
    pub supplies: Vec<SupplyRecord>,
    pub trays: Vec<TrayRecord>,
    pub covers: Vec<CoverRecord>,
    pub cover_status: CoverStatus,
    pub detector: DetectorStatus,
    /// Текст панели; пустой буфер даёт пустую строку
    pub display_text: Option<String>,
    /// Заполняется внешней проверкой веб-интерфейса
    pub web_interface_available: Option<bool>,
    pub fields: FieldReport,
}

impl Snapshot {
    /// Ключ устройства: серийный номер, иначе MAC, иначе адрес
    pub fn unique_id(&self) -> String {
        [&self.device.serial_number, &self.device.mac_address]
            .into_iter()
            .flatten()
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .unwrap_or(self.host.as_str())
            .to_string()
    }

    pub fn with_web_interface(mut self, available: bool) -> Self {
        self.web_interface_available = Some(available);
        self
    }

    pub fn supply(&self, index: &RowIndex) -> Option<&SupplyRecord> {
        self.supplies.iter().find(|s| &s.index == index)
    }

    pub fn tray(&self, index: &RowIndex) -> Option<&TrayRecord> {
        self.trays.iter().find(|t| &t.index == index)
    }
}
