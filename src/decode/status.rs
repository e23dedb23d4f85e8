use serde::Serialize;

use super::errors::{ErrorCondition, ErrorSet};
use super::{DecodeAnomaly, integer};
use crate::catalog::{CoverState, DetectorStatus, DeviceStatus};
use crate::snmp::RawValue;

/// Перечисление по коду. Неизвестный код не ошибка: таблица сама
/// вернёт запасной вариант. Аномалия только если пришло не число.
pub fn enumerated<T>(raw: &RawValue, from_code: impl Fn(i64) -> T) -> Result<T, DecodeAnomaly> {
    integer(raw).map(from_code)
}

/// Доступность узла принтера (биты 0-2 PrtSubUnitStatusTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubUnitAvailability {
    Idle,
    Standby,
    Active,
    Busy,
    OnRequest,
    Broken,
    Unknown,
}

/// Состояние лотка (prtInputStatus)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrayStatus {
    pub availability: SubUnitAvailability,
    pub non_critical_alert: bool,
    pub critical_alert: bool,
    pub offline: bool,
    pub transitioning: bool,
}

impl TrayStatus {
    pub fn unknown() -> Self {
        Self {
            availability: SubUnitAvailability::Unknown,
            non_critical_alert: false,
            critical_alert: false,
            offline: false,
            transitioning: false,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(
            self.availability,
            SubUnitAvailability::Idle
                | SubUnitAvailability::Standby
                | SubUnitAvailability::Active
                | SubUnitAvailability::Busy
        )
    }
}

pub fn tray_status(raw: &RawValue) -> Result<TrayStatus, DecodeAnomaly> {
    let value = integer(raw)?;
    if !(0..128).contains(&value) {
        return Err(DecodeAnomaly::OutOfRange { value });
    }

    let availability = match value & 0b111 {
        0 => SubUnitAvailability::Idle,
        2 => SubUnitAvailability::Standby,
        4 => SubUnitAvailability::Active,
        6 => SubUnitAvailability::Busy,
        1 => SubUnitAvailability::OnRequest,
        3 => SubUnitAvailability::Broken,
        5 => SubUnitAvailability::Unknown,
        _ => return Err(DecodeAnomaly::OutOfRange { value }),
    };

    Ok(TrayStatus {
        availability,
        non_critical_alert: value & 8 != 0,
        critical_alert: value & 16 != 0,
        offline: value & 32 != 0,
        transitioning: value & 64 != 0,
    })
}

/// Итоговое состояние крышек принтера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverStatus {
    Open,
    Closed,
    Unknown,
    /// У устройства нет крышек в Printer-MIB
    Unavailable,
}

pub fn aggregate_covers(states: &[CoverState]) -> CoverStatus {
    if states.is_empty() {
        return CoverStatus::Unavailable;
    }
    if states
        .iter()
        .any(|s| matches!(s, CoverState::Open | CoverState::InterlockOpen))
    {
        return CoverStatus::Open;
    }
    if states
        .iter()
        .any(|s| matches!(s, CoverState::Closed | CoverState::InterlockClosed))
    {
        return CoverStatus::Closed;
    }
    CoverStatus::Unknown
}

/// Состояние тракта бумаги по ошибкам и статусу устройства
pub fn detector_status(device: Option<DeviceStatus>, errors: Option<&ErrorSet>) -> DetectorStatus {
    if let Some(errors) = errors {
        if errors.contains(ErrorCondition::Jammed) {
            return DetectorStatus::Jam;
        }
        if errors.contains(ErrorCondition::NoPaper) || errors.contains(ErrorCondition::InputTrayEmpty) {
            return DetectorStatus::NoPaper;
        }
    }

    match device {
        Some(DeviceStatus::Running | DeviceStatus::Warning | DeviceStatus::Testing) => DetectorStatus::On,
        Some(DeviceStatus::Down) => DetectorStatus::Off,
        _ => DetectorStatus::Unavailable,
    }
}
