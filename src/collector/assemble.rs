//! Сборка снимка из сырых значений цикла. Сеть здесь не трогается.

use std::fmt::Debug;

use chrono::Utc;
use tracing::{debug, warn};

use super::table_collector::TableCollector;
use super::types::{CorrelatedRow, RawReads};
use crate::catalog::{
    CoverState, DeviceStatus, Field, InputType, PrinterStatus, SupplyClass, SupplyType, SupplyUnit,
};
use crate::decode::errors::error_set;
use crate::decode::levels::{capacity, level};
use crate::decode::status::{aggregate_covers, detector_status, enumerated, tray_status};
use crate::decode::{
    self, CoverStatus, DecodeAnomaly, IdentitySources, PrinterIdentity, TrayStatus, page_count,
    percent_remaining, resolve_color, text,
};
use crate::models::{
    CoverRecord, DeviceInfo, Endpoint, FieldOutcome, FieldReport, Snapshot, SupplyRecord,
    SystemInfo, TrayRecord,
};
use crate::snmp::{RawValue, RowIndex};

/// Применяет декодеры к полям и учитывает аномалии в отчёте
struct FieldDecoder<'a> {
    target: &'a str,
    report: &'a mut FieldReport,
}

impl FieldDecoder<'_> {
    /// `raw == None` значит, что поле не прочитано: исход уже записан.
    /// При аномалии возвращается `fallback`.
    fn field<T>(
        &mut self,
        field: Field,
        raw: Option<&RawValue>,
        fallback: Option<T>,
        decode: impl FnOnce(&RawValue) -> Result<T, DecodeAnomaly>,
    ) -> Option<T> {
        let raw = raw?;
        match decode(raw) {
            Ok(value) => Some(value),
            Err(anomaly) => {
                self.anomaly(field, None, raw, &anomaly);
                fallback
            }
        }
    }

    fn anomaly(
        &mut self,
        field: Field,
        index: Option<&RowIndex>,
        raw: &impl Debug,
        anomaly: &DecodeAnomaly,
    ) {
        warn!(
            target = %self.target,
            field = %field,
            row = ?index,
            raw = ?raw,
            "{anomaly}"
        );
        self.report.record(field, FieldOutcome::Anomaly(anomaly.to_string()));
    }

    fn status<T: Copy + Debug>(
        &mut self,
        field: Field,
        raw: Option<&RawValue>,
        fallback: T,
        from_code: impl Fn(i64) -> T,
        is_recognized: impl Fn(&T) -> bool,
    ) -> Option<T> {
        let value = self.field(field, raw, Some(fallback), |r| enumerated(r, from_code))?;
        if !is_recognized(&value) {
            debug!(target = %self.target, field = %field, value = ?value, "код вне таблицы");
        }
        Some(value)
    }
}

/// Собирает снимок. Отсутствующие поля остаются пустыми, аномалии
/// декодирования попадают в отчёт и не прерывают сборку.
pub fn assemble(endpoint: &Endpoint, reads: &RawReads, mut report: FieldReport) -> Snapshot {
    let target = endpoint.target();
    let mut d = FieldDecoder {
        target: &target,
        report: &mut report,
    };

    let system = system_info(&mut d, reads);
    let device = device_info(&mut d, reads);
    let supplies = supplies(&mut d, reads);
    let trays = trays(&mut d, reads);
    let (covers, cover_status) = covers(&mut d, reads);
    let display_text = display(&mut d, reads);

    let detector = detector_status(device.status, device.detected_errors.as_ref());
    let identity = PrinterIdentity::resolve(IdentitySources {
        description: system.description.as_deref(),
        object_id: system.object_id.as_deref(),
        location: system.location.as_deref(),
        name: system.name.as_deref(),
        host: endpoint.host(),
    });

    Snapshot {
        host: endpoint.host().to_string(),
        target,
        snmp_version: endpoint.version(),
        collected_at: Utc::now(),
        identity,
        system,
        device,
        supplies,
        trays,
        covers,
        cover_status,
        detector,
        display_text,
        web_interface_available: None,
        fields: report,
    }
}

fn system_info(d: &mut FieldDecoder<'_>, reads: &RawReads) -> SystemInfo {
    SystemInfo {
        description: d.field(Field::SysDescr, reads.scalar(Field::SysDescr), None, text::octet_text),
        object_id: d.field(Field::SysObjectId, reads.scalar(Field::SysObjectId), None, text::object_id),
        uptime: d.field(Field::SysUptime, reads.scalar(Field::SysUptime), None, text::uptime),
        contact: d.field(Field::SysContact, reads.scalar(Field::SysContact), None, text::octet_text),
        name: d.field(Field::SysName, reads.scalar(Field::SysName), None, text::octet_text),
        location: d.field(Field::SysLocation, reads.scalar(Field::SysLocation), None, text::octet_text),
    }
}

fn device_info(d: &mut FieldDecoder<'_>, reads: &RawReads) -> DeviceInfo {
    let status = d.status(
        Field::DeviceStatus,
        reads.scalar(Field::DeviceStatus),
        DeviceStatus::Unknown,
        DeviceStatus::from_code,
        DeviceStatus::is_recognized,
    );
    let printer_status = d.status(
        Field::PrinterStatus,
        reads.scalar(Field::PrinterStatus),
        PrinterStatus::Unknown,
        PrinterStatus::from_code,
        PrinterStatus::is_recognized,
    );

    let counters = reads.column(Field::PageCounters);
    let (page_count, anomalies) = page_count::page_count(counters);
    for (index, anomaly) in &anomalies {
        d.anomaly(Field::PageCounters, Some(index), &row_value(counters, index), anomaly);
    }

    DeviceInfo {
        status,
        printer_status,
        description: d.field(
            Field::DeviceDescription,
            reads.scalar(Field::DeviceDescription),
            None,
            text::octet_text,
        ),
        error_count: d.field(Field::DeviceErrors, reads.scalar(Field::DeviceErrors), None, decode::counter),
        detected_errors: d.field(
            Field::DetectedErrorState,
            reads.scalar(Field::DetectedErrorState),
            None,
            error_set,
        ),
        serial_number: d
            .field(Field::SerialNumber, reads.scalar(Field::SerialNumber), None, text::octet_text)
            .filter(|serial| !serial.is_empty()),
        page_count,
        memory_kib: d.field(Field::MemorySize, reads.scalar(Field::MemorySize), None, decode::counter),
        mac_address: d
            .field(Field::HardwareAddress, reads.scalar(Field::HardwareAddress), None, text::mac_address)
            .flatten(),
    }
}

fn row_value<'a>(rows: &'a [(RowIndex, RawValue)], index: &RowIndex) -> Option<&'a RawValue> {
    rows.iter().find(|(i, _)| i == index).map(|(_, value)| value)
}

/// Имя красителя по prtMarkerSuppliesColorantIndex; 0 значит «без красителя»
fn colorant_name(d: &mut FieldDecoder<'_>, reads: &RawReads, row: &CorrelatedRow) -> Option<String> {
    let colorant = d.field(
        Field::SupplyColorantIndex,
        row.get(Field::SupplyColorantIndex),
        None,
        decode::counter,
    )?;
    if colorant == 0 {
        return None;
    }

    let raw = row_value(reads.column(Field::ColorantValue), &RowIndex::from(colorant));
    d.field(Field::ColorantValue, raw, None, text::octet_text)
        .filter(|name| !name.is_empty())
}

fn supplies(d: &mut FieldDecoder<'_>, reads: &RawReads) -> Vec<SupplyRecord> {
    let rows = TableCollector::correlate(&reads.tables(Field::SUPPLY_COLUMNS));
    let mut supplies = Vec::with_capacity(rows.len());

    for row in rows {
        let mut supply = SupplyRecord::empty(row.index.clone());
        supply.description = d.field(
            Field::SupplyDescription,
            row.get(Field::SupplyDescription),
            None,
            text::octet_text,
        );
        supply.kind = d.status(
            Field::SupplyType,
            row.get(Field::SupplyType),
            SupplyType::Unknown,
            SupplyType::from_code,
            SupplyType::is_recognized,
        );
        supply.class = d.status(
            Field::SupplyClass,
            row.get(Field::SupplyClass),
            SupplyClass::Unknown,
            SupplyClass::from_code,
            SupplyClass::is_recognized,
        );
        supply.unit = d.status(
            Field::SupplyUnit,
            row.get(Field::SupplyUnit),
            SupplyUnit::Unknown,
            SupplyUnit::from_code,
            SupplyUnit::is_recognized,
        );
        supply.max_capacity = d.field(
            Field::SupplyMaxCapacity,
            row.get(Field::SupplyMaxCapacity),
            Some(decode::Capacity::Unknown),
            capacity,
        );
        supply.level = d.field(
            Field::SupplyLevel,
            row.get(Field::SupplyLevel),
            Some(decode::Level::Unknown),
            level,
        );
        supply.percent_remaining = percent_remaining(supply.level, supply.max_capacity);

        let colorant = colorant_name(d, reads, &row);
        supply.color = resolve_color(supply.kind, colorant.as_deref(), supply.description.as_deref());
        supply.color_rgb = supply.color.as_ref().and_then(|c| c.rgb());

        supplies.push(supply);
    }

    supplies
}

fn trays(d: &mut FieldDecoder<'_>, reads: &RawReads) -> Vec<TrayRecord> {
    let rows = TableCollector::correlate(&reads.tables(Field::INPUT_COLUMNS));
    let mut trays = Vec::with_capacity(rows.len());

    for row in rows {
        let mut tray = TrayRecord::empty(row.index.clone());
        tray.description = d.field(Field::InputName, row.get(Field::InputName), None, text::octet_text);
        tray.kind = d.status(
            Field::InputType,
            row.get(Field::InputType),
            InputType::Unknown,
            InputType::from_code,
            InputType::is_recognized,
        );
        tray.media_name = d.field(
            Field::InputMediaName,
            row.get(Field::InputMediaName),
            None,
            text::octet_text,
        );
        tray.max_capacity = d.field(
            Field::InputMaxCapacity,
            row.get(Field::InputMaxCapacity),
            Some(decode::Capacity::Unknown),
            capacity,
        );
        tray.level = d.field(
            Field::InputCurrentLevel,
            row.get(Field::InputCurrentLevel),
            Some(decode::Level::Unknown),
            level,
        );
        tray.percent_remaining = percent_remaining(tray.level, tray.max_capacity);
        tray.status = d.field(
            Field::InputStatus,
            row.get(Field::InputStatus),
            Some(TrayStatus::unknown()),
            tray_status,
        );

        trays.push(tray);
    }

    trays
}

fn covers(d: &mut FieldDecoder<'_>, reads: &RawReads) -> (Vec<CoverRecord>, CoverStatus) {
    let rows = TableCollector::correlate(&reads.tables(Field::COVER_COLUMNS));
    let mut covers = Vec::with_capacity(rows.len());

    for row in rows {
        let description = d.field(
            Field::CoverDescription,
            row.get(Field::CoverDescription),
            None,
            text::octet_text,
        );
        let state = d.status(
            Field::CoverStatus,
            row.get(Field::CoverStatus),
            CoverState::Unknown,
            CoverState::from_code,
            CoverState::is_recognized,
        );
        covers.push(CoverRecord {
            index: row.index,
            description,
            state,
        });
    }

    let states: Vec<CoverState> = covers.iter().filter_map(|c| c.state).collect();
    let status = match d.report.get(Field::CoverStatus) {
        Some(FieldOutcome::Failed(_)) if states.is_empty() => CoverStatus::Unknown,
        _ => aggregate_covers(&states),
    };

    (covers, status)
}

/// Текст панели. Пустой буфер даёт `Some("")`, отсутствующая таблица `None`.
fn display(d: &mut FieldDecoder<'_>, reads: &RawReads) -> Option<String> {
    if !d.report.is_read(Field::DisplayBuffer) {
        return None;
    }

    let rows = reads.column(Field::DisplayBuffer);
    let (text, anomalies) = text::display_lines(rows);
    for (index, anomaly) in &anomalies {
        d.anomaly(Field::DisplayBuffer, Some(index), &row_value(rows, index), anomaly);
    }
    Some(text)
}
