//! Общие фикстуры интеграционных тестов: агент цветного принтера в памяти.

#![allow(dead_code)]

use std::time::Duration;

use snmp_printer::catalog::oids;
use snmp_printer::models::{Endpoint, SnmpVersion};
use snmp_printer::snmp::mock::{MockAgent, MockConnector};
use snmp_printer::snmp::{CallPolicy, RawValue};

pub const HOST: &str = "192.0.2.50";
pub const SERIAL: &str = "VNB3R12345";

/// OID строки таблицы: колонка плюс индекс
pub fn row(column: &str, index: u32) -> String {
    format!("{column}.{index}")
}

pub fn octets(bytes: &[u8]) -> RawValue {
    RawValue::OctetString(bytes.to_vec())
}

/// Короткий таймаут, чтобы тесты с молчащим агентом не ждали секундами
pub fn fast_policy() -> CallPolicy {
    CallPolicy::new(Duration::from_millis(200), 1)
}

pub fn endpoint(version: SnmpVersion) -> Endpoint {
    Endpoint::community(HOST, 161, version, "public")
}

/// Цветной HP с четырьмя картриджами, двумя лотками и одной крышкой
pub fn color_printer() -> MockAgent {
    let agent = MockAgent::new()
        .with(oids::SYS_DESCR, "MFG:HP;CMD:PJL,PCL;PID:LaserJet Pro M404;")
        .with(oids::SYS_OBJECT_ID, RawValue::ObjectId("1.3.6.1.4.1.11.2.3.9.1".to_string()))
        .with(oids::SYS_UPTIME, RawValue::Timeticks(360_000))
        .with(oids::SYS_CONTACT, "helpdesk")
        .with(oids::SYS_NAME, "NPI0A1B2C")
        .with(oids::SYS_LOCATION, "2nd floor")
        .with(oids::HR_DEVICE_DESCR, "HP Color LaserJet")
        .with(oids::HR_DEVICE_STATUS, 2)
        .with(oids::HR_DEVICE_ERRORS, RawValue::Counter32(0))
        .with(oids::HR_PRINTER_STATUS, 3)
        .with(oids::HR_PRINTER_DETECTED_ERROR_STATE, octets(&[0x00]))
        .with(oids::PRT_GENERAL_SERIAL_NUMBER, SERIAL)
        .with(oids::HR_MEMORY_SIZE, 262_144)
        .with(oids::IF_PHYS_ADDRESS, octets(&[0x00, 0x1b, 0xa9, 0x12, 0x34, 0x56]))
        .with(&row(oids::PRT_MARKER_LIFE_COUNT, 1), RawValue::Counter32(1200))
        .with(&row(oids::PRT_MARKER_LIFE_COUNT, 2), RawValue::Counter32(800))
        .with(&row(oids::PRT_CONSOLE_DISPLAY_BUFFER_TEXT, 1), "Ready");

    let supplies = [
        (1, "Black Cartridge", 1, 5000, 2500),
        (2, "Cyan Cartridge", 2, 3000, 300),
        (3, "Magenta Cartridge", 3, 3000, -3),
        (4, "Yellow Cartridge", 4, 3000, 3000),
    ];
    for (index, description, colorant, max, level) in supplies {
        agent.set(&row(oids::PRT_MARKER_SUPPLIES_DESCRIPTION, index), description);
        agent.set(&row(oids::PRT_MARKER_SUPPLIES_COLORANT_INDEX, index), colorant);
        agent.set(&row(oids::PRT_MARKER_SUPPLIES_CLASS, index), 3);
        agent.set(&row(oids::PRT_MARKER_SUPPLIES_TYPE, index), 21);
        agent.set(&row(oids::PRT_MARKER_SUPPLIES_SUPPLY_UNIT, index), 7);
        agent.set(&row(oids::PRT_MARKER_SUPPLIES_MAX_CAPACITY, index), max);
        agent.set(&row(oids::PRT_MARKER_SUPPLIES_LEVEL, index), level);
    }
    for (index, colorant) in [(1, "black"), (2, "cyan"), (3, "magenta"), (4, "yellow")] {
        agent.set(&row(oids::PRT_MARKER_COLORANT_VALUE, index), colorant);
    }

    let trays = [(1, "Tray 1", 5, 100, 50), (2, "Tray 2", 4, 250, -2)];
    for (index, name, kind, max, level) in trays {
        agent.set(&row(oids::PRT_INPUT_NAME, index), name);
        agent.set(&row(oids::PRT_INPUT_TYPE, index), kind);
        agent.set(&row(oids::PRT_INPUT_MEDIA_NAME, index), "A4");
        agent.set(&row(oids::PRT_INPUT_MAX_CAPACITY, index), max);
        agent.set(&row(oids::PRT_INPUT_CURRENT_LEVEL, index), level);
        agent.set(&row(oids::PRT_INPUT_STATUS, index), 0);
    }

    agent.set(&row(oids::PRT_COVER_DESCRIPTION, 1), "Front Door");
    agent.set(&row(oids::PRT_COVER_STATUS, 1), 4);

    agent
}

pub fn connector(version: SnmpVersion, agent: MockAgent) -> MockConnector {
    MockConnector::new().with_agent(version, agent)
}
