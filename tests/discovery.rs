mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use snmp_printer::catalog::{Manufacturer, oids};
use snmp_printer::discovery::{DiscoveryError, DiscoveryOutcome, DiscoveryProbe, DiscoveryService};
use snmp_printer::models::SnmpVersion;
use snmp_printer::snmp::mock::{MockAgent, MockConnector, MockFault};

fn probe(connector: MockConnector) -> DiscoveryProbe<MockConnector> {
    DiscoveryProbe::new(connector).with_policy(fast_policy())
}

#[tokio::test]
async fn v2c_answer_is_used_first() {
    let v2c = color_printer();
    let v1 = color_printer();
    let connector = MockConnector::new()
        .with_agent(SnmpVersion::V2c, v2c.clone())
        .with_agent(SnmpVersion::V1, v1.clone());

    let printer = probe(connector).probe(HOST).await.unwrap();

    assert_eq!(printer.snmp_version, SnmpVersion::V2c);
    assert_eq!(printer.unique_id, SERIAL);
    assert_eq!(printer.identity.manufacturer, Manufacturer::Hp);
    assert_eq!(v1.connect_count(), 0);
}

#[tokio::test]
async fn empty_v2c_agent_falls_back_to_v1() {
    let v2c = MockAgent::new();
    let connector = MockConnector::new()
        .with_agent(SnmpVersion::V2c, v2c.clone())
        .with_agent(SnmpVersion::V1, color_printer());

    let printer = probe(connector).probe(HOST).await.unwrap();

    assert_eq!(printer.snmp_version, SnmpVersion::V1);
    assert_eq!(printer.mac_address.as_deref(), Some("00:1b:a9:12:34:56"));
    assert_eq!(v2c.connect_count(), 1);
}

#[tokio::test]
async fn silent_v2c_is_not_read_further() {
    let v2c = color_printer();
    v2c.fail(oids::SYS_DESCR, MockFault::Timeout);
    let connector = MockConnector::new()
        .with_agent(SnmpVersion::V2c, v2c.clone())
        .with_agent(SnmpVersion::V1, color_printer());

    let printer = probe(connector).probe(HOST).await.unwrap();

    assert_eq!(printer.snmp_version, SnmpVersion::V1);
    assert_eq!(v2c.get_count(oids::PRT_GENERAL_SERIAL_NUMBER), 0);
}

#[tokio::test]
async fn no_answer_on_any_generation_is_not_printer() {
    let connector = MockConnector::new().with_agent(SnmpVersion::V1, MockAgent::new());

    let err = probe(connector).probe(HOST).await.unwrap_err();

    assert!(matches!(err, DiscoveryError::NotPrinter { host } if host == HOST));
}

#[tokio::test]
async fn failed_probe_can_be_retried() {
    let agent = color_printer();
    agent.fail_times(oids::SYS_DESCR, MockFault::Network, 4);
    let service = DiscoveryService::new(probe(connector(SnmpVersion::V2c, agent.clone())));

    // v2c: запрос и повтор отказали, v1 не настроен
    let first = service.handle(HOST).await;
    assert_eq!(
        first,
        DiscoveryOutcome::NotPrinter {
            host: HOST.to_string()
        }
    );
    assert_eq!(service.registered_count(), 0);

    let second = service.handle(HOST).await;
    assert_eq!(service.registered_count(), 0);
    assert!(matches!(second, DiscoveryOutcome::NotPrinter { .. }));

    let third = service.handle(HOST).await;
    assert!(matches!(third, DiscoveryOutcome::Registered { ref printer } if printer.unique_id == SERIAL));
    assert_eq!(service.registered_count(), 1);
    assert_eq!(agent.connect_count(), 3);
}

#[tokio::test]
async fn same_device_on_new_address_is_duplicate() {
    let service = DiscoveryService::new(probe(connector(SnmpVersion::V2c, color_printer())));

    assert!(matches!(service.handle(HOST).await, DiscoveryOutcome::Registered { .. }));
    assert_eq!(
        service.handle("192.0.2.51").await,
        DiscoveryOutcome::AlreadyRegistered {
            unique_id: SERIAL.to_string(),
            host: "192.0.2.51".to_string(),
        }
    );
    assert_eq!(service.registered_count(), 1);
}

#[tokio::test]
async fn blank_address_is_ignored() {
    let service = DiscoveryService::new(probe(connector(SnmpVersion::V2c, color_printer())));

    assert!(matches!(service.handle("  ").await, DiscoveryOutcome::NotPrinter { .. }));
    assert_eq!(service.registered_count(), 0);
}

#[tokio::test]
async fn known_device_is_not_registered_again() {
    let service = DiscoveryService::new(probe(connector(SnmpVersion::V2c, color_printer())));
    service.register(SERIAL, "192.0.2.49");

    assert!(matches!(
        service.handle(HOST).await,
        DiscoveryOutcome::AlreadyRegistered { ref unique_id, .. } if unique_id == SERIAL
    ));
    assert_eq!(service.registered_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancelled_discovery_releases_the_address() {
    let agent = color_printer();
    agent.fail_times(oids::SYS_DESCR, MockFault::Hang, 1);
    let service = Arc::new(DiscoveryService::new(probe(connector(SnmpVersion::V2c, agent))));

    let task = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.handle(HOST).await }
    });
    // Проба висит на sysDescr, таймаут ещё не истёк
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(service.is_in_progress(HOST));

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    assert!(!service.is_in_progress(HOST));

    assert!(matches!(
        service.handle(HOST).await,
        DiscoveryOutcome::Registered { ref printer } if printer.unique_id == SERIAL
    ));
}

#[tokio::test]
async fn configured_address_is_not_probed() {
    let agent = color_printer();
    let service = DiscoveryService::new(probe(connector(SnmpVersion::V2c, agent.clone())));
    service.register_hosts([HOST]);

    assert_eq!(
        service.handle(HOST).await,
        DiscoveryOutcome::AlreadyRegistered {
            unique_id: HOST.to_string(),
            host: HOST.to_string(),
        }
    );
    assert_eq!(agent.connect_count(), 0);
    assert_eq!(service.registered_count(), 1);
}
