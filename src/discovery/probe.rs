use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::collector::assemble::assemble;
use crate::collector::{RawReads, ScalarCollector, ScalarResult};
use crate::catalog::Field;
use crate::decode::PrinterIdentity;
use crate::models::{
    DEFAULT_COMMUNITY, DEFAULT_PORT, Endpoint, FieldOutcome, FieldReport, SnmpVersion,
};
use crate::snmp::{CallPolicy, Connector, Session, SnmpError};

/// Поколения в порядке попыток
pub const GENERATIONS: [SnmpVersion; 2] = [SnmpVersion::V2c, SnmpVersion::V1];

/// Поля, по которым принтер опознаётся и получает ключ
pub const DISCOVERY_FIELDS: &[Field] = &[
    Field::SysDescr,
    Field::SysObjectId,
    Field::SysName,
    Field::SysLocation,
    Field::SerialNumber,
    Field::HardwareAddress,
];

#[derive(Debug, Clone, Error)]
pub enum DiscoveryError {
    #[error("{host}: ни одно поколение SNMP не вернуло данных принтера")]
    NotPrinter { host: String },
}

/// Что удалось узнать о найденном принтере
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredPrinter {
    pub host: String,
    pub unique_id: String,
    pub snmp_version: SnmpVersion,
    pub identity: PrinterIdentity,
    pub description: Option<String>,
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub mac_address: Option<String>,
}

impl DiscoveredPrinter {
    fn has_data(&self) -> bool {
        [
            &self.description,
            &self.name,
            &self.serial_number,
            &self.mac_address,
        ]
        .into_iter()
        .flatten()
        .any(|v| !v.trim().is_empty())
    }
}

/// Проба адреса из внешнего discovery: v2c, затем v1
pub struct DiscoveryProbe<C> {
    connector: C,
    policy: CallPolicy,
    port: u16,
    community: String,
}

impl<C: Connector> DiscoveryProbe<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            policy: CallPolicy::discovery(),
            port: DEFAULT_PORT,
            community: DEFAULT_COMMUNITY.to_string(),
        }
    }

    pub fn with_policy(mut self, policy: CallPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_community(mut self, community: impl Into<String>) -> Self {
        self.community = community.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Останавливается на первом поколении, давшем хоть одно полезное поле
    pub async fn probe(&self, host: &str) -> Result<DiscoveredPrinter, DiscoveryError> {
        for version in GENERATIONS {
            info!(host, version = %version, "пробую подключиться");

            match self.try_generation(host, version).await {
                Ok(found) if found.has_data() => {
                    info!(host, version = %version, unique_id = %found.unique_id, "принтер ответил");
                    return Ok(found);
                }
                Ok(_) => {
                    warn!(host, version = %version, "агент ответил без данных, следующее поколение");
                }
                Err(err) => {
                    warn!(host, version = %version, error = %err, "поколение недоступно");
                }
            }
        }

        Err(DiscoveryError::NotPrinter {
            host: host.to_string(),
        })
    }

    async fn try_generation(
        &self,
        host: &str,
        version: SnmpVersion,
    ) -> Result<DiscoveredPrinter, SnmpError> {
        let endpoint = Endpoint::community(host, self.port, version, self.community.clone());
        let mut session = Session::open(&self.connector, &endpoint, self.policy).await?;

        // Молчащий на sysDescr агент дальше не опрашивается
        let mut report = FieldReport::new();
        let mut scalars = ScalarResult::new();
        match session.get(Field::SysDescr.oid()).await {
            Ok(Some(value)) => {
                report.record(Field::SysDescr, FieldOutcome::Read);
                scalars.insert(Field::SysDescr, value);
            }
            Ok(None) => report.record(Field::SysDescr, FieldOutcome::Unsupported),
            Err(err) if err.is_unreachable() || err.is_auth() => return Err(err),
            Err(err) => report.record(Field::SysDescr, FieldOutcome::Failed(err.to_string())),
        }
        scalars.extend(
            ScalarCollector::collect_scalars(&mut session, &DISCOVERY_FIELDS[1..], &mut report).await?,
        );
        session.close();
        debug!(host, version = %version, read = report.successful(), "поля discovery прочитаны");

        let reads = RawReads {
            scalars,
            ..Default::default()
        };
        let snapshot = assemble(&endpoint, &reads, report);

        Ok(DiscoveredPrinter {
            host: host.to_string(),
            unique_id: snapshot.unique_id(),
            snmp_version: version,
            identity: snapshot.identity,
            description: snapshot.system.description,
            name: snapshot.system.name,
            serial_number: snapshot.device.serial_number,
            mac_address: snapshot.device.mac_address,
        })
    }
}
