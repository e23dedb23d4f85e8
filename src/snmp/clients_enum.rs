use super::session::{SnmpSession, VarbindBatch};
use super::v1::SnmpClientV1;
use super::v2c::SnmpClientV2c;
use super::v3::SnmpClientV3;
use super::value::RawValue;
use super::SnmpError;
use crate::models::{Credentials, Endpoint, SnmpVersion};

pub enum SnmpClient {
    V1(SnmpClientV1),
    V2c(SnmpClientV2c),
    V3(SnmpClientV3),
}

impl SnmpClient {
    /// Создаёт клиента нужного поколения по цели
    pub async fn connect(endpoint: &Endpoint) -> Result<Self, SnmpError> {
        let target = endpoint.target();

        match (endpoint.version(), endpoint.credentials()) {
            (SnmpVersion::V1, Credentials::Community(community)) => {
                Ok(SnmpClient::V1(SnmpClientV1::new(&target, community.as_bytes()).await?))
            }
            (SnmpVersion::V2c, Credentials::Community(community)) => {
                Ok(SnmpClient::V2c(SnmpClientV2c::new(&target, community.as_bytes()).await?))
            }
            (SnmpVersion::V3, Credentials::Usm(usm)) => {
                Ok(SnmpClient::V3(SnmpClientV3::new(&target, usm).await?))
            }
            (version, _) => Err(SnmpError::Unsupported(format!(
                "учётные данные не подходят для SNMP {version}"
            ))),
        }
    }
}

impl SnmpSession for SnmpClient {
    async fn get(&mut self, oid: &str) -> Result<Option<RawValue>, SnmpError> {
        match self {
            SnmpClient::V1(client) => client.get(oid).await,
            SnmpClient::V2c(client) => client.get(oid).await,
            SnmpClient::V3(client) => client.get(oid).await,
        }
    }

    async fn next_batch(&mut self, oid: &str) -> Result<VarbindBatch, SnmpError> {
        match self {
            SnmpClient::V1(client) => client.next_batch(oid).await,
            SnmpClient::V2c(client) => client.next_batch(oid).await,
            SnmpClient::V3(client) => client.next_batch(oid).await,
        }
    }

    async fn reset(&mut self) -> Result<(), SnmpError> {
        match self {
            SnmpClient::V1(client) => client.reopen().await,
            SnmpClient::V2c(client) => client.reopen().await,
            SnmpClient::V3(client) => client.reopen().await,
        }
    }
}
