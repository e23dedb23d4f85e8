use snmp2::AsyncSession;

use super::oid::parse_oid;
use super::session::VarbindBatch;
use super::value::{RawValue, owned_varbinds};
use super::SnmpError;

/// max-repetitions для GETBULK
pub const BULK_MAX_REPETITIONS: u32 = 25;

pub struct SnmpClientV2c {
    pub(crate) session: AsyncSession,
    target: String,
    community: Vec<u8>,
}

impl SnmpClientV2c {
    pub async fn new(target: &str, community: &[u8]) -> Result<Self, SnmpError> {
        let session = AsyncSession::new_v2c(target, community, 2)
            .await
            .map_err(|e| SnmpError::from_transport(target, &e))?;

        Ok(Self {
            session,
            target: target.to_string(),
            community: community.to_vec(),
        })
    }

    /// Новый сокет вместо старого: поздние ответы на брошенные запросы
    /// остаются в старом
    pub async fn reopen(&mut self) -> Result<(), SnmpError> {
        *self = Self::new(&self.target, &self.community).await?;
        Ok(())
    }

    pub async fn get(&mut self, oid: &str) -> Result<Option<RawValue>, SnmpError> {
        let oid = parse_oid(oid)?;
        let resp = self
            .session
            .get(&oid)
            .await
            .map_err(|e| SnmpError::from_transport(&self.target, &e))?;

        if resp.error_status != 0 {
            return Err(SnmpError::Agent {
                target: self.target.clone(),
                status: resp.error_status,
            });
        }

        // noSuchObject / noSuchInstance приходят значением, а не error-status
        Ok(resp
            .varbinds
            .into_iter()
            .next()
            .and_then(|(_, value)| RawValue::from_snmp(&value)))
    }

    /// Одна страница GETBULK, начиная после `oid`
    pub async fn next_batch(&mut self, oid: &str) -> Result<VarbindBatch, SnmpError> {
        let oid = parse_oid(oid)?;
        let resp = self
            .session
            .getbulk(&[&oid], 0, BULK_MAX_REPETITIONS)
            .await
            .map_err(|e| SnmpError::from_transport(&self.target, &e))?;

        if resp.error_status != 0 {
            return Err(SnmpError::Agent {
                target: self.target.clone(),
                status: resp.error_status,
            });
        }

        Ok(owned_varbinds(resp.varbinds))
    }
}
