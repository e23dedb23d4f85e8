use snmp2::AsyncSession;

use super::oid::parse_oid;
use super::session::VarbindBatch;
use super::value::{RawValue, owned_varbinds};
use super::SnmpError;

/// error-status noSuchName: в SNMPv1 так выглядит отсутствующий OID
const NO_SUCH_NAME: u32 = 2;

/// Клиент SNMPv1. GETBULK в v1 нет, walk идёт через GETNEXT.
pub struct SnmpClientV1 {
    pub(crate) session: AsyncSession,
    target: String,
    community: Vec<u8>,
}

impl SnmpClientV1 {
    pub async fn new(target: &str, community: &[u8]) -> Result<Self, SnmpError> {
        let session = AsyncSession::new_v1(target, community, 1)
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

        match resp.error_status {
            0 => {}
            NO_SUCH_NAME => return Ok(None),
            status => {
                return Err(SnmpError::Agent {
                    target: self.target.clone(),
                    status,
                });
            }
        }

        Ok(resp
            .varbinds
            .into_iter()
            .next()
            .and_then(|(_, value)| RawValue::from_snmp(&value)))
    }

    pub async fn next_batch(&mut self, oid: &str) -> Result<VarbindBatch, SnmpError> {
        let oid = parse_oid(oid)?;
        let resp = self
            .session
            .getnext(&oid)
            .await
            .map_err(|e| SnmpError::from_transport(&self.target, &e))?;

        match resp.error_status {
            0 => Ok(owned_varbinds(resp.varbinds)),
            // конец MIB-дерева агента
            NO_SUCH_NAME => Ok(Vec::new()),
            status => Err(SnmpError::Agent {
                target: self.target.clone(),
                status,
            }),
        }
    }
}
