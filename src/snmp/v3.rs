use snmp2::AsyncSession;
use snmp2::v3::{Auth, AuthProtocol as UsmAuth, Cipher, Security};
use tracing::debug;

use super::oid::parse_oid;
use super::session::VarbindBatch;
use super::v2c::BULK_MAX_REPETITIONS;
use super::value::{RawValue, owned_varbinds};
use super::SnmpError;
use crate::models::{AuthProtocol, PrivacyProtocol, UsmCredentials};

/// Клиент SNMPv3 (USM): noAuthNoPriv, authNoPriv и authPriv
pub struct SnmpClientV3 {
    pub(crate) session: AsyncSession,
    target: String,
    credentials: UsmCredentials,
}

impl SnmpClientV3 {
    pub async fn new(target: &str, credentials: &UsmCredentials) -> Result<Self, SnmpError> {
        let security = security(credentials)?;

        let mut session = AsyncSession::new_v3(target, 0, security)
            .await
            .map_err(|e| SnmpError::from_transport(target, &e))?;

        // engine discovery: без него агент не примет ни одного запроса
        session
            .init()
            .await
            .map_err(|e| SnmpError::from_transport(target, &e))?;

        debug!(target, user = %credentials.username, "SNMPv3 engine discovery выполнен");

        Ok(Self {
            session,
            target: target.to_string(),
            credentials: credentials.clone(),
        })
    }

    /// Новый сокет и повторный engine discovery
    pub async fn reopen(&mut self) -> Result<(), SnmpError> {
        *self = Self::new(&self.target, &self.credentials).await?;
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

fn security(credentials: &UsmCredentials) -> Result<Security, SnmpError> {
    let username = credentials.username.as_bytes();

    let Some((auth_protocol, auth_key)) = &credentials.auth else {
        return Ok(Security::new(username, b"").with_auth(Auth::NoAuthNoPriv));
    };

    let security =
        Security::new(username, auth_key.as_bytes()).with_auth_protocol(auth_protocol_of(*auth_protocol));

    match &credentials.privacy {
        None => Ok(security.with_auth(Auth::AuthNoPriv)),
        Some((privacy, privacy_key)) => Ok(security.with_auth(Auth::AuthPriv {
            cipher: cipher_of(*privacy)?,
            privacy_password: privacy_key.as_bytes().to_vec(),
        })),
    }
}

fn auth_protocol_of(protocol: AuthProtocol) -> UsmAuth {
    match protocol {
        AuthProtocol::Md5 => UsmAuth::Md5,
        AuthProtocol::Sha => UsmAuth::Sha1,
        AuthProtocol::Sha224 => UsmAuth::Sha224,
        AuthProtocol::Sha256 => UsmAuth::Sha256,
        AuthProtocol::Sha384 => UsmAuth::Sha384,
        AuthProtocol::Sha512 => UsmAuth::Sha512,
    }
}

fn cipher_of(protocol: PrivacyProtocol) -> Result<Cipher, SnmpError> {
    match protocol {
        PrivacyProtocol::Des => Ok(Cipher::Des),
        PrivacyProtocol::Aes => Ok(Cipher::Aes128),
        PrivacyProtocol::Aes192 => Ok(Cipher::Aes192),
        PrivacyProtocol::Aes256 => Ok(Cipher::Aes256),
        PrivacyProtocol::TripleDes => Err(SnmpError::Unsupported(
            "шифрование 3DES транспортом не поддерживается".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_des_is_reported_as_unsupported() {
        let credentials = UsmCredentials {
            username: "monitor".to_string(),
            auth: Some((AuthProtocol::Sha256, "authsecret".to_string())),
            privacy: Some((PrivacyProtocol::TripleDes, "privsecret".to_string())),
        };
        assert!(matches!(security(&credentials), Err(SnmpError::Unsupported(_))));
    }

    #[test]
    fn supported_privacy_builds_security() {
        for privacy in [PrivacyProtocol::Des, PrivacyProtocol::Aes, PrivacyProtocol::Aes256] {
            let credentials = UsmCredentials {
                username: "monitor".to_string(),
                auth: Some((AuthProtocol::Md5, "authsecret".to_string())),
                privacy: Some((privacy, "privsecret".to_string())),
            };
            assert!(security(&credentials).is_ok(), "{privacy:?}");
        }
    }
}
