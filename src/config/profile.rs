use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    AuthProtocol, DEFAULT_PORT, Endpoint, PrivacyProtocol, SnmpVersion, UsmCredentials,
};

/// Минимальная длина ключа USM (RFC 3414)
pub const MIN_KEY_LEN: usize = 8;

/// Ошибки в описании цели опроса
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("не указан адрес принтера")]
    EmptyHost,

    #[error("{host}: для SNMPv3 нужно имя пользователя")]
    MissingUsername { host: String },

    #[error("{host}: указан протокол аутентификации, но нет ключа")]
    MissingAuthKey { host: String },

    #[error("{host}: шифрование без аутентификации недопустимо")]
    PrivacyWithoutAuth { host: String },

    #[error("{host}: указан протокол шифрования, но нет ключа")]
    MissingPrivacyKey { host: String },

    #[error("{host}: ключ {which} короче 8 символов")]
    KeyTooShort { host: String, which: &'static str },
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_version() -> SnmpVersion {
    SnmpVersion::V2c
}

/// Описание принтера в конфигурации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterProfile {
    #[serde(default)]
    pub name: Option<String>,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_version")]
    pub version: SnmpVersion,
    #[serde(default)]
    pub community: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub auth_protocol: Option<AuthProtocol>,
    #[serde(default)]
    pub auth_key: Option<String>,
    #[serde(default)]
    pub priv_protocol: Option<PrivacyProtocol>,
    #[serde(default)]
    pub priv_key: Option<String>,
}

impl PrinterProfile {
    /// Цель v2c с настройками по умолчанию
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            name: None,
            host: host.into(),
            port: DEFAULT_PORT,
            version: SnmpVersion::V2c,
            community: None,
            username: None,
            auth_protocol: None,
            auth_key: None,
            priv_protocol: None,
            priv_key: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.host)
    }

    /// Проверяет описание и строит цель опроса
    pub fn to_endpoint(&self, default_community: &str) -> Result<Endpoint, ConfigError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        match self.version {
            SnmpVersion::V1 | SnmpVersion::V2c => {
                let community = self.community.as_deref().unwrap_or(default_community);
                Ok(Endpoint::community(host, self.port, self.version, community))
            }
            SnmpVersion::V3 => Ok(Endpoint::usm(host, self.port, self.usm_credentials(host)?)),
        }
    }

    fn usm_credentials(&self, host: &str) -> Result<UsmCredentials, ConfigError> {
        let username = match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(ConfigError::MissingUsername {
                    host: host.to_string(),
                });
            }
        };

        let auth = match (self.auth_protocol, &self.auth_key) {
            (Some(protocol), Some(key)) => Some((protocol, checked_key(host, "auth", key)?)),
            (Some(_), None) => {
                return Err(ConfigError::MissingAuthKey {
                    host: host.to_string(),
                });
            }
            (None, _) => None,
        };

        let privacy = match (self.priv_protocol, &self.priv_key) {
            (Some(_), _) if auth.is_none() => {
                return Err(ConfigError::PrivacyWithoutAuth {
                    host: host.to_string(),
                });
            }
            (Some(protocol), Some(key)) => Some((protocol, checked_key(host, "priv", key)?)),
            (Some(_), None) => {
                return Err(ConfigError::MissingPrivacyKey {
                    host: host.to_string(),
                });
            }
            (None, _) => None,
        };

        Ok(UsmCredentials {
            username,
            auth,
            privacy,
        })
    }
}

fn checked_key(host: &str, which: &'static str, key: &str) -> Result<String, ConfigError> {
    if key.chars().count() < MIN_KEY_LEN {
        return Err(ConfigError::KeyTooShort {
            host: host.to_string(),
            which,
        });
    }
    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Credentials;

    fn v3(host: &str) -> PrinterProfile {
        PrinterProfile {
            version: SnmpVersion::V3,
            username: Some("monitor".to_string()),
            ..PrinterProfile::new(host)
        }
    }

    #[test]
    fn community_falls_back_to_settings_default() {
        let endpoint = PrinterProfile::new("192.0.2.50")
            .to_endpoint("office")
            .unwrap();
        assert_eq!(endpoint.credentials(), &Credentials::Community("office".to_string()));
        assert_eq!(endpoint.target(), "192.0.2.50:161");
    }

    #[test]
    fn v3_needs_a_username() {
        let profile = PrinterProfile {
            version: SnmpVersion::V3,
            ..PrinterProfile::new("192.0.2.50")
        };
        assert!(matches!(
            profile.to_endpoint("public"),
            Err(ConfigError::MissingUsername { .. })
        ));
    }

    #[test]
    fn privacy_requires_auth_and_long_keys() {
        let mut profile = v3("192.0.2.51");
        profile.priv_protocol = Some(PrivacyProtocol::Aes);
        profile.priv_key = Some("privsecret".to_string());
        assert!(matches!(
            profile.to_endpoint("public"),
            Err(ConfigError::PrivacyWithoutAuth { .. })
        ));

        profile.auth_protocol = Some(AuthProtocol::Sha256);
        profile.auth_key = Some("short".to_string());
        assert_eq!(
            profile.to_endpoint("public"),
            Err(ConfigError::KeyTooShort {
                host: "192.0.2.51".to_string(),
                which: "auth",
            })
        );

        profile.auth_key = Some("authsecret".to_string());
        let endpoint = profile.to_endpoint("public").unwrap();
        assert_eq!(endpoint.version(), SnmpVersion::V3);
    }

    #[test]
    fn auth_protocol_without_key_is_rejected() {
        let mut profile = v3("192.0.2.52");
        profile.auth_protocol = Some(AuthProtocol::Md5);
        assert!(matches!(
            profile.to_endpoint("public"),
            Err(ConfigError::MissingAuthKey { .. })
        ));
    }

    #[test]
    fn blank_host_is_rejected() {
        assert_eq!(
            PrinterProfile::new("  ").to_endpoint("public"),
            Err(ConfigError::EmptyHost)
        );
    }
}
