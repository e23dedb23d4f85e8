use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 161;
pub const DEFAULT_COMMUNITY: &str = "public";

/// Поколение протокола SNMP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnmpVersion {
    #[serde(rename = "1")]
    V1,
    #[serde(rename = "2c")]
    V2c,
    #[serde(rename = "3")]
    V3,
}

impl SnmpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnmpVersion::V1 => "1",
            SnmpVersion::V2c => "2c",
            SnmpVersion::V3 => "3",
        }
    }
}

impl fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_str())
    }
}

/// Алгоритм аутентификации USM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthProtocol {
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA")]
    Sha,
    #[serde(rename = "SHA224")]
    Sha224,
    #[serde(rename = "SHA256")]
    Sha256,
    #[serde(rename = "SHA384")]
    Sha384,
    #[serde(rename = "SHA512")]
    Sha512,
}

/// Алгоритм шифрования USM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivacyProtocol {
    #[serde(rename = "DES")]
    Des,
    #[serde(rename = "3DES")]
    TripleDes,
    #[serde(rename = "AES")]
    Aes,
    #[serde(rename = "AES192")]
    Aes192,
    #[serde(rename = "AES256")]
    Aes256,
}

/// Учётные данные пользователя SNMPv3
#[derive(Clone, PartialEq, Eq)]
pub struct UsmCredentials {
    pub username: String,
    pub auth: Option<(AuthProtocol, String)>,
    pub privacy: Option<(PrivacyProtocol, String)>,
}

// Ключи в логи не попадают
impl fmt::Debug for UsmCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsmCredentials")
            .field("username", &self.username)
            .field("auth", &self.auth.as_ref().map(|(proto, _)| proto))
            .field("privacy", &self.privacy.as_ref().map(|(proto, _)| proto))
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Community string для v1/v2c
    Community(String),
    Usm(UsmCredentials),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Community(_) => f.write_str("Community(***)"),
            Credentials::Usm(usm) => f.debug_tuple("Usm").field(usm).finish(),
        }
    }
}

/// Цель опроса: один физический принтер. После создания не меняется.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
    version: SnmpVersion,
    credentials: Credentials,
}

impl Endpoint {
    /// Цель v1/v2c с community string
    pub fn community(
        host: impl Into<String>,
        port: u16,
        version: SnmpVersion,
        community: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            version,
            credentials: Credentials::Community(community.into()),
        }
    }

    /// Цель SNMPv3
    pub fn usm(host: impl Into<String>, port: u16, credentials: UsmCredentials) -> Self {
        Self {
            host: host.into(),
            port,
            version: SnmpVersion::V3,
            credentials: Credentials::Usm(credentials),
        }
    }

    /// Только адрес: порт и community по умолчанию (вход для discovery)
    pub fn bare(host: impl Into<String>, version: SnmpVersion) -> Self {
        Self::community(host, DEFAULT_PORT, version, DEFAULT_COMMUNITY)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn version(&self) -> SnmpVersion {
        self.version
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Адрес в виде `host:port`, IPv6 берётся в скобки
    pub fn target(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_brackets_ipv6_hosts() {
        let v4 = Endpoint::bare("10.0.0.5", SnmpVersion::V2c);
        assert_eq!(v4.target(), "10.0.0.5:161");

        let v6 = Endpoint::community("fe80::1", 1161, SnmpVersion::V1, "public");
        assert_eq!(v6.target(), "[fe80::1]:1161");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let endpoint = Endpoint::usm(
            "printer.lan",
            161,
            UsmCredentials {
                username: "monitor".into(),
                auth: Some((AuthProtocol::Sha256, "authsecret".into())),
                privacy: Some((PrivacyProtocol::Aes, "privsecret".into())),
            },
        );
        let rendered = format!("{endpoint:?}");
        assert!(rendered.contains("monitor"));
        assert!(!rendered.contains("authsecret"));
        assert!(!rendered.contains("privsecret"));

        let community = Endpoint::community("printer.lan", 161, SnmpVersion::V2c, "s3cret");
        assert!(!format!("{community:?}").contains("s3cret"));
    }

    #[test]
    fn versions_deserialize_from_config_spelling() {
        let v: SnmpVersion = serde_yml::from_str("\"2c\"").unwrap();
        assert_eq!(v, SnmpVersion::V2c);
        let p: PrivacyProtocol = serde_yml::from_str("\"3DES\"").unwrap();
        assert_eq!(p, PrivacyProtocol::TripleDes);
    }
}
