use thiserror::Error;

/// Ошибки транспорта SNMP.
///
/// «OID не поддерживается устройством» сюда не входит: GET в этом случае
/// возвращает `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum SnmpError {
    #[error("таймаут запроса к {target} после {retries} повторов")]
    Timeout { target: String, retries: u32 },

    #[error("агент {target} отклонил учётные данные SNMPv3: {detail}")]
    Auth { target: String, detail: String },

    #[error("сетевая ошибка при обмене с {target}: {detail}")]
    Network { target: String, detail: String },

    #[error("агент {target} вернул error-status {status}")]
    Agent { target: String, status: u32 },

    #[error("невалидный OID '{0}'")]
    InvalidOid(String),

    #[error("не поддерживается: {0}")]
    Unsupported(String),
}

impl SnmpError {
    pub fn is_auth(&self) -> bool {
        matches!(self, SnmpError::Auth { .. })
    }

    /// Имеет ли смысл повторить тот же запрос
    pub fn is_retriable(&self) -> bool {
        matches!(self, SnmpError::Timeout { .. } | SnmpError::Network { .. })
    }

    /// Нет связи с агентом вообще (в отличие от ответа с ошибкой)
    pub fn is_unreachable(&self) -> bool {
        matches!(self, SnmpError::Timeout { .. } | SnmpError::Network { .. })
    }

    /// Раскладывает ошибку транспорта (snmp2 или ввода-вывода) по видам
    pub(crate) fn from_transport<E: TransportError>(target: &str, err: &E) -> Self {
        err.classify(target)
    }

    /// Запасной путь для вариантов, не разобранных явно (сокет, ASN.1):
    /// вид определяется по отладочному имени
    fn from_debug_text<E: std::fmt::Debug>(target: &str, err: &E) -> Self {
        let detail = format!("{err:?}");
        // AuthUpdated: агент сообщил новое engine time, запрос можно повторить
        if !detail.contains("AuthUpdated") && (detail.contains("Auth") || detail.contains("Security")) {
            SnmpError::Auth {
                target: target.to_string(),
                detail,
            }
        } else {
            SnmpError::Network {
                target: target.to_string(),
                detail,
            }
        }
    }

    fn network(target: &str, detail: impl Into<String>) -> Self {
        SnmpError::Network {
            target: target.to_string(),
            detail: detail.into(),
        }
    }
}

/// Ошибки, которые отдаёт транспорт: snmp2 на запросах и io при
/// создании сокета
pub(crate) trait TransportError: std::fmt::Debug {
    fn classify(&self, target: &str) -> SnmpError;
}

impl TransportError for snmp2::Error {
    fn classify(&self, target: &str) -> SnmpError {
        match self {
            snmp2::Error::AuthFailure(..) => SnmpError::Auth {
                target: target.to_string(),
                detail: format!("{self:?}"),
            },
            snmp2::Error::AuthUpdated => SnmpError::network(target, "engine time обновлён агентом"),
            // Поздний ответ на запрос, по которому уже сработал таймаут
            snmp2::Error::RequestIdMismatch => SnmpError::network(target, "ответ на устаревший запрос"),
            other => SnmpError::from_debug_text(target, other),
        }
    }
}

impl TransportError for std::io::Error {
    fn classify(&self, target: &str) -> SnmpError {
        match self.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => SnmpError::Timeout {
                target: target.to_string(),
                retries: 0,
            },
            _ => SnmpError::network(target, self.to_string()),
        }
    }
}
