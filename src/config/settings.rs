use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_COMMUNITY, DEFAULT_PORT};
use crate::snmp::{CallPolicy, session::DEFAULT_MAX_WALK_ROWS};

/// Базовые настройки приложения. Любой ключ можно опустить.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Настройки штатного опроса
    pub connection: ConnectionSettings,
    /// Настройки проб discovery
    pub discovery: DiscoverySettings,
    /// Community для целей, где она не указана
    pub community: String,
    /// Интервал опроса (секунды)
    pub poll_interval: u64,
    /// Адрес HTTP сервера
    pub listen: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Таймаут одного запроса (секунды)
    pub timeout: f64,
    /// Количество повторов при ошибках
    pub retries: u32,
    /// Потолок строк одного walk
    pub max_walk_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    pub timeout: f64,
    pub retries: u32,
    pub community: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings::default(),
            discovery: DiscoverySettings::default(),
            community: DEFAULT_COMMUNITY.to_string(),
            poll_interval: 60,
            listen: None,
        }
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            timeout: 1.0,
            retries: 3,
            max_walk_rows: DEFAULT_MAX_WALK_ROWS,
        }
    }
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            timeout: 2.5,
            retries: 1,
            community: DEFAULT_COMMUNITY.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

fn seconds(value: f64, fallback: Duration) -> Duration {
    Duration::try_from_secs_f64(value)
        .ok()
        .filter(|d| !d.is_zero())
        .unwrap_or(fallback)
}

impl Settings {
    /// Политика вызовов для штатного опроса
    pub fn call_policy(&self) -> CallPolicy {
        let fallback = CallPolicy::polling();
        CallPolicy::new(
            seconds(self.connection.timeout, fallback.timeout),
            self.connection.retries,
        )
        .with_max_walk_rows(self.connection.max_walk_rows)
    }

    pub fn discovery_policy(&self) -> CallPolicy {
        let fallback = CallPolicy::discovery();
        CallPolicy::new(
            seconds(self.discovery.timeout, fallback.timeout),
            self.discovery.retries,
        )
        .with_max_walk_rows(self.connection.max_walk_rows)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_polling_and_discovery_policies() {
        let settings = Settings::default();
        assert_eq!(settings.call_policy(), CallPolicy::polling());
        assert_eq!(settings.discovery_policy(), CallPolicy::discovery());
        assert_eq!(settings.poll_interval(), Duration::from_secs(60));
    }

    #[test]
    fn nonsense_timeout_falls_back_to_default() {
        let mut settings = Settings::default();
        settings.connection.timeout = -4.0;
        assert_eq!(settings.call_policy().timeout, Duration::from_secs(1));

        settings.connection.timeout = 0.0;
        assert_eq!(settings.call_policy().timeout, Duration::from_secs(1));
    }
}
