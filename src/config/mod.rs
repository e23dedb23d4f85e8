use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub mod profile;
pub mod settings;

pub use profile::{ConfigError, PrinterProfile};
pub use settings::Settings;

use crate::models::{DEFAULT_PORT, Endpoint};

/// Главная конфигурация приложения
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Базовые настройки
    #[serde(default)]
    pub settings: Settings,
    /// Принтеры для опроса
    #[serde(default)]
    pub printers: Vec<PrinterProfile>,
}

impl AppConfig {
    /// Загружает конфигурацию из YAML файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Не удалось прочитать файл: {}", path.display()))?;

        Self::from_yaml(&content).with_context(|| format!("Ошибка в конфигурации {}", path.display()))
    }

    /// Как [`AppConfig::load`], но без файла берутся настройки по умолчанию
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "файл конфигурации не найден, настройки по умолчанию");
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // Пустой файл для serde_yml это null, а не пустой объект
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig =
            serde_yml::from_str(content).context("Не удалось распарсить YAML")?;

        if config.settings.connection.timeout <= 0.0 {
            anyhow::bail!("connection.timeout должен быть больше нуля");
        }

        Ok(config)
    }

    /// Применяет переменные окружения SNMP_*
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Переопределения из произвольного источника (окружение, тесты)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(community) = lookup("SNMP_COMMUNITY") {
            self.settings.community = community;
        }

        if let Some(raw) = lookup("SNMP_TIMEOUT") {
            match raw.trim().parse::<f64>() {
                Ok(timeout) if timeout > 0.0 => self.settings.connection.timeout = timeout,
                _ => warn!(value = %raw, "SNMP_TIMEOUT проигнорирован"),
            }
        }

        if let Some(raw) = lookup("SNMP_RETRIES") {
            match raw.trim().parse::<u32>() {
                Ok(retries) => self.settings.connection.retries = retries,
                Err(_) => warn!(value = %raw, "SNMP_RETRIES проигнорирован"),
            }
        }

        if let Some(raw) = lookup("SNMP_TARGET") {
            self.add_target(&raw);
        }
    }

    /// Добавляет цель `host[:port]`. Если такой адрес уже описан,
    /// меняется только порт, и только когда он указан.
    pub fn add_target(&mut self, raw: &str) {
        let (host, port) = split_host_port(raw.trim());
        if host.is_empty() {
            return;
        }

        match self.printers.iter_mut().find(|p| p.host == host) {
            Some(existing) => {
                if let Some(port) = port {
                    existing.port = port;
                }
            }
            None => self.printers.push(PrinterProfile {
                port: port.unwrap_or(DEFAULT_PORT),
                ..PrinterProfile::new(host)
            }),
        }
    }

    /// Оставляет в опросе только цель `host[:port]`
    pub fn select_target(&mut self, raw: &str) {
        let host = split_host_port(raw.trim()).0.to_string();
        self.add_target(raw);
        self.printers.retain(|p| p.host == host);
    }

    /// Цели опроса; профиль с ошибкой возвращается как ошибка
    pub fn endpoints(&self) -> Vec<(String, Result<Endpoint, ConfigError>)> {
        self.printers
            .iter()
            .map(|p| {
                (
                    p.display_name().to_string(),
                    p.to_endpoint(&self.settings.community),
                )
            })
            .collect()
    }
}

/// `host:port`, `[v6]:port` или просто адрес
fn split_host_port(raw: &str) -> (&str, Option<u16>) {
    if let Some(rest) = raw.strip_prefix('[') {
        if let Some((host, tail)) = rest.split_once(']') {
            return (host, tail.strip_prefix(':').and_then(|p| p.parse().ok()));
        }
    }

    match raw.rsplit_once(':') {
        // Больше одного двоеточия: голый IPv6
        Some((host, port)) if !host.contains(':') => match port.parse() {
            Ok(port) => (host, Some(port)),
            Err(_) => (raw, None),
        },
        _ => (raw, None),
    }
}
