use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use super::probe::{DiscoveredPrinter, DiscoveryProbe};
use crate::snmp::Connector;

/// Итог обработки одного адреса из discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DiscoveryOutcome {
    /// Новый принтер, можно заводить цель опроса
    Registered { printer: DiscoveredPrinter },
    /// Этот адрес уже пробуется
    InProgress { host: String },
    /// Устройство с таким ключом уже зарегистрировано
    AlreadyRegistered { unique_id: String, host: String },
    /// Адрес не ответил как принтер; повторная проба разрешена
    NotPrinter { host: String },
}

/// Множество адресов в работе и зарегистрированных устройств.
///
/// Принадлежит тому, кто обрабатывает события discovery; общий
/// глобальный список не используется.
#[derive(Debug, Default)]
pub struct DiscoveryRegistry {
    in_progress: HashSet<String>,
    /// unique_id -> последний известный адрес
    registered: HashMap<String, String>,
}

impl DiscoveryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Помечает адрес как пробуемый. `false`, если он уже в работе.
    pub fn begin(&mut self, host: &str) -> bool {
        self.in_progress.insert(host.to_string())
    }

    /// Снимает отметку после неудачной пробы, чтобы адрес можно было
    /// попробовать снова
    pub fn abandon(&mut self, host: &str) {
        self.in_progress.remove(host);
    }

    /// Регистрирует найденный принтер или сообщает о дубликате.
    /// Если устройство сменило адрес, запоминается новый.
    pub fn complete(&mut self, printer: DiscoveredPrinter) -> DiscoveryOutcome {
        self.in_progress.remove(&printer.host);

        if let Some(known_host) = self.registered.get_mut(&printer.unique_id) {
            if *known_host != printer.host {
                info!(
                    unique_id = %printer.unique_id,
                    old = %known_host,
                    new = %printer.host,
                    "устройство сменило адрес"
                );
                *known_host = printer.host.clone();
            }
            return DiscoveryOutcome::AlreadyRegistered {
                unique_id: printer.unique_id,
                host: printer.host,
            };
        }

        self.registered
            .insert(printer.unique_id.clone(), printer.host.clone());
        DiscoveryOutcome::Registered { printer }
    }

    /// Заранее известное устройство (например, из конфигурации)
    pub fn register(&mut self, unique_id: impl Into<String>, host: impl Into<String>) {
        self.registered.insert(unique_id.into(), host.into());
    }

    /// Адрес из конфигурации: ключом служит сам адрес, как в
    /// `Snapshot::unique_id` для устройства без серийника и MAC
    pub fn register_host(&mut self, host: &str) {
        let host = host.trim();
        if !host.is_empty() && self.known_host(host).is_none() {
            self.registered.insert(host.to_string(), host.to_string());
        }
    }

    /// Ключ устройства, последний известный адрес которого `host`
    pub fn known_host(&self, host: &str) -> Option<&str> {
        self.registered
            .iter()
            .find(|(_, known)| known.as_str() == host)
            .map(|(unique_id, _)| unique_id.as_str())
    }

    pub fn is_registered(&self, unique_id: &str) -> bool {
        self.registered.contains_key(unique_id)
    }

    pub fn is_in_progress(&self, host: &str) -> bool {
        self.in_progress.contains(host)
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }
}

/// Снимает отметку «в работе», если проба не дошла до `complete`:
/// ошибка или отмена future (клиент отключился, задача прервана)
struct InProgressGuard<'a> {
    registry: &'a Mutex<DiscoveryRegistry>,
    host: &'a str,
    armed: bool,
}

impl InProgressGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!(host = self.host, "проба не завершена, адрес освобождён");
            self.registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .abandon(self.host);
        }
    }
}

/// Проба плюс реестр: то, что держит обработчик событий discovery
pub struct DiscoveryService<C> {
    probe: DiscoveryProbe<C>,
    registry: Mutex<DiscoveryRegistry>,
}

impl<C: Connector> DiscoveryService<C> {
    pub fn new(probe: DiscoveryProbe<C>) -> Self {
        Self {
            probe,
            registry: Mutex::new(DiscoveryRegistry::new()),
        }
    }

    /// Блокировка держится только на время работы с множествами,
    /// сама проба идёт без неё
    fn registry(&self) -> std::sync::MutexGuard<'_, DiscoveryRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, unique_id: impl Into<String>, host: impl Into<String>) {
        self.registry().register(unique_id, host);
    }

    /// Регистрирует адреса из конфигурации, чтобы discovery не заводил
    /// их повторно
    pub fn register_hosts<'a>(&self, hosts: impl IntoIterator<Item = &'a str>) {
        let mut registry = self.registry();
        for host in hosts {
            registry.register_host(host);
        }
    }

    pub fn registered_count(&self) -> usize {
        self.registry().registered_count()
    }

    pub fn is_in_progress(&self, host: &str) -> bool {
        self.registry().is_in_progress(host)
    }

    /// Обрабатывает адрес из внешнего discovery
    pub async fn handle(&self, host: &str) -> DiscoveryOutcome {
        let host = host.trim();
        if host.is_empty() {
            return DiscoveryOutcome::NotPrinter {
                host: String::new(),
            };
        }

        {
            let mut registry = self.registry();
            if let Some(unique_id) = registry.known_host(host) {
                debug!(host, unique_id, "адрес уже зарегистрирован");
                return DiscoveryOutcome::AlreadyRegistered {
                    unique_id: unique_id.to_string(),
                    host: host.to_string(),
                };
            }
            if !registry.begin(host) {
                debug!(host, "адрес уже пробуется, повтор пропущен");
                return DiscoveryOutcome::InProgress {
                    host: host.to_string(),
                };
            }
        }

        let guard = InProgressGuard {
            registry: &self.registry,
            host,
            armed: true,
        };

        match self.probe.probe(host).await {
            Ok(printer) => {
                guard.disarm();
                self.registry().complete(printer)
            }
            Err(err) => {
                info!(error = %err, "адрес не опознан как принтер");
                drop(guard);
                DiscoveryOutcome::NotPrinter {
                    host: host.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Manufacturer;
    use crate::decode::PrinterIdentity;
    use crate::models::SnmpVersion;

    fn printer(host: &str, unique_id: &str) -> DiscoveredPrinter {
        DiscoveredPrinter {
            host: host.to_string(),
            unique_id: unique_id.to_string(),
            snmp_version: SnmpVersion::V2c,
            identity: PrinterIdentity {
                manufacturer: Manufacturer::Brother,
                model: "HL-L2350DW".to_string(),
            },
            description: Some("Brother NC-8300w".to_string()),
            name: None,
            serial_number: Some(unique_id.to_string()),
            mac_address: None,
        }
    }

    #[test]
    fn same_host_is_not_probed_twice_at_once() {
        let mut registry = DiscoveryRegistry::new();
        assert!(registry.begin("192.0.2.40"));
        assert!(!registry.begin("192.0.2.40"));

        registry.abandon("192.0.2.40");
        assert!(registry.begin("192.0.2.40"));
    }

    #[test]
    fn duplicate_serial_is_reported_and_address_updated() {
        let mut registry = DiscoveryRegistry::new();
        registry.begin("192.0.2.40");
        assert!(matches!(
            registry.complete(printer("192.0.2.40", "E78123K9N")),
            DiscoveryOutcome::Registered { .. }
        ));
        assert!(!registry.is_in_progress("192.0.2.40"));
        assert!(registry.is_registered("E78123K9N"));

        registry.begin("192.0.2.41");
        assert_eq!(
            registry.complete(printer("192.0.2.41", "E78123K9N")),
            DiscoveryOutcome::AlreadyRegistered {
                unique_id: "E78123K9N".to_string(),
                host: "192.0.2.41".to_string(),
            }
        );
        assert_eq!(registry.registered_count(), 1);
    }

    #[test]
    fn configured_host_is_known_until_device_moves() {
        let mut registry = DiscoveryRegistry::new();
        registry.register_host("192.0.2.42");
        registry.register_host(" 192.0.2.42 ");
        assert_eq!(registry.registered_count(), 1);
        assert_eq!(registry.known_host("192.0.2.42"), Some("192.0.2.42"));
        assert_eq!(registry.known_host("192.0.2.43"), None);

        registry.begin("192.0.2.43");
        registry.complete(printer("192.0.2.43", "E78123K9N"));
        assert_eq!(registry.known_host("192.0.2.43"), Some("E78123K9N"));
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = DiscoveryOutcome::NotPrinter {
            host: "192.0.2.9".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"outcome": "not_printer", "host": "192.0.2.9"})
        );
    }
}
