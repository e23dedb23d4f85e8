use crate::config::{AppConfig, Settings};
use crate::discovery::{DiscoveryProbe, DiscoveryService};
use crate::snmp::Connector;

/// Общее состояние HTTP обработчиков
pub struct AppState<C> {
    pub connector: C,
    pub settings: Settings,
    pub discovery: DiscoveryService<C>,
}

impl<C: Connector + Clone> AppState<C> {
    pub fn new(connector: C, settings: Settings) -> Self {
        let probe = DiscoveryProbe::new(connector.clone())
            .with_policy(settings.discovery_policy())
            .with_community(settings.discovery.community.clone())
            .with_port(settings.discovery.port);

        Self {
            connector,
            settings,
            discovery: DiscoveryService::new(probe),
        }
    }

    /// Как [`AppState::new`], принтеры из конфигурации сразу считаются
    /// зарегистрированными
    pub fn from_config(connector: C, config: AppConfig) -> Self {
        let state = Self::new(connector, config.settings);
        state
            .discovery
            .register_hosts(config.printers.iter().map(|p| p.host.as_str()));
        state
    }
}
