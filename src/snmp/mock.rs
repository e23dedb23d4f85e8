//! Агент SNMP в памяти для тестов и отладки без сети.
//!
//! `MockAgent` хранит дерево OID и умеет отказывать на выбранных OID;
//! `MockConnector` раздаёт сессии к агентам по поколениям протокола.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::{Arc, Mutex, PoisonError};

use super::oid::parse_arcs;
use super::session::{Connector, SnmpSession, VarbindBatch};
use super::v2c::BULK_MAX_REPETITIONS;
use super::value::RawValue;
use super::SnmpError;
use crate::models::{Endpoint, SnmpVersion};

/// Какой отказ изобразить
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFault {
    /// Транспорт сообщил о таймауте
    Timeout,
    Network,
    /// Агент отверг учётные данные
    Auth,
    /// Ответа нет вовсе; сработает таймаут сессии
    Hang,
}

/// Запрос, дошедший до агента
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Connect(SnmpVersion),
    Get(String),
    Next(String),
    /// Сброс транспорта перед повтором
    Reset,
}

#[derive(Debug, Clone, Copy)]
struct Injected {
    fault: MockFault,
    /// `None`: отказывать всегда
    remaining: Option<u32>,
}

#[derive(Debug, Default)]
struct AgentState {
    values: BTreeMap<Vec<u64>, RawValue>,
    faults: Vec<(Vec<u64>, Injected)>,
    calls: Vec<MockCall>,
}

impl AgentState {
    /// Отказ срабатывает на OID и всём его поддереве
    fn take_fault(&mut self, arcs: &[u64]) -> Option<MockFault> {
        let (_, injected) = self
            .faults
            .iter_mut()
            .find(|(prefix, injected)| arcs.starts_with(prefix) && injected.remaining != Some(0))?;

        if let Some(remaining) = injected.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(injected.fault)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockAgent {
    state: Arc<Mutex<AgentState>>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Кладёт значение по OID. Невалидный OID игнорируется.
    pub fn with(self, oid: &str, value: impl Into<RawValue>) -> Self {
        self.set(oid, value);
        self
    }

    pub fn set(&self, oid: &str, value: impl Into<RawValue>) {
        if let Ok(arcs) = parse_arcs(oid) {
            self.lock().values.insert(arcs, value.into());
        }
    }

    pub fn remove(&self, oid: &str) {
        if let Ok(arcs) = parse_arcs(oid) {
            self.lock().values.remove(&arcs);
        }
    }

    /// Все запросы к OID и его поддереву отказывают
    pub fn fail(&self, oid: &str, fault: MockFault) {
        self.inject(oid, fault, None);
    }

    /// Первые `times` запросов отказывают, дальше агент отвечает
    pub fn fail_times(&self, oid: &str, fault: MockFault, times: u32) {
        self.inject(oid, fault, Some(times));
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Сколько раз запрашивали GET этого OID
    pub fn get_count(&self, oid: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, MockCall::Get(o) if o == oid))
            .count()
    }

    pub fn connect_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, MockCall::Connect(_)))
            .count()
    }

    fn inject(&self, oid: &str, fault: MockFault, remaining: Option<u32>) {
        if let Ok(arcs) = parse_arcs(oid) {
            self.lock().faults.push((arcs, Injected { fault, remaining }));
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AgentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Сессия к [`MockAgent`]
#[derive(Debug, Clone)]
pub struct MockSession {
    agent: MockAgent,
    version: SnmpVersion,
    target: String,
}

impl MockSession {
    pub fn new(agent: MockAgent, version: SnmpVersion, target: impl Into<String>) -> Self {
        Self {
            agent,
            version,
            target: target.into(),
        }
    }

    fn fault_error(&self, fault: MockFault) -> SnmpError {
        match fault {
            MockFault::Timeout | MockFault::Hang => SnmpError::Timeout {
                target: self.target.clone(),
                retries: 0,
            },
            MockFault::Network => SnmpError::Network {
                target: self.target.clone(),
                detail: "connection refused".to_string(),
            },
            MockFault::Auth => SnmpError::Auth {
                target: self.target.clone(),
                detail: "unknown user name".to_string(),
            },
        }
    }

    /// Проверяет отказы и записывает вызов. Блокировка не переживает await.
    fn enter(&self, call: MockCall, arcs: &[u64]) -> Option<MockFault> {
        let mut state = self.agent.lock();
        state.calls.push(call);
        state.take_fault(arcs)
    }
}

impl SnmpSession for MockSession {
    async fn get(&mut self, oid: &str) -> Result<Option<RawValue>, SnmpError> {
        let arcs = parse_arcs(oid)?;

        match self.enter(MockCall::Get(oid.to_string()), &arcs) {
            Some(MockFault::Hang) => std::future::pending().await,
            Some(fault) => Err(self.fault_error(fault)),
            None => Ok(self.agent.lock().values.get(&arcs).cloned()),
        }
    }

    async fn next_batch(&mut self, oid: &str) -> Result<VarbindBatch, SnmpError> {
        let arcs = parse_arcs(oid)?;

        match self.enter(MockCall::Next(oid.to_string()), &arcs) {
            Some(MockFault::Hang) => std::future::pending().await,
            Some(fault) => Err(self.fault_error(fault)),
            None => {
                let page = match self.version {
                    SnmpVersion::V1 => 1,
                    SnmpVersion::V2c | SnmpVersion::V3 => BULK_MAX_REPETITIONS as usize,
                };
                let state = self.agent.lock();
                Ok(state
                    .values
                    .range::<Vec<u64>, _>((Bound::Excluded(&arcs), Bound::Unbounded))
                    .take(page)
                    .map(|(arcs, value)| (join_arcs(arcs), Some(value.clone())))
                    .collect())
            }
        }
    }

    async fn reset(&mut self) -> Result<(), SnmpError> {
        self.agent.lock().calls.push(MockCall::Reset);
        Ok(())
    }
}

/// Раздаёт сессии к агентам; поколение без агента недоступно по сети
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    agents: HashMap<SnmpVersion, MockAgent>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, version: SnmpVersion, agent: MockAgent) -> Self {
        self.agents.insert(version, agent);
        self
    }
}

impl Connector for MockConnector {
    type Session = MockSession;

    async fn connect(&self, endpoint: &Endpoint) -> Result<MockSession, SnmpError> {
        let version = endpoint.version();
        match self.agents.get(&version) {
            Some(agent) => {
                agent.lock().calls.push(MockCall::Connect(version));
                Ok(MockSession::new(agent.clone(), version, endpoint.target()))
            }
            None => Err(SnmpError::Network {
                target: endpoint.target(),
                detail: format!("агент не отвечает на SNMP {version}"),
            }),
        }
    }
}

fn join_arcs(arcs: &[u64]) -> String {
    arcs.iter().map(u64::to_string).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn next_batch_follows_oid_order() {
        let agent = MockAgent::new()
            .with("1.3.6.1.2.1.43.11.1.1.9.1.2", 10)
            .with("1.3.6.1.2.1.43.11.1.1.9.1.10", 30)
            .with("1.3.6.1.2.1.43.11.1.1.9.1.1", 20);
        let mut session = MockSession::new(agent, SnmpVersion::V1, "192.0.2.1:161");

        let batch = session.next_batch("1.3.6.1.2.1.43.11.1.1.9.1.1").await.unwrap();
        assert_eq!(
            batch,
            vec![("1.3.6.1.2.1.43.11.1.1.9.1.2".to_string(), Some(RawValue::Integer(10)))]
        );

        let batch = session.next_batch("1.3.6.1.2.1.43.11.1.1.9.1.2").await.unwrap();
        assert_eq!(batch[0].0, "1.3.6.1.2.1.43.11.1.1.9.1.10");
    }

    #[tokio::test]
    async fn limited_fault_wears_off() {
        let agent = MockAgent::new().with("1.3.6.1.2.1.1.5.0", "lobby");
        agent.fail_times("1.3.6.1.2.1.1.5.0", MockFault::Network, 1);
        let mut session = MockSession::new(agent.clone(), SnmpVersion::V2c, "192.0.2.1:161");

        assert!(session.get("1.3.6.1.2.1.1.5.0").await.is_err());
        assert!(session.get("1.3.6.1.2.1.1.5.0").await.is_ok());
        assert_eq!(agent.get_count("1.3.6.1.2.1.1.5.0"), 2);
    }
}
