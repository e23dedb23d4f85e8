use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, trace};

use super::clients_enum::SnmpClient;
use super::oid::RowIndex;
use super::value::RawValue;
use super::walk::{WalkState, WalkStep};
use super::SnmpError;
use crate::models::Endpoint;

/// Потолок строк одного walk по умолчанию
pub const DEFAULT_MAX_WALK_ROWS: usize = 256;

/// Пачка varbind'ов, следующих за запрошенным OID.
/// `None` в значении означает исключение (endOfMibView и т.п.).
pub type VarbindBatch = Vec<(String, Option<RawValue>)>;

/// Таймаут и повторы, которые вызывающий задаёт для каждого запроса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
    pub timeout: Duration,
    pub retries: u32,
    pub max_walk_rows: usize,
}

impl CallPolicy {
    pub fn new(timeout: Duration, retries: u32) -> Self {
        Self {
            timeout,
            retries,
            max_walk_rows: DEFAULT_MAX_WALK_ROWS,
        }
    }

    /// Штатный опрос
    pub fn polling() -> Self {
        Self::new(Duration::from_secs(1), 3)
    }

    /// Пробы discovery: несколько секунд на поколение протокола
    pub fn discovery() -> Self {
        Self::new(Duration::from_millis(2500), 1)
    }

    pub fn with_max_walk_rows(mut self, max_walk_rows: usize) -> Self {
        self.max_walk_rows = max_walk_rows.max(1);
        self
    }
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self::polling()
    }
}

/// Одна открытая сессия с агентом: примитивные операции без повторов.
///
/// Таймауты и повторы навешивает [`Session`].
pub trait SnmpSession: Send {
    /// GET одного экземпляра. `Ok(None)`: у агента нет такого OID.
    fn get(&mut self, oid: &str)
    -> impl Future<Output = Result<Option<RawValue>, SnmpError>> + Send;

    /// Следующие за `oid` varbind'ы: один для GETNEXT, пачка для GETBULK.
    /// Пустой результат означает конец дерева.
    fn next_batch(&mut self, oid: &str) -> impl Future<Output = Result<VarbindBatch, SnmpError>> + Send;

    /// Сбрасывает транспорт перед повтором, чтобы поздний ответ на
    /// брошенный запрос не был принят за ответ на новый
    fn reset(&mut self) -> impl Future<Output = Result<(), SnmpError>> + Send {
        std::future::ready(Ok(()))
    }
}

/// Открывает сессии к целям
pub trait Connector: Send + Sync {
    type Session: SnmpSession;

    fn connect(
        &self,
        endpoint: &Endpoint,
    ) -> impl Future<Output = Result<Self::Session, SnmpError>> + Send;
}

/// Настоящий UDP-транспорт через snmp2
#[derive(Debug, Clone, Copy, Default)]
pub struct UdpConnector;

impl Connector for UdpConnector {
    type Session = SnmpClient;

    async fn connect(&self, endpoint: &Endpoint) -> Result<SnmpClient, SnmpError> {
        SnmpClient::connect(endpoint).await
    }
}

#[derive(Clone, Copy)]
enum Request<'a> {
    Get(&'a str),
    Next(&'a str),
}

enum Response {
    Value(Option<RawValue>),
    Batch(VarbindBatch),
}

/// Сессия с политикой вызовов. Принадлежит ровно одному циклу опроса.
pub struct Session<S> {
    inner: S,
    target: String,
    policy: CallPolicy,
}

impl<S: SnmpSession> Session<S> {
    /// Открывает сессию. Открытие ограничено тем же таймаутом,
    /// что и отдельный запрос (для v3 это обмен engine discovery).
    pub async fn open<C>(connector: &C, endpoint: &Endpoint, policy: CallPolicy) -> Result<Self, SnmpError>
    where
        C: Connector<Session = S>,
    {
        let target = endpoint.target();
        debug!(target = %target, version = %endpoint.version(), "открываю SNMP сессию");

        let inner = match timeout(policy.timeout, connector.connect(endpoint)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(SnmpError::Timeout {
                    target,
                    retries: 0,
                });
            }
        };

        Ok(Self {
            inner,
            target,
            policy,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub async fn get(&mut self, oid: &str) -> Result<Option<RawValue>, SnmpError> {
        match self.call(Request::Get(oid)).await? {
            Response::Value(value) => Ok(value),
            Response::Batch(_) => Ok(None),
        }
    }

    /// Обходит поддерево `base`. Конечный, повторно не запускается:
    /// каждый вызов начинает новый обход.
    pub async fn walk(&mut self, base: &str) -> Result<Vec<(RowIndex, RawValue)>, SnmpError> {
        let mut state = WalkState::from_oid(base, self.policy.max_walk_rows)?;
        let mut cursor = base.to_string();

        loop {
            let batch = match self.call(Request::Next(&cursor)).await? {
                Response::Batch(batch) => batch,
                Response::Value(_) => Vec::new(),
            };

            if batch.is_empty() {
                break;
            }

            let mut step = WalkStep::Continue;
            for (oid, value) in batch {
                step = state.accept(&oid, value);
                if step == WalkStep::Done {
                    break;
                }
                cursor = oid;
            }

            if step == WalkStep::Done {
                break;
            }
        }

        trace!(target = %self.target, base, rows = state.row_count(), "walk завершён");
        Ok(state.into_rows())
    }

    /// Ошибка сброса не прерывает повтор: он пойдёт по старому транспорту
    async fn reset(&mut self) {
        match timeout(self.policy.timeout, self.inner.reset()).await {
            Ok(Ok(())) => trace!(target = %self.target, "транспорт сброшен"),
            Ok(Err(err)) => debug!(target = %self.target, error = %err, "сброс транспорта не удался"),
            Err(_) => debug!(target = %self.target, "сброс транспорта: таймаут"),
        }
    }

    pub fn close(self) {
        debug!(target = %self.target, "SNMP сессия закрыта");
    }

    async fn call(&mut self, request: Request<'_>) -> Result<Response, SnmpError> {
        let mut attempt = 0;

        loop {
            let outcome = match request {
                Request::Get(oid) => timeout(self.policy.timeout, self.inner.get(oid))
                    .await
                    .map(|r| r.map(Response::Value)),
                Request::Next(oid) => timeout(self.policy.timeout, self.inner.next_batch(oid))
                    .await
                    .map(|r| r.map(Response::Batch)),
            };

            let err = match outcome {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err(err)) if !err.is_retriable() => return Err(err),
                Ok(Err(err)) => err,
                Err(_) => SnmpError::Timeout {
                    target: self.target.clone(),
                    retries: attempt,
                },
            };

            if attempt >= self.policy.retries {
                return Err(match err {
                    SnmpError::Timeout { target, .. } => SnmpError::Timeout {
                        target,
                        retries: attempt,
                    },
                    other => other,
                });
            }

            attempt += 1;
            debug!(target = %self.target, attempt, error = %err, "повтор запроса");
            self.reset().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::oids;
    use crate::models::SnmpVersion;
    use crate::snmp::mock::{MockAgent, MockCall, MockConnector, MockFault};

    fn endpoint() -> Endpoint {
        Endpoint::bare("192.0.2.10", SnmpVersion::V2c)
    }

    fn connector(agent: &MockAgent) -> MockConnector {
        MockConnector::new().with_agent(SnmpVersion::V2c, agent.clone())
    }

    #[tokio::test]
    async fn get_distinguishes_not_found_from_failure() {
        let agent = MockAgent::new().with(oids::SYS_DESCR, "LaserJet");
        agent.fail(oids::SYS_UPTIME, MockFault::Network);

        let mut session = Session::open(&connector(&agent), &endpoint(), CallPolicy::polling())
            .await
            .unwrap();

        assert_eq!(session.get(oids::SYS_DESCR).await.unwrap(), Some(RawValue::from("LaserJet")));
        assert_eq!(session.get(oids::SYS_CONTACT).await.unwrap(), None);
        assert!(matches!(
            session.get(oids::SYS_UPTIME).await,
            Err(SnmpError::Network { .. })
        ));
    }

    #[tokio::test]
    async fn transient_failure_is_retried() {
        let agent = MockAgent::new().with(oids::SYS_NAME, "printer-2");
        agent.fail_times(oids::SYS_NAME, MockFault::Timeout, 2);

        let mut session = Session::open(&connector(&agent), &endpoint(), CallPolicy::polling())
            .await
            .unwrap();

        assert_eq!(session.get(oids::SYS_NAME).await.unwrap(), Some(RawValue::from("printer-2")));
        assert_eq!(agent.get_count(oids::SYS_NAME), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_timeout_uses_fresh_transport() {
        let agent = MockAgent::new().with(oids::SYS_NAME, "printer-2");
        agent.fail_times(oids::SYS_NAME, MockFault::Hang, 1);

        let policy = CallPolicy::new(Duration::from_millis(500), 1);
        let mut session = Session::open(&connector(&agent), &endpoint(), policy).await.unwrap();

        assert_eq!(session.get(oids::SYS_NAME).await.unwrap(), Some(RawValue::from("printer-2")));
        assert_eq!(
            agent.calls(),
            vec![
                MockCall::Connect(SnmpVersion::V2c),
                MockCall::Get(oids::SYS_NAME.to_string()),
                MockCall::Reset,
                MockCall::Get(oids::SYS_NAME.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn answered_request_keeps_transport() {
        let agent = MockAgent::new().with(oids::SYS_NAME, "printer-2");

        let mut session = Session::open(&connector(&agent), &endpoint(), CallPolicy::polling())
            .await
            .unwrap();
        session.get(oids::SYS_NAME).await.unwrap();
        session.get(oids::SYS_CONTACT).await.unwrap();

        assert!(!agent.calls().contains(&MockCall::Reset));
    }

    #[tokio::test]
    async fn auth_failure_is_not_retried() {
        let agent = MockAgent::new();
        agent.fail(oids::SYS_DESCR, MockFault::Auth);

        let mut session = Session::open(&connector(&agent), &endpoint(), CallPolicy::polling())
            .await
            .unwrap();

        assert!(session.get(oids::SYS_DESCR).await.unwrap_err().is_auth());
        assert_eq!(agent.get_count(oids::SYS_DESCR), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_agent_times_out_after_retries() {
        let agent = MockAgent::new();
        agent.fail(oids::SYS_DESCR, MockFault::Hang);

        let policy = CallPolicy::new(Duration::from_millis(500), 1);
        let mut session = Session::open(&connector(&agent), &endpoint(), policy).await.unwrap();

        let err = session.get(oids::SYS_DESCR).await.unwrap_err();
        assert!(matches!(err, SnmpError::Timeout { retries: 1, .. }));
        assert_eq!(agent.get_count(oids::SYS_DESCR), 2);
    }

    #[tokio::test]
    async fn walk_returns_rows_of_one_column_only() {
        let agent = MockAgent::new()
            .with(&format!("{}.1", oids::PRT_MARKER_SUPPLIES_LEVEL), 80)
            .with(&format!("{}.2", oids::PRT_MARKER_SUPPLIES_LEVEL), -3)
            .with(&format!("{}.1", oids::PRT_MARKER_COLORANT_VALUE), "black");

        let mut session = Session::open(&connector(&agent), &endpoint(), CallPolicy::polling())
            .await
            .unwrap();

        let rows = session.walk(oids::PRT_MARKER_SUPPLIES_LEVEL).await.unwrap();
        assert_eq!(
            rows,
            vec![
                (RowIndex::from(1), RawValue::Integer(80)),
                (RowIndex::from(2), RawValue::Integer(-3)),
            ]
        );
    }

    #[tokio::test]
    async fn walk_respects_row_guard() {
        let mut agent = MockAgent::new();
        for i in 1..=40 {
            agent = agent.with(&format!("{}.{i}", oids::PRT_MARKER_SUPPLIES_DESCRIPTION), "x");
        }

        let policy = CallPolicy::polling().with_max_walk_rows(10);
        let mut session = Session::open(&connector(&agent), &endpoint(), policy).await.unwrap();

        let rows = session.walk(oids::PRT_MARKER_SUPPLIES_DESCRIPTION).await.unwrap();
        assert_eq!(rows.len(), 10);
    }

    #[tokio::test]
    async fn missing_generation_cannot_connect() {
        let agent = MockAgent::new();
        let result = Session::open(
            &connector(&agent),
            &Endpoint::bare("192.0.2.10", SnmpVersion::V1),
            CallPolicy::polling(),
        )
        .await;
        assert!(matches!(result, Err(SnmpError::Network { .. })));
    }
}
