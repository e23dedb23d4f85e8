use tracing::{Instrument, debug, info, info_span, warn};

pub mod assemble;
pub mod scalar_collector;
pub mod table_collector;
pub mod types;

pub use scalar_collector::ScalarCollector;
pub use table_collector::TableCollector;
pub use types::{CorrelatedRow, Phase, PollError, RawReads, ScalarResult, TableResult};

use crate::catalog::Field;
use crate::models::{Endpoint, FieldOutcome, FieldReport, Snapshot};
use crate::snmp::{CallPolicy, Connector, RawValue, Session, SnmpError, SnmpSession};

/// Колонки, которые обходятся за цикл, кроме таблиц расходников,
/// лотков и крышек
const EXTRA_COLUMNS: &[Field] = &[Field::ColorantValue, Field::PageCounters, Field::DisplayBuffer];

/// Коллектор: один цикл опроса одного принтера
pub struct SnmpCollector;

impl SnmpCollector {
    /// Опрашивает принтер и собирает снимок.
    ///
    /// Ошибкой завершается только весь цикл: нет связи на проверочном
    /// запросе, отказ аутентификации или негодная цель. Отказ отдельного
    /// поля попадает в `Snapshot::fields`.
    pub async fn poll_once<C: Connector>(
        connector: &C,
        endpoint: &Endpoint,
        policy: CallPolicy,
    ) -> Result<Snapshot, PollError> {
        let target = endpoint.target();
        let span = info_span!("poll", target = %target, version = %endpoint.version());

        async {
            let result = Self::run_cycle(connector, endpoint, policy).await;
            match &result {
                Ok(snapshot) => {
                    enter(Phase::Complete);
                    info!(
                        fields = snapshot.fields.total(),
                        read = snapshot.fields.successful(),
                        supplies = snapshot.supplies.len(),
                        "опрос завершён"
                    );
                }
                Err(err) => {
                    enter(Phase::Failed);
                    warn!(kind = err.kind(), error = %err, "опрос не удался");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_cycle<C: Connector>(
        connector: &C,
        endpoint: &Endpoint,
        policy: CallPolicy,
    ) -> Result<Snapshot, PollError> {
        let target = endpoint.target();
        enter(Phase::Init);

        enter(Phase::Connecting);
        let mut session = Session::open(connector, endpoint, policy)
            .await
            .map_err(|e| PollError::from_connect(&target, e))?;

        let mut report = FieldReport::new();
        let description = Self::probe(&mut session, &mut report).await?;

        enter(Phase::Reading);
        let mut reads = Self::read_all(&mut session, &mut report)
            .await
            .map_err(|source| PollError::Auth {
                target: target.clone(),
                source,
            })?;
        if let Some(description) = description {
            reads.scalars.insert(Field::SysDescr, description);
        }
        session.close();

        enter(Phase::Aggregating);
        Ok(assemble::assemble(endpoint, &reads, report))
    }

    /// Проверка связи по sysDescr. Молчание агента здесь значит, что
    /// принтер недоступен, а не что у него нет поля.
    async fn probe<S: SnmpSession>(
        session: &mut Session<S>,
        report: &mut FieldReport,
    ) -> Result<Option<RawValue>, PollError> {
        let target = session.target().to_string();

        match session.get(Field::SysDescr.oid()).await {
            Ok(Some(value)) => {
                report.record(Field::SysDescr, FieldOutcome::Read);
                Ok(Some(value))
            }
            Ok(None) => {
                report.record(Field::SysDescr, FieldOutcome::Unsupported);
                Ok(None)
            }
            Err(source) if source.is_auth() => Err(PollError::Auth { target, source }),
            // Агент ответил ошибкой: связь есть
            Err(source @ SnmpError::Agent { .. }) => {
                report.record(Field::SysDescr, FieldOutcome::Failed(source.to_string()));
                Ok(None)
            }
            Err(source) => Err(PollError::Connectivity { target, source }),
        }
    }

    /// Читает скаляры после sysDescr и все колонки.
    /// `Err` только при отказе аутентификации.
    pub async fn read_all<S: SnmpSession>(
        session: &mut Session<S>,
        report: &mut FieldReport,
    ) -> Result<RawReads, SnmpError> {
        let mut reads = RawReads::default();
        reads.scalars =
            ScalarCollector::collect_scalars(session, &Field::SCALARS[1..], report).await?;

        for columns in [
            Field::SUPPLY_COLUMNS,
            Field::INPUT_COLUMNS,
            Field::COVER_COLUMNS,
            EXTRA_COLUMNS,
        ] {
            for table in TableCollector::collect_tables(session, columns, report).await? {
                reads.columns.insert(table.field, table.rows);
            }
        }

        debug!(
            scalars = reads.scalars.len(),
            columns = reads.columns.len(),
            "чтение завершено"
        );
        Ok(reads)
    }
}

fn enter(phase: Phase) {
    debug!(phase = %phase, "фаза цикла");
}
