use serde::Serialize;

use crate::collector::PollError;
use crate::models::Snapshot;

/// JSON структура для потребителя снимков
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotJson<'a> {
    pub target: &'a str,
    pub timestamp: String,
    pub summary: ResultSummary,
    pub snapshot: &'a Snapshot,
    pub errors: Vec<ErrorInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub total_fields: usize,
    pub successful_fields: usize,
    pub supplies: usize,
    pub trays: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub field: String,
    /// "unsupported" | "failed" | "anomaly"
    pub kind: String,
    pub message: Option<String>,
}

/// Ответ, когда цикл не дал снимка
#[derive(Debug, Clone, Serialize)]
pub struct FailureJson<'a> {
    pub target: &'a str,
    pub timestamp: String,
    pub error: &'static str,
    pub message: String,
}

/// JSON форматтер для снимков
pub struct JsonFormatter;

impl JsonFormatter {
    /// Оборачивает снимок в конверт со сводкой и списком проблемных полей
    pub fn format_snapshot(snapshot: &Snapshot) -> SnapshotJson<'_> {
        let summary = ResultSummary {
            total_fields: snapshot.fields.total(),
            successful_fields: snapshot.fields.successful(),
            supplies: snapshot.supplies.len(),
            trays: snapshot.trays.len(),
        };

        SnapshotJson {
            target: &snapshot.target,
            timestamp: snapshot.collected_at.to_rfc3339(),
            summary,
            snapshot,
            errors: Self::extract_errors(snapshot),
        }
    }

    pub fn format_failure(error: &PollError) -> FailureJson<'_> {
        FailureJson {
            target: error.target(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            error: error.kind(),
            message: error.to_string(),
        }
    }

    /// Извлекает проблемные поля из отчёта
    fn extract_errors(snapshot: &Snapshot) -> Vec<ErrorInfo> {
        snapshot
            .fields
            .problems()
            .map(|(field, outcome)| ErrorInfo {
                field: field.name().to_string(),
                kind: outcome.kind().to_string(),
                message: outcome.detail().map(str::to_string),
            })
            .collect()
    }

    /// Сериализует снимок в JSON строку
    pub fn to_json_string(snapshot: &Snapshot) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&Self::format_snapshot(snapshot))
            .map_err(|e| anyhow::anyhow!("Ошибка сериализации в JSON: {}", e))
    }

    /// Сериализует снимок в компактный JSON
    pub fn to_json_compact(snapshot: &Snapshot) -> anyhow::Result<String> {
        serde_json::to_string(&Self::format_snapshot(snapshot))
            .map_err(|e| anyhow::anyhow!("Ошибка сериализации в JSON: {}", e))
    }

    pub fn render(snapshot: &Snapshot, compact: bool) -> anyhow::Result<String> {
        if compact {
            Self::to_json_compact(snapshot)
        } else {
            Self::to_json_string(snapshot)
        }
    }

    pub fn render_failure(error: &PollError) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&Self::format_failure(error))
            .map_err(|e| anyhow::anyhow!("Ошибка сериализации в JSON: {}", e))
    }
}
