//! Логирование через tracing: фильтр из RUST_LOG или по флагу --debug,
//! вывод в stderr, чтобы stdout оставался чистым JSON.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(debug: bool) -> Result<()> {
    let log_level = if debug { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("snmp_printer={log_level},tower_http={log_level}")));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(debug)
        .with_line_number(debug);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Не удалось инициализировать логирование: {}", e))
}
