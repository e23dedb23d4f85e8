use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use snmp_printer::collector::SnmpCollector;
use snmp_printer::config::AppConfig;
use snmp_printer::discovery::{DiscoveryProbe, DiscoveryService};
use snmp_printer::formatter::JsonFormatter;
use snmp_printer::handlers::AppState;
use snmp_printer::logging::init_logging;
use snmp_printer::routes::create_router;
use snmp_printer::snmp::UdpConnector;

const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

#[derive(Debug, Parser)]
#[command(name = "snmp-printer", version, about = "Опрос принтеров по SNMP")]
struct Cli {
    /// Файл конфигурации
    #[arg(short, long, env = "SNMP_PRINTER_CONFIG", default_value = "./printers.yaml")]
    config: PathBuf,

    /// Подробные логи
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Один цикл опроса по каждому принтеру из конфигурации
    Poll {
        /// Опросить только этот адрес (host[:port])
        #[arg(long)]
        target: Option<String>,
        /// Компактный JSON
        #[arg(long)]
        compact: bool,
        /// Повторять опрос с интервалом poll_interval до Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// Проба адресов, как если бы они пришли из discovery
    Discover {
        #[arg(required = true)]
        hosts: Vec<String>,
    },
    /// HTTP сервер
    Serve {
        #[arg(long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;

    let mut config = AppConfig::load_or_default(&cli.config)?;
    config.apply_env();

    match cli.command {
        Command::Poll {
            target,
            compact,
            watch,
        } => {
            if let Some(target) = target {
                config.select_target(&target);
            }
            run_poll(&config, compact, watch).await
        }
        Command::Discover { hosts } => run_discover(&config, &hosts).await,
        Command::Serve { listen } => run_serve(config, listen).await,
    }
}

async fn run_poll(config: &AppConfig, compact: bool, watch: bool) -> Result<()> {
    if config.printers.is_empty() {
        anyhow::bail!("Нет принтеров для опроса: задайте printers в конфигурации или SNMP_TARGET");
    }

    loop {
        let finished = poll_round(config, compact).await?;
        if !watch || !finished {
            return Ok(());
        }

        tokio::select! {
            _ = tokio::time::sleep(config.settings.poll_interval()) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("остановка по Ctrl-C");
                return Ok(());
            }
        }
    }
}

/// Опрашивает все цели параллельно. `false`, если раунд прерван Ctrl-C.
async fn poll_round(config: &AppConfig, compact: bool) -> Result<bool> {
    let policy = config.settings.call_policy();
    let mut tasks = JoinSet::new();

    for (name, endpoint) in config.endpoints() {
        match endpoint {
            Ok(endpoint) => {
                tasks.spawn(async move {
                    let result = SnmpCollector::poll_once(&UdpConnector, &endpoint, policy).await;
                    (name, result)
                });
            }
            Err(err) => error!(printer = %name, error = %err, "принтер пропущен"),
        }
    }

    loop {
        tokio::select! {
            next = tasks.join_next() => match next {
                None => return Ok(true),
                Some(Ok((_, Ok(snapshot)))) => println!("{}", JsonFormatter::render(&snapshot, compact)?),
                Some(Ok((name, Err(err)))) => {
                    warn!(printer = %name, error = %err, "принтер не опрошен");
                    println!("{}", JsonFormatter::render_failure(&err)?);
                }
                Some(Err(err)) => error!(error = %err, "задача опроса упала"),
            },
            _ = tokio::signal::ctrl_c() => {
                // Незавершённые циклы просто бросаются, частичных снимков нет
                tasks.abort_all();
                info!("опрос прерван");
                return Ok(false);
            }
        }
    }
}

async fn run_discover(config: &AppConfig, hosts: &[String]) -> Result<()> {
    let settings = &config.settings;
    let service = DiscoveryService::new(
        DiscoveryProbe::new(UdpConnector)
            .with_policy(settings.discovery_policy())
            .with_community(settings.discovery.community.clone())
            .with_port(settings.discovery.port),
    );
    service.register_hosts(config.printers.iter().map(|p| p.host.as_str()));

    for host in hosts {
        let outcome = service.handle(host).await;
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Ошибка сериализации в JSON")?
        );
    }

    Ok(())
}

async fn run_serve(config: AppConfig, listen: Option<String>) -> Result<()> {
    let addr = listen
        .or_else(|| config.settings.listen.clone())
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());

    let state = Arc::new(AppState::from_config(UdpConnector, config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Не удалось открыть {addr}"))?;
    info!(addr = %addr, "HTTP сервер запущен");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("HTTP сервер упал")
}
