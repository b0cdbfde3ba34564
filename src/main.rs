//! Praxis Analytics driver binary.
//!
//! Wires the engine to the HTTP sink and file-backed backlog, runs the
//! batch dispatcher, and consumes newline-delimited JSON action commands
//! on stdin as the client-runtime surface. Reports are printed to stdout
//! on demand.

use std::sync::Arc;

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use praxis_analytics::adapters::{FileKeyValueStore, HttpMetricSink, HttpSinkConfig, SystemClock};
use praxis_analytics::application::{
    export_report, AnalyticsConfig, AnalyticsService, BatchDispatcher, DispatcherConfig,
    ExportFormat,
};
use praxis_analytics::config::AppConfig;
use praxis_analytics::domain::foundation::{CaseId, DecisionId, ModuleId, Timestamp, UserId};
use praxis_analytics::domain::metrics::TimeRange;
use praxis_analytics::ports::RuntimeSignal;

/// One stdin line: an action command from the hosting runtime.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
enum Command {
    #[serde(rename_all = "camelCase")]
    ModuleStart {
        user_id: String,
        module_id: String,
        case_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Decision {
        user_id: String,
        module_id: String,
        case_id: String,
        decision_id: String,
        is_correct: bool,
        #[serde(default)]
        response_time_ms: u64,
        #[serde(default)]
        is_critical: bool,
    },
    #[serde(rename_all = "camelCase")]
    ModuleCompletion {
        user_id: String,
        module_id: String,
        case_id: String,
        final_score: f64,
        total_time_ms: u64,
        #[serde(default)]
        decisions: Vec<String>,
    },
    Activity,
    Visibility {
        visible: bool,
    },
    Connectivity {
        online: bool,
    },
    #[serde(rename_all = "camelCase")]
    Report {
        user_id: String,
        #[serde(default)]
        format: Option<String>,
        #[serde(default)]
        last_days: Option<i64>,
    },
    Flush,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    config.validate()?;

    let mut sink_config = HttpSinkConfig::new(config.sink.endpoint.clone())
        .with_timeout(config.sink.request_timeout());
    if let Some(token) = &config.sink.auth_token {
        sink_config = sink_config.with_auth_token(token.clone());
    }
    let sink = Arc::new(HttpMetricSink::new(sink_config));
    let store = Arc::new(FileKeyValueStore::new(config.storage.resolved_dir()));
    let clock = Arc::new(SystemClock::new());

    let analytics_config = AnalyticsConfig::default()
        .with_batch_size(config.dispatcher.batch_size)
        .with_retry(config.dispatcher.retry_policy())
        .with_idle_threshold_ms(config.tracking.idle_threshold_ms)
        .with_history_limit(config.tracking.history_limit)
        .with_retention_limit(config.storage.retention_limit);
    let service = Arc::new(AnalyticsService::new(sink, store, clock, analytics_config));

    // Run the dispatcher until shutdown; it makes the final flush attempt
    // and closes the session on the way out.
    let dispatcher = BatchDispatcher::with_config(
        service.clone(),
        DispatcherConfig::default().with_flush_interval(config.dispatcher.flush_interval()),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let dispatcher_handle = tokio::spawn(async move { dispatcher.run(shutdown_rx).await });

    info!(
        endpoint = %config.sink.endpoint,
        session_id = %service.session_id(),
        "Analytics engine ready, reading commands from stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,

            line = lines.next_line() => match line {
                Ok(Some(line)) => apply_command(&service, &line).await,
                Ok(None) => {
                    info!("Command stream closed");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Failed to read command stream");
                    break;
                }
            },
        }
    }

    shutdown_tx.send(true).ok();
    dispatcher_handle.await.ok();
    info!("Analytics engine stopped");

    Ok(())
}

/// Parses and applies one command line. Malformed lines are logged and
/// skipped; the engine itself never fails a command.
async fn apply_command(service: &AnalyticsService, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    let command = match serde_json::from_str::<Command>(line) {
        Ok(command) => command,
        Err(e) => {
            warn!(error = %e, "Ignoring malformed command");
            return;
        }
    };

    match command {
        Command::ModuleStart {
            user_id,
            module_id,
            case_id,
        } => {
            service.track_module_start(
                UserId::new(user_id),
                ModuleId::new(module_id),
                CaseId::new(case_id),
            );
        }
        Command::Decision {
            user_id,
            module_id,
            case_id,
            decision_id,
            is_correct,
            response_time_ms,
            is_critical,
        } => {
            service.track_decision(
                UserId::new(user_id),
                ModuleId::new(module_id),
                CaseId::new(case_id),
                DecisionId::new(decision_id),
                is_correct,
                response_time_ms,
                is_critical,
            );
        }
        Command::ModuleCompletion {
            user_id,
            module_id,
            case_id,
            final_score,
            total_time_ms,
            decisions,
        } => {
            service.track_module_completion(
                UserId::new(user_id),
                ModuleId::new(module_id),
                CaseId::new(case_id),
                final_score,
                total_time_ms,
                decisions.into_iter().map(DecisionId::new).collect(),
            );
        }
        Command::Activity => service.handle_signal(RuntimeSignal::Activity),
        Command::Visibility { visible } => {
            service.handle_signal(RuntimeSignal::VisibilityChanged { visible });
        }
        Command::Connectivity { online } => {
            service.handle_signal(RuntimeSignal::ConnectivityChanged { online });
        }
        Command::Report {
            user_id,
            format,
            last_days,
        } => print_report(service, &user_id, format.as_deref(), last_days),
        Command::Flush => {
            let outcome = service.flush().await;
            info!(?outcome, "Manual flush finished");
        }
    }
}

fn print_report(
    service: &AnalyticsService,
    user_id: &str,
    format: Option<&str>,
    last_days: Option<i64>,
) {
    let format = match format.map(str::parse::<ExportFormat>).transpose() {
        Ok(format) => format.unwrap_or(ExportFormat::Json),
        Err(e) => {
            warn!("{}", e);
            return;
        }
    };
    let range = last_days.map(|days| TimeRange::last_days(Timestamp::now(), days));

    let report = service.detailed_report(&UserId::new(user_id), range.as_ref());
    match export_report(&report, format) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => error!(error = %e, "Failed to render report"),
    }
}

/// Handle shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
