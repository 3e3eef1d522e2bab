use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use flames::config::AppConfig;
use flames::error::AppError;
use flames::game::{eliminate_step, GameSession, HistoryEntry, StatsSnapshot};
use flames::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    session: Arc<Mutex<GameSession>>,
}

#[derive(Parser, Debug)]
#[command(
    name = "FLAMES Compatibility Service",
    about = "Run the FLAMES compatibility engine as an HTTP service or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute one compatibility result and print it
    Play(PlayArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Your name
    first: String,
    /// Partner's name
    second: String,
    /// Print every elimination round
    #[arg(long)]
    trace: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Play(args) => run_play(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        session: Arc::new(Mutex::new(GameSession::new())),
    };

    let app = router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "compatibility service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_play(args: PlayArgs) -> Result<(), AppError> {
    let mut session = GameSession::new();
    let outcome = session
        .compute(&args.first, &args.second)
        .map_err(AppError::from)?;

    if args.trace {
        let mut labels = session.labels().to_vec();
        println!("count {} over [{}]", outcome.count, labels.join(", "));
        while labels.len() > 1 {
            labels = eliminate_step(outcome.count, &labels);
            println!("  -> [{}]", labels.join(", "));
        }
    }

    println!("Relationship : {}", outcome.label);
    if let Some(entry) = session.history().last() {
        println!("{}", entry.render());
    }
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/match", post(match_endpoint))
        .route("/api/v1/stats", get(stats_endpoint))
        .route("/api/v1/history", get(history_endpoint))
        .route("/api/v1/history/import", post(import_history_endpoint))
        .route(
            "/api/v1/labels",
            get(labels_endpoint).put(rename_labels_endpoint),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct MatchRequest {
    first: String,
    second: String,
}

#[derive(Debug, Serialize)]
struct MatchResponse {
    first: String,
    second: String,
    count: usize,
    label: String,
    stats: StatsSnapshot,
}

#[derive(Debug, Serialize)]
struct HistoryResponse {
    entries: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ImportHistoryRequest {
    content: String,
}

#[derive(Debug, Serialize)]
struct ImportHistoryResponse {
    appended: usize,
    total: usize,
}

#[derive(Debug, Deserialize)]
struct RenameLabelsRequest {
    renames: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct LabelsResponse {
    labels: Vec<String>,
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn match_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let mut session = state.session.lock().expect("session mutex poisoned");
    let outcome = session
        .compute(&payload.first, &payload.second)
        .map_err(AppError::from)?;

    info!(label = %outcome.label, count = outcome.count, "match computed");

    let stats = session.stats();
    Ok(Json(MatchResponse {
        first: outcome.first,
        second: outcome.second,
        count: outcome.count,
        label: outcome.label,
        stats,
    }))
}

async fn stats_endpoint(State(state): State<AppState>) -> Json<StatsSnapshot> {
    let session = state.session.lock().expect("session mutex poisoned");
    Json(session.stats())
}

async fn history_endpoint(State(state): State<AppState>) -> Json<HistoryResponse> {
    let session = state.session.lock().expect("session mutex poisoned");
    let entries = session.history().iter().map(HistoryEntry::render).collect();
    Json(HistoryResponse { entries })
}

async fn import_history_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<ImportHistoryRequest>,
) -> Result<Json<ImportHistoryResponse>, AppError> {
    let mut session = state.session.lock().expect("session mutex poisoned");
    let appended = session.import_history(Cursor::new(payload.content.into_bytes()))?;

    info!(appended, "history imported");

    Ok(Json(ImportHistoryResponse {
        appended,
        total: session.history().len(),
    }))
}

async fn labels_endpoint(State(state): State<AppState>) -> Json<LabelsResponse> {
    let session = state.session.lock().expect("session mutex poisoned");
    Json(LabelsResponse {
        labels: session.labels().to_vec(),
    })
}

async fn rename_labels_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<RenameLabelsRequest>,
) -> Result<Json<LabelsResponse>, AppError> {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session
        .customize_labels(&payload.renames)
        .map_err(AppError::from)?;

    info!("labels customized");

    Ok(Json(LabelsResponse {
        labels: session.labels().to_vec(),
    }))
}
