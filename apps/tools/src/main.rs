use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clap::{Parser, Subcommand};
use oracle_core::{load_settings, HttpReasonClient, ReasonSource};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::ReasonResponse,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use url::Url;

const STUB_REASONS: &[&str] = &[
    "Your code has a typo.",
    "The stars are not aligned.",
    "I already said no yesterday.",
    "Mercury is in retrograde.",
];

#[derive(Parser, Debug)]
#[command(name = "oracle-tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve `GET /no` locally so the front ends can run offline.
    ServeStub {
        #[arg(long, default_value = "127.0.0.1:8787")]
        bind: String,
        /// Reason to serve; repeat to rotate through several
        #[arg(long = "reason")]
        reasons: Vec<String>,
        /// Answer every request with this error instead of a reason
        /// (not_found, rate_limited, unavailable, internal)
        #[arg(long, value_name = "CODE")]
        fail_with: Option<ErrorCode>,
    },
    /// Fetch one reason and report what the front ends would see.
    Probe {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[derive(Clone)]
struct StubState {
    reasons: Arc<Vec<String>>,
    next: Arc<AtomicUsize>,
    failure: Option<ErrorCode>,
}

impl StubState {
    fn new(reasons: Vec<String>, failure: Option<ErrorCode>) -> Self {
        let reasons = if reasons.is_empty() {
            STUB_REASONS.iter().map(|r| r.to_string()).collect()
        } else {
            reasons
        };
        Self {
            reasons: Arc::new(reasons),
            next: Arc::new(AtomicUsize::new(0)),
            failure,
        }
    }
}

struct StubFailure(ErrorCode);

impl StubFailure {
    fn status(&self) -> StatusCode {
        match self.0 {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StubFailure {
    fn into_response(self) -> Response {
        let body = ApiError::new(self.0, format!("stub configured to fail with {}", self.0));
        (self.status(), Json(body)).into_response()
    }
}

async fn serve_no(State(state): State<StubState>) -> Result<Json<ReasonResponse>, StubFailure> {
    if let Some(code) = state.failure {
        tracing::debug!(%code, "serving stub failure");
        return Err(StubFailure(code));
    }
    let idx = state.next.fetch_add(1, Ordering::Relaxed) % state.reasons.len();
    tracing::debug!(idx, "serving stub reason");
    Ok(Json(ReasonResponse::new(state.reasons[idx].clone())))
}

fn stub_router(state: StubState) -> Router {
    Router::new().route("/no", get(serve_no)).with_state(state)
}

async fn serve_stub(bind: &str, reasons: Vec<String>, failure: Option<ErrorCode>) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind stub reason service on {bind}"))?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, failure = ?failure, "stub reason service listening on http://{addr}/no");
    axum::serve(listener, stub_router(StubState::new(reasons, failure)))
        .await
        .context("stub reason service stopped")?;
    Ok(())
}

async fn probe(config: Option<PathBuf>, endpoint: Option<String>) -> Result<()> {
    let mut settings = load_settings(config.as_deref()).context("failed to load oracle settings")?;
    if let Some(endpoint) = endpoint {
        settings.reason_endpoint = endpoint;
    }
    let endpoint: Url = settings.endpoint_url()?;
    let client = HttpReasonClient::new(endpoint.clone(), settings.request_timeout())?;

    match client.fetch_reason().await {
        Ok(reason) => println!("{endpoint} -> \"{reason}\""),
        Err(err) => {
            println!("{endpoint} -> failed ({err})");
            println!("front ends would show: \"{}\"", settings.fallback_reason);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::ServeStub {
            bind,
            reasons,
            fail_with,
        } => serve_stub(&bind, reasons, fail_with).await?,
        Command::Probe { config, endpoint } => probe(config, endpoint).await?,
    }

    Ok(())
}
