//! In-memory request capture server used for local development and by the
//! integration suite. Management routes sit behind bearer auth when an API
//! key is configured; capture routes stay open so anything can post into a
//! bin.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use clap::Parser;
use tokio::sync::RwLock;

#[path = "binspect_server/state.rs"]
mod state;
use self::state::*;
#[path = "binspect_server/handlers_bins.rs"]
mod handlers_bins;
use self::handlers_bins::*;
#[path = "binspect_server/handlers_capture.rs"]
mod handlers_capture;
use self::handlers_capture::*;

#[derive(Parser)]
#[command(name = "binspect-server")]
#[command(about = "In-memory request capture server", long_about = None)]
struct Args {
    #[arg(long, default_value = "127.0.0.1:8787")]
    addr: SocketAddr,

    /// Write the bound address to this file once listening
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Require this bearer key on management routes
    #[arg(long)]
    api_key: Option<String>,
}

async fn require_bearer(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(required) = &state.api_key {
        let expected = format!("Bearer {}", required);
        let presented = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        if presented != Some(expected.as_str()) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }
    next.run(req).await
}

fn app(state: SharedState) -> Router {
    let management = Router::new()
        .route("/whoami", get(whoami))
        .route("/bins", post(create_bin).get(list_bins))
        .route("/bins/:id", get(get_bin).delete(delete_bin))
        .route("/bins/:id/requests", get(list_requests))
        .route("/bins/:id/export", get(export_bin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    let open = Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/b/:public_id", any(capture_root))
        .route("/b/:public_id/*path", any(capture_path));

    management.merge(open).with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let state = Arc::new(AppState {
        api_key: args.api_key,
        bins: RwLock::new(HashMap::new()),
    });

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local = listener.local_addr().context("local addr")?;
    if let Some(path) = &args.addr_file {
        std::fs::write(path, local.to_string()).context("write addr file")?;
    }
    eprintln!("binspect-server listening on {}", local);

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
    .context("serve")?;
    Ok(())
}
