//! Convoy gateway binary.
//!
//! - WebSocket endpoint: /v1/ws?token=...
//! - Ops endpoints: /healthz, /statsz
//! - Dev wiring: in-memory store + `dev:<uid>` token verifier. Production
//!   deployments swap in real `Store` / `IdentityVerifier` implementations.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use convoy_gateway::{app_state, auth, config, router, store};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("convoy.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let store = Arc::new(store::MemStore::new());
    let verifier = Arc::new(auth::DevVerifier::new());
    let state = app_state::AppState::new(cfg, store, verifier);
    let app = router::build_router(state);

    tracing::info!(%listen, "convoy-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
