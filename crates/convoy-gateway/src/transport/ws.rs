//! WebSocket handler.
//!
//! Responsibilities:
//! - Verify the handshake credential *before* the upgrade completes; a
//!   missing or invalid token never reaches event processing.
//! - Best-effort User prefetch for the display snapshot (absence or store
//!   failure does not fail authentication, it only skips presence niceties).
//! - Lifecycle: per-session outbound queue, ping tick, idle timeout.
//! - Decode-once, then dispatch; scoped errors go back as `error` events.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use uuid::Uuid;

use convoy_core::model::now_ms;
use convoy_core::protocol::server::{ServerEvent, UserBrief};

use crate::app_state::AppState;
use crate::auth::Identity;
use crate::realtime::{ConnHandle, SessionCtx};
use crate::transport::codec::{decode, Inbound};

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: Option<String>,
}

pub async fn ws_upgrade(
    State(app): State<AppState>,
    ws: WebSocketUpgrade,
    Query(q): Query<WsQuery>,
) -> Response {
    let Some(token) = q.token else {
        return (StatusCode::UNAUTHORIZED, "token required").into_response();
    };

    let identity = match app.verifier().verify(&token).await {
        Ok(id) => id,
        Err(e) => {
            tracing::info!(error = %e, "handshake rejected");
            return (StatusCode::UNAUTHORIZED, "auth failed").into_response();
        }
    };

    ws.on_upgrade(move |socket| run_session(app, identity, socket))
}

async fn run_session(app: AppState, mut identity: Identity, socket: WebSocket) {
    let conn_id = Uuid::new_v4().to_string();

    // Best-effort display snapshot from the durable User record.
    match app.store().get_user(&identity.uid).await {
        Ok(Some(user)) => {
            identity.name = Some(user.display_name);
            identity.photo = user.photo_url.or(identity.photo);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(user = %identity.uid, error = %e, "user prefetch failed");
        }
    }
    let display_name = identity.name.clone().unwrap_or_else(|| identity.uid.clone());

    let (out_tx, mut out_rx) = mpsc::channel::<Message>(app.cfg().gateway.outbound_queue);
    let (mut ws_tx, mut ws_rx) = socket.split();

    app.core().registry.register(
        conn_id.clone(),
        identity.clone(),
        ConnHandle { tx: out_tx.clone() },
    );
    let ctx = SessionCtx::new(conn_id.as_str(), &identity, display_name.clone());

    tracing::info!(user = %identity.uid, conn = %conn_id, "connected");
    app.dispatcher().on_connect(&ctx).await;

    let connected = ServerEvent::Connected {
        user: UserBrief {
            uid: identity.uid.clone(),
            name: display_name,
            photo: identity.photo.clone(),
        },
        timestamp: now_ms(),
    };

    let gw = &app.cfg().gateway;
    let ping_every = Duration::from_millis(gw.ping_interval_ms);
    let idle_timeout = Duration::from_millis(gw.idle_timeout_ms);

    let mut ping_tick = tokio::time::interval(ping_every);
    ping_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut last_activity = Instant::now();
    let mut close_reason = "transport_closed";

    // Admission ack. Once the connection is registered, every exit path
    // below must fall through to the cleanup at the end of this function;
    // an ack failure closes the session but never skips it.
    let admitted = match connected.encode() {
        Ok(ack) => out_tx.send(Message::Text(ack)).await.is_ok(),
        Err(e) => {
            tracing::warn!(conn = %conn_id, error = %e, "connected ack encode failed");
            false
        }
    };
    if !admitted {
        close_reason = "internal_error";
    }

    while admitted {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(m) => {
                        if ws_tx.send(m).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let Ok(msg) = incoming else { break; };

                last_activity = Instant::now();

                match decode(msg) {
                    Ok(Inbound::Event(ev)) => {
                        // Awaited inline: events from one connection are
                        // processed in the order received.
                        app.dispatcher().dispatch(&ctx, ev).await;
                    }
                    Ok(Inbound::Ping(payload)) => {
                        let _ = out_tx.send(Message::Pong(payload)).await;
                    }
                    Ok(Inbound::Pong) => {}
                    Ok(Inbound::Close) => {
                        close_reason = "client_close";
                        break;
                    }
                    Err(err) => {
                        match ServerEvent::from_error(&err).encode() {
                            Ok(reply) => {
                                let _ = out_tx.send(Message::Text(reply)).await;
                            }
                            Err(e) => {
                                tracing::warn!(conn = %conn_id, error = %e, "error reply encode failed");
                            }
                        }
                    }
                }
            }

            // keepalive ping
            _ = ping_tick.tick() => {
                let _ = out_tx.send(Message::Ping(Vec::new())).await;
            }

            // idle timeout
            _ = tokio::time::sleep(Duration::from_millis(250)) => {
                if last_activity.elapsed() >= idle_timeout {
                    close_reason = "idle_timeout";
                    break;
                }
            }
        }
    }

    // Cleanup runs for every exit path; the removed entry carries the
    // last-known room for the disconnect notice.
    if let Some(entry) = app.core().registry.unregister(&conn_id) {
        app.dispatcher().on_disconnect(&ctx, entry, close_reason).await;
    }
}
