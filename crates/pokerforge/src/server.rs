//! `PokerServer` builder, router, and serve loop.
//!
//! This is the entry point for running a Pokerforge server. It ties the
//! layers together: HTTP → session → room store.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use pokerforge_room::{RoomStore, StoreConfig};
use pokerforge_session::UserStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{PokerError, ServerConfig, handler};

/// Shared state handed to every handler.
///
/// Both stores do their own locking, so cloning the state only clones
/// two `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub rooms: Arc<RoomStore>,
}

impl AppState {
    /// Empty stores with the given room limits.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            users: Arc::new(UserStore::new()),
            rooms: Arc::new(RoomStore::new(config)),
        }
    }
}

/// Builds the HTTP surface over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handler::healthz))
        .route("/users/register", post(handler::register))
        .route("/rooms", post(handler::create_room))
        .route(
            "/rooms/:room_id",
            get(handler::get_room).delete(handler::delete_room),
        )
        .route("/rooms/:room_id/join", post(handler::join_room))
        .route("/rooms/:room_id/invite-codes", post(handler::create_invite_code))
        .route("/rooms/:room_id/state", get(handler::room_state))
        .route("/games", post(handler::create_game))
        .route("/games/:game_id/complete", post(handler::complete_game))
        .route("/games/:game_id/reset", post(handler::reset_game))
        .route("/games/:game_id/send-card", post(handler::send_card))
        .route("/games/:game_id/drop-card", post(handler::drop_card))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builder for configuring and starting a Pokerforge server.
///
/// # Example
///
/// ```rust,ignore
/// let server = PokerServer::builder()
///     .bind("0.0.0.0:8080".parse()?)
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct PokerServerBuilder {
    bind_addr: SocketAddr,
    store_config: StoreConfig,
}

impl PokerServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            store_config: StoreConfig::default(),
        }
    }

    /// Starts from a configuration read from the environment.
    pub fn from_config(config: ServerConfig) -> Self {
        Self {
            bind_addr: config.address,
            store_config: config.store,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Sets the room store limits.
    pub fn store_config(mut self, config: StoreConfig) -> Self {
        self.store_config = config;
        self
    }

    /// Binds the listener and creates empty stores.
    pub async fn build(self) -> Result<PokerServer, PokerError> {
        let listener = TcpListener::bind(self.bind_addr).await?;
        Ok(PokerServer {
            listener,
            state: AppState::new(self.store_config),
        })
    }
}

impl Default for PokerServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Pokerforge server.
///
/// Call [`run()`](Self::run) to start serving requests.
pub struct PokerServer {
    listener: TcpListener,
    state: AppState,
}

impl PokerServer {
    /// Creates a new builder.
    pub fn builder() -> PokerServerBuilder {
        PokerServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The stores behind the server.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serves requests until Ctrl-C.
    pub async fn run(self) -> Result<(), PokerError> {
        let addr = self.local_addr()?;
        tracing::info!(%addr, "Pokerforge server listening");

        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Pokerforge server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
