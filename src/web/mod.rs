//! Web layer module
//!
//! Thin axum handlers over the service layer. Handlers translate requests
//! into service calls and map [`AppError`](crate::errors::AppError) values
//! to status codes through [`responses::handle_error`].

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::Config, context::AppContext};

pub mod handlers;
pub mod responses;

pub use responses::{handle_error, handle_result, ApiResponse, MigrationReportResponse};

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, context: AppContext) -> Result<Self> {
        let app = Self::create_router(AppState { context });
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;

        Ok(Self { app, addr })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health::health_check))
            .nest("/api", Self::api_routes())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    fn api_routes() -> Router<AppState> {
        Router::new()
            // Origin servers
            .route(
                "/origin-servers",
                get(handlers::origin_servers::list_origin_servers)
                    .put(handlers::origin_servers::add_origin_server)
                    .post(handlers::origin_servers::update_origin_server)
                    .delete(handlers::origin_servers::delete_origin_server),
            )
            // Channels
            .route(
                "/channels",
                get(handlers::channels::list_channels).put(handlers::channels::save_channel),
            )
            .route("/channels/:number", get(handlers::channels::get_channel))
            // Fillers and custom shows
            .route(
                "/fillers",
                get(handlers::library::list_fillers).put(handlers::library::save_filler),
            )
            .route(
                "/custom-shows",
                get(handlers::library::list_custom_shows)
                    .put(handlers::library::save_custom_show),
            )
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub context: AppContext,
}
