use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use axum::{middleware, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::{
    cli_args::{CliArgs, StoreKind},
    error::ErrorVerbosity,
    middleware::method_not_allowed::method_not_allowed,
    route::{
        books, catalog,
        dashboard::{self, Dashboard, BOOKS_DASHBOARD, CATALOG_DASHBOARD},
    },
    state::ApiState,
    store::{file::FileBookStore, memory::MemoryCatalog},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    Memory,
    File { path: PathBuf },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    socket_address: SocketAddr,
    error_verbosity: ErrorVerbosity,
    store: StoreConfig,
}

impl ServerConfig {
    pub fn new(
        socket_address: SocketAddr,
        error_verbosity: ErrorVerbosity,
        store: StoreConfig,
    ) -> Self {
        Self {
            socket_address,
            error_verbosity,
            store,
        }
    }

    pub async fn from_config_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub async fn from_cli_args(args: CliArgs) -> anyhow::Result<Self> {
        if let Some(config_file) = args.config_file {
            return Self::from_config_file(config_file).await;
        }

        let store = match args.store {
            StoreKind::Memory => StoreConfig::Memory,
            StoreKind::File => StoreConfig::File {
                path: args.books_file,
            },
        };

        Ok(Self::new(
            SocketAddr::new(args.host, args.port),
            args.error_verbosity,
            store,
        ))
    }
}

/// Builds the routes of the configured store, with the dashboard as fallback.
pub fn app(error_verbosity: ErrorVerbosity, store: StoreConfig) -> Router {
    let (routes, welcome): (Router<Dashboard>, Dashboard) = match store {
        StoreConfig::Memory => {
            let state = ApiState::new(error_verbosity, MemoryCatalog::default());

            (catalog::app::app().with_state(state), CATALOG_DASHBOARD)
        }
        StoreConfig::File { path } => {
            let state = ApiState::new(error_verbosity, FileBookStore::new(path));

            (books::app::app().with_state(state), BOOKS_DASHBOARD)
        }
    };

    routes
        .layer(middleware::from_fn_with_state(
            error_verbosity,
            method_not_allowed::<ErrorVerbosity>,
        ))
        .fallback(dashboard::dashboard)
        .with_state(welcome)
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(store = ?self.config.store, "Using store");

        let app = app(self.config.error_verbosity, self.config.store).layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                )
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        );

        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        tracing::info!("CTRL+C received");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;

        tracing::info!("SIGTERM received");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
