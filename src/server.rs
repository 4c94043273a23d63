//! Server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database, migrations, the
//! admin state service with its realtime listener, the REST API and
//! graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::application::{create_event_bus, BookingAdmin, RealtimeListener, SharedEventBus};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, SeaOrmRepositoryProvider};
use crate::interfaces::http::create_api_router;
use crate::shared::AppError;

/// Options for starting the server.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

/// Handle to a running server.
///
/// The server hosts a single operator. Every HTTP caller shares one
/// [`BookingAdmin`], so filters, selection, the last error and the
/// session all belong to the admin named in the configuration; a
/// filter set by one caller is what the next caller lists.
pub struct ServerHandle {
    pub event_bus: SharedEventBus,
    pub repos: Arc<dyn RepositoryProvider>,
    pub admin: BookingAdmin,
    pub config: AppConfig,
    db: DatabaseConnection,
    listener: RealtimeListener,
    shutdown_tx: watch::Sender<bool>,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect, migrate, load the initial view, start the realtime
    /// listener and serve the REST API.
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let app_cfg = opts.config;
        info!("Starting paraglide booking admin...");

        // ── Database ───────────────────────────────────────────
        let db_config = app_cfg.database.to_database_config();
        let db = init_database(&db_config).await.map_err(crate::shared::InfraError::from)?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None)
                .await
                .map_err(crate::shared::InfraError::from)?;
            info!("Migrations completed");
        }

        // ── Repositories & state service ──────────────────────
        let event_bus = create_event_bus();
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone(), event_bus.clone()));

        let admin = BookingAdmin::new(repos.clone(), event_bus.clone(), app_cfg.admin.session())
            .with_reassignment_notices(app_cfg.notifications.reassignment_notices);

        if !admin.fetch_bookings().await || !admin.fetch_summary().await {
            warn!("Initial booking load failed; continuing with an empty view");
        }

        let listener = RealtimeListener::new(admin.clone());
        listener.subscribe();

        // ── REST API server ────────────────────────────────────
        let router = create_api_router(admin.clone());
        let addr = app_cfg.server.address();
        let tcp = tokio::net::TcpListener::bind(&addr).await?;
        info!("REST API server listening on http://{}", addr);

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let api_server = axum::serve(tcp, router).with_graceful_shutdown(async move {
            let _ = shutdown_rx.wait_for(|stop| *stop).await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            event_bus,
            repos,
            admin,
            config: app_cfg,
            db,
            listener,
            shutdown_tx,
            api_task,
        })
    }

    /// Trigger shutdown on Ctrl+C.
    pub fn install_signal_handler(&self) {
        let tx = self.shutdown_tx.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Ctrl+C received, shutting down"),
                Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
            }
            let _ = tx.send(true);
        });
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for a shutdown trigger, then stop everything.
    pub async fn wait(mut self) {
        let mut rx = self.shutdown_tx.subscribe();
        let _ = rx.wait_for(|stop| *stop).await;

        self.listener.unsubscribe();

        let grace = Duration::from_secs(self.config.server.shutdown_timeout);
        match tokio::time::timeout(grace, &mut self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!("REST API server did not stop within {:?}; aborting", grace);
                self.api_task.abort();
            }
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the application config.
///
/// `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
