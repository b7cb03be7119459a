//! studio-directory binary.
//!
//! ```text
//! studio-directory serve               # run the HTTP API
//! studio-directory enforce [--dry-run] # run one enforcement pass and exit
//! ```

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use studio_directory::adapters::http::{membership_router, MembershipAppState};
use studio_directory::adapters::postgres::{
    PostgresMembershipReader, PostgresStudioEnforcement, PostgresStudioRepository,
    PostgresSubscriptionRepository,
};
use studio_directory::application::{RunEnforcementCommand, RunEnforcementHandler};
use studio_directory::config::{AppConfig, LogFormat, ServerConfig};

/// Command-line arguments for studio-directory
#[derive(Parser, Debug)]
#[command(name = "studio-directory")]
#[command(about = "Membership tiers, renewals and enforcement for the studio directory")]
#[command(version)]
struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run the HTTP API
    Serve,
    /// Run one enforcement pass and exit
    Enforce {
        /// Report decisions without writing them
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let command = Cli::parse().command.unwrap_or(Command::Serve);

    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    tracing::info!("Database connection pool created");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    match command {
        Command::Serve => serve(config, pool).await,
        Command::Enforce { dry_run } => {
            enforce(&config, pool, dry_run || config.enforcement.dry_run).await
        }
    }
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn serve(config: AppConfig, pool: PgPool) -> Result<(), Box<dyn Error>> {
    let enforcement = Arc::new(PostgresStudioEnforcement::new(pool.clone()));
    let state = MembershipAppState {
        subscription_repository: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        studio_repository: Arc::new(PostgresStudioRepository::new(pool.clone())),
        membership_reader: Arc::new(PostgresMembershipReader::new(pool)),
        projection_reader: enforcement.clone(),
        enforcement_writer: enforcement,
        enforcement_log_limit: config.enforcement.batch_log_limit,
    };

    let app = membership_router(config.server.request_timeout()).with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn enforce(config: &AppConfig, pool: PgPool, dry_run: bool) -> Result<(), Box<dyn Error>> {
    let store = Arc::new(PostgresStudioEnforcement::new(pool));
    let handler = RunEnforcementHandler::new(store.clone(), store)
        .with_log_limit(config.enforcement.batch_log_limit);

    let result = handler.handle(RunEnforcementCommand { dry_run }).await?;

    tracing::info!(
        dry_run = result.dry_run,
        scanned = result.scanned,
        decisions = result.decisions.len(),
        status_updates = result.summary.status_updates,
        unfeatured_updates = result.summary.unfeatured_updates,
        "Enforcement pass complete"
    );
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
