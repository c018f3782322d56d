//! `intake run` — start the API server.
//!
//! Resolves runtime settings from flags and environment, builds the
//! router with its rate-limit store, and serves with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::RunArgs;
use crate::config::Settings;
use crate::error::IntakeError;
use crate::logging;
use crate::ratelimit::InMemoryStore;
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), IntakeError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let settings = Settings::resolve(&args)?;
    let environment = settings.environment.clone();

    let state = Arc::new(AppState {
        rate_limiter: Arc::new(InMemoryStore::new(
            settings.rate_limit_max,
            settings.rate_limit_window,
        )),
        settings,
    });

    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        environment = %environment,
        rate_limit_max = args.rate_limit_max,
        rate_limit_window_secs = args.rate_limit_window_secs,
        "intake started"
    );

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(server::shutdown_signal())
    .await?;

    tracing::info!("intake stopped");
    Ok(())
}
