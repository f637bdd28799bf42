//! Desa portal API server.
//!
//! Main entry point for the backend service.

use std::sync::Arc;

use anyhow::Context;
use desa_api::{AppState, create_router};
use desa_core::captcha::{AllowAll, CaptchaVerifier, HttpCaptchaVerifier};
use desa_db::connect;
use desa_shared::{AppConfig, JwtConfig, JwtService};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "desa=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    .context("Failed to connect to database")?;
    info!("Connected to database");

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: i64::try_from(config.jwt.access_token_expiry_secs / 60)
            .context("jwt.access_token_expiry_secs is too large")?,
    });

    let captcha: Arc<dyn CaptchaVerifier> = if config.captcha.enabled {
        info!(verify_url = %config.captcha.verify_url, "CAPTCHA verification enabled");
        Arc::new(HttpCaptchaVerifier::new(&config.captcha)?)
    } else {
        warn!("CAPTCHA verification is disabled; every public submission is accepted");
        Arc::new(AllowAll)
    };

    info!(desa = %config.desa.nama_desa, "Letterhead configured");

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        captcha,
        letterhead: Arc::new(config.desa.clone()),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
