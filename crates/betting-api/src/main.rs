//! Betting API 서버 진입점.
//!
//! Axum 기반 REST API 서버를 시작합니다. 회원가입, 로그인,
//! 역할별 대시보드 엔드포인트를 제공합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use betting_api::auth::AuthKeys;
use betting_api::config::{DatabaseConfig, ServerConfig};
use betting_api::repository::PgAccountStore;
use betting_api::routes::create_api_router;
use betting_api::state::AppState;
use betting_core::logging::{init_logging, LogConfig};
use betting_core::AccountStore;

/// CORS 레이어 구성.
///
/// `CORS_ORIGINS` 환경변수 (쉼표 구분)가 있으면 해당 origin만
/// 허용하고, 없으면 모든 origin을 허용합니다. credentials는
/// 명시적 origin 목록이 있을 때만 허용합니다.
fn cors_layer() -> CorsLayer {
    let origins = std::env::var("CORS_ORIGINS").unwrap_or_default();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        cors.allow_origin(AllowOrigin::any())
    } else {
        let parsed: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(parsed))
            .allow_credentials(true)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let mut log_config = LogConfig::from_env();
    if std::env::var("RUST_LOG").is_err() {
        log_config.level = "betting_api=info,betting_core=info,tower_http=info".to_string();
    }
    init_logging(log_config)?;

    info!("Starting Betting API server...");

    let config = ServerConfig::from_env();
    let addr = config.socket_addr().map_err(|e| {
        error!(host = %config.host, port = config.port, error = %e,
            "유효하지 않은 소켓 주소입니다. API_HOST, API_PORT 환경변수를 확인하세요.");
        e
    })?;

    // JWT 시크릿은 필수. 없으면 기동하지 않는다.
    let auth_keys = AuthKeys::from_env().map_err(|e| {
        error!("JWT_SECRET is not set. Refusing to start without a signing key.");
        e
    })?;

    let db_config = DatabaseConfig::from_env();
    let connect_options = db_config.connect_options().map_err(|e| {
        error!(error = %e, "유효하지 않은 DATABASE_URL 형식입니다.");
        e
    })?;

    // 풀은 lazy로 생성한다. DB가 내려가 있어도 서버는 기동하고
    // /health가 Disconnected를 보고한다.
    let pool = PgPoolOptions::new()
        .max_connections(db_config.max_connections)
        .acquire_timeout(Duration::from_secs(db_config.acquire_timeout_secs))
        .connect_lazy_with(connect_options);

    let store = Arc::new(PgAccountStore::new(pool));

    match store.ping().await {
        Ok(()) => info!("Connected to PostgreSQL successfully"),
        Err(e) => warn!(error = %e, "Database not reachable at startup, continuing anyway"),
    }

    let state = Arc::new(AppState::new(store, auth_keys));

    let app = create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    info!(%addr, "API server listening");
    info!("Auth endpoints at http://{}/auth", addr);
    info!("Dashboard endpoints at http://{}/api", addr);
    info!("Health check at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
