use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_rest::{dto, handlers, AppState};
use api_shared::{HealthRes, TokenService};
use cardioscan_core::config::token_ttl_hours_from_env_value;
use cardioscan_core::{
    CannedClassifier, CoreConfig, DashboardCounts, Gender, PlatformStats, Report, ReportService,
    RiskLevel, ScanStatus, ScanType, UserService,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::login,
        handlers::register,
        handlers::get_profile,
        handlers::update_profile,
        handlers::list_reports,
        handlers::create_report,
        handlers::report_stats,
        handlers::export_report
    ),
    components(schemas(
        HealthRes,
        dto::LoginReq,
        dto::LoginRes,
        dto::RegisterReq,
        dto::ProfileRes,
        dto::UpdateProfileReq,
        dto::CreateReportReq,
        dto::ReportsRes,
        dto::StatsRes,
        Report,
        ScanStatus,
        RiskLevel,
        Gender,
        ScanType,
        DashboardCounts,
        PlatformStats
    ))
)]
struct ApiDoc;

/// Main entry point for the CardioScan report service.
///
/// Starts the REST server with Swagger UI at `/swagger-ui` and permissive
/// CORS for the browser dashboard.
///
/// # Environment Variables
/// - `CARDIOSCAN_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CARDIOSCAN_DATA_DIR`: directory for record storage (default: "./data")
/// - `CARDIOSCAN_JWT_SECRET`: access-token signing secret
/// - `CARDIOSCAN_TOKEN_TTL_HOURS`: access-token lifetime (default: 12)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cardioscan=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("CARDIOSCAN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;
    let data_dir = std::env::var("CARDIOSCAN_DATA_DIR").unwrap_or_else(|_| "./data".into());
    let jwt_secret = match std::env::var("CARDIOSCAN_JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) => {
            tracing::warn!("CARDIOSCAN_JWT_SECRET not set; using a development-only secret");
            "local-dev-secret".into()
        }
    };
    let token_ttl_hours =
        token_ttl_hours_from_env_value(std::env::var("CARDIOSCAN_TOKEN_TTL_HOURS").ok())?;

    let cfg = Arc::new(CoreConfig::new(
        PathBuf::from(data_dir),
        jwt_secret,
        token_ttl_hours,
    )?);

    tracing::info!("++ Starting CardioScan REST on {addr}");
    tracing::info!("++ Record storage at {}", cfg.data_dir().display());

    let state = AppState::new(
        ReportService::new(cfg.clone()),
        UserService::new(cfg.clone()),
        TokenService::new(cfg.jwt_secret(), cfg.token_ttl_hours()),
        Arc::new(CannedClassifier::new()),
    );

    let app: Router = api_rest::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
