use axum::{routing::get, Router};
use opentelemetry::trace::TracerProvider as _;  // Import as _ since we only need the trait methods
use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{trace::{Sampler, SdkTracerProvider}, Resource};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::handler::calculate_handler;
use crate::config::{ServerConfig, TelemetryConfig};
use crate::db::{create_pool, PgTariffRepository, TariffCatalog};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn TariffCatalog>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn TariffCatalog>) -> Self {
        Self { catalog }
    }
}

pub fn init_tracing(config: &TelemetryConfig) {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json() // JSON format for log aggregation
                .with_target(false),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,hyper=warn,tower=warn,h2=error")),
        );

    if !config.otel_enabled {
        subscriber.init();
        return;
    }

    match init_opentelemetry(config) {
        Ok(provider) => {
            // Set as global provider for other uses
            opentelemetry::global::set_tracer_provider(provider.clone());

            let tracer = provider.tracer("fee-calculator");
            subscriber.with(OpenTelemetryLayer::new(tracer)).init();

            info!("OpenTelemetry enabled: {}", config.otel_endpoint);
        }
        Err(e) => {
            subscriber.init();
            error!("Failed to initialize OpenTelemetry: {}. Continuing with logs only.", e);
        }
    }
}

fn init_opentelemetry(config: &TelemetryConfig) -> Result<SdkTracerProvider, Box<dyn std::error::Error>> {
    let resource = Resource::builder()
        .with_attribute(KeyValue::new("service.name", config.service_name.clone()))
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .with_attribute(KeyValue::new("deployment.environment", config.environment.clone()))
        .build();

    let endpoint = config.otel_endpoint.as_str();
    let exporter = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        SpanExporter::builder()
            .with_http()
            .with_endpoint(endpoint)
            .build()?
    } else {
        SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?
    };

    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(Sampler::TraceIdRatioBased(config.sampling_rate))
        .with_batch_exporter(exporter)
        .build();

    info!("OpenTelemetry sampling rate: {}%", config.sampling_rate * 100.0);

    Ok(provider)
}

/// Build the router over any tariff catalog
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/fee-schemes/{scheme_id}/calculate",
            get(calculate_handler),
        )
        .route(
            "/api/v1/fee-schemes/{scheme_id}/calculate/",
            get(calculate_handler),
        )
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Build the router backed by PostgreSQL
pub async fn create_pg_app(config: &ServerConfig) -> Result<Router, Box<dyn std::error::Error>> {
    let pool = create_pool(&config.database).await?;
    let catalog: Arc<dyn TariffCatalog> = Arc::new(PgTariffRepository::new(pool));

    Ok(create_app(AppState::new(catalog)))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down gracefully..."),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    init_tracing(&config.telemetry);

    info!("Starting fee calculator server");

    let app = create_pg_app(&config).await?;

    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
