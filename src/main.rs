use anyhow::Context;
use axum::http::{self, HeaderValue, Method};
use dotenvy::dotenv;
use env_logger::Builder;
use log::{info, warn, LevelFilter};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use avalon_server::{app, models::config::Config, state::AppState};

fn init_logger(config: &Config) {
    let level = if config.verbose_logging {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .filter_module("tower_http", level)
        .filter_module("axum", level)
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .format_target(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_result = dotenv();
    let config = Config::from_env();
    init_logger(&config);
    if let Err(e) = dotenv_result {
        warn!("No .env file loaded: {}", e);
    }

    let state = AppState::new(config.clone()).with_context(|| {
        format!(
            "could not open highscore file {}",
            config.highscore_file.display()
        )
    })?;

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .context("AVALON_CORS_ORIGIN is not a valid header value")?;
    let cors = CorsLayer::new()
        .allow_origin([origin])
        .allow_methods([Method::GET])
        .allow_headers([http::header::CONTENT_TYPE]);

    let app = app::create_app(state).layer(cors).layer(
        TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
            tracing::info_span!(
                "HTTP request",
                method = %request.method(),
                uri = %request.uri(),
            )
        }),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("could not bind {}", config.bind_addr))?;
    info!("Avalon server listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
