// src/main.rs

use std::env;

use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::{Pool, Postgres};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

mod db;
mod models;
mod report;
mod routes;

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in the environment or .env"))?;
    let pool = db::connect(&database_url).await?;
    let state = AppState { pool, database_url };

    // Very permissive CORS for local dev (tighten for prod)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Root API router
    let api = Router::new()
        // health
        .route("/health", get(routes::health::health))
        // raw shipment records
        .route("/api/v1/inbound", get(routes::inbound::list_inbound))
        .route("/api/v1/outbound", get(routes::outbound::list_outbound))
        // logistics reports
        .route("/api/v1/reports/trucks", get(routes::reports::trucks))
        .route("/api/v1/reports/trucks-monthly", get(routes::reports::trucks_monthly))
        .route("/api/v1/reports/volume", get(routes::reports::volume))
        .route("/api/v1/reports/volume-monthly", get(routes::reports::volume_monthly))
        .route("/api/v1/reports/truck-count", get(routes::reports::truck_count))
        .route("/api/v1/reports/lead-time", get(routes::reports::lead_time))
        // occupancy reports
        .route("/api/v1/reports/occupancy-sqm", get(routes::occupancy::sqm_grid))
        .route("/api/v1/reports/occupancy-vol", get(routes::occupancy::vol_grid))
        .route("/api/v1/reports/occupancy-summary", get(routes::occupancy::summary))
        // reference data
        .route("/api/v1/warehouses", get(routes::warehouses::list_warehouses))
        // user administration
        .route(
            "/api/v1/users",
            post(routes::users::create_user).get(routes::users::list_users),
        )
        .route(
            "/api/v1/users/:id",
            patch(routes::users::patch_user).delete(routes::users::delete_user),
        )
        // backup export
        .route("/api/v1/backup", post(routes::backup::export))
        // state & middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Port (axum 0.7 style)
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;

    println!("🚀 API listening on http://127.0.0.1:{port}");

    axum::serve(listener, api.into_make_service()).await?;
    Ok(())
}
