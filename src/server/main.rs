//! HTTP lookup server.
//!
//! Serves "which region contains this coordinate" over HTTP. The boundary
//! dataset is loaded once at startup; a malformed dataset aborts startup
//! instead of serving from a partial index.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Form, Router,
};
use clap::Parser;
use geo_types::Coord;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use buckeye::RegionIndex;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Point-in-region lookup server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Boundary dataset (newline-delimited JSON records)
    #[arg(short, long, default_value = "states.json")]
    dataset: PathBuf,
}

/// Application state shared across handlers
struct AppState {
    index: RegionIndex,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Buckeye lookup server");
    info!("Loading dataset from {}", args.dataset.display());

    let index = RegionIndex::load(&args.dataset)
        .with_context(|| format!("failed to load dataset {}", args.dataset.display()))?;

    if index.is_empty() {
        warn!("Dataset contains no regions; every lookup will answer not-found");
    }
    info!("Serving {} regions", index.len());

    let state = Arc::new(AppState { index });

    // Build router
    let app = Router::new()
        .route("/", get(locate_handler).post(locate_form_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        regions: state.index.len(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    regions: usize,
}

/// Lookup via query string
async fn locate_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocateParams>,
) -> String {
    locate_message(&state.index, params)
}

/// Lookup via urlencoded form body
async fn locate_form_handler(
    State(state): State<Arc<AppState>>,
    Form(params): Form<LocateParams>,
) -> String {
    locate_message(&state.index, params)
}

#[derive(Deserialize)]
struct LocateParams {
    /// Longitude, taken as raw text so unparsable input gets the dedicated
    /// answer instead of an extractor rejection
    longitude: Option<String>,
    /// Latitude, same treatment
    latitude: Option<String>,
}

/// Resolve the lookup and format the response line.
///
/// Parameters are echoed back exactly as received.
fn locate_message(index: &RegionIndex, params: LocateParams) -> String {
    let (lon, lat) = match (params.longitude, params.latitude) {
        (Some(lon), Some(lat)) => (lon, lat),
        _ => return "Parameter missing!".to_string(),
    };

    match (lon.parse::<f64>(), lat.parse::<f64>()) {
        (Ok(x), Ok(y)) => match index.locate(Coord { x, y }) {
            Some(name) => format!("[{}, {}] is located in {}", lon, lat, name),
            None => format!("[{}, {}] is not located in the U.S.", lon, lat),
        },
        _ => format!("[{}, {}] is not correct position!", lon, lat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buckeye::RegionRecord;

    fn test_index() -> RegionIndex {
        RegionIndex::build(vec![RegionRecord {
            state: "Ohio".to_string(),
            border: vec![[0.0, 0.0], [0.0, 4.0], [4.0, 4.0], [4.0, 0.0], [0.0, 0.0]],
        }])
    }

    fn params(longitude: Option<&str>, latitude: Option<&str>) -> LocateParams {
        LocateParams {
            longitude: longitude.map(String::from),
            latitude: latitude.map(String::from),
        }
    }

    #[test]
    fn reports_the_containing_region() {
        let message = locate_message(&test_index(), params(Some("2"), Some("2")));
        assert_eq!(message, "[2, 2] is located in Ohio");
    }

    #[test]
    fn reports_points_outside_every_region() {
        let message = locate_message(&test_index(), params(Some("10"), Some("10")));
        assert_eq!(message, "[10, 10] is not located in the U.S.");
    }

    #[test]
    fn missing_parameters_are_reported() {
        assert_eq!(
            locate_message(&test_index(), params(None, Some("2"))),
            "Parameter missing!"
        );
        assert_eq!(
            locate_message(&test_index(), params(Some("2"), None)),
            "Parameter missing!"
        );
        assert_eq!(
            locate_message(&test_index(), params(None, None)),
            "Parameter missing!"
        );
    }

    #[test]
    fn non_numeric_parameters_are_reported() {
        let message = locate_message(&test_index(), params(Some("east"), Some("2")));
        assert_eq!(message, "[east, 2] is not correct position!");
    }

    #[test]
    fn parameters_are_echoed_verbatim() {
        let message = locate_message(&test_index(), params(Some("2.0000"), Some("+2")));
        assert_eq!(message, "[2.0000, +2] is located in Ohio");
    }
}
