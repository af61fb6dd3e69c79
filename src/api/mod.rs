use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
};

use crate::dashboard::DashboardCards;
use crate::models::{Coordinate, NormalizedForecast};
use crate::service::ForecastService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather/forecast", get(get_forecast))
        .route("/weather/dashboard", get(get_dashboard))
        .route("/coordinates", get(get_coordinates).put(save_coordinates))
        .with_state(state)
}

/// Fresh forecast for the saved coordinates. Falls back to the last good
/// forecast when the provider is unreachable.
async fn get_forecast(
    State(state): State<AppState>,
) -> Result<Json<NormalizedForecast>, StatusCode> {
    match state.service.refresh().await {
        Ok(forecast) => Ok(Json(forecast.as_ref().clone())),
        Err(e) => match state.service.latest() {
            Some(previous) if e.is_upstream() => Ok(Json(previous.as_ref().clone())),
            _ if e.is_upstream() => Err(StatusCode::BAD_GATEWAY),
            _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
        },
    }
}

async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardCards> {
    // failures are logged by refresh; the cards show whatever was last published
    let _ = state.service.refresh().await;
    let latest = state.service.latest();
    Json(DashboardCards::from_forecast(latest.as_deref()))
}

async fn get_coordinates(State(state): State<AppState>) -> Result<Json<Coordinate>, StatusCode> {
    let coordinate = state
        .service
        .coordinates()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(coordinate))
}

async fn save_coordinates(
    State(state): State<AppState>,
    Json(payload): Json<Coordinate>,
) -> Result<Json<Coordinate>, StatusCode> {
    state
        .service
        .save_coordinates(payload)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(payload))
}
