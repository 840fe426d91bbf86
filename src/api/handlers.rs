use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::client::ChartClient;
use crate::config::ProviderConfig;
use crate::error::Result;
use crate::models::{ChartResult, PeriodKind};
use crate::period::Clock;
use crate::transport::Transport;

/// Shared application state
pub struct AppState {
    pub config: Arc<ProviderConfig>,
    pub transport: Arc<dyn Transport>,
    /// Source of "today" for period resolution and the default reference date
    pub clock: Arc<dyn Clock>,
}

/// Query parameters for the chart endpoint
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Reference date (default: today)
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /
/// Returns basic API info
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Melon Chart API",
        "description": "Daily, weekly and monthly Melon music charts",
        "endpoints": {
            "/chart/{period}": "Get the chart for daily, weekly or monthly periods",
            "/chart/{period}?date=YYYY-MM-DD": "Get the chart for a reference date",
            "/health": "Health check"
        }
    }))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /chart/{period}
/// Fetch the chart for `period` around the optional reference date
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(period): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartResult>> {
    let kind: PeriodKind = period.parse()?;
    let date = query
        .date
        .unwrap_or_else(|| state.clock.today().format("%Y-%m-%d").to_string());
    tracing::debug!("Chart request: period={}, date={}", kind, date);

    let client = ChartClient::with_parts(
        &date,
        state.config.clone(),
        state.transport.clone(),
        state.clock.clone(),
    )?;
    let result = client.fetch_chart(kind).await?;

    Ok(Json(result))
}
