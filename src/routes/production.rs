//! Raw daily production rows for one windfarm.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::AppState;
use crate::error::AppResult;
use crate::gateway::stats;
use crate::report::DateRange;
use crate::routes::resolve_windfarm;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DailyStatsQuery {
    /// First day of the range (YYYY-MM-DD)
    pub startdate: String,
    /// Last day of the range (YYYY-MM-DD), inclusive
    pub enddate: String,
    /// Windfarm abbreviation
    pub site: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductionDayRow {
    pub windfarm: String,
    pub date: NaiveDate,
    pub avg_wind_speed: Option<f64>,
    pub energy_export: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProdStatsResponse {
    #[serde(rename = "prodStatsDataSet")]
    pub data_set: Vec<ProductionDayRow>,
}

/// Daily wind speed and exported energy for one windfarm
#[utoipa::path(
    get,
    path = "/api/production/daily",
    params(DailyStatsQuery),
    responses(
        (status = 200, description = "One row per day in the range", body = ProdStatsResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "production"
)]
pub async fn daily(
    State(state): State<AppState>,
    Query(query): Query<DailyStatsQuery>,
) -> AppResult<Json<ProdStatsResponse>> {
    let range = DateRange::parse(&query.startdate, &query.enddate)?;
    resolve_windfarm(&state.ops, &query.site).await?;

    let days = stats::daily_stats_in_range(&state.stats, &range, Some(&query.site)).await?;

    let rows = days
        .into_iter()
        .map(|d| ProductionDayRow {
            windfarm: d.windfarm,
            date: d.stat_date,
            avg_wind_speed: d.avg_wind_speed,
            energy_export: d.energy_export,
        })
        .collect();

    Ok(Json(ProdStatsResponse { data_set: rows }))
}
