//! Two-period comparison endpoints. Each one runs the same fetch and
//! aggregation for both requested ranges, tags the rows `period 1` /
//! `period 2` and concatenates them.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::error::AppResult;
use crate::gateway::{ops, stats};
use crate::report::analysis::{
    FaultFrequencyRow, IdfAnalysisRow, ProductionAnalysisRow, ScheduleServiceRow,
    ServiceAnalysisRow, idf_faults_by_windfarm, production_analysis_period,
    schedule_services_by_week, services_by_windfarm, top_faults,
};
use crate::report::{DateRange, EventRecord, PERIOD_ONE, PERIOD_TWO};
use crate::routes::{TwoPeriodQuery, verify_site};

/// Fetches both periods' event sets with one shared site filter.
async fn events_for_periods(
    state: &AppState,
    query: &TwoPeriodQuery,
) -> AppResult<(DateRange, Vec<EventRecord>, DateRange, Vec<EventRecord>)> {
    let (range1, range2) = query.ranges()?;
    let site = verify_site(&state.ops, query.site.as_deref()).await?;

    let events1 = ops::events_in_range(&state.ops, &range1, site).await?;
    let events2 = ops::events_in_range(&state.ops, &range2, site).await?;

    Ok((range1, events1, range2, events2))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductionAnalysisResponse {
    #[serde(rename = "productionAnalysisDataSet")]
    pub data_set: Vec<ProductionAnalysisRow>,
}

/// Weekly production merged with stoppage totals, for two periods
#[utoipa::path(
    get,
    path = "/api/analysis/production",
    params(TwoPeriodQuery),
    responses(
        (status = 200, description = "Merged weekly rows, both periods", body = ProductionAnalysisResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "analysis"
)]
pub async fn production_analysis(
    State(state): State<AppState>,
    Query(query): Query<TwoPeriodQuery>,
) -> AppResult<Json<ProductionAnalysisResponse>> {
    let (range1, events1, range2, events2) = events_for_periods(&state, &query).await?;
    let site = query.site.as_deref();

    let days1 = stats::daily_stats_in_range(&state.stats, &range1, site).await?;
    let days2 = stats::daily_stats_in_range(&state.stats, &range2, site).await?;

    let mut rows = production_analysis_period(&days1, &events1, PERIOD_ONE);
    rows.extend(production_analysis_period(&days2, &events2, PERIOD_TWO));

    Ok(Json(ProductionAnalysisResponse { data_set: rows }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleServiceResponse {
    #[serde(rename = "scheduleServiceDataSet")]
    pub data_set: Vec<ScheduleServiceRow>,
}

/// Scheduled services per week and windfarm, for two periods
#[utoipa::path(
    get,
    path = "/api/analysis/schedule-service",
    params(TwoPeriodQuery),
    responses(
        (status = 200, description = "Weekly service rows, both periods", body = ScheduleServiceResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "analysis"
)]
pub async fn schedule_service_analysis(
    State(state): State<AppState>,
    Query(query): Query<TwoPeriodQuery>,
) -> AppResult<Json<ScheduleServiceResponse>> {
    let (_, events1, _, events2) = events_for_periods(&state, &query).await?;

    let mut rows = schedule_services_by_week(&events1, PERIOD_ONE);
    rows.extend(schedule_services_by_week(&events2, PERIOD_TWO));

    Ok(Json(ScheduleServiceResponse { data_set: rows }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceAnalysisResponse {
    #[serde(rename = "serviceAnalysisDataSet")]
    pub data_set: Vec<ServiceAnalysisRow>,
}

/// Scheduled-service totals per windfarm, for two periods
#[utoipa::path(
    get,
    path = "/api/analysis/service",
    params(TwoPeriodQuery),
    responses(
        (status = 200, description = "Per-farm service totals, both periods", body = ServiceAnalysisResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "analysis"
)]
pub async fn service_analysis(
    State(state): State<AppState>,
    Query(query): Query<TwoPeriodQuery>,
) -> AppResult<Json<ServiceAnalysisResponse>> {
    let (_, events1, _, events2) = events_for_periods(&state, &query).await?;

    let mut rows = services_by_windfarm(&events1, PERIOD_ONE);
    rows.extend(services_by_windfarm(&events2, PERIOD_TWO));

    Ok(Json(ServiceAnalysisResponse { data_set: rows }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopTenFaultsResponse {
    #[serde(rename = "topTenFaultsDataSet")]
    pub data_set: Vec<FaultFrequencyRow>,
}

/// Ten most frequent fault codes, for two periods
#[utoipa::path(
    get,
    path = "/api/analysis/top-faults",
    params(TwoPeriodQuery),
    responses(
        (status = 200, description = "Top fault codes per period", body = TopTenFaultsResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "analysis"
)]
pub async fn top_ten_faults(
    State(state): State<AppState>,
    Query(query): Query<TwoPeriodQuery>,
) -> AppResult<Json<TopTenFaultsResponse>> {
    let (_, events1, _, events2) = events_for_periods(&state, &query).await?;

    let mut rows = top_faults(&events1, PERIOD_ONE);
    rows.extend(top_faults(&events2, PERIOD_TWO));

    Ok(Json(TopTenFaultsResponse { data_set: rows }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IdfAnalysisResponse {
    #[serde(rename = "idfAnalysisDataSet")]
    pub data_set: Vec<IdfAnalysisRow>,
}

/// IDF-fault impact per windfarm, for two periods
#[utoipa::path(
    get,
    path = "/api/analysis/idf",
    params(TwoPeriodQuery),
    responses(
        (status = 200, description = "Per-farm IDF rows, both periods", body = IdfAnalysisResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "analysis"
)]
pub async fn idf_analysis(
    State(state): State<AppState>,
    Query(query): Query<TwoPeriodQuery>,
) -> AppResult<Json<IdfAnalysisResponse>> {
    let (_, events1, _, events2) = events_for_periods(&state, &query).await?;

    let mut rows = idf_faults_by_windfarm(&events1, PERIOD_ONE);
    rows.extend(idf_faults_by_windfarm(&events2, PERIOD_TWO));

    Ok(Json(IdfAnalysisResponse { data_set: rows }))
}
