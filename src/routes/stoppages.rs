//! Stoppage summary panels: headline counts, per-class details, per-farm
//! breakdown, chart legend and the live offline list.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Local;
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::error::AppResult;
use crate::gateway::ops;
use crate::report::classify::StoppageClass;
use crate::report::summary::{
    ClassBreakdown, LegendEntry, OfflineTurbine, SiteAverages, SiteStoppages, StoppageHeadings,
    class_breakdown, offline_turbines, stoppage_headings, stoppage_legend, summary_by_windfarm,
};
use crate::routes::{RangeQuery, verify_site};

#[derive(Debug, Serialize, ToSchema)]
pub struct StoppageHeadingsResponse {
    #[serde(rename = "stoppageHeadingsDataSet")]
    pub data_set: StoppageHeadings,
}

/// Headline stoppage counts and averages for a date range
#[utoipa::path(
    get,
    path = "/api/stoppages/headings",
    params(RangeQuery),
    responses(
        (status = 200, description = "Counts per class with average hours", body = StoppageHeadingsResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "stoppages"
)]
pub async fn headings(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<StoppageHeadingsResponse>> {
    let range = query.range()?;
    let site = verify_site(&state.ops, query.site.as_deref()).await?;
    let events = ops::events_in_range(&state.ops, &range, site).await?;

    Ok(Json(StoppageHeadingsResponse {
        data_set: stoppage_headings(&events),
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServicesResponse {
    #[serde(rename = "servicesDataSet")]
    pub data_set: ClassBreakdown,
}

/// Scheduled-service count and average hours for a date range
#[utoipa::path(
    get,
    path = "/api/stoppages/services",
    params(RangeQuery),
    responses(
        (status = 200, description = "Scheduled-class breakdown", body = ServicesResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "stoppages"
)]
pub async fn services(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<ServicesResponse>> {
    let range = query.range()?;
    let site = verify_site(&state.ops, query.site.as_deref()).await?;
    let events = ops::events_in_range(&state.ops, &range, site).await?;

    Ok(Json(ServicesResponse {
        data_set: class_breakdown(&events, StoppageClass::Scheduled),
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FaultsResponse {
    #[serde(rename = "faultsDataSet")]
    pub data_set: ClassBreakdown,
}

/// Fault count and average hours for a date range
#[utoipa::path(
    get,
    path = "/api/stoppages/faults",
    params(RangeQuery),
    responses(
        (status = 200, description = "Fault-class breakdown", body = FaultsResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "stoppages"
)]
pub async fn faults(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<FaultsResponse>> {
    let range = query.range()?;
    let site = verify_site(&state.ops, query.site.as_deref()).await?;
    let events = ops::events_in_range(&state.ops, &range, site).await?;

    Ok(Json(FaultsResponse {
        data_set: class_breakdown(&events, StoppageClass::Fault),
    }))
}

/// Per-farm triples plus the parallel averages list.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryStoppages {
    pub stoppages: Vec<SiteStoppages>,
    pub averages: Vec<SiteAverages>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryStoppagesResponse {
    #[serde(rename = "summaryStoppagesDataSet")]
    pub data_set: SummaryStoppages,
}

/// Per-windfarm stoppage counts and average hours
#[utoipa::path(
    get,
    path = "/api/stoppages/summary",
    params(RangeQuery),
    responses(
        (status = 200, description = "Per-farm class counts and averages", body = SummaryStoppagesResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "stoppages"
)]
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<SummaryStoppagesResponse>> {
    let range = query.range()?;
    let site = verify_site(&state.ops, query.site.as_deref()).await?;
    let events = ops::events_in_range(&state.ops, &range, site).await?;

    let (stoppages, averages) = summary_by_windfarm(&events);
    Ok(Json(SummaryStoppagesResponse {
        data_set: SummaryStoppages { stoppages, averages },
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoppageLegendResponse {
    #[serde(rename = "stoppageLegendDataSet")]
    pub data_set: Vec<LegendEntry>,
}

/// Chart legend: stoppage counts by rationale and reason
#[utoipa::path(
    get,
    path = "/api/stoppages/legend",
    params(RangeQuery),
    responses(
        (status = 200, description = "Legend entries, largest count first", body = StoppageLegendResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "stoppages"
)]
pub async fn legend(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<StoppageLegendResponse>> {
    let range = query.range()?;
    let site = verify_site(&state.ops, query.site.as_deref()).await?;
    let events = ops::events_in_range(&state.ops, &range, site).await?;

    Ok(Json(StoppageLegendResponse {
        data_set: stoppage_legend(&events),
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OfflineWtgsResponse {
    #[serde(rename = "offlineWtgsDataSet")]
    pub data_set: Vec<OfflineTurbine>,
}

/// Turbines currently offline (events with no finish time)
#[utoipa::path(
    get,
    path = "/api/stoppages/offline",
    responses(
        (status = 200, description = "Open events with hours down so far", body = OfflineWtgsResponse),
    ),
    tag = "stoppages"
)]
pub async fn offline(State(state): State<AppState>) -> AppResult<Json<OfflineWtgsResponse>> {
    let events = ops::open_events(&state.ops).await?;

    // The operations store records local wall-clock time.
    let now = Local::now().naive_local();
    Ok(Json(OfflineWtgsResponse {
        data_set: offline_turbines(&events, now),
    }))
}
