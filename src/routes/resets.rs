//! Overnight-reset savings and the fixed IDF heading panel.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::error::AppResult;
use crate::gateway::{ops, stats};
use crate::report::idf::{IdfHeading, idf_headings as build_idf_headings};
use crate::report::overnight::{
    OvernightResetRow, night_windows, overnight_candidates, overnight_row,
};
use crate::routes::{RangeQuery, verify_site};

#[derive(Debug, Serialize, ToSchema)]
pub struct OvernightResetsResponse {
    #[serde(rename = "overnightResetsDataSet")]
    pub data_set: Vec<OvernightResetRow>,
}

/// Faults reset remotely during night hours, with saved-energy estimates
#[utoipa::path(
    get,
    path = "/api/resets/overnight",
    params(RangeQuery),
    responses(
        (status = 200, description = "One row per overnight reset", body = OvernightResetsResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "resets"
)]
pub async fn overnight(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<OvernightResetsResponse>> {
    let range = query.range()?;
    let site = verify_site(&state.ops, query.site.as_deref()).await?;
    let events = ops::events_in_range(&state.ops, &range, site).await?;

    let windows = night_windows(&range);
    let candidates = overnight_candidates(&events, &windows);

    let mut rows = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let energy =
            stats::energy_for_day(&state.stats, &candidate.event.windfarm, candidate.window.day)
                .await?;
        rows.push(overnight_row(candidate, energy));
    }

    Ok(Json(OvernightResetsResponse { data_set: rows }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IdfHeadingsResponse {
    #[serde(rename = "idfDataSet")]
    pub data_set: Vec<IdfHeading>,
}

/// Restart-failure and curtailment-failure IDF buckets for a date range
#[utoipa::path(
    get,
    path = "/api/idf/headings",
    params(RangeQuery),
    responses(
        (status = 200, description = "The two IDF buckets, restart first", body = IdfHeadingsResponse),
        (status = 400, description = "Malformed date parameter"),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "resets"
)]
pub async fn idf_headings(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<IdfHeadingsResponse>> {
    let range = query.range()?;
    let site = verify_site(&state.ops, query.site.as_deref()).await?;
    let events = ops::events_in_range(&state.ops, &range, site).await?;

    Ok(Json(IdfHeadingsResponse {
        data_set: build_idf_headings(&events),
    }))
}
