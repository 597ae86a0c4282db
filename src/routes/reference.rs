//! Reference data for the dashboard pickers.

use axum::{
    Json,
    extract::{Query, State},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::AppState;
use crate::entity::{turbines, windfarms};
use crate::error::AppResult;
use crate::routes::resolve_windfarm;

#[derive(Debug, Serialize, ToSchema)]
pub struct WindfarmResponse {
    pub id: i32,
    pub abbr: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TurbineResponse {
    pub id: i32,
    pub windfarm_id: i32,
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TurbinesQuery {
    /// Restrict to one windfarm abbreviation
    pub site: Option<String>,
}

/// List all windfarms
#[utoipa::path(
    get,
    path = "/api/windfarms",
    responses(
        (status = 200, description = "Windfarms ordered by abbreviation", body = Vec<WindfarmResponse>),
    ),
    tag = "reference"
)]
pub async fn list_windfarms(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WindfarmResponse>>> {
    let farms = windfarms::Entity::find()
        .order_by_asc(windfarms::Column::Abbr)
        .all(&state.ops)
        .await?;

    let response = farms
        .into_iter()
        .map(|f| WindfarmResponse {
            id: f.id,
            abbr: f.abbr,
            name: f.name,
        })
        .collect();

    Ok(Json(response))
}

/// List turbines, optionally for one windfarm
#[utoipa::path(
    get,
    path = "/api/turbines",
    params(TurbinesQuery),
    responses(
        (status = 200, description = "Turbines ordered by name", body = Vec<TurbineResponse>),
        (status = 404, description = "Unknown windfarm"),
    ),
    tag = "reference"
)]
pub async fn list_turbines(
    State(state): State<AppState>,
    Query(query): Query<TurbinesQuery>,
) -> AppResult<Json<Vec<TurbineResponse>>> {
    let mut select = turbines::Entity::find().order_by_asc(turbines::Column::Name);

    if let Some(abbr) = query.site.as_deref() {
        let farm = resolve_windfarm(&state.ops, abbr).await?;
        select = select.filter(turbines::Column::WindfarmId.eq(farm.id));
    }

    let list = select.all(&state.ops).await?;

    let response = list
        .into_iter()
        .map(|t| TurbineResponse {
            id: t.id,
            windfarm_id: t.windfarm_id,
            name: t.name,
        })
        .collect();

    Ok(Json(response))
}
