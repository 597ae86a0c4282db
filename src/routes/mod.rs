pub mod analysis;
pub mod auth;
pub mod health;
pub mod production;
pub mod reference;
pub mod resets;
pub mod stoppages;

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Deserialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::{IntoParams, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::entity::windfarms;
use crate::error::{AppError, AppResult};
use crate::report::DateRange;

/// Resolve a windfarm by its abbreviation (exact match)
pub async fn resolve_windfarm(
    db: &DatabaseConnection,
    abbr: &str,
) -> AppResult<windfarms::Model> {
    windfarms::Entity::find()
        .filter(windfarms::Column::Abbr.eq(abbr))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Windfarm '{abbr}' not found")))
}

/// Validates an optional windfarm filter against the reference table,
/// passing the abbreviation through when it exists.
pub async fn verify_site<'a>(
    db: &DatabaseConnection,
    site: Option<&'a str>,
) -> AppResult<Option<&'a str>> {
    match site {
        Some(abbr) => {
            resolve_windfarm(db, abbr).await?;
            Ok(Some(abbr))
        }
        None => Ok(None),
    }
}

/// Date-range parameters shared by the single-period reporting endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RangeQuery {
    /// First day of the range (YYYY-MM-DD)
    pub startdate: String,
    /// Last day of the range (YYYY-MM-DD), inclusive
    pub enddate: String,
    /// Optional windfarm abbreviation filter
    pub site: Option<String>,
}

impl RangeQuery {
    pub fn range(&self) -> AppResult<DateRange> {
        DateRange::parse(&self.startdate, &self.enddate)
    }
}

/// Parameters for the two-period comparison endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TwoPeriodQuery {
    /// First day of period 1 (YYYY-MM-DD)
    pub startdate: String,
    /// Last day of period 1 (YYYY-MM-DD), inclusive
    pub enddate: String,
    /// First day of period 2 (YYYY-MM-DD)
    pub startdate2: String,
    /// Last day of period 2 (YYYY-MM-DD), inclusive
    pub enddate2: String,
    /// Optional windfarm abbreviation filter
    pub site: Option<String>,
}

impl TwoPeriodQuery {
    pub fn ranges(&self) -> AppResult<(DateRange, DateRange)> {
        Ok((
            DateRange::parse(&self.startdate, &self.enddate)?,
            DateRange::parse(&self.startdate2, &self.enddate2)?,
        ))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        auth::login,
        auth::refresh,
        auth::me,
        auth::attempts,
        reference::list_windfarms,
        reference::list_turbines,
        stoppages::headings,
        stoppages::services,
        stoppages::faults,
        stoppages::summary,
        stoppages::legend,
        stoppages::offline,
        analysis::production_analysis,
        analysis::schedule_service_analysis,
        analysis::service_analysis,
        analysis::top_ten_faults,
        analysis::idf_analysis,
        resets::overnight,
        resets::idf_headings,
        production::daily,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RefreshRequest,
            auth::RefreshResponse,
            auth::UserSummary,
            auth::AttemptResponse,
            reference::WindfarmResponse,
            reference::TurbineResponse,
            stoppages::StoppageHeadingsResponse,
            stoppages::ServicesResponse,
            stoppages::FaultsResponse,
            stoppages::SummaryStoppagesResponse,
            stoppages::SummaryStoppages,
            stoppages::StoppageLegendResponse,
            stoppages::OfflineWtgsResponse,
            analysis::ProductionAnalysisResponse,
            analysis::ScheduleServiceResponse,
            analysis::ServiceAnalysisResponse,
            analysis::TopTenFaultsResponse,
            analysis::IdfAnalysisResponse,
            resets::OvernightResetsResponse,
            resets::IdfHeadingsResponse,
            production::ProdStatsResponse,
            production::ProductionDayRow,
            crate::report::summary::StoppageHeadings,
            crate::report::summary::ClassBreakdown,
            crate::report::summary::SiteStoppages,
            crate::report::summary::SiteAverages,
            crate::report::summary::LegendEntry,
            crate::report::summary::OfflineTurbine,
            crate::report::analysis::ProductionAnalysisRow,
            crate::report::analysis::ScheduleServiceRow,
            crate::report::analysis::ServiceAnalysisRow,
            crate::report::analysis::FaultFrequencyRow,
            crate::report::analysis::IdfAnalysisRow,
            crate::report::overnight::OvernightResetRow,
            crate::report::idf::IdfHeading,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Login, tokens and audit"),
        (name = "reference", description = "Windfarms and turbines"),
        (name = "stoppages", description = "Stoppage counts and summaries"),
        (name = "analysis", description = "Two-period comparison panels"),
        (name = "resets", description = "Overnight resets and IDF headings"),
        (name = "production", description = "Daily production statistics"),
    ),
    info(
        title = "RCC Operations API",
        description = "Reporting and authentication API for the RCC wind-farm dashboard",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/stoppages/headings", get(stoppages::headings))
        .route("/stoppages/services", get(stoppages::services))
        .route("/stoppages/faults", get(stoppages::faults))
        .route("/stoppages/summary", get(stoppages::summary))
        .route("/stoppages/legend", get(stoppages::legend))
        .route("/stoppages/offline", get(stoppages::offline))
        .route("/analysis/production", get(analysis::production_analysis))
        .route(
            "/analysis/schedule-service",
            get(analysis::schedule_service_analysis),
        )
        .route("/analysis/service", get(analysis::service_analysis))
        .route("/analysis/top-faults", get(analysis::top_ten_faults))
        .route("/analysis/idf", get(analysis::idf_analysis))
        .route("/resets/overnight", get(resets::overnight))
        .route("/idf/headings", get(resets::idf_headings))
        .route("/production/daily", get(production::daily))
        .route("/windfarms", get(reference::list_windfarms))
        .route("/turbines", get(reference::list_turbines))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
        .route("/auth/attempts", get(auth::attempts))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check route (no body limit, suitable for probes)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
