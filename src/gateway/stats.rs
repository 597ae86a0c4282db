//! Daily production figures from the statistics database.

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};

use crate::error::AppResult;
use crate::report::{DateRange, ProductionDay};

/// Daily rows for the range, optionally for one windfarm, in date order.
/// The table is keyed by calendar day, so the range's day bounds apply
/// directly.
pub async fn daily_stats_in_range(
    db: &DatabaseConnection,
    range: &DateRange,
    site: Option<&str>,
) -> AppResult<Vec<ProductionDay>> {
    let mut sql = String::from(
        "SELECT windfarm, stat_date, avg_wind_speed, energy_export \
         FROM production_stats \
         WHERE stat_date >= ? AND stat_date <= ?",
    );
    let mut values: Vec<sea_orm::Value> = vec![range.first_day.into(), range.last_day.into()];

    if let Some(abbr) = site {
        sql.push_str(" AND windfarm = ?");
        values.push(abbr.into());
    }
    sql.push_str(" ORDER BY stat_date, windfarm");

    let rows = db
        .query_all(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Sqlite,
            &sql,
            values,
        ))
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| ProductionDay::from_query_result(&row, "").ok())
        .collect())
}

#[derive(Debug, FromQueryResult)]
struct EnergyRow {
    energy_export: Option<f64>,
}

/// Exported energy for one windfarm on one day, `None` when the store has
/// no figure for that day.
pub async fn energy_for_day(
    db: &DatabaseConnection,
    windfarm: &str,
    day: NaiveDate,
) -> AppResult<Option<f64>> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Sqlite,
            "SELECT energy_export FROM production_stats WHERE windfarm = ? AND stat_date = ?",
            vec![windfarm.into(), day.into()],
        ))
        .await?;

    Ok(row
        .and_then(|r| EnergyRow::from_query_result(&r, "").ok())
        .and_then(|r| r.energy_export))
}
