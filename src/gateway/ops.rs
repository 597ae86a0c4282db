//! Event queries against the operations database.
//!
//! One SELECT shape serves every report: the event row joined with the
//! reference names the builders group on. Rows come back as [`EventRecord`].

use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};

use crate::error::AppResult;
use crate::report::{DateRange, EventRecord};

/// Event rows joined with their reference names. Reason, fault code and
/// reset columns are LEFT JOINs since events may omit them.
const EVENT_SELECT: &str = r"
    SELECT
        e.id AS id,
        w.abbr AS windfarm,
        t.name AS turbine,
        ra.name AS rationale,
        re.name AS reason,
        fc.code AS fault_code,
        fc.description AS fault_description,
        e.stop_code_id AS stop_code_id,
        ag.name AS reset_agent,
        rt.name AS reset_type,
        e.down_began AS down_began,
        e.maintenance_began AS maintenance_began,
        e.finished AS finished,
        e.note AS note
    FROM events e
    JOIN windfarms w ON w.id = e.windfarm_id
    JOIN turbines t ON t.id = e.turbine_id
    JOIN rationales ra ON ra.id = e.rationale_id
    LEFT JOIN reasons re ON re.id = e.reason_id
    LEFT JOIN fault_codes fc ON fc.id = e.fault_code_id
    LEFT JOIN reset_agents ag ON ag.id = e.reset_agent_id
    LEFT JOIN reset_types rt ON rt.id = e.reset_type_id";

/// Events whose down-begin falls inside the range, oldest first, optionally
/// restricted to one windfarm abbreviation.
pub async fn events_in_range(
    db: &DatabaseConnection,
    range: &DateRange,
    site: Option<&str>,
) -> AppResult<Vec<EventRecord>> {
    let mut sql = format!("{EVENT_SELECT}\n    WHERE e.down_began >= ? AND e.down_began <= ?");
    let mut values: Vec<sea_orm::Value> = vec![range.start.into(), range.end.into()];

    if let Some(abbr) = site {
        sql.push_str(" AND w.abbr = ?");
        values.push(abbr.into());
    }
    sql.push_str("\n    ORDER BY e.down_began");

    fetch_events(db, sql, values).await
}

/// Events with no finish time yet, oldest first. The offline panel shows
/// these regardless of date.
pub async fn open_events(db: &DatabaseConnection) -> AppResult<Vec<EventRecord>> {
    let sql = format!("{EVENT_SELECT}\n    WHERE e.finished IS NULL\n    ORDER BY e.down_began");
    fetch_events(db, sql, Vec::new()).await
}

async fn fetch_events(
    db: &DatabaseConnection,
    sql: String,
    values: Vec<sea_orm::Value>,
) -> AppResult<Vec<EventRecord>> {
    let rows = db
        .query_all(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Sqlite,
            &sql,
            values,
        ))
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| EventRecord::from_query_result(&row, "").ok())
        .collect())
}
