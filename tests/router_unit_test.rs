//! Unit tests for router construction.
//!
//! Run with: cargo test --test router_unit_test

use rcc_api::common::AppState;
use rcc_api::config::{Config, Deployment};
use rcc_api::routes::build_router;
use sea_orm::DatabaseConnection;

fn test_config() -> Config {
    Config {
        ops_database_url: "sqlite::memory:".to_string(),
        stats_database_url: "sqlite::memory:".to_string(),
        auth_database_url: "sqlite::memory:".to_string(),
        jwt_secret: "unit-test-secret".to_string(),
        access_token_minutes: 15,
        refresh_token_days: 7,
        api_host: "127.0.0.1".to_string(),
        api_port: 3000,
        deployment: Deployment::Local,
    }
}

#[test]
fn router_builds_with_every_route_registered_once() {
    let state = AppState::new(
        DatabaseConnection::default(),
        DatabaseConnection::default(),
        DatabaseConnection::default(),
        test_config(),
    );

    // axum panics on duplicate path registration, so constructing the full
    // router proves each path is wired exactly once.
    let _router = build_router(state);
}
