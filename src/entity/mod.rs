//! sea-orm entities for the tables this service touches through the query
//! builder: ops reference data (windfarms, turbines) and the auth store.
//! Event and production rows are fetched with raw parameterized SQL in
//! `crate::gateway` and never materialize as entities.

pub mod login_attempts;
pub mod turbines;
pub mod users;
pub mod windfarms;
