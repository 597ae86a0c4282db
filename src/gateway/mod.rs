//! Request-scoped queries against the two externally-owned stores: the
//! operations database (events plus reference tables) and the production
//! statistics database. Both are read-only from this service; all writes
//! happen in the auth store via entities.

pub mod ops;
pub mod stats;
