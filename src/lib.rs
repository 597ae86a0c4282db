//! RCC Operations API - reporting and authentication backend for the
//! wind-farm operations dashboard
//!
//! This library exposes the core modules for testing and reuse.

pub mod auth;
pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod report;
pub mod routes;
