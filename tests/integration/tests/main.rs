//! End-to-End Integration Tests
//!
//! These tests run user search against an ephemeral `PostgreSQL` instance
//! started with testcontainers. They need Docker and are ignored by
//! default: `cargo test -p kc-integration-tests -- --ignored`.

mod common;
mod user_search;
