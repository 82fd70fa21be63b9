//! Test Module
//!
//! Cross-module tests for the brief engine.
//!
//! ## Test Categories
//! - `store_tests`: SQLite snapshot slot and store persistence semantics
//! - `supervisor_tests`: brief actor behavior with mocked providers
//! - `integration_tests`: full enrichment workflow against a mock search server

pub mod supervisor_tests;
