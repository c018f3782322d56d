//! Intake is a customer intake REST API.
//!
//! It accepts customer records over HTTP, validates the fields, normalizes
//! names to Unicode NFC, and echoes the accepted record back to the caller.
//! A per-client-IP rate limiter guards the `/api` subtree.
//!
//! # Architecture
//!
//! - [`api`] -- `POST /api/customers` handler and the JSON error boundary.
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, health).
//! - [`config`] -- Runtime settings resolved from flags and environment.
//! - [`customer`] -- Customer record validation and NFC name normalization.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`ratelimit`] -- Fixed-window rate limiting keyed by client IP.
//! - [`server`] -- Axum router setup, shared state, and graceful shutdown.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod customer;
pub mod error;
pub mod health;
pub mod logging;
pub mod ratelimit;
pub mod server;
