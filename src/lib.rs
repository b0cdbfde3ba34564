//! Praxis Analytics - Embedded telemetry and adaptive-learning engine
//!
//! This crate records performance events from clinical case training,
//! batches them for durable delivery to a remote collector, and maintains
//! per-user learning patterns and aggregated reports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
