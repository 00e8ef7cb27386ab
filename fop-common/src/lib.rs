//! # FieldOps Portal Common Library
//!
//! Shared core for the FieldOps employee portal screens:
//! - Field resolution across heterogeneous record shapes
//! - Status classification by ordered rule tables
//! - Role collection and the advisory privileged-tier hint
//! - The list derivation pipeline (partition, filter, sort, count, truncate)
//! - The shared view-state bus
//! - Per-screen candidate-field tables and list presets
//! - Configuration loading and logging setup

pub mod bus;
pub mod classify;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod resolve;
pub mod roles;
pub mod screens;

pub use error::{Error, Result};
