//! Sextant - project lifecycle analysis from task data.
//!
//! This library provides the core functionality for the `sx` CLI tool: a
//! pure, deterministic engine that inspects a project's task set and infers
//! which lifecycle phase the project is in, how healthy it looks, how far
//! along it is, and who is actively working on it.
//!
//! The engine lives in [`analysis`] and consumes only the plain read models
//! in [`models`]; it performs no I/O and never mutates its inputs. The
//! [`storage`] module loads those read models from a JSON export of the
//! surrounding project-management backend.

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod storage;

/// Library-level error type for Sextant operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("dataset not found: {0} (pass --data, or set SX_DATA or the data-path config key)")]
    DatasetNotFound(String),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Sextant operations.
pub type Result<T> = std::result::Result<T, Error>;
