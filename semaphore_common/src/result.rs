//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `SemaphoreError`, so functions can simply return `Result<T>`.
use crate::error::SemaphoreError;

/// Workspace-wide `Result` alias with `SemaphoreError` as the default error.
pub type Result<T, E = SemaphoreError> = std::result::Result<T, E>;
