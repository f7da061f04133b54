// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the dispatch task router.

use thiserror::Error;

/// The primary error type used across the dispatch workspace.
///
/// Routing itself never fails (it degrades to the general roster) and
/// configuration failures carry their own diagnostic type, so the
/// taxonomy is small: counters-file persistence failures and
/// user-supplied labels that are not part of the closed set.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Stats counters persistence errors (file I/O, serialization).
    #[error("stats persistence error: {source}")]
    Stats {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A task-type label outside the closed set was supplied.
    #[error("unknown task type `{name}` (valid: {valid})")]
    UnknownTaskType { name: String, valid: String },
}
