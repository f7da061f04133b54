// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the dispatch task router.
//!
//! This crate provides the closed-set domain labels (agents, task types,
//! speed tiers, optimization modes) and the shared error type used
//! throughout the dispatch workspace.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DispatchError;
pub use types::{AgentId, OptimizeFor, SpeedTier, TaskType};
