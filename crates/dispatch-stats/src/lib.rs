// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted routing counters for the dispatch task router.
//!
//! This crate provides:
//! - [`RoutingStats`]: the flat counters record (per-agent, per-type,
//!   total routes, total cost) serialized as JSON
//! - [`StatsStore`]: the mutex-guarded load/increment/persist store

pub mod store;

pub use store::{RoutingStats, StatsStore, StatsSummary};
