// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task classification and agent routing for dispatch.
//!
//! This crate provides:
//! - [`TaskClassifier`]: ordered-table keyword classification with
//!   first-match-wins semantics (zero-cost, zero-latency)
//! - [`TaskRouter`]: agent selection across quality, cost, and speed
//!   optimization modes, with persisted usage counters
//!
//! The router is the decision engine behind the `dispatch` CLI: every
//! description gets a label and an agent, with graceful fallback to the
//! general-purpose roster when nothing matches.

pub mod classifier;
pub mod roster;
pub mod router;

pub use classifier::{Classification, TaskClassifier};
pub use roster::{AgentProfile, Roster};
pub use router::{RoutingDecision, TaskRouter};
