// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Closed-set domain labels shared across the dispatch workspace.
//!
//! All three label enums serialize as snake_case strings both in TOML
//! config and JSON output, and parse back via `FromStr` so clap can use
//! them directly as argument types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Identity of a worker agent in the static roster.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AgentId {
    Atlas,
    Forge,
    Clio,
    Bolt,
    Nexus,
}

/// Closed-set label describing the nature of a task.
///
/// `General` is the catch-all for descriptions with no keyword match; it
/// never appears in the keyword table itself.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Building,
    Planning,
    Testing,
    CodeExecution,
    Linux,
    Documentation,
    Review,
    Research,
    Debugging,
    Deployment,
    General,
}

/// Agent execution speed tier. Variant order is the tier order, so the
/// derived `Ord` gives `Medium < Fast < VeryFast`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SpeedTier {
    Medium,
    Fast,
    VeryFast,
}

/// Routing policy selecting for specialist quality, lowest cost, or
/// highest speed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OptimizeFor {
    #[default]
    Quality,
    Cost,
    Speed,
}
