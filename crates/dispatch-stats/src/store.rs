// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent routing counters backed by a flat JSON file.
//!
//! Counters are read once when the store is opened and rewritten after
//! every state-changing call. A missing or corrupt counters file resets
//! to zero rather than surfacing an error, so routing always proceeds.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dispatch_core::{AgentId, DispatchError, TaskType};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The persisted counters record.
///
/// `BTreeMap` keeps the serialized form deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingStats {
    /// Total number of routing decisions made.
    pub total_routes: u64,
    /// Running sum of estimated costs in USD.
    pub total_cost_usd: f64,
    /// Routing count per primary agent.
    pub by_agent: BTreeMap<AgentId, u64>,
    /// Routing count per classified task type.
    pub by_task_type: BTreeMap<TaskType, u64>,
}

impl RoutingStats {
    /// Derived average estimated cost per route, 0.0 when empty.
    pub fn avg_cost_usd(&self) -> f64 {
        if self.total_routes == 0 {
            0.0
        } else {
            self.total_cost_usd / self.total_routes as f64
        }
    }
}

/// Read-only projection of the counters with the derived average.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub total_routes: u64,
    pub total_cost_usd: f64,
    pub avg_cost_usd: f64,
    pub by_agent: BTreeMap<AgentId, u64>,
    pub by_task_type: BTreeMap<TaskType, u64>,
}

/// Counters store guarding a read-increment-persist critical section.
///
/// The single mutex makes concurrent callers safe even though the CLI
/// itself is single-threaded.
pub struct StatsStore {
    path: PathBuf,
    inner: Mutex<RoutingStats>,
}

impl StatsStore {
    /// Open the store, loading existing counters from `path`.
    ///
    /// A missing file starts from zero counters; a corrupt file resets to
    /// zero with a warning. Opening never fails.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stats = Self::load(&path);
        Self {
            path,
            inner: Mutex::new(stats),
        }
    }

    fn load(path: &Path) -> RoutingStats {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(stats) => {
                    debug!(path = %path.display(), "loaded routing counters");
                    stats
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "corrupt counters file, resetting to zero"
                    );
                    RoutingStats::default()
                }
            },
            Err(_) => RoutingStats::default(),
        }
    }

    /// Record one routing decision and persist the updated counters.
    ///
    /// The whole read-increment-persist sequence holds the lock so
    /// concurrent updates are never lost.
    pub fn record(
        &self,
        agent: AgentId,
        task_type: TaskType,
        estimated_cost_usd: f64,
    ) -> Result<(), DispatchError> {
        let mut stats = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        stats.total_routes += 1;
        stats.total_cost_usd += estimated_cost_usd;
        *stats.by_agent.entry(agent).or_insert(0) += 1;
        *stats.by_task_type.entry(task_type).or_insert(0) += 1;
        self.save(&stats)
    }

    /// Write the counters file via temp file + rename so a crash mid-write
    /// never leaves a truncated record behind.
    fn save(&self, stats: &RoutingStats) -> Result<(), DispatchError> {
        let map_err = |e: std::io::Error| DispatchError::Stats { source: Box::new(e) };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(map_err)?;
        }

        let json = serde_json::to_string_pretty(stats)
            .map_err(|e| DispatchError::Stats { source: Box::new(e) })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(map_err)?;
        std::fs::rename(&tmp, &self.path).map_err(map_err)?;
        Ok(())
    }

    /// Snapshot of the raw counters.
    pub fn snapshot(&self) -> RoutingStats {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Read-only projection with the derived average cost.
    pub fn summary(&self) -> StatsSummary {
        let stats = self.snapshot();
        StatsSummary {
            avg_cost_usd: stats.avg_cost_usd(),
            total_routes: stats.total_routes,
            total_cost_usd: stats.total_cost_usd,
            by_agent: stats.by_agent,
            by_task_type: stats.by_task_type,
        }
    }

    /// Per-agent routing counts.
    pub fn workload(&self) -> BTreeMap<AgentId, u64> {
        self.snapshot().by_agent
    }

    /// Path of the counters file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
