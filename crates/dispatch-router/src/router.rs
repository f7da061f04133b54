// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The routing decision engine.
//!
//! Orchestrates classification, candidate ranking, cost estimation, and
//! the counters side effect. `route` never fails: unmatched descriptions
//! classify to `general` and an empty candidate set falls back to the
//! full roster.

use std::collections::BTreeMap;
use std::path::PathBuf;

use dispatch_config::model::DispatchConfig;
use dispatch_core::{AgentId, OptimizeFor, TaskType};
use dispatch_stats::{StatsStore, StatsSummary};
use serde::Serialize;
use tracing::{info, warn};

use crate::classifier::{Classification, TaskClassifier};
use crate::roster::Roster;

/// One routing decision. Created fresh per `route` call, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingDecision {
    /// Classified task type.
    pub task_type: TaskType,
    /// The selected agent.
    pub primary_agent: AgentId,
    /// Next-best candidate under the same ordering, when one exists.
    pub fallback_agent: Option<AgentId>,
    /// Classification confidence in [0, 1].
    pub confidence: f32,
    /// Which selection rule fired.
    pub reason: String,
    /// Estimated cost in USD for the assumed per-task token budget.
    pub estimated_cost_usd: f64,
    /// Remaining ranked candidates beyond primary and fallback.
    pub alternative_agents: Vec<AgentId>,
}

/// Task router over a static roster with persisted usage counters.
pub struct TaskRouter {
    classifier: TaskClassifier,
    roster: Roster,
    stats: StatsStore,
    assumed_task_tokens: u32,
}

impl TaskRouter {
    /// Build a router from validated configuration; the counters file
    /// lives at the configured `stats.path`.
    pub fn new(config: &DispatchConfig) -> Self {
        Self::with_stats_path(config, PathBuf::from(&config.stats.path))
    }

    /// Build a router with an explicit counters-file path. The store is
    /// injected here rather than kept as ambient global state so tests
    /// can point it at a scratch file. The config must have passed
    /// validation (in particular, a non-empty roster).
    pub fn with_stats_path(config: &DispatchConfig, stats_path: impl Into<PathBuf>) -> Self {
        Self {
            classifier: TaskClassifier::new(&config.keywords),
            roster: Roster::from_config(config),
            stats: StatsStore::open(stats_path),
            assumed_task_tokens: config.router.assumed_task_tokens,
        }
    }

    /// Route a task description to an agent.
    ///
    /// Classifies the description, ranks the capable candidates for the
    /// requested optimization mode, estimates cost from the agent's rate
    /// and the fixed per-task token budget, and records the decision in
    /// the counters store. Always returns a decision.
    pub fn route(&self, description: &str, optimize_for: OptimizeFor) -> RoutingDecision {
        let classification = self.classifier.classify(description);
        let task_type = classification.task_type;

        let ranked = self.roster.ranked_candidates(task_type, optimize_for);
        let primary = ranked[0];
        let fallback_agent = ranked.get(1).map(|a| a.id);
        let alternative_agents = ranked.iter().skip(2).map(|a| a.id).collect();

        let reason = self.reason_for(task_type, primary.id, optimize_for);
        let estimated_cost_usd =
            primary.cost_per_mtok * f64::from(self.assumed_task_tokens) / 1_000_000.0;

        if let Err(e) = self.stats.record(primary.id, task_type, estimated_cost_usd) {
            // Routing still succeeds when the counters file cannot be
            // written; the decision itself is pure computation.
            warn!(error = %e, "failed to persist routing counters");
        }

        info!(
            task_type = %task_type,
            agent = %primary.id,
            mode = %optimize_for,
            confidence = classification.confidence,
            "routing decision"
        );

        RoutingDecision {
            task_type,
            primary_agent: primary.id,
            fallback_agent,
            confidence: classification.confidence,
            reason,
            estimated_cost_usd,
            alternative_agents,
        }
    }

    fn reason_for(&self, task_type: TaskType, agent: AgentId, optimize_for: OptimizeFor) -> String {
        if !self.roster.has_capable_agent(task_type) {
            return format!("{task_type} task: no capable agent listed, using default precedence");
        }
        match optimize_for {
            OptimizeFor::Quality => {
                let specialist = self
                    .roster
                    .profile(agent)
                    .is_some_and(|p| p.is_specialist(task_type));
                if specialist {
                    format!("{task_type} task: {agent} is the designated specialist")
                } else {
                    format!("no {task_type} specialist: {agent} is the most capable agent")
                }
            }
            OptimizeFor::Cost => {
                format!("cost-optimized: {agent} is the cheapest agent capable of {task_type}")
            }
            OptimizeFor::Speed => {
                format!("speed-optimized: {agent} is the fastest agent capable of {task_type}")
            }
        }
    }

    /// Classify without routing; pure and side-effect free.
    pub fn classify_task(&self, description: &str) -> Classification {
        self.classifier.classify(description)
    }

    /// Quality-mode primary selection for a task type. Deterministic and
    /// read-only.
    pub fn best_agent(&self, task_type: TaskType) -> AgentId {
        self.roster.ranked_candidates(task_type, OptimizeFor::Quality)[0].id
    }

    /// Membership test against the agent's specialty and capability sets.
    pub fn can_handle(&self, agent: AgentId, task_type: TaskType) -> bool {
        self.roster
            .profile(agent)
            .is_some_and(|p| p.can_handle(task_type))
    }

    /// All agents capable of the task type, in quality-mode order. Empty
    /// when no agent lists the type.
    pub fn capable_agents(&self, task_type: TaskType) -> Vec<AgentId> {
        if !self.roster.has_capable_agent(task_type) {
            return Vec::new();
        }
        self.roster
            .ranked_candidates(task_type, OptimizeFor::Quality)
            .iter()
            .map(|a| a.id)
            .collect()
    }

    /// Read-only counters projection with the derived average cost.
    pub fn stats(&self) -> StatsSummary {
        self.stats.summary()
    }

    /// Per-agent routing counts; sums to the total routing count.
    pub fn workload(&self) -> BTreeMap<AgentId, u64> {
        self.stats.workload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_router() -> (tempfile::TempDir, TaskRouter) {
        let dir = tempfile::tempdir().unwrap();
        let config = DispatchConfig::default();
        let router = TaskRouter::with_stats_path(&config, dir.path().join("stats.json"));
        (dir, router)
    }

    #[test]
    fn quality_routes_building_to_atlas() {
        let (_dir, router) = test_router();
        let decision = router.route("Build a new CLI tool", OptimizeFor::Quality);
        assert_eq!(decision.task_type, TaskType::Building);
        assert_eq!(decision.primary_agent, AgentId::Atlas);
        assert_eq!(decision.fallback_agent, Some(AgentId::Bolt));
        assert_eq!(decision.confidence, 1.0);
        assert!(decision.reason.contains("designated specialist"));
    }

    #[test]
    fn quality_routes_testing_to_nexus() {
        let (_dir, router) = test_router();
        let decision = router.route("Run comprehensive tests", OptimizeFor::Quality);
        assert_eq!(decision.task_type, TaskType::Testing);
        assert_eq!(decision.primary_agent, AgentId::Nexus);
    }

    #[test]
    fn cost_mode_picks_the_free_agent() {
        let (_dir, router) = test_router();
        let decision = router.route("Execute batch script", OptimizeFor::Cost);
        assert_eq!(decision.task_type, TaskType::CodeExecution);
        assert_eq!(decision.primary_agent, AgentId::Bolt);
        assert_eq!(decision.estimated_cost_usd, 0.0);
        assert!(decision.reason.starts_with("cost-optimized"));
    }

    #[test]
    fn speed_mode_picks_a_maximal_tier() {
        let dir = tempfile::tempdir().unwrap();
        let config = DispatchConfig::default();
        let router = TaskRouter::with_stats_path(&config, dir.path().join("stats.json"));
        let roster = Roster::from_config(&config);

        // Whatever the classified type, the primary must be at least as
        // fast as every other capable candidate.
        let decision = router.route("verify the release build", OptimizeFor::Speed);
        let capable = router.capable_agents(decision.task_type);
        assert!(capable.contains(&decision.primary_agent));

        let primary_speed = roster.profile(decision.primary_agent).unwrap().speed;
        for agent in capable {
            assert!(primary_speed >= roster.profile(agent).unwrap().speed);
        }
    }

    #[test]
    fn unmatched_description_still_routes() {
        let (_dir, router) = test_router();
        let decision = router.route("xyzzy", OptimizeFor::Quality);
        assert_eq!(decision.task_type, TaskType::General);
        assert_eq!(decision.confidence, 0.0);
        assert_eq!(decision.primary_agent, AgentId::Forge);
        assert_eq!(decision.fallback_agent, Some(AgentId::Atlas));
        assert!(decision.reason.contains("default precedence"));
    }

    #[test]
    fn empty_description_still_routes() {
        let (_dir, router) = test_router();
        let decision = router.route("", OptimizeFor::Quality);
        assert_eq!(decision.task_type, TaskType::General);
        assert_eq!(decision.primary_agent, AgentId::Forge);
    }

    #[test]
    fn fallback_differs_from_primary() {
        let (_dir, router) = test_router();
        for desc in ["Build a tool", "plan the roadmap", "fix the bug", "xyzzy"] {
            let decision = router.route(desc, OptimizeFor::Quality);
            if let Some(fallback) = decision.fallback_agent {
                assert_ne!(fallback, decision.primary_agent);
            }
        }
    }

    #[test]
    fn estimated_cost_scales_with_token_budget() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = DispatchConfig::default();
        config.router.assumed_task_tokens = 1_000_000;
        let router = TaskRouter::with_stats_path(&config, dir.path().join("stats.json"));

        // One million assumed tokens makes the estimate equal the rate.
        let decision = router.route("write the user guide", OptimizeFor::Quality);
        assert_eq!(decision.primary_agent, AgentId::Atlas);
        assert!((decision.estimated_cost_usd - 3.0).abs() < 1e-10);
    }

    #[test]
    fn route_accumulates_counters() {
        let (_dir, router) = test_router();
        let mut expected_cost = 0.0;
        let descriptions = [
            "Build a new CLI tool",
            "plan the quarter",
            "fix the broken login",
            "Execute batch script",
        ];
        for desc in descriptions {
            expected_cost += router.route(desc, OptimizeFor::Quality).estimated_cost_usd;
        }

        let stats = router.stats();
        assert_eq!(stats.total_routes, descriptions.len() as u64);
        assert!((stats.total_cost_usd - expected_cost).abs() < 1e-10);
    }

    #[test]
    fn workload_sums_to_total_routes() {
        let (_dir, router) = test_router();
        for desc in ["build it", "test it", "ship it", "study it", "xyzzy"] {
            router.route(desc, OptimizeFor::Quality);
        }
        let workload = router.workload();
        let sum: u64 = workload.values().sum();
        assert_eq!(sum, router.stats().total_routes);
    }

    #[test]
    fn best_agent_is_idempotent() {
        let (_dir, router) = test_router();
        let first = router.best_agent(TaskType::Testing);
        // Routing in between must not affect the answer.
        router.route("test everything", OptimizeFor::Cost);
        assert_eq!(router.best_agent(TaskType::Testing), first);
        assert_eq!(first, AgentId::Nexus);
    }

    #[test]
    fn best_agent_for_general_is_forge() {
        let (_dir, router) = test_router();
        assert_eq!(router.best_agent(TaskType::General), AgentId::Forge);
    }

    #[test]
    fn can_handle_checks_both_sets() {
        let (_dir, router) = test_router();
        assert!(router.can_handle(AgentId::Nexus, TaskType::Testing));
        assert!(router.can_handle(AgentId::Atlas, TaskType::Testing));
        assert!(!router.can_handle(AgentId::Forge, TaskType::CodeExecution));
    }

    #[test]
    fn capable_agents_ordered_by_quality_precedence() {
        let (_dir, router) = test_router();
        assert_eq!(
            router.capable_agents(TaskType::Testing),
            vec![AgentId::Nexus, AgentId::Atlas, AgentId::Bolt]
        );
        // No agent lists general as a capability.
        assert!(router.capable_agents(TaskType::General).is_empty());
    }

    #[test]
    fn alternatives_exclude_primary_and_fallback() {
        let (_dir, router) = test_router();
        let decision = router.route("run all the tests", OptimizeFor::Quality);
        assert!(!decision.alternative_agents.contains(&decision.primary_agent));
        if let Some(fallback) = decision.fallback_agent {
            assert!(!decision.alternative_agents.contains(&fallback));
        }
    }

    #[test]
    fn decisions_serialize_for_json_output() {
        let (_dir, router) = test_router();
        let decision = router.route("Build a new CLI tool", OptimizeFor::Quality);
        let json = serde_json::to_string(&decision).unwrap();
        assert!(json.contains("\"task_type\":\"building\""));
        assert!(json.contains("\"primary_agent\":\"atlas\""));
    }

    #[test]
    fn best_agent_does_not_touch_counters() {
        let (_dir, router) = test_router();
        router.best_agent(TaskType::Review);
        router.capable_agents(TaskType::Review);
        router.classify_task("review the design");
        assert_eq!(router.stats().total_routes, 0);
    }
}
