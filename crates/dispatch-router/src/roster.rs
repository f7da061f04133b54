// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The agent roster and the candidate orderings behind every routing mode.
//!
//! Profiles and precedence tables come from configuration at startup and
//! are never mutated afterwards.

use std::collections::{BTreeSet, HashMap};

use dispatch_config::model::DispatchConfig;
use dispatch_core::{AgentId, OptimizeFor, SpeedTier, TaskType};

/// Immutable profile of one roster agent.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub id: AgentId,
    pub cost_per_mtok: f64,
    pub speed: SpeedTier,
    specialties: BTreeSet<TaskType>,
    capabilities: BTreeSet<TaskType>,
}

impl AgentProfile {
    /// Membership test against the specialty union capability sets.
    pub fn can_handle(&self, task_type: TaskType) -> bool {
        self.specialties.contains(&task_type) || self.capabilities.contains(&task_type)
    }

    /// Whether this agent is a designated specialist for the type.
    pub fn is_specialist(&self, task_type: TaskType) -> bool {
        self.specialties.contains(&task_type)
    }
}

/// Precedence index for agents absent from every precedence list. Larger
/// than any real index so unlisted agents sort last.
const UNRANKED: usize = usize::MAX;

/// The static roster plus per-type precedence tables.
pub struct Roster {
    agents: Vec<AgentProfile>,
    rules: HashMap<TaskType, Vec<AgentId>>,
    default_precedence: Vec<AgentId>,
}

impl Roster {
    /// Build the roster from validated configuration.
    pub fn from_config(config: &DispatchConfig) -> Self {
        let agents = config
            .agents
            .iter()
            .map(|a| AgentProfile {
                id: a.name,
                cost_per_mtok: a.cost_per_mtok,
                speed: a.speed,
                specialties: a.specialties.iter().copied().collect(),
                capabilities: a.capabilities.iter().copied().collect(),
            })
            .collect();

        let rules = config
            .rules
            .iter()
            .map(|r| (r.task_type, r.precedence.clone()))
            .collect();

        Self {
            agents,
            rules,
            default_precedence: config.router.default_precedence.clone(),
        }
    }

    /// All roster profiles in declaration order.
    pub fn agents(&self) -> &[AgentProfile] {
        &self.agents
    }

    /// Look up one agent's profile.
    pub fn profile(&self, id: AgentId) -> Option<&AgentProfile> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Static precedence position of an agent for a task type.
    ///
    /// Agents in the per-type rule rank first (by list position), then
    /// agents in the default precedence list, then everyone else.
    fn precedence_index(&self, task_type: TaskType, agent: AgentId) -> usize {
        if let Some(rule) = self.rules.get(&task_type)
            && let Some(pos) = rule.iter().position(|a| *a == agent)
        {
            return pos;
        }
        let offset = self.rules.get(&task_type).map_or(0, Vec::len);
        self.default_precedence
            .iter()
            .position(|a| *a == agent)
            .map_or(UNRANKED, |pos| offset + pos)
    }

    /// Agents capable of the task type, unordered. May be empty.
    pub fn candidates(&self, task_type: TaskType) -> Vec<&AgentProfile> {
        self.agents.iter().filter(|a| a.can_handle(task_type)).collect()
    }

    /// Candidates ranked for the given optimization mode.
    ///
    /// When no agent is capable of the type the full roster is ranked
    /// instead, so a selection always exists.
    pub fn ranked_candidates(
        &self,
        task_type: TaskType,
        optimize_for: OptimizeFor,
    ) -> Vec<&AgentProfile> {
        let mut candidates = self.candidates(task_type);
        if candidates.is_empty() {
            candidates = self.agents.iter().collect();
        }

        candidates.sort_by(|a, b| {
            let prec = |p: &AgentProfile| self.precedence_index(task_type, p.id);
            match optimize_for {
                // Specialists first, then static precedence.
                OptimizeFor::Quality => (!a.is_specialist(task_type), prec(a))
                    .cmp(&(!b.is_specialist(task_type), prec(b))),
                // Cheapest first; faster breaks cost ties, then precedence.
                OptimizeFor::Cost => a
                    .cost_per_mtok
                    .total_cmp(&b.cost_per_mtok)
                    .then(b.speed.cmp(&a.speed))
                    .then(prec(a).cmp(&prec(b))),
                // Fastest first; cheaper breaks speed ties, then precedence.
                OptimizeFor::Speed => b
                    .speed
                    .cmp(&a.speed)
                    .then(a.cost_per_mtok.total_cmp(&b.cost_per_mtok))
                    .then(prec(a).cmp(&prec(b))),
            }
        });

        candidates
    }

    /// Whether the ranked list for this type fell back to the full roster.
    pub fn has_capable_agent(&self, task_type: TaskType) -> bool {
        self.agents.iter().any(|a| a.can_handle(task_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::from_config(&DispatchConfig::default())
    }

    #[test]
    fn default_rules_reproduce_designated_pairs() {
        // Every built-in precedence rule must rank its designated
        // specialist first and the traditional fallback second under
        // quality ordering.
        let roster = roster();
        let expected = [
            (TaskType::CodeExecution, AgentId::Bolt, AgentId::Clio),
            (TaskType::Planning, AgentId::Forge, AgentId::Atlas),
            (TaskType::Building, AgentId::Atlas, AgentId::Bolt),
            (TaskType::Linux, AgentId::Clio, AgentId::Nexus),
            (TaskType::Testing, AgentId::Nexus, AgentId::Atlas),
            (TaskType::Review, AgentId::Forge, AgentId::Nexus),
            (TaskType::Documentation, AgentId::Atlas, AgentId::Forge),
            (TaskType::Debugging, AgentId::Nexus, AgentId::Clio),
            (TaskType::Deployment, AgentId::Clio, AgentId::Bolt),
            (TaskType::Research, AgentId::Forge, AgentId::Atlas),
        ];
        for (task_type, primary, fallback) in expected {
            let ranked = roster.ranked_candidates(task_type, OptimizeFor::Quality);
            assert_eq!(ranked[0].id, primary, "primary for {task_type}");
            assert_eq!(ranked[1].id, fallback, "fallback for {task_type}");
        }
    }

    #[test]
    fn cost_ranking_prefers_free_agent() {
        let roster = roster();
        let ranked = roster.ranked_candidates(TaskType::Testing, OptimizeFor::Cost);
        assert_eq!(ranked[0].id, AgentId::Bolt);
        // Cost tie between atlas and nexus breaks on speed (atlas is fast).
        assert_eq!(ranked[1].id, AgentId::Atlas);
    }

    #[test]
    fn speed_ranking_prefers_fastest_tier() {
        let roster = roster();
        let ranked = roster.ranked_candidates(TaskType::Testing, OptimizeFor::Speed);
        assert_eq!(ranked[0].speed, SpeedTier::VeryFast);
        assert_eq!(ranked[0].id, AgentId::Bolt);
    }

    #[test]
    fn general_falls_back_to_full_roster() {
        let roster = roster();
        assert!(!roster.has_capable_agent(TaskType::General));
        let ranked = roster.ranked_candidates(TaskType::General, OptimizeFor::Quality);
        assert_eq!(ranked.len(), 5);
        // Default precedence puts the orchestrator first.
        assert_eq!(ranked[0].id, AgentId::Forge);
        assert_eq!(ranked[1].id, AgentId::Atlas);
    }

    #[test]
    fn membership_test_covers_both_sets() {
        let roster = roster();
        let bolt = roster.profile(AgentId::Bolt).unwrap();
        assert!(bolt.is_specialist(TaskType::CodeExecution));
        assert!(bolt.can_handle(TaskType::Testing));
        assert!(!bolt.is_specialist(TaskType::Testing));
        assert!(!bolt.can_handle(TaskType::Planning));
    }

    #[test]
    fn ranking_is_deterministic() {
        let roster = roster();
        for _ in 0..3 {
            let ranked: Vec<_> = roster
                .ranked_candidates(TaskType::Review, OptimizeFor::Quality)
                .iter()
                .map(|a| a.id)
                .collect();
            assert_eq!(ranked[0], AgentId::Forge);
            assert_eq!(ranked[1], AgentId::Nexus);
        }
    }
}
