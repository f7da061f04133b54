// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the dispatch task router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. The compiled defaults carry the full
//! five-agent roster, keyword table, and per-type precedence rules, so a
//! config file is only needed to substitute a synthetic roster or move
//! the counters file.

use dispatch_core::{AgentId, SpeedTier, TaskType};
use serde::{Deserialize, Serialize};

/// Top-level dispatch configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to the
/// built-in tables.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Routing engine settings.
    #[serde(default)]
    pub router: RouterConfig,

    /// Counters-file persistence settings.
    #[serde(default)]
    pub stats: StatsConfig,

    /// The agent roster. Replaces (not extends) the built-in roster when set.
    #[serde(default = "default_roster")]
    pub agents: Vec<AgentProfileConfig>,

    /// Ordered keyword table for task classification. The array order is
    /// the classification priority order and must be kept as a list, not
    /// a map, so classification stays reproducible.
    #[serde(default = "default_keyword_table")]
    pub keywords: Vec<KeywordRuleConfig>,

    /// Per-task-type agent precedence used for quality routing and tie
    /// breaking. Types without a rule fall back to
    /// `router.default_precedence`.
    #[serde(default = "default_precedence_rules")]
    pub rules: Vec<PrecedenceRuleConfig>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            router: RouterConfig::default(),
            stats: StatsConfig::default(),
            agents: default_roster(),
            keywords: default_keyword_table(),
            rules: default_precedence_rules(),
        }
    }
}

/// Routing engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Fixed token budget assumed per task when estimating cost. The
    /// estimate is `cost_per_mtok * assumed_task_tokens / 1e6`; it is
    /// deliberately not task-length-aware.
    #[serde(default = "default_assumed_task_tokens")]
    pub assumed_task_tokens: u32,

    /// Agent precedence for task types without an explicit rule, and for
    /// the full-roster fallback when no agent is capable.
    #[serde(default = "default_precedence")]
    pub default_precedence: Vec<AgentId>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            assumed_task_tokens: default_assumed_task_tokens(),
            default_precedence: default_precedence(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_assumed_task_tokens() -> u32 {
    10_000
}

fn default_precedence() -> Vec<AgentId> {
    vec![
        AgentId::Forge,
        AgentId::Atlas,
        AgentId::Nexus,
        AgentId::Clio,
        AgentId::Bolt,
    ]
}

/// Counters-file persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    /// Path to the JSON counters file.
    #[serde(default = "default_stats_path")]
    pub path: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            path: default_stats_path(),
        }
    }
}

fn default_stats_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("dispatch").join("stats.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("dispatch_stats.json"))
        .to_string_lossy()
        .into_owned()
}

/// One agent in the roster: cost, speed, and what it can do.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentProfileConfig {
    /// Agent identity.
    pub name: AgentId,

    /// Cost in USD per million tokens. Zero means free.
    pub cost_per_mtok: f64,

    /// Execution speed tier.
    pub speed: SpeedTier,

    /// Task types this agent is the designated specialist for.
    #[serde(default)]
    pub specialties: Vec<TaskType>,

    /// Task types this agent can handle without being the specialist.
    #[serde(default)]
    pub capabilities: Vec<TaskType>,
}

/// One entry in the ordered keyword table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordRuleConfig {
    /// The task type this rule classifies to.
    pub task_type: TaskType,

    /// Keywords matched as lowercase substrings of the description.
    pub keywords: Vec<String>,
}

/// Static agent precedence for one task type.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrecedenceRuleConfig {
    /// The task type this rule applies to.
    pub task_type: TaskType,

    /// Agents in preference order. The first entry is the designated
    /// best-fit agent, the second the traditional fallback.
    pub precedence: Vec<AgentId>,
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// The built-in five-agent roster.
pub fn default_roster() -> Vec<AgentProfileConfig> {
    use AgentId::{Atlas, Bolt, Clio, Forge, Nexus};
    use TaskType::{
        Building, CodeExecution, Debugging, Deployment, Documentation, Linux, Planning, Research,
        Review, Testing,
    };

    vec![
        AgentProfileConfig {
            name: Atlas,
            cost_per_mtok: 3.00,
            speed: SpeedTier::Fast,
            specialties: vec![Building, Documentation],
            capabilities: vec![Planning, Testing, Research],
        },
        AgentProfileConfig {
            name: Forge,
            cost_per_mtok: 15.00,
            speed: SpeedTier::Medium,
            specialties: vec![Planning, Review, Research],
            capabilities: vec![Documentation],
        },
        AgentProfileConfig {
            name: Clio,
            cost_per_mtok: 3.00,
            speed: SpeedTier::Fast,
            specialties: vec![Linux, Deployment],
            capabilities: vec![CodeExecution, Debugging],
        },
        AgentProfileConfig {
            name: Bolt,
            cost_per_mtok: 0.00,
            speed: SpeedTier::VeryFast,
            specialties: vec![CodeExecution],
            capabilities: vec![Testing, Building, Deployment],
        },
        AgentProfileConfig {
            name: Nexus,
            cost_per_mtok: 3.00,
            speed: SpeedTier::Medium,
            specialties: vec![Testing, Debugging],
            capabilities: vec![Review, Linux],
        },
    ]
}

/// The built-in keyword table. Array order is classification priority.
pub fn default_keyword_table() -> Vec<KeywordRuleConfig> {
    vec![
        KeywordRuleConfig {
            task_type: TaskType::Building,
            keywords: strings(&[
                "build", "create", "make", "develop", "implement", "tool", "feature",
            ]),
        },
        KeywordRuleConfig {
            task_type: TaskType::Planning,
            keywords: strings(&[
                "plan", "design", "architect", "strategy", "organize", "structure",
            ]),
        },
        KeywordRuleConfig {
            task_type: TaskType::Testing,
            keywords: strings(&["test", "verify", "validate", "check", "qa", "debug"]),
        },
        KeywordRuleConfig {
            task_type: TaskType::CodeExecution,
            keywords: strings(&["execute", "run", "script", "command", "bash"]),
        },
        KeywordRuleConfig {
            task_type: TaskType::Linux,
            keywords: strings(&["linux", "ubuntu", "system", "server", "deploy", "ssh"]),
        },
        KeywordRuleConfig {
            task_type: TaskType::Documentation,
            keywords: strings(&["document", "readme", "write", "doc", "guide"]),
        },
        KeywordRuleConfig {
            task_type: TaskType::Review,
            keywords: strings(&["review", "analyze", "evaluate", "assess", "critique"]),
        },
        KeywordRuleConfig {
            task_type: TaskType::Research,
            keywords: strings(&["research", "investigate", "explore", "study", "analyze"]),
        },
        KeywordRuleConfig {
            task_type: TaskType::Debugging,
            keywords: strings(&["bug", "error", "fix", "broken", "issue", "problem"]),
        },
    ]
}

/// The built-in per-type precedence rules.
///
/// `deployment` has a rule but no keywords: it is reachable through the
/// `best` query and capability checks, never from classification.
pub fn default_precedence_rules() -> Vec<PrecedenceRuleConfig> {
    use AgentId::{Atlas, Bolt, Clio, Forge, Nexus};

    vec![
        PrecedenceRuleConfig {
            task_type: TaskType::CodeExecution,
            precedence: vec![Bolt, Clio],
        },
        PrecedenceRuleConfig {
            task_type: TaskType::Planning,
            precedence: vec![Forge, Atlas],
        },
        PrecedenceRuleConfig {
            task_type: TaskType::Building,
            precedence: vec![Atlas, Bolt],
        },
        PrecedenceRuleConfig {
            task_type: TaskType::Linux,
            precedence: vec![Clio, Nexus],
        },
        PrecedenceRuleConfig {
            task_type: TaskType::Testing,
            precedence: vec![Nexus, Atlas, Bolt],
        },
        PrecedenceRuleConfig {
            task_type: TaskType::Review,
            precedence: vec![Forge, Nexus],
        },
        PrecedenceRuleConfig {
            task_type: TaskType::Documentation,
            precedence: vec![Atlas, Forge],
        },
        PrecedenceRuleConfig {
            task_type: TaskType::Debugging,
            precedence: vec![Nexus, Clio],
        },
        PrecedenceRuleConfig {
            task_type: TaskType::Deployment,
            precedence: vec![Clio, Bolt],
        },
        PrecedenceRuleConfig {
            task_type: TaskType::Research,
            precedence: vec![Forge, Atlas],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_builtin_tables() {
        let config = DispatchConfig::default();
        assert_eq!(config.agents.len(), 5);
        assert_eq!(config.keywords.len(), 9);
        assert_eq!(config.rules.len(), 10);
        assert_eq!(config.router.assumed_task_tokens, 10_000);
    }

    #[test]
    fn keyword_table_priority_order() {
        // Declaration order is the classification priority order.
        let table = default_keyword_table();
        assert_eq!(table[0].task_type, TaskType::Building);
        assert_eq!(table[2].task_type, TaskType::Testing);
        assert_eq!(table[3].task_type, TaskType::CodeExecution);
    }

    #[test]
    fn general_never_appears_in_tables() {
        let config = DispatchConfig::default();
        assert!(config.keywords.iter().all(|k| k.task_type != TaskType::General));
        assert!(config.rules.iter().all(|r| r.task_type != TaskType::General));
        for agent in &config.agents {
            assert!(!agent.specialties.contains(&TaskType::General));
            assert!(!agent.capabilities.contains(&TaskType::General));
        }
    }

    #[test]
    fn bolt_is_the_free_agent() {
        let roster = default_roster();
        let bolt = roster.iter().find(|a| a.name == AgentId::Bolt).unwrap();
        assert_eq!(bolt.cost_per_mtok, 0.0);
        assert_eq!(bolt.speed, SpeedTier::VeryFast);
    }

    #[test]
    fn agents_array_deserializes_from_toml() {
        let toml_str = r#"
[[agents]]
name = "atlas"
cost_per_mtok = 1.5
speed = "fast"
specialties = ["building"]

[[agents]]
name = "bolt"
cost_per_mtok = 0.0
speed = "very_fast"
capabilities = ["testing"]
"#;
        let config: DispatchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.agents[0].name, AgentId::Atlas);
        assert_eq!(config.agents[0].specialties, vec![TaskType::Building]);
        assert!(config.agents[0].capabilities.is_empty());
        assert_eq!(config.agents[1].speed, SpeedTier::VeryFast);
    }

    #[test]
    fn agents_deny_unknown_fields() {
        let toml_str = r#"
[[agents]]
name = "atlas"
cost_per_mtok = 1.5
speed = "fast"
availability = "high"
"#;
        assert!(toml::from_str::<DispatchConfig>(toml_str).is_err());
    }

    #[test]
    fn default_precedence_starts_with_forge() {
        // Types without an explicit rule fall through to the orchestrator.
        let config = DispatchConfig::default();
        assert_eq!(config.router.default_precedence[0], AgentId::Forge);
    }
}
