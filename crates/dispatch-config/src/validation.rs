// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: non-negative costs, non-dangling precedence references,
//! non-empty keyword lists, and the `general` catch-all staying out of
//! the static tables.

use std::collections::HashSet;

use dispatch_core::TaskType;

use crate::diagnostic::ConfigError;
use crate::model::DispatchConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &DispatchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agents.is_empty() {
        errors.push(ConfigError::Validation {
            message: "the [[agents]] roster must not be empty".to_string(),
        });
    }

    // No duplicate agents in the roster.
    let mut seen = HashSet::new();
    for agent in &config.agents {
        if !seen.insert(agent.name) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate agent `{}` in [[agents]] array", agent.name),
            });
        }
    }

    for agent in &config.agents {
        if agent.cost_per_mtok < 0.0 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "agents.{}.cost_per_mtok must be non-negative, got {}",
                    agent.name, agent.cost_per_mtok
                ),
            });
        }
        // `general` is the no-match catch-all, never a capability.
        if agent.specialties.contains(&TaskType::General)
            || agent.capabilities.contains(&TaskType::General)
        {
            errors.push(ConfigError::Validation {
                message: format!(
                    "agents.{} lists `general` as a specialty or capability; \
                     `general` is the no-match label and cannot be assigned",
                    agent.name
                ),
            });
        }
    }

    let roster: HashSet<_> = config.agents.iter().map(|a| a.name).collect();

    // Precedence rules may only reference roster members.
    let mut seen_rules = HashSet::new();
    for rule in &config.rules {
        if !seen_rules.insert(rule.task_type) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate [[rules]] entry for task type `{}`", rule.task_type),
            });
        }
        for agent in &rule.precedence {
            if !roster.contains(agent) {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "rules.{} references agent `{agent}` which is not in the roster",
                        rule.task_type
                    ),
                });
            }
        }
    }

    for agent in &config.router.default_precedence {
        if !roster.contains(agent) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "router.default_precedence references agent `{agent}` \
                     which is not in the roster"
                ),
            });
        }
    }

    // Keyword rules: one per type, each with at least one keyword.
    let mut seen_keywords = HashSet::new();
    for rule in &config.keywords {
        if !seen_keywords.insert(rule.task_type) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate [[keywords]] entry for task type `{}`",
                    rule.task_type
                ),
            });
        }
        if rule.task_type == TaskType::General {
            errors.push(ConfigError::Validation {
                message: "`general` cannot have keywords; it is the no-match label".to_string(),
            });
        }
        if rule.keywords.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("keywords.{} must list at least one keyword", rule.task_type),
            });
        }
    }

    if config.router.assumed_task_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "router.assumed_task_tokens must be at least 1".to_string(),
        });
    }

    if config.stats.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "stats.path must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use dispatch_core::AgentId;

    use super::*;

    #[test]
    fn default_config_validates() {
        let config = DispatchConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn negative_cost_fails_validation() {
        let mut config = DispatchConfig::default();
        config.agents[0].cost_per_mtok = -1.0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("cost_per_mtok"))
        ));
    }

    #[test]
    fn duplicate_agent_fails_validation() {
        let mut config = DispatchConfig::default();
        let clone = config.agents[0].clone();
        config.agents.push(clone);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate agent"))
        ));
    }

    #[test]
    fn dangling_precedence_ref_fails_validation() {
        let mut config = DispatchConfig::default();
        // Drop bolt from the roster while rules still reference it.
        config.agents.retain(|a| a.name != AgentId::Bolt);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("not in the roster"))
        ));
    }

    #[test]
    fn empty_keyword_list_fails_validation() {
        let mut config = DispatchConfig::default();
        config.keywords[0].keywords.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("at least one keyword"))
        ));
    }

    #[test]
    fn general_keywords_fail_validation() {
        let mut config = DispatchConfig::default();
        config.keywords[0].task_type = TaskType::General;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("no-match label"))
        ));
    }

    #[test]
    fn zero_token_budget_fails_validation() {
        let mut config = DispatchConfig::default();
        config.router.assumed_task_tokens = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("assumed_task_tokens"))
        ));
    }

    #[test]
    fn empty_roster_fails_validation() {
        let mut config = DispatchConfig::default();
        config.agents.clear();
        assert!(validate_config(&config).is_err());
    }
}
