// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based task classification.
//!
//! Classifies free-text task descriptions against an ordered keyword
//! table using zero-cost substring rules. No model call, no network, no
//! latency.

use dispatch_config::model::KeywordRuleConfig;
use dispatch_core::TaskType;

/// Result of classifying a task description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// The classified task type (`General` when nothing matched).
    pub task_type: TaskType,
    /// Heuristic confidence in [0, 1]; not a probability.
    pub confidence: f32,
    /// How many keyword rules matched at least one keyword.
    pub matched_rules: usize,
}

/// One compiled keyword rule: a task type and its lowercase keywords.
#[derive(Debug, Clone)]
struct KeywordRule {
    task_type: TaskType,
    keywords: Vec<String>,
}

/// Ordered-table keyword classifier.
///
/// Rule order is the classification priority order: the first rule with a
/// match provides the label regardless of how many keywords later rules
/// would match. That keeps classification reproducible and cheap; the
/// table order is part of the configuration contract.
pub struct TaskClassifier {
    rules: Vec<KeywordRule>,
}

impl TaskClassifier {
    /// Build a classifier from the configured keyword table, preserving
    /// table order. Keywords are lowercased once here so `classify` only
    /// does substring scans.
    pub fn new(table: &[KeywordRuleConfig]) -> Self {
        let rules = table
            .iter()
            .map(|rule| KeywordRule {
                task_type: rule.task_type,
                keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// Classify a task description.
    ///
    /// First-match-wins: the earliest rule with at least one keyword
    /// appearing as a substring of the lowercased description provides
    /// the label. Confidence is 1.0 when exactly one rule matched,
    /// `1 / matched_rules` when several did (ambiguity), and 0.0 with the
    /// `General` label when none did.
    pub fn classify(&self, description: &str) -> Classification {
        let lower = description.to_lowercase();

        let mut first_match = None;
        let mut matched_rules = 0usize;

        for rule in &self.rules {
            let hit = rule.keywords.iter().any(|k| lower.contains(k.as_str()));
            if hit {
                matched_rules += 1;
                if first_match.is_none() {
                    first_match = Some(rule.task_type);
                }
            }
        }

        match first_match {
            None => Classification {
                task_type: TaskType::General,
                confidence: 0.0,
                matched_rules: 0,
            },
            Some(task_type) => Classification {
                task_type,
                confidence: 1.0 / matched_rules as f32,
                matched_rules,
            },
        }
    }
}
