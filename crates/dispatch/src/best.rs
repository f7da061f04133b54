// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dispatch best` command implementation.
//!
//! Reports the quality-mode selection for a task type without recording
//! anything in the counters file. Unknown labels are the one user-facing
//! error path: a clear message listing the closed set and a non-zero
//! exit.

use std::process::ExitCode;
use std::str::FromStr;

use dispatch_core::{DispatchError, TaskType};
use dispatch_router::TaskRouter;
use serde::Serialize;
use strum::VariantNames;

/// Structured output for `--json` mode.
#[derive(Debug, Serialize)]
struct BestResponse {
    task_type: TaskType,
    agent: dispatch_core::AgentId,
    capable_agents: Vec<dispatch_core::AgentId>,
}

/// Run the `dispatch best` command.
pub fn run(router: &TaskRouter, task_type: &str, json: bool) -> ExitCode {
    let task_type = match parse_task_type(task_type) {
        Ok(task_type) => task_type,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let agent = router.best_agent(task_type);

    if json {
        let resp = BestResponse {
            task_type,
            agent,
            capable_agents: router.capable_agents(task_type),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&resp).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        println!("Best agent for '{task_type}': {agent}");
    }

    ExitCode::SUCCESS
}

/// Parse a task-type label, listing the closed set on failure.
fn parse_task_type(name: &str) -> Result<TaskType, DispatchError> {
    TaskType::from_str(name).map_err(|_| DispatchError::UnknownTaskType {
        name: name.to_string(),
        valid: TaskType::VARIANTS.join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_parse() {
        assert_eq!(parse_task_type("testing").unwrap(), TaskType::Testing);
        assert_eq!(
            parse_task_type("code_execution").unwrap(),
            TaskType::CodeExecution
        );
        assert_eq!(parse_task_type("deployment").unwrap(), TaskType::Deployment);
    }

    #[test]
    fn unknown_label_lists_valid_types() {
        let err = parse_task_type("cooking").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`cooking`"));
        assert!(msg.contains("building"));
        assert!(msg.contains("general"));
    }
}
