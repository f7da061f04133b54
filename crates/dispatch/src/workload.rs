// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dispatch workload` command implementation.
//!
//! Shows how many routes each agent has received, busiest first.

use std::io::IsTerminal;
use std::process::ExitCode;

use dispatch_core::AgentId;
use dispatch_router::TaskRouter;

/// Run the `dispatch workload` command.
pub fn run(router: &TaskRouter, json: bool, plain: bool) -> ExitCode {
    let workload = router.workload();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&workload).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_workload(&sorted_by_count(workload.into_iter()), use_color);
    }

    ExitCode::SUCCESS
}

/// Sort agents by route count, busiest first; count ties break on the
/// roster declaration order so output stays stable.
fn sorted_by_count(workload: impl Iterator<Item = (AgentId, u64)>) -> Vec<(AgentId, u64)> {
    let mut entries: Vec<_> = workload.collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries
}

fn print_workload(entries: &[(AgentId, u64)], use_color: bool) {
    println!();
    println!("  current workload");
    println!("  {}", "-".repeat(35));

    if entries.is_empty() {
        println!("    (no routes recorded yet)");
    }

    for (agent, count) in entries {
        if use_color {
            use colored::Colorize;
            println!("    {}: {count} tasks", agent.to_string().cyan());
        } else {
            println!("    {agent}: {count} tasks");
        }
    }
    println!();
}
