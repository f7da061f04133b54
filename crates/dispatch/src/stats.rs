// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dispatch stats` command implementation.
//!
//! Read-only projection of the persisted counters: totals, derived
//! average cost, and the per-agent / per-type breakdowns.

use std::io::IsTerminal;
use std::process::ExitCode;

use dispatch_router::TaskRouter;
use dispatch_stats::StatsSummary;

/// Run the `dispatch stats` command.
pub fn run(router: &TaskRouter, json: bool, plain: bool) -> ExitCode {
    let summary = router.stats();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_summary(&summary, use_color);
    }

    ExitCode::SUCCESS
}

fn print_summary(summary: &StatsSummary, use_color: bool) {
    println!();
    println!("  routing statistics");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        println!(
            "    Total routes: {}",
            summary.total_routes.to_string().bold()
        );
    } else {
        println!("    Total routes: {}", summary.total_routes);
    }
    println!("    Total cost:   ${:.4}", summary.total_cost_usd);
    println!("    Avg cost:     ${:.4}", summary.avg_cost_usd);

    if !summary.by_agent.is_empty() {
        println!();
        println!("    By agent:");
        for (agent, count) in &summary.by_agent {
            println!("      {agent}: {count}");
        }
    }

    if !summary.by_task_type.is_empty() {
        println!();
        println!("    By task type:");
        for (task_type, count) in &summary.by_task_type {
            println!("      {task_type}: {count}");
        }
    }
    println!();
}
