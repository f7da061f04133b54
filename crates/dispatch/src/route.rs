// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dispatch route` command implementation.
//!
//! Routes a free-text description through the decision engine and prints
//! the decision, either human-readable (with optional color) or as JSON
//! for scripting.

use std::io::IsTerminal;
use std::process::ExitCode;

use dispatch_core::OptimizeFor;
use dispatch_router::{RoutingDecision, TaskRouter};

/// Run the `dispatch route` command.
pub fn run(
    router: &TaskRouter,
    description: &str,
    optimize: OptimizeFor,
    json: bool,
    plain: bool,
) -> ExitCode {
    let decision = router.route(description, optimize);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&decision).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_decision(&decision, optimize, use_color);
    }

    ExitCode::SUCCESS
}

/// Format an estimated cost the way the roster talks about it: free
/// agents are FREE, everyone else is dollars.
fn format_cost(cost_usd: f64) -> String {
    if cost_usd == 0.0 {
        "FREE".to_string()
    } else {
        format!("${cost_usd:.4}")
    }
}

fn print_decision(decision: &RoutingDecision, optimize: OptimizeFor, use_color: bool) {
    println!();
    println!("  routing decision ({optimize})");
    println!("  {}", "-".repeat(35));
    println!(
        "    Task type:  {} ({:.0}% confidence)",
        decision.task_type,
        decision.confidence * 100.0
    );

    if use_color {
        use colored::Colorize;
        println!(
            "    Primary:    {}",
            decision.primary_agent.to_string().green().bold()
        );
    } else {
        println!("    Primary:    {}", decision.primary_agent);
    }

    match decision.fallback_agent {
        Some(fallback) => println!("    Fallback:   {fallback}"),
        None => println!("    Fallback:   (none)"),
    }
    println!("    Est. cost:  {}", format_cost(decision.estimated_cost_usd));
    println!("    Reason:     {}", decision.reason);

    if !decision.alternative_agents.is_empty() {
        let alts: Vec<String> = decision
            .alternative_agents
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("    Also able:  {}", alts.join(", "));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cost_formats_as_free() {
        assert_eq!(format_cost(0.0), "FREE");
    }

    #[test]
    fn nonzero_cost_formats_as_dollars() {
        assert_eq!(format_cost(0.03), "$0.0300");
        assert_eq!(format_cost(0.15), "$0.1500");
    }
}
