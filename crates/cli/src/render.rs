//! Human-readable, coloured rendering of resolver results.

use ar_core::batching::DeploymentBatches;
use ar_protocol::breaking_models::{BreakingChangesResult, Severity};
use ar_protocol::resolution_models::{ValidationResult, VersionConflict};
use colored::Colorize;

fn heading(title: &str, count: usize) {
    println!("\n{} ({count})", title.bold());
}

pub fn validation(result: &ValidationResult, agent_count: usize) {
    if result.valid {
        println!("{} {agent_count} agent(s) validated, no problems found", "✓".green().bold());
    } else {
        println!(
            "{} validation failed with {} finding(s) across {agent_count} agent(s)",
            "✗".red().bold(),
            result.finding_count()
        );
    }

    if !result.conflicts.is_empty() {
        heading("Version conflicts", result.conflicts.len());
        conflict_lines(&result.conflicts);
    }

    if !result.circular_dependencies.is_empty() {
        heading("Circular dependencies", result.circular_dependencies.len());
        for circular in &result.circular_dependencies {
            println!("  {} {}", "•".red(), circular.cycle.join(" -> "));
        }
    }

    if !result.missing_dependencies.is_empty() {
        heading("Missing dependencies", result.missing_dependencies.len());
        for missing in &result.missing_dependencies {
            println!(
                "  {} {} requires {}@{}",
                "•".red(),
                missing.agent.bold(),
                missing.dependency,
                missing.version
            );
        }
    }

    if !result.contract_violations.is_empty() {
        heading("Contract violations", result.contract_violations.len());
        for violation in &result.contract_violations {
            println!(
                "  {} {} -> {}: {}",
                "•".red(),
                violation.agent.bold(),
                violation.dependency,
                violation.violation
            );
        }
    }

    if !result.warnings.is_empty() {
        heading("Warnings", result.warnings.len());
        for warning in &result.warnings {
            println!("  {} {}: {}", "!".yellow().bold(), warning.agent.bold(), warning.message);
        }
    }
}

pub fn conflicts(conflicts: &[VersionConflict]) {
    if conflicts.is_empty() {
        println!("{} no version conflicts", "✓".green().bold());
        return;
    }
    println!("{} {} version conflict(s)", "✗".red().bold(), conflicts.len());
    conflict_lines(conflicts);
}

fn conflict_lines(conflicts: &[VersionConflict]) {
    for conflict in conflicts {
        println!("  {} {}: {}", "•".red(), conflict.dependency.bold(), conflict.reason);
        for requirement in &conflict.requirements {
            println!("      {} (required by {})", requirement.version, requirement.required_by);
        }
    }
}

pub fn batches(batches: &DeploymentBatches) {
    if batches.is_empty() {
        println!("No agents to deploy");
        return;
    }
    for (index, batch) in batches.iter().enumerate() {
        let names: Vec<&str> = batch.iter().map(String::as_str).collect();
        println!("{} {}", format!("Batch {}:", index + 1).cyan().bold(), names.join(", "));
    }
}

pub fn breaking_changes(result: &BreakingChangesResult) {
    let summary = if result.has_breaking_changes {
        result.summary.red().bold()
    } else if result.changes.is_empty() {
        result.summary.green().bold()
    } else {
        result.summary.yellow().bold()
    };
    println!("{summary}");

    for change in &result.changes {
        let severity = match change.severity {
            Severity::Major => change.severity.to_string().red(),
            Severity::Minor => change.severity.to_string().yellow(),
        };
        println!(
            "  [{severity}] {} {}: {}",
            change.change_type,
            change.resource.bold(),
            change.description
        );
    }
}
