//! Human-readable report printing
//!
//! Migration scripts are operator tools; their contract is console output,
//! not structured data. Progress goes through tracing, the final summary
//! through plain stdout so it survives any log filtering.

use crate::orchestrator::{AnalyzeReport, MigrationReport};
use crate::schema::cva_descriptive::CvaAnalyzeReport;
use crate::schema::evaluation_system::AllowListAnalyzeReport;

/// Print the summary of a field migration pass
pub fn print_migration_report(label: &str, report: &MigrationReport) {
    println!();
    println!("=== {} migration ===", label);
    println!("Total recipes:  {}", report.total_recipes);
    println!("Migrated:       {}", report.migrated);
    println!("Unmigrated:     {}", report.unmigrated.len());
    for value in &report.unmigrated {
        println!("  - {}", value);
    }
    println!("Errors:         {}", report.errors.len());
    for error in &report.errors {
        println!("  ! {}", error);
    }
}

/// Print the summary of a dry-run analysis
pub fn print_analyze_report(label: &str, report: &AnalyzeReport) {
    println!();
    println!("=== {} analysis (dry run) ===", label);
    println!("Distinct values that can migrate:    {}", report.can_migrate);
    println!(
        "Distinct values that cannot migrate: {}",
        report.cannot_migrate.len()
    );
    for value in &report.cannot_migrate {
        println!("  - '{}'", value);
    }
    if !report.summary.is_empty() {
        println!("Target value summary:");
        for (value, count) in &report.summary {
            println!("  {:>4}  {}", count, value);
        }
    }
    println!("No changes were written.");
}

/// Print the CVA Descriptive schema inspection
pub fn print_cva_analyze_report(report: &CvaAnalyzeReport) {
    println!();
    println!("=== CVA Descriptive schema analysis (dry run) ===");
    if report.legacy_columns.is_empty() {
        println!("No legacy CVA Descriptive columns present; migration already applied.");
    } else {
        println!("Legacy columns present: {}", report.legacy_columns.len());
        for column in &report.legacy_columns {
            println!("  - {}", column);
        }
        println!("Rows with legacy data:  {}", report.rows_with_legacy_data);
    }
    println!(
        "Affective score check:  {}",
        if report.affective_widened {
            "0-100 (widened)"
        } else {
            "0-10 (needs widening)"
        }
    );
    println!("No changes were written.");
}

/// Print the evaluation-system allow-list inspection
pub fn print_allow_list_analyze_report(report: &AllowListAnalyzeReport) {
    println!();
    println!("=== evaluation_system allow-list analysis (dry run) ===");
    println!(
        "Allow-list version: {}",
        if report.already_widened {
            "V2 (includes quick-tasting)"
        } else {
            "V1 (needs widening)"
        }
    );
    if !report.system_counts.is_empty() {
        println!("Rows per evaluation system:");
        for (system, count) in &report.system_counts {
            println!("  {:>4}  {}", count, system);
        }
    }
    println!("No changes were written.");
}
