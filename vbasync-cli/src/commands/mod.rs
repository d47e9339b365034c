//! Subcommand implementations.

pub mod export;
pub mod import;
pub mod ribbon;
pub mod sync;

use colored::Colorize;

use vbasync_sync::{SyncAction, SyncReport};

/// Shared summary printer for export/import/sync.
pub(crate) fn print_report(label: &str, report: &SyncReport) {
    match &report.stats {
        Some(stats) => {
            if report.plan.is_empty() {
                println!("{} {label} — nothing to do", "✓".green());
                return;
            }
            println!(
                "{} {label} ({} added, {} updated, {} removed)",
                "✓".green(),
                stats.added,
                stats.updated,
                stats.removed,
            );
            for action in &report.plan {
                println!("  {}  {}", glyph(action), action.name());
            }
            if stats.already_absent > 0 {
                println!("  ({} remove target(s) already absent)", stats.already_absent);
            }
        }
        None => {
            println!(
                "{} {label}: {} action(s) planned",
                "[dry-run]".yellow(),
                report.plan.len()
            );
            for action in &report.plan {
                println!("  {}  {}", glyph(action), action.name());
            }
            for diff in &report.previews {
                print!("{}", diff.unified_diff);
                if !diff.unified_diff.ends_with('\n') {
                    println!();
                }
            }
        }
    }
}

fn glyph(action: &SyncAction) -> &'static str {
    match action {
        SyncAction::Add(_) => "+",
        SyncAction::Update(_) => "✎",
        SyncAction::Remove(_) => "-",
    }
}
