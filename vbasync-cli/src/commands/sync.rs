//! `vbasync sync` — pull (live → folder) or push (folder → live).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use vbasync_sync::{ApplyStats, PlanEntry, SyncDirection, SyncOptions, SyncReport};

use super::print_report;
use crate::host;
use crate::{DirectionArg, HostAppArg};

/// Arguments for `vbasync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the target document (e.g. Book1.xlsm).
    #[arg(long)]
    pub document: PathBuf,

    /// Shared source folder for the component files.
    #[arg(long)]
    pub dir: PathBuf,

    /// pull = live project to folder, push = folder to live project.
    #[arg(long)]
    pub direction: DirectionArg,

    /// Office host application.
    #[arg(long, default_value = "excel")]
    pub app: HostAppArg,

    /// Also remove destination components absent from the source.
    #[arg(long)]
    pub clean: bool,

    /// Plan and preview only; apply nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the plan as machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let mut session = host::open_session(self.app.into(), &self.document)
            .with_context(|| format!("cannot open '{}'", self.document.display()))?;

        let opts = SyncOptions {
            clean: self.clean,
            dry_run: self.dry_run,
        };
        let report = match self.direction.0 {
            SyncDirection::Pull => vbasync_sync::pull(session.as_mut(), &self.dir, opts),
            SyncDirection::Push => vbasync_sync::push(&self.dir, session.as_mut(), opts),
        }
        .with_context(|| format!("sync failed for '{}'", self.document.display()))?;

        if self.json {
            println!("{}", render_json(&report)?);
            return Ok(());
        }

        let label = match report.direction {
            SyncDirection::Pull => format!("pulled into {}", self.dir.display()),
            SyncDirection::Push => format!("pushed from {}", self.dir.display()),
        };
        print_report(&label, &report);
        Ok(())
    }
}

#[derive(Serialize)]
struct ReportJson {
    direction: &'static str,
    dry_run: bool,
    plan: Vec<PlanEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<ApplyStats>,
}

fn render_json(report: &SyncReport) -> Result<String> {
    let json = ReportJson {
        direction: match report.direction {
            SyncDirection::Pull => "pull",
            SyncDirection::Push => "push",
        },
        dry_run: report.stats.is_none(),
        plan: report.plan.iter().map(|a| a.summarize()).collect(),
        applied: report.stats,
    };
    serde_json::to_string_pretty(&json).context("failed to serialize sync report")
}
