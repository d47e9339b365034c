//! `vbasync export` — materialize the live project's components on disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use vbasync_sync::SyncOptions;

use super::print_report;
use crate::host;
use crate::HostAppArg;

/// Arguments for `vbasync export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to the target document (e.g. Book1.xlsm).
    #[arg(long)]
    pub document: PathBuf,

    /// Directory for the exported .bas/.cls/.frm files.
    #[arg(long)]
    pub out: PathBuf,

    /// Office host application.
    #[arg(long, default_value = "excel")]
    pub app: HostAppArg,
}

impl ExportArgs {
    pub fn run(self) -> Result<()> {
        let mut session = host::open_session(self.app.into(), &self.document)
            .with_context(|| format!("cannot open '{}'", self.document.display()))?;

        let report = vbasync_sync::pull(session.as_mut(), &self.out, SyncOptions::default())
            .with_context(|| format!("export failed for '{}'", self.document.display()))?;

        print_report(
            &format!("exported to {}", self.out.display()),
            &report,
        );
        Ok(())
    }
}
