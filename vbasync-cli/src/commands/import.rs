//! `vbasync import` — write folder components into the live project.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use vbasync_sync::SyncOptions;

use super::print_report;
use crate::host;
use crate::HostAppArg;

/// Arguments for `vbasync import`.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the target document (e.g. Book1.xlsm).
    #[arg(long)]
    pub document: PathBuf,

    /// Directory containing the .bas/.cls/.frm files to import.
    #[arg(long)]
    pub src: PathBuf,

    /// Office host application.
    #[arg(long, default_value = "excel")]
    pub app: HostAppArg,

    /// Also remove live components not present in --src
    /// (document modules are never touched).
    #[arg(long)]
    pub clean: bool,
}

impl ImportArgs {
    pub fn run(self) -> Result<()> {
        let mut session = host::open_session(self.app.into(), &self.document)
            .with_context(|| format!("cannot open '{}'", self.document.display()))?;

        let opts = SyncOptions {
            clean: self.clean,
            ..Default::default()
        };
        let report = vbasync_sync::push(&self.src, session.as_mut(), opts)
            .with_context(|| format!("import failed for '{}'", self.document.display()))?;

        print_report(
            &format!("imported from {}", self.src.display()),
            &report,
        );
        Ok(())
    }
}
