//! `vbasync ribbon pull|push` — round-trip the ribbon customization XML.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use vbasync_package::{pull_ribbon, push_ribbon};

/// Read/write the custom ribbon XML embedded in the document package.
#[derive(Subcommand, Debug)]
pub enum RibbonCommand {
    /// Extract the ribbon XML from the document package.
    Pull(RibbonPullArgs),

    /// Inject a ribbon XML file into the document package.
    Push(RibbonPushArgs),
}

#[derive(Args, Debug)]
pub struct RibbonPullArgs {
    /// Path to the document or add-in package.
    #[arg(long)]
    pub document: PathBuf,

    /// Path for the extracted XML file.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct RibbonPushArgs {
    /// Path to the document or add-in package.
    #[arg(long)]
    pub document: PathBuf,

    /// Path to the ribbon XML file to inject.
    #[arg(long)]
    pub xml: PathBuf,

    /// Optional output package path. Updates --document in place if omitted.
    #[arg(long)]
    pub out_document: Option<PathBuf>,

    /// Override target part name under customUI/.
    #[arg(long)]
    pub target: Option<String>,
}

pub fn run(cmd: RibbonCommand) -> Result<()> {
    match cmd {
        RibbonCommand::Pull(args) => {
            let out = pull_ribbon(&args.document, &args.out).with_context(|| {
                format!("ribbon pull failed for '{}'", args.document.display())
            })?;
            println!("Extracted ribbon XML to {}", out.display());
            Ok(())
        }
        RibbonCommand::Push(args) => {
            let out = push_ribbon(
                &args.document,
                &args.xml,
                args.out_document.as_deref(),
                args.target.as_deref(),
            )
            .with_context(|| format!("ribbon push failed for '{}'", args.document.display()))?;
            println!("Injected ribbon XML into {}", out.display());
            Ok(())
        }
    }
}
