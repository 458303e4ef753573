//! Filesystem probe command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use sedge_converter::FsProbe;
use sedge_core::result::AppResult;

/// Arguments for the probe command
#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Paths to check
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Filesystem checks for one path
#[derive(Debug, Serialize, Tabled)]
pub struct ProbeRow {
    /// Probed path
    #[tabled(rename = "Path")]
    pub path: String,
    /// Regular file exists
    #[tabled(rename = "File")]
    pub file: String,
    /// Containing directory exists
    #[tabled(rename = "Dir")]
    pub dir: String,
    /// Readable by this process
    #[tabled(rename = "Readable")]
    pub readable: String,
    /// Writable by this process
    #[tabled(rename = "Writable")]
    pub writable: String,
    /// Some ancestor below the root is writable
    #[tabled(rename = "Writable Ancestor")]
    pub writable_ancestor: String,
    /// Extension without the dot
    #[tabled(rename = "Extension")]
    pub extension: String,
}

impl ProbeRow {
    fn probe(path: &std::path::Path) -> Self {
        Self {
            path: path.display().to_string(),
            file: output::yes_no(FsProbe::file_exists(path)),
            dir: output::yes_no(FsProbe::dir_exists(path)),
            readable: output::yes_no(FsProbe::is_readable(path)),
            writable: output::yes_no(FsProbe::is_writable(path)),
            writable_ancestor: output::yes_no(FsProbe::is_writable_any_dir(path)),
            extension: FsProbe::extension(path).unwrap_or_default(),
        }
    }
}

/// Execute the probe command
pub fn execute(args: &ProbeArgs, format: OutputFormat) -> AppResult<()> {
    let rows: Vec<ProbeRow> = args.paths.iter().map(|path| ProbeRow::probe(path)).collect();
    output::print_list(&rows, format);
    Ok(())
}
