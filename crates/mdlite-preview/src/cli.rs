use std::path::PathBuf;

use clap::{Parser, ValueHint};

use crate::telemetry::LogFormat;

/// Command-line arguments for the preview binary.
#[derive(Debug, Parser)]
#[command(
    name = "mdlite-preview",
    version,
    about = "Render a Markdown document to a static HTML preview page"
)]
pub struct CliArgs {
    /// Path or HTTP(S) URL of the document to render.
    #[arg(
        env = "MDLITE_SOURCE",
        default_value = "input.md",
        value_hint = ValueHint::AnyPath
    )]
    pub source: String,

    /// Write the page here instead of stdout.
    #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Leave the raw-source pane out of the page.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub hide_source: bool,

    /// Fail instead of substituting the embedded document.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_fallback: bool,

    /// Spaces per expanded tab.
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(usize))]
    pub tab_width: usize,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, env = "MDLITE_LOG_FORMAT")]
    pub log_format: LogFormat,
}
