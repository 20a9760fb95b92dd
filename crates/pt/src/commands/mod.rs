//! CLI command implementations.

pub(crate) mod ls;
pub(crate) mod resolve;
pub(crate) mod tree;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use pt_config::{CliSettings, Config, OutputFormat};
use pt_scan::Scanner;
use pt_tree::PathTree;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use ls::LsArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use tree::TreeArgs;

/// Output format selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Arguments shared by every command that loads a source tree.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover pathtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Include hidden files (overrides config).
    #[arg(long)]
    hidden: bool,

    /// Output format (overrides config).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SourceArgs {
    /// Load config and scan the source directory into a tree.
    pub(crate) fn load(&self, output: &Output) -> Result<(Config, PathTree<PathBuf>), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            include_hidden: self.hidden.then_some(true),
            format: self.format.map(OutputFormat::from),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source directory: {}",
            config.source_resolved.dir.display()
        ));

        let tree = Scanner::from_config(&config.source_resolved)?.load()?;
        Ok((config, tree))
    }
}
