//! `pt tree` command implementation.

use std::path::PathBuf;

use clap::Args;
use pt_config::OutputFormat;
use pt_tree::PathTree;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Subtree to print (default: whole tree).
    #[arg(default_value = "/")]
    path: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl TreeArgs {
    /// Execute the tree command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (config, tree) = self.source.load(output)?;
        output.result(&render(&tree, &self.path, config.output.format)?);
        Ok(())
    }
}

/// Render the subtree at `path`.
fn render(tree: &PathTree<PathBuf>, path: &str, format: OutputFormat) -> Result<String, CliError> {
    let node = tree
        .get(path)
        .ok_or_else(|| CliError::NotFound(path.to_owned()))?;

    match format {
        OutputFormat::Text => Ok(node.to_string()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&node.snapshot())?;
            json.push('\n');
            Ok(json)
        }
    }
}
