//! `pt ls` command implementation.

use std::path::PathBuf;

use clap::Args;
use pt_config::OutputFormat;
use pt_tree::{Node, PathTree};
use serde::Serialize;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the ls command.
#[derive(Args)]
pub(crate) struct LsArgs {
    /// Node path (extension is ignored).
    #[arg(default_value = "/")]
    path: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Neighbourhood of one node, as node paths.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct Listing {
    path: String,
    formats: Vec<String>,
    children: Vec<String>,
    siblings: Vec<String>,
    parents: Vec<String>,
}

impl LsArgs {
    /// Execute the ls command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (config, tree) = self.source.load(output)?;
        let listing = list(&tree, &self.path)?;

        match config.output.format {
            OutputFormat::Text => {
                let mut text = format!("{}\n", output.heading(&listing.path));
                for (title, entries) in [
                    ("formats", &listing.formats),
                    ("children", &listing.children),
                    ("siblings", &listing.siblings),
                    ("parents", &listing.parents),
                ] {
                    if entries.is_empty() {
                        continue;
                    }
                    text.push_str(&format!("{title}:\n"));
                    for entry in entries {
                        text.push_str(&format!("  {entry}\n"));
                    }
                }
                output.result(&text);
            }
            OutputFormat::Json => {
                output.result(&format!("{}\n", serde_json::to_string_pretty(&listing)?));
            }
        }
        Ok(())
    }
}

fn paths<'a>(nodes: impl Iterator<Item = Node<'a, PathBuf>>) -> Vec<String> {
    nodes.map(|node| node.path()).collect()
}

fn list(tree: &PathTree<PathBuf>, path: &str) -> Result<Listing, CliError> {
    let node = tree
        .get(path)
        .ok_or_else(|| CliError::NotFound(path.to_owned()))?;

    Ok(Listing {
        path: node.path(),
        formats: node
            .formats()
            .extensions()
            .filter_map(|ext| node.resource(ext))
            .map(|r| r.request_path())
            .collect(),
        children: paths(node.children()),
        siblings: paths(node.siblings()),
        parents: paths(node.parents()),
    })
}
