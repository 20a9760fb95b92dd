//! `pt resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use pt_config::OutputFormat;
use pt_tree::PathTree;
use serde::Serialize;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Request path to resolve (e.g., /blog/hello.html).
    request_path: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Resolution result.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Resolved {
    request_path: String,
    source: PathBuf,
    /// Request paths of every format of the same node, this one included.
    formats: Vec<String>,
}

impl ResolveArgs {
    /// Execute the resolve command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (config, tree) = self.source.load(output)?;
        let resolved = resolve(&tree, &self.request_path)?;

        match config.output.format {
            OutputFormat::Text => {
                let mut text = format!(
                    "{} -> {}\n",
                    resolved.request_path,
                    resolved.source.display()
                );
                for format in resolved.formats.iter().filter(|f| **f != resolved.request_path) {
                    text.push_str(&format!("  also: {format}\n"));
                }
                output.result(&text);
            }
            OutputFormat::Json => {
                output.result(&format!("{}\n", serde_json::to_string_pretty(&resolved)?));
            }
        }
        Ok(())
    }
}

fn resolve(tree: &PathTree<PathBuf>, request_path: &str) -> Result<Resolved, CliError> {
    let resource = tree
        .get_resource(request_path)
        .ok_or_else(|| CliError::NotFound(request_path.to_owned()))?;

    let node = resource.node();
    let formats = node
        .formats()
        .extensions()
        .filter_map(|ext| node.resource(ext))
        .map(|r| r.request_path())
        .collect();

    Ok(Resolved {
        request_path: resource.request_path(),
        source: resource.asset().clone(),
        formats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_hit_lists_formats() {
        let mut tree = PathTree::new();
        tree.add("/blog/hello.html", PathBuf::from("/src/blog/hello.html"));
        tree.add("/blog/hello.json", PathBuf::from("/src/blog/hello.json"));

        let resolved = resolve(&tree, "blog/hello.json").unwrap();

        assert_eq!(
            resolved,
            Resolved {
                request_path: "/blog/hello.json".to_owned(),
                source: PathBuf::from("/src/blog/hello.json"),
                formats: vec!["/blog/hello.html".to_owned(), "/blog/hello.json".to_owned()],
            }
        );
    }

    #[test]
    fn test_resolve_miss() {
        let mut tree = PathTree::new();
        tree.add("/blog/hello.html", PathBuf::from("/src/blog/hello.html"));

        let result = resolve(&tree, "/blog/hello.xml");

        assert!(matches!(result, Err(CliError::NotFound(path)) if path == "/blog/hello.xml"));
    }

    #[test]
    fn test_resolved_json_shape() {
        let resolved = Resolved {
            request_path: "/a.html".to_owned(),
            source: PathBuf::from("/src/a.html"),
            formats: vec!["/a.html".to_owned()],
        };

        let value = serde_json::to_value(&resolved).unwrap();

        assert_eq!(value["requestPath"], "/a.html");
        assert_eq!(value["source"], "/src/a.html");
    }
}
