//! Filesystem source discovery for pt.
//!
//! This crate provides [`Scanner`], the asset provider that feeds a
//! [`PathTree`](pt_tree::PathTree). It handles:
//!
//! - Recursive directory walking in deterministic order
//! - Hidden file filtering
//! - Glob-based exclusion
//!
//! Every file becomes one format variant: `blog/hello.html` is registered
//! at `/blog/hello.html` with its path on disk as the asset.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use pt_scan::Scanner;
//!
//! let tree = Scanner::new(PathBuf::from("content")).load()?;
//! if let Some(resource) = tree.get_resource("/index.html") {
//!     println!("{}", resource.asset().display());
//! }
//! # Ok(())
//! # }
//! ```

mod scanner;

use std::path::PathBuf;

use pt_config::SourceConfig;

pub use scanner::{Scanner, SourceFile};

/// Scan error.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Source directory could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Invalid exclude pattern.
    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        /// Pattern as given.
        pattern: String,
        /// Underlying error.
        source: glob::PatternError,
    },
}

impl Scanner {
    /// Create a scanner from resolved source configuration.
    pub fn from_config(config: &SourceConfig) -> Result<Self, ScanError> {
        Ok(Self::new(config.dir.clone())
            .with_exclude(&config.exclude)?
            .with_hidden(config.include_hidden))
    }
}
