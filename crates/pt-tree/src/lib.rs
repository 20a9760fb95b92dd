//! Path tree of site resources.
//!
//! This crate provides:
//! - [`PathTree`]: hierarchy of nodes keyed by `/`-delimited path segments
//! - [`FormatSet`]: per-node format variants keyed by extension
//! - [`TokenizedPath`]: the path tokenizer shared by every operation
//!
//! A site generator registers each discovered file with [`PathTree::add`]
//! and answers request paths with [`PathTree::get`] and
//! [`PathTree::get_resource`]. Misses are reported as `None`.
//!
//! # Quick Start
//!
//! ```
//! use pt_tree::{PathTree, Removal};
//!
//! let mut tree = PathTree::new();
//! tree.add("/blog/posts/hello.html", "hello.typ");
//! tree.add("/blog/posts/hello.json", "hello.typ");
//! tree.add("/blog/posts/world.html", "world.typ");
//!
//! let hello = tree.get("/blog/posts/hello").unwrap();
//! assert_eq!(hello.siblings().map(|n| n.name()).collect::<Vec<_>>(), ["world"]);
//! assert_eq!(hello.formats().len(), 2);
//!
//! let world = tree.get("/blog/posts/world").unwrap().id();
//! assert_eq!(tree.remove(world), Removal::Pruned);
//! assert!(tree.get_resource("/blog/posts/world.html").is_none());
//! ```
//!
//! # Concurrency
//!
//! The tree has no internal locking. Mutation needs `&mut PathTree`, so the
//! borrow checker already rules out mutation during a traversal. Hosts that
//! share a tree between threads wrap the whole tree in a lock.

mod formats;
mod snapshot;
mod token;
mod traverse;
mod tree;

pub use formats::{FormatSet, FormatVariant};
pub use snapshot::{FormatSnapshot, NodeSnapshot};
pub use token::{DELIMITER, PathError, TokenizedPath};
pub use traverse::{Ancestors, Resources};
pub use tree::{Node, NodeId, PathTree, Removal, Resource};
