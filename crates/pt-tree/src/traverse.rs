//! Lazy iterators over a [`PathTree`](crate::PathTree).
//!
//! Both iterators borrow the tree immutably, so the tree cannot be mutated
//! while a traversal is in flight.

use std::iter::FusedIterator;

use crate::formats::FormatVariant;
use crate::tree::{Node, Resource};

/// Ancestor chain of a node, nearest first, root last.
pub struct Ancestors<'a, A> {
    next: Option<Node<'a, A>>,
}

impl<'a, A> Ancestors<'a, A> {
    pub(crate) fn new(start: Option<Node<'a, A>>) -> Self {
        Self { next: start }
    }
}

impl<'a, A> Iterator for Ancestors<'a, A> {
    type Item = Node<'a, A>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent();
        Some(node)
    }
}

impl<A> FusedIterator for Ancestors<'_, A> {}

/// Pre-order traversal of every format variant below a node.
///
/// A node's own variants come first, then its children's subtrees in child
/// order. Uses an explicit stack, so deep trees do not recurse.
pub struct Resources<'a, A> {
    pending: Vec<Node<'a, A>>,
    current: Option<(Node<'a, A>, std::slice::Iter<'a, FormatVariant<A>>)>,
}

impl<'a, A> Resources<'a, A> {
    pub(crate) fn new(start: Node<'a, A>) -> Self {
        Self {
            pending: vec![start],
            current: None,
        }
    }
}

impl<'a, A> Iterator for Resources<'a, A> {
    type Item = Resource<'a, A>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((node, variants)) = &mut self.current
                && let Some(variant) = variants.next()
            {
                return Some(Resource::new(*node, variant));
            }

            let node = self.pending.pop()?;
            let children: Vec<_> = node.children().collect();
            self.pending.extend(children.into_iter().rev());
            self.current = Some((node, node.formats().iter()));
        }
    }
}

impl<A> FusedIterator for Resources<'_, A> {}

#[cfg(test)]
mod tests {
    use crate::PathTree;
    use pretty_assertions::assert_eq;

    fn request_paths<A>(tree: &PathTree<A>, path: &str) -> Vec<String> {
        tree.get(path)
            .unwrap()
            .resources()
            .map(|r| r.request_path())
            .collect()
    }

    #[test]
    fn test_traversal_visits_every_variant_once() {
        let mut tree = PathTree::new();
        let paths = [
            "/index.html",
            "/blog/posts/hello.html",
            "/blog/posts/hello.json",
            "/blog/about.html",
            "/docs/guide.html",
        ];
        for (i, path) in paths.iter().enumerate() {
            tree.add(path, i);
        }

        let mut seen: Vec<_> = tree.root().resources().map(|r| *r.asset()).collect();
        seen.sort_unstable();

        assert_eq!(seen, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_traversal_order_is_self_then_children() {
        let mut tree = PathTree::new();
        tree.add("/blog/zeta.html", ());
        tree.add("/blog.html", ());
        tree.add("/blog/alpha.html", ());
        tree.add("/blog/zeta/deep.html", ());
        tree.add("/docs.html", ());

        assert_eq!(
            request_paths(&tree, "/"),
            [
                "/blog.html",
                "/blog/zeta.html",
                "/blog/zeta/deep.html",
                "/blog/alpha.html",
                "/docs.html",
            ]
        );
    }

    #[test]
    fn test_traversal_is_restartable() {
        let mut tree = PathTree::new();
        tree.add("/a.html", ());
        tree.add("/a/b.html", ());

        let root = tree.root();
        let first: Vec<_> = root.resources().map(|r| r.request_path()).collect();
        let second: Vec<_> = root.resources().map(|r| r.request_path()).collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_traversal_of_subtree_only() {
        let mut tree = PathTree::new();
        tree.add("/a/one.html", ());
        tree.add("/b/two.html", ());

        assert_eq!(request_paths(&tree, "/a"), ["/a/one.html"]);
    }

    #[test]
    fn test_traversal_of_empty_tree() {
        let tree: PathTree<()> = PathTree::new();

        assert_eq!(tree.root().resources().count(), 0);
    }

    #[test]
    fn test_ancestors_from_deep_node() {
        let mut tree = PathTree::new();
        tree.add("/a/b/c/d.html", ());

        let names: Vec<_> = tree
            .get("/a/b/c/d")
            .unwrap()
            .parents()
            .map(|n| n.name())
            .collect();

        assert_eq!(names, ["c", "b", "a", ""]);
    }
}
