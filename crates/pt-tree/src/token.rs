//! Request path tokenization.
//!
//! Every tree operation that takes a string path goes through
//! [`TokenizedPath::parse`]. The algorithm is fixed so that paths stored by
//! one caller resolve identically for every other caller:
//!
//! 1. Strip a single leading `/`.
//! 2. Split at the last `/` into head and tail (no `/` means no head).
//! 3. The extension is everything from the last `.` of the tail, dot
//!    included, or `""` when the tail has no dot. The rest of the tail is the
//!    final segment.
//! 4. The head, split on `/`, gives the intermediate segments.
//!
//! ```
//! use pt_tree::TokenizedPath;
//!
//! let tokens = TokenizedPath::parse("/blog/posts/hello.html");
//! assert_eq!(tokens.segments(), ["blog", "posts", "hello"]);
//! assert_eq!(tokens.extension(), ".html");
//! ```

/// Path delimiter.
pub const DELIMITER: char = '/';

/// Error returned by [`TokenizedPath::parse_strict`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path names neither a segment nor an extension (`""`, `"/"`).
    #[error("path is empty")]
    Empty,
    /// The path contains an empty segment (`"a//b"`, `"blog/"`).
    #[error("empty segment at position {index} in path {path:?}")]
    EmptySegment {
        /// Original path.
        path: String,
        /// Zero-based segment position.
        index: usize,
    },
}

/// A path split into segments and a trailing extension.
///
/// The last element of [`segments`](Self::segments) is the final filename
/// without its extension. Segments may be empty for degenerate input; tree
/// operations skip empty segments, so `""` and `"/"` address the root. The
/// one exception is an empty final segment followed by an extension: a
/// dotfile such as `"/a/.env"` lives in a child of `a` named `""`, so it
/// never collides with `"/a.env"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedPath<'a> {
    segments: Vec<&'a str>,
    extension: &'a str,
}

impl<'a> TokenizedPath<'a> {
    /// Tokenize a raw request path. Never fails.
    #[must_use]
    pub fn parse(path: &'a str) -> Self {
        let path = path.strip_prefix(DELIMITER).unwrap_or(path);

        let (head, tail) = match path.rsplit_once(DELIMITER) {
            Some((head, tail)) => (Some(head), tail),
            None => (None, path),
        };

        let (name, extension) = match tail.rfind('.') {
            Some(dot) => tail.split_at(dot),
            None => (tail, ""),
        };

        let mut segments: Vec<&str> = head
            .map(|head| head.split(DELIMITER).collect())
            .unwrap_or_default();
        segments.push(name);

        Self {
            segments,
            extension,
        }
    }

    /// Tokenize a raw request path, rejecting degenerate input.
    ///
    /// An empty final segment is accepted only when an extension follows it,
    /// so dotfiles like `"/.htaccess"` stay addressable.
    pub fn parse_strict(path: &'a str) -> Result<Self, PathError> {
        let tokens = Self::parse(path);

        if tokens.extension.is_empty() && tokens.segments.iter().all(|s| s.is_empty()) {
            return Err(PathError::Empty);
        }

        let last = tokens.segments.len() - 1;
        for (index, segment) in tokens.segments.iter().enumerate() {
            let allowed = index == last && !tokens.extension.is_empty();
            if segment.is_empty() && !allowed {
                return Err(PathError::EmptySegment {
                    path: path.to_owned(),
                    index,
                });
            }
        }

        Ok(tokens)
    }

    /// Build from segments that were already split by the caller.
    ///
    /// `extension` is taken as is; pass `".html"` or `""`.
    #[must_use]
    pub fn from_parts(segments: Vec<&'a str>, extension: &'a str) -> Self {
        Self {
            segments,
            extension,
        }
    }

    /// All segments, the final filename last. May contain empty strings.
    #[must_use]
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Extension including its leading dot, or `""`.
    #[must_use]
    pub fn extension(&self) -> &'a str {
        self.extension
    }

    /// Segments that take part in tree descent.
    ///
    /// Empty segments are dropped, except a final one that carries an
    /// extension.
    pub(crate) fn descent(&self) -> impl Iterator<Item = &'a str> + '_ {
        let last = self.segments.len().saturating_sub(1);
        let dotfile = !self.extension.is_empty();
        self.segments
            .iter()
            .enumerate()
            .filter(move |&(index, s)| !s.is_empty() || (dotfile && index == last))
            .map(|(_, s)| *s)
    }
}
