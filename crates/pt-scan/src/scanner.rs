//! Source file discovery by filesystem walking.
//!
//! Discovery is separate from registration: the [`Scanner`] only lists files
//! and their request paths; [`Scanner::load_into`] then hands each one to the
//! tree.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use pt_tree::{DELIMITER, PathTree};

use crate::ScanError;

/// A file found under the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Request path with leading slash (e.g., "/blog/hello.html").
    pub request_path: String,
    /// Absolute path of the file on disk.
    pub path: PathBuf,
}

/// Walks a source directory and registers its files in a [`PathTree`].
///
/// Entries are visited in file name order so scans are deterministic.
/// Hidden entries (leading `.`) are skipped unless enabled.
#[derive(Debug)]
pub struct Scanner {
    source_dir: PathBuf,
    exclude: Vec<Pattern>,
    include_hidden: bool,
}

impl Scanner {
    /// Create a scanner for `source_dir` with no exclusions.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            source_dir,
            exclude: Vec::new(),
            include_hidden: false,
        }
    }

    /// Skip files whose path relative to the source directory matches any of
    /// `patterns`.
    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self, ScanError> {
        self.exclude = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| ScanError::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Register dotfiles and descend into dot-directories.
    #[must_use]
    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// List every source file.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::NotFound` if the source directory does not exist
    /// and `ScanError::Io` if it cannot be read. Unreadable subdirectories
    /// are skipped with a warning.
    pub fn scan(&self) -> Result<Vec<SourceFile>, ScanError> {
        if !self.source_dir.is_dir() {
            return Err(ScanError::NotFound(self.source_dir.clone()));
        }

        let entries = fs::read_dir(&self.source_dir).map_err(|source| ScanError::Io {
            path: self.source_dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        self.scan_entries(entries, Path::new(""), &mut files);

        tracing::debug!(
            source_dir = %self.source_dir.display(),
            file_count = files.len(),
            "Source scan completed"
        );
        Ok(files)
    }

    /// Scan and register every file into `tree`, using the file's path on
    /// disk as the asset. Returns the number of files registered.
    pub fn load_into(&self, tree: &mut PathTree<PathBuf>) -> Result<usize, ScanError> {
        let files = self.scan()?;
        let count = files.len();
        for file in files {
            tree.add(&file.request_path, file.path);
        }

        tracing::info!(
            source_dir = %self.source_dir.display(),
            file_count = count,
            node_count = tree.node_count(),
            "Loaded source tree"
        );
        Ok(count)
    }

    /// Scan into a fresh tree.
    pub fn load(&self) -> Result<PathTree<PathBuf>, ScanError> {
        let mut tree = PathTree::new();
        self.load_into(&mut tree)?;
        Ok(tree)
    }

    fn scan_entries(&self, entries: fs::ReadDir, rel_dir: &Path, files: &mut Vec<SourceFile>) {
        // Collect entries with cached file_type to avoid repeated stat calls
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e, is_dir)
            })
            .collect();
        entries.sort_by_key(|(e, _)| e.file_name());

        for (entry, is_dir) in entries {
            let name = entry.file_name();
            if !self.include_hidden && name.to_string_lossy().starts_with('.') {
                continue;
            }

            let rel_path = rel_dir.join(&name);
            if self.is_excluded(&rel_path) {
                tracing::debug!(path = %rel_path.display(), "Excluded by pattern");
                continue;
            }

            let path = entry.path();
            if is_dir {
                match fs::read_dir(&path) {
                    Ok(children) => self.scan_entries(children, &rel_path, files),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to read directory");
                    }
                }
            } else {
                files.push(SourceFile {
                    request_path: file_path_to_request(&rel_path),
                    path,
                });
            }
        }
    }

    fn is_excluded(&self, rel_path: &Path) -> bool {
        self.exclude.iter().any(|p| p.matches_path(rel_path))
    }
}

/// Convert a path relative to the source directory into a request path.
///
/// Examples:
/// - `index.html` -> `"/index.html"`
/// - `blog/hello.html` -> `"/blog/hello.html"`
/// - `LICENSE` -> `"/LICENSE"`
pub(crate) fn file_path_to_request(rel_path: &Path) -> String {
    let mut request = String::new();
    for component in rel_path.components() {
        request.push(DELIMITER);
        request.push_str(&component.as_os_str().to_string_lossy());
    }
    if request.is_empty() {
        request.push(DELIMITER);
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_dir() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("index.html"), "<h1>Home</h1>").unwrap();
        fs::create_dir_all(root.join("blog/posts")).unwrap();
        fs::write(root.join("blog/posts/hello.html"), "hello").unwrap();
        fs::write(root.join("blog/posts/hello.json"), "{}").unwrap();
        fs::write(root.join("blog/about.html"), "about").unwrap();
        fs::create_dir_all(root.join("drafts")).unwrap();
        fs::write(root.join("drafts/wip.html"), "wip").unwrap();
        fs::write(root.join(".htaccess"), "deny").unwrap();
        fs::write(root.join("notes.tmp"), "tmp").unwrap();
        temp_dir
    }

    fn request_paths(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|f| f.request_path.as_str()).collect()
    }

    #[test]
    fn test_file_path_to_request() {
        assert_eq!(file_path_to_request(Path::new("index.html")), "/index.html");
        assert_eq!(
            file_path_to_request(Path::new("blog/posts/hello.html")),
            "/blog/posts/hello.html"
        );
        assert_eq!(file_path_to_request(Path::new("LICENSE")), "/LICENSE");
        assert_eq!(file_path_to_request(Path::new("")), "/");
    }

    #[test]
    fn test_scan_lists_files_sorted() {
        let temp_dir = create_test_dir();
        let scanner = Scanner::new(temp_dir.path().to_path_buf());

        let files = scanner.scan().unwrap();

        assert_eq!(
            request_paths(&files),
            [
                "/blog/about.html",
                "/blog/posts/hello.html",
                "/blog/posts/hello.json",
                "/drafts/wip.html",
                "/index.html",
                "/notes.tmp",
            ]
        );
        assert!(files[0].path.ends_with("blog/about.html"));
    }

    #[test]
    fn test_scan_includes_hidden_when_enabled() {
        let temp_dir = create_test_dir();
        let scanner = Scanner::new(temp_dir.path().to_path_buf()).with_hidden(true);

        let files = scanner.scan().unwrap();

        assert_eq!(request_paths(&files)[0], "/.htaccess");
    }

    #[test]
    fn test_scan_applies_exclude_patterns() {
        let temp_dir = create_test_dir();
        let scanner = Scanner::new(temp_dir.path().to_path_buf())
            .with_exclude(&["*.tmp".to_owned(), "drafts".to_owned()])
            .unwrap();

        let files = scanner.scan().unwrap();

        assert_eq!(
            request_paths(&files),
            [
                "/blog/about.html",
                "/blog/posts/hello.html",
                "/blog/posts/hello.json",
                "/index.html",
            ]
        );
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let result = Scanner::new(PathBuf::from(".")).with_exclude(&["[oops".to_owned()]);

        assert!(matches!(result, Err(ScanError::Pattern { .. })));
    }

    #[test]
    fn test_scan_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing");

        let result = Scanner::new(missing.clone()).scan();

        assert!(matches!(result, Err(ScanError::NotFound(path)) if path == missing));
    }

    #[test]
    fn test_load_builds_tree() {
        let temp_dir = create_test_dir();
        let scanner = Scanner::new(temp_dir.path().to_path_buf());

        let tree = scanner.load().unwrap();

        let hello = tree.get("/blog/posts/hello").unwrap();
        assert_eq!(hello.formats().len(), 2);
        assert_eq!(hello.siblings().count(), 0);
        assert_eq!(hello.parent().unwrap().name(), "posts");

        let resource = tree.get_resource("/blog/posts/hello.json").unwrap();
        assert_eq!(
            *resource.asset(),
            temp_dir.path().join("blog/posts/hello.json")
        );
        assert_eq!(tree.root().resources().count(), 6);
    }

    #[test]
    fn test_load_keeps_nested_dotfile_apart_from_sibling() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("blog/.env"), "SECRET=1").unwrap();
        fs::write(temp_dir.path().join("blog.env"), "page").unwrap();
        let scanner = Scanner::new(temp_dir.path().to_path_buf()).with_hidden(true);

        let tree = scanner.load().unwrap();

        let dotfile = tree.get_resource("/blog/.env").unwrap();
        assert_eq!(*dotfile.asset(), temp_dir.path().join("blog/.env"));
        assert_eq!(dotfile.request_path(), "/blog/.env");
        let page = tree.get_resource("/blog.env").unwrap();
        assert_eq!(*page.asset(), temp_dir.path().join("blog.env"));
    }

    #[test]
    fn test_load_into_existing_tree() {
        let temp_dir = create_test_dir();
        let scanner = Scanner::new(temp_dir.path().to_path_buf());
        let mut tree = PathTree::new();
        tree.add("/generated/feed.xml", PathBuf::from("/virtual/feed.xml"));

        let count = scanner.load_into(&mut tree).unwrap();

        assert_eq!(count, 6);
        assert!(tree.get_resource("/generated/feed.xml").is_some());
        assert!(tree.get_resource("/index.html").is_some());
    }
}
