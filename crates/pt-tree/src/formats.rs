//! Format variants stored at a single tree node.

use std::borrow::Cow;

/// One renderable variant of a resource, keyed by extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatVariant<A> {
    extension: String,
    asset: A,
}

impl<A> FormatVariant<A> {
    /// Extension with its leading dot (`".html"`), or `""` for extensionless.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Extension without the dot (`"html"`), or `""`.
    #[must_use]
    pub fn format(&self) -> &str {
        self.extension.strip_prefix('.').unwrap_or(&self.extension)
    }

    /// The opaque asset registered for this variant.
    #[must_use]
    pub fn asset(&self) -> &A {
        &self.asset
    }
}

/// Set of format variants with unique extensions.
///
/// Variants keep the order in which their extension was first added.
/// Adding an extension that is already present replaces its asset in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatSet<A> {
    variants: Vec<FormatVariant<A>>,
}

impl<A> Default for FormatSet<A> {
    fn default() -> Self {
        Self {
            variants: Vec::new(),
        }
    }
}

/// Accept both `"html"` and `".html"`.
fn normalize(extension: &str) -> Cow<'_, str> {
    if extension.is_empty() || extension.starts_with('.') {
        Cow::Borrowed(extension)
    } else {
        Cow::Owned(format!(".{extension}"))
    }
}

impl<A> FormatSet<A> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `asset` under `extension`, replacing any existing variant.
    ///
    /// Returns the replaced asset, if there was one.
    pub fn add(&mut self, asset: A, extension: &str) -> Option<A> {
        let extension = normalize(extension);
        if let Some(variant) = self
            .variants
            .iter_mut()
            .find(|v| v.extension == *extension)
        {
            return Some(std::mem::replace(&mut variant.asset, asset));
        }

        self.variants.push(FormatVariant {
            extension: extension.into_owned(),
            asset,
        });
        None
    }

    /// Exact-match lookup by extension.
    #[must_use]
    pub fn ext(&self, extension: &str) -> Option<&FormatVariant<A>> {
        let extension = normalize(extension);
        self.variants.iter().find(|v| v.extension == *extension)
    }

    /// Remove every variant.
    pub fn clear(&mut self) {
        self.variants.clear();
    }

    /// Iterate over variants in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, FormatVariant<A>> {
        self.variants.iter()
    }

    /// Extensions present in this set, dot included.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(FormatVariant::extension)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl<'a, A> IntoIterator for &'a FormatSet<A> {
    type Item = &'a FormatVariant<A>;
    type IntoIter = std::slice::Iter<'a, FormatVariant<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_and_lookup() {
        let mut formats = FormatSet::new();
        formats.add("page", ".html");

        let variant = formats.ext(".html").unwrap();
        assert_eq!(*variant.asset(), "page");
        assert_eq!(variant.extension(), ".html");
        assert_eq!(variant.format(), "html");
    }

    #[test]
    fn test_add_replaces_existing_extension() {
        let mut formats = FormatSet::new();
        assert_eq!(formats.add("first", ".html"), None);
        formats.add("data", ".json");

        let replaced = formats.add("second", ".html");

        assert_eq!(replaced, Some("first"));
        assert_eq!(formats.len(), 2);
        assert_eq!(*formats.ext(".html").unwrap().asset(), "second");
        assert_eq!(formats.extensions().collect::<Vec<_>>(), [".html", ".json"]);
    }

    #[test]
    fn test_ext_accepts_bare_format_name() {
        let mut formats = FormatSet::new();
        formats.add(1, "json");

        assert_eq!(formats.ext("json").map(FormatVariant::asset), Some(&1));
        assert_eq!(formats.ext(".json").map(FormatVariant::asset), Some(&1));
    }

    #[test]
    fn test_extensionless_variant() {
        let mut formats = FormatSet::new();
        formats.add("raw", "");

        let variant = formats.ext("").unwrap();
        assert_eq!(variant.extension(), "");
        assert_eq!(variant.format(), "");
        assert!(formats.ext(".html").is_none());
    }

    #[test]
    fn test_ext_miss_returns_none() {
        let formats: FormatSet<()> = FormatSet::new();

        assert!(formats.ext(".html").is_none());
    }

    #[test]
    fn test_clear_removes_all_variants() {
        let mut formats = FormatSet::new();
        formats.add(1, ".html");
        formats.add(2, ".json");

        formats.clear();

        assert!(formats.is_empty());
        assert!(formats.ext(".html").is_none());
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut formats = FormatSet::new();
        formats.add(1, ".html");
        formats.add(2, ".json");

        let first: Vec<_> = formats.iter().map(|v| *v.asset()).collect();
        let second: Vec<_> = (&formats).into_iter().map(|v| *v.asset()).collect();

        assert_eq!(first, [1, 2]);
        assert_eq!(first, second);
    }
}
