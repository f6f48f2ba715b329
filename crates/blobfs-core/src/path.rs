//! Virtual path and object key conventions
//!
//! Virtual paths and physical object keys are identical by construction: a
//! file's path is its key, and a folder's path is the prefix shared by every
//! key under it. Directory prefixes always carry a trailing delimiter; the
//! empty string is the root.

/// Delimiter separating virtual path segments inside object keys.
pub const DELIMITER: &str = "/";

/// Leaf name of the marker object that keeps an empty folder enumerable.
pub const PLACEHOLDER: &str = ".placeholder";

/// Suffix identifying a placeholder key below the root.
const PLACEHOLDER_SUFFIX: &str = "/.placeholder";

/// Build an object key from a directory path and a leaf name.
///
/// No delimiter is inserted; `directory` must already end with [`DELIMITER`]
/// when non-empty.
pub fn object_key(directory: &str, leaf: &str) -> String {
    format!("{directory}{leaf}")
}

/// Normalize a prefix into directory form: trailing delimiter, or empty for
/// the root.
pub fn as_directory(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with(DELIMITER) {
        prefix.to_string()
    } else {
        format!("{prefix}{DELIMITER}")
    }
}

/// Key of the placeholder object for a folder prefix.
pub fn placeholder_key(prefix: &str) -> String {
    format!("{}{PLACEHOLDER}", as_directory(prefix))
}

/// Whether a key addresses a placeholder object at any depth.
pub fn is_placeholder(key: &str) -> bool {
    key == PLACEHOLDER || key.ends_with(PLACEHOLDER_SUFFIX)
}

/// Display name of the final segment of a key or directory prefix.
///
/// A prefix of exactly one segment plus the trailing delimiter names that
/// segment, never the empty string.
pub fn leaf_name(path: &str) -> &str {
    let trimmed = path.strip_suffix(DELIMITER).unwrap_or(path);
    trimmed
        .rsplit(DELIMITER)
        .next()
        .unwrap_or(trimmed)
}

/// Directory prefix of a key's immediate parent, including the trailing
/// delimiter; empty for root-level keys.
pub fn parent_prefix(key: &str) -> &str {
    let trimmed = key.strip_suffix(DELIMITER).unwrap_or(key);
    match trimmed.rfind(DELIMITER) {
        Some(pos) => &key[..pos + DELIMITER.len()],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_concatenates_verbatim() {
        assert_eq!(object_key("docs/", "a.txt"), "docs/a.txt");
        assert_eq!(object_key("", "a.txt"), "a.txt");
    }

    #[test]
    fn test_as_directory() {
        assert_eq!(as_directory("docs"), "docs/");
        assert_eq!(as_directory("docs/"), "docs/");
        assert_eq!(as_directory(""), "");
    }

    #[test]
    fn test_placeholder_key() {
        assert_eq!(placeholder_key("docs"), "docs/.placeholder");
        assert_eq!(placeholder_key("docs/"), "docs/.placeholder");
        assert_eq!(placeholder_key(""), ".placeholder");
    }

    #[test]
    fn test_is_placeholder() {
        assert!(is_placeholder(".placeholder"));
        assert!(is_placeholder("docs/.placeholder"));
        assert!(is_placeholder("a/b/.placeholder"));
        assert!(!is_placeholder("docs/report.pdf"));
        assert!(!is_placeholder("docs/my.placeholder.txt"));
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("docs/"), "docs");
        assert_eq!(leaf_name("a/b/c/"), "c");
        assert_eq!(leaf_name("docs/report.pdf"), "report.pdf");
        assert_eq!(leaf_name("report.pdf"), "report.pdf");
    }

    #[test]
    fn test_parent_prefix() {
        assert_eq!(parent_prefix("docs/report.pdf"), "docs/");
        assert_eq!(parent_prefix("a/b/c.txt"), "a/b/");
        assert_eq!(parent_prefix("report.pdf"), "");
        assert_eq!(parent_prefix("a/b/"), "a/");
    }
}
