//! Import directive extraction

use regex::Regex;

/// Extracts `@import "..."` targets from stylesheet text.
///
/// Matching is purely textual. Only the double-quoted, semicolon-terminated
/// form is recognized; single quotes, `url(...)` and media-query-qualified
/// imports are not. There is no comment or string awareness either: a
/// directive inside a comment is still reported. Callers get the raw path
/// literals and are responsible for any deduplication.
#[derive(Debug)]
pub struct ImportScanner {
    import_regex: Regex,
}

impl Default for ImportScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportScanner {
    pub fn new() -> Self {
        // Match: @import "some/path.less";
        let import_regex = Regex::new(r#"@import\s+"([^"]+)";"#).unwrap();

        Self { import_regex }
    }

    /// All import targets in `text`, lazily, in order of appearance.
    /// Duplicate directives yield duplicate entries.
    pub fn scan<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.import_regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_in_order() {
        let scanner = ImportScanner::new();
        let text = "@import \"a.less\";\nbody { color: red; }\n@import \"sub/b.less\";\n";
        let imports: Vec<&str> = scanner.scan(text).collect();

        assert_eq!(imports, vec!["a.less", "sub/b.less"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let scanner = ImportScanner::new();
        let text = "@import \"a.less\";\n@import \"a.less\";\n";

        assert_eq!(scanner.scan(text).count(), 2);
    }

    #[test]
    fn test_whitespace_after_keyword() {
        let scanner = ImportScanner::new();
        let text = "@import\t \"mixins.less\";";
        let imports: Vec<&str> = scanner.scan(text).collect();

        assert_eq!(imports, vec!["mixins.less"]);
    }

    #[test]
    fn test_unrecognized_forms_are_ignored() {
        let scanner = ImportScanner::new();
        let text = concat!(
            "@import 'single.less';\n",
            "@import url(\"other.less\");\n",
            "@import \"missing-semicolon.less\"\n",
        );

        assert_eq!(scanner.scan(text).count(), 0);
    }

    #[test]
    fn test_commented_imports_still_match() {
        // Known limitation: the scanner has no comment awareness.
        let scanner = ImportScanner::new();
        let text = "// @import \"dead.less\";\n";
        let imports: Vec<&str> = scanner.scan(text).collect();

        assert_eq!(imports, vec!["dead.less"]);
    }
}
