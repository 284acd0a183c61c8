use std::fmt;

use serde::Serialize;

/// Extension appended to every derived filename.
pub const OUTPUT_EXTENSION: &str = ".md";

/// Post body whose markup has already been unescaped.
///
/// Only [`unescape_markup`] builds one. Templates emit it verbatim (Tera's
/// `safe` filter); escaping it again would undo the unescape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replaces every `&lt;` with `<` and every `&gt;` with `>`.
///
/// Nothing else is touched: `&amp;`, `&quot;` and numeric entities pass
/// through unchanged.
///
/// # Examples
///
/// ```
/// use hugofy::util::unescape_markup;
///
/// let html = unescape_markup("&lt;p&gt;Fish &amp;amp; chips&lt;/p&gt;");
/// assert_eq!(html.as_str(), "<p>Fish &amp;amp; chips</p>");
/// ```
pub fn unescape_markup(content: &str) -> SafeHtml {
    SafeHtml(content.replace("&lt;", "<").replace("&gt;", ">"))
}

/// Lower-cases `title` and collapses every run of characters outside
/// `[A-Za-z0-9_-]` into a single `-`.
///
/// Leading and trailing hyphens are kept, so `"Hello, World!"` becomes
/// `"hello-world-"`. Non-ASCII letters count as disallowed.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_run = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            slug.push(c.to_ascii_lowercase());
            in_run = false;
        } else if !in_run {
            slug.push('-');
            in_run = true;
        }
    }

    slug
}

/// Output filename for a post titled `title`.
///
/// Two titles that slugify alike yield the same name; the later file
/// overwrites the earlier one.
///
/// # Examples
///
/// ```
/// use hugofy::util::derive_filename;
///
/// assert_eq!(derive_filename("First Post!"), "first-post-.md");
/// assert_eq!(derive_filename("Ünïcode  café"), "-n-code-caf-.md");
/// ```
pub fn derive_filename(title: &str) -> String {
    format!("{}{}", slugify(title), OUTPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unescape_basic() {
        assert_eq!(unescape_markup("&lt;b&gt;hi&lt;/b&gt;").as_str(), "<b>hi</b>");
    }

    #[test]
    fn test_unescape_leaves_other_entities() {
        let input = "&amp;lt; &quot;x&quot; &#60; &#x3e;";
        assert_eq!(unescape_markup(input).as_str(), "&amp;lt; &quot;x&quot; &#60; &#x3e;");
    }

    #[test]
    fn test_unescape_empty() {
        assert_eq!(unescape_markup("").as_str(), "");
    }

    #[test]
    fn test_safe_html_display_matches_content() {
        let html = unescape_markup("&lt;i&gt;x&lt;/i&gt;");
        assert_eq!(html.to_string(), "<i>x</i>");
        assert_eq!(html.into_string(), "<i>x</i>");
    }

    #[test]
    fn test_slugify_examples() {
        assert_eq!(slugify("Hello, World!"), "hello-world-");
        assert_eq!(slugify("First Post!"), "first-post-");
        assert_eq!(slugify("already-fine_name"), "already-fine_name");
        assert_eq!(slugify("  leading"), "-leading");
        assert_eq!(slugify("a -- b"), "a----b");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_non_ascii_collapses() {
        assert_eq!(slugify("日本語のタイトル"), "-");
        assert_eq!(slugify("Crème brûlée"), "cr-me-br-l-e");
    }

    #[test]
    fn test_derive_filename() {
        assert_eq!(derive_filename("Hello, World!"), "hello-world-.md");
        assert_eq!(derive_filename(""), ".md");
    }

    proptest! {
        #[test]
        fn prop_unescape_idempotent_once_resolved(s in "[a-z<>&;lgt ]{0,40}") {
            let once = unescape_markup(&s);
            // Idempotent whenever the first pass left nothing to resolve.
            if !once.as_str().contains("&lt;") && !once.as_str().contains("&gt;") {
                let twice = unescape_markup(once.as_str());
                prop_assert_eq!(twice, once);
            }
        }

        #[test]
        fn prop_filename_charset_and_determinism(title in "\\PC{0,40}") {
            let name = derive_filename(&title);
            prop_assert_eq!(&name, &derive_filename(&title));
            let stem = name.strip_suffix(OUTPUT_EXTENSION).unwrap();
            prop_assert!(stem
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
            // Disallowed runs collapse, so `--` needs a literal hyphen in the title.
            prop_assert!(title.contains('-') || !stem.contains("--"));
        }
    }
}
