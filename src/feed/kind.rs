use std::fmt;

use super::atom::{Category, Entry};

/// Substring of a category term that marks an entry as a blog post.
pub const POST_MARKER: &str = "kind#post";

/// Prefix of the suffix Blogger uses for every kind category,
/// e.g. `http://schemas.google.com/blogger/2008/kind#comment`.
const KIND_PREFIX: &str = "kind#";

/// What an `<entry>` represents. Blogger lumps everything under `<entry>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    Post,
    Comment,
    Page,
    Settings,
    Template,
    /// A `kind#` suffix this tool does not know about.
    Other(String),
    /// No kind category at all.
    Unknown,
}

impl EntryKind {
    /// Classifies an entry from its categories.
    ///
    /// Any term containing [`POST_MARKER`] makes the entry a post, wherever
    /// it appears in the list. Otherwise the first `kind#` suffix found
    /// names the kind.
    pub fn of(categories: &[Category]) -> Self {
        if categories.iter().any(is_post_marker) {
            return EntryKind::Post;
        }

        categories
            .iter()
            .find_map(|c| c.term.rsplit_once(KIND_PREFIX).map(|(_, kind)| kind))
            .map(|kind| match kind {
                "comment" => EntryKind::Comment,
                "page" => EntryKind::Page,
                "settings" => EntryKind::Settings,
                "template" => EntryKind::Template,
                other => EntryKind::Other(other.to_string()),
            })
            .unwrap_or(EntryKind::Unknown)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Post => f.write_str("post"),
            EntryKind::Comment => f.write_str("comment"),
            EntryKind::Page => f.write_str("page"),
            EntryKind::Settings => f.write_str("settings"),
            EntryKind::Template => f.write_str("template"),
            EntryKind::Other(kind) => write!(f, "{kind}"),
            EntryKind::Unknown => f.write_str("unknown"),
        }
    }
}

fn is_post_marker(category: &Category) -> bool {
    category.term.contains(POST_MARKER)
}

/// Removes every post-marker category, keeping the others in order.
pub fn clean_categories(categories: Vec<Category>) -> Vec<Category> {
    categories
        .into_iter()
        .filter(|c| !is_post_marker(c))
        .collect()
}

/// Returns the entry with marker categories stripped if it is a post,
/// or its kind if it is not.
pub fn classify(mut entry: Entry) -> Result<Entry, EntryKind> {
    match EntryKind::of(&entry.categories) {
        EntryKind::Post => {
            entry.categories = clean_categories(entry.categories);
            Ok(entry)
        }
        other => Err(other),
    }
}
