use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::date::PublishDate;

/// Errors that can occur while decoding a feed document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document is not valid UTF-8.
    #[error("Feed document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// XML structure is broken, or a field (such as a publish date) failed to parse.
    #[error("Malformed feed document: {0}")]
    Malformed(#[from] quick_xml::de::DeError),

    /// Reading the source stream failed.
    #[error("Failed to read feed document: {0}")]
    Io(#[from] std::io::Error),
}

/// A decoded Blogger export.
#[derive(Debug, Clone, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "text_content")]
    pub title: String,
    #[serde(default)]
    author: Author,
    #[serde(rename = "entry", default)]
    pub entries: Vec<Entry>,
}

impl Feed {
    /// Name from `<author><name>`, empty when the export has none.
    pub fn author_name(&self) -> &str {
        &self.author.name
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Author {
    #[serde(default)]
    name: String,
}

/// One `<entry>`: a post, comment, page, or Blogger settings/template record.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    /// `None` when the entry has no `<published>` element.
    #[serde(rename = "published", default)]
    pub publish_date: Option<PublishDate>,
    #[serde(rename = "category", default)]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "text_content")]
    pub title: String,
    /// Raw body text. Blogger stores the HTML escaped a second time, so
    /// `&lt;` / `&gt;` are still present after XML decoding.
    #[serde(default, deserialize_with = "text_content")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    #[serde(rename(deserialize = "@term"))]
    pub term: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Text of an element that may carry attributes such as `type='html'`.
#[derive(Deserialize)]
struct Text {
    #[serde(rename = "$text", default)]
    value: String,
}

fn text_content<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Text::deserialize(deserializer).map(|text| text.value)
}

/// Decodes a complete feed document.
///
/// Entries keep document order. Any structural error or a `<published>`
/// value that does not match the input date format fails the whole decode;
/// no partial feed is returned. An entry without `<published>` is accepted.
///
/// # Security
///
/// SEC-002: `quick-xml` (0.37) does not expand `<!ENTITY>` declarations, so
/// the only entities resolved are the five XML builtins.
pub fn decode(bytes: &[u8]) -> Result<Feed, DecodeError> {
    let content = std::str::from_utf8(bytes)?;
    let feed: Feed = quick_xml::de::from_str(content)?;
    tracing::debug!(
        id = %feed.id,
        title = %feed.title,
        entries = feed.entries.len(),
        "Decoded feed"
    );
    Ok(feed)
}

/// Reads `reader` to the end and decodes the result with [`decode`].
pub fn decode_reader<R: Read>(mut reader: R) -> Result<Feed, DecodeError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}
