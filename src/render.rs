//! Renders prepared posts through a Tera template.
//!
//! The built-in template writes Hugo-style YAML front matter followed by the
//! post body. A custom template receives the same variables:
//!
//! | Variable       | Value                                          |
//! |----------------|------------------------------------------------|
//! | `title`        | Post title                                     |
//! | `publish_date` | `YYYY-MM-DDTHH:MM:SSZ`, zero time if missing   |
//! | `categories`   | List of `{ term, title }`, kind marker removed |
//! | `content`      | Unescaped HTML; emit it with the `safe` filter |
//! | `feed_title`   | Blog title                                     |
//! | `author`       | Blog author name                               |
use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::convert::PreparedPost;
use crate::feed::{Category, PublishDate};
use crate::util::SafeHtml;

/// Name the template is registered under. The `.md` suffix keeps Tera's
/// HTML autoescaping off.
const TEMPLATE_NAME: &str = "post.md";

const BUILTIN_TEMPLATE: &str = include_str!("../templates/post.md");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template: {0}")]
    Parse(#[source] tera::Error),

    #[error("Failed to render template: {0}")]
    Render(#[source] tera::Error),
}

/// Feed-level values available to every rendered post.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedInfo {
    pub feed_title: String,
    pub author: String,
}

#[derive(Serialize)]
struct PostContext<'a> {
    title: &'a str,
    publish_date: String,
    categories: &'a [Category],
    content: &'a SafeHtml,
    #[serde(flatten)]
    feed: &'a FeedInfo,
}

/// Compiled output template.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Renderer using the template shipped with the binary.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::from_source(BUILTIN_TEMPLATE)
    }

    pub fn from_source(source: &str) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(TemplateError::Parse)?;
        Ok(Self { tera })
    }

    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded template");
        Self::from_source(&source)
    }

    /// Loads `path` when given, otherwise the built-in template.
    pub fn load(path: Option<&Path>) -> Result<Self, TemplateError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    pub fn render(&self, post: &PreparedPost, feed: &FeedInfo) -> Result<String, TemplateError> {
        let ctx = PostContext {
            title: &post.title,
            publish_date: PublishDate::render_or_zero(post.publish_date.as_ref()),
            categories: &post.categories,
            content: &post.content,
            feed,
        };
        let context = Context::from_serialize(&ctx).map_err(TemplateError::Render)?;
        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(TemplateError::Render)
    }
}
