//! The conversion pipeline: decode the export, keep the posts, render each
//! one and write it out.
//!
//! Entries are handled strictly in document order. The first fatal error
//! (unreadable input, decode failure, template or write failure) stops the
//! run; nothing is retried.
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::feed::{self, Category, DecodeError, Entry, EntryKind, Feed, PublishDate};
use crate::output::{OutputDir, OutputError};
use crate::render::{FeedInfo, Renderer, TemplateError};
use crate::util::{derive_filename, unescape_markup, SafeHtml};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unable to open file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to decode xml: {0}")]
    Decode(#[from] DecodeError),

    #[error("unable to parse template: {0}")]
    Template(#[source] TemplateError),

    #[error("unable to render post '{title}': {source}")]
    Render {
        title: String,
        #[source]
        source: TemplateError,
    },

    #[error("unable to write post '{title}': {source}")]
    Write {
        title: String,
        #[source]
        source: OutputError,
    },

    #[error(transparent)]
    OutputDir(OutputError),
}

/// Resolved settings for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Blogger export to read.
    pub input: PathBuf,
    /// Existing directory that receives one `.md` file per post.
    pub output_dir: PathBuf,
    /// Custom template; `None` uses the built-in one.
    pub template: Option<PathBuf>,
}

/// A post ready for rendering: marker category removed, content unescaped,
/// filename derived.
#[derive(Debug, Clone)]
pub struct PreparedPost {
    pub filename: String,
    pub title: String,
    /// `None` renders as the zero time.
    pub publish_date: Option<PublishDate>,
    pub categories: Vec<Category>,
    pub content: SafeHtml,
}

/// Turns a post entry into a [`PreparedPost`]; any other kind is returned
/// as the error so the caller can skip it.
pub fn prepare(entry: Entry) -> Result<PreparedPost, EntryKind> {
    let post = feed::classify(entry)?;
    Ok(PreparedPost {
        filename: derive_filename(&post.title),
        content: unescape_markup(&post.content),
        title: post.title,
        publish_date: post.publish_date,
        categories: post.categories,
    })
}

/// Progress of a run, reported as it happens.
///
/// `Display` gives the line the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    /// Feed decoded; posts are about to be written.
    Converting { title: &'a str, author: &'a str },
    /// A post is about to be written to `filename`.
    Writing { filename: &'a str },
}

impl fmt::Display for Progress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Converting { title, author } => {
                write!(f, "Converting '{}' - by {}", title, author)
            }
            Progress::Writing { filename } => write!(f, "Writing to: {}", filename),
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, Default)]
pub struct ConversionSummary {
    pub feed_title: String,
    pub author: String,
    pub entries: usize,
    /// Paths in write order. A path appears twice if two titles collided.
    pub written: Vec<PathBuf>,
    pub skipped: BTreeMap<String, usize>,
}

impl ConversionSummary {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Renders and writes every post in `feed`, calling `progress` before the
/// first entry and before each write.
pub fn convert_feed(
    feed: Feed,
    renderer: &Renderer,
    out: &OutputDir,
    mut progress: impl FnMut(&Progress<'_>),
) -> Result<ConversionSummary, ConvertError> {
    let info = FeedInfo {
        feed_title: feed.title.clone(),
        author: feed.author_name().to_string(),
    };
    tracing::info!(
        title = %info.feed_title,
        author = %info.author,
        entries = feed.entries.len(),
        "Converting blog"
    );
    progress(&Progress::Converting {
        title: &info.feed_title,
        author: &info.author,
    });

    let mut summary = ConversionSummary {
        feed_title: info.feed_title.clone(),
        author: info.author.clone(),
        entries: feed.entries.len(),
        ..Default::default()
    };
    // filename -> title of the post that claimed it first
    let mut claimed: HashMap<String, String> = HashMap::new();

    for entry in feed.entries {
        let post = match prepare(entry) {
            Ok(post) => post,
            Err(kind) => {
                tracing::debug!(kind = %kind, "Skipping non-post entry");
                *summary.skipped.entry(kind.to_string()).or_default() += 1;
                continue;
            }
        };

        if post.publish_date.is_none() {
            tracing::warn!(title = %post.title, "Post has no publish date, using the zero time");
        }

        if let Some(previous) = claimed.get(&post.filename) {
            tracing::warn!(
                file = %post.filename,
                previous = %previous,
                title = %post.title,
                "Two posts map to the same file, the later one overwrites it"
            );
        } else {
            claimed.insert(post.filename.clone(), post.title.clone());
        }

        let body = renderer
            .render(&post, &info)
            .map_err(|source| ConvertError::Render {
                title: post.title.clone(),
                source,
            })?;
        progress(&Progress::Writing {
            filename: &post.filename,
        });
        let path = out
            .write(&post.filename, &body)
            .map_err(|source| ConvertError::Write {
                title: post.title.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), title = %post.title, "Wrote post");
        summary.written.push(path);
    }

    Ok(summary)
}

/// Reads and decodes the export at `path`.
pub fn load_feed(path: &Path) -> Result<Feed, ConvertError> {
    let file = std::fs::File::open(path).map_err(|source| ConvertError::Open {
        path: path.display().to_string(),
        source,
    })?;
    Ok(feed::decode_reader(std::io::BufReader::new(file))?)
}

/// Runs a whole conversion without progress reporting.
pub fn run(config: &ConvertConfig) -> Result<ConversionSummary, ConvertError> {
    run_with_progress(config, |_| {})
}

/// Runs a whole conversion, passing each [`Progress`] step to `progress`.
///
/// The output directory and template are checked before the export is read,
/// so a bad setup fails without touching anything.
pub fn run_with_progress(
    config: &ConvertConfig,
    progress: impl FnMut(&Progress<'_>),
) -> Result<ConversionSummary, ConvertError> {
    let out = OutputDir::open(&config.output_dir).map_err(ConvertError::OutputDir)?;
    let renderer = Renderer::load(config.template.as_deref()).map_err(ConvertError::Template)?;
    let feed = load_feed(&config.input)?;
    convert_feed(feed, &renderer, &out, progress)
}
