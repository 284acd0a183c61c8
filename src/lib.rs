//! Convert a Blogger Atom export into one Markdown file per post.
//!
//! The pipeline runs once, in document order:
//! decode → classify → (clean categories, unescape content, derive filename) → render → write.
//!
//! ```ignore
//! use hugofy::convert::{run, ConvertConfig};
//!
//! let summary = run(&ConvertConfig {
//!     input: "data/blog.xml".into(),
//!     output_dir: "./content/".into(),
//!     template: None,
//! })?;
//! println!("{} posts written", summary.written.len());
//! ```

pub mod config;
pub mod convert;
pub mod feed;
pub mod output;
pub mod render;
pub mod util;
