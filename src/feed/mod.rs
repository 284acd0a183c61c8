//! Blogger export decoding and entry classification.
//!
//! - [`atom`] - Decode the Atom export into [`Feed`] / [`Entry`] / [`Category`]
//! - [`date`] - [`PublishDate`], parsed from one fixed format and rendered in another
//! - [`kind`] - Tell posts apart from comments, pages and settings, and strip
//!   the kind marker from a post's categories
//!
//! # Example
//!
//! ```ignore
//! use hugofy::feed::{classify, decode};
//!
//! let feed = decode(&std::fs::read("data/blog.xml")?)?;
//! for entry in feed.entries {
//!     if let Ok(post) = classify(entry) {
//!         println!("{}", post.title);
//!     }
//! }
//! ```

mod atom;
mod date;
mod kind;

pub use atom::{decode, decode_reader, Category, DecodeError, Entry, Feed};
pub use date::{InvalidDate, PublishDate, INPUT_FORMAT, MISSING_DATE, OUTPUT_FORMAT};
pub use kind::{classify, clean_categories, EntryKind, POST_MARKER};
