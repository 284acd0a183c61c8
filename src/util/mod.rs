//! Text transforms applied to each post before rendering.
//!
//! - **Unescaping**: undo Blogger's second round of `&lt;` / `&gt;` escaping
//! - **Filenames**: derive a filesystem-safe `.md` name from a post title
//!
//! # Examples
//!
//! ```
//! use hugofy::util::{derive_filename, unescape_markup};
//!
//! assert_eq!(derive_filename("Hello, World!"), "hello-world-.md");
//! assert_eq!(unescape_markup("&lt;b&gt;hi&lt;/b&gt;").as_str(), "<b>hi</b>");
//! ```

mod text;

pub use text::{derive_filename, slugify, unescape_markup, SafeHtml, OUTPUT_EXTENSION};
