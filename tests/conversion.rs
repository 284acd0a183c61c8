//! End-to-end conversion tests: export file in, Markdown files out.
//!
//! Each test works in its own directory under the system temp dir.

use std::path::{Path, PathBuf};

use hugofy::convert::{run, ConvertConfig, ConvertError};
use hugofy::feed::DecodeError;
use pretty_assertions::assert_eq;

const POST_KIND: &str = "http://schemas.google.com/blogger/2008/kind#post";
const COMMENT_KIND: &str = "http://schemas.google.com/blogger/2008/kind#comment";

fn fresh_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("content")).unwrap();
    dir
}

fn entry_xml(published: &str, terms: &[&str], title: &str, content: &str) -> String {
    let categories: String = terms
        .iter()
        .map(|t| format!("<category scheme='http://schemas.google.com/g/2005#kind' term='{t}'/>"))
        .collect();
    format!(
        "<entry><id>tag:blogger.com,1999:blog-1.post-{title}</id>\
         <published>{published}</published>{categories}\
         <title type='text'>{title}</title><content type='html'>{content}</content></entry>"
    )
}

fn feed_xml(entries: &[String]) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
         <feed xmlns='http://www.w3.org/2005/Atom'>\
         <id>tag:blogger.com,1999:blog-1</id><title type='text'>My Blog</title>\
         <author><name>Jane</name></author>{}</feed>",
        entries.concat()
    )
}

fn config(dir: &Path) -> ConvertConfig {
    ConvertConfig {
        input: dir.join("blog.xml"),
        output_dir: dir.join("content"),
        template: None,
    }
}

fn output_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.join("content"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_only_posts_are_written() {
    let dir = fresh_dir("hugofy_it_only_posts");
    let xml = feed_xml(&[
        entry_xml(
            "2013-04-01T10:15:00.000-07:00",
            &[POST_KIND],
            "First Post!",
            "&amp;lt;b&amp;gt;hi&amp;lt;/b&amp;gt;",
        ),
        entry_xml(
            "2013-04-02T11:00:00.000-07:00",
            &[COMMENT_KIND],
            "A comment",
            "nice post",
        ),
    ]);
    std::fs::write(dir.join("blog.xml"), xml).unwrap();
    let template = dir.join("content-only.tmpl");
    std::fs::write(&template, "{{ content | safe }}").unwrap();

    let summary = run(&ConvertConfig {
        template: Some(template),
        ..config(&dir)
    })
    .unwrap();

    assert_eq!(summary.feed_title, "My Blog");
    assert_eq!(summary.author, "Jane");
    assert_eq!(summary.entries, 2);
    assert_eq!(summary.written, vec![dir.join("content").join("first-post-.md")]);
    assert_eq!(summary.skipped.get("comment"), Some(&1));
    assert_eq!(output_files(&dir), vec!["first-post-.md".to_string()]);
    assert_eq!(
        std::fs::read_to_string(dir.join("content/first-post-.md")).unwrap(),
        "<b>hi</b>"
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_builtin_template_front_matter() {
    let dir = fresh_dir("hugofy_it_builtin_template");
    let label = entry_xml(
        "2013-04-01T10:15:00.000-07:00",
        &[POST_KIND, "rust", "blogging"],
        "Hello, World!",
        "&amp;lt;p&amp;gt;Fish &amp;amp;amp; chips&amp;lt;/p&amp;gt;",
    );
    std::fs::write(dir.join("blog.xml"), feed_xml(&[label])).unwrap();

    run(&config(&dir)).unwrap();

    let body = std::fs::read_to_string(dir.join("content/hello-world-.md")).unwrap();
    assert_eq!(
        body.trim_end(),
        "---\n\
         title: \"Hello, World!\"\n\
         date: 2013-04-01T10:15:00Z\n\
         tags: [\"rust\", \"blogging\"]\n\
         ---\n\
         \n\
         <p>Fish &amp;amp; chips</p>"
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_bad_date_aborts_without_output() {
    let dir = fresh_dir("hugofy_it_bad_date");
    let xml = feed_xml(&[
        entry_xml("2013-04-01T10:15:00.000-07:00", &[POST_KIND], "Fine", "ok"),
        entry_xml("not-a-date", &[POST_KIND], "Broken", "ok"),
    ]);
    std::fs::write(dir.join("blog.xml"), xml).unwrap();

    let err = run(&config(&dir)).unwrap_err();
    assert!(matches!(err, ConvertError::Decode(DecodeError::Malformed(_))));
    assert!(err.to_string().contains("not-a-date"));
    assert!(output_files(&dir).is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_output_dir_is_not_created() {
    let dir = fresh_dir("hugofy_it_missing_output");
    std::fs::write(dir.join("blog.xml"), feed_xml(&[])).unwrap();
    let missing = dir.join("nope");

    let err = run(&ConvertConfig {
        output_dir: missing.clone(),
        ..config(&dir)
    })
    .unwrap_err();
    assert!(matches!(err, ConvertError::OutputDir(_)));
    assert!(!missing.exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_bad_template_fails_before_reading_input() {
    let dir = fresh_dir("hugofy_it_bad_template");
    let template = dir.join("broken.tmpl");
    std::fs::write(&template, "{% if %}").unwrap();

    // No blog.xml exists: the template error must come first.
    let err = run(&ConvertConfig {
        template: Some(template),
        ..config(&dir)
    })
    .unwrap_err();
    assert!(matches!(err, ConvertError::Template(_)));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_empty_feed_writes_nothing() {
    let dir = fresh_dir("hugofy_it_empty_feed");
    std::fs::write(dir.join("blog.xml"), feed_xml(&[])).unwrap();

    let summary = run(&config(&dir)).unwrap();
    assert_eq!(summary.entries, 0);
    assert!(summary.written.is_empty());
    assert!(output_files(&dir).is_empty());

    std::fs::remove_dir_all(&dir).ok();
}
