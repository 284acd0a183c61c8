use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use hugofy::config::Config;
use hugofy::convert;

#[derive(Parser, Debug)]
#[command(
    name = "hugofy",
    about = "Convert a Blogger export into Markdown posts for a static-site generator"
)]
struct Args {
    /// Blogger export file [default: data/blog.xml]
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Existing output directory, e.g. /fully/qualified/content/ [default: ./content/]
    #[arg(long, visible_alias = "outputDir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Tera template for each post (uses the built-in template when omitted)
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Optional TOML config file with `input`, `output_dir` and `template` keys
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => Config::default(),
    };
    let config = file_config.resolve(args.input, args.output_dir, args.template);

    println!("Converting blogger to hugo format");

    let summary = convert::run_with_progress(&config, |progress| println!("{progress}"))
        .context("Conversion failed")?;

    println!(
        "{} posts written to {}, {} other entries skipped",
        summary.written.len(),
        config.output_dir.display(),
        summary.skipped_total()
    );

    Ok(())
}
