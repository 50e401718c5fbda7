//! Analyze one page layout
//!
//! Reads word contours and a pre-fitted margin from JSON, reconstructs the
//! text lines and prints them, top to bottom, as JSON.
//!
//! Usage:
//!   cargo run --release --bin analyze_page -- page.json
//!   cargo run --release --bin analyze_page -- page.json --config layout.json --verbose

use page_oxide::pipeline::{LayoutConfig, LayoutPipeline, PageInput};
use std::path::PathBuf;
use std::time::Instant;

struct AnalyzeConfig {
    page: PathBuf,
    config: Option<PathBuf>,
    verbose: bool,
}

impl AnalyzeConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut page = None;
        let mut config = None;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    i += 1;
                    if i < args.len() {
                        config = Some(PathBuf::from(&args[i]));
                    }
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other if !other.starts_with('-') && page.is_none() => {
                    page = Some(PathBuf::from(other));
                },
                other => {
                    eprintln!("Ignoring unknown argument: {}", other);
                },
            }
            i += 1;
        }

        Some(Self {
            page: page?,
            config,
            verbose,
        })
    }
}

fn load_config(path: Option<&PathBuf>) -> page_oxide::Result<LayoutConfig> {
    match path {
        Some(path) => LayoutConfig::from_json(&std::fs::read_to_string(path)?),
        None => Ok(LayoutConfig::default()),
    }
}

fn run(args: &AnalyzeConfig) -> page_oxide::Result<String> {
    let config = load_config(args.config.as_ref())?;
    let input = PageInput::from_path(&args.page)?;
    let contours = input.contours.len();

    let start = Instant::now();
    let page = LayoutPipeline::with_config(config).analyze_input(input)?;

    if args.verbose {
        eprintln!(
            "{}: {} contours, {} words, {} lines in {:.1} ms",
            args.page.display(),
            contours,
            page.words().len(),
            page.lines().len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        eprintln!(
            "  paragraph starts: {}, paragraph ends: {}, centered: {}, rules: {}",
            page.paragraph_starts().count(),
            page.paragraph_ends().count(),
            page.centered_lines().count(),
            page.horizontal_rules().count()
        );
    }

    Ok(serde_json::to_string_pretty(&page)?)
}

fn main() {
    env_logger::init();

    let Some(args) = AnalyzeConfig::from_args() else {
        eprintln!("Usage: analyze_page <page.json> [--config layout.json] [--verbose]");
        std::process::exit(2);
    };

    match run(&args) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error analyzing {}: {}", args.page.display(), e);
            std::process::exit(1);
        },
    }
}
