use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use linkwrap_lib::UrlHighlighter;
use linkwrap_lib::config::HighlightConfig;
use linkwrap_lib::tree::{Container, Element, Node};

/// Highlight URLs in wrapped terminal output.
///
/// Each input line is treated as one rendered terminal line, so URLs the
/// terminal wrapped across lines are reassembled and linked as one.
#[derive(Parser)]
#[command(name = "linkwrap", version, about)]
struct Cli {
    /// Input file; reads stdin when omitted
    file: Option<PathBuf>,

    /// Path to a TOML config file (default: discover .linkwrap.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Serialized element tree with anchors spliced in
    Html,
    /// One detected link per line: line number, href, covered text
    Text,
    /// JSON array of detected links
    Json,
}

/// A link found in the processed tree, for the text/json reports.
#[derive(Debug, Serialize)]
struct LinkRecord {
    /// 1-indexed line number.
    line: usize,
    href: String,
    text: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HighlightConfig::load(path)
            .with_context(|| format!("cannot load config from {}", path.display()))?,
        None => HighlightConfig::discover(Path::new("."))?,
    };

    let input = read_input(cli.file.as_deref())?;
    let mut container = Container::from_lines_with_class(input.lines(), &config.line_class);

    let highlighter = UrlHighlighter::from_config(config);
    highlighter.process_links(&mut container);

    match cli.format {
        OutputFormat::Html => println!("{}", container.to_html()),
        OutputFormat::Text => {
            for record in collect_links(&container, highlighter.config()) {
                println!("{}\t{}\t{}", record.line, record.href, record.text);
            }
        }
        OutputFormat::Json => {
            let records = collect_links(&container, highlighter.config());
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("cannot read stdin")?;
            Ok(buffer)
        }
    }
}

/// Walk the processed tree and report every anchor the highlighter created.
fn collect_links(container: &Container, config: &HighlightConfig) -> Vec<LinkRecord> {
    let mut records = Vec::new();
    for (idx, line) in container.lines(&config.line_class).iter().enumerate() {
        collect_anchors(line, &config.link_class, idx + 1, &mut records);
    }
    records
}

fn collect_anchors(el: &Element, link_class: &str, line: usize, out: &mut Vec<LinkRecord>) {
    for child in &el.children {
        if let Node::Element(e) = child {
            if e.tag == "a" && e.has_class(link_class) {
                out.push(LinkRecord {
                    line,
                    href: e.attr("href").unwrap_or_default().to_string(),
                    text: e.text_content(),
                });
            }
            collect_anchors(e, link_class, line, out);
        }
    }
}
