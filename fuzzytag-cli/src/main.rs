//! fuzzytag CLI
//!
//! Runs markup through the fuzzy lexer and prints the events it reports.
//! Useful for checking how a crawled page will be seen by the ingestion
//! pipeline.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use fuzzytag_common::warning::clear_warnings;
use fuzzytag_lexer::{Event, EventCollector, TextMode, lex_reader, lex_str};
use owo_colors::OwoColorize;

/// Inspect how the fuzzy lexer tokenizes dirty markup
#[derive(Parser, Debug)]
#[command(name = "fuzzytag")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lex a saved page
    fuzzytag page.html

    # Lex several pages, one after another
    fuzzytag a.html b.html

    # Lex inline markup, body text included
    fuzzytag --text --html '<p class=x>Hello &amp; bye</p>'

    # Machine-readable output
    fuzzytag --json page.html

    # Read from stdin
    curl -s https://example.com | fuzzytag
"#)]
struct Cli {
    /// Files to lex (stdin when omitted)
    #[arg(value_name = "FILE")]
    paths: Vec<PathBuf>,

    /// Lex this markup string instead of files
    #[arg(long, value_name = "MARKUP", conflicts_with = "paths")]
    html: Option<String>,

    /// Print events as JSON
    #[arg(long)]
    json: bool,

    /// Include body text runs
    #[arg(long)]
    text: bool,

    /// Include body text runs with entity references decoded
    #[arg(long)]
    decode_text: bool,

    /// Only print the per-document summary
    #[arg(short, long, conflicts_with = "json")]
    quiet: bool,
}

impl Cli {
    const fn text_mode(&self) -> TextMode {
        if self.decode_text {
            TextMode::Decoded
        } else if self.text {
            TextMode::Raw
        } else {
            TextMode::Skip
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let text_mode = cli.text_mode();

    if let Some(markup) = &cli.html {
        let events = lex_str(markup, EventCollector::with_text_mode(text_mode)).into_events();
        return report(&cli, "<inline>", &events);
    }

    if cli.paths.is_empty() {
        let events = lex_reader(io::stdin().lock(), EventCollector::with_text_mode(text_mode))
            .context("Failed to read markup from stdin")?
            .into_events();
        return report(&cli, "<stdin>", &events);
    }

    for path in &cli.paths {
        // Each document gets its own warnings.
        clear_warnings();
        let events = lex_file(path, text_mode)?;
        report(&cli, &path.display().to_string(), &events)?;
    }
    Ok(())
}

/// Stream one file through a fresh lexer.
fn lex_file(path: &Path, text_mode: TextMode) -> Result<Vec<Event>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?;
    let collector = lex_reader(BufReader::new(file), EventCollector::with_text_mode(text_mode))
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    Ok(collector.into_events())
}

fn report(cli: &Cli, source: &str, events: &[Event]) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(events)?);
        return Ok(());
    }

    println!("{}", format!("=== {source} ===").bold());
    if !cli.quiet {
        for event in events {
            print_event(event);
        }
    }
    print_summary(events);
    Ok(())
}

fn print_event(event: &Event) {
    match event {
        Event::StartTag { name, attributes } => {
            let mut line = format!("{} {}", "start".green(), name.bold());
            for (key, value) in attributes {
                line.push_str(&format!(" {}={value:?}", key.cyan()));
            }
            println!("{line}");
        }
        Event::EndTag { name } => println!("{} {}", "end  ".blue(), name.bold()),
        Event::Text { text } => println!("{} {}", "text ".dimmed(), format!("{text:?}").dimmed()),
        Event::Finish => println!("{}", "finish".dimmed()),
    }
}

fn print_summary(events: &[Event]) {
    let mut start_tags = 0usize;
    let mut end_tags = 0usize;
    let mut text_runs = 0usize;
    for event in events {
        match event {
            Event::StartTag { .. } => start_tags += 1,
            Event::EndTag { .. } => end_tags += 1,
            Event::Text { .. } => text_runs += 1,
            Event::Finish => {}
        }
    }
    println!("{start_tags} start tags, {end_tags} end tags, {text_runs} text runs");
}
