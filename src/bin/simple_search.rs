//! Drive a SimpleSearch widget from the command line.
//!
//! Loads a host HTML page and a settings file, mounts the widget on the
//! input matched by a selector, loads the source page, then reads event
//! lines from stdin:
//!
//! ```text
//! input <text>   set the input value and filter
//! enter          pointer entered the input
//! leave          pointer left the container
//! quit           stop
//! ```
//!
//! After every event the rendered list markup is written to stdout. All
//! tracing output goes to stderr.

use std::path::Path;

use anyhow::Context;
use simple_search::{HostPage, HttpSource, SearchError, Settings, SimpleSearch, WidgetEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

/// One line of stdin input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Input(String),
    Enter,
    Leave,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    match word {
        "input" => Some(Command::Input(rest.to_owned())),
        "enter" => Some(Command::Enter),
        "leave" => Some(Command::Leave),
        "quit" => Some(Command::Quit),
        _ => None,
    }
}

/// Settings from `.json` (the options object) or TOML (anything else).
fn load_settings(path: &Path) -> simple_search::Result<Settings> {
    if path.extension().is_some_and(|ext| ext == "json") {
        Settings::from_json(&std::fs::read_to_string(path)?)
    } else {
        Settings::from_file(path)
    }
}

fn print_usage() {
    println!("usage: simple-search <host.html> <location-url> <settings.toml|json> <input-selector>");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("simple_search=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 5 {
        print_usage();
        return Ok(());
    }
    let (html_path, location, settings_path, input_selector) =
        (&args[1], &args[2], &args[3], &args[4]);

    let html = std::fs::read_to_string(html_path)
        .with_context(|| format!("reading host page {html_path}"))?;
    let location =
        Url::parse(location).with_context(|| format!("invalid location URL {location}"))?;
    let settings = load_settings(Path::new(settings_path))
        .with_context(|| format!("loading settings from {settings_path}"))?;

    let mut page = HostPage::parse(&html, location);
    let mut widget = SimpleSearch::mount(&mut page, input_selector, settings);
    let Some(input) = widget.input() else {
        return Err(SearchError::InputNotFound(input_selector.clone()).into());
    };

    let source = HttpSource::new()?;
    if let Err(e) = widget.init(&mut page, &source).await {
        tracing::error!(error = %e, "source page unavailable; events will be ignored");
    }
    tracing::info!(
        state = ?widget.state(),
        candidates = widget.candidates().len(),
        "simple-search ready"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = match parse_command(&line) {
            Some(Command::Input(text)) => {
                page.type_into(input, &text)?;
                WidgetEvent::Input
            }
            Some(Command::Enter) => WidgetEvent::PointerEnter,
            Some(Command::Leave) => WidgetEvent::PointerLeave,
            Some(Command::Quit) => break,
            None => {
                tracing::warn!(line = %line, "unknown command (use input|enter|leave|quit)");
                continue;
            }
        };

        widget.handle(&mut page, event)?;
        let markup = widget
            .list()
            .map(|list| page.document().inner_html(list))
            .unwrap_or_default();
        println!("{markup}");
    }

    tracing::info!("simple-search shut down cleanly");
    Ok(())
}
