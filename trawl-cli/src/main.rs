//! trawl command-line interface
//!
//! Query an HTML file, URL or inline string with a CSS-like selector and
//! print the matches.

use std::fs;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use trawl_common::net::{FetchConfig, TIMEOUT, USER_AGENT, is_html_document};
use trawl_common::warning::warn_once;
use trawl_common::{Fetch, HttpFetcher};
use trawl_html::{ExtractMode, RawSlice, Tokenizer};
use trawl_query::{project_attribute, query_document_with};

/// trawl: extract elements from HTML with a small selector language
#[derive(Parser, Debug)]
#[command(name = "trawl")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Inner text of every matching element
    trawl ./index.html -s 'h2.title'

    # Attribute values from a live page
    trawl https://example.com -s 'a[href^=http]' --attr href

    # Child chains descend into inner markup
    trawl --html '<div id="a"><p>x</p></div>' -s 'div#a > p'

    # Matches as JSON, looking inside nested elements too
    trawl ./index.html -s 'em' --deep --json

    # Raw tokenizer slices
    trawl ./index.html --tokens
"#)]
struct Cli {
    /// Path to HTML file or URL to query
    #[arg(value_name = "FILE|URL", required_unless_present = "html")]
    path: Option<String>,

    /// Query this HTML string instead of a file or URL
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Selector to match, e.g. `div#main > a.nav[href^=http]`
    #[arg(short, long, value_name = "SELECTOR", required_unless_present = "tokens")]
    selector: Option<String>,

    /// Print this attribute instead of inner text (`value` means inner text)
    #[arg(short, long, value_name = "NAME")]
    attr: Option<String>,

    /// Also extract elements nested inside other elements
    #[arg(long)]
    deep: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print the tokenizer's raw slices and exit
    #[arg(long)]
    tokens: bool,

    /// Request timeout in seconds for URLs
    #[arg(long, value_name = "SECS", default_value_t = TIMEOUT.as_secs())]
    timeout: u64,

    /// User-Agent header for URLs
    #[arg(long, value_name = "UA", default_value = USER_AGENT)]
    user_agent: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let html = load_source(&cli)?;

    if cli.tokens {
        let mut tokenizer = Tokenizer::new(&html);
        tokenizer.run();
        return print_slices(tokenizer.slices(), cli.json);
    }

    let Some(selector) = cli.selector.as_deref() else {
        bail!("a selector is required (-s/--selector)");
    };
    let mode = if cli.deep {
        ExtractMode::Deep
    } else {
        ExtractMode::Shallow
    };

    let elements = query_document_with(&html, selector, mode)?;

    match (cli.attr.as_deref(), cli.json) {
        (Some(attr), true) => {
            println!("{}", serde_json::to_string_pretty(&project_attribute(&elements, attr))?);
        }
        (None, true) => println!("{}", serde_json::to_string_pretty(&elements)?),
        (Some(attr), false) => {
            for value in project_attribute(&elements, attr).into_iter().flatten() {
                println!("{value}");
            }
        }
        (None, false) => {
            for element in &elements {
                println!("{}", element.inner_text());
            }
        }
    }

    if !cli.json {
        eprintln!(
            "{}",
            format!("{} match(es) for {selector} ({mode})", elements.len()).dimmed()
        );
    }
    Ok(())
}

/// Read the document named on the command line.
fn load_source(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone());
    }
    let Some(ref path) = cli.path else {
        bail!("a file path, URL, or --html is required");
    };

    if !is_url(path) {
        return fs::read_to_string(path).with_context(|| format!("Failed to read '{path}'"));
    }

    let config = FetchConfig {
        timeout: Duration::from_secs(cli.timeout),
        user_agent: cli.user_agent.clone(),
    };
    let text = HttpFetcher::new(&config)?.fetch(path)?;
    if !is_html_document(&text) {
        let _ = warn_once("cli", &format!("{path} does not look like an HTML document"));
    }
    Ok(text)
}

fn is_url(path: &str) -> bool {
    let lowered = path.to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

fn print_slices(slices: &[RawSlice], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(slices)?);
        return Ok(());
    }
    for slice in slices {
        println!(
            "{:<8} {:<8} {}",
            slice.category.to_string().cyan(),
            slice.origin.to_string().dimmed(),
            slice.text
        );
    }
    Ok(())
}
