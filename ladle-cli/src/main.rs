//! Ladle CLI
//!
//! Parse an HTML file or string, then render it, print its title, dump its
//! tree or run simple `tag` / `#id` / `.class` queries against it.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use ladle_common::warning::set_quiet;
use ladle_dom::{Document, Query};
use ladle_html::{HTMLParser, ParseIssue, print_tree, tokenize};
use owo_colors::OwoColorize;

/// Ladle: a permissive HTML parser with tag, id and class lookups
#[derive(Parser, Debug)]
#[command(name = "ladle")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Render a file back as indented markup
    ladle ./index.html

    # Print the title and every element with class "card"
    ladle --title --select .card ./index.html

    # Parse inline HTML and dump it as JSON
    ladle --json --html '<p id="a">Hi</p>'
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print every element matching QUERY (`tag`, `#id` or `.class`)
    #[arg(short, long, value_name = "QUERY")]
    select: Vec<String>,

    /// Print the document title
    #[arg(short, long)]
    title: bool,

    /// Print the debug tree
    #[arg(long)]
    tree: bool,

    /// Print the document as JSON
    #[arg(long)]
    json: bool,

    /// Print unmatched end tags and elements left open
    #[arg(long)]
    issues: bool,

    /// Silence parser warnings
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn has_action(&self) -> bool {
        !self.select.is_empty() || self.title || self.tree || self.json || self.issues
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_quiet(cli.quiet);

    // Reject malformed queries before doing any work.
    let queries = cli
        .select
        .iter()
        .map(|raw| Query::parse(raw).with_context(|| format!("invalid query `{raw}`")))
        .collect::<Result<Vec<_>>>()?;

    let source = load_source(&cli)?;
    let (doc, issues) = HTMLParser::new(tokenize(&source)).run_with_issues();

    if cli.title {
        match doc.title() {
            Some(title) => println!("{title}"),
            None => println!("{}", "(no title)".dimmed()),
        }
    }

    for (raw, query) in cli.select.iter().zip(&queries) {
        print_matches(&doc, raw, query);
    }

    if cli.tree {
        print_tree(doc.tree(), doc.root(), 0);
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&doc.tree().serializable(doc.root()))
            .context("failed to serialize document")?;
        println!("{json}");
    }

    if cli.issues {
        print_issues(&issues);
    }

    if !cli.has_action() {
        println!("{}", doc.render());
    }

    Ok(())
}

/// Read the markup named on the command line.
fn load_source(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        bail!("expected a file path or --html")
    }
}

fn print_matches(doc: &Document, raw: &str, query: &Query) {
    let matches = doc.select(query);
    println!(
        "{} {}",
        format!("=== {raw} ===").bold(),
        format!("({} match{})", matches.len(), if matches.len() == 1 { "" } else { "es" })
            .dimmed()
    );
    for id in matches {
        println!("{}", doc.tree().render(id, 0));
    }
}

fn print_issues(issues: &[ParseIssue]) {
    if issues.is_empty() {
        println!("{}", "no parse issues".green());
        return;
    }
    println!("{}", "=== Parse Issues ===".bold());
    for issue in issues {
        println!(
            "  - {} {} {}",
            format!("[token {}]", issue.token_index).dimmed(),
            issue.kind.yellow(),
            issue.message
        );
    }
}
