//! htmljson CLI
//!
//! Parses HTML into the simplified tree, optionally searches it, and prints
//! or saves the result as JSON.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use htmljson_common::warning::set_quiet;
use htmljson_dom::save::{load_from_path, save_nodes_to_path, save_to_path};
use htmljson_dom::{Node, Query, find_all, find_first, json};
use htmljson_html::{parse_file, parse_reader, parse_str};
use owo_colors::OwoColorize;
use serde::Serialize;

/// htmljson — convert HTML into a JSON tree and search it
#[derive(Parser, Debug)]
#[command(name = "htmljson")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Dump a file as JSON
    htmljson page.html

    # First <p> element, pretty-printed
    htmljson page.html --type element --data p --pretty

    # Every node with an id attribute, saved to a file
    htmljson page.html --key id --all -o ids.json

    # Parse inline HTML
    htmljson --html '<div id="x"><p>hi</p></div>'

    # Search a tree saved earlier
    htmljson --from-json html_node.json --data a --all
"#)]
struct Cli {
    /// HTML (or JSON with --from-json) file to read; stdin when omitted
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of reading a file
    #[arg(long, value_name = "HTML", conflicts_with_all = ["path", "from_json"])]
    html: Option<String>,

    /// Input is a tree previously saved as JSON
    #[arg(long)]
    from_json: bool,

    /// Match node type (text, document, element, comment, doctype)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    kind: Option<String>,

    /// Match node data (tag name, text, comment body)
    #[arg(short, long)]
    data: Option<String>,

    /// Match element namespace
    #[arg(short, long)]
    namespace: Option<String>,

    /// Match nodes having an attribute with this key
    #[arg(short, long)]
    key: Option<String>,

    /// Match nodes having an attribute with this value (under any key)
    #[arg(short, long)]
    val: Option<String>,

    /// Return every match instead of the first
    #[arg(short, long)]
    all: bool,

    /// Save the result to this file instead of printing it
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pretty-print JSON written to stdout
    #[arg(short, long)]
    pretty: bool,

    /// Don't print converter warnings
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn query(&self) -> Query {
        Query::from_filters(
            self.kind.as_deref().unwrap_or_default(),
            self.data.as_deref().unwrap_or_default(),
            self.namespace.as_deref().unwrap_or_default(),
            self.key.as_deref().unwrap_or_default(),
            self.val.as_deref().unwrap_or_default(),
        )
    }
}

/// What gets written out.
#[derive(Debug)]
enum Selection<'a> {
    Tree(&'a Node),
    Nodes(Vec<&'a Node>),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    set_quiet(cli.quiet);
    let tree = load_tree(cli)?;
    let selection = select(&cli.query(), cli.all, &tree)?;
    write_selection(&selection, cli)
}

fn load_tree(cli: &Cli) -> Result<Node> {
    if let Some(html) = &cli.html {
        return Ok(parse_str(html));
    }
    match (&cli.path, cli.from_json) {
        (Some(path), true) => Ok(load_from_path(path)?),
        (Some(path), false) => Ok(parse_file(path)?),
        (None, true) => {
            json::from_reader(io::stdin().lock()).context("stdin is not a saved tree")
        }
        (None, false) => parse_reader(io::stdin().lock()).context("failed to read stdin"),
    }
}

fn select<'a>(query: &Query, all: bool, tree: &'a Node) -> Result<Selection<'a>> {
    if all {
        return Ok(Selection::Nodes(find_all(query, tree)));
    }
    if query.is_wildcard() {
        return Ok(Selection::Tree(tree));
    }
    match find_first(query, tree) {
        Some(node) => Ok(Selection::Tree(node)),
        None => bail!("no node matches the query"),
    }
}

fn write_selection(selection: &Selection<'_>, cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.output {
        match selection {
            Selection::Tree(node) => save_to_path(node, path)?,
            Selection::Nodes(nodes) => save_nodes_to_path(nodes, path)?,
        }
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match selection {
        Selection::Tree(node) => print_json(&mut out, node, cli.pretty)?,
        Selection::Nodes(nodes) => print_json(&mut out, nodes, cli.pretty)?,
    }
    writeln!(out)?;
    Ok(())
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    json::to_writer(out, value, pretty)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use htmljson_dom::NodeKind;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("htmljson").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn test_filters_become_query() {
        let cli = cli(&["page.html", "--type", "element", "-d", "p", "--key", "id"]);
        assert_eq!(
            cli.query(),
            Query::new().kind(NodeKind::Element).data("p").attr_key("id")
        );
        assert!(!cli.all);
    }

    #[test]
    fn test_html_conflicts_with_path() {
        let result = Cli::try_parse_from(["htmljson", "page.html", "--html", "<p>"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_filters_selects_whole_tree() {
        let tree = parse_str("<p>hi</p>");
        let selection = select(&Query::new(), false, &tree).expect("selects");
        assert!(matches!(selection, Selection::Tree(node) if std::ptr::eq(node, &tree)));
    }

    #[test]
    fn test_find_first_miss_is_an_error() {
        let tree = parse_str("<p>hi</p>");
        let err = select(&Query::new().data("table"), false, &tree).expect_err("no table");
        assert!(err.to_string().contains("no node matches"));
    }

    #[test]
    fn test_all_with_no_match_is_empty_array() {
        let tree = parse_str("<p>hi</p>");
        let selection = select(&Query::new().data("table"), true, &tree).expect("selects");
        let Selection::Nodes(nodes) = &selection else {
            panic!("expected node list");
        };
        assert!(nodes.is_empty());

        let mut out = Vec::new();
        print_json(&mut out, nodes, false).expect("writes");
        assert_eq!(out, b"[]");
    }

    #[test]
    fn test_deeply_nested_page_prints() {
        let html = "<div>".repeat(5_000);
        let cli = cli(&["--html", html.as_str()]);
        let tree = load_tree(&cli).expect("loads");
        let selection = select(&cli.query(), cli.all, &tree).expect("selects");
        let Selection::Tree(node) = selection else {
            panic!("expected whole tree");
        };

        let mut out = Vec::new();
        print_json(&mut out, node, true).expect("deep tree prints");
        let printed: Node = json::from_reader(out.as_slice()).expect("output parses back");
        assert_eq!(printed.node_count(), tree.node_count());
    }

    #[test]
    fn test_inline_html_round_trip_to_json() {
        let cli = cli(&["--html", r#"<div id="x"><p>hi</p></div>"#, "-t", "element", "-d", "p"]);
        let tree = load_tree(&cli).expect("loads");
        let Selection::Tree(node) = select(&cli.query(), cli.all, &tree).expect("selects") else {
            panic!("expected single node");
        };
        let mut out = Vec::new();
        print_json(&mut out, node, false).expect("writes");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            r#"{"type":"element","data":"p","namespace":"","attr":[],"child":[{"type":"text","data":"hi","namespace":"","attr":[],"child":[]}]}"#
        );
    }
}
