//! Integration tests converting documents parsed by html5ever.

use std::io::{self, Read};

use htmljson_dom::save::{load_from_path, save_to_path};
use htmljson_dom::{Node, NodeKind, Query, find_all, find_first, search_all_nodes, search_node};
use htmljson_html::{ParseError, parse_bytes, parse_file, parse_reader, parse_str};

/// Helper to find the first element with a tag name.
fn element<'a>(tree: &'a Node, tag: &str) -> &'a Node {
    find_first(&Query::new().kind(NodeKind::Element).data(tag), tree)
        .unwrap_or_else(|| panic!("<{tag}> not found"))
}

#[test]
fn test_div_p_hi() {
    let tree = parse_str(r#"<div id="x"><p>hi</p></div>"#);
    assert_eq!(tree.kind, NodeKind::Document);
    assert_eq!(tree.data, "");

    let div = element(&tree, "div");
    assert_eq!(div.attributes.len(), 1);
    assert_eq!(div.attributes[0].key, "id");
    assert_eq!(div.attributes[0].val, "x");
    assert_eq!(div.attributes[0].namespace, "");
    assert_eq!(div.children.len(), 1);

    let p = &div.children[0];
    assert_eq!((p.kind, p.data.as_str()), (NodeKind::Element, "p"));
    assert_eq!(p.children, vec![Node::new(NodeKind::Text, "hi")]);

    let found = search_node("element", "p", "", "", "", &tree).expect("p is found");
    assert!(std::ptr::eq(found, p));

    let with_id = search_all_nodes("", "", "", "id", "", &tree);
    assert_eq!(with_id.len(), 1);
    assert!(std::ptr::eq(with_id[0], div));
}

#[test]
fn test_document_structure_is_complete() {
    let tree = parse_str("<!DOCTYPE html><html><head><title>T</title></head><body></body></html>");
    let kinds: Vec<(NodeKind, &str)> = tree
        .pre_order()
        .map(|n| (n.kind, n.data.as_str()))
        .collect();
    assert_eq!(
        kinds,
        [
            (NodeKind::Document, ""),
            (NodeKind::Doctype, "html"),
            (NodeKind::Element, "html"),
            (NodeKind::Element, "head"),
            (NodeKind::Element, "title"),
            (NodeKind::Text, "T"),
            (NodeKind::Element, "body"),
        ]
    );
    // The html5 doctype carries no identifiers.
    assert!(tree.children[0].attributes.is_empty());
}

#[test]
fn test_legacy_doctype_identifiers_become_attributes() {
    let tree = parse_str(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd"><p>x</p>"#,
    );
    let doctype = find_first(&Query::new().kind(NodeKind::Doctype), &tree).expect("doctype");
    assert_eq!(doctype.attr("public"), Some("-//W3C//DTD HTML 4.01//EN"));
    assert_eq!(doctype.attr("system"), Some("http://www.w3.org/TR/html4/strict.dtd"));
}

#[test]
fn test_comment_body_is_data() {
    let tree = parse_str("<body><!-- note --></body>");
    let comment = find_first(&Query::new().kind(NodeKind::Comment), &tree).expect("comment");
    assert_eq!(comment.data, " note ");
    assert!(comment.is_leaf());
}

#[test]
fn test_html_elements_have_empty_namespace() {
    let tree = parse_str("<p>a</p>");
    assert!(
        find_all(&Query::new().kind(NodeKind::Element), &tree)
            .iter()
            .all(|n| n.namespace.is_empty())
    );
}

#[test]
fn test_foreign_content_namespaces() {
    let tree = parse_str(
        r##"<body><svg><a xlink:href="#t"><circle r="1"/></a></svg><math><mi>x</mi></math></body>"##,
    );

    let svg = element(&tree, "svg");
    assert_eq!(svg.namespace, "svg");
    let circle = element(&tree, "circle");
    assert_eq!(circle.namespace, "svg");

    let link = find_first(&Query::new().namespace("svg").data("a"), &tree).expect("svg a");
    assert_eq!(link.attributes.len(), 1);
    assert_eq!(link.attributes[0].namespace, "xlink");
    assert_eq!(link.attributes[0].key, "href");
    assert_eq!(link.attributes[0].val, "#t");

    let mi = element(&tree, "mi");
    assert_eq!(mi.namespace, "math");
}

#[test]
fn test_template_contents_are_children() {
    let tree = parse_str("<template><li>one</li><li>two</li></template>");
    let template = element(&tree, "template");
    let items: Vec<&str> = template.children.iter().map(|n| n.data.as_str()).collect();
    assert_eq!(items, ["li", "li"]);
    assert_eq!(template.children[1].children[0].data, "two");
}

#[test]
fn test_attribute_order_is_preserved() {
    let tree = parse_str(r#"<input type="checkbox" name="n" checked value="">"#);
    let input = element(&tree, "input");
    let keys: Vec<&str> = input.attributes.iter().map(|a| a.key.as_str()).collect();
    assert_eq!(keys, ["type", "name", "checked", "value"]);
    assert_eq!(input.attr("checked"), Some(""));
}

#[test]
fn test_text_and_entities() {
    let tree = parse_str("<p>fish &amp; chips</p>");
    let text = find_first(&Query::new().kind(NodeKind::Text), &tree).expect("text");
    assert_eq!(text.data, "fish & chips");
}

#[test]
fn test_malformed_markup_still_converts() {
    let tree = parse_str("<div><p>unclosed<span>nested</div>trailing");
    assert!(find_first(&Query::new().data("span"), &tree).is_some());
    let texts: Vec<&str> = find_all(&Query::new().kind(NodeKind::Text), &tree)
        .iter()
        .map(|n| n.data.as_str())
        .collect();
    assert_eq!(texts, ["unclosed", "nested", "trailing"]);
}

#[test]
fn test_empty_input_yields_document_skeleton() {
    let tree = parse_str("");
    assert_eq!(tree.kind, NodeKind::Document);
    let tags: Vec<&str> = find_all(&Query::new().kind(NodeKind::Element), &tree)
        .iter()
        .map(|n| n.data.as_str())
        .collect();
    assert_eq!(tags, ["html", "head", "body"]);
}

#[test]
fn test_deeply_nested_page_survives_save_and_load() {
    let html = format!("{}deep{}", "<div>".repeat(250), "</div>".repeat(250));
    let tree = parse_str(&html);
    assert_eq!(find_all(&Query::new().data("div"), &tree).len(), 250);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deep.json");
    save_to_path(&tree, &path).expect("saves");
    let loaded = load_from_path(&path).expect("loads past the default JSON nesting limit");

    assert_eq!(loaded, tree);
    let text = find_first(&Query::new().kind(NodeKind::Text), &loaded).expect("text");
    assert_eq!(text.data, "deep");
}

// ========== entry points ==========

#[test]
fn test_string_bytes_and_reader_agree() {
    let html = "<ul><li class=\"a\">é</li><li>2</li></ul>";
    let from_str = parse_str(html);
    assert_eq!(parse_bytes(html.as_bytes()), from_str);
    assert_eq!(parse_reader(html.as_bytes()).expect("reads"), from_str);
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let tree = parse_bytes(b"<p>a\xffb</p>");
    let text = find_first(&Query::new().kind(NodeKind::Text), &tree).expect("text");
    assert_eq!(text.data, "a\u{fffd}b");
}

#[test]
fn test_parse_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("page.html");
    std::fs::write(&path, "<title>File</title>").expect("write");

    let tree = parse_file(&path).expect("parses");
    let title = element(&tree, "title");
    assert_eq!(title.children[0].data, "File");
}

#[test]
fn test_parse_missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.html");

    let err = parse_file(&path).expect_err("file does not exist");
    match &err {
        ParseError::Open { path: p, source } => {
            assert_eq!(*p, path);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        ParseError::Read(e) => panic!("expected Open, got Read({e})"),
    }
    assert!(err.to_string().contains("absent.html"));
}

/// A reader that fails after yielding some input.
struct FailingReader {
    sent: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream reset"));
        }
        self.sent = true;
        let chunk = b"<p>partial";
        buf[..chunk.len()].copy_from_slice(chunk);
        Ok(chunk.len())
    }
}

#[test]
fn test_reader_error_is_propagated_unchanged() {
    let err = parse_reader(FailingReader { sent: false }).expect_err("reader fails");
    match err {
        ParseError::Read(e) => {
            assert_eq!(e.kind(), io::ErrorKind::ConnectionReset);
            assert_eq!(e.to_string(), "stream reset");
        }
        ParseError::Open { .. } => panic!("expected Read"),
    }
}
