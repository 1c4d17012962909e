//! Integration tests for the bookmark walker.

use std::collections::HashMap;

use bookmarker_html::{Bookmark, TokenizerError, parse_exported_google_bookmarks};

/// Helper to parse a document expected to be well-formed.
fn parse(input: &str) -> HashMap<String, Vec<Bookmark>> {
    parse_exported_google_bookmarks(input).expect("parse failed")
}

/// Helper to build the expected Bookmark value.
fn bookmark(name: &str, url: &str) -> Bookmark {
    Bookmark {
        name: name.to_string(),
        url: url.to_string(),
    }
}

#[test]
fn test_one_folder_one_bookmark() {
    let result = parse(r#"<h3>Cat</h3><a href="http://x">Name</a>"#);
    assert_eq!(result.len(), 1);
    assert_eq!(result["Cat"], vec![bookmark("Name", "http://x")]);
}

#[test]
fn test_bookmark_without_folder_goes_under_empty_category() {
    let result = parse(r#"<a href="http://x">Name</a>"#);
    assert_eq!(result.len(), 1);
    assert_eq!(result[""], vec![bookmark("Name", "http://x")]);
}

#[test]
fn test_empty_document() {
    let result = parse("");
    assert!(result.is_empty());
}

#[test]
fn test_anchor_without_href_produces_nothing() {
    // The href-less anchor changes no walker state: its text is stray text,
    // and the following real bookmark still lands under the empty category.
    let result = parse(r#"<a>NoHref</a><a href="http://x">Real</a>"#);
    assert_eq!(result.len(), 1);
    assert_eq!(result[""], vec![bookmark("Real", "http://x")]);
}

#[test]
fn test_toolbar_folder_heading_is_not_a_category() {
    let result = parse(
        r#"<H3 PERSONAL_TOOLBAR_FOLDER="true">Bookmarks Bar</H3><a href="http://x">X</a>"#,
    );
    // The heading's text must not become the category: the bookmark files
    // under the empty-string key and "Bookmarks Bar" appears nowhere.
    assert_eq!(result.len(), 1);
    assert_eq!(result[""], vec![bookmark("X", "http://x")]);
}

#[test]
fn test_toolbar_folder_does_not_clobber_previous_category() {
    let result = parse(
        r#"<h3>Work</h3><a href="http://a">A</a><h3 personal_toolbar_folder="true">Bar</h3><a href="http://b">B</a>"#,
    );
    // "Bar" is skipped entirely; its text falls through while the tracked
    // tag is still the anchor (whose name was already taken), so "Work"
    // remains current.
    assert_eq!(result.len(), 1);
    assert_eq!(
        result["Work"],
        vec![bookmark("A", "http://a"), bookmark("B", "http://b")]
    );
}

#[test]
fn test_newline_noise_is_skipped() {
    let result = parse("<h3>Cat</h3>\n\r\n<a href=\"http://x\">A</a>\n");
    // The newline runs between tags neither overwrite the category nor get
    // taken as a bookmark name.
    assert_eq!(result.len(), 1);
    assert_eq!(result["Cat"], vec![bookmark("A", "http://x")]);
}

#[test]
fn test_intra_category_order_is_document_order() {
    let mut document = String::from("<h3>Seq</h3>");
    for i in 0..10 {
        document.push_str(&format!(r#"<a href="http://host/{i}">Entry {i}</a>"#));
    }
    let result = parse(&document);
    let entries = &result["Seq"];
    assert_eq!(entries.len(), 10);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.name, format!("Entry {i}"));
        assert_eq!(entry.url, format!("http://host/{i}"));
    }
}

#[test]
fn test_multiple_categories() {
    let result = parse(concat!(
        r#"<h3>Work</h3><a href="http://a">A</a>"#,
        r#"<h3>Play</h3><a href="http://b">B</a><a href="http://c">C</a>"#,
    ));
    assert_eq!(result.len(), 2);
    assert_eq!(result["Work"], vec![bookmark("A", "http://a")]);
    assert_eq!(
        result["Play"],
        vec![bookmark("B", "http://b"), bookmark("C", "http://c")]
    );
}

#[test]
fn test_consecutive_headings_overwrite_category() {
    let result = parse(r#"<h3>First</h3><h3>Second</h3><a href="http://x">X</a>"#);
    // "First" received no bookmarks and entries are created lazily, so it
    // never appears in the result at all.
    assert_eq!(result.len(), 1);
    assert_eq!(result["Second"], vec![bookmark("X", "http://x")]);
}

#[test]
fn test_heading_text_last_run_wins() {
    // An ignored tag splits the heading text into two runs; the later run
    // overwrites the earlier one as the category name.
    let result = parse(r#"<h3>First<br>Second</h3><a href="http://x">X</a>"#);
    assert_eq!(result.len(), 1);
    assert_eq!(result["Second"], vec![bookmark("X", "http://x")]);
}

#[test]
fn test_bookmark_whose_name_never_arrives_is_lost() {
    let result = parse(r#"<h3>Cat</h3><a href="http://lost"><dt><a href="http://kept">Kept</a>"#);
    assert_eq!(result.len(), 1);
    assert_eq!(result["Cat"], vec![bookmark("Kept", "http://kept")]);
}

#[test]
fn test_duplicate_href_last_occurrence_wins() {
    let result = parse(r#"<a href="http://first" href="http://second">Name</a>"#);
    assert_eq!(result[""], vec![bookmark("Name", "http://second")]);
}

#[test]
fn test_character_references_in_names_and_urls() {
    let result = parse(concat!(
        "<h3>R &amp; D</h3>",
        r#"<a href="http://example.com/?a=1&amp;b=2">Q&amp;A</a>"#,
    ));
    assert_eq!(
        result["R & D"],
        vec![bookmark("Q&A", "http://example.com/?a=1&b=2")]
    );
}

#[test]
fn test_full_export_document() {
    // The shape a real export takes: doctype, metadata, comment, and the
    // definition-list structure around headings and anchors.
    let document = concat!(
        "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n",
        "<!-- This is an automatically generated file. -->\n",
        "<TITLE>Bookmarks</TITLE>\n",
        "<H1>Bookmarks</H1>\n",
        "<DL><p>\n",
        "    <DT><H3>Work</H3>\n",
        "    <DL><p>\n",
        "        <DT><A HREF=\"http://a.com\">A</A>\n",
        "        <DT><A HREF=\"http://b.com\">B</A>\n",
        "    </DL><p>\n",
        "</DL><p>\n",
    );
    let result = parse(document);
    assert_eq!(result.len(), 1);
    assert_eq!(
        result["Work"],
        vec![bookmark("A", "http://a.com"), bookmark("B", "http://b.com")]
    );
}

#[test]
fn test_nested_definition_lists() {
    let result = parse(concat!(
        "<DL><DT><H3>Work</H3>",
        r#"<DL><DT><A HREF="http://a.com">A</A>"#,
        r#"<DT><A HREF="http://b.com">B</A></DL></DL>"#,
    ));
    assert_eq!(result.len(), 1);
    assert_eq!(
        result["Work"],
        vec![bookmark("A", "http://a.com"), bookmark("B", "http://b.com")]
    );
}

#[test]
fn test_malformed_document_discards_everything() {
    // Valid bookmarks preceded the truncation; none of them survive.
    let result = parse_exported_google_bookmarks(
        r#"<h3>Cat</h3><a href="http://a">A</a><a href="http://trunc"#,
    );
    assert!(matches!(
        result,
        Err(TokenizerError::EofInAttributeValue { .. })
    ));
}

#[test]
fn test_truncated_tag_is_an_error() {
    let result = parse_exported_google_bookmarks(r#"<a href="http://a">A</a><dt"#);
    assert!(matches!(result, Err(TokenizerError::EofInTag { .. })));
}

#[test]
fn test_title_text_is_not_a_bookmark_or_category() {
    // Stray text under untracked tags is ignored.
    let result = parse(r#"<title>Bookmarks</title><a href="http://x">X</a>"#);
    assert_eq!(result.len(), 1);
    assert_eq!(result[""], vec![bookmark("X", "http://x")]);
}
