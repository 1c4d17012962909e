use std::collections::HashMap;

use crate::tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerError};

/// The export format's folder-marker attribute, as the tokenizer reports it
/// (attribute names are lowercased during tokenization). An `<H3>` carrying
/// it names a browser toolbar folder, not a bookmark category.
const TOOLBAR_FOLDER_ATTRIBUTE: &str = "personal_toolbar_folder";

/// A single bookmark entry extracted from the export document.
///
/// Immutable once appended to a category: the walker only ever builds a
/// bookmark from a captured `href` plus the text that follows it, and never
/// revisits one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Display text of the bookmark.
    pub name: String,
    /// Target of the bookmark's `href` attribute. Not validated: whatever
    /// the document carries is what the caller gets.
    pub url: String,
}

/// The last relevant opening tag seen by the walker. Only `<a>` and `<h3>`
/// drive the walk; every other tag leaves this untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackedTag {
    /// No relevant tag seen yet.
    None,
    /// Inside (after) an `<a href=...>` start tag.
    Anchor,
    /// Inside (after) a category `<h3>` start tag.
    Heading,
}

/// Single-pass state walk over the token stream.
///
/// Transient by design: one walker per invocation, dropped on return, no
/// process-wide state. Concurrent parses are fully independent.
struct BookmarkWalker {
    tokenizer: HTMLTokenizer,
    /// Last relevant opening tag (`currentTag` in the format's reference
    /// implementations).
    current_tag: TrackedTag,
    /// Most recent `<h3>` heading text. Bookmarks seen before any heading
    /// go under the empty-string category.
    current_category: String,
    /// URL captured from an `<a href=...>` tag, waiting for its display
    /// name. Left in place and simply overwritten if the name never comes.
    pending_url: Option<String>,
    /// True once a URL has been captured and the next meaningful text token
    /// is expected to be the bookmark's name.
    awaiting_name: bool,
    /// Accumulated result. Category entries are created lazily on first
    /// append, so a heading that never receives a bookmark never appears.
    bookmarks: HashMap<String, Vec<Bookmark>>,
}

impl BookmarkWalker {
    fn new(document: &str) -> Self {
        Self {
            tokenizer: HTMLTokenizer::new(document.to_string()),
            current_tag: TrackedTag::None,
            current_category: String::new(),
            pending_url: None,
            awaiting_name: false,
            bookmarks: HashMap::new(),
        }
    }

    /// Drive the tokenizer to exhaustion, folding tokens into the mapping.
    ///
    /// Two terminal states only: a clean [`Token::EndOfFile`] returns the
    /// accumulated mapping; a tokenizer error propagates unchanged and
    /// discards everything accumulated so far.
    fn walk(mut self) -> Result<HashMap<String, Vec<Bookmark>>, TokenizerError> {
        loop {
            match self.tokenizer.next_token()? {
                Token::EndOfFile => return Ok(self.bookmarks),
                Token::Text { data } => self.handle_text(data),
                Token::StartTag {
                    name, attributes, ..
                } => self.handle_start_tag(&name, &attributes),
                // No nesting depth or end-tag matching: closing tags,
                // comments, and the doctype carry nothing the mapping needs.
                Token::EndTag { .. } | Token::Comment { .. } | Token::Doctype { .. } => {}
            }
        }
    }

    fn handle_start_tag(&mut self, name: &str, attributes: &[Attribute]) {
        match name {
            "h3" => {
                // Toolbar-folder headings are structural, not categories:
                // skipped entirely, without touching the tracked tag, so the
                // heading's text falls through as stray text.
                if !is_toolbar_folder(attributes) {
                    self.current_tag = TrackedTag::Heading;
                }
            }
            "a" => {
                // An anchor without an href is not a bookmark and changes no
                // state at all.
                if let Some(href) = find_href(attributes) {
                    self.pending_url = Some(href);
                    self.current_tag = TrackedTag::Anchor;
                    self.awaiting_name = true;
                }
            }
            _ => {}
        }
    }

    fn handle_text(&mut self, data: String) {
        // Inter-tag newline noise. The reference behavior skips any text
        // token containing a line break, not just whitespace-only runs;
        // conforming exports never break a name across lines, so the
        // readings agree where it matters.
        if contains_line_break(&data) {
            return;
        }

        match self.current_tag {
            TrackedTag::Anchor => {
                if self.awaiting_name {
                    // Both halves captured: the bookmark exists now, filed
                    // under whatever category is current.
                    if let Some(url) = self.pending_url.take() {
                        self.bookmarks
                            .entry(self.current_category.clone())
                            .or_default()
                            .push(Bookmark { name: data, url });
                    }
                    self.awaiting_name = false;
                }
            }
            // Last text run before the next relevant tag wins as the
            // category name.
            TrackedTag::Heading => self.current_category = data,
            TrackedTag::None => {}
        }
    }
}

/// Scan a tag's attributes for `href`. Last occurrence wins on malformed
/// input carrying duplicates, so the scan never stops early.
fn find_href(attributes: &[Attribute]) -> Option<String> {
    let mut href = None;
    for attribute in attributes {
        if attribute.name == "href" {
            href = Some(attribute.value.clone());
        }
    }
    href
}

/// Whether an `<h3>` carries the folder-organizing marker attribute.
fn is_toolbar_folder(attributes: &[Attribute]) -> bool {
    attributes
        .iter()
        .any(|attribute| attribute.name == TOOLBAR_FOLDER_ATTRIBUTE)
}

/// Whether the text run contains any line-break character.
fn contains_line_break(input: &str) -> bool {
    input.contains(['\n', '\r'])
}

/// Parse an exported Google Bookmarks HTML document into a mapping from
/// category name to the bookmarks filed under it, in document order.
///
/// Bookmarks that precede any `<h3>` heading are filed under the
/// empty-string category. Categories that never receive a bookmark do not
/// appear in the mapping. Iteration order *across* categories is
/// unspecified; the `Vec` under each category preserves document order.
///
/// Missing `href`s, headings without bookmarks, and bookmarks whose name
/// text never arrives are not errors: those entries are silently skipped,
/// best-effort, matching how browsers treat these hand-editable files.
///
/// # Errors
///
/// Returns the tokenizer's error unchanged when the document is malformed
/// (truncated inside a tag, attribute value, comment, or doctype). Nothing
/// accumulated before the error is returned.
pub fn parse_exported_google_bookmarks(
    document: &str,
) -> Result<HashMap<String, Vec<Bookmark>>, TokenizerError> {
    BookmarkWalker::new(document).walk()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_href_takes_last_occurrence() {
        let attributes = vec![
            Attribute::new("href".to_string(), "http://first".to_string()),
            Attribute::new("target".to_string(), "_blank".to_string()),
            Attribute::new("href".to_string(), "http://last".to_string()),
        ];
        assert_eq!(find_href(&attributes), Some("http://last".to_string()));
    }

    #[test]
    fn find_href_absent() {
        let attributes = vec![Attribute::new("target".to_string(), "_blank".to_string())];
        assert_eq!(find_href(&attributes), None);
    }

    #[test]
    fn toolbar_folder_detection() {
        let attributes = vec![Attribute::new(
            TOOLBAR_FOLDER_ATTRIBUTE.to_string(),
            "true".to_string(),
        )];
        assert!(is_toolbar_folder(&attributes));
        assert!(!is_toolbar_folder(&[]));
    }

    #[test]
    fn line_break_detection() {
        assert!(contains_line_break("\n"));
        assert!(contains_line_break("\r\n    "));
        assert!(contains_line_break("broken\nname"));
        assert!(!contains_line_break("My Bookmark"));
        assert!(!contains_line_break(""));
    }
}
