//! Integration tests for the HTML tokenizer.

use bookmarker_html::{HTMLTokenizer, Token, TokenizerError};

/// Helper to pull every token out of an input expected to be well-formed,
/// ending with the EOF token.
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input.to_string());
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token().expect("tokenizer error");
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

/// Helper to drive an input expected to be malformed into its error.
fn tokenize_err(input: &str) -> TokenizerError {
    let mut tokenizer = HTMLTokenizer::new(input.to_string());
    loop {
        match tokenizer.next_token() {
            Ok(token) => assert!(!token.is_eof(), "expected an error, got clean EOF"),
            Err(err) => return err,
        }
    }
}

#[test]
fn test_plain_text_is_one_run() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 2); // text run + EOF
    match &tokens[0] {
        Token::Text { data } => assert_eq!(data, "Hello"),
        other => panic!("Expected Text token, got {other}"),
    }
    assert!(matches!(tokens[1], Token::EndOfFile));
}

#[test]
fn test_empty_input_is_just_eof() {
    let tokens = tokenize("");
    assert_eq!(tokens, vec![Token::EndOfFile]);
}

#[test]
fn test_eof_token_repeats() {
    let mut tokenizer = HTMLTokenizer::new("x".to_string());
    assert!(matches!(
        tokenizer.next_token(),
        Ok(Token::Text { .. })
    ));
    assert!(matches!(tokenizer.next_token(), Ok(Token::EndOfFile)));
    assert!(matches!(tokenizer.next_token(), Ok(Token::EndOfFile)));
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE NETSCAPE-Bookmark-file-1>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Doctype { data } => assert_eq!(data, "NETSCAPE-Bookmark-file-1"),
        other => panic!("Expected Doctype token, got {other}"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<dt>");
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "dt");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        other => panic!("Expected StartTag token, got {other}"),
    }
}

#[test]
fn test_tag_name_is_lowercased() {
    let tokens = tokenize("<DT><H3>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "dt"));
    assert!(matches!(&tokens[1], Token::StartTag { name, .. } if name == "h3"));
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</H3>");
    match &tokens[0] {
        Token::EndTag { name, .. } => assert_eq!(name, "h3"),
        other => panic!("Expected EndTag token, got {other}"),
    }
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        other => panic!("Expected self-closing StartTag token, got {other}"),
    }
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<A HREF="http://example.com/">"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "a");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "href");
            assert_eq!(attributes[0].value, "http://example.com/");
        }
        other => panic!("Expected StartTag token, got {other}"),
    }
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<a href='http://example.com/'>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].value, "http://example.com/");
        }
        other => panic!("Expected StartTag token, got {other}"),
    }
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<a href=http://example.com/ target=_blank>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 2);
            assert_eq!(attributes[0].name, "href");
            assert_eq!(attributes[0].value, "http://example.com/");
            assert_eq!(attributes[1].name, "target");
            assert_eq!(attributes[1].value, "_blank");
        }
        other => panic!("Expected StartTag token, got {other}"),
    }
}

#[test]
fn test_attribute_name_is_lowercased() {
    let tokens = tokenize(r#"<H3 PERSONAL_TOOLBAR_FOLDER="true">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].name, "personal_toolbar_folder");
            assert_eq!(attributes[0].value, "true");
        }
        other => panic!("Expected StartTag token, got {other}"),
    }
}

#[test]
fn test_duplicate_attributes_are_kept() {
    // Downstream attribute scans are last-occurrence-wins, which requires
    // the duplicate to survive tokenization.
    let tokens = tokenize(r#"<a href="http://first/" href="http://second/">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 2);
            assert_eq!(attributes[0].value, "http://first/");
            assert_eq!(attributes[1].value, "http://second/");
        }
        other => panic!("Expected StartTag token, got {other}"),
    }
}

#[test]
fn test_named_character_reference_in_text() {
    let tokens = tokenize("Fish &amp; Chips &lt;3");
    match &tokens[0] {
        Token::Text { data } => assert_eq!(data, "Fish & Chips <3"),
        other => panic!("Expected Text token, got {other}"),
    }
}

#[test]
fn test_numeric_character_references() {
    let tokens = tokenize("&#65;&#x42;&#x43;");
    match &tokens[0] {
        Token::Text { data } => assert_eq!(data, "ABC"),
        other => panic!("Expected Text token, got {other}"),
    }
}

#[test]
fn test_unrecognized_reference_passes_through() {
    let tokens = tokenize("AT&T &notareference;");
    match &tokens[0] {
        Token::Text { data } => assert_eq!(data, "AT&T &notareference;"),
        other => panic!("Expected Text token, got {other}"),
    }
}

#[test]
fn test_character_reference_in_attribute_value() {
    let tokens = tokenize(r#"<a href="http://example.com/?a=1&amp;b=2">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].value, "http://example.com/?a=1&b=2");
        }
        other => panic!("Expected StartTag token, got {other}"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- generated by an editor -->");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, " generated by an editor "),
        other => panic!("Expected Comment token, got {other}"),
    }
}

#[test]
fn test_comment_with_inner_dashes() {
    let tokens = tokenize("<!-- a - b -- c -->");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, " a - b -- c "),
        other => panic!("Expected Comment token, got {other}"),
    }
}

#[test]
fn test_text_interleaved_with_tags() {
    let tokens = tokenize("<h3>Work</h3>\n<a href=\"http://a\">A</a>");
    let kinds: Vec<&Token> = tokens.iter().collect();
    assert!(matches!(kinds[0], Token::StartTag { name, .. } if name == "h3"));
    assert!(matches!(kinds[1], Token::Text { data } if data == "Work"));
    assert!(matches!(kinds[2], Token::EndTag { name, .. } if name == "h3"));
    assert!(matches!(kinds[3], Token::Text { data } if data == "\n"));
    assert!(matches!(kinds[4], Token::StartTag { name, .. } if name == "a"));
    assert!(matches!(kinds[5], Token::Text { data } if data == "A"));
    assert!(matches!(kinds[6], Token::EndTag { name, .. } if name == "a"));
    assert!(matches!(kinds[7], Token::EndOfFile));
}

#[test]
fn test_stray_less_than_is_text() {
    let tokens = tokenize("<3 hearts");
    match &tokens[0] {
        Token::Text { data } => assert_eq!(data, "<3 hearts"),
        other => panic!("Expected Text token, got {other}"),
    }
}

#[test]
fn test_eof_inside_tag_is_an_error() {
    assert!(matches!(
        tokenize_err("<a href"),
        TokenizerError::EofInTag { .. }
    ));
}

#[test]
fn test_eof_inside_tag_name_is_an_error() {
    assert!(matches!(
        tokenize_err("<h3"),
        TokenizerError::EofInTag { position: 3 }
    ));
}

#[test]
fn test_eof_inside_attribute_value_is_an_error() {
    assert!(matches!(
        tokenize_err(r#"<a href="http://truncated"#),
        TokenizerError::EofInAttributeValue { .. }
    ));
}

#[test]
fn test_eof_inside_comment_is_an_error() {
    assert!(matches!(
        tokenize_err("<!-- never closed"),
        TokenizerError::EofInComment { .. }
    ));
}

#[test]
fn test_eof_inside_doctype_is_an_error() {
    assert!(matches!(
        tokenize_err("<!DOCTYPE NETSCAPE-Bookmark"),
        TokenizerError::EofInDoctype { .. }
    ));
}

#[test]
fn test_tokens_before_the_error_still_come_out() {
    let mut tokenizer = HTMLTokenizer::new("<h3>Cat</h3><a href=\"x".to_string());
    assert!(matches!(
        tokenizer.next_token(),
        Ok(Token::StartTag { .. })
    ));
    assert!(matches!(tokenizer.next_token(), Ok(Token::Text { .. })));
    assert!(matches!(tokenizer.next_token(), Ok(Token::EndTag { .. })));
    assert!(matches!(
        tokenizer.next_token(),
        Err(TokenizerError::EofInAttributeValue { .. })
    ));
}

#[test]
fn test_error_position_points_at_end_of_input() {
    let input = r#"<a href="x"#;
    match tokenize_err(input) {
        TokenizerError::EofInAttributeValue { position } => {
            assert_eq!(position, input.len());
        }
        other => panic!("Expected EofInAttributeValue, got {other:?}"),
    }
}
