//! Character reference resolution.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! A deliberately scoped subset of the WHATWG machinery: the handful of
//! named references that actually occur in bookmark export files, plus
//! numeric references. Anything unrecognized passes through literally as
//! text, including the `&` itself.

use super::core::HTMLTokenizer;

/// Named references resolved by this tokenizer, with their terminating
/// semicolon. Export files escape markup-significant characters and not
/// much else.
const NAMED_REFERENCES: &[(&str, &str)] = &[
    ("amp;", "&"),
    ("lt;", "<"),
    ("gt;", ">"),
    ("quot;", "\""),
    ("apos;", "'"),
    ("nbsp;", "\u{a0}"),
];

impl HTMLTokenizer {
    /// Resolve the character reference starting at the current position.
    ///
    /// Called with the `&` already consumed. On a recognized reference the
    /// remaining characters (through the `;`) are consumed and the
    /// replacement text returned; otherwise nothing further is consumed and
    /// a literal `"&"` comes back.
    pub(super) fn consume_character_reference(&mut self) -> String {
        // "Named character reference state"
        for (reference, replacement) in NAMED_REFERENCES {
            if self.next_few_characters_are(reference) {
                self.consume_string(reference);
                return (*replacement).to_string();
            }
        }

        // [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
        if self.peek_codepoint(0) == Some('#')
            && let Some(resolved) = self.consume_numeric_reference()
        {
            return resolved;
        }

        // "Anything else - Flush code points consumed as a character
        // reference." The ampersand was not part of a reference after all.
        "&".to_string()
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    ///
    /// Attempt to resolve `#NN;` or `#xHH;` at the current position. Returns
    /// None (consuming nothing) when the shape is wrong, so the caller can
    /// fall back to a literal ampersand.
    fn consume_numeric_reference(&mut self) -> Option<String> {
        // "U+0078 LATIN SMALL LETTER X / U+0058 LATIN CAPITAL LETTER X -
        // Switch to the hexadecimal character reference start state."
        let hex = matches!(self.peek_codepoint(1), Some('x' | 'X'));
        let digits_start = if hex { 2 } else { 1 };

        let mut digits = String::new();
        while let Some(c) = self.peek_codepoint(digits_start + digits.len()) {
            let is_digit = if hex {
                c.is_ascii_hexdigit()
            } else {
                c.is_ascii_digit()
            };
            if !is_digit {
                break;
            }
            digits.push(c);
        }

        // "absence-of-digits-in-numeric-character-reference" /
        // "missing-semicolon-after-character-reference" - treated as not a
        // reference at all rather than recovered, per the scoped policy.
        if digits.is_empty() || self.peek_codepoint(digits_start + digits.len()) != Some(';') {
            return None;
        }

        // Everything peeked is ASCII, so chars == bytes.
        let consumed = digits_start + digits.len() + 1;
        let radix = if hex { 16 } else { 10 };
        let resolved = u32::from_str_radix(&digits, radix)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or_else(|| {
                // "character-reference-outside-unicode-range" /
                // "surrogate-character-reference"
                self.log_parse_error("invalid-numeric-character-reference");
                '\u{FFFD}'
            });

        let mut reference = String::new();
        for i in 0..consumed {
            reference.push(self.peek_codepoint(i)?);
        }
        self.consume_string(&reference);
        Some(resolved.to_string())
    }
}
