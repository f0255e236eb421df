//! The `**bold**` emphasis micro-format.
//!
//! Generated labels mark spans to be rendered bold by wrapping them in a pair
//! of `**` delimiters. Two readings of the format live here:
//!
//! - [`has_emphasis`] answers the checklist question: is there an opening
//!   `**` with a closing `**` anywhere after it, across lines or not
//! - [`spans`] follows the front end's `/\*\*(.*?)\*\*/g` renderer: a span
//!   is `**`, its content, then `**`, with no line break in between; spans
//!   never nest, the first closing delimiter ends the span, and a delimiter
//!   without a partner is literal text
//!
//! JavaScript's `.` stops at `\n`, `\r`, U+2028 and U+2029, so [`spans`]
//! treats all four as line breaks.

/// Opening and closing delimiter of an emphasis span
pub const DELIMITER: &str = "**";

/// Characters the renderer's `.` refuses to match
const LINE_BREAKS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// One emphasized span, with byte offsets of its content inside the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmphasisSpan<'a> {
    pub content: &'a str,
    pub start: usize,
    pub end: usize,
}

impl EmphasisSpan<'_> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Collect all emphasis spans in `text`, in order of appearance.
///
/// A `****` pair is matched as an empty span, the same way the renderer
/// consumes it.
pub fn spans(text: &str) -> Vec<EmphasisSpan<'_>> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(DELIMITER) {
        let open = cursor + offset;
        let content_start = open + DELIMITER.len();
        let line_end = text[content_start..]
            .find(LINE_BREAKS)
            .map_or(text.len(), |i| content_start + i);

        match text[content_start..line_end].find(DELIMITER) {
            Some(close) => {
                let content_end = content_start + close;
                found.push(EmphasisSpan {
                    content: &text[content_start..content_end],
                    start: content_start,
                    end: content_end,
                });
                cursor = content_end + DELIMITER.len();
            }
            // No partner on this line: the first '*' is literal, retry from the next byte
            None => cursor = open + 1,
        }
    }

    found
}

/// Whether `text` contains a delimiter pair: an opening `**` followed
/// anywhere later by a closing `**`.
pub fn has_emphasis(text: &str) -> bool {
    text.find(DELIMITER)
        .map(|open| &text[open + DELIMITER.len()..])
        .is_some_and(|rest| rest.contains(DELIMITER))
}
