/// Line splitting with the full set of line terminators

const NEXT_LINE: char = '\u{0085}';
const LINE_SEPARATOR: char = '\u{2028}';
const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Check if a character ends a line
///
/// `\r\n` is handled by the caller as a single boundary.
pub fn is_line_terminator(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | NEXT_LINE | LINE_SEPARATOR | PARAGRAPH_SEPARATOR
    )
}

/// Split a string into lines, dropping the terminators
///
/// Recognizes `\n`, `\r\n`, `\r`, U+0085, U+2028 and U+2029. A terminator at
/// the very end does not produce a trailing empty line, so `"a\n"` gives
/// `["a"]` while `"\n"` gives `[""]`.
pub fn separated_into_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if !is_line_terminator(c) {
            continue;
        }

        lines.push(text[start..index].to_string());

        let mut end = index + c.len_utf8();
        if c == '\r' {
            if let Some(&(next_index, '\n')) = chars.peek() {
                chars.next();
                end = next_index + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(text[start..].to_string());
    }

    lines
}
