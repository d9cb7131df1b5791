//! Forgiving JSON repair.
//!
//! A single pass over the text that tracks string context, so apostrophes inside
//! double-quoted strings survive. It fixes the defects completion services commonly
//! produce: single-quoted strings, trailing commas, Python literals, raw newlines in
//! strings and output cut off before the closing brackets.

/// Rewrite `text` into something `serde_json` is more likely to accept.
///
/// Valid JSON passes through unchanged.
pub fn repair_json(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut open: Vec<char> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => i = copy_double_quoted(&chars, i, &mut out),
            '\'' => i = convert_single_quoted(&chars, i, &mut out),
            ',' => {
                if !matches!(next_significant(&chars, i + 1), Some(']') | Some('}')) {
                    out.push(',');
                }
                i += 1;
            }
            '{' => {
                open.push('}');
                out.push(c);
                i += 1;
            }
            '[' => {
                open.push(']');
                out.push(c);
                i += 1;
            }
            '}' | ']' => {
                if open.last() == Some(&c) {
                    open.pop();
                }
                out.push(c);
                i += 1;
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                let literal = match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    other => other,
                };
                out.push_str(literal);
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    if !open.is_empty() {
        let kept = out.trim_end().trim_end_matches(',').len();
        out.truncate(kept);
        while let Some(closer) = open.pop() {
            out.push(closer);
        }
    }
    out
}

fn next_significant(chars: &[char], from: usize) -> Option<char> {
    chars[from.min(chars.len())..].iter().copied().find(|c| !c.is_whitespace())
}

fn push_escaped_control(c: char, out: &mut String) -> bool {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        _ => return false,
    }
    true
}

/// Copy a double-quoted string starting at `start`; returns the index after it.
fn copy_double_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut j = start + 1;
    while j < chars.len() {
        let c = chars[j];
        match c {
            '\\' => {
                match chars.get(j + 1) {
                    // `\'` is not a JSON escape.
                    Some('\'') => out.push('\''),
                    Some(next) => {
                        out.push('\\');
                        out.push(*next);
                    }
                    None => {}
                }
                j += 2;
            }
            '"' => {
                out.push('"');
                return j + 1;
            }
            _ => {
                if !push_escaped_control(c, out) {
                    out.push(c);
                }
                j += 1;
            }
        }
    }
    // Unterminated.
    out.push('"');
    j
}

/// Convert a single-quoted string starting at `start` into a double-quoted one.
///
/// A quote only closes the string when followed by a delimiter, so `'Newton's laws'`
/// keeps its apostrophe.
fn convert_single_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut j = start + 1;
    while j < chars.len() {
        let c = chars[j];
        match c {
            '\\' => {
                match chars.get(j + 1) {
                    Some('\'') => out.push('\''),
                    Some(next) => {
                        out.push('\\');
                        out.push(*next);
                    }
                    None => {}
                }
                j += 2;
            }
            '\'' if closes_single_quoted(chars, j + 1) => {
                out.push('"');
                return j + 1;
            }
            '"' => {
                out.push_str("\\\"");
                j += 1;
            }
            _ => {
                if !push_escaped_control(c, out) {
                    out.push(c);
                }
                j += 1;
            }
        }
    }
    out.push('"');
    j
}

fn closes_single_quoted(chars: &[char], from: usize) -> bool {
    matches!(next_significant(chars, from), None | Some(',') | Some(']') | Some('}') | Some(':'))
}
