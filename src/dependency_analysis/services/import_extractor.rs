use regex::Regex;
use std::sync::OnceLock;

/// Matches `import x from "y"`, `import { a, b } from 'y'`, `import type T from "y"`
/// and side-effect imports `import "y"`. Dynamic `import("y")` and re-exports
/// are not matched.
fn import_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\bimport\s+(?:type\s+)?(?:[^'";]*?\s*\bfrom\s*)?['"]([^'"\r\n]+)['"]"#)
            .expect("import pattern is a valid regex")
    })
}

/// ImportExtractor service for pulling import literals out of source text
///
/// This is a pattern match, not a parser. Comments are blanked out before
/// matching, but import-shaped text inside string literals still matches.
pub struct ImportExtractor;

impl ImportExtractor {
    /// Returns the quoted module specifiers in order of appearance
    pub fn extract(source: &str) -> Vec<String> {
        let code = strip_comments(source);
        import_pattern()
            .captures_iter(&code)
            .filter_map(|captures| captures.get(1))
            .map(|literal| literal.as_str().to_string())
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ScanState {
    Code,
    LineComment,
    BlockComment,
    Str(char),
    Regex { in_class: bool },
}

/// A `/` after one of these (or at the start of a line) opens a regex literal
fn starts_regex_after(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => matches!(
            c,
            '(' | ',' | '=' | ':' | '[' | '!' | '&' | '|' | '?' | '{' | '}' | ';'
        ),
    }
}

/// Replaces `//` and `/* */` comment bodies with spaces, keeping newlines,
/// string literals and regex literals intact.
///
/// Also used to read JSONC documents such as `tsconfig.json`.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = ScanState::Code;
    // last non-whitespace code character on the current line
    let mut prev: Option<char> = None;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            ScanState::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = ScanState::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = ScanState::BlockComment;
                }
                '/' if starts_regex_after(prev) => {
                    out.push(c);
                    state = ScanState::Regex { in_class: false };
                }
                '\'' | '"' | '`' => {
                    out.push(c);
                    state = ScanState::Str(c);
                }
                '\n' => {
                    out.push(c);
                    prev = None;
                }
                _ => {
                    out.push(c);
                    if !c.is_whitespace() {
                        prev = Some(c);
                    }
                }
            },
            ScanState::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    prev = None;
                    state = ScanState::Code;
                } else {
                    out.push(' ');
                }
            }
            ScanState::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = ScanState::Code;
                } else if c == '\n' {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            ScanState::Str(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote || (c == '\n' && quote != '`') {
                    // unterminated ' or " strings end at the line break
                    prev = if c == '\n' { None } else { Some(c) };
                    state = ScanState::Code;
                }
            }
            ScanState::Regex { in_class } => {
                out.push(c);
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                    }
                    '[' => state = ScanState::Regex { in_class: true },
                    ']' => state = ScanState::Regex { in_class: false },
                    '/' if !in_class => {
                        prev = Some(c);
                        state = ScanState::Code;
                    }
                    '\n' => {
                        prev = None;
                        state = ScanState::Code;
                    }
                    _ => {}
                }
            }
        }
    }

    out
}
