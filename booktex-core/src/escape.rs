// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! Character escaping for LaTeX output.
//!
//! [`escape_latex`] must run exactly once over raw input: it is not idempotent, since the
//! backslash it introduces would itself be escaped on a second pass.

/// Escape every character LaTeX treats specially in running text.
///
/// `~`, `^` and `\` become named commands followed by a space so that TeX does not swallow
/// the next letter into the control sequence.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            '~' => out.push_str("\\textasciitilde "),
            '^' => out.push_str("\\textasciicircum "),
            '\\' => out.push_str("\\textbackslash "),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text placed inside a `` \lstinline`...` `` span, where only the delimiter matters.
pub fn escape_verbatim(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '`' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
