// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! `\index{...}` directives for makeindex.

use serde_json::Value;

use crate::escape::escape_latex;

const LEVEL_SEPARATOR: &str = "!";

/// Formats one index term.
///
/// A term is either a flat string or a list of strings naming a path through the index
/// hierarchy. Each part is escaped on its own before joining, so `!` only ever appears as the
/// level separator.
pub fn format_term(term: &Value) -> String {
    match term {
        Value::Array(levels) => levels
            .iter()
            .map(|level| escape_latex(&scalar_text(level)))
            .collect::<Vec<_>>()
            .join(LEVEL_SEPARATOR),
        other => escape_latex(&scalar_text(other)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One `\index` directive per term, concatenated.
pub fn index_entries(terms: &[Value]) -> String {
    terms
        .iter()
        .map(|term| format!("\\index{{{}}}", format_term(term)))
        .collect()
}

/// A "see" entry pointing readers from `term` to `target`.
pub fn index_see(term: &Value, target: &Value) -> String {
    format!(
        "\\index{{{}|see{{{}}}}}",
        format_term(term),
        format_term(target)
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flat_terms_get_one_directive_each() {
        assert_eq!(
            index_entries(&[json!("closure"), json!("scope")]),
            "\\index{closure}\\index{scope}"
        );
    }

    #[test]
    fn hierarchical_terms_are_joined_with_separator() {
        assert_eq!(
            index_entries(&[json!(["Animals", "Cats"]), json!(["Animals", "Dogs & Co"])]),
            "\\index{Animals!Cats}\\index{Animals!Dogs \\& Co}"
        );
    }

    #[test]
    fn terms_are_escaped() {
        assert_eq!(format_term(&json!("$ function")), "\\$ function");
        assert_eq!(format_term(&json!(["_", "{}"])), "\\_!\\{\\}");
    }

    #[test]
    fn non_string_scalars_use_their_text() {
        assert_eq!(format_term(&json!(404)), "404");
    }

    #[test]
    fn see_entry() {
        assert_eq!(
            index_see(&json!("lambda"), &json!(["function", "arrow"])),
            "\\index{lambda|see{function!arrow}}"
        );
    }

    #[test]
    fn no_terms_no_output() {
        assert_eq!(index_entries(&[]), "");
    }
}
