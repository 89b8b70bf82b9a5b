use sqlformat::{FormatOptions, Indent, QueryParams};

use crate::models::{EditorView, FormatSettings, Highlight, QueryRecord};

/// Replace every `?` marker with `$1`, `$2`, ... in order of appearance
pub fn number_placeholders(raw: &str) -> String {
    let mut numbered = String::with_capacity(raw.len() + 8);
    let mut index = 0;
    for c in raw.chars() {
        if c == '?' {
            index += 1;
            numbered.push('$');
            numbered.push_str(&index.to_string());
        } else {
            numbered.push(c);
        }
    }
    numbered
}

/// Number the placeholders of a normalized query and pretty-print it
pub fn format_query(raw: &str, settings: &FormatSettings) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let numbered = number_placeholders(raw);
    let options = FormatOptions {
        indent: Indent::Spaces(settings.indent_width),
        uppercase: settings.uppercase_keywords,
        ..FormatOptions::default()
    };
    sqlformat::format(&numbered, &QueryParams::None, &options)
}

/// Query tab editor. Clicking copies the original, unformatted text.
pub fn query_editor(record: &QueryRecord, settings: &FormatSettings) -> EditorView {
    let raw = record.query_text();
    EditorView {
        text: format_query(raw, settings),
        language: Highlight::Sql,
        copy_text: Some(raw.to_string()),
    }
}
