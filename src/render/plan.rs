use crate::models::{EditorView, ExamplesView, Highlight, QueryRecord};

/// EXPLAIN output, one plan row per line
pub fn explain_editor(record: &QueryRecord) -> EditorView {
    let text = record.explain_text();
    EditorView {
        copy_text: Some(text.clone()),
        text,
        language: Highlight::Yaml,
    }
}

pub fn examples_view(record: &QueryRecord) -> ExamplesView {
    ExamplesView {
        columns: vec!["Query".to_string()],
        rows: record
            .example_queries
            .iter()
            .map(|example| EditorView {
                text: example.query.clone(),
                language: Highlight::Sql,
                copy_text: None,
            })
            .collect(),
    }
}
