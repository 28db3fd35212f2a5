//! HTML Export Generation
//!
//! Wraps a rendered preview fragment in a complete HTML document so the
//! preview can be opened in a browser without the editor.

use super::json::write_export_file;
use super::options::ExportFormat;
use crate::document::DocumentVariant;
use crate::error::Result;
use crate::markdown::html_escape;
use std::path::{Path, PathBuf};

/// Page chrome around the preview. Element styles are inline in the fragment.
const BASE_CSS: &str = r#"
*, *::before, *::after {
    box-sizing: border-box;
}

body {
    margin: 0;
    padding: 0;
    background-color: #36393f;
    color: #dcddde;
    font-family: Whitney, 'Helvetica Neue', Helvetica, Arial, sans-serif;
    font-size: 16px;
}

.preview-body {
    max-width: 900px;
    margin: 0 auto;
    padding: 20px;
}

.preview-body a:hover {
    text-decoration: underline;
}
"#;

/// Generate a complete HTML document around a preview fragment.
///
/// # Arguments
///
/// * `fragment` - Preview HTML as produced by the preview renderer
/// * `title` - Optional document title
pub fn generate_html_document(fragment: &str, title: Option<&str>) -> String {
    let doc_title = title.filter(|t| !t.is_empty()).unwrap_or("Embed Preview");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="embed-builder">
    <title>{title}</title>
    <style>
{base_css}
    </style>
</head>
<body>
    <main class="preview-body">
{body}
    </main>
</body>
</html>"#,
        title = html_escape(doc_title),
        base_css = BASE_CSS,
        body = fragment,
    )
}

/// Write a preview page for `variant` into `dir`, returning the written path.
pub fn export_html_file(
    dir: &Path,
    variant: DocumentVariant,
    fragment: &str,
    title: Option<&str>,
) -> Result<PathBuf> {
    let html = generate_html_document(fragment, title);
    let file_name = ExportFormat::HtmlFile
        .file_name(variant)
        .unwrap_or_else(|| format!("{}-{}.html", super::options::FILE_STEM, variant.tag()));
    write_export_file(dir, &file_name, &html)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
