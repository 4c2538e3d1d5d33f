//! Word (.docx) text extraction via docx-rs.
//!
//! Document → Paragraph → Run → Text, including runs wrapped in hyperlinks,
//! tracked insertions and content controls. Top-level paragraphs are joined
//! with `\n` in document order (empty paragraphs included) and the whole
//! result is trimmed. Tables, headers and footers are not part of the output.

use bytes::Bytes;
use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, StructuredDataTagChild,
};

use super::types::{ExtractedText, ExtractionMethod};
use super::ExtractionError;

/// Parses the package on the blocking pool and returns its paragraph text.
pub async fn extract(doc_bytes: Bytes) -> Result<ExtractedText, ExtractionError> {
    let text = tokio::task::spawn_blocking(move || extract_word_text(&doc_bytes))
        .await
        .map_err(|e| ExtractionError::WordParsing(format!("package parser aborted: {e}")))??;

    Ok(ExtractedText::new(text, ExtractionMethod::Word))
}

pub fn extract_word_text(doc_bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx =
        docx_rs::read_docx(doc_bytes).map_err(|e| ExtractionError::WordParsing(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n").trim().to_string())
}

/// Runs inside one paragraph are parts of the same line, so they are
/// concatenated without a separator.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_paragraph_children(&para.children, &mut text);
    text
}

/// Hyperlinks, tracked insertions and content controls wrap their own runs.
/// Deleted text is skipped.
fn push_paragraph_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run(run, text);
                    }
                }
            }
            ParagraphChild::StructuredDataTag(tag) => push_tag_children(&tag.children, text),
            _ => {}
        }
    }
}

fn push_tag_children(children: &[StructuredDataTagChild], text: &mut String) {
    for child in children {
        match child {
            StructuredDataTagChild::Run(run) => push_run(run, text),
            StructuredDataTagChild::StructuredDataTag(tag) => push_tag_children(&tag.children, text),
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use docx_rs::{Docx, Paragraph, Run};

    /// Builds a .docx package with one paragraph per entry.
    pub fn make_test_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        make_docx_from(docx)
    }

    pub fn make_docx_from(docx: Docx) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use docx_rs::{Docx, Hyperlink, HyperlinkType, Insert};

    use super::fixtures::{make_docx_from, make_test_docx};
    use super::*;

    #[test]
    fn test_paragraphs_joined_by_newline() {
        let bytes = make_test_docx(&["Jane Doe", "Backend Engineer", "Skills: Rust, Go"]);
        let text = extract_word_text(&bytes).unwrap();
        assert_eq!(text, "Jane Doe\nBackend Engineer\nSkills: Rust, Go");
    }

    #[test]
    fn test_outer_whitespace_trimmed_inner_blank_lines_kept() {
        let bytes = make_test_docx(&["", "  Summary", "", "Experience  ", ""]);
        let text = extract_word_text(&bytes).unwrap();
        assert_eq!(text, "Summary\n\nExperience");
    }

    #[test]
    fn test_hyperlinked_text_is_kept() {
        let paragraph = Paragraph::new()
            .add_run(Run::new().add_text("Portfolio: "))
            .add_hyperlink(
                Hyperlink::new("portfolio", HyperlinkType::Anchor)
                    .add_run(Run::new().add_text("github.com/jane")),
            );
        let bytes = make_docx_from(Docx::new().add_paragraph(paragraph));
        assert_eq!(extract_word_text(&bytes).unwrap(), "Portfolio: github.com/jane");
    }

    #[test]
    fn test_tracked_insertion_text_is_kept() {
        let paragraph = Paragraph::new()
            .add_run(Run::new().add_text("Skills: Rust"))
            .add_insert(Insert::new(Run::new().add_text(", Kubernetes")));
        let bytes = make_docx_from(Docx::new().add_paragraph(paragraph));
        assert_eq!(extract_word_text(&bytes).unwrap(), "Skills: Rust, Kubernetes");
    }

    #[test]
    fn test_empty_document_is_empty_string() {
        let bytes = make_test_docx(&[]);
        assert_eq!(extract_word_text(&bytes).unwrap(), "");
    }

    #[test]
    fn test_malformed_package_is_reported() {
        let err = extract_word_text(b"PK\x03\x04 definitely not a docx").unwrap_err();
        assert!(matches!(err, ExtractionError::WordParsing(_)));
    }

    #[tokio::test]
    async fn test_extraction_is_idempotent() {
        let bytes = Bytes::from(make_test_docx(&["Python", "AWS"]));
        let first = extract(bytes.clone()).await.unwrap();
        let second = extract(bytes).await.unwrap();
        assert_eq!(first.method, ExtractionMethod::Word);
        assert_eq!(first.text.as_bytes(), second.text.as_bytes());
    }
}
