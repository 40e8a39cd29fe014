//! Text extraction for uploaded documents.
//!
//! PDFs are read page by page with `lopdf`, DOCX files paragraph by
//! paragraph with `docx-rs`, and text files as strict UTF-8. Every piece is
//! followed by a newline and the final text is trimmed.

use docx_rs::{DocumentChild, InsertChild, ParagraphChild, Run, RunChild};
use lopdf::Document as PdfDocument;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

use crate::domain::{DocumentFormat, ExtractedText, ExtractionError};

/// Extract the text of the file at `path`, interpreted as `format`.
#[instrument(skip_all, fields(path = %path.display(), format = %format))]
pub fn extract(path: &Path, format: DocumentFormat) -> Result<ExtractedText, ExtractionError> {
    let text = match format {
        DocumentFormat::Pdf => extract_pdf(path)?,
        DocumentFormat::Docx => extract_docx(path)?,
        DocumentFormat::Txt => extract_txt(path)?,
    };

    let extracted = ExtractedText::new(text.trim());
    debug!(
        character_count = extracted.character_count(),
        word_count = extracted.word_count(),
        "Text extracted"
    );

    Ok(extracted)
}

fn extract_pdf(path: &Path) -> Result<String, ExtractionError> {
    let doc = PdfDocument::load(path)
        .map_err(|e| ExtractionError::ExtractionFailure(format!("failed to parse PDF: {e}")))?;

    let mut text = String::new();
    // get_pages is keyed by page number, so iteration is in page order
    for (page_number, _) in doc.get_pages() {
        let page_text = doc.extract_text(&[page_number]).map_err(|e| {
            ExtractionError::ExtractionFailure(format!(
                "failed to read text of page {page_number}: {e}"
            ))
        })?;
        text.push_str(&page_text);
        text.push('\n');
    }

    Ok(text)
}

fn extract_docx(path: &Path) -> Result<String, ExtractionError> {
    let bytes = read_file(path)?;
    let docx = docx_rs::read_docx(&bytes)
        .map_err(|e| ExtractionError::ExtractionFailure(format!("failed to parse DOCX: {e:?}")))?;

    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            push_paragraph_children(&paragraph.children, &mut text);
            text.push('\n');
        }
    }

    Ok(text)
}

/// Append the visible text of a paragraph, descending into hyperlinks and
/// tracked insertions. Tabs become `\t` and breaks become `\n`.
fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let InsertChild::Run(run) = inserted {
                        push_run(run, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

fn extract_txt(path: &Path) -> Result<String, ExtractionError> {
    let bytes = read_file(path)?;
    String::from_utf8(bytes)
        .map_err(|e| ExtractionError::ExtractionFailure(format!("file is not valid UTF-8: {e}")))
}

fn read_file(path: &Path) -> Result<Vec<u8>, ExtractionError> {
    fs::read(path).map_err(|e| {
        ExtractionError::ExtractionFailure(format!("failed to read {}: {e}", path.display()))
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders for small real documents used across the test suite.

    use docx_rs::{Docx, Paragraph, Run};
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use std::fs::File;
    use std::path::Path;

    /// Write a DOCX with one paragraph per entry.
    pub fn write_docx(path: &Path, paragraphs: &[&str]) {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let file = File::create(path).unwrap();
        docx.build().pack(file).unwrap();
    }

    /// Write a PDF with one page per entry, each holding a single line of text.
    pub fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 14.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc.save(path).unwrap();
    }
}
