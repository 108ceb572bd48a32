use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts body paragraphs of a Word document, each followed by `\n`.
///
/// Only paragraphs that sit directly in `w:body` count; table cells, content
/// controls and text boxes are skipped. Legacy binary `.doc` files are not zip
/// archives and fail here.
pub(super) fn extract_word_text(content: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(content))
        .map_err(|e| ExtractionError::ExtractionFailed(format!("Word read error: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("Word read error: {e}")))?;

    let paragraphs = body_paragraphs(&xml)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("Word XML error: {e}")))?;

    debug!(paragraphs = paragraphs.len(), "Extracted Word text");

    let mut text = String::new();
    for paragraph in paragraphs {
        text.push_str(&paragraph);
        text.push('\n');
    }
    Ok(text)
}

/// Paragraph currently being collected, with the stack depth it opened at.
struct OpenParagraph {
    depth: usize,
    text: String,
    /// Nested paragraphs or text boxes open inside this one.
    nested: usize,
    in_text: bool,
}

fn body_paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<OpenParagraph> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                match current.as_mut() {
                    None if name == b"w:p" && parent_is_body(&stack) => {
                        current = Some(OpenParagraph {
                            depth: stack.len(),
                            text: String::new(),
                            nested: 0,
                            in_text: false,
                        });
                    }
                    Some(p) if name == b"w:p" || name == b"w:txbxContent" => p.nested += 1,
                    Some(p) if name == b"w:t" && p.nested == 0 => p.in_text = true,
                    _ => {}
                }
                stack.push(name);
            }
            Event::End(e) => {
                stack.pop();
                let name = e.name();
                let name = name.as_ref();
                if let Some(p) = current.as_mut() {
                    if name == b"w:p" && stack.len() == p.depth {
                        if let Some(done) = current.take() {
                            paragraphs.push(done.text);
                        }
                    } else if name == b"w:p" || name == b"w:txbxContent" {
                        p.nested = p.nested.saturating_sub(1);
                    } else if name == b"w:t" {
                        p.in_text = false;
                    }
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                let name = name.as_ref();
                match current.as_mut() {
                    None if name == b"w:p" && parent_is_body(&stack) => {
                        paragraphs.push(String::new());
                    }
                    Some(p) if p.nested == 0 => match name {
                        b"w:tab" => p.text.push('\t'),
                        b"w:br" | b"w:cr" => p.text.push('\n'),
                        _ => {}
                    },
                    _ => {}
                }
            }
            Event::Text(e) => {
                if let Some(p) = current.as_mut().filter(|p| p.in_text) {
                    p.text.push_str(&e.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn parent_is_body(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|n| n.as_slice() == b"w:body")
}
