use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

const DOCUMENT_PART: &str = "word/document.xml";

/// Joins the text of every body-level paragraph with newlines.
/// Paragraphs inside tables and nested text boxes are not part of the body
/// flow and are left out.
pub(super) fn extract(bytes: &[u8]) -> String {
    match read_document_part(bytes) {
        Some(xml) => paragraphs(&xml).join("\n"),
        None => String::new(),
    }
}

fn read_document_part(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut archive = match zip::ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => archive,
        Err(e) => {
            warn!("DOCX is not a readable archive: {e}");
            return None;
        }
    };
    let mut part = match archive.by_name(DOCUMENT_PART) {
        Ok(part) => part,
        Err(e) => {
            warn!("DOCX has no {DOCUMENT_PART}: {e}");
            return None;
        }
    };
    let mut xml = Vec::new();
    if let Err(e) = part.read_to_end(&mut xml) {
        warn!("DOCX document part could not be read: {e}");
        return None;
    }
    Some(xml)
}

/// Walks the document XML and collects paragraph texts. On malformed XML the
/// paragraphs completed so far are returned.
fn paragraphs(xml: &[u8]) -> Vec<String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut out = Vec::new();
    let mut current = String::new();
    let mut table_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut in_text = false;

    loop {
        let in_body_paragraph = paragraph_depth == 1 && table_depth == 0;
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"t" => in_text = true,
                b"tab" if in_body_paragraph => current.push('\t'),
                b"br" | b"cr" if in_body_paragraph => current.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"p" if paragraph_depth == 0 && table_depth == 0 => out.push(String::new()),
                b"tab" if in_body_paragraph => current.push('\t'),
                b"br" | b"cr" if in_body_paragraph => current.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" => {
                    if in_body_paragraph {
                        out.push(std::mem::take(&mut current));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(t)) if in_text && in_body_paragraph => match t.unescape() {
                Ok(text) => current.push_str(&text),
                Err(e) => warn!("Skipping undecodable DOCX text run: {e}"),
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(
                    "DOCX XML error at position {}: {e}",
                    reader.buffer_position()
                );
                break;
            }
        }
        buf.clear();
    }

    out
}
