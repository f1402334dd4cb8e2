use std::panic::{self, AssertUnwindSafe};

use pdf_extract::{output_doc_page, Document, OutputError, PlainTextOutput};
use tracing::warn;

/// Concatenates the text of every page that yields any.
///
/// Each page is rendered on its own: a page that errors or panics inside
/// `pdf-extract` is skipped and the remaining pages are still read.
pub(super) fn extract(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    let Some(doc) = load(bytes) else {
        return String::new();
    };

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    join_pages(
        page_numbers
            .into_iter()
            .filter_map(|page| page_text(&doc, page)),
    )
}

fn load(bytes: &[u8]) -> Option<Document> {
    match panic::catch_unwind(|| Document::load_mem(bytes)) {
        Ok(Ok(doc)) => Some(doc),
        Ok(Err(e)) => {
            warn!("PDF could not be loaded: {e}");
            None
        }
        Err(_) => {
            warn!("PDF loading panicked on malformed input");
            None
        }
    }
}

fn page_text(doc: &Document, page: u32) -> Option<String> {
    let rendered = panic::catch_unwind(AssertUnwindSafe(|| -> Result<String, OutputError> {
        let mut text = String::new();
        {
            let mut output = PlainTextOutput::new(&mut text);
            output_doc_page(doc, &mut output, page)?;
        }
        Ok(text)
    }));

    match rendered {
        Ok(Ok(text)) => Some(text),
        Ok(Err(e)) => {
            warn!("Skipping PDF page {page}: {e}");
            None
        }
        Err(_) => {
            warn!("Skipping PDF page {page}: extraction panicked");
            None
        }
    }
}

fn join_pages(pages: impl IntoIterator<Item = String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect()
}
