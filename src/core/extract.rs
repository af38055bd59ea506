//! PDF text extraction.

use lopdf::Document;

use crate::core::error::{Error, Result};

/// Extract the plain text of a PDF held in memory.
///
/// Pages are read in ascending page-index order and joined with a single
/// newline; empty pages contribute empty strings, preserving position.
/// A zero-page document yields an empty string. An unparseable buffer or
/// a failed page extraction fails the whole call with no partial result.
pub fn extract(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes).map_err(|e| Error::Extraction(e.to_string()))?;

    // get_pages returns a BTreeMap keyed by page number, so iteration
    // order is the page order.
    let mut pages = Vec::new();
    for (page_number, _) in document.get_pages() {
        let text = document
            .extract_text(&[page_number])
            .map_err(|e| Error::Extraction(format!("page {page_number}: {e}")))?;
        pages.push(text.trim_end_matches('\n').to_string());
    }

    Ok(pages.join("\n"))
}
