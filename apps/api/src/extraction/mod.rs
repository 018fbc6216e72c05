//! Text Extractor: turns an uploaded PDF into page-delimited plain text.
//!
//! Pages that yield no text (scanned images, blank pages) are skipped without a
//! placeholder. Only a document that cannot be opened at all, or one where no page
//! yields any text, is an error.

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document could not be parsed as PDF: {0}")]
    Corrupt(String),

    #[error("document contains no extractable text")]
    NoText,
}

/// Text recovered from a single page. `page_number` is 1-based, as in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// Extracts the text of every text-bearing page, in source page order.
pub fn extract(document_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
    let doc =
        Document::load_mem(document_bytes).map_err(|e| ExtractionError::Corrupt(e.to_string()))?;

    let mut pages = Vec::new();
    // get_pages() is a BTreeMap keyed by page number, so iteration follows page order
    for page_number in doc.get_pages().into_keys() {
        let text = match doc.extract_text(&[page_number]) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to extract text from page {page_number}: {e}");
                continue;
            }
        };

        let text = text.trim();
        if text.is_empty() {
            debug!("Page {page_number} has no extractable text, skipping");
            continue;
        }

        pages.push(PageText {
            page_number,
            text: text.to_string(),
        });
    }

    if pages.is_empty() {
        return Err(ExtractionError::NoText);
    }

    Ok(pages)
}

/// Joins page texts into one prompt body, each page introduced by a `--- Page N ---` marker.
pub fn join_pages(pages: &[PageText]) -> String {
    let mut out = String::new();
    for page in pages {
        out.push_str(&format!("\n--- Page {} ---\n{}\n", page.page_number, page.text));
    }
    out.trim().to_string()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_rejects_non_pdf_bytes() {
        let err = extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Corrupt(_)));
    }

    #[test]
    fn test_extract_rejects_empty_input() {
        assert!(matches!(extract(&[]), Err(ExtractionError::Corrupt(_))));
    }

    #[test]
    fn test_extract_keeps_page_order() {
        let pdf = test_pdf::build(&[Some("Alpha Experience"), Some("Beta Education")]);
        let pages = extract(&pdf).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert!(pages[0].text.contains("Alpha"));
        assert_eq!(pages[1].page_number, 2);
        assert!(pages[1].text.contains("Beta"));
    }

    #[test]
    fn test_extract_skips_textless_pages_without_placeholder() {
        let pdf = test_pdf::build(&[None, Some("Skills Rust"), None, Some("Projects")]);
        let pages = extract(&pdf).unwrap();
        let numbers: Vec<u32> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![2, 4]);
        assert!(pages.iter().all(|p| !p.text.trim().is_empty()));
    }

    #[test]
    fn test_extract_all_pages_textless_is_no_text() {
        let pdf = test_pdf::build(&[None, None]);
        assert!(matches!(extract(&pdf), Err(ExtractionError::NoText)));
    }

    #[test]
    fn test_join_pages_marks_original_page_numbers() {
        let pages = vec![
            PageText {
                page_number: 2,
                text: "Rust".to_string(),
            },
            PageText {
                page_number: 5,
                text: "Go".to_string(),
            },
        ];
        assert_eq!(join_pages(&pages), "--- Page 2 ---\nRust\n\n--- Page 5 ---\nGo");
    }

    #[test]
    fn test_join_pages_empty() {
        assert_eq!(join_pages(&[]), "");
    }
}
