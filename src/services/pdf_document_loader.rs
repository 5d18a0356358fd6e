//! PDF document loader backed by the pdf-extract crate.

use std::path::Path;

use crate::domain::AppError;
use crate::ports::DocumentLoader;

/// Loads a PDF file and returns its text one page at a time.
///
/// pdf-extract emits a single text stream with form feeds between pages;
/// when no form feed is present the whole document counts as one page.
#[derive(Debug, Clone, Default)]
pub struct PdfDocumentLoader;

impl PdfDocumentLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfDocumentLoader {
    fn load(&self, path: &Path) -> Result<Vec<String>, AppError> {
        if !path.exists() {
            return Err(AppError::DocumentLoad {
                path: path.display().to_string(),
                reason: "file not found".to_string(),
            });
        }

        let text = pdf_extract::extract_text(path).map_err(|e| AppError::DocumentLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let pages = split_pages(&text);
        if pages.is_empty() {
            return Err(AppError::DocumentLoad {
                path: path.display().to_string(),
                reason: "document contains no extractable text".to_string(),
            });
        }

        Ok(pages)
    }
}

/// Split extracted text into page texts on form-feed boundaries.
fn split_pages(text: &str) -> Vec<String> {
    text.split('\u{c}')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_feeds_separate_pages() {
        let pages = split_pages("page one\u{c}page two\u{c}page three");
        assert_eq!(pages, vec!["page one", "page two", "page three"]);
    }

    #[test]
    fn text_without_form_feeds_is_one_page() {
        let pages = split_pages("just one block of text\nwith two lines");
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn blank_pages_are_dropped() {
        let pages = split_pages("content\u{c}   \u{c}more content");
        assert_eq!(pages, vec!["content", "more content"]);
    }

    #[test]
    fn missing_file_fails_with_document_load() {
        let loader = PdfDocumentLoader::new();
        let err = loader.load(Path::new("/nonexistent/report.pdf")).unwrap_err();

        match err {
            AppError::DocumentLoad { path, reason } => {
                assert!(path.contains("report.pdf"));
                assert_eq!(reason, "file not found");
            }
            other => panic!("unexpected error variant: {}", other),
        }
    }
}
