//! Document loader port definition.

use std::path::Path;

use crate::domain::AppError;

/// Port for loading a document as an ordered sequence of page texts.
///
/// The pipeline only needs text; layout, images, and the file format itself
/// stay behind this seam.
pub trait DocumentLoader {
    fn load(&self, path: &Path) -> Result<Vec<String>, AppError>;
}

/// In-memory loader for tests: returns the configured pages for any path.
#[derive(Debug, Clone, Default)]
pub struct StaticDocumentLoader {
    pages: Vec<String>,
}

impl StaticDocumentLoader {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { pages: pages.into_iter().map(Into::into).collect() }
    }
}

impl DocumentLoader for StaticDocumentLoader {
    fn load(&self, _path: &Path) -> Result<Vec<String>, AppError> {
        Ok(self.pages.clone())
    }
}
