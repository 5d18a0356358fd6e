/// Text returned by one inference call, kept verbatim.
///
/// A completion is produced by a single invocation, handed to the sinks, and
/// discarded. There is no cache or history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    text: String,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines of the completion, as the PDF sink lays them out.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
