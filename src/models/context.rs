/// Reference text gathered for a query before the model is prompted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContextData {
    text: String,
    source: Option<String>,
}

impl ContextData {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The citation that replaces whatever sources the model proposes.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
