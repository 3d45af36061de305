//! Fluent prompt builder
//!
//! [`PromptBuilder`] assembles a prompt piece by piece. Every method appends
//! text verbatim, so the same sequence of calls always yields the same string.

/// A fluent builder for constructing prompts
///
/// # Examples
///
/// ```
/// use sniffer_prompt::PromptBuilder;
///
/// let prompt = PromptBuilder::new()
///     .line("Topic: rates")
///     .newline()
///     .numbered(1, "Fed holds")
///     .field("URL", "https://example.com")
///     .build();
///
/// assert_eq!(prompt, "Topic: rates\n\n1. Fed holds\nURL: https://example.com\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    parts: Vec<String>,
}

impl PromptBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Append text as-is
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.parts.push(content.into());
        self
    }

    /// Append text followed by a newline
    pub fn line(self, content: impl Into<String>) -> Self {
        self.text(format!("{}\n", content.into()))
    }

    /// Append a newline
    pub fn newline(self) -> Self {
        self.text("\n")
    }

    /// Append a blank line (two newlines)
    pub fn blank_line(self) -> Self {
        self.text("\n\n")
    }

    /// Append a numbered line, e.g. `3. content`
    pub fn numbered(self, num: usize, content: impl Into<String>) -> Self {
        self.text(format!("{}. {}\n", num, content.into()))
    }

    /// Append a bullet line, e.g. `- content`
    pub fn bullet(self, content: impl Into<String>) -> Self {
        self.text(format!("- {}\n", content.into()))
    }

    /// Append a `key: value` line
    pub fn field(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.text(format!("{}: {}\n", key.into(), value.into()))
    }

    /// Append content only when `condition` holds
    pub fn when(self, condition: bool, content: impl Into<String>) -> Self {
        if condition { self.text(content) } else { self }
    }

    /// Apply `f` once per element of `items`, threading the builder through
    ///
    /// ```
    /// use sniffer_prompt::PromptBuilder;
    ///
    /// let prompt = PromptBuilder::new()
    ///     .each(["a", "b"].iter().enumerate(), |b, (i, s)| b.numbered(i + 1, *s))
    ///     .build();
    /// assert_eq!(prompt, "1. a\n2. b\n");
    /// ```
    pub fn each<I, F>(self, items: I, mut f: F) -> Self
    where
        I: IntoIterator,
        F: FnMut(Self, I::Item) -> Self,
    {
        items.into_iter().fold(self, |builder, item| f(builder, item))
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        self.parts.concat()
    }

    /// Check if the builder is empty
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl From<PromptBuilder> for String {
    fn from(builder: PromptBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_text() {
        let prompt = PromptBuilder::new().text("Hello").text(", World!").build();
        assert_eq!(prompt, "Hello, World!");
    }

    #[test]
    fn test_line_and_blank_line() {
        let prompt = PromptBuilder::new()
            .line("Paragraph 1")
            .blank_line()
            .text("Paragraph 2")
            .build();
        assert_eq!(prompt, "Paragraph 1\n\n\nParagraph 2");
    }

    #[test]
    fn test_numbered_and_field() {
        let prompt = PromptBuilder::new()
            .numbered(2, "Second")
            .field("Summary", "text")
            .build();
        assert_eq!(prompt, "2. Second\nSummary: text\n");
    }

    #[test]
    fn test_bullet() {
        let prompt = PromptBuilder::new().bullet("one").bullet("two").build();
        assert_eq!(prompt, "- one\n- two\n");
    }

    #[test]
    fn test_conditional() {
        let prompt = PromptBuilder::new()
            .text("Base")
            .when(true, " - Included")
            .when(false, " - Excluded")
            .build();
        assert_eq!(prompt, "Base - Included");
    }

    #[test]
    fn test_each_with_empty_iterator() {
        let prompt = PromptBuilder::new()
            .text("head")
            .each(Vec::<&str>::new(), |b, s| b.bullet(s))
            .build();
        assert_eq!(prompt, "head");
    }

    #[test]
    fn test_is_empty_and_into_string() {
        let builder = PromptBuilder::new();
        assert!(builder.is_empty());

        let builder = builder.text("x");
        assert!(!builder.is_empty());

        let s: String = builder.into();
        assert_eq!(s, "x");
    }
}
