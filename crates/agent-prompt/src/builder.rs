//! Fluent prompt builder
//!
//! [`PromptBuilder`] assembles plain-text prompts from pieces: free text,
//! `Label: value` lines, XML-style tagged blocks and numbered lists.

/// A fluent builder for constructing prompts
///
/// # Examples
///
/// ```
/// use agent_prompt::PromptBuilder;
///
/// let prompt = PromptBuilder::new()
///     .text("You are a weather expert.")
///     .blank_line()
///     .labeled("User", "What's the weather in Paris?")
///     .build();
///
/// assert_eq!(prompt, "You are a weather expert.\n\nUser: What's the weather in Paris?");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    parts: Vec<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add static text
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.parts.push(content.into());
        self
    }

    /// Add a newline
    pub fn newline(self) -> Self {
        self.text("\n")
    }

    /// Add a blank line (two newlines)
    pub fn blank_line(self) -> Self {
        self.text("\n\n")
    }

    /// Add `label: content`
    pub fn labeled(self, label: &str, content: impl AsRef<str>) -> Self {
        self.text(format!("{label}: {}", content.as_ref()))
    }

    /// Wrap content in `<tag>` ... `</tag>` on their own lines
    ///
    /// ```
    /// use agent_prompt::PromptBuilder;
    ///
    /// let prompt = PromptBuilder::new().tagged("scenario", "Trip to Tokyo").build();
    /// assert_eq!(prompt, "<scenario>\nTrip to Tokyo\n</scenario>\n");
    /// ```
    pub fn tagged(self, tag: &str, content: impl AsRef<str>) -> Self {
        self.text(format!("<{tag}>\n{}\n</{tag}>\n", content.as_ref()))
    }

    /// Add content conditionally
    pub fn when(self, condition: bool, content: impl Into<String>) -> Self {
        if condition { self.text(content) } else { self }
    }

    /// Add `1. item` lines, one per item
    pub fn numbered_list<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, item) in items.into_iter().enumerate() {
            self = self.text(format!("{}. {}\n", i + 1, item.as_ref()));
        }
        self
    }

    /// Check if the builder is empty
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        self.parts.concat()
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
    fn test_labeled_with_empty_content() {
        let prompt = PromptBuilder::new()
            .text("System")
            .blank_line()
            .labeled("User", "")
            .build();
        assert_eq!(prompt, "System\n\nUser: ");
    }

    #[test]
    fn test_numbered_list() {
        let prompt = PromptBuilder::new()
            .numbered_list(["First", "Second"])
            .build();
        assert_eq!(prompt, "1. First\n2. Second\n");
    }

    #[test]
    fn test_when() {
        let prompt = PromptBuilder::new()
            .text("Base")
            .when(true, " included")
            .when(false, " excluded")
            .build();
        assert_eq!(prompt, "Base included");
    }

    #[test]
    fn test_is_empty_and_into_string() {
        assert!(PromptBuilder::new().is_empty());

        let builder = PromptBuilder::new().text("a").newline().text("b");
        assert!(!builder.is_empty());
        let s: String = builder.into();
        assert_eq!(s, "a\nb");
    }
}
