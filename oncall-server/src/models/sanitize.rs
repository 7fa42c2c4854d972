//! Free-text sanitisation for names and specialties
//!
//! Input is trimmed, stripped of HTML tags and HTML-escaped before it is
//! stored.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum stored length for sanitised text fields
pub const MAX_TEXT_LEN: usize = 255;

/// A tag opens with `<` followed by a non-space character and runs to the
/// next `>` or the end of input. `a < b` is left alone.
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^\s>][^>]*(?:>|$)").expect("invalid tag regex"));

/// Sanitised, non-empty text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanText(String);

impl CleanText {
    /// Sanitise `raw` for storage in `field`.
    ///
    /// # Example
    /// ```
    /// use oncall_server::models::CleanText;
    ///
    /// let name = CleanText::new("name", "  <b>Dr. O'Neil</b> ").unwrap();
    /// assert_eq!(name.as_str(), "Dr. O&#039;Neil");
    /// assert!(CleanText::new("name", "<i></i>").is_err());
    /// ```
    pub fn new(field: &'static str, raw: &str) -> Result<Self, ValidationError> {
        let stripped = strip_tags(raw.trim());
        let trimmed = stripped.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        let escaped = escape_html(trimmed);
        if escaped.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "exceeds maximum length of 255 characters",
            });
        }

        Ok(Self(escaped))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CleanText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Remove anything that looks like an HTML tag.
pub fn strip_tags(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
