//! Normalized representation of one CrossRef search hit.

use serde::Serialize;

/// Label shown for a record without a title
pub const UNTITLED: &str = "Untitled";

/// Label shown for a record without a link
pub const NO_URL: &str = "No URL";

/// A single article returned by a search
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ArticleRecord {
    /// Article title, if CrossRef has one
    pub title: Option<String>,
    /// Authors formatted as "given family", in API order
    pub authors: Vec<String>,
    /// Year of the `issued` date, if known
    pub year: Option<i32>,
    /// Landing page URL (usually the DOI resolver link)
    pub url: Option<String>,
}

impl ArticleRecord {
    /// Title for display, falling back to [`UNTITLED`]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Authors joined with ", "
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }

    /// Year for display; empty when unknown
    pub fn year_label(&self) -> String {
        self.year.map(|y| y.to_string()).unwrap_or_default()
    }

    /// Link for display, falling back to [`NO_URL`]
    pub fn display_url(&self) -> &str {
        self.url.as_deref().unwrap_or(NO_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fallbacks() {
        let record = ArticleRecord::default();
        assert_eq!(record.display_title(), "Untitled");
        assert_eq!(record.display_url(), "No URL");
        assert_eq!(record.year_label(), "");
        assert_eq!(record.author_line(), "");
    }

    #[test]
    fn test_display_values() {
        let record = ArticleRecord {
            title: Some("Deep Learning".to_string()),
            authors: vec!["Yann LeCun".to_string(), "Yoshua Bengio".to_string()],
            year: Some(2015),
            url: Some("https://doi.org/10.1038/nature14539".to_string()),
        };
        assert_eq!(record.display_title(), "Deep Learning");
        assert_eq!(record.author_line(), "Yann LeCun, Yoshua Bengio");
        assert_eq!(record.year_label(), "2015");
        assert_eq!(record.display_url(), "https://doi.org/10.1038/nature14539");
    }
}
