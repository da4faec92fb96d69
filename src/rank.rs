//! Ordering of search results by publication year.

use crate::article::ArticleRecord;

/// Sort newest first; unknown years go last.
///
/// The sort is stable, so records sharing a year keep their API order.
pub fn rank(mut records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    // `None < Some(_)`, so comparing b against a puts unknown years at the end
    records.sort_by(|a, b| b.year.cmp(&a.year));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, year: Option<i32>) -> ArticleRecord {
        ArticleRecord {
            title: Some(title.to_string()),
            year,
            ..Default::default()
        }
    }

    fn titles(records: &[ArticleRecord]) -> Vec<&str> {
        records.iter().map(|r| r.display_title()).collect()
    }

    #[test]
    fn test_descending_by_year() {
        let ranked = rank(vec![
            record("old", Some(1998)),
            record("new", Some(2024)),
            record("mid", Some(2010)),
        ]);
        assert_eq!(titles(&ranked), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_unknown_year_sorts_last() {
        let ranked = rank(vec![
            record("unknown", None),
            record("ancient", Some(1)),
            record("recent", Some(2020)),
        ]);
        assert_eq!(titles(&ranked), vec!["recent", "ancient", "unknown"]);
    }

    #[test]
    fn test_ties_keep_api_order() {
        let ranked = rank(vec![
            record("a", Some(2020)),
            record("x", None),
            record("b", Some(2020)),
            record("y", None),
            record("c", Some(2021)),
            record("d", Some(2020)),
        ]);
        assert_eq!(titles(&ranked), vec!["c", "a", "b", "d", "x", "y"]);
    }

    #[test]
    fn test_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
