//! Crossref API client for title search.
//!
//! This module sends one `works` query per search and normalizes the returned
//! items into [`ArticleRecord`]s: title, authors, issued year and landing URL.

use crate::article::ArticleRecord;
use crate::config::ClientConfig;
use crate::error::{AppError, QueryError, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Crossref API client
#[derive(Debug, Clone)]
pub struct CrossrefClient {
    client: reqwest::Client,
    works_url: String,
    rows: u32,
    mailto: Option<String>,
}

impl CrossrefClient {
    /// Create a new CrossrefClient from validated configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            works_url: config.works_url.clone(),
            rows: config.rows,
            mailto: config
                .mailto
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
        })
    }

    /// Search works by title.
    ///
    /// Returns the items of the first page in API order. An empty vector means
    /// CrossRef had no match; it is not an error.
    pub async fn search(&self, term: &str) -> std::result::Result<Vec<ArticleRecord>, QueryError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let rows = self.rows.to_string();
        let mut params = vec![("query.title", term), ("rows", rows.as_str())];
        if let Some(ref mailto) = self.mailto {
            params.push(("mailto", mailto.as_str()));
        }

        debug!(term = term, rows = self.rows, url = %self.works_url, "Querying Crossref");

        let response = self.client.get(&self.works_url).query(&params).send().await?;

        if let Some(limit) = response.headers().get("X-Rate-Limit-Limit") {
            debug!(limit = ?limit, "Rate limit");
        }

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Transport(format!(
                "Crossref API returned status {}",
                status
            )));
        }

        let body = response.text().await?;
        let data: CrossrefResponse =
            serde_json::from_str(&body).map_err(|e| QueryError::Parse(e.to_string()))?;

        let records: Vec<ArticleRecord> = data
            .message
            .items
            .into_iter()
            .map(parse_crossref_item)
            .collect();

        info!(term = term, count = records.len(), "Crossref search complete");
        Ok(records)
    }
}

// === Crossref API Response Types ===

#[derive(Debug, Deserialize)]
struct CrossrefResponse {
    #[serde(default)]
    message: CrossrefMessage,
}

#[derive(Debug, Default, Deserialize)]
struct CrossrefMessage {
    #[serde(default)]
    items: Vec<CrossrefItem>,
}

#[derive(Debug, Default, Deserialize)]
struct CrossrefItem {
    #[serde(default)]
    title: Option<Vec<String>>,
    #[serde(default)]
    author: Option<Vec<CrossrefAuthor>>,
    #[serde(default)]
    issued: Option<CrossrefDate>,
    #[serde(rename = "URL", default)]
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CrossrefAuthor {
    #[serde(default)]
    given: Option<String>,
    #[serde(default)]
    family: Option<String>,
    /// Organisation authors carry only a name
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CrossrefDate {
    #[serde(rename = "date-parts", default)]
    date_parts: Option<Vec<Vec<serde_json::Value>>>,
}

/// Parse Crossref API item into an article record
fn parse_crossref_item(item: CrossrefItem) -> ArticleRecord {
    let title = item
        .title
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|t| clean_title(&t))
        .filter(|t| !t.is_empty());

    let authors = item
        .author
        .unwrap_or_default()
        .iter()
        .filter_map(format_author)
        .collect::<Vec<_>>();

    let year = item.issued.as_ref().and_then(issued_year);

    let url = item
        .url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    ArticleRecord {
        title,
        authors,
        year,
        url,
    }
}

/// "given family", or the organisation name when both are missing
fn format_author(author: &CrossrefAuthor) -> Option<String> {
    let given = author.given.as_deref().unwrap_or("");
    let family = author.family.as_deref().unwrap_or("");
    let full = format!("{} {}", given, family).trim().to_string();
    if !full.is_empty() {
        return Some(full);
    }
    author
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// First component of the first date-parts entry
fn issued_year(date: &CrossrefDate) -> Option<i32> {
    date.date_parts
        .as_ref()
        .and_then(|parts| parts.first())
        .and_then(|parts| parts.first())
        .and_then(value_to_year)
        .filter(|y| *y != 0)
}

/// Convert JSON value to a year
fn value_to_year(val: &serde_json::Value) -> Option<i32> {
    match val {
        serde_json::Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn tag_regex() -> Option<&'static Regex> {
    static TAG_RE: OnceLock<Option<Regex>> = OnceLock::new();
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").ok()).as_ref()
}

/// Strip inline markup (JATS `<i>`, `<sub>`, ...) and collapse whitespace
fn clean_title(text: &str) -> String {
    let stripped = match tag_regex() {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    };
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> CrossrefClient {
        let config = ClientConfig {
            works_url: format!("{}/works", server.url()),
            ..Default::default()
        };
        CrossrefClient::new(&config).expect("client should build")
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("<i>E. coli</i> growth"), "E. coli growth");
        assert_eq!(clean_title("No tags"), "No tags");
        assert_eq!(clean_title("  H<sub>2</sub>O \n dynamics "), "H2O dynamics");
    }

    #[test]
    fn test_parse_crossref_item() {
        let item: CrossrefItem = serde_json::from_value(serde_json::json!({
            "title": ["Test Title"],
            "author": [
                {"given": "John", "family": "Doe"},
                {"family": "Solo"},
                {"name": "The Consortium"},
                {}
            ],
            "issued": {"date-parts": [[2023, 6, 15]]},
            "URL": "https://doi.org/10.1234/test"
        }))
        .expect("valid item");

        let record = parse_crossref_item(item);
        assert_eq!(record.title.as_deref(), Some("Test Title"));
        assert_eq!(record.authors, vec!["John Doe", "Solo", "The Consortium"]);
        assert_eq!(record.year, Some(2023));
        assert_eq!(record.url.as_deref(), Some("https://doi.org/10.1234/test"));
    }

    #[test]
    fn test_parse_item_defaults() {
        let record = parse_crossref_item(CrossrefItem::default());
        assert_eq!(record, ArticleRecord::default());
        assert_eq!(record.display_title(), "Untitled");
        assert_eq!(record.display_url(), "No URL");
    }

    #[test]
    fn test_issued_year_edge_cases() {
        let parse = |v: serde_json::Value| -> Option<i32> {
            let date: CrossrefDate = serde_json::from_value(v).expect("valid date");
            issued_year(&date)
        };
        assert_eq!(parse(serde_json::json!({"date-parts": [[null]]})), None);
        assert_eq!(parse(serde_json::json!({"date-parts": []})), None);
        assert_eq!(parse(serde_json::json!({"date-parts": [[0]]})), None);
        assert_eq!(parse(serde_json::json!({"date-parts": [["1999"]]})), Some(1999));
        assert_eq!(parse(serde_json::json!({})), None);
        assert_eq!(parse(serde_json::json!({"date-parts": null})), None);
    }

    #[test]
    fn test_null_fields_do_not_fail_the_item() {
        let item: CrossrefItem = serde_json::from_value(serde_json::json!({
            "title": null,
            "author": null,
            "issued": {"date-parts": null},
            "URL": null
        }))
        .expect("nulls are tolerated");

        assert_eq!(parse_crossref_item(item), ArticleRecord::default());
    }

    #[tokio::test]
    async fn test_item_with_null_lists_keeps_page() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/works")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"message":{"items":[
                    {"title":null,"author":null,"URL":"https://doi.org/odd"},
                    {"title":["Normal"],"author":[{"given":"Ana","family":"Lima"}]}
                ]}}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let records = client.search("odd").await.expect("page should parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, None);
        assert!(records[0].authors.is_empty());
        assert_eq!(records[1].authors, vec!["Ana Lima"]);
    }

    #[tokio::test]
    async fn test_search_sends_title_and_rows() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/works")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query.title".into(), "graph neural networks".into()),
                Matcher::UrlEncoded("rows".into(), "100".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"ok","message":{"items":[
                    {"title":["A"],"issued":{"date-parts":[[2019]]},"URL":"https://doi.org/a"},
                    {"title":["B"]}
                ]}}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let records = client
            .search("  graph neural networks ")
            .await
            .expect("search should succeed");

        mock.assert_async().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, Some(2019));
        assert_eq!(records[1].year, None);
    }

    #[tokio::test]
    async fn test_empty_term_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/works")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.search("   ").await.expect_err("empty term must fail");

        assert!(matches!(err, QueryError::EmptyQuery));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_is_transport() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/works")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.search("anything").await.expect_err("503 must fail");
        assert!(matches!(err, QueryError::Transport(ref m) if m.contains("503")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/works")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.search("anything").await.expect_err("html must fail");
        assert!(matches!(err, QueryError::Parse(_)));
    }

    #[tokio::test]
    async fn test_missing_items_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/works")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"ok","message":{}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let records = client.search("nothing here").await.expect("empty is ok");
        assert!(records.is_empty());
    }
}
