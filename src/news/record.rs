use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_TITLE: &str = "No Title";
pub const NO_DESCRIPTION: &str = "No Description";
pub const NO_URL: &str = "#";
pub const NO_CONTENT: &str = "No Content";

/// One article from the news search response, with placeholders for absent fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub source_name: String,
    pub author: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub content: String,
}

impl NewsRecord {
    /// Permissive parse of a single article object. Missing, `null` or non-string
    /// fields are replaced with their placeholder; present fields are kept verbatim.
    pub fn from_article(article: &Value) -> Self {
        let source_name = article
            .get("source")
            .and_then(|source| source.get("name"))
            .and_then(Value::as_str);

        Self {
            source_name: or_placeholder(source_name, UNKNOWN_SOURCE),
            author: or_placeholder(str_field(article, "author"), UNKNOWN_AUTHOR),
            title: or_placeholder(str_field(article, "title"), NO_TITLE),
            description: or_placeholder(str_field(article, "description"), NO_DESCRIPTION),
            url: or_placeholder(str_field(article, "url"), NO_URL),
            content: or_placeholder(str_field(article, "content"), NO_CONTENT),
        }
    }

    /// Text block handed back to the assistant. Content is kept on the record
    /// but not rendered.
    pub fn format_block(&self) -> String {
        format!(
            "\nTitle: {}\nAuthor: {}\nSource: {}\nDescription: {}\nURL: {}\n",
            self.title, self.author, self.source_name, self.description, self.url
        )
    }
}

fn str_field<'a>(article: &'a Value, key: &str) -> Option<&'a str> {
    article.get(key).and_then(Value::as_str)
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value.unwrap_or(placeholder).to_string()
}

/// Extract records from a search response body, preserving provider order
pub fn records_from_response(body: &Value) -> Vec<NewsRecord> {
    body.get("articles")
        .and_then(Value::as_array)
        .map(|articles| articles.iter().map(NewsRecord::from_article).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_get_placeholders() {
        let record = NewsRecord::from_article(&json!({
            "title": "Bitcoin rallies",
            "url": "https://example.com/btc"
        }));

        assert_eq!(record.title, "Bitcoin rallies");
        assert_eq!(record.url, "https://example.com/btc");
        assert_eq!(record.source_name, UNKNOWN_SOURCE);
        assert_eq!(record.author, UNKNOWN_AUTHOR);
        assert_eq!(record.description, NO_DESCRIPTION);
        assert_eq!(record.content, NO_CONTENT);
    }

    #[test]
    fn test_null_fields_are_treated_as_missing() {
        let record = NewsRecord::from_article(&json!({
            "source": {"id": null, "name": null},
            "author": null,
            "title": "Markets",
            "description": "Stocks moved",
            "url": null,
            "content": "Body"
        }));

        assert_eq!(record.source_name, UNKNOWN_SOURCE);
        assert_eq!(record.author, UNKNOWN_AUTHOR);
        assert_eq!(record.url, NO_URL);
        assert_eq!(record.title, "Markets");
        assert_eq!(record.description, "Stocks moved");
        assert_eq!(record.content, "Body");
    }

    #[test]
    fn test_format_block_layout() {
        let record = NewsRecord {
            source_name: "Reuters".to_string(),
            author: "Jane Doe".to_string(),
            title: "Title A".to_string(),
            description: "Desc A".to_string(),
            url: "https://a".to_string(),
            content: "ignored".to_string(),
        };

        assert_eq!(
            record.format_block(),
            "\nTitle: Title A\nAuthor: Jane Doe\nSource: Reuters\nDescription: Desc A\nURL: https://a\n"
        );
    }

    #[test]
    fn test_records_keep_provider_order() {
        let body = json!({
            "status": "ok",
            "articles": [{"title": "first"}, {"title": "second"}, {"title": "third"}]
        });
        let titles: Vec<_> = records_from_response(&body)
            .into_iter()
            .map(|record| record.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_articles_array_is_empty() {
        assert!(records_from_response(&json!({"status": "ok"})).is_empty());
    }
}
