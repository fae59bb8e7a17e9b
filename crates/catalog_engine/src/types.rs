use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub type RequestId = u64;

/// Backend ids arrive as numbers or strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Integer(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => RecordId(text),
            Raw::Integer(number) => RecordId(number.to_string()),
        })
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<BookSummary>,
    pub pagination: PageMeta,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookSummary {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(rename = "isBorrowed", alias = "is_borrowed", default)]
    pub is_borrowed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookDetails {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(rename = "isDonation", alias = "is_donation", default)]
    pub is_donation: bool,
    #[serde(rename = "coverImage", alias = "cover_image", default)]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MutationResponse {
    pub status: ReplyStatus,
    pub message: String,
}

/// Query for the listing/search endpoint. Filters are sent after `page` and `query`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchParams {
    pub page: u32,
    pub query: String,
    pub filters: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateBook(serde_json::Value),
    CreateReader(serde_json::Value),
    EditBook {
        id: String,
        body: serde_json::Value,
    },
    DeleteBook {
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SearchCompleted {
        request_id: RequestId,
        result: Result<SearchResponse, FetchError>,
    },
    ItemLoaded {
        id: String,
        result: Result<BookDetails, FetchError>,
    },
    MutationCompleted {
        mutation: Mutation,
        result: Result<MutationResponse, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_accepts_both_spellings_and_id_types() {
        let body = r#"{
            "items": [
                {"id": 17, "title": "Тютюн", "author": "Димитър Димов", "category": null, "year": 1951, "isBorrowed": true},
                {"id": "A-2", "title": "Под игото", "author": "Иван Вазов", "is_borrowed": false}
            ],
            "pagination": {"page": 1, "total_pages": 3, "total_items": 25}
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.items[0].id, RecordId("17".into()));
        assert!(response.items[0].is_borrowed);
        assert_eq!(response.items[1].id.to_string(), "A-2");
        assert_eq!(response.items[1].year, None);
        assert!(response.categories.is_none());
        assert_eq!(response.pagination.total_items, 25);
    }

    #[test]
    fn categories_are_optional_list_of_names() {
        let body = r#"{"items": [], "pagination": {"page": 1, "total_pages": 0, "total_items": 0},
                       "categories": [{"name": "Роман"}, {"name": "Поезия"}]}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let names: Vec<_> = response
            .categories
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Роман", "Поезия"]);
    }

    #[test]
    fn mutation_response_status_is_lowercase() {
        let reply: MutationResponse =
            serde_json::from_str(r#"{"status": "error", "message": "Липсва заглавие."}"#).unwrap();
        assert_eq!(reply.status, ReplyStatus::Error);
        assert!(serde_json::from_str::<MutationResponse>(r#"{"status": "ok", "message": ""}"#).is_err());
    }
}
