use std::fmt;

use crate::PaginationInfo;

pub type ItemId = String;
pub type RequestId = u64;

/// A catalog record as shown in a result list. Owned by the backend; this is a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub year: Option<i32>,
    pub is_borrowed: bool,
}

/// One fetch response. Replaces whatever was rendered before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPage {
    pub items: Vec<Item>,
    pub pagination: PaginationInfo,
    /// Only the primary listing endpoint sends these.
    pub categories: Option<Vec<String>>,
}

/// Full record used to populate the edit form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemRecord {
    pub id: ItemId,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub is_donation: bool,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    Network,
    Timeout,
    HttpStatus(u16),
    Malformed,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Network => write!(f, "network error"),
            FetchFailure::Timeout => write!(f, "timeout"),
            FetchFailure::HttpStatus(code) => write!(f, "http status {code}"),
            FetchFailure::Malformed => write!(f, "malformed response"),
        }
    }
}
