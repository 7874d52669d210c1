use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One item record from the polled feed.
///
/// Only `id`, `title`, and `summary` are inspected by the diff logic; whatever
/// else the feed item carried (link, date, ...) rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Listing {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: summary.into(),
            extra: BTreeMap::new(),
        }
    }

    /// The listing's page URL, if the feed item carried one.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.extra.get("link").map(String::as_str)
    }
}
