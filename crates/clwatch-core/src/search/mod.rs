//! Search URL construction for the craigslist RSS front end.
//!
//! A [`SearchRequest`] carries the validated city, category code, and folded
//! free-text query; [`resolve_options`] turns typed search options into query
//! fragments; [`SearchRequest::url`] composes the final feed URL.

mod category;
mod options;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::SearchError;

pub use category::{category_code, is_vehicle_category};
pub use options::{resolve_options, StaticOption, VarOption};

const SEARCH_DOMAIN: &str = "craigslist.org";

/// A validated search request. Construction fails if city or category is
/// blank; the query may be empty.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    city: String,
    category: String,
    query: String,
}

impl SearchRequest {
    /// Validates and normalises the request fields.
    ///
    /// City and category are trimmed; the query is split on whitespace, each
    /// token percent-encoded, and rejoined with `+`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] if city or category is empty
    /// or whitespace-only.
    pub fn new(city: &str, category: &str, query: &str) -> Result<Self, SearchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(SearchError::InvalidRequest { field: "city" });
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(SearchError::InvalidRequest { field: "category" });
        }

        Ok(Self {
            city: city.to_owned(),
            category: category.to_owned(),
            query: fold_query(query),
        })
    }

    /// Composes the full feed URL from the base path, the resolved option
    /// fragments in the order supplied, and the trailing query fragment.
    #[must_use]
    pub fn url(&self, fragments: &[String]) -> String {
        let mut url = format!(
            "https://{city}.{SEARCH_DOMAIN}/search/{category}?format=rss&searchNearby=1",
            city = self.city,
            category = self.category,
        );
        for fragment in fragments {
            url.push('&');
            url.push_str(fragment);
        }
        if !self.query.is_empty() {
            let param = if is_vehicle_category(&self.category) {
                "auto_make_model"
            } else {
                "query"
            };
            url.push('&');
            url.push_str(param);
            url.push('=');
            url.push_str(&self.query);
        }
        url
    }
}

/// Fold a free-text query into a `+`-joined string of percent-encoded tokens.
fn fold_query(raw: &str) -> String {
    raw.split_whitespace()
        .map(|token| utf8_percent_encode(token, NON_ALPHANUMERIC).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_request_yields_base_url() {
        let req = SearchRequest::new("denver", "cta", "").unwrap();
        assert_eq!(
            req.url(&[]),
            "https://denver.craigslist.org/search/cta?format=rss&searchNearby=1"
        );
    }

    #[test]
    fn query_is_folded_and_appended_last() {
        let req = SearchRequest::new("denver", "cta", "volkswagen GTI").unwrap();
        let url = req.url(&[String::from("max_price=20000")]);
        assert!(
            url.ends_with("&max_price=20000&auto_make_model=volkswagen+GTI"),
            "query fragment must trail the options: {url}"
        );
    }

    #[test]
    fn non_vehicle_category_uses_generic_query_param() {
        let req = SearchRequest::new("denver", "sss", "road bike").unwrap();
        assert!(req.url(&[]).ends_with("&query=road+bike"));
    }

    #[test]
    fn query_tokens_are_percent_encoded() {
        let req = SearchRequest::new("denver", "cta", "S&S café").unwrap();
        let url = req.url(&[]);
        assert!(url.contains("auto_make_model=S%26S+caf%C3%A9"), "{url}");
    }

    #[test]
    fn blank_city_is_rejected() {
        let err = SearchRequest::new(" ", "cta", "x").unwrap_err();
        assert_eq!(err, SearchError::InvalidRequest { field: "city" });
    }

    #[test]
    fn blank_category_is_rejected() {
        let err = SearchRequest::new("denver", "\t", "x").unwrap_err();
        assert_eq!(err, SearchError::InvalidRequest { field: "category" });
    }

    #[test]
    fn city_and_category_are_trimmed() {
        let req = SearchRequest::new(" denver ", " cta ", "").unwrap();
        assert_eq!(
            req.url(&[]),
            "https://denver.craigslist.org/search/cta?format=rss&searchNearby=1"
        );
    }
}
