//! Product query parameters.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::catalog::Product;
use crate::error::CatalogError;

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: usize = 30;

/// A product listing query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive title substring. Empty matches everything.
    pub search: String,
    /// Case-insensitive exact category. Empty matches everything.
    pub category: String,
    /// Number of matches to skip.
    pub skip: usize,
    /// Page size. 0 returns every match.
    pub limit: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    /// Create a query that matches everything, first page.
    pub fn new() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set the title search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, skip: usize, limit: usize) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }

    /// Return every match in one page.
    pub fn unpaginated(self) -> Self {
        let skip = self.skip;
        self.with_pagination(skip, 0)
    }

    /// Build a query from decoded query-string pairs.
    ///
    /// Missing or empty values take their defaults and the first occurrence
    /// of a key wins. `skip` and `limit` must be non-negative integers;
    /// values too large for `usize` saturate.
    pub fn from_pairs<K, V>(pairs: &[(K, V)]) -> Result<Self, CatalogError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_ref()))
            .collect();
        let get = |name: &str| first_value(&pairs, name);

        let mut query = Self::new();
        if let Some(search) = get("search") {
            query.search = search.to_string();
        }
        if let Some(category) = get("category") {
            query.category = category.to_string();
        }
        if let Some(raw) = get("skip") {
            query.skip = parse_count("skip", raw)?;
        }
        if let Some(raw) = get("limit") {
            query.limit = parse_count("limit", raw)?;
        }
        Ok(query)
    }

    /// Build a query from a raw (percent-encoded) query string, with or
    /// without the leading `?`.
    pub fn from_query_string(qs: &str) -> Result<Self, CatalogError> {
        let qs = qs.strip_prefix('?').unwrap_or(qs);
        let pairs: Vec<(String, String)> = form_urlencoded::parse(qs.as_bytes())
            .into_owned()
            .collect();
        Self::from_pairs(&pairs)
    }

    /// Whether a product passes the category and search filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product) && self.matches_search(product)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category.is_empty() || product.category.to_lowercase() == self.category.to_lowercase()
    }

    fn matches_search(&self, product: &Product) -> bool {
        self.search.is_empty()
            || product
                .title
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}

fn first_value<'a>(pairs: &[(&'a str, &'a str)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| *v)
        .filter(|v| !v.is_empty())
}

fn parse_count(name: &str, raw: &str) -> Result<usize, CatalogError> {
    let invalid = || {
        CatalogError::InvalidArgument(format!(
            "{} must be a non-negative integer, got '{}'",
            name, raw
        ))
    };
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    // Only overflow can fail past the digit check; past the end is just an empty page.
    Ok(raw.parse().unwrap_or(usize::MAX))
}
