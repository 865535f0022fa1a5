//! Shared query infrastructure: the [`Query`] trait, [`Pagination`] fields, and [`SortDirection`].

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Trait implemented by every list-parameter type. Provides the query pairs
/// passed through to the API unmodified.
pub trait Query {
    /// Returns this query's parameters as `(key, value)` pairs.
    fn query_pairs(&self) -> Vec<(String, String)>;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for (key, value) in self.query_pairs() {
            url.query_pairs_mut().append_pair(&key, &value);
        }
        url
    }
}

/// Sort order for API results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (oldest/smallest first).
    Asc,
    /// Descending order (newest/largest first). This is the default.
    #[default]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Page selection and ordering shared by all list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed). Defaults to 1.
    pub page: u32,
    /// Results per page. `None` uses the API default.
    pub page_size: Option<u32>,
    /// Field to sort by. `None` uses the API default (`createdAt`).
    pub sort_field: Option<String>,
    /// Sort direction. `None` uses the API default (descending).
    pub sort_direction: Option<SortDirection>,
}

impl Default for Pagination {
    fn default() -> Pagination {
        Pagination {
            page: 1,
            page_size: None,
            sort_field: None,
            sort_direction: None,
        }
    }
}

impl Pagination {
    /// Sets the page number (1-indexed).
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the number of results per page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_sort_field(mut self, field: &str) -> Self {
        self.sort_field = Some(field.to_string());
        self
    }

    pub fn with_sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = Some(direction);
        self
    }
}

impl Query for Pagination {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push("page", self.page);
        pairs.push_opt("pageSize", self.page_size);
        pairs.push_opt("sortField", self.sort_field.as_deref());
        pairs.push_opt("sortType", self.sort_direction);
        pairs.into_inner()
    }
}

/// Small accumulator for building `(key, value)` query pairs from optional fields.
#[derive(Debug, Clone, Default)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn into_inner(self) -> Vec<(String, String)> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pagination_only_sends_page() {
        let pairs = Pagination::default().query_pairs();
        assert_eq!(pairs, vec![("page".to_string(), "1".to_string())]);
    }

    #[test]
    fn full_pagination() {
        let url = Pagination::default()
            .with_page(3)
            .with_page_size(50)
            .with_sort_field("name")
            .with_sort_direction(SortDirection::Asc)
            .add_to_url(&Url::parse("https://example.com/api/short-link").unwrap());
        assert_eq!(
            url.query(),
            Some("page=3&pageSize=50&sortField=name&sortType=asc")
        );
    }

    #[test]
    fn sort_direction_parses_case_insensitively() {
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
