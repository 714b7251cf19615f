use serde::{Deserialize, Deserializer};

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of pages, given `total` and `limit`.
    pub fn page_count(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        (self.total as u32).div_ceil(self.limit).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr<T> {
    Wrapped {
        #[serde(alias = "items", alias = "results")]
        data: Vec<T>,
        #[serde(default)]
        total: Option<usize>,
        #[serde(default)]
        page: Option<u32>,
        #[serde(default)]
        limit: Option<u32>,
    },
    Bare(Vec<T>),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PageRepr::deserialize(deserializer)? {
            PageRepr::Wrapped {
                data,
                total,
                page,
                limit,
            } => {
                let len = data.len();
                Page {
                    total: total.unwrap_or(len),
                    page: page.unwrap_or(1),
                    limit: limit.unwrap_or(len as u32),
                    data,
                }
            }
            PageRepr::Bare(data) => {
                let len = data.len();
                Page {
                    data,
                    total: len,
                    page: 1,
                    limit: len as u32,
                }
            }
        })
    }
}

/// Pagination and search parameters shared by all list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
        }
    }
}

impl ListQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }

    pub fn search(term: &str) -> Self {
        Self {
            search: Some(term.to_string()).filter(|s| !s.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Query string pairs in a stable order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(term) = &self.search {
            pairs.push(("search", term.trim().to_string()));
        }
        pairs
    }
}
