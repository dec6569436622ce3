//! Query string options shared by list and upload endpoints.

use url::form_urlencoded;

/// Options rendered into a query string. Unset options produce no pair.
pub trait QueryOptions {
    fn pairs(&self) -> Vec<(&'static str, String)>;
}

/// Pagination for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// 1-based page to fetch.
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl QueryOptions for ListOptions {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}

/// Name of an uploaded release asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    pub name: Option<String>,
}

impl QueryOptions for UploadOptions {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        self.name.iter().map(|name| ("name", name.clone())).collect()
    }
}

/// Appends `options` to `path`, keeping any query already present.
pub fn add_options<O: QueryOptions + ?Sized>(path: &str, options: &O) -> String {
    let pairs = options.pairs();
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    let separator = match path.find('?') {
        None => "?",
        Some(_) if path.ends_with('?') || path.ends_with('&') => "",
        Some(_) => "&",
    };
    format!("{}{}{}", path, separator, query)
}
