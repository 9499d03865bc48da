use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.page_size < 1 || self.page_size > 100 {
            return Err("page_size must be between 1 and 100".to_string());
        }
        Ok(())
    }

    /// Row offset of the page. Kept in `i64` so that any `u32` page is representable.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn total_pages(&self, total_items: i64) -> u32 {
        ((total_items.max(0) as f64) / (self.page_size as f64)).ceil() as u32
    }

    /// The first page always exists, even when the collection is empty.
    pub fn is_out_of_range(&self, total_items: i64) -> bool {
        self.page > 1 && self.page > self.total_pages(total_items)
    }

    /// Relative `(next, previous)` links for the current page.
    ///
    /// Every query parameter other than `page` is carried over untouched, and the
    /// link to the first page drops `page` altogether.
    pub fn links(
        &self,
        path: &str,
        query: Option<&str>,
        total_items: i64,
    ) -> (Option<String>, Option<String>) {
        let next = (self.page < self.total_pages(total_items))
            .then(|| page_url(path, query, self.page + 1));
        let previous = (self.page > 1).then(|| page_url(path, query, self.page - 1));

        (next, previous)
    }
}

fn page_url(path: &str, query: Option<&str>, page: u32) -> String {
    let page_pair = format!("page={page}");

    let mut pairs: Vec<&str> = query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && pair.split('=').next() != Some("page"))
        .collect();

    if page > 1 {
        pairs.push(&page_pair);
    }

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, pairs.join("&"))
    }
}

/// List envelope shared by every collection endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(
        results: Vec<T>,
        count: i64,
        next: Option<String>,
        previous: Option<String>,
    ) -> Self {
        Self {
            count,
            next,
            previous,
            results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Builds an `ORDER BY` body from an `?ordering=` value such as `-races_count,name`.
///
/// `allowed` maps public field names to SQL expressions. Unknown and repeated
/// fields are skipped; if nothing usable remains, `default` is used. `tiebreak`
/// is always appended so that pages stay stable.
pub fn order_by_clause(
    ordering: Option<&str>,
    allowed: &[(&str, &str)],
    default: &str,
    tiebreak: &str,
) -> String {
    let mut seen: Vec<&str> = Vec::new();
    let mut terms: Vec<String> = Vec::new();

    for raw in ordering.unwrap_or_default().split(',') {
        let raw = raw.trim();
        let (field, direction) = match raw.strip_prefix('-') {
            Some(field) => (field, "DESC"),
            None => (raw, "ASC"),
        };

        if seen.contains(&field) {
            continue;
        }

        if let Some((_, column)) = allowed.iter().find(|(name, _)| *name == field) {
            seen.push(field);
            terms.push(format!("{column} {direction}"));
        }
    }

    if terms.is_empty() {
        terms.push(default.to_string());
    }
    terms.push(format!("{tiebreak} ASC"));

    terms.join(", ")
}

/// Escapes `%`, `_` and `\` so user input can sit inside a `LIKE` pattern.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u32, page_size: u32) -> PaginationParams {
        PaginationParams { page, page_size }
    }

    #[test]
    fn test_pagination_validation() {
        assert!(params(1, 50).validate().is_ok());
        assert!(params(0, 50).validate().is_err());
        assert!(params(1, 0).validate().is_err());
        assert!(params(1, 101).validate().is_err());
    }

    #[test]
    fn test_offset_and_limit() {
        let p = params(3, 4);
        assert_eq!(p.offset(), 8);
        assert_eq!(p.limit(), 4);
    }

    #[test]
    fn test_offset_of_last_possible_page() {
        let p = params(u32::MAX, 100);
        assert_eq!(p.offset(), (i64::from(u32::MAX) - 1) * 100);
        assert!(p.is_out_of_range(10));
    }

    #[test]
    fn test_out_of_range() {
        assert!(!params(1, 4).is_out_of_range(0));
        assert!(!params(2, 4).is_out_of_range(5));
        assert!(params(3, 4).is_out_of_range(5));
        assert!(params(2, 4).is_out_of_range(0));
    }

    #[test]
    fn test_links_on_single_page() {
        let (next, previous) = params(1, 50).links("/drones/", None, 3);
        assert_eq!(next, None);
        assert_eq!(previous, None);
    }

    #[test]
    fn test_links_keep_other_parameters() {
        let (next, previous) =
            params(2, 2).links("/pilots/", Some("gender=M&page=2&page_size=2"), 5);
        assert_eq!(next.as_deref(), Some("/pilots/?gender=M&page_size=2&page=3"));
        assert_eq!(previous.as_deref(), Some("/pilots/?gender=M&page_size=2"));
    }

    #[test]
    fn test_previous_link_to_first_page_drops_page() {
        let (_, previous) = params(2, 1).links("/drones/", Some("page=2&page_size=1"), 2);
        assert_eq!(previous.as_deref(), Some("/drones/?page_size=1"));

        let (_, previous) = params(2, 50).links("/drones/", Some("page=2"), 60);
        assert_eq!(previous.as_deref(), Some("/drones/"));
    }

    #[test]
    fn test_page_prefixed_parameters_survive() {
        let (next, _) = params(1, 1).links("/drones/", Some("page_size=1&pages=x"), 2);
        assert_eq!(next.as_deref(), Some("/drones/?page_size=1&pages=x&page=2"));
    }

    const FIELDS: &[(&str, &str)] = &[("name", "p.name"), ("races_count", "p.races_count")];

    #[test]
    fn test_order_by_default() {
        assert_eq!(
            order_by_clause(None, FIELDS, "p.name ASC", "p.id"),
            "p.name ASC, p.id ASC"
        );
    }

    #[test]
    fn test_order_by_multiple_fields() {
        assert_eq!(
            order_by_clause(Some("-races_count,name"), FIELDS, "p.name ASC", "p.id"),
            "p.races_count DESC, p.name ASC, p.id ASC"
        );
    }

    #[test]
    fn test_order_by_ignores_unknown_and_repeated_fields() {
        assert_eq!(
            order_by_clause(Some("gender, -name,name,;drop"), FIELDS, "p.name ASC", "p.id"),
            "p.name DESC, p.id ASC"
        );
        assert_eq!(
            order_by_clause(Some("bogus"), FIELDS, "p.name ASC", "p.id"),
            "p.name ASC, p.id ASC"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("Hexa"), "Hexa");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
