use crate::limiter::parse_rate;
use github_types::Rate;
use log::debug;
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Method, StatusCode};
use url::Url;

/// Link headers longer than this are ignored.
const MAX_LINK_HEADER_LEN: usize = 8 * 1024;
/// Only this many `Link` entries are looked at.
const MAX_LINK_ENTRIES: usize = 16;

/// Metadata of a completed call: what was asked, what came back, and the pagination and rate
/// headers already parsed.
#[derive(Debug, Clone)]
pub struct Response {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub pages: Pages,
    /// Present only when all three rate headers were sent and parsed.
    pub rate: Option<Rate>,
}

impl Response {
    pub fn from_parts(method: Method, url: Url, status: StatusCode, headers: HeaderMap) -> Response {
        let pages = headers
            .get(LINK)
            .and_then(|link| link.to_str().ok())
            .map(Pages::from_link_header)
            .unwrap_or_default();
        let rate = parse_rate(&headers);
        Response {
            method,
            url,
            status,
            headers,
            pages,
            rate,
        }
    }
}

/// Page numbers advertised by the `Link` header. `None` means there is no such page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pages {
    pub next: Option<u32>,
    pub prev: Option<u32>,
    pub first: Option<u32>,
    pub last: Option<u32>,
}

impl Pages {
    /// Parses `<url>; rel="next", <url>; rel="last"`. Entries without a URL, a known `rel` or a
    /// positive `page` query parameter are skipped. Relative targets are accepted.
    pub fn from_link_header(link: &str) -> Pages {
        let mut pages = Pages::default();
        if link.len() > MAX_LINK_HEADER_LEN {
            debug!("Ignoring {} byte Link header", link.len());
            return pages;
        }
        for entry in link.split(',').take(MAX_LINK_ENTRIES) {
            let mut url = None;
            let mut rel = None;
            for segment in entry.split(';').map(str::trim) {
                if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                    url = Some(inner);
                } else if let Some(value) = segment.strip_prefix("rel=") {
                    rel = Some(value.trim_matches('"'));
                }
            }
            let page = match url.and_then(page_from_url) {
                Some(page) => page,
                None => continue,
            };
            match rel {
                Some("next") => pages.next = Some(page),
                Some("prev") => pages.prev = Some(page),
                Some("first") => pages.first = Some(page),
                Some("last") => pages.last = Some(page),
                _ => {}
            }
        }
        pages
    }
}

/// Relative link targets are resolved against a placeholder host, only the query matters.
fn page_from_url(url: &str) -> Option<u32> {
    let url = Url::parse("http://localhost/").ok()?.join(url).ok()?;
    let page = url.query_pairs().find(|(key, _)| key == "page")?.1;
    page.parse::<u32>().ok().filter(|page| *page > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use rstest::rstest;

    #[test]
    fn next_and_last() {
        let pages = Pages::from_link_header(
            r#"<https://api.github.com/user/repos?page=3&per_page=100>; rel="next", <https://api.github.com/user/repos?page=10&per_page=100>; rel="last""#,
        );
        assert_eq!(
            pages,
            Pages {
                next: Some(3),
                prev: None,
                first: None,
                last: Some(10),
            }
        );
    }

    #[test]
    fn all_four_relations() {
        let pages = Pages::from_link_header(
            r#"<https://api.github.com/?page=4>; rel="next", <https://api.github.com/?page=2>; rel="prev", <https://api.github.com/?page=1>; rel="first", <https://api.github.com/?page=9>; rel="last""#,
        );
        assert_eq!(pages.next, Some(4));
        assert_eq!(pages.prev, Some(2));
        assert_eq!(pages.first, Some(1));
        assert_eq!(pages.last, Some(9));
    }

    #[rstest]
    #[case::no_url(r#"https://api.github.com/?page=2; rel="next""#)]
    #[case::no_rel(r#"<https://api.github.com/?page=2>"#)]
    #[case::unknown_rel(r#"<https://api.github.com/?page=2>; rel="self""#)]
    #[case::no_page(r#"<https://api.github.com/?per_page=2>; rel="next""#)]
    #[case::page_not_a_number(r#"<https://api.github.com/?page=two>; rel="next""#)]
    #[case::zero_page(r#"<https://api.github.com/?page=0>; rel="next""#)]
    #[case::unparseable_url(r#"<http://[::1>; rel="next""#)]
    #[case::empty("")]
    fn malformed_entries_are_skipped(#[case] link: &str) {
        assert_eq!(Pages::from_link_header(link), Pages::default());
    }

    #[test]
    fn relative_targets_are_read() {
        let pages = Pages::from_link_header(
            r#"</user/repos?page=2>; rel="next", <repos?per_page=5&page=7>; rel="last""#,
        );
        assert_eq!(pages.next, Some(2));
        assert_eq!(pages.last, Some(7));
    }

    #[test]
    fn a_bad_entry_does_not_spoil_the_rest() {
        let pages = Pages::from_link_header(
            r#"garbage, <https://api.github.com/?page=x>; rel="next", <https://api.github.com/?page=5>; rel="last""#,
        );
        assert_eq!(pages.next, None);
        assert_eq!(pages.last, Some(5));
    }

    #[test]
    fn oversized_header_is_ignored() {
        let padding = "x".repeat(MAX_LINK_HEADER_LEN);
        let link = format!(r#"<https://api.github.com/?page=2&pad={}>; rel="next""#, padding);
        assert_eq!(Pages::from_link_header(&link), Pages::default());
    }

    #[test]
    fn entries_past_the_cap_are_not_read() {
        let mut entries = vec![r#"<https://api.github.com/?page=1>; rel="self""#; MAX_LINK_ENTRIES];
        entries.push(r#"<https://api.github.com/?page=2>; rel="next""#);
        assert_eq!(Pages::from_link_header(&entries.join(", ")).next, None);
    }

    #[test]
    fn envelope_parses_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_static(r#"<https://api.github.com/?page=2>; rel="next""#));
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("60"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1372700873"));
        let response = Response::from_parts(
            Method::GET,
            Url::parse("https://api.github.com/user").unwrap(),
            StatusCode::OK,
            headers,
        );
        assert_eq!(response.pages.next, Some(2));
        let rate = response.rate.unwrap();
        assert_eq!((rate.limit, rate.remaining), (60, 0));
        assert_eq!(rate.reset.timestamp(), 1372700873);
    }
}
