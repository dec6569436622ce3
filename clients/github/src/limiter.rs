use github_types::{Rate, Timestamp};
use log::debug;
use reqwest::header::HeaderMap;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

pub(crate) const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub(crate) const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub(crate) const RESET_HEADER: &str = "x-ratelimit-reset";

/// Last rate limit reported by the API, shared by every clone of a client.
///
/// The whole [`Rate`] is swapped under one lock, so a reader sees either the previous or the next
/// snapshot. Last write wins.
#[derive(Clone, Debug, Default)]
pub struct RateCache {
    rate: Arc<RwLock<Option<Rate>>>,
}

impl RateCache {
    /// `None` until a response carrying rate headers has been seen.
    pub fn get(&self) -> Option<Rate> {
        *self.rate.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn store(&self, rate: Rate) {
        *self.rate.write().unwrap_or_else(PoisonError::into_inner) = Some(rate);
        debug!("Updated limits: {}", rate);
    }
}

/// Reads the `X-RateLimit-*` triple. A missing or malformed header yields no rate at all.
pub(crate) fn parse_rate(headers: &HeaderMap) -> Option<Rate> {
    let limit = read_header::<u32>(headers, LIMIT_HEADER)?;
    let remaining = read_header::<u32>(headers, REMAINING_HEADER)?;
    let reset = read_header::<i64>(headers, RESET_HEADER)?;
    Some(Rate::new(limit, remaining, Timestamp::from_unix(reset)?))
}

fn read_header<T: FromStr>(headers: &HeaderMap, header: &str) -> Option<T> {
    headers.get(header)?.to_str().ok()?.trim().parse::<T>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use std::thread;

    fn headers(limit: &str, remaining: &str, reset: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LIMIT_HEADER, HeaderValue::from_str(limit).unwrap());
        headers.insert(REMAINING_HEADER, HeaderValue::from_str(remaining).unwrap());
        headers.insert(RESET_HEADER, HeaderValue::from_str(reset).unwrap());
        headers
    }

    #[test]
    fn parses_complete_triple() {
        let rate = parse_rate(&headers("5000", "4999", "1372700873")).unwrap();
        assert_eq!(rate, Rate::new(5000, 4999, Timestamp::from_unix(1372700873).unwrap()));
    }

    #[test]
    fn partial_or_malformed_headers_yield_nothing() {
        let mut partial = headers("5000", "4999", "1372700873");
        partial.remove(RESET_HEADER);
        assert_eq!(parse_rate(&partial), None);
        assert_eq!(parse_rate(&headers("5000", "lots", "1372700873")), None);
        assert_eq!(parse_rate(&HeaderMap::new()), None);
    }

    #[test]
    fn clones_share_the_cache() {
        let cache = RateCache::default();
        let clone = cache.clone();
        assert_eq!(clone.get(), None);
        let rate = Rate::new(60, 10, Timestamp::from_unix(100).unwrap());
        cache.store(rate);
        assert_eq!(clone.get(), Some(rate));
    }

    #[test]
    fn concurrent_writers_never_tear() {
        let cache = RateCache::default();
        let writers = (1..=8u32).map(|writer| {
            let cache = cache.clone();
            thread::spawn(move || {
                for round in 0..500u32 {
                    let value = writer * 1000 + round;
                    cache.store(Rate::new(value, value, Timestamp::from_unix(value as i64).unwrap()));
                }
            })
        });
        let writers: Vec<_> = writers.collect();
        let reader = {
            let cache = cache.clone();
            thread::spawn(move || {
                for _ in 0..5000 {
                    if let Some(rate) = cache.get() {
                        assert_eq!(rate.limit, rate.remaining);
                        assert_eq!(rate.reset.timestamp(), rate.limit as i64);
                    }
                }
            })
        };
        for writer in writers {
            writer.join().unwrap();
        }
        reader.join().unwrap();
        let last = cache.get().unwrap();
        assert_eq!(last.limit, last.remaining);
    }
}
