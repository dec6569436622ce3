use derive_more::Constructor;
use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Rate limit standing of a client.
#[derive(Constructor, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// Requests allowed per window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the window rolls over.
    pub reset: Timestamp,
}

/// Limits per API family, as reported by the `rate_limit` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    /// Everything except search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Rate>,
}

impl_stringify! {
    Rate { limit, remaining, reset }
    RateLimits { core, search }
}

#[test]
fn rate_limits_body_decodes_unix_reset() {
    let limits: RateLimits = serde_json::from_str(
        r#"{
            "core": {"limit": 5000, "remaining": 4999, "reset": 1372700873},
            "search": {"limit": 30, "remaining": 18, "reset": 1372697452}
        }"#,
    )
    .unwrap();
    let core = limits.core.unwrap();
    assert_eq!(core.limit, 5000);
    assert_eq!(core.remaining, 4999);
    assert_eq!(Some(core.reset), Timestamp::from_unix(1372700873));
    assert_eq!(limits.search.map(|search| search.remaining), Some(18));
}

#[test]
fn rate_stringifies_with_reset_time() {
    let rate = Rate::new(60, 59, Timestamp::from_unix(0).unwrap());
    assert_eq!(
        rate.to_string(),
        "Rate{limit:60, remaining:59, reset:Timestamp{1970-01-01 00:00:00 UTC}}"
    );
}
