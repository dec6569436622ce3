use github_types::RateLimits;
use serde::Deserialize;

/// Body of `GET rate_limit`.
#[derive(Deserialize, Debug)]
pub struct RateLimitBody {
    pub resources: RateLimits,
}
