use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use derive_more::{Deref, From};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A point in time that decodes from either an RFC3339 string or Unix seconds.
///
/// GitHub mixes both encodings across endpoints (`pushed_at` on a repository is sometimes an
/// integer). Encoding always produces RFC3339 in UTC, and equality compares instants, so
/// `"2013-02-27T19:35:32Z"` and `1361993732` decode to equal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, From)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// `None` when `secs` is out of chrono's range.
    pub fn from_unix(secs: i64) -> Option<Timestamp> {
        Utc.timestamp_opt(secs, 0).single().map(Timestamp)
    }

    pub fn parse_rfc3339(value: &str) -> Result<Timestamp, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(|time| Timestamp(time.with_timezone(&Utc)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl crate::Stringify for Timestamp {
    fn write_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp{{{}}}", self.0)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an RFC3339 timestamp string or Unix seconds")
    }

    fn visit_i64<E: de::Error>(self, secs: i64) -> Result<Timestamp, E> {
        Timestamp::from_unix(secs).ok_or_else(|| E::custom(format!("Unix timestamp {} out of range", secs)))
    }

    fn visit_u64<E: de::Error>(self, secs: u64) -> Result<Timestamp, E> {
        let secs = i64::try_from(secs).map_err(|_| E::custom(format!("Unix timestamp {} out of range", secs)))?;
        self.visit_i64(secs)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Timestamp, E> {
        Timestamp::parse_rfc3339(value).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_and_unix_decode_to_the_same_instant() {
        let from_string: Timestamp = serde_json::from_str(r#""2013-02-27T19:35:32Z""#).unwrap();
        let from_unix: Timestamp = serde_json::from_str("1361993732").unwrap();
        assert_eq!(from_string, from_unix);
    }

    #[test]
    fn offsets_normalise_to_utc() {
        let offset: Timestamp = serde_json::from_str(r#""2013-02-27T21:35:32+02:00""#).unwrap();
        let utc: Timestamp = serde_json::from_str(r#""2013-02-27T19:35:32Z""#).unwrap();
        assert_eq!(offset, utc);
        assert_eq!(serde_json::to_string(&offset).unwrap(), r#""2013-02-27T19:35:32Z""#);
    }

    #[test]
    fn reencoding_preserves_the_instant() {
        let decoded: Timestamp = serde_json::from_str(r#""2006-01-02T15:04:05.250-07:00""#).unwrap();
        let encoded = serde_json::to_string(&decoded).unwrap();
        let again: Timestamp = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, again);
    }

    #[test]
    fn unix_epoch_is_accepted() {
        let epoch: Timestamp = serde_json::from_str("0").unwrap();
        assert_eq!(serde_json::to_string(&epoch).unwrap(), r#""1970-01-01T00:00:00Z""#);
    }

    #[test]
    fn quoted_numbers_and_garbage_are_rejected() {
        assert!(serde_json::from_str::<Timestamp>(r#""1361993732""#).is_err());
        assert!(serde_json::from_str::<Timestamp>(r#""yesterday""#).is_err());
        assert!(serde_json::from_str::<Timestamp>("true").is_err());
    }
}
