//! Time utilities and constants for TokenSwap.

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};

/// Timing constants.
pub mod constants {
    use super::Duration;

    /// Settling delay before a recomputed swap quote is considered confirmed (1 second).
    pub fn settle_delay() -> Duration {
        Duration::milliseconds(1000)
    }

    /// Price feed request timeout (10 seconds).
    pub fn feed_request_timeout() -> Duration {
        Duration::seconds(10)
    }
}

/// A timestamp with timezone (always UTC).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse an RFC 3339 / ISO-8601 date-time with offset into UTC.
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Convert epoch milliseconds into a timestamp.
pub fn from_epoch_millis(millis: i64) -> Option<Timestamp> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Duration extensions for convenient construction.
pub trait DurationExt {
    fn as_std(&self) -> std::time::Duration;
}

impl DurationExt for Duration {
    fn as_std(&self) -> std::time::Duration {
        self.to_std().unwrap_or(std::time::Duration::ZERO)
    }
}

/// Serde adapter for feed dates.
///
/// Accepts either an ISO-8601 string or an integer of epoch milliseconds and
/// always writes ISO-8601 with millisecond precision.
pub mod feed_date {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{from_epoch_millis, parse_timestamp, SecondsFormat, Timestamp};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawDate::deserialize(deserializer)? {
            RawDate::Millis(ms) => from_epoch_millis(ms)
                .ok_or_else(|| de::Error::custom(format!("epoch millis out of range: {}", ms))),
            RawDate::Text(text) => parse_timestamp(&text)
                .ok_or_else(|| de::Error::custom(format!("invalid date: {}", text))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2023-08-29T07:10:40.000Z").unwrap();
        assert_eq!(ts.timestamp_millis(), 1_693_293_040_000);

        let offset = parse_timestamp("2023-08-29T09:10:40+02:00").unwrap();
        assert_eq!(offset, ts);

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_from_epoch_millis() {
        let ts = from_epoch_millis(1_693_293_040_000).unwrap();
        assert_eq!(ts, parse_timestamp("2023-08-29T07:10:40Z").unwrap());
    }

    #[test]
    fn test_settle_delay_as_std() {
        assert_eq!(constants::settle_delay().as_std(), std::time::Duration::from_secs(1));
        assert_eq!(Duration::seconds(-5).as_std(), std::time::Duration::ZERO);
    }
}
