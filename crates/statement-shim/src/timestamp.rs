//! Consensus transaction timestamps.
//!
//! The timestamp is set by the submitting client in the signed proposal
//! header and travels with the transaction, so every endorsing peer reads
//! the same value. Chaincode must use it instead of sampling a clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::StubError;

/// Nanoseconds in one second; the exclusive upper bound for `nanos`.
pub const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// A protobuf-style timestamp: seconds since the Unix epoch plus a
/// non-negative nanosecond offset.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TxTimestamp {
    /// Seconds since 1970-01-01T00:00:00Z. May be negative.
    pub seconds: i64,
    /// Nanoseconds within the second, `0..=999_999_999`.
    #[serde(default)]
    pub nanos: i32,
}

impl TxTimestamp {
    /// Create a timestamp from seconds and nanoseconds.
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Convert to a UTC instant without loss of precision.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::InvalidTimestamp`] if `nanos` is outside
    /// `0..=999_999_999` or the instant is beyond chrono's range.
    pub fn to_datetime(self) -> Result<DateTime<Utc>, StubError> {
        let invalid = || StubError::InvalidTimestamp {
            seconds: self.seconds,
            nanos: self.nanos,
        };

        let nanos = u32::try_from(self.nanos)
            .ok()
            .filter(|n| *n < NANOS_PER_SECOND)
            .ok_or_else(invalid)?;

        DateTime::from_timestamp(self.seconds, nanos).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_seconds_and_nanos() {
        let converted = TxTimestamp::new(1000, 42).to_datetime();
        assert!(converted.is_ok());
        if let Ok(t) = converted {
            assert_eq!(t.timestamp(), 1000);
            assert_eq!(t.timestamp_subsec_nanos(), 42);
        }
    }

    #[test]
    fn max_nanos_accepted() {
        let converted = TxTimestamp::new(0, 999_999_999).to_datetime();
        assert!(converted.is_ok());
    }

    #[test]
    fn negative_nanos_rejected() {
        let converted = TxTimestamp::new(1000, -1).to_datetime();
        assert_eq!(
            converted.err(),
            Some(StubError::InvalidTimestamp {
                seconds: 1000,
                nanos: -1
            })
        );
    }

    #[test]
    fn whole_second_of_nanos_rejected() {
        // chrono would read this as a leap second; the ledger never does.
        let converted = TxTimestamp::new(1000, 1_000_000_000).to_datetime();
        assert!(matches!(
            converted,
            Err(StubError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn out_of_range_seconds_rejected() {
        let converted = TxTimestamp::new(i64::MAX, 0).to_datetime();
        assert!(matches!(
            converted,
            Err(StubError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn nanos_default_to_zero_when_absent() {
        let parsed: Result<TxTimestamp, _> = serde_json::from_str(r#"{"seconds":7}"#);
        assert_eq!(parsed.ok(), Some(TxTimestamp::new(7, 0)));
    }
}
