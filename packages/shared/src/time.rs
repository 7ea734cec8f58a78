//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, SecondsFormat, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in UTC.
///
/// Out-of-range timestamps fall back to the Unix epoch.
pub fn millis_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_fixed_time() {
        // テスト項目: FixedClock は常に固定の時刻を返す
        // given (前提条件):
        let clock = FixedClock::new(1_700_000_000_000);

        // when (操作):
        let first = clock.now_millis();
        let second = clock.now_millis();

        // then (期待する結果):
        assert_eq!(first, 1_700_000_000_000);
        assert_eq!(second, 1_700_000_000_000);
    }

    #[test]
    fn test_system_clock_is_close_to_now() {
        // テスト項目: SystemClock は現在時刻に近い値を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let before = now_millis();
        let value = clock.now_millis();
        let after = now_millis();

        // then (期待する結果):
        assert!(before <= value && value <= after);
    }

    #[test]
    fn test_millis_to_rfc3339() {
        // テスト項目: ミリ秒の Unix タイムスタンプを RFC 3339 に変換できる
        // given (前提条件):
        let timestamp = 1_700_000_000_123;

        // when (操作):
        let formatted = millis_to_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(formatted, "2023-11-14T22:13:20.123Z");
    }
}
