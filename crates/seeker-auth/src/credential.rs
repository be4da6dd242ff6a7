//! Credential values and time.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time, in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to. For tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn advance_ms(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn set_ms(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// An opaque bearer token with an absolute expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at_ms: i64,
}

impl Credential {
    pub fn new(token: impl Into<String>, expires_at_ms: i64) -> Self {
        Self {
            token: token.into(),
            expires_at_ms,
        }
    }

    /// Rebuild a credential from its persisted string form.
    ///
    /// Returns `None` for a blank token or an expiry that is not an integer.
    pub fn from_stored(token: &str, expiry: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let expires_at_ms = expiry.trim().parse::<i64>().ok()?;
        Some(Self::new(token, expires_at_ms))
    }

    /// The raw token value.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Expiry in epoch milliseconds.
    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at_ms
    }

    /// Usable strictly before its expiry instant.
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms
    }

    /// Expiry details relative to `now_ms`.
    pub fn info_at(&self, now_ms: i64) -> TokenInfo {
        let remaining = self.expires_at_ms.saturating_sub(now_ms).max(0);
        TokenInfo {
            expires_at_ms: self.expires_at_ms,
            expires_in_secs: (remaining / 1000) as u64,
            is_expired: !self.is_valid_at(now_ms),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at_ms", &self.expires_at_ms)
            .finish()
    }
}

/// Information about the stored credential for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub expires_at_ms: i64,
    pub expires_in_secs: u64,
    pub is_expired: bool,
}

impl TokenInfo {
    pub fn expires_in_display(&self) -> String {
        if self.is_expired {
            "Expired (will prompt on next use)".to_string()
        } else {
            let hours = self.expires_in_secs / 3600;
            let minutes = (self.expires_in_secs % 3600) / 60;
            format!("{}h {}m", hours, minutes)
        }
    }

    /// Expiry as an RFC 3339 timestamp, if representable.
    pub fn expires_at_display(&self) -> Option<String> {
        chrono::DateTime::from_timestamp_millis(self.expires_at_ms).map(|t| t.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_is_strictly_before_expiry() {
        let cred = Credential::new("t", 1_000);
        assert!(cred.is_valid_at(999));
        assert!(!cred.is_valid_at(1_000));
        assert!(!cred.is_valid_at(5_000));
    }

    #[test]
    fn test_from_stored() {
        let cred = Credential::from_stored(" abc ", "1700000000000").unwrap();
        assert_eq!(cred.token(), "abc");
        assert_eq!(cred.expires_at_ms(), 1_700_000_000_000);

        assert!(Credential::from_stored("   ", "1").is_none());
        assert!(Credential::from_stored("abc", "tomorrow").is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let cred = Credential::new("super-secret", 42);
        let debug = format!("{:?}", cred);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("42"));
    }

    #[test]
    fn test_token_info_display() {
        let cred = Credential::new("t", 7_200_000);
        let info = cred.info_at(0);
        assert!(!info.is_expired);
        assert_eq!(info.expires_in_display(), "2h 0m");

        let expired = cred.info_at(7_200_001);
        assert!(expired.is_expired);
        assert_eq!(expired.expires_in_secs, 0);
        assert!(expired.expires_in_display().contains("Expired"));
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(10);
        clock.advance_ms(5);
        assert_eq!(clock.now_ms(), 15);
        clock.set_ms(1);
        assert_eq!(clock.now_ms(), 1);
    }

    #[test]
    fn test_expires_at_display() {
        let info = Credential::new("t", 0).info_at(0);
        assert_eq!(
            info.expires_at_display().as_deref(),
            Some("1970-01-01T00:00:00+00:00")
        );
    }
}
