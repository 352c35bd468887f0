//! Newtypes for scalars that have no direct Rust primitive.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Absolute point in time, in milliseconds since the Unix epoch.
///
/// # Example
///
/// ```
/// use amqp_types::Timestamp;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let ts = Timestamp::from(UNIX_EPOCH + Duration::from_millis(1500));
/// assert_eq!(ts.as_millis(), 1500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from milliseconds since the epoch.
    #[inline]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the epoch (negative before 1970).
    #[inline]
    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }

    /// Convert back to a `SystemTime`.
    pub fn to_system_time(&self) -> SystemTime {
        let magnitude = Duration::from_millis(self.0.unsigned_abs());
        if self.0 >= 0 {
            UNIX_EPOCH + magnitude
        } else {
            UNIX_EPOCH - magnitude
        }
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        // Saturate instead of wrapping for times beyond ±292 million years.
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self(i64::try_from(after.as_millis()).unwrap_or(i64::MAX)),
            Err(before) => {
                let millis = i64::try_from(before.duration().as_millis()).unwrap_or(i64::MAX);
                Self(-millis)
            }
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Symbolic identifier, carried as UTF-8 on the wire.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The symbol text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the symbol, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
