//! Expiry codec: wrap a value with an advisory deadline.
//!
//! The encoded form is one opaque string, storable as an ordinary
//! value; the adapter has no awareness of it. Expiry is evaluated
//! lazily on decode; nothing ever sweeps expired entries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed expiry-encoded input.
///
/// Distinct from a legitimate expired result, which decodes to `None`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed expiry envelope: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A time source for expiry checks.
///
/// Injected so tests can pin the clock; production code uses
/// [`SystemClock`].
pub trait Clock: Send + Sync {
    /// Current time as Unix milliseconds.
    fn now_millis(&self) -> i64;
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_millis() as i64
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    value: String,
    expires_at: i64,
}

/// Serialize a value together with its absolute deadline (Unix ms)
/// into one storable string.
pub fn encode_expiry_value(value: &str, expires_at: i64) -> String {
    let envelope = Envelope {
        value: value.to_owned(),
        expires_at,
    };
    serde_json::to_string(&envelope).expect("envelope of strings serializes")
}

/// Decode an expiry-tagged value against the system clock.
///
/// Returns the original value while the deadline lies in the future,
/// `None` at or after it, and [`DecodeError`] for malformed input.
pub fn decode_expiry_value(encoded: &str) -> Result<Option<String>, DecodeError> {
    decode_expiry_value_at(encoded, &SystemClock)
}

/// Decode an expiry-tagged value against an injected clock.
///
/// Decoding never mutates anything: repeat decodes of the same string
/// before the deadline keep yielding the value.
pub fn decode_expiry_value_at(
    encoded: &str,
    clock: &dyn Clock,
) -> Result<Option<String>, DecodeError> {
    let envelope: Envelope = serde_json::from_str(encoded)?;
    if clock.now_millis() < envelope.expires_at {
        Ok(Some(envelope.value))
    } else {
        Ok(None)
    }
}
