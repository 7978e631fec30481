//! Root certificate expiry policy

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

const MILLISECONDS_IN_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Non-fatal notice that the pinned root will not last much longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryAdvisory {
    pub days_remaining: i64,
    pub threshold_days: i64,
}

/// Outcome of a successful validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityAssessment {
    pub days_remaining: i64,
    pub advisory: Option<ExpiryAdvisory>,
}

/// Whole days between `now` and `not_after`, rounded to nearest.
///
/// Both instants are truncated to whole epoch milliseconds before they are
/// subtracted, and halves round upward (toward positive infinity), so `-0.5`
/// days becomes `0` and `2.5` becomes `3`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn days_until(not_after: SystemTime, now: SystemTime) -> i64 {
    let millis = epoch_millis(not_after) - epoch_millis(now);
    round_half_up(millis as f64 / MILLISECONDS_IN_DAY) as i64
}

/// Milliseconds since the Unix epoch, floored.
#[allow(clippy::cast_possible_wrap)]
fn epoch_millis(time: SystemTime) -> i128 {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => after.as_millis() as i128,
        Err(before) => {
            let before = before.duration();
            let whole = before.as_millis() as i128;
            if before.subsec_nanos() % 1_000_000 == 0 {
                -whole
            } else {
                -whole - 1
            }
        }
    }
}

fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Apply the expiry policy to a root expiring at `not_after`.
///
/// Negative day counts fail with `ExpiredCertificate`. Counts below
/// `warning_days` succeed with an advisory, which is also logged.
pub fn assess_validity(
    not_after: SystemTime,
    now: SystemTime,
    warning_days: i64,
) -> Result<ValidityAssessment> {
    let days_remaining = days_until(not_after, now);

    if days_remaining < 0 {
        return Err(Error::ExpiredCertificate {
            expired_on: utc_string(not_after),
            days_remaining,
        });
    }

    let advisory = (days_remaining < warning_days).then(|| {
        tracing::warn!(
            "The root certificate obtained would expire in {} days!",
            days_remaining
        );
        ExpiryAdvisory {
            days_remaining,
            threshold_days: warning_days,
        }
    });

    Ok(ValidityAssessment {
        days_remaining,
        advisory,
    })
}

/// `Tue, 01 Jan 2030 00:00:00 GMT`
fn utc_string(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
