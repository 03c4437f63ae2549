use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::api::Status;

/// Days per month in the inactivity threshold
pub const DAYS_PER_MONTH: i64 = 30;

/// What the latest-status lookup tells us about an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// The account has never posted (or everything is hidden from us)
    NoPosts,
    /// Newest status is older than the cutoff
    InactiveSince(DateTime<Utc>),
    /// Newest status is at or after the cutoff
    ActiveSince(DateTime<Utc>),
    /// A status exists but its timestamp could not be read
    Unknown,
}

impl Activity {
    pub fn is_inactive(&self) -> bool {
        matches!(self, Activity::NoPosts | Activity::InactiveSince(_))
    }

    /// Date of the latest post, for the accounts that have one we could read
    pub fn last_post(&self) -> Option<DateTime<Utc>> {
        match self {
            Activity::InactiveSince(date) | Activity::ActiveSince(date) => Some(*date),
            Activity::NoPosts | Activity::Unknown => None,
        }
    }
}

/// `now - months * 30 days`, clamped to the earliest representable instant
pub fn cutoff(now: DateTime<Utc>, inactive_months: i64) -> DateTime<Utc> {
    inactive_months
        .checked_mul(DAYS_PER_MONTH)
        .and_then(Duration::try_days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Parse a status timestamp.
///
/// Accepts RFC 3339 with any offset, naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// (taken as UTC) and bare dates (midnight UTC).
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// Classify an account from its newest-first statuses
pub fn classify(statuses: &[Status], cutoff: DateTime<Utc>) -> Activity {
    let Some(latest) = statuses.first() else {
        return Activity::NoPosts;
    };

    match parse_created_at(&latest.created_at) {
        Some(date) if date < cutoff => Activity::InactiveSince(date),
        Some(date) => Activity::ActiveSince(date),
        None => {
            tracing::debug!(created_at = %latest.created_at, "unparsable status date");
            Activity::Unknown
        }
    }
}
