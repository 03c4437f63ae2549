use chrono::{DateTime, Utc};
use colored::*;

/// Append `@instance` to local handles so every handle is globally unique
pub fn qualify_acct(acct: &str, instance: &str) -> String {
    if acct.contains('@') {
        acct.to_string()
    } else {
        format!("{}@{}", acct, instance)
    }
}

/// Share of `part` in `total` as a percentage, 0.0 when `total` is zero
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Format a percentage with one decimal, e.g. `42.5%`
pub fn format_percent(part: usize, total: usize) -> String {
    format!("{:.1}%", percent(part, total))
}

/// Whole days between `then` and `now`, never negative
pub fn days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days().max(0)
}

/// Format a day count as "2 years, 3 months" (365-day years, 30-day months)
pub fn format_elapsed(days: i64) -> String {
    let years = days / 365;
    let months = (days % 365) / 30;

    let mut parts = Vec::new();
    if years > 0 {
        parts.push(format!("{} year{}", years, if years > 1 { "s" } else { "" }));
    }
    if months > 0 {
        parts.push(format!("{} month{}", months, if months > 1 { "s" } else { "" }));
    }

    if parts.is_empty() {
        "less than a month".to_string()
    } else {
        parts.join(", ")
    }
}

/// Calendar date as `YYYY-MM-DD`
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Colorize a count: red when anything was found, green otherwise
pub fn format_count_colored(count: usize) -> ColoredString {
    if count > 0 {
        count.to_string().red().bold()
    } else {
        count.to_string().green()
    }
}

/// Truncate a string to max length (in characters) with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
