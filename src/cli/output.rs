use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;

use crate::api::Account;
use crate::common::format::{
    days_between, format_count_colored, format_date, format_elapsed, format_percent, qualify_acct,
};
use crate::export::ExportOutcome;
use crate::finder::{AnalysisResults, InactiveAccount};
use crate::unfollow::UnfollowReport;

/// Print the startup banner
pub fn print_banner() {
    println!();
    println!("{}", "═".repeat(80).dimmed());
    println!("  {}  {}", "👻", "mastodon-unfollow".bold());
    println!("     Find inactive accounts that don't follow you back");
    println!("{}", "═".repeat(80).dimmed());
    println!();
}

/// Print analysis results in human-readable format
pub fn print_results(results: &AnalysisResults, instance: &str) {
    let inactive = results.sorted_inactive();

    println!();
    println!("  {} Your account: {}", "👤", format!("@{}", results.username).cyan());
    println!();

    if inactive.is_empty() {
        println!(
            "  {} No inactive accounts found that don't follow you back!",
            "✨"
        );
    } else {
        println!("{}", "─".repeat(80).dimmed());
        println!(
            "  {} {}",
            "👻",
            "Inactive accounts that don't follow you back".bold()
        );
        println!();

        for item in &inactive {
            print_inactive_account(item, instance, results.analyzed_at);
        }
        println!("{}", "─".repeat(80).dimmed());
    }

    if !results.skipped.is_empty() {
        println!();
        let entries: Vec<(String, Option<&str>)> = results
            .skipped
            .iter()
            .map(|account| (qualify_acct(&account.acct, instance), None))
            .collect();
        let title = format!("{} account(s) could not be checked:", results.skipped.len());
        for line in warning_lines(&title, &entries) {
            println!("{}", line);
        }
    }

    print_summary(results);
}

/// Print one inactive account as a small tree
fn print_inactive_account(item: &InactiveAccount, instance: &str, now: DateTime<Utc>) {
    let account = &item.account;
    println!("  {}", format!("@{}", qualify_acct(&account.acct, instance)).bold());
    println!("  {} Name: {}", "├─".dimmed(), display_name(account));
    println!("  {} Last post: {}", "├─".dimmed(), describe_last_post(item, now));
    println!("  {} Follows you: {}", "├─".dimmed(), "✗ No".red());
    println!("  {} Profile: {}", "└─".dimmed(), account.url.cyan());
    println!();
}

fn print_summary(results: &AnalysisResults) {
    let following = results.total_following;

    println!();
    println!("  {} Summary", "📊");
    println!("     You follow:            {} accounts", following);
    println!(
        "     Follow you back:       {} ({})",
        results.total_followers,
        format_percent(results.total_followers, following)
    );
    println!(
        "     Don't follow you back: {} ({})",
        results.not_following_back.len(),
        format_percent(results.not_following_back.len(), following)
    );
    println!(
        "     └─ inactive >{} months: {} ({})",
        results.inactive_months,
        format_count_colored(results.inactive_unfollowers.len()),
        format_percent(results.inactive_unfollowers.len(), following)
    );
    println!();
}

/// Display name, or `N/A` when the account has none
pub fn display_name(account: &Account) -> &str {
    if account.display_name.trim().is_empty() {
        "N/A"
    } else {
        &account.display_name
    }
}

/// `2021-03-04 (3 years, 2 months ago)` or the no-posts marker
pub fn describe_last_post(item: &InactiveAccount, now: DateTime<Utc>) -> String {
    match item.last_post_date {
        Some(date) => format!(
            "{} ({} ago)",
            format_date(date),
            format_elapsed(days_between(date, now))
        ),
        None => "unknown (account has no posts)".to_string(),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    username: &'a str,
    instance: &'a str,
    analyzed_at: DateTime<Utc>,
    inactive_months: i64,
    total_following: usize,
    total_followers: usize,
    not_following_back: usize,
    inactive_unfollowers: Vec<JsonInactive<'a>>,
    skipped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unfollow: Option<&'a UnfollowReport>,
}

#[derive(Serialize)]
struct JsonInactive<'a> {
    id: &'a str,
    acct: String,
    display_name: &'a str,
    url: &'a str,
    last_post_date: Option<DateTime<Utc>>,
    days_inactive: Option<i64>,
}

/// Render analysis results, plus the unfollow outcome if one ran, as one JSON document
pub fn render_json(
    results: &AnalysisResults,
    instance: &str,
    unfollow: Option<&UnfollowReport>,
) -> serde_json::Result<String> {
    let report = JsonReport {
        username: &results.username,
        instance,
        analyzed_at: results.analyzed_at,
        inactive_months: results.inactive_months,
        total_following: results.total_following,
        total_followers: results.total_followers,
        not_following_back: results.not_following_back.len(),
        inactive_unfollowers: results
            .sorted_inactive()
            .into_iter()
            .map(|item| JsonInactive {
                id: &item.account.id,
                acct: qualify_acct(&item.account.acct, instance),
                display_name: &item.account.display_name,
                url: &item.account.url,
                last_post_date: item.last_post_date,
                days_inactive: item
                    .last_post_date
                    .map(|date| days_between(date, results.analyzed_at)),
            })
            .collect(),
        skipped: results
            .skipped
            .iter()
            .map(|a| qualify_acct(&a.acct, instance))
            .collect(),
        unfollow,
    };
    serde_json::to_string_pretty(&report)
}

/// Print analysis results as JSON
pub fn print_json(
    results: &AnalysisResults,
    instance: &str,
    unfollow: Option<&UnfollowReport>,
) -> anyhow::Result<()> {
    println!("{}", render_json(results, instance, unfollow)?);
    Ok(())
}

/// Print a minimal one-line summary
pub fn print_quiet(results: &AnalysisResults) {
    println!(
        "{}  {}  {}  {}",
        results.total_following,
        results.total_followers,
        results.not_following_back.len(),
        results.inactive_unfollowers.len()
    );
}

/// Report what the CSV export did
pub fn print_export_outcome(outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Written { path, rows } => println!(
            "  {} Exported {} account(s) to: {}",
            "💾",
            rows,
            path.display().to_string().cyan()
        ),
        ExportOutcome::Empty => println!("  {} Nothing to export", "ℹ️"),
    }
    println!();
}

/// Print the result of a bulk unfollow
pub fn print_unfollow_report(report: &UnfollowReport) {
    if report.cancelled {
        println!("  {} Cancelled", "✗".red());
        return;
    }
    if report.attempted == 0 {
        println!("  {} No accounts to unfollow", "ℹ️");
        return;
    }

    println!();
    println!(
        "  {} {}/{} accounts unfollowed",
        "✨",
        report.succeeded.len().to_string().green().bold(),
        report.attempted
    );

    if !report.failed.is_empty() {
        let entries: Vec<(String, Option<&str>)> = report
            .failed
            .iter()
            .map(|failure| (failure.acct.clone(), Some(failure.error.as_str())))
            .collect();
        let title = format!("{} failed:", report.failed.len());
        for line in warning_lines(&title, &entries) {
            println!("{}", line);
        }
    }
    println!();
}

/// A yellow warning title followed by one `→ @acct[: detail]` line per entry
fn warning_lines(title: &str, entries: &[(String, Option<&str>)]) -> Vec<String> {
    let mut lines = vec![format!("  {} {}", "⚠".yellow(), title.yellow())];
    for (acct, detail) in entries {
        let handle = format!("@{}", acct);
        lines.push(match detail {
            Some(detail) => format!("    {} {}: {}", "→".dimmed(), handle.dimmed(), detail.dimmed()),
            None => format!("    {} {}", "→".dimmed(), handle.dimmed()),
        });
    }
    lines
}
