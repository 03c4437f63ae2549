pub mod classifier;

pub use classifier::{classify, cutoff, parse_created_at, Activity};

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::HashSet;

use crate::api::{fetch_all, Account, MastodonApi};
use crate::common::config::RateLimits;
use crate::common::errors::ApiError;

/// Knobs for one analysis run
#[derive(Debug, Clone)]
pub struct FinderOptions {
    pub inactive_months: i64,
    pub rate_limits: RateLimits,
    pub show_progress: bool,
}

/// A non-mutual account classified as inactive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InactiveAccount {
    pub account: Account,
    /// `None` when the account has no statuses at all
    pub last_post_date: Option<DateTime<Utc>>,
}

/// Everything one run found out
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResults {
    /// Handle of the authenticated account
    pub username: String,
    pub total_following: usize,
    pub total_followers: usize,
    /// Accounts we follow that don't follow us, in following order
    pub not_following_back: Vec<Account>,
    pub inactive_unfollowers: Vec<InactiveAccount>,
    /// Non-mutual accounts whose status lookup failed
    pub skipped: Vec<Account>,
    pub inactive_months: i64,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResults {
    /// Inactive accounts, oldest post first; accounts without posts lead
    pub fn sorted_inactive(&self) -> Vec<&InactiveAccount> {
        let mut sorted: Vec<&InactiveAccount> = self.inactive_unfollowers.iter().collect();
        sort_oldest_first(&mut sorted);
        sorted
    }
}

/// Stable sort by last post date, missing dates first
pub fn sort_oldest_first(items: &mut [&InactiveAccount]) {
    items.sort_by_key(|item| item.last_post_date);
}

/// Accounts in `following` whose id is absent from `followers`, order preserved
pub fn not_following_back(following: &[Account], followers: &[Account]) -> Vec<Account> {
    let follower_ids: HashSet<&str> = followers.iter().map(|f| f.id.as_str()).collect();
    following
        .iter()
        .filter(|account| !follower_ids.contains(account.id.as_str()))
        .cloned()
        .collect()
}

/// Run the whole analysis against `api`.
///
/// Only resolving our own account is fatal. Pagination problems yield
/// shorter lists and failed status lookups land in `skipped`.
pub fn find_inactive_unfollowers<A: MastodonApi + ?Sized>(
    api: &A,
    options: &FinderOptions,
    now: DateTime<Utc>,
) -> Result<AnalysisResults, ApiError> {
    let me = api.verify_credentials()?;
    tracing::info!(id = %me.id, acct = %me.acct, "resolved own account");

    let spinner = make_spinner(options.show_progress, "Loading accounts you follow...");
    let following = fetch_all(
        api.following_url(&me.id),
        options.rate_limits.page_delay,
        |url| api.account_page(url),
    );
    finish_spinner(spinner, &format!("{} accounts you follow", following.len()));

    let spinner = make_spinner(options.show_progress, "Loading your followers...");
    let followers = fetch_all(
        api.followers_url(&me.id),
        options.rate_limits.page_delay,
        |url| api.account_page(url),
    );
    finish_spinner(spinner, &format!("{} followers", followers.len()));

    let candidates = not_following_back(&following, &followers);
    tracing::debug!(
        following = following.len(),
        followers = followers.len(),
        candidates = candidates.len(),
        "computed non-mutual follows"
    );

    let threshold = cutoff(now, options.inactive_months);
    let mut inactive_unfollowers = Vec::new();
    let mut skipped = Vec::new();

    let pb = make_progress(
        options.show_progress,
        candidates.len() as u64,
        "Checking last activity",
    );

    for account in &candidates {
        match api.latest_statuses(&account.id, 1) {
            Ok(statuses) => {
                let activity = classify(&statuses, threshold);
                tracing::debug!(acct = %account.acct, ?activity, "classified");
                if activity.is_inactive() {
                    inactive_unfollowers.push(InactiveAccount {
                        account: account.clone(),
                        last_post_date: activity.last_post(),
                    });
                }
            }
            Err(e) => {
                tracing::warn!("Skipping @{}: {}", account.acct, e);
                skipped.push(account.clone());
            }
        }

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
        if !options.rate_limits.status_delay.is_zero() {
            std::thread::sleep(options.rate_limits.status_delay);
        }
    }

    finish_progress(pb, "Analysis complete");

    Ok(AnalysisResults {
        username: me.acct,
        total_following: following.len(),
        total_followers: followers.len(),
        not_following_back: candidates,
        inactive_unfollowers,
        skipped,
        inactive_months: options.inactive_months,
        analyzed_at: now,
    })
}

// ── Progress helpers ──────────────────────────────────────────────────────────

fn make_spinner(show: bool, msg: &str) -> Option<ProgressBar> {
    if show {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        pb.set_message(msg.to_string());
        Some(pb)
    } else {
        None
    }
}

fn finish_spinner(pb: Option<ProgressBar>, msg: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(msg.to_string());
    }
}

fn make_progress(show: bool, total: u64, msg: &str) -> Option<ProgressBar> {
    if show {
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("━━░"));
        }
        pb.set_message(msg.to_string());
        Some(pb)
    } else {
        None
    }
}

fn finish_progress(pb: Option<ProgressBar>, msg: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(msg.to_string());
    }
}
