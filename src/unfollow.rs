use colored::*;
use serde::Serialize;
use std::io;
use std::time::Duration;

use crate::api::MastodonApi;
use crate::cli::prompt::Prompt;
use crate::common::format::qualify_acct;
use crate::finder::InactiveAccount;

/// One account that could not be unfollowed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnfollowFailure {
    pub acct: String,
    pub error: String,
}

/// Result of a bulk unfollow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnfollowReport {
    pub attempted: usize,
    /// Qualified handles that were unfollowed
    pub succeeded: Vec<String>,
    pub failed: Vec<UnfollowFailure>,
    /// The user declined the confirmation prompt
    pub cancelled: bool,
}

/// Knobs for the unfollow executor
#[derive(Debug, Clone)]
pub struct UnfollowOptions {
    pub instance: String,
    pub delay: Duration,
    /// Print a line per account as it is processed
    pub show_progress: bool,
}

/// Ask once, then unfollow every account in `accounts`.
///
/// Failures are collected per account and never abort the batch. An empty
/// list returns immediately without prompting.
pub fn unfollow_accounts<A, P>(
    api: &A,
    prompt: &mut P,
    accounts: &[&InactiveAccount],
    options: &UnfollowOptions,
) -> io::Result<UnfollowReport>
where
    A: MastodonApi + ?Sized,
    P: Prompt + ?Sized,
{
    let mut report = UnfollowReport::default();
    if accounts.is_empty() {
        return Ok(report);
    }

    let question = format!(
        "\n  {} You are about to unfollow {} accounts!\n  Continue? [y/N] ",
        "⚠".yellow(),
        accounts.len()
    );
    if !prompt.confirm(&question)? {
        tracing::info!("unfollow cancelled by user");
        report.cancelled = true;
        return Ok(report);
    }

    if options.show_progress {
        println!();
        println!("  {} Unfollowing accounts...", "🔄");
        println!();
    }

    for item in accounts {
        let acct = qualify_acct(&item.account.acct, &options.instance);
        report.attempted += 1;

        match api.unfollow(&item.account.id) {
            Ok(()) => {
                if options.show_progress {
                    println!("    {} @{}", "✓".green(), acct);
                }
                tracing::debug!(acct = %acct, "unfollowed");
                report.succeeded.push(acct);
                if !options.delay.is_zero() {
                    std::thread::sleep(options.delay);
                }
            }
            Err(e) => {
                if options.show_progress {
                    println!("    {} @{}: {}", "✗".red(), acct, e);
                }
                tracing::warn!("Failed to unfollow @{}: {}", acct, e);
                report.failed.push(UnfollowFailure {
                    acct,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}
