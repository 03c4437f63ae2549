//! # mastodon-unfollow
//!
//! Finds accounts you follow on a Mastodon instance that don't follow you
//! back and haven't posted for a configurable number of months.
//!
//! - **Paginated traversal**: following/followers are walked via `Link` headers
//! - **Activity check**: one latest-status lookup per non-mutual account
//! - **Reports**: human, JSON or one-line output, plus CSV export
//! - **Bulk unfollow**: behind an explicit confirmation prompt
//!
//! The HTTP surface sits behind [`api::MastodonApi`], so the analysis and the
//! unfollow executor run unchanged against in-memory fakes.

pub mod api;
pub mod cli;
pub mod common;
pub mod export;
pub mod finder;
pub mod unfollow;
