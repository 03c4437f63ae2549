pub mod client;
pub mod models;
pub mod pagination;

pub use client::Client;
pub use models::{Account, Status};
pub use pagination::{fetch_all, next_link, Page};

use crate::common::errors::ApiError;

/// The handful of Mastodon endpoints the finder and the unfollow executor need.
///
/// [`Client`] talks to a real instance; tests plug in in-memory fakes.
pub trait MastodonApi {
    /// `GET accounts/verify_credentials`
    fn verify_credentials(&self) -> Result<Account, ApiError>;

    /// URL of the first page of `accounts/{id}/following`
    fn following_url(&self, account_id: &str) -> String;

    /// URL of the first page of `accounts/{id}/followers`
    fn followers_url(&self, account_id: &str) -> String;

    /// Fetch one page of accounts from a following/followers URL
    fn account_page(&self, url: &str) -> Result<Page<Account>, ApiError>;

    /// `GET accounts/{id}/statuses`, newest first, replies and reblogs included
    fn latest_statuses(&self, account_id: &str, limit: u32) -> Result<Vec<Status>, ApiError>;

    /// `POST accounts/{id}/unfollow`
    fn unfollow(&self, account_id: &str) -> Result<(), ApiError>;
}
