#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use mastodon_unfollow::api::{Account, MastodonApi, Page, Status};
use mastodon_unfollow::common::errors::ApiError;

/// In-memory instance: paged following/followers, canned statuses, recorded calls
#[derive(Default)]
pub struct FakeApi {
    pub me: Option<Account>,
    pub following: Vec<Vec<Account>>,
    pub followers: Vec<Vec<Account>>,
    /// URLs that answer with a 500
    pub broken_pages: HashSet<String>,
    /// Newest-first statuses per account id; absent means no statuses
    pub statuses: HashMap<String, Vec<Status>>,
    pub broken_statuses: HashSet<String>,
    pub broken_unfollows: HashSet<String>,
    pub calls: RefCell<Vec<String>>,
}

pub fn account(id: &str, acct: &str) -> Account {
    Account::new(
        id,
        acct,
        &format!("Display {}", id),
        &format!("https://example.social/@{}", acct),
    )
}

pub fn status(created_at: &str) -> Status {
    Status {
        id: "s".to_string(),
        created_at: created_at.to_string(),
    }
}

impl FakeApi {
    pub fn new(me: Account) -> Self {
        Self {
            me: Some(me),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn error(url: &str) -> ApiError {
        ApiError::Status {
            url: url.to_string(),
            status: 500,
            body: "boom".to_string(),
        }
    }
}

impl MastodonApi for FakeApi {
    fn verify_credentials(&self) -> Result<Account, ApiError> {
        self.record("verify_credentials".to_string());
        self.me.clone().ok_or_else(|| ApiError::Status {
            url: "fake://verify_credentials".to_string(),
            status: 401,
            body: "The access token is invalid".to_string(),
        })
    }

    fn following_url(&self, account_id: &str) -> String {
        format!("fake://{}/following/0", account_id)
    }

    fn followers_url(&self, account_id: &str) -> String {
        format!("fake://{}/followers/0", account_id)
    }

    fn account_page(&self, url: &str) -> Result<Page<Account>, ApiError> {
        self.record(format!("page {}", url));
        if self.broken_pages.contains(url) {
            return Err(Self::error(url));
        }

        let (prefix, index) = url.rsplit_once('/').ok_or_else(|| Self::error(url))?;
        let index: usize = index.parse().map_err(|_| Self::error(url))?;
        let pages = if prefix.ends_with("/following") {
            &self.following
        } else {
            &self.followers
        };

        let items = pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < pages.len()).then(|| format!("{}/{}", prefix, index + 1));
        Ok(Page { items, next })
    }

    fn latest_statuses(&self, account_id: &str, limit: u32) -> Result<Vec<Status>, ApiError> {
        self.record(format!("statuses {}", account_id));
        if self.broken_statuses.contains(account_id) {
            return Err(Self::error(account_id));
        }
        let mut statuses = self.statuses.get(account_id).cloned().unwrap_or_default();
        statuses.truncate(limit as usize);
        Ok(statuses)
    }

    fn unfollow(&self, account_id: &str) -> Result<(), ApiError> {
        self.record(format!("unfollow {}", account_id));
        if self.broken_unfollows.contains(account_id) {
            return Err(Self::error(account_id));
        }
        Ok(())
    }
}
