mod common;

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

use common::{account, status, FakeApi};
use mastodon_unfollow::common::config::RateLimits;
use mastodon_unfollow::finder::{find_inactive_unfollowers, FinderOptions};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn options(inactive_months: i64) -> FinderOptions {
    FinderOptions {
        inactive_months,
        rate_limits: RateLimits::none(),
        show_progress: false,
    }
}

/// 5 followed accounts over 3 pages, 3 followers over 2 pages
fn fixture() -> FakeApi {
    let mut api = FakeApi::new(account("me", "me"));
    api.following = vec![
        vec![account("1", "alice"), account("2", "bob@other.social")],
        vec![account("3", "carol"), account("4", "dave")],
        vec![account("5", "erin")],
    ];
    api.followers = vec![
        vec![account("1", "alice"), account("9", "zed")],
        vec![account("4", "dave")],
    ];
    api.statuses = HashMap::from([
        ("2".to_string(), vec![status("2019-05-01T10:00:00.000Z")]),
        ("5".to_string(), vec![status("2025-05-20T08:30:00Z")]),
    ]);
    api
}

fn ids<'a, I: IntoIterator<Item = &'a str>>(iter: I) -> Vec<&'a str> {
    iter.into_iter().collect()
}

#[test]
fn test_full_run() {
    let api = fixture();
    let results = find_inactive_unfollowers(&api, &options(36), now()).unwrap();

    assert_eq!(results.username, "me");
    assert_eq!(results.total_following, 5);
    assert_eq!(results.total_followers, 3);
    assert_eq!(
        ids(results.not_following_back.iter().map(|a| a.id.as_str())),
        vec!["2", "3", "5"]
    );
    assert_eq!(
        ids(results.inactive_unfollowers.iter().map(|i| i.account.id.as_str())),
        vec!["2", "3"]
    );
    assert!(results.skipped.is_empty());
    assert_eq!(results.inactive_months, 36);
    assert_eq!(results.analyzed_at, now());
}

#[test]
fn test_account_without_statuses_is_inactive() {
    let api = fixture();
    let results = find_inactive_unfollowers(&api, &options(36), now()).unwrap();

    let carol = results
        .inactive_unfollowers
        .iter()
        .find(|i| i.account.id == "3")
        .unwrap();
    assert_eq!(carol.last_post_date, None);
}

#[test]
fn test_sorted_inactive_puts_missing_dates_first() {
    let api = fixture();
    let results = find_inactive_unfollowers(&api, &options(36), now()).unwrap();

    let sorted = results.sorted_inactive();
    assert_eq!(ids(sorted.iter().map(|i| i.account.id.as_str())), vec!["3", "2"]);
    for pair in sorted.windows(2) {
        assert!(pair[0].last_post_date <= pair[1].last_post_date);
    }
}

#[test]
fn test_threshold_moves_accounts_in_and_out() {
    let api = fixture();
    // One month: erin's post from 12 days ago is still recent
    let results = find_inactive_unfollowers(&api, &options(1), now()).unwrap();
    assert_eq!(results.inactive_unfollowers.len(), 2);

    // 100 months reaches back past bob's 2019 post
    let results = find_inactive_unfollowers(&api, &options(100), now()).unwrap();
    assert_eq!(
        ids(results.inactive_unfollowers.iter().map(|i| i.account.id.as_str())),
        vec!["3"]
    );
}

#[test]
fn test_only_non_mutuals_are_looked_up() {
    let api = fixture();
    find_inactive_unfollowers(&api, &options(36), now()).unwrap();

    let lookups: Vec<String> = api
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("statuses "))
        .collect();
    assert_eq!(lookups, vec!["statuses 2", "statuses 3", "statuses 5"]);
}

#[test]
fn test_pagination_error_keeps_partial_list() {
    let mut api = fixture();
    api.broken_pages.insert("fake://me/following/1".to_string());

    let results = find_inactive_unfollowers(&api, &options(36), now()).unwrap();

    assert_eq!(results.total_following, 2);
    assert_eq!(
        ids(results.not_following_back.iter().map(|a| a.id.as_str())),
        vec!["2"]
    );
    assert!(!api.calls().contains(&"page fake://me/following/2".to_string()));
}

#[test]
fn test_failed_status_lookup_is_skipped() {
    let mut api = fixture();
    api.broken_statuses.insert("3".to_string());

    let results = find_inactive_unfollowers(&api, &options(36), now()).unwrap();

    assert_eq!(
        ids(results.inactive_unfollowers.iter().map(|i| i.account.id.as_str())),
        vec!["2"]
    );
    assert_eq!(ids(results.skipped.iter().map(|a| a.id.as_str())), vec!["3"]);
}

#[test]
fn test_unparsable_date_is_not_inactive() {
    let mut api = fixture();
    api.statuses.insert("2".to_string(), vec![status("last tuesday")]);

    let results = find_inactive_unfollowers(&api, &options(36), now()).unwrap();

    assert_eq!(
        ids(results.inactive_unfollowers.iter().map(|i| i.account.id.as_str())),
        vec!["3"]
    );
    assert!(results.skipped.is_empty());
}

#[test]
fn test_credentials_failure_is_fatal() {
    let mut api = fixture();
    api.me = None;

    let err = find_inactive_unfollowers(&api, &options(36), now()).unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(api.calls(), vec!["verify_credentials"]);
}

#[test]
fn test_everyone_follows_back() {
    let mut api = FakeApi::new(account("me", "me"));
    api.following = vec![vec![account("1", "a"), account("2", "b")]];
    api.followers = vec![vec![account("2", "b"), account("1", "a")]];

    let results = find_inactive_unfollowers(&api, &options(36), now()).unwrap();

    assert!(results.not_following_back.is_empty());
    assert!(results.inactive_unfollowers.is_empty());
}

#[test]
fn test_following_nobody() {
    let api = FakeApi::new(account("me", "me"));
    let results = find_inactive_unfollowers(&api, &options(36), now()).unwrap();

    assert_eq!(results.total_following, 0);
    assert!(results.inactive_unfollowers.is_empty());
}
