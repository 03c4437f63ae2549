use serde::de::DeserializeOwned;
use url::Url;

use super::models::{Account, Status};
use super::pagination::{next_link, Page};
use super::MastodonApi;
use crate::common::config::{Session, Settings};
use crate::common::errors::ApiError;

pub const USER_AGENT: &str = concat!("mastodon-unfollow/", env!("CARGO_PKG_VERSION"));

/// Blocking client for one instance, authenticated with a bearer token
pub struct Client {
    agent: ureq::Agent,
    base: Url,
    bearer: String,
    page_limit: u32,
}

impl Client {
    pub fn new(session: &Session, settings: &Settings) -> Result<Self, ApiError> {
        let agent = ureq::AgentBuilder::new()
            .timeout(settings.request_timeout())
            .user_agent(USER_AGENT)
            .build();

        Ok(Self {
            agent,
            base: session.api_base()?,
            bearer: session.bearer(),
            page_limit: settings.page_limit,
        })
    }

    /// `https://{instance}/api/v1/{segments...}`, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn first_page_url(&self, account_id: &str, collection: &str) -> String {
        let mut url = self.endpoint(&["accounts", account_id, collection]);
        url.query_pairs_mut()
            .append_pair("limit", &self.page_limit.to_string());
        url.into()
    }

    /// Pagination links are used verbatim, but only toward the instance itself
    fn check_same_origin(&self, url: &str) -> Result<(), ApiError> {
        let foreign = || ApiError::ForeignLink {
            url: url.to_string(),
        };
        let target = Url::parse(url).map_err(|_| foreign())?;

        let same = target.scheme() == self.base.scheme()
            && target.host_str() == self.base.host_str()
            && target.port_or_known_default() == self.base.port_or_known_default();
        if same {
            Ok(())
        } else {
            Err(foreign())
        }
    }

    fn get(&self, url: &str) -> Result<ureq::Response, ApiError> {
        tracing::debug!(url, "GET");
        self.agent
            .get(url)
            .set("Authorization", &self.bearer)
            .call()
            .map_err(|e| ApiError::from_ureq(url, e))
    }

    fn decode<T: DeserializeOwned>(url: &str, response: ureq::Response) -> Result<T, ApiError> {
        response.into_json().map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl MastodonApi for Client {
    fn verify_credentials(&self) -> Result<Account, ApiError> {
        let url = self.endpoint(&["accounts", "verify_credentials"]);
        let response = self.get(url.as_str())?;
        Self::decode(url.as_str(), response)
    }

    fn following_url(&self, account_id: &str) -> String {
        self.first_page_url(account_id, "following")
    }

    fn followers_url(&self, account_id: &str) -> String {
        self.first_page_url(account_id, "followers")
    }

    fn account_page(&self, url: &str) -> Result<Page<Account>, ApiError> {
        self.check_same_origin(url)?;
        let response = self.get(url)?;
        let next = response.header("Link").and_then(next_link);
        let items = Self::decode(url, response)?;
        Ok(Page { items, next })
    }

    fn latest_statuses(&self, account_id: &str, limit: u32) -> Result<Vec<Status>, ApiError> {
        let mut url = self.endpoint(&["accounts", account_id, "statuses"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("exclude_replies", "false")
            .append_pair("exclude_reblogs", "false");

        let response = self.get(url.as_str())?;
        Self::decode(url.as_str(), response)
    }

    fn unfollow(&self, account_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["accounts", account_id, "unfollow"]);
        tracing::debug!(url = url.as_str(), "POST");
        self.agent
            .post(url.as_str())
            .set("Authorization", &self.bearer)
            .call()
            .map(|_| ())
            .map_err(|e| ApiError::from_ureq(url.as_str(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        let session = Session::new("mastodon.social", "secret").unwrap();
        Client::new(&session, &Settings::default()).unwrap()
    }

    #[test]
    fn test_first_page_urls() {
        let client = client();
        assert_eq!(
            client.following_url("109"),
            "https://mastodon.social/api/v1/accounts/109/following?limit=80"
        );
        assert_eq!(
            client.followers_url("109"),
            "https://mastodon.social/api/v1/accounts/109/followers?limit=80"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = client();
        assert_eq!(
            client.endpoint(&["accounts", "a/b", "unfollow"]).as_str(),
            "https://mastodon.social/api/v1/accounts/a%2Fb/unfollow"
        );
    }

    #[test]
    fn test_same_origin_links_pass() {
        let client = client();
        assert!(client
            .check_same_origin("https://mastodon.social/api/v1/accounts/1/following?max_id=5")
            .is_ok());
        assert!(client
            .check_same_origin("https://mastodon.social:443/api/v1/accounts/1/followers")
            .is_ok());
    }

    #[test]
    fn test_foreign_links_are_refused() {
        let client = client();
        for url in [
            "https://evil.example/api/v1/accounts/1/following?max_id=5",
            "http://mastodon.social/api/v1/accounts/1/following",
            "https://mastodon.social:8443/api/v1/accounts/1/following",
            "/api/v1/accounts/1/following",
        ] {
            assert!(
                matches!(client.check_same_origin(url), Err(ApiError::ForeignLink { .. })),
                "{} should be refused",
                url
            );
        }
    }

    #[test]
    fn test_account_page_refuses_foreign_host_before_sending() {
        // Fails without any network traffic: the check runs before the request
        let err = client()
            .account_page("https://evil.example/api/v1/accounts/1/following")
            .unwrap_err();
        assert!(err.to_string().contains("evil.example"));
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("mastodon-unfollow/"));
    }
}
