//! Pure Meetup REST API client.
//!
//! A minimal client for the legacy Meetup API. Supports group lookup and
//! retrieving a group's complete member roster across paginated responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use meetup_client::MeetupClient;
//!
//! let client = MeetupClient::new("your-api-key".into());
//!
//! let group_id = client.group_id("rust-twin-cities").await?;
//! let members = client.all_members(group_id).await?;
//! println!("{} members", members.len());
//! ```

pub mod error;
pub mod types;

pub use error::{MeetupError, Result};
pub use types::{Group, Member, MemberId, MembersPage, PageMeta, RateLimit};

const BASE_URL: &str = "https://api.meetup.com";

pub struct MeetupClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MeetupClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.into())
    }

    /// Client pointed at an alternate host, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Resolve a group urlname to its numeric id.
    pub async fn group_id(&self, urlname: &str) -> Result<i64> {
        let url = format!("{}/{}", self.base_url, urlname);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let headers = resp.headers().clone();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), ?headers, "group lookup failed");
            return Err(MeetupError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let group: Group = resp.json().await?;
        Ok(group.id)
    }

    /// Fetch the first page of the members listing, newest joiners first.
    pub async fn members_first_page(&self, group_id: i64) -> Result<MembersPage> {
        let url = format!("{}/2/members", self.base_url);
        let request = self.client.get(&url).query(&[
            ("group_id", group_id.to_string()),
            ("key", self.api_key.clone()),
            ("order", "joined".to_string()),
            ("desc", "true".to_string()),
        ]);
        self.fetch_page(request).await
    }

    /// Fetch a continuation page via the server-supplied absolute URL.
    pub async fn members_next_page(&self, next_url: &str) -> Result<MembersPage> {
        self.fetch_page(self.client.get(next_url)).await
    }

    /// Retrieve the complete member roster for a group.
    ///
    /// Pages are appended in server order. The sweep continues while fewer
    /// members than `total_count` have accumulated and the next-cursor is
    /// non-empty; if the cursor exhausts early the partial accumulation is
    /// returned rather than looping. Any non-2xx page aborts the whole sweep.
    pub async fn all_members(&self, group_id: i64) -> Result<Vec<Member>> {
        let first = self.members_first_page(group_id).await?;
        let total = first.meta.total_count;
        let mut next = first.meta.next;
        let mut members = first.results;
        tracing::debug!(retrieved = members.len(), total, "retrieved member page");

        while members.len() < total && !next.is_empty() {
            let page = self.members_next_page(&next).await?;
            members.extend(page.results);
            next = page.meta.next;
            tracing::debug!(retrieved = members.len(), total, "retrieved member page");
        }

        tracing::info!(count = members.len(), total, "member sweep complete");
        Ok(members)
    }

    async fn fetch_page(&self, request: reqwest::RequestBuilder) -> Result<MembersPage> {
        let resp = request.send().await?;

        let rate = RateLimit::from_headers(resp.headers());
        tracing::debug!(
            remaining = ?rate.remaining,
            limit = ?rate.limit,
            reset_secs = ?rate.reset_secs,
            "rate limit headroom"
        );

        let status = resp.status();
        if !status.is_success() {
            let headers = resp.headers().clone();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), ?headers, "member page request failed");
            return Err(MeetupError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let page: MembersPage = resp.json().await?;
        Ok(page)
    }
}
