use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeetupError>;

/// Errors returned by [`MeetupClient`](crate::MeetupClient).
#[derive(Debug, Error)]
pub enum MeetupError {
    /// Network, timeout, or response-decoding failure.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("meetup api error {status}: {body}")]
    Api { status: u16, body: String },
}
