use thiserror::Error;

/// Failures while fetching the club leaderboard. Any of these aborts the
/// run before the totals store has been touched.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("leaderboard request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed leaderboard payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Failures while posting to the chat webhook. Logged by the pipeline but
/// never retried; the totals store is saved regardless.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("webhook post failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook rejected the post: HTTP {0}")]
    Rejected(reqwest::StatusCode),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access totals file: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt totals file: {0}")]
    Corrupt(#[from] serde_json::Error),
}
