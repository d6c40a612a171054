//! Errors returned by this crate

use thiserror::Error;

/// Convenience alias for results of this crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-2xx status.
    /// The message is shown verbatim to the user, e.g. `HTTP 500 – fail`
    #[error("HTTP {status}{}", http_body_suffix(.body))]
    Http { status: u16, body: String },

    /// The request could not be sent, or the response could not be read
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A string that cannot be turned into a calendar date
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A month index outside of 1..=12
    #[error("invalid month {0}: expected 1 to 12")]
    InvalidMonth(u32),

    /// A year the calendar cannot display
    #[error("invalid year {0}: expected 0 to 9999")]
    InvalidYear(i32),

    /// The task has no usable id (the backend sent something that is not a number)
    #[error("this task has no valid id")]
    InvalidTaskId,

    /// No loaded task has this id
    #[error("no task with id {0}")]
    TaskNotFound(crate::task::TaskId),

    /// A task or category name that is empty once trimmed
    #[error("a {0} name cannot be empty")]
    EmptyName(&'static str),

    /// A failure injected by a mocked backend
    #[error("{0}")]
    Mock(String),
}

fn http_body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" – {}", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message() {
        let with_body = Error::Http { status: 500, body: "fail".to_string() };
        assert_eq!(with_body.to_string(), "HTTP 500 – fail");

        let without_body = Error::Http { status: 404, body: String::new() };
        assert_eq!(without_body.to_string(), "HTTP 404");
    }

    #[test]
    fn task_not_found_message() {
        let err = Error::TaskNotFound(crate::task::TaskId::Valid(42));
        assert_eq!(err.to_string(), "no task with id 42");
    }
}
