//! `Error` response for the [`HTTP tracker`](crate::servers::http).
//!
//! From the [BEP 03. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html):
//!
//! _"Tracker responses are bencoded dictionaries. If a tracker response has a
//! key failure reason, then that maps to a human readable string which explains
//! why the query failed, and no other keys are required."_
//!
//! > **NOTICE**: the official `BitTorrent` specification does not specify the
//! status code. The canary answers every failure with `400 Bad Request`.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use swarm_canary_contrib_bencode::{ben_bytes, ben_map};

/// `Error` response for the [`HTTP tracker`](crate::servers::http).
#[derive(Debug, PartialEq)]
pub struct Error {
    /// Human readable string which explains why the request failed.
    pub failure_reason: String,
}

impl Error {
    /// Returns the bencoded representation of the `Error` struct.
    ///
    /// ```rust
    /// use swarm_canary::servers::http::v1::responses::error::Error;
    ///
    /// let err = Error {
    ///    failure_reason: "error message".to_owned(),
    /// };
    ///
    /// // cspell:disable-next-line
    /// assert_eq!(err.write(), b"d14:failure reason13:error messagee");
    /// ```
    #[must_use]
    pub fn write(&self) -> Vec<u8> {
        (ben_map! {
            "failure reason" => ben_bytes!(self.failure_reason.as_str())
        })
        .encode()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.write()).into_response()
    }
}

#[cfg(test)]
mod tests {

    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::Error;

    #[test]
    fn http_tracker_errors_can_be_bencoded() {
        let err = Error {
            failure_reason: "error message".to_owned(),
        };

        assert_eq!(err.write(), b"d14:failure reason13:error messagee"); // cspell:disable-line
    }

    #[test]
    fn http_tracker_errors_should_be_bad_requests() {
        let err = Error {
            failure_reason: "error message".to_owned(),
        };

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
