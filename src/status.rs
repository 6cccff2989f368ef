//! Mapping from HTTP status codes to error kinds
//!
//! The client never hard-codes which status means what. Every unexpected status is
//! handed to a [`StatusPolicy`], and [`DefaultStatusPolicy`] is used unless the
//! builder is given another one.

use crate::error::Kind;
use reqwest::StatusCode;

/// Decides the error kind for an unexpected response status
pub trait StatusPolicy: Send + Sync {
    fn kind(&self, status: StatusCode) -> Kind;
}

impl<F> StatusPolicy for F
where
    F: Fn(StatusCode) -> Kind + Send + Sync,
{
    fn kind(&self, status: StatusCode) -> Kind {
        self(status)
    }
}

/// The status mapping used by the Cache service
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStatusPolicy;

impl StatusPolicy for DefaultStatusPolicy {
    fn kind(&self, status: StatusCode) -> Kind {
        match status {
            StatusCode::BAD_REQUEST => Kind::BadRequest,
            StatusCode::UNAUTHORIZED => Kind::Unauthorized,
            StatusCode::FORBIDDEN => Kind::Forbidden,
            StatusCode::NOT_FOUND => Kind::NotFound,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Kind::Timeout,
            StatusCode::CONFLICT => Kind::Exists,
            StatusCode::INTERNAL_SERVER_ERROR => Kind::Internal,
            StatusCode::SERVICE_UNAVAILABLE => Kind::ServiceUnavailable,
            _ => Kind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = DefaultStatusPolicy;
        let cases = [
            (400, Kind::BadRequest),
            (401, Kind::Unauthorized),
            (403, Kind::Forbidden),
            (404, Kind::NotFound),
            (408, Kind::Timeout),
            (409, Kind::Exists),
            (500, Kind::Internal),
            (503, Kind::ServiceUnavailable),
            (504, Kind::Timeout),
            (418, Kind::Unknown),
            (302, Kind::Unknown),
        ];
        for (code, expected) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(policy.kind(status), expected, "status {}", code);
        }
    }

    #[test]
    fn test_closure_policy() {
        let policy = |status: StatusCode| {
            if status.is_server_error() {
                Kind::ServiceUnavailable
            } else {
                Kind::BadRequest
            }
        };
        assert_eq!(policy.kind(StatusCode::BAD_GATEWAY), Kind::ServiceUnavailable);
        assert_eq!(policy.kind(StatusCode::GONE), Kind::BadRequest);
    }
}
