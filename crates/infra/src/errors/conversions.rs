//! Conversions from external infrastructure errors into domain errors.

use leavesync_domain::LeaveSyncError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub LeaveSyncError);

impl From<InfraError> for LeaveSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<LeaveSyncError> for InfraError {
    fn from(value: LeaveSyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoLeaveSyncError {
    fn into_leavesync(self) -> LeaveSyncError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → LeaveSyncError */
/* -------------------------------------------------------------------------- */

impl IntoLeaveSyncError for HttpError {
    fn into_leavesync(self) -> LeaveSyncError {
        if self.is_timeout() {
            return LeaveSyncError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return LeaveSyncError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return LeaveSyncError::InvalidInput(format!("invalid response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message = status.canonical_reason().unwrap_or("unknown status").to_string();

            return match code {
                401 | 403 => LeaveSyncError::Auth(format!("HTTP {code} {message}")),
                404 => LeaveSyncError::NotFound(format!("HTTP {code} {message}")),
                _ => LeaveSyncError::Upstream { status: code, message },
            };
        }

        LeaveSyncError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_leavesync())
    }
}

/// Map a non-success HTTP answer to a domain error, keeping the body excerpt.
pub fn status_error(status: reqwest::StatusCode, body: &str) -> LeaveSyncError {
    let code = status.as_u16();
    let detail = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        body.trim().chars().take(512).collect()
    };

    match code {
        401 | 403 => LeaveSyncError::Auth(format!("HTTP {code}: {detail}")),
        404 => LeaveSyncError::NotFound(format!("HTTP {code}: {detail}")),
        _ => LeaveSyncError::Upstream { status: code, message: detail },
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn status_failure(status: StatusCode) -> LeaveSyncError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();
        InfraError::from(error).into()
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        match status_failure(StatusCode::UNAUTHORIZED).await {
            LeaveSyncError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_status_409_keeps_status_code() {
        let mapped = status_failure(StatusCode::CONFLICT).await;
        assert_eq!(mapped.status_code(), Some(409));
    }

    #[test]
    fn status_error_prefers_body_text() {
        let err = status_error(StatusCode::BAD_REQUEST, "  {\"error\":\"bad range\"} ");
        assert_eq!(
            err,
            LeaveSyncError::Upstream { status: 400, message: "{\"error\":\"bad range\"}".into() }
        );

        let err = status_error(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, LeaveSyncError::NotFound(msg) if msg.contains("Not Found")));
    }
}
