use crate::core::error::RemoteError;
use crate::core::traits::{HttpResponse, Transport};
use std::time::Duration;

/// Media server transport backed by `ureq`.
pub struct UreqTransport {
    base_url: String,
    http_client: ureq::Agent,
}

impl UreqTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http_client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();

        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn into_response(response: ureq::Response) -> Result<HttpResponse, RemoteError> {
        let status = response.status();
        let status_text = response.status_text().to_string();
        let body = response
            .into_string()
            .map_err(|err| RemoteError::Transport(format!("failed to read body: {err}")))?;

        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}

impl Transport for UreqTransport {
    fn get(&self, path: &str) -> Result<HttpResponse, RemoteError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        match self.http_client.get(&url).call() {
            Ok(response) => Self::into_response(response),
            // Non-2xx answers are still answers; callers classify them.
            Err(ureq::Error::Status(_, response)) => Self::into_response(response),
            Err(ureq::Error::Transport(err)) => Err(RemoteError::Transport(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalised() {
        let t = UreqTransport::new(" http://media.local:8080/ ", Duration::from_secs(1));
        assert_eq!(t.url("/playlist"), "http://media.local:8080/playlist");
    }
}
