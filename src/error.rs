use thiserror::Error;

/// Failure fetching or decoding a resource from the sports API
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response from {url} is missing {field}")]
    MissingField { url: String, field: &'static str },
}

impl FetchError {
    /// True for network failures, timeouts and non-2xx statuses;
    /// false for bodies that do not match the expected schema.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Transport { .. } | FetchError::Status { .. }
        )
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. }
            | FetchError::MissingField { url, .. } => url,
        }
    }
}

/// Kickoff timestamp not in the upstream `YYYY-MM-DDTHH:MMZ` form
#[derive(Debug, Error)]
#[error("Kickoff time {input:?} is not in YYYY-MM-DDTHH:MMZ form: {source}")]
pub struct KickoffFormatError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let status = FetchError::Status {
            url: "http://x/odds".to_string(),
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        assert!(status.is_transport());
        assert_eq!(status.url(), "http://x/odds");
        assert_eq!(status.to_string(), "http://x/odds returned HTTP 502 Bad Gateway");

        let missing = FetchError::MissingField {
            url: "http://x/events".to_string(),
            field: "$meta.parameters.week",
        };
        assert!(!missing.is_transport());

        let decode = FetchError::Decode {
            url: "http://x".to_string(),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert!(!decode.is_transport());
    }
}
