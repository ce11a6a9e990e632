/// All errors that can occur while fetching, normalizing or comparing player stats.
#[derive(thiserror::Error, Debug)]
pub enum PubgError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body is not valid JSON.
    #[error("response from {url} is not valid json: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    /// The JSON document does not fit the expected payload shape.
    #[error("malformed {context} payload: {source}")]
    Decode {
        context: &'static str,
        source: serde_json::Error,
    },

    /// A player name matched zero records.
    #[error("player not found: {name}")]
    PlayerNotFound { name: String },

    /// An empty player name was passed to a lookup.
    #[error("player name must not be empty")]
    EmptyPlayerName,

    /// A batch lookup asked for more names than the API accepts at once.
    #[error("too many player names: {count} (max {max})")]
    TooManyKeys { count: usize, max: usize },

    /// No API key was configured.
    #[error("missing api key, set PUBG_API_KEY")]
    MissingApiKey,
}

impl PubgError {
    /// Whether the error comes from the transport layer (non-2xx or failed request).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            PubgError::Http { .. } | PubgError::UnexpectedStatus { .. } | PubgError::ResponseBody { .. }
        )
    }

    pub(crate) fn decode(context: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| PubgError::Decode { context, source }
    }
}

pub type Result<T> = std::result::Result<T, PubgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        let status = PubgError::UnexpectedStatus {
            url: "https://api.pubg.com/shards/steam/seasons".to_string(),
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
        };
        assert!(status.is_upstream());
        assert!(!PubgError::EmptyPlayerName.is_upstream());
        assert!(!PubgError::PlayerNotFound {
            name: "shroud".to_string()
        }
        .is_upstream());
    }

    #[test]
    fn test_not_found_names_player() {
        let err = PubgError::PlayerNotFound {
            name: "chocoTaco".to_string(),
        };
        assert_eq!(err.to_string(), "player not found: chocoTaco");
    }
}
