use shelfmatch_matcher::CollaboratorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<CatalogError> for CollaboratorError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Http(e) => CollaboratorError::Transport(e.to_string()),
            CatalogError::RateLimited { domain, .. } => CollaboratorError::Status {
                status: 429,
                url: domain,
            },
            CatalogError::NotFound { url } => CollaboratorError::Status { status: 404, url },
            CatalogError::UnexpectedStatus { status, url } => {
                CollaboratorError::Status { status, url }
            }
            e @ (CatalogError::Deserialize { .. } | CatalogError::InvalidBaseUrl { .. }) => {
                CollaboratorError::Parse(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_status_404() {
        let err: CollaboratorError = CatalogError::NotFound {
            url: "https://catalog.example.com/listings/x".to_owned(),
        }
        .into();
        assert!(matches!(err, CollaboratorError::Status { status: 404, .. }));
    }

    #[test]
    fn deserialize_maps_to_parse() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CollaboratorError = CatalogError::Deserialize {
            context: "search response".to_owned(),
            source,
        }
        .into();
        match err {
            CollaboratorError::Parse(msg) => assert!(msg.contains("search response"), "{msg}"),
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
