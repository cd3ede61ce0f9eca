use thiserror::Error;

/// Failure reported by an external collaborator (catalog search or detail
/// fetch).
///
/// The matcher never propagates these: a failed attempt is logged and
/// treated as an empty result for that attempt.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("unparseable response: {0}")]
    Parse(String),
}
