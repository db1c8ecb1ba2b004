use serde::Deserialize;

/// Success envelope: `{ "result": ... }`
#[derive(Debug, Deserialize)]
pub(super) struct ApiEnvelope<T> {
    pub result: T,
}

/// Failure envelope: `{ "error": "..." }`
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub error: String,
}
