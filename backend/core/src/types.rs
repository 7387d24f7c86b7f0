use serde::{Deserialize, Serialize};

/// Successful analysis payload returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub result: String,
}

/// Failure payload returned to the caller.
///
/// The boundary distinguishes only "result produced" vs "error occurred";
/// both are plain text, never structured error codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisError {
    pub error: String,
}
