//! Preview-to-confirm handoff blob.
//!
//! The preview step parses and partitions an upload but must not write
//! anything; the confirm step runs later with no access to the original
//! file. The full parsed record set crosses that boundary as a JSON blob.

use crate::error::ImportError;
use crate::model::UserRecord;

/// Encode records for the preview-to-confirm handoff.
pub fn encode(records: &[UserRecord]) -> Result<String, ImportError> {
    serde_json::to_string(records).map_err(|e| ImportError::Staging(e.to_string()))
}

/// Decode a staged blob back into records. Absent and present-but-empty
/// fields come back exactly as encoded.
pub fn decode(blob: &str) -> Result<Vec<UserRecord>, ImportError> {
    serde_json::from_str(blob).map_err(|e| ImportError::Staging(e.to_string()))
}
