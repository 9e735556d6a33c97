//! Shared error mapping for the file-backed stores

use std::path::Path;

use application::ApplicationError;

/// Map an I/O error to an application-layer error
pub(super) fn map_io_error(path: &Path, e: &std::io::Error) -> ApplicationError {
    ApplicationError::Storage(format!("{}: {e}", path.display()))
}

/// Map a JSON error to an application-layer error
pub(super) fn map_json_error(path: &Path, e: &serde_json::Error) -> ApplicationError {
    ApplicationError::Storage(format!("{}: malformed JSON: {e}", path.display()))
}
