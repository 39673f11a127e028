//! Error handlers
//!
//! Maps errors onto the reply codes of the query service.

use crate::error::types::{PageError, PageServerError};
use crate::protocol::responses::{BAD_REQUEST, INTERNAL_ERROR, NOT_FOUND};
use log::error;

/// Log a server-level error
pub fn handle_error(err: &PageServerError) {
    error!("Page server error: {}", err);
}

/// Convert a resolution error to a reply code
pub fn error_to_status_code(err: &PageError) -> u16 {
    match err {
        PageError::InvalidPath(_) => BAD_REQUEST,
        PageError::Course(_) => NOT_FOUND,
        PageError::Permission(_) | PageError::Io(_) => INTERNAL_ERROR,
    }
}
