// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `MyQ` library.
//!
//! Normalization only fails when a required field is absent or the payload
//! is not shaped like a device document. Unknown state tokens and malformed
//! online flags are handled by default policies and never surface here.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while parsing a device payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A snapshot without a serial number was offered to a store.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A status token could not be mapped to a host status value.
    #[error("invalid status token: {0}")]
    InvalidState(String),
}

/// Errors related to parsing device payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is missing from the payload.
    #[error("missing field in device payload: {0}")]
    MissingField(String),

    /// Unexpected payload format.
    #[error("unexpected payload format: {0}")]
    UnexpectedFormat(String),
}

impl ParseError {
    /// Returns the name of the missing field, if this is a missing field error.
    #[must_use]
    pub fn missing_field(&self) -> Option<&str> {
        match self {
            Self::MissingField(field) => Some(field),
            _ => None,
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
