// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalizer configuration.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Generation of the vendor payload schema.
///
/// Both generations share the same field tags. The current schema adds a
/// `family` classification next to the device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadShape {
    /// Older schema without a family field. A `family` key is ignored.
    Legacy,
    /// Current schema; `family` is read when present.
    #[default]
    Current,
}

impl PayloadShape {
    /// Returns `true` if payloads of this shape carry a family field.
    #[must_use]
    pub const fn has_family(&self) -> bool {
        matches!(self, Self::Current)
    }
}

/// Configuration for a [`DeviceStateNormalizer`](crate::DeviceStateNormalizer).
///
/// # Examples
///
/// ```
/// use myq_lib::{NormalizerConfig, PayloadShape};
///
/// // Defaults to the current schema
/// assert_eq!(NormalizerConfig::default().shape, PayloadShape::Current);
///
/// // Builder style
/// let config = NormalizerConfig::new().with_shape(PayloadShape::Legacy);
/// assert_eq!(config.shape, PayloadShape::Legacy);
///
/// // From host configuration
/// let config = NormalizerConfig::from_json_str(r#"{"shape":"legacy"}"#).unwrap();
/// assert_eq!(config.shape, PayloadShape::Legacy);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Payload schema generation.
    pub shape: PayloadShape,
}

impl NormalizerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the payload schema generation.
    #[must_use]
    pub fn with_shape(mut self, shape: PayloadShape) -> Self {
        self.shape = shape;
        self
    }

    /// Reads a configuration from JSON text. Missing keys use defaults.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the text is not a valid configuration.
    pub fn from_json_str(text: &str) -> Result<Self, ParseError> {
        serde_json::from_str(text).map_err(ParseError::Json)
    }
}
