// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagnostic notifications from the normalizer.
//!
//! The normalizer reports which optional fields it found or missed to an
//! injected [`ParseObserver`]. Observers only see what happened; nothing they
//! do changes the parsed snapshot.
//!
//! Any `Fn(&ParseEvent<'_>) + Send + Sync` closure is an observer, and
//! [`TracingObserver`] forwards events to [`tracing`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use myq_lib::DeviceStateNormalizer;
//! use myq_lib::observer::ParseEvent;
//!
//! let missing = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&missing);
//! let normalizer = DeviceStateNormalizer::new().with_observer(move |event: &ParseEvent<'_>| {
//!     if matches!(event, ParseEvent::FieldMissing { .. }) {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     }
//! });
//!
//! let payload = serde_json::json!({"serial": "S1"});
//! let snapshot = normalizer.from_structured_payload(&payload).unwrap();
//! assert_eq!(snapshot.state(), "");
//! assert!(missing.load(Ordering::Relaxed) > 0);
//! ```

use crate::error::ParseError;

/// Something the normalizer noticed while reading a payload.
#[derive(Debug)]
pub enum ParseEvent<'a> {
    /// A field was read.
    FieldFound {
        /// Serial number of the device, once known.
        serial: Option<&'a str>,
        /// Field tag.
        field: &'a str,
        /// Value after quote removal.
        value: &'a str,
    },

    /// An optional field was absent and its default was used.
    FieldMissing {
        /// Serial number of the device, once known.
        serial: Option<&'a str>,
        /// Field tag.
        field: &'a str,
    },

    /// An entry of the nested state document was not recognized.
    EntryIgnored {
        /// Serial number of the device.
        serial: &'a str,
        /// Key of the ignored entry.
        key: &'a str,
    },

    /// A device in a device list could not be parsed and was skipped.
    DeviceSkipped {
        /// Position of the device in the list.
        index: usize,
        /// Why parsing failed.
        error: &'a ParseError,
    },
}

/// Receiver of [`ParseEvent`]s.
pub trait ParseObserver: Send + Sync {
    /// Called for each event, synchronously, on the parsing thread.
    fn on_event(&self, event: &ParseEvent<'_>);
}

impl<F> ParseObserver for F
where
    F: Fn(&ParseEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &ParseEvent<'_>) {
        self(event);
    }
}

/// Observer that emits every event through [`tracing`].
///
/// Found and ignored fields are logged at `TRACE`, missing fields and
/// skipped devices at `DEBUG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ParseObserver for TracingObserver {
    fn on_event(&self, event: &ParseEvent<'_>) {
        match event {
            ParseEvent::FieldFound {
                serial,
                field,
                value,
            } => {
                tracing::trace!(serial = ?serial, field = %field, value = %value, "Found field");
            }
            ParseEvent::FieldMissing { serial, field } => {
                tracing::debug!(serial = ?serial, field = %field, "Field missing, using default");
            }
            ParseEvent::EntryIgnored { serial, key } => {
                tracing::trace!(serial = %serial, key = %key, "Ignoring state entry");
            }
            ParseEvent::DeviceSkipped { index, error } => {
                tracing::debug!(index, error = %error, "Skipping unparseable device");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn closure_is_observer() {
        let seen = Mutex::new(Vec::new());
        let observer = |event: &ParseEvent<'_>| {
            if let ParseEvent::FieldMissing { field, .. } = event {
                seen.lock().unwrap().push((*field).to_string());
            }
        };

        observer.on_event(&ParseEvent::FieldMissing {
            serial: Some("S1"),
            field: "family",
        });
        observer.on_event(&ParseEvent::FieldFound {
            serial: Some("S1"),
            field: "name",
            value: "Garage",
        });

        assert_eq!(*seen.lock().unwrap(), vec!["family".to_string()]);
    }

    #[test]
    fn tracing_observer_accepts_all_events() {
        let error = ParseError::MissingField("serial".to_string());
        let observer = TracingObserver;

        observer.on_event(&ParseEvent::FieldFound {
            serial: None,
            field: "serial",
            value: "S1",
        });
        observer.on_event(&ParseEvent::EntryIgnored {
            serial: "S1",
            key: "lastUpdate",
        });
        observer.on_event(&ParseEvent::DeviceSkipped {
            index: 0,
            error: &error,
        });
    }
}
