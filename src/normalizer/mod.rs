// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion of raw `MyQ` device descriptors into snapshots.
//!
//! Two input shapes are accepted:
//!
//! - **Flat**: a string-to-string property map, as stored by the host
//!   (`type`, `state`, `name`, `serial`, `online` and optionally `family`).
//! - **Structured**: a JSON device document from the vendor cloud with
//!   top-level `type`, `serial`, `name`, `family` and a nested `state`
//!   object carrying `doorState`, `lampState` and `online`.
//!
//! Quote characters are removed from every value. The online flag is `true`
//! only for a case-insensitive `"true"`; any other token reads as offline.
//!
//! # Examples
//!
//! ```
//! use myq_lib::DeviceStateNormalizer;
//! use myq_lib::types::{OnlineStatus, Percent};
//!
//! let normalizer = DeviceStateNormalizer::new();
//!
//! let payload = serde_json::json!({
//!     "serial": "CG0812345678",
//!     "type": "wifigaragedooropener",
//!     "family": "garagedoor",
//!     "name": "Garage",
//!     "state": {"doorState": "open", "online": true}
//! });
//!
//! let snapshot = normalizer.from_structured_payload(&payload).unwrap();
//! assert_eq!(snapshot.door_status_percent(), Percent::ZERO);
//! assert_eq!(snapshot.online_status(), OnlineStatus::Online);
//! ```

mod flat;
mod structured;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::NormalizerConfig;
use crate::error::ParseError;
use crate::observer::{ParseEvent, ParseObserver};
use crate::snapshot::{DeviceStateSnapshot, keys};

/// Stateless converter from raw device descriptors to [`DeviceStateSnapshot`]s.
///
/// A normalizer can be shared across threads; every call is independent.
#[derive(Clone, Default)]
pub struct DeviceStateNormalizer {
    config: NormalizerConfig,
    observer: Option<Arc<dyn ParseObserver>>,
}

impl DeviceStateNormalizer {
    /// Creates a normalizer for the current payload shape, without an observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer with the given configuration.
    #[must_use]
    pub fn with_config(config: NormalizerConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Attaches an observer for diagnostic events.
    #[must_use]
    pub fn with_observer(self, observer: impl ParseObserver + 'static) -> Self {
        self.with_shared_observer(Arc::new(observer))
    }

    /// Attaches an observer that is shared with other components.
    #[must_use]
    pub fn with_shared_observer(mut self, observer: Arc<dyn ParseObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Parses a JSON device document from text.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` for malformed JSON, otherwise the errors of
    /// [`from_structured_payload`](Self::from_structured_payload).
    #[allow(clippy::wrong_self_convention)]
    pub fn from_json_str(&self, payload: &str) -> Result<DeviceStateSnapshot, ParseError> {
        let document: Value = serde_json::from_str(payload)?;
        self.from_structured_payload(&document)
    }

    /// Parses every device of a device list.
    ///
    /// Accepts either a JSON array of device documents or an object wrapping
    /// that array under `items`. Devices that fail to parse are skipped and
    /// reported to the observer; the rest keep their list order.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if the payload is not a list.
    ///
    /// # Examples
    ///
    /// ```
    /// use myq_lib::DeviceStateNormalizer;
    ///
    /// let payload = serde_json::json!({"items": [
    ///     {"serial": "S1", "type": "lamp", "name": "Porch", "state": {"lampState": "on"}},
    ///     {"type": "lamp", "name": "no serial"},
    /// ]});
    ///
    /// let snapshots = DeviceStateNormalizer::new().from_device_list(&payload).unwrap();
    /// assert_eq!(snapshots.len(), 1);
    /// assert_eq!(snapshots[0].serial_number(), "S1");
    /// ```
    #[allow(clippy::wrong_self_convention)]
    pub fn from_device_list(
        &self,
        payload: &Value,
    ) -> Result<Vec<DeviceStateSnapshot>, ParseError> {
        let devices = match payload {
            Value::Array(devices) => devices,
            Value::Object(document) => match document.get(keys::ITEMS) {
                Some(Value::Array(devices)) => devices,
                _ => {
                    return Err(ParseError::UnexpectedFormat(format!(
                        "device list object without an `{}` array",
                        keys::ITEMS
                    )));
                }
            },
            other => {
                return Err(ParseError::UnexpectedFormat(format!(
                    "expected a device list, found {}",
                    json_kind(other)
                )));
            }
        };

        let snapshots = devices
            .iter()
            .enumerate()
            .filter_map(|(index, device)| match self.from_structured_payload(device) {
                Ok(snapshot) => Some(snapshot),
                Err(error) => {
                    self.notify(&ParseEvent::DeviceSkipped {
                        index,
                        error: &error,
                    });
                    None
                }
            })
            .collect();
        Ok(snapshots)
    }

    fn notify(&self, event: &ParseEvent<'_>) {
        if let Some(observer) = &self.observer {
            observer.on_event(event);
        }
    }

    fn found(&self, serial: Option<&str>, field: &str, value: &str) {
        self.notify(&ParseEvent::FieldFound {
            serial,
            field,
            value,
        });
    }

    fn missing(&self, serial: Option<&str>, field: &str) {
        self.notify(&ParseEvent::FieldMissing { serial, field });
    }
}

impl fmt::Debug for DeviceStateNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceStateNormalizer")
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Removes every quote character left over from upstream serialization.
fn strip_quotes(value: &str) -> String {
    value.replace('"', "")
}

/// Case-insensitive `"true"`; everything else is `false`.
fn parse_online(token: &str) -> bool {
    token.eq_ignore_ascii_case("true")
}

/// Renders a JSON scalar as text: strings by content, others by JSON text.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => strip_quotes(text),
        other => strip_quotes(&other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    #[test]
    fn strip_quotes_removes_all_quotes() {
        assert_eq!(strip_quotes(r#""Garage""#), "Garage");
        assert_eq!(strip_quotes("plain"), "plain");
        assert_eq!(strip_quotes(r#"say "hi""#), "say hi");
    }

    #[test]
    fn parse_online_is_permissive() {
        assert!(parse_online("true"));
        assert!(parse_online("TRUE"));
        assert!(parse_online("True"));
        assert!(!parse_online("false"));
        assert!(!parse_online("yes"));
        assert!(!parse_online("1"));
        assert!(!parse_online(""));
        assert!(!parse_online(" true"));
    }

    #[test]
    fn scalar_text_renders_json_values() {
        assert_eq!(scalar_text(&json!("closed")), "closed");
        assert_eq!(scalar_text(&json!(true)), "true");
        assert_eq!(scalar_text(&json!(42)), "42");
        assert_eq!(scalar_text(&json!(r#""quoted""#)), "quoted");
    }

    #[test]
    fn from_json_str_rejects_malformed_json() {
        let result = DeviceStateNormalizer::new().from_json_str("{\"serial\":");
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn from_json_str_parses_document() {
        let snapshot = DeviceStateNormalizer::new()
            .from_json_str(r#"{"serial":"S1","type":"lamp","name":"Porch","state":{"lampState":"on"}}"#)
            .unwrap();
        assert_eq!(snapshot.serial_number(), "S1");
        assert_eq!(snapshot.state(), "on");
    }

    #[test]
    fn device_list_accepts_bare_array() {
        let payload = json!([
            {"serial": "S1", "type": "lamp", "name": "A"},
            {"serial": "S2", "type": "lamp", "name": "B"},
        ]);
        let snapshots = DeviceStateNormalizer::new()
            .from_device_list(&payload)
            .unwrap();
        let serials: Vec<_> = snapshots.iter().map(DeviceStateSnapshot::serial_number).collect();
        assert_eq!(serials, vec!["S1", "S2"]);
    }

    #[test]
    fn device_list_reports_skipped_devices() {
        let skipped = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&skipped);
        let normalizer = DeviceStateNormalizer::new().with_observer(move |event: &ParseEvent<'_>| {
            if let ParseEvent::DeviceSkipped { index, .. } = event {
                sink.lock().unwrap().push(*index);
            }
        });

        let payload = json!({"items": [{"name": "x"}, {"serial": "S1"}, "garbage"]});
        let snapshots = normalizer.from_device_list(&payload).unwrap();

        assert_eq!(snapshots.len(), 1);
        assert_eq!(*skipped.lock().unwrap(), vec![0, 2]);
    }

    #[test]
    fn device_list_rejects_other_shapes() {
        let normalizer = DeviceStateNormalizer::new();
        assert!(matches!(
            normalizer.from_device_list(&json!({"devices": []})),
            Err(ParseError::UnexpectedFormat(_))
        ));
        assert!(matches!(
            normalizer.from_device_list(&json!("S1")),
            Err(ParseError::UnexpectedFormat(_))
        ));
    }

    #[test]
    fn debug_hides_observer() {
        let normalizer = DeviceStateNormalizer::new().with_observer(crate::TracingObserver);
        let text = format!("{normalizer:?}");
        assert!(text.contains("observer: true"));
    }
}
