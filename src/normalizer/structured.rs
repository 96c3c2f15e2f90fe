// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reader for JSON device documents.

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::observer::ParseEvent;
use crate::snapshot::{DeviceStateSnapshot, keys};

use super::{DeviceStateNormalizer, json_kind, parse_online, scalar_text};

/// Values picked out of the nested `state` document.
#[derive(Debug, Default)]
struct NestedState {
    door: Option<String>,
    lamp: Option<String>,
    online: Option<bool>,
}

impl DeviceStateNormalizer {
    /// Builds a snapshot from a JSON device document.
    ///
    /// The serial number is read first and is the only required field.
    /// Missing `type` or `name` read as empty strings. Entries of the nested
    /// `state` object are scanned in any order: `doorState` or `lampState`
    /// becomes the status token and `online` the connectivity flag. A
    /// missing `state` object leaves the token empty and the device offline.
    /// If a document carries both `doorState` and `lampState`, the door state
    /// wins. Null entries count as absent, as they do at the top level.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `serial` is absent or null, and
    /// `ParseError::UnexpectedFormat` if the payload is not a JSON object.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_structured_payload(
        &self,
        payload: &Value,
    ) -> Result<DeviceStateSnapshot, ParseError> {
        let Some(document) = payload.as_object() else {
            return Err(ParseError::UnexpectedFormat(format!(
                "expected a device object, found {}",
                json_kind(payload)
            )));
        };

        let serial = match document.get(keys::SERIAL) {
            Some(value) if !value.is_null() => scalar_text(value),
            _ => return Err(ParseError::MissingField(keys::SERIAL.to_string())),
        };
        self.found(None, keys::SERIAL, &serial);

        let device_type = self.top_level_text(document, &serial, keys::TYPE);
        let name = self.top_level_text(document, &serial, keys::NAME);
        let family = if self.config.shape.has_family() {
            self.optional_text(document, &serial, keys::FAMILY)
        } else {
            None
        };

        let nested = self.read_nested_state(document, &serial);
        let state = nested.door.or(nested.lamp).unwrap_or_default();
        let online = nested.online.unwrap_or(false);

        let mut snapshot = DeviceStateSnapshot::new(serial, device_type, name, state, online);
        if let Some(family) = family {
            snapshot = snapshot.with_family(family);
        }
        Ok(snapshot)
    }

    fn top_level_text(&self, document: &Map<String, Value>, serial: &str, field: &str) -> String {
        self.optional_text(document, serial, field).unwrap_or_default()
    }

    fn optional_text(
        &self,
        document: &Map<String, Value>,
        serial: &str,
        field: &str,
    ) -> Option<String> {
        match document.get(field) {
            Some(value) if !value.is_null() => {
                let text = scalar_text(value);
                self.found(Some(serial), field, &text);
                Some(text)
            }
            _ => {
                self.missing(Some(serial), field);
                None
            }
        }
    }

    fn read_nested_state(&self, document: &Map<String, Value>, serial: &str) -> NestedState {
        let mut nested = NestedState::default();

        let Some(entries) = document.get(keys::STATE).and_then(Value::as_object) else {
            self.missing(Some(serial), keys::STATE);
            return nested;
        };

        for (key, value) in entries {
            if value.is_null() {
                self.notify(&ParseEvent::EntryIgnored { serial, key });
                continue;
            }
            match key.as_str() {
                keys::DOOR_STATE => {
                    let text = scalar_text(value);
                    self.found(Some(serial), keys::DOOR_STATE, &text);
                    nested.door = Some(text);
                }
                keys::LAMP_STATE => {
                    let text = scalar_text(value);
                    self.found(Some(serial), keys::LAMP_STATE, &text);
                    nested.lamp = Some(text);
                }
                keys::ONLINE => {
                    let text = scalar_text(value);
                    self.found(Some(serial), keys::ONLINE, &text);
                    nested.online = Some(parse_online(&text));
                }
                _ => self.notify(&ParseEvent::EntryIgnored { serial, key }),
            }
        }

        if nested.door.is_none() && nested.lamp.is_none() {
            self.missing(Some(serial), keys::DOOR_STATE);
        }
        if nested.online.is_none() {
            self.missing(Some(serial), keys::ONLINE);
        }
        nested
    }
}
